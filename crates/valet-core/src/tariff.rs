//! Tariff tables
//!
//! Pricing works off two authored tier tables, one per space type. Each tier
//! reads "a stay of at least `threshold` days costs `price`". Tiers are
//! ordered by descending threshold so the first tier whose threshold does
//! not exceed the stay length is the floor match.
//!
//! Prices change rarely and only by redeploy; the tables are baked into the
//! binary and validated once at startup, not trusted to authoring
//! discipline. Every table must end with a threshold-1 tier so any stay of
//! one day or more matches something.

use crate::models::SpaceType;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// One pricing tier: stays of at least `threshold` days cost `price`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TariffTier {
    pub threshold: i64,
    pub price: Decimal,
}

const CUBIERTA_TIERS: [TariffTier; 27] = [
    TariffTier { threshold: 301, price: dec!(550) },
    TariffTier { threshold: 300, price: dec!(505) },
    TariffTier { threshold: 281, price: dec!(490) },
    TariffTier { threshold: 261, price: dec!(465) },
    TariffTier { threshold: 230, price: dec!(420) },
    TariffTier { threshold: 200, price: dec!(380) },
    TariffTier { threshold: 180, price: dec!(350) },
    TariffTier { threshold: 159, price: dec!(310) },
    TariffTier { threshold: 140, price: dec!(285) },
    TariffTier { threshold: 121, price: dec!(260) },
    TariffTier { threshold: 101, price: dec!(230) },
    TariffTier { threshold: 81, price: dec!(200) },
    TariffTier { threshold: 61, price: dec!(160) },
    TariffTier { threshold: 51, price: dec!(140) },
    TariffTier { threshold: 43, price: dec!(120) },
    TariffTier { threshold: 33, price: dec!(110) },
    TariffTier { threshold: 29, price: dec!(90) },
    TariffTier { threshold: 25, price: dec!(80) },
    TariffTier { threshold: 21, price: dec!(70) },
    TariffTier { threshold: 18, price: dec!(65) },
    TariffTier { threshold: 15, price: dec!(60) },
    TariffTier { threshold: 12, price: dec!(55) },
    TariffTier { threshold: 9, price: dec!(50) },
    TariffTier { threshold: 7, price: dec!(45) },
    TariffTier { threshold: 5, price: dec!(40) },
    TariffTier { threshold: 3, price: dec!(35) },
    TariffTier { threshold: 1, price: dec!(30) },
];

const AIRE_LIBRE_TIERS: [TariffTier; 25] = [
    TariffTier { threshold: 300, price: dec!(317) },
    TariffTier { threshold: 281, price: dec!(295) },
    TariffTier { threshold: 260, price: dec!(265) },
    TariffTier { threshold: 230, price: dec!(250) },
    TariffTier { threshold: 201, price: dec!(235) },
    TariffTier { threshold: 182, price: dec!(215) },
    TariffTier { threshold: 140, price: dec!(200) },
    TariffTier { threshold: 121, price: dec!(190) },
    TariffTier { threshold: 101, price: dec!(170) },
    TariffTier { threshold: 81, price: dec!(150) },
    TariffTier { threshold: 61, price: dec!(130) },
    TariffTier { threshold: 51, price: dec!(115) },
    TariffTier { threshold: 43, price: dec!(105) },
    TariffTier { threshold: 33, price: dec!(90) },
    TariffTier { threshold: 29, price: dec!(80) },
    TariffTier { threshold: 25, price: dec!(70) },
    TariffTier { threshold: 21, price: dec!(65) },
    TariffTier { threshold: 18, price: dec!(60) },
    TariffTier { threshold: 15, price: dec!(55) },
    TariffTier { threshold: 12, price: dec!(50) },
    TariffTier { threshold: 9, price: dec!(45) },
    TariffTier { threshold: 7, price: dec!(40) },
    TariffTier { threshold: 5, price: dec!(35) },
    TariffTier { threshold: 3, price: dec!(30) },
    TariffTier { threshold: 1, price: dec!(25) },
];

/// Validated, immutable tariff table for one space type
#[derive(Debug, Clone, Copy)]
pub struct TariffTable {
    pub space: SpaceType,
    pub tiers: &'static [TariffTier],
}

impl TariffTable {
    /// Build a table, asserting the structural invariants the floor search
    /// relies on: non-empty, strictly descending thresholds, and a final
    /// threshold-1 tier as catch-all.
    pub fn new(space: SpaceType, tiers: &'static [TariffTier]) -> Self {
        assert!(!tiers.is_empty(), "tariff table for {space} is empty");
        for pair in tiers.windows(2) {
            assert!(
                pair[0].threshold > pair[1].threshold,
                "tariff table for {space} is not strictly descending at threshold {}",
                pair[1].threshold
            );
        }
        let last = tiers[tiers.len() - 1];
        assert!(
            last.threshold == 1,
            "tariff table for {space} must end with a threshold-1 tier, found {}",
            last.threshold
        );

        Self { space, tiers }
    }

    /// Floor match: price of the first tier whose threshold does not exceed
    /// `days`. Stays shorter than every threshold (only possible below one
    /// day) fall back to the last, cheapest tier.
    pub fn price_for_days(&self, days: i64) -> Decimal {
        self.tiers
            .iter()
            .find(|tier| days >= tier.threshold)
            .map(|tier| tier.price)
            .unwrap_or_else(|| self.tiers[self.tiers.len() - 1].price)
    }
}

/// Covered space tariff
pub static TARIFF_CUBIERTA: Lazy<TariffTable> =
    Lazy::new(|| TariffTable::new(SpaceType::Cubierta, &CUBIERTA_TIERS));

/// Open-air space tariff
pub static TARIFF_AIRE_LIBRE: Lazy<TariffTable> =
    Lazy::new(|| TariffTable::new(SpaceType::AireLibre, &AIRE_LIBRE_TIERS));

/// The table governing a space type
pub fn table_for(space: SpaceType) -> &'static TariffTable {
    match space {
        SpaceType::Cubierta => &TARIFF_CUBIERTA,
        SpaceType::AireLibre => &TARIFF_AIRE_LIBRE,
    }
}

/// Force both tables, running their validation at startup instead of on the
/// first pricing call.
pub fn init() {
    Lazy::force(&TARIFF_CUBIERTA);
    Lazy::force(&TARIFF_AIRE_LIBRE);
}
