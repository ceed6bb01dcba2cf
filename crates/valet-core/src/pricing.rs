//! Pricing engine
//!
//! Pure computation from stay dates and space type to a total price. The
//! engine is referentially transparent and shares only the immutable tariff
//! tables, so any number of request handlers may call it concurrently.
//!
//! Prices are always recomputed here server-side; a price sent by a client
//! is never trusted.

use crate::error::AppError;
use crate::models::SpaceType;
use crate::tariff;
use crate::AppResult;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result of a pricing computation
///
/// Serializes to the wire shape `{ "totalPrice": <number> }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
}

impl PriceQuote {
    /// The "no price without full data" quote
    pub fn zero() -> Self {
        Self {
            total_price: Decimal::ZERO,
        }
    }
}

/// Compute the total price for a stay.
///
/// Rules, in order:
///
/// 1. If any input is missing (or the space label is empty) the result is a
///    zero quote, with no error. Callers quoting during partial form entry
///    rely on this.
/// 2. The stay length is the calendar-day difference between the dates.
///    Same-day drop-off and pick-up counts as one day.
/// 3. An unrecognized space label is the only failure this function
///    signals. It is never silently defaulted.
/// 4. The price is the floor match in the space's tariff table. A negative
///    day count (pick-up before drop-off) is not rejected; it falls through
///    to the cheapest tier like any other below-threshold stay.
pub fn calculate_price(
    fecha_entrada: Option<NaiveDate>,
    fecha_salida: Option<NaiveDate>,
    tipo_plaza: Option<&str>,
) -> AppResult<PriceQuote> {
    let tipo_plaza = tipo_plaza.filter(|label| !label.is_empty());

    let (Some(entrada), Some(salida), Some(label)) = (fecha_entrada, fecha_salida, tipo_plaza)
    else {
        return Ok(PriceQuote::zero());
    };

    let mut days = (salida - entrada).num_days();
    if days == 0 {
        days = 1;
    }

    let space = SpaceType::parse(label)
        .ok_or_else(|| AppError::UnknownSpaceType(label.to_string()))?;

    let total_price = tariff::table_for(space).price_for_days(days);
    Ok(PriceQuote { total_price })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn price(entrada: &str, salida: &str, tipo: &str) -> Decimal {
        calculate_price(Some(date(entrada)), Some(date(salida)), Some(tipo))
            .unwrap()
            .total_price
    }

    #[test]
    fn test_same_day_stay_counts_as_one_day() {
        assert_eq!(price("2024-06-01", "2024-06-01", "Plaza Aire Libre"), dec!(25));
        assert_eq!(
            price("2024-06-01", "2024-06-01", "Plaza Aire Libre"),
            price("2024-06-01", "2024-06-02", "Plaza Aire Libre")
        );
    }

    #[test]
    fn test_floor_matching_on_tier_boundaries() {
        // 9 days lands exactly on the covered threshold-9 tier
        assert_eq!(price("2024-01-01", "2024-01-10", "Plaza Cubierta"), dec!(50));
        // 8 days floors down to the threshold-7 tier
        assert_eq!(price("2024-01-01", "2024-01-09", "Plaza Cubierta"), dec!(45));
    }

    #[test]
    fn test_longest_tier_caps_the_price() {
        // 301 days hits the top covered tier
        assert_eq!(price("2024-01-01", "2024-10-28", "Plaza Cubierta"), dec!(550));
        // far beyond the top threshold stays at the top price
        assert_eq!(price("2024-01-01", "2026-09-27", "Plaza Cubierta"), dec!(550));
    }

    #[test]
    fn test_idempotence() {
        for _ in 0..3 {
            assert_eq!(price("2024-03-10", "2024-03-20", "Plaza Aire Libre"), dec!(45));
        }
    }

    #[test]
    fn test_unknown_space_type_is_the_only_error() {
        let err = calculate_price(
            Some(date("2024-01-01")),
            Some(date("2024-01-05")),
            Some("Plaza VIP"),
        )
        .unwrap_err();

        match err {
            AppError::UnknownSpaceType(label) => assert_eq!(label, "Plaza VIP"),
            other => panic!("expected UnknownSpaceType, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_input_defaults_to_zero() {
        let quote = calculate_price(None, Some(date("2024-01-05")), Some("Plaza Cubierta")).unwrap();
        assert_eq!(quote.total_price, Decimal::ZERO);

        let quote = calculate_price(Some(date("2024-01-01")), None, Some("Plaza Cubierta")).unwrap();
        assert_eq!(quote.total_price, Decimal::ZERO);

        let quote = calculate_price(Some(date("2024-01-01")), Some(date("2024-01-05")), None).unwrap();
        assert_eq!(quote.total_price, Decimal::ZERO);
    }

    #[test]
    fn test_empty_label_counts_as_missing() {
        let quote = calculate_price(Some(date("2024-01-01")), Some(date("2024-01-05")), Some(""))
            .unwrap();
        assert_eq!(quote.total_price, Decimal::ZERO);
    }

    #[test]
    fn test_negative_duration_falls_back_to_cheapest_tier() {
        // pick-up before drop-off is absorbed, not rejected
        assert_eq!(price("2024-06-10", "2024-06-01", "Plaza Cubierta"), dec!(30));
        assert_eq!(price("2024-06-10", "2024-06-01", "Plaza Aire Libre"), dec!(25));
    }

    #[test]
    fn test_stay_length_is_monotone_in_price() {
        let entrada = date("2024-01-01");
        let mut last = Decimal::ZERO;
        for days in 1..=400i64 {
            let salida = entrada + chrono::Duration::days(days);
            let quote =
                calculate_price(Some(entrada), Some(salida), Some("Plaza Cubierta")).unwrap();
            assert!(quote.total_price >= last);
            last = quote.total_price;
        }
    }

    #[test]
    fn test_covered_at_least_as_expensive_as_open_air() {
        let entrada = date("2024-01-01");
        for days in 1..=400i64 {
            let salida = entrada + chrono::Duration::days(days);
            let covered =
                calculate_price(Some(entrada), Some(salida), Some("Plaza Cubierta")).unwrap();
            let open_air =
                calculate_price(Some(entrada), Some(salida), Some("Plaza Aire Libre")).unwrap();
            assert!(covered.total_price >= open_air.total_price);
        }
    }

    #[test]
    fn test_quote_serializes_as_wire_number() {
        let quote = PriceQuote {
            total_price: dec!(50),
        };
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["totalPrice"], serde_json::json!(50.0));
    }
}
