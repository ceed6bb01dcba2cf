//! Parking space types
//!
//! The business sells exactly two kinds of space. The labels double as the
//! tariff table keys, travel verbatim on the wire and are stored as-is in
//! the database, so parsing is strict: nothing but the two exact strings is
//! accepted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Parking space type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpaceType {
    /// Open-air space
    #[serde(rename = "Plaza Aire Libre")]
    AireLibre,
    /// Covered space
    #[serde(rename = "Plaza Cubierta")]
    Cubierta,
}

impl SpaceType {
    /// The label used on the wire and as tariff table key
    pub fn as_str(&self) -> &'static str {
        match self {
            SpaceType::AireLibre => "Plaza Aire Libre",
            SpaceType::Cubierta => "Plaza Cubierta",
        }
    }

    /// Parse from the exact label; anything else is an unknown space type
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Plaza Aire Libre" => Some(SpaceType::AireLibre),
            "Plaza Cubierta" => Some(SpaceType::Cubierta),
            _ => None,
        }
    }
}

impl fmt::Display for SpaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
