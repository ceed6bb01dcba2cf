//! Booking model
//!
//! A booking is a reservation of a parking space for a stay, together with
//! the customer, vehicle and flight details the valet desk needs. Prices are
//! always computed server-side from the tariff tables; whatever a client
//! sends as price is discarded.

use crate::models::space::SpaceType;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BookingStatus {
    /// Booking is active
    #[default]
    #[serde(rename = "confirmada")]
    Confirmed,
    /// Booking was cancelled (soft delete)
    #[serde(rename = "cancelada")]
    Cancelled,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Confirmed => write!(f, "confirmada"),
            BookingStatus::Cancelled => write!(f, "cancelada"),
        }
    }
}

impl BookingStatus {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "confirmada" => Some(BookingStatus::Confirmed),
            "cancelada" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }

    /// Check if the booking still occupies a space
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Confirmed)
    }
}

/// Booking entity
///
/// Dates and times are kept separate on purpose: only the dates feed the
/// pricing engine, the times are informational for the valet desk. A booking
/// may be created without dates; it then carries price zero until the dates
/// are filled in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier (UUID)
    pub id: Uuid,

    /// Human-facing sequential booking number, assigned by the database
    pub num_reserva: i64,

    /// Drop-off date
    pub fecha_entrada: Option<NaiveDate>,

    /// Drop-off time (informational only)
    pub hora_entrada: Option<NaiveTime>,

    /// Pick-up date
    pub fecha_salida: Option<NaiveDate>,

    /// Pick-up time (informational only)
    pub hora_salida: Option<NaiveTime>,

    /// Space type, also the tariff table key
    pub tipo_plaza: SpaceType,

    /// Vehicle make, model and colour
    pub coche: String,

    /// Licence plate, stored uppercased
    pub matricula: String,

    /// Return flight number
    pub num_vuelo: Option<String>,

    /// Drop-off terminal
    pub terminal_entrada: Option<String>,

    /// Pick-up terminal
    pub terminal_salida: Option<String>,

    /// Free-form remarks from the customer
    pub comentarios: Option<String>,

    /// Registered customer id, if the booking belongs to an account
    pub cliente_id: Option<Uuid>,

    /// Customer full name or company name
    pub nombre_completo: Option<String>,

    /// Contact phone
    pub telefono: Option<String>,

    /// Contact email; notifications are skipped when absent
    pub email: Option<String>,

    /// How the customer found us
    pub nos_conociste: Option<String>,

    /// Tax id for invoicing
    pub cif: Option<String>,

    /// Driver name when different from the customer
    pub nombre_conductor: Option<String>,

    /// Billing address
    pub direccion: Option<String>,

    /// Total stay price, always recomputed from the tariff tables
    pub precio: Decimal,

    /// Current status
    pub estado: BookingStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Create a new booking with the required fields; the rest start empty
    pub fn new(tipo_plaza: SpaceType, coche: String, matricula: String, precio: Decimal) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            num_reserva: 0,
            fecha_entrada: None,
            hora_entrada: None,
            fecha_salida: None,
            hora_salida: None,
            tipo_plaza,
            coche,
            matricula,
            num_vuelo: None,
            terminal_entrada: None,
            terminal_salida: None,
            comentarios: None,
            cliente_id: None,
            nombre_completo: None,
            telefono: None,
            email: None,
            nos_conociste: None,
            cif: None,
            nombre_conductor: None,
            direccion: None,
            precio,
            estado: BookingStatus::Confirmed,
            created_at: now,
            updated_at: now,
        }
    }

    /// Soft-cancel the booking
    pub fn cancel(&mut self) {
        self.estado = BookingStatus::Cancelled;
        self.updated_at = Utc::now();
    }

    /// Check if the booking was cancelled
    pub fn is_cancelled(&self) -> bool {
        self.estado == BookingStatus::Cancelled
    }
}
