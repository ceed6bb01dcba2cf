//! Invoice model
//!
//! An invoice fixes the sequential invoice number and payment method for a
//! booking. At most one invoice exists per booking; the number comes from a
//! single-row database sequence consumed transactionally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Invoice entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier (UUID)
    pub id: Uuid,

    /// Booking this invoice belongs to
    pub reserva_id: Uuid,

    /// Sequential invoice number
    pub num_factura: i64,

    /// Payment method recorded at invoicing time
    pub metodo_pago: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    /// Create a new invoice for a booking
    pub fn new(reserva_id: Uuid, num_factura: i64, metodo_pago: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            reserva_id,
            num_factura,
            metodo_pago,
            created_at: Utc::now(),
        }
    }
}
