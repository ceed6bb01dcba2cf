//! Common traits for repositories
//!
//! Defines the storage abstractions the handlers program against.

use crate::error::AppError;
use crate::models::{Booking, BookingStatus, Invoice};
use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

/// Booking repository trait
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a new booking; the returned row carries the assigned
    /// sequential booking number
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;

    /// Find booking by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, AppError>;

    /// List bookings, newest first, with optional status and plate filters
    async fn list_filtered(
        &self,
        estado: Option<BookingStatus>,
        matricula: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Booking>, i64), AppError>;

    /// Update an existing booking
    async fn update(&self, booking: &Booking) -> Result<Booking, AppError>;

    /// Soft-cancel a booking
    async fn cancel(&self, id: Uuid) -> Result<Booking, AppError>;
}

/// Invoice repository trait
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Find the invoice for a booking, if one was already issued
    async fn find_by_booking(&self, reserva_id: Uuid) -> Result<Option<Invoice>, AppError>;

    /// Issue a new invoice, consuming the next number from the invoice
    /// sequence inside a single transaction
    async fn create_with_sequence(
        &self,
        reserva_id: Uuid,
        metodo_pago: &str,
    ) -> Result<Invoice, AppError>;
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl PaginationMeta {
    pub fn new(total: i64, page: i64, per_page: i64) -> Self {
        let total_pages = if per_page > 0 {
            (total + per_page - 1) / per_page
        } else {
            0
        };

        Self {
            total,
            page,
            per_page,
            total_pages,
        }
    }
}
