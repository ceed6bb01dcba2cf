//! Repository implementations
//!
//! This module contains concrete implementations of the repository traits
//! defined in valet-core, using sqlx for PostgreSQL access.

pub mod booking_repo;
pub mod invoice_repo;

pub use booking_repo::PgBookingRepository;
pub use invoice_repo::PgInvoiceRepository;
