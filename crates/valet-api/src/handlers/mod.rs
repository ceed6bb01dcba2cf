//! HTTP request handlers

pub mod booking;
pub mod invoice;
pub mod pricing;

pub use booking::configure as configure_bookings;
pub use invoice::configure as configure_invoices;
