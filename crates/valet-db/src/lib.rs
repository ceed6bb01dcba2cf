//! Valet booking database layer
//!
//! This crate provides PostgreSQL database access and repository implementations
//! for the valet booking backend. It includes:
//!
//! - Connection pool management with sqlx
//! - Repository implementations for bookings and invoices
//! - Transactional invoice numbering backed by a single-row sequence table

pub mod pool;
pub mod repositories;

pub use pool::create_pool;
pub use repositories::*;

// Re-export commonly used types
pub use sqlx::PgPool;
pub use valet_core::{AppError, AppResult};
