//! Valet booking core library
//!
//! This crate provides the foundational types for the valet-parking booking
//! backend. It includes:
//!
//! - Domain models (Booking, Invoice, SpaceType)
//! - The tariff tables and the pricing engine
//! - Common traits for repositories
//! - Unified error handling with HTTP response mapping
//! - Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod pricing;
pub mod tariff;
pub mod traits;

pub use config::AppConfig;
pub use error::{AppError, FieldError};

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
