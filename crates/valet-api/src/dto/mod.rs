//! Data Transfer Objects (DTOs) for API requests and responses

pub mod booking;
pub mod common;
pub mod invoice;
pub mod pricing;

mod validators;

pub use booking::*;
pub use common::*;
pub use invoice::*;
pub use pricing::*;
