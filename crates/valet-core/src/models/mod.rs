//! Domain models for the valet booking backend
//!
//! This module contains all the core domain models used throughout the application.

pub mod booking;
pub mod invoice;
pub mod space;

pub use booking::{Booking, BookingStatus};
pub use invoice::Invoice;
pub use space::SpaceType;
