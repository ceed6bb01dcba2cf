//! Notifications and printable documents for the valet backend.
//!
//! This crate owns everything that leaves the system on a side channel:
//! transactional emails, parking receipts and invoices. The HTTP API stays
//! thin and delegates here.
//!
//! # Architecture
//!
//! - `Mailer` talks to the Brevo transactional email API
//! - `RenderClient` turns document payloads into PDF bytes through the
//!   external render service
//! - `templates` builds the HTML bodies for booking emails
//! - `documents` builds the data payloads for receipts and invoices
//! - `BookingNotifier` ties the above together; it is best-effort by design
//!   and never fails the request that triggered it

pub mod documents;
pub mod mailer;
pub mod notifier;
pub mod render;
pub mod templates;

pub use documents::{BookingReceipt, InvoiceDocument};
pub use mailer::{EmailAttachment, Mailer};
pub use notifier::BookingNotifier;
pub use render::RenderClient;

/// Brand texts shared by emails and documents
pub mod brand {
    /// Public name used in email headers and footers
    pub const NAME: &str = "ALC Valet Parking";

    /// Slogan shown under the name in the confirmation email header
    pub const TAGLINE: &str = "Tu vehículo en las mejores manos";

    /// Public website, target of every email button
    pub const WEBSITE_URL: &str = "https://www.alcvaletparking.com";

    /// Postal address printed in email footers
    pub const POSTAL_ADDRESS: &str = "Ctra. Aeropuerto-Torrellano s/n CV-852, 03320 Torrellano";
}
