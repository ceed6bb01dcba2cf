//! Best-effort booking notifications.
//!
//! A booking is never rolled back because an email or a PDF could not be
//! produced. Every failure here is logged and swallowed; the caller only
//! sees the booking result.

use tracing::{debug, instrument, warn};
use valet_core::models::Booking;

use crate::documents::BookingReceipt;
use crate::mailer::{EmailAttachment, Mailer};
use crate::render::RenderClient;
use crate::templates;

/// Sends booking lifecycle emails with the printed ticket attached.
pub struct BookingNotifier {
    mailer: Mailer,
    render: RenderClient,
}

impl BookingNotifier {
    pub fn new(mailer: Mailer, render: RenderClient) -> Self {
        Self { mailer, render }
    }

    /// Confirmation email with the ticket PDF, sent on creation.
    #[instrument(skip(self, booking), fields(num_reserva = booking.num_reserva))]
    pub async fn booking_created(&self, booking: &Booking) {
        let Some(email) = self.recipient(booking) else {
            return;
        };

        let subject = format!(
            "Reserva Confirmada #{} - ALC Valet Parking",
            booking.num_reserva
        );
        let html = templates::booking_confirmation(booking);
        let attachments = self.ticket_attachment(booking).await;

        if let Err(e) = self.mailer.send(email, &subject, &html, &attachments).await {
            warn!(
                "Failed to send confirmation email for booking {}: {}",
                booking.num_reserva, e
            );
        }
    }

    /// Update email with the reissued ticket PDF.
    #[instrument(skip(self, booking), fields(num_reserva = booking.num_reserva))]
    pub async fn booking_updated(&self, booking: &Booking) {
        let Some(email) = self.recipient(booking) else {
            return;
        };

        let subject = format!(
            "Reserva Modificada #{} - ALC Valet Parking",
            booking.num_reserva
        );
        let html = templates::booking_update(booking);
        let attachments = self.ticket_attachment(booking).await;

        if let Err(e) = self.mailer.send(email, &subject, &html, &attachments).await {
            warn!(
                "Failed to send update email for booking {}: {}",
                booking.num_reserva, e
            );
        }
    }

    /// Cancellation email. No attachment, the old ticket is void.
    #[instrument(skip(self, booking), fields(num_reserva = booking.num_reserva))]
    pub async fn booking_cancelled(&self, booking: &Booking) {
        let Some(email) = self.recipient(booking) else {
            return;
        };

        let subject = format!(
            "Reserva Cancelada #{} - ALC Valet Parking",
            booking.num_reserva
        );
        let html = templates::booking_cancellation(booking);

        if let Err(e) = self.mailer.send(email, &subject, &html, &[]).await {
            warn!(
                "Failed to send cancellation email for booking {}: {}",
                booking.num_reserva, e
            );
        }
    }

    /// Recipient address, or `None` when the email should be skipped.
    fn recipient<'a>(&self, booking: &'a Booking) -> Option<&'a str> {
        if !self.mailer.enabled() {
            debug!(
                "Mail delivery disabled, skipping notification for booking {}",
                booking.num_reserva
            );
            return None;
        }

        let email = booking.email.as_deref();
        if email.is_none() {
            debug!(
                "Booking {} has no email, skipping notification",
                booking.num_reserva
            );
        }
        email
    }

    /// Render the ticket PDF; on failure the email still goes out, just
    /// without the attachment.
    async fn ticket_attachment(&self, booking: &Booking) -> Vec<EmailAttachment> {
        let receipt = BookingReceipt::from_booking(booking);

        match self.render.render(&receipt).await {
            Ok(bytes) => vec![EmailAttachment::new(
                format!("Ticket_{}.pdf", booking.num_reserva),
                bytes,
            )],
            Err(e) => {
                warn!(
                    "Failed to render ticket for booking {}: {}",
                    booking.num_reserva, e
                );
                Vec::new()
            }
        }
    }
}
