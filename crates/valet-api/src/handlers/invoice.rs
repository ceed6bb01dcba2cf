//! Invoice API handlers
//!
//! Invoices are issued once per booking with a number taken from a global
//! sequence, then the PDF can be regenerated at will.

use crate::dto::{GenerateInvoiceRequest, InvoiceCheckResponse, InvoicePrintData};
use actix_web::{
    web::{self, Data, Json, Path},
    HttpResponse, Result,
};
use tracing::{debug, info, instrument};
use uuid::Uuid;
use valet_core::traits::{BookingRepository, InvoiceRepository};
use valet_core::AppError;
use valet_db::repositories::{PgBookingRepository, PgInvoiceRepository};
use valet_db::PgPool;
use valet_services::{InvoiceDocument, RenderClient};

/// Check whether a booking already has an invoice
///
/// Replies 200 either way; `exists: false` tells the frontend to ask for a
/// payment method before generating.
///
/// # Errors
///
/// Returns 404 if the invoice exists but its booking is gone, or 500 on
/// database failure.
#[instrument(skip(db))]
pub async fn check_invoice(
    path: Path<Uuid>,
    db: Data<PgPool>,
) -> Result<Json<InvoiceCheckResponse>> {
    let reserva_id = path.into_inner();
    debug!("Checking invoice for booking {}", reserva_id);

    let invoice_repo = PgInvoiceRepository::new(db.get_ref().clone());
    let Some(invoice) = invoice_repo.find_by_booking(reserva_id).await? else {
        return Ok(Json(InvoiceCheckResponse::missing()));
    };

    let booking_repo = PgBookingRepository::new(db.get_ref().clone());
    let booking = booking_repo
        .find_by_id(reserva_id)
        .await?
        .ok_or_else(|| AppError::BookingNotFound(reserva_id.to_string()))?;

    Ok(Json(InvoiceCheckResponse::found(InvoicePrintData::merge(
        &booking, &invoice,
    ))))
}

/// Generate (or regenerate) the invoice PDF for a booking
///
/// Issues the invoice first if none exists, which requires a payment
/// method. The response body is the PDF itself.
///
/// # Errors
///
/// Returns 400 when the booking ID is missing or no payment method was
/// given for a first issue, 404 when the booking does not exist, 502 when
/// the render service fails.
#[instrument(skip(payload, db, render))]
pub async fn generate_invoice(
    payload: Json<GenerateInvoiceRequest>,
    db: Data<PgPool>,
    render: Data<RenderClient>,
) -> Result<HttpResponse> {
    let request = payload.into_inner();
    let reserva_id = request
        .reserva_id
        .as_deref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::InvalidInput("Falta ID de reserva".to_string()))?;

    let invoice_repo = PgInvoiceRepository::new(db.get_ref().clone());
    let invoice = match invoice_repo.find_by_booking(reserva_id).await? {
        Some(existing) => existing,
        None => {
            let metodo_pago = request
                .metodo_pago
                .as_deref()
                .filter(|m| !m.is_empty())
                .ok_or(AppError::MissingPaymentMethod)?;

            let issued = invoice_repo
                .create_with_sequence(reserva_id, metodo_pago)
                .await?;
            info!(
                "Issued invoice {} for booking {}",
                issued.num_factura, reserva_id
            );
            issued
        }
    };

    let booking_repo = PgBookingRepository::new(db.get_ref().clone());
    let booking = booking_repo
        .find_by_id(reserva_id)
        .await?
        .ok_or_else(|| AppError::BookingNotFound(reserva_id.to_string()))?;

    let document = InvoiceDocument::new(&booking, &invoice);
    let pdf = render.render(&document).await?;

    debug!(
        "Rendered invoice {} PDF, {} bytes",
        invoice.num_factura,
        pdf.len()
    );

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"Factura_{}.pdf\"", invoice.num_factura),
        ))
        .body(pdf))
}

/// Register invoice routes under `/invoices`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/invoices")
            .route("/check/{reserva_id}", web::get().to(check_invoice))
            .route("/generate", web::post().to(generate_invoice)),
    );
}
