//! Invoice-related DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use valet_core::models::{Booking, BookingStatus, Invoice, SpaceType};

/// Invoice generation request
///
/// The payment method is only needed the first time; regenerating the PDF
/// of an existing invoice ignores it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateInvoiceRequest {
    /// Booking ID the invoice belongs to
    pub reserva_id: Option<String>,

    /// Payment method, e.g. "Tarjeta" or "Efectivo"
    pub metodo_pago: Option<String>,
}

/// Response for the invoice existence check
///
/// `exists: false` still answers 200: a missing invoice is an expected
/// state the frontend uses to prompt for the payment method.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceCheckResponse {
    /// `false` when no invoice was issued yet
    pub success: bool,
    /// Whether an invoice exists for the booking
    pub exists: bool,
    /// Combined booking and invoice data, when the invoice exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<InvoicePrintData>,
}

impl InvoiceCheckResponse {
    /// No invoice issued for this booking yet.
    pub fn missing() -> Self {
        Self {
            success: false,
            exists: false,
            data: None,
        }
    }

    /// Invoice found; ship the data the print page needs.
    pub fn found(data: InvoicePrintData) -> Self {
        Self {
            success: true,
            exists: true,
            data: Some(data),
        }
    }
}

/// Booking and invoice rows merged for the print page
///
/// Field names stay snake_case: this endpoint predates the camelCase wire
/// convention and the print page reads raw column names. `id` and
/// `created_at` are the invoice's, the rest the booking's.
#[derive(Debug, Clone, Serialize)]
pub struct InvoicePrintData {
    /// Invoice ID
    pub id: Uuid,
    /// Booking ID
    pub reserva_id: Uuid,
    /// Sequential invoice number
    pub num_factura: i64,
    /// Payment method recorded on the invoice
    pub metodo_pago: String,
    /// Invoice emission timestamp
    pub created_at: DateTime<Utc>,
    /// Sequential booking number
    pub num_reserva: i64,
    /// Entry date
    pub fecha_entrada: Option<NaiveDate>,
    /// Entry time, HH:MM
    pub hora_entrada: Option<String>,
    /// Exit date
    pub fecha_salida: Option<NaiveDate>,
    /// Exit time, HH:MM
    pub hora_salida: Option<String>,
    /// Space type label
    pub tipo_plaza: SpaceType,
    /// Vehicle make, model and color
    pub coche: String,
    /// License plate
    pub matricula: String,
    /// Return flight number
    pub num_vuelo: Option<String>,
    /// Airport terminal on arrival
    pub terminal_entrada: Option<String>,
    /// Airport terminal on return
    pub terminal_salida: Option<String>,
    /// Free-form remarks
    pub comentarios: Option<String>,
    /// Registered customer ID
    pub cliente_id: Option<Uuid>,
    /// Contact name
    pub nombre_completo: Option<String>,
    /// Contact phone
    pub telefono: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// How the customer found us
    pub nos_conociste: Option<String>,
    /// Tax ID
    pub cif: Option<String>,
    /// Driver name
    pub nombre_conductor: Option<String>,
    /// Billing address
    pub direccion: Option<String>,
    /// Total price in euros
    #[serde(with = "rust_decimal::serde::float")]
    pub precio: Decimal,
    /// Booking status
    pub estado: BookingStatus,
    /// Booking last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl InvoicePrintData {
    /// Merge a booking row and its invoice row.
    pub fn merge(booking: &Booking, invoice: &Invoice) -> Self {
        Self {
            id: invoice.id,
            reserva_id: invoice.reserva_id,
            num_factura: invoice.num_factura,
            metodo_pago: invoice.metodo_pago.clone(),
            created_at: invoice.created_at,
            num_reserva: booking.num_reserva,
            fecha_entrada: booking.fecha_entrada,
            hora_entrada: booking.hora_entrada.map(|h| h.format("%H:%M").to_string()),
            fecha_salida: booking.fecha_salida,
            hora_salida: booking.hora_salida.map(|h| h.format("%H:%M").to_string()),
            tipo_plaza: booking.tipo_plaza,
            coche: booking.coche.clone(),
            matricula: booking.matricula.clone(),
            num_vuelo: booking.num_vuelo.clone(),
            terminal_entrada: booking.terminal_entrada.clone(),
            terminal_salida: booking.terminal_salida.clone(),
            comentarios: booking.comentarios.clone(),
            cliente_id: booking.cliente_id,
            nombre_completo: booking.nombre_completo.clone(),
            telefono: booking.telefono.clone(),
            email: booking.email.clone(),
            nos_conociste: booking.nos_conociste.clone(),
            cif: booking.cif.clone(),
            nombre_conductor: booking.nombre_conductor.clone(),
            direccion: booking.direccion.clone(),
            precio: booking.precio,
            estado: booking.estado,
            updated_at: booking.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_generate_request_deserializes_camel_case() {
        let request: GenerateInvoiceRequest = serde_json::from_str(
            r#"{"reservaId": "550e8400-e29b-41d4-a716-446655440000", "metodoPago": "Tarjeta"}"#,
        )
        .unwrap();

        assert_eq!(
            request.reserva_id.as_deref(),
            Some("550e8400-e29b-41d4-a716-446655440000")
        );
        assert_eq!(request.metodo_pago.as_deref(), Some("Tarjeta"));
    }

    #[test]
    fn test_check_response_when_missing() {
        let value = serde_json::to_value(InvoiceCheckResponse::missing()).unwrap();

        assert_eq!(value["success"], serde_json::json!(false));
        assert_eq!(value["exists"], serde_json::json!(false));
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_print_data_takes_invoice_identity() {
        let booking = Booking::new(
            SpaceType::AireLibre,
            "Ford Focus".to_string(),
            "0000AAA".to_string(),
            dec!(25),
        );
        let invoice = Invoice::new(booking.id, 31, "Efectivo".to_string());
        let data = InvoicePrintData::merge(&booking, &invoice);

        assert_eq!(data.id, invoice.id);
        assert_ne!(data.id, booking.id);
        assert_eq!(data.reserva_id, booking.id);
        assert_eq!(data.num_factura, 31);

        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["metodo_pago"], serde_json::json!("Efectivo"));
        assert_eq!(value["precio"], serde_json::json!(25.0));
        assert_eq!(value["estado"], serde_json::json!("confirmada"));
    }
}
