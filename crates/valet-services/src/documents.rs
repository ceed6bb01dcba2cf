//! Data payloads for printable documents.
//!
//! The render service owns page layout and typography; this module owns the
//! document content. Fallback texts for missing data are applied here so
//! every consumer of a payload sees the same wording.

use chrono::{Datelike, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use valet_core::models::{Booking, Invoice};

/// Letterhead printed at the top of every receipt.
pub const COMPANY_LINES: [&str; 8] = [
    "ALC VALET PARKING",
    "E72706781",
    "Ctra. Aeropuerto-Torellano s/n CV-852",
    "03320 Torrellano (Alicante)",
    "Oficina +34 601 356 356",
    "Móvil +34 601 356 356",
    "info@alcvaletparking.com",
    "www.alcvaletparking.com",
];

const DIAS: [&str; 7] = [
    "lunes",
    "martes",
    "miércoles",
    "jueves",
    "viernes",
    "sábado",
    "domingo",
];

const MESES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Long Spanish date, e.g. "martes, 10 de junio de 2025".
fn fecha_larga(fecha: NaiveDate) -> String {
    let dia = DIAS[fecha.weekday().num_days_from_monday() as usize];
    let mes = MESES[fecha.month0() as usize];
    format!("{}, {} de {} de {}", dia, fecha.day(), mes, fecha.year())
}

/// Date plus time on one line, "Sin fecha" when the date is missing.
fn fecha_hora_display(fecha: Option<NaiveDate>, hora: Option<NaiveTime>) -> String {
    let fecha = fecha
        .map(|f| f.to_string())
        .unwrap_or_else(|| "Sin fecha".to_string());
    let hora = hora
        .map(|h| h.format("%H:%M").to_string())
        .unwrap_or_default();
    format!("{} {}", fecha, hora).trim_end().to_string()
}

/// Parking receipt, one per booking.
///
/// Field names are the wire contract with the render service.
#[derive(Debug, Clone, Serialize)]
pub struct BookingReceipt {
    pub titulo: &'static str,
    /// Emission date in long Spanish form
    pub fecha_emision: String,
    pub empresa: [&'static str; 8],
    pub num_reserva: i64,
    pub nombre_completo: String,
    pub cif: String,
    pub nombre_conductor: String,
    pub direccion: String,
    pub telefono: String,
    pub coche: String,
    pub matricula: String,
    pub tipo_plaza: String,
    pub entrada: String,
    pub salida: String,
    pub terminal_entrada: String,
    pub terminal_salida: String,
    pub num_vuelo: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub precio: Decimal,
    pub comentarios: String,
    pub firma_cliente: &'static str,
    pub firma_empresa: &'static str,
}

impl BookingReceipt {
    /// Build the receipt payload for a booking.
    pub fn from_booking(booking: &Booking) -> Self {
        Self {
            titulo: "Recibo de Aparcamiento",
            fecha_emision: fecha_larga(Utc::now().date_naive()),
            empresa: COMPANY_LINES,
            num_reserva: booking.num_reserva,
            nombre_completo: booking.nombre_completo.clone().unwrap_or_default(),
            cif: booking.cif.clone().unwrap_or_else(|| "---".to_string()),
            nombre_conductor: booking
                .nombre_conductor
                .clone()
                .unwrap_or_else(|| "---".to_string()),
            direccion: booking.direccion.clone().unwrap_or_else(|| "---".to_string()),
            telefono: booking.telefono.clone().unwrap_or_default(),
            coche: booking.coche.clone(),
            matricula: booking.matricula.clone(),
            tipo_plaza: booking.tipo_plaza.to_string(),
            entrada: fecha_hora_display(booking.fecha_entrada, booking.hora_entrada),
            salida: fecha_hora_display(booking.fecha_salida, booking.hora_salida),
            terminal_entrada: booking.terminal_entrada.clone().unwrap_or_default(),
            terminal_salida: booking.terminal_salida.clone().unwrap_or_default(),
            num_vuelo: booking.num_vuelo.clone().unwrap_or_default(),
            precio: booking.precio.normalize(),
            comentarios: booking
                .comentarios
                .clone()
                .unwrap_or_else(|| "Sin observaciones".to_string()),
            firma_cliente: "Conforme Cliente",
            firma_empresa: "Conforme ALC",
        }
    }
}

/// Invoice document, a receipt plus the billing data.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceDocument {
    #[serde(flatten)]
    pub recibo: BookingReceipt,
    pub num_factura: i64,
    pub metodo_pago: String,
}

impl InvoiceDocument {
    /// Build the invoice payload for a booking and its invoice.
    pub fn new(booking: &Booking, invoice: &Invoice) -> Self {
        let mut recibo = BookingReceipt::from_booking(booking);
        recibo.titulo = "Factura";

        Self {
            recibo,
            num_factura: invoice.num_factura,
            metodo_pago: invoice.metodo_pago.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use valet_core::models::SpaceType;

    fn sample_booking() -> Booking {
        let mut booking = Booking::new(
            SpaceType::Cubierta,
            "Seat León Rojo".to_string(),
            "1234BCD".to_string(),
            dec!(45.00),
        );
        booking.num_reserva = 120;
        booking.fecha_entrada = NaiveDate::from_ymd_opt(2025, 6, 10);
        booking.hora_entrada = NaiveTime::from_hms_opt(12, 30, 0);
        booking.fecha_salida = NaiveDate::from_ymd_opt(2025, 6, 15);
        booking.hora_salida = NaiveTime::from_hms_opt(9, 0, 0);
        booking.nombre_completo = Some("María García".to_string());
        booking.telefono = Some("+34 600 000 000".to_string());
        booking
    }

    #[test]
    fn test_fecha_larga_formats_spanish_dates() {
        let fecha = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        assert_eq!(fecha_larga(fecha), "martes, 10 de junio de 2025");

        let fecha = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(fecha_larga(fecha), "lunes, 1 de enero de 2024");
    }

    #[test]
    fn test_fecha_hora_display_joins_and_falls_back() {
        assert_eq!(
            fecha_hora_display(
                NaiveDate::from_ymd_opt(2025, 6, 10),
                NaiveTime::from_hms_opt(12, 30, 0)
            ),
            "2025-06-10 12:30"
        );
        assert_eq!(
            fecha_hora_display(NaiveDate::from_ymd_opt(2025, 6, 10), None),
            "2025-06-10"
        );
        assert_eq!(fecha_hora_display(None, None), "Sin fecha");
    }

    #[test]
    fn test_receipt_applies_fallback_texts() {
        let receipt = BookingReceipt::from_booking(&sample_booking());

        assert_eq!(receipt.titulo, "Recibo de Aparcamiento");
        assert_eq!(receipt.cif, "---");
        assert_eq!(receipt.nombre_conductor, "---");
        assert_eq!(receipt.direccion, "---");
        assert_eq!(receipt.comentarios, "Sin observaciones");
        assert_eq!(receipt.num_vuelo, "");
        assert_eq!(receipt.entrada, "2025-06-10 12:30");
        assert_eq!(receipt.tipo_plaza, "Plaza Cubierta");
        assert_eq!(receipt.empresa[0], "ALC VALET PARKING");
    }

    #[test]
    fn test_receipt_price_serializes_as_number() {
        let receipt = BookingReceipt::from_booking(&sample_booking());
        let value = serde_json::to_value(&receipt).unwrap();

        assert_eq!(value["precio"], serde_json::json!(45.0));
        assert_eq!(value["num_reserva"], serde_json::json!(120));
    }

    #[test]
    fn test_invoice_document_flattens_receipt() {
        let booking = sample_booking();
        let invoice = Invoice::new(booking.id, 7, "Tarjeta".to_string());
        let document = InvoiceDocument::new(&booking, &invoice);
        let value = serde_json::to_value(&document).unwrap();

        assert_eq!(value["titulo"], serde_json::json!("Factura"));
        assert_eq!(value["num_factura"], serde_json::json!(7));
        assert_eq!(value["metodo_pago"], serde_json::json!("Tarjeta"));
        assert_eq!(value["matricula"], serde_json::json!("1234BCD"));
    }
}
