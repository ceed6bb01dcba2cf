//! Booking-related DTOs
//!
//! Request fields mirror the public wire contract: camelCase names, every
//! value a string. Requiredness and formats are validator rules so each
//! failure surfaces as a `{campo, mensaje}` pair; parsing into domain types
//! happens after validation.

use super::common::PaginationParams;
use super::validators::{
    validate_date_format, validate_time_format, validate_tipo_plaza, validate_uuid,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;
use valet_core::models::{Booking, BookingStatus, SpaceType};
use valet_core::traits::PaginationMeta;

/// Booking creation request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    /// Entry date, YYYY-MM-DD
    #[validate(custom(function = validate_date_format))]
    pub fecha_entrada: Option<String>,

    /// Entry time, HH:MM
    #[validate(custom(function = validate_time_format))]
    pub hora_entrada: Option<String>,

    /// Exit date, YYYY-MM-DD
    #[validate(custom(function = validate_date_format))]
    pub fecha_salida: Option<String>,

    /// Exit time, HH:MM
    #[validate(custom(function = validate_time_format))]
    pub hora_salida: Option<String>,

    /// Space type label, one of the two tariff tables
    #[validate(
        required(message = "Debes elegir entre 'Plaza Aire Libre' o 'Plaza Cubierta'"),
        custom(function = validate_tipo_plaza)
    )]
    pub tipo_plaza: Option<String>,

    /// Vehicle make, model and color
    #[validate(
        required(message = "El modelo de coche es obligatorio"),
        length(min = 1, message = "El modelo de coche es obligatorio")
    )]
    pub coche: Option<String>,

    /// License plate, stored uppercased
    #[validate(
        required(message = "La matrícula es obligatoria"),
        length(min = 1, message = "La matrícula es obligatoria")
    )]
    pub matricula: Option<String>,

    /// Return flight number
    pub num_vuelo: Option<String>,

    /// Airport terminal on arrival
    pub terminal_entrada: Option<String>,

    /// Airport terminal on return
    pub terminal_salida: Option<String>,

    /// Free-form remarks
    #[validate(length(max = 500, message = "El comentario no puede superar los 500 caracteres"))]
    pub comentarios: Option<String>,

    /// Registered customer ID
    #[validate(custom(function = validate_uuid))]
    pub cliente_id: Option<String>,

    /// Contact name
    #[validate(length(min = 1, message = "El nombre es obligatorio"))]
    pub nombre_completo: Option<String>,

    /// Contact phone
    #[validate(length(min = 1, message = "El teléfono es obligatorio"))]
    pub telefono: Option<String>,

    /// Contact email, receives the confirmation
    #[validate(email(message = "El formato del email no es correcto"))]
    pub email: Option<String>,

    /// How the customer found us
    pub nos_conociste: Option<String>,

    /// Tax ID for invoicing
    #[validate(length(min = 1, message = "El CIF no puede estar vacío"))]
    pub cif: Option<String>,

    /// Driver name when it differs from the contact
    #[validate(length(min = 1, message = "El nombre del conductor no puede estar vacío"))]
    pub nombre_conductor: Option<String>,

    /// Billing address
    #[validate(length(min = 1, message = "La dirección no puede estar vacía"))]
    pub direccion: Option<String>,
}

/// Parse an already validated YYYY-MM-DD value; silently `None` otherwise
pub(crate) fn parse_fecha(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").ok())
}

/// Parse an already validated HH:MM value; silently `None` otherwise
pub(crate) fn parse_hora(value: Option<&str>) -> Option<NaiveTime> {
    value.and_then(|v| NaiveTime::parse_from_str(v, "%H:%M").ok())
}

impl CreateBookingRequest {
    /// Build the domain model with the server-computed price.
    ///
    /// Must only be called after `validate()`: parse failures fall back
    /// silently here.
    pub fn into_booking(self, precio: Decimal) -> Booking {
        let now = Utc::now();

        Booking {
            id: Uuid::new_v4(),
            num_reserva: 0,
            fecha_entrada: parse_fecha(self.fecha_entrada.as_deref()),
            hora_entrada: parse_hora(self.hora_entrada.as_deref()),
            fecha_salida: parse_fecha(self.fecha_salida.as_deref()),
            hora_salida: parse_hora(self.hora_salida.as_deref()),
            tipo_plaza: self
                .tipo_plaza
                .as_deref()
                .and_then(SpaceType::parse)
                .unwrap_or(SpaceType::AireLibre),
            coche: self.coche.unwrap_or_default(),
            matricula: self
                .matricula
                .map(|m| m.to_uppercase())
                .unwrap_or_default(),
            num_vuelo: self.num_vuelo,
            terminal_entrada: self.terminal_entrada,
            terminal_salida: self.terminal_salida,
            comentarios: self.comentarios,
            cliente_id: self.cliente_id.as_deref().and_then(|s| Uuid::parse_str(s).ok()),
            nombre_completo: self.nombre_completo,
            telefono: self.telefono,
            email: self.email,
            nos_conociste: self.nos_conociste,
            cif: self.cif,
            nombre_conductor: self.nombre_conductor,
            direccion: self.direccion,
            precio,
            estado: BookingStatus::Confirmed,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Booking update request
///
/// Same shape as creation but nothing is required; absent fields keep
/// their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    /// Entry date, YYYY-MM-DD
    #[validate(custom(function = validate_date_format))]
    pub fecha_entrada: Option<String>,

    /// Entry time, HH:MM
    #[validate(custom(function = validate_time_format))]
    pub hora_entrada: Option<String>,

    /// Exit date, YYYY-MM-DD
    #[validate(custom(function = validate_date_format))]
    pub fecha_salida: Option<String>,

    /// Exit time, HH:MM
    #[validate(custom(function = validate_time_format))]
    pub hora_salida: Option<String>,

    /// Space type label
    #[validate(custom(function = validate_tipo_plaza))]
    pub tipo_plaza: Option<String>,

    /// Vehicle make, model and color
    #[validate(length(min = 1, message = "El modelo de coche es obligatorio"))]
    pub coche: Option<String>,

    /// License plate, stored uppercased
    #[validate(length(min = 1, message = "La matrícula es obligatoria"))]
    pub matricula: Option<String>,

    /// Return flight number
    pub num_vuelo: Option<String>,

    /// Airport terminal on arrival
    pub terminal_entrada: Option<String>,

    /// Airport terminal on return
    pub terminal_salida: Option<String>,

    /// Free-form remarks
    #[validate(length(max = 500, message = "El comentario no puede superar los 500 caracteres"))]
    pub comentarios: Option<String>,

    /// Registered customer ID
    #[validate(custom(function = validate_uuid))]
    pub cliente_id: Option<String>,

    /// Contact name
    #[validate(length(min = 1, message = "El nombre es obligatorio"))]
    pub nombre_completo: Option<String>,

    /// Contact phone
    #[validate(length(min = 1, message = "El teléfono es obligatorio"))]
    pub telefono: Option<String>,

    /// Contact email
    #[validate(email(message = "El formato del email no es correcto"))]
    pub email: Option<String>,

    /// How the customer found us
    pub nos_conociste: Option<String>,

    /// Tax ID for invoicing
    #[validate(length(min = 1, message = "El CIF no puede estar vacío"))]
    pub cif: Option<String>,

    /// Driver name
    #[validate(length(min = 1, message = "El nombre del conductor no puede estar vacío"))]
    pub nombre_conductor: Option<String>,

    /// Billing address
    #[validate(length(min = 1, message = "La dirección no puede estar vacía"))]
    pub direccion: Option<String>,
}

impl UpdateBookingRequest {
    /// Overlay the provided fields on an existing booking.
    ///
    /// The caller recomputes the price afterwards; dates or space type may
    /// have changed.
    pub fn apply_to(&self, booking: &mut Booking) {
        if let Some(v) = self.fecha_entrada.as_deref() {
            booking.fecha_entrada = parse_fecha(Some(v));
        }
        if let Some(v) = self.hora_entrada.as_deref() {
            booking.hora_entrada = parse_hora(Some(v));
        }
        if let Some(v) = self.fecha_salida.as_deref() {
            booking.fecha_salida = parse_fecha(Some(v));
        }
        if let Some(v) = self.hora_salida.as_deref() {
            booking.hora_salida = parse_hora(Some(v));
        }
        if let Some(t) = self.tipo_plaza.as_deref().and_then(SpaceType::parse) {
            booking.tipo_plaza = t;
        }
        if let Some(v) = &self.coche {
            booking.coche = v.clone();
        }
        if let Some(v) = &self.matricula {
            booking.matricula = v.to_uppercase();
        }
        if let Some(v) = &self.num_vuelo {
            booking.num_vuelo = Some(v.clone());
        }
        if let Some(v) = &self.terminal_entrada {
            booking.terminal_entrada = Some(v.clone());
        }
        if let Some(v) = &self.terminal_salida {
            booking.terminal_salida = Some(v.clone());
        }
        if let Some(v) = &self.comentarios {
            booking.comentarios = Some(v.clone());
        }
        if let Some(id) = self.cliente_id.as_deref().and_then(|s| Uuid::parse_str(s).ok()) {
            booking.cliente_id = Some(id);
        }
        if let Some(v) = &self.nombre_completo {
            booking.nombre_completo = Some(v.clone());
        }
        if let Some(v) = &self.telefono {
            booking.telefono = Some(v.clone());
        }
        if let Some(v) = &self.email {
            booking.email = Some(v.clone());
        }
        if let Some(v) = &self.nos_conociste {
            booking.nos_conociste = Some(v.clone());
        }
        if let Some(v) = &self.cif {
            booking.cif = Some(v.clone());
        }
        if let Some(v) = &self.nombre_conductor {
            booking.nombre_conductor = Some(v.clone());
        }
        if let Some(v) = &self.direccion {
            booking.direccion = Some(v.clone());
        }
    }
}

/// Booking list filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingFilterParams {
    /// Pagination parameters
    #[serde(flatten)]
    pub pagination: PaginationParams,

    /// Filter by status, "confirmada" or "cancelada"
    pub estado: Option<String>,

    /// Filter by license plate, partial match
    pub matricula: Option<String>,
}

/// Booking as exposed on the wire
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    /// Booking ID
    pub id: Uuid,

    /// Human-facing sequential number
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

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            num_reserva: booking.num_reserva,
            fecha_entrada: booking.fecha_entrada,
            hora_entrada: booking.hora_entrada.map(|h| h.format("%H:%M").to_string()),
            fecha_salida: booking.fecha_salida,
            hora_salida: booking.hora_salida.map(|h| h.format("%H:%M").to_string()),
            tipo_plaza: booking.tipo_plaza,
            coche: booking.coche,
            matricula: booking.matricula,
            num_vuelo: booking.num_vuelo,
            terminal_entrada: booking.terminal_entrada,
            terminal_salida: booking.terminal_salida,
            comentarios: booking.comentarios,
            cliente_id: booking.cliente_id,
            nombre_completo: booking.nombre_completo,
            telefono: booking.telefono,
            email: booking.email,
            nos_conociste: booking.nos_conociste,
            cif: booking.cif,
            nombre_conductor: booking.nombre_conductor,
            direccion: booking.direccion,
            precio: booking.precio,
            estado: booking.estado,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

/// Paginated booking list envelope
#[derive(Debug, Clone, Serialize)]
pub struct ListBookingsResponse {
    /// Always `true` here
    pub success: bool,
    /// Bookings for the requested page, newest first
    pub data: Vec<BookingResponse>,
    /// Pagination metadata
    pub pagination: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn valid_request() -> CreateBookingRequest {
        CreateBookingRequest {
            fecha_entrada: Some("2025-06-10".to_string()),
            hora_entrada: Some("12:30".to_string()),
            fecha_salida: Some("2025-06-15".to_string()),
            hora_salida: Some("09:00".to_string()),
            tipo_plaza: Some("Plaza Cubierta".to_string()),
            coche: Some("Seat León Rojo".to_string()),
            matricula: Some("1234bcd".to_string()),
            email: Some("maria@example.com".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_request_passes_validation() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_missing_required_fields_fail_validation() {
        let request = CreateBookingRequest::default();
        let errors = request.validate().unwrap_err();

        let fields: Vec<&str> = errors.field_errors().keys().copied().collect();
        assert!(fields.contains(&"tipo_plaza"));
        assert!(fields.contains(&"coche"));
        assert!(fields.contains(&"matricula"));
    }

    #[test]
    fn test_bad_date_format_fails_validation() {
        let mut request = valid_request();
        request.fecha_entrada = Some("10-06-2025".to_string());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_unknown_space_type_fails_validation() {
        let mut request = valid_request();
        request.tipo_plaza = Some("Plaza VIP".to_string());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_into_booking_parses_and_uppercases() {
        let booking = valid_request().into_booking(dec!(120));

        assert_eq!(booking.fecha_entrada, NaiveDate::from_ymd_opt(2025, 6, 10));
        assert_eq!(booking.hora_entrada, NaiveTime::from_hms_opt(12, 30, 0));
        assert_eq!(booking.tipo_plaza, SpaceType::Cubierta);
        assert_eq!(booking.matricula, "1234BCD");
        assert_eq!(booking.precio, dec!(120));
        assert_eq!(booking.estado, BookingStatus::Confirmed);
    }

    #[test]
    fn test_apply_to_keeps_absent_fields() {
        let mut booking = valid_request().into_booking(dec!(120));
        let original_coche = booking.coche.clone();

        let update = UpdateBookingRequest {
            fecha_salida: Some("2025-06-20".to_string()),
            matricula: Some("9876xyz".to_string()),
            ..Default::default()
        };
        update.apply_to(&mut booking);

        assert_eq!(booking.fecha_salida, NaiveDate::from_ymd_opt(2025, 6, 20));
        assert_eq!(booking.matricula, "9876XYZ");
        assert_eq!(booking.coche, original_coche);
        assert_eq!(booking.fecha_entrada, NaiveDate::from_ymd_opt(2025, 6, 10));
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let booking = valid_request().into_booking(dec!(120));
        let response = BookingResponse::from(booking);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["numReserva"], serde_json::json!(0));
        assert_eq!(value["fechaEntrada"], serde_json::json!("2025-06-10"));
        assert_eq!(value["horaEntrada"], serde_json::json!("12:30"));
        assert_eq!(value["tipoPlaza"], serde_json::json!("Plaza Cubierta"));
        assert_eq!(value["precio"], serde_json::json!(120.0));
        assert_eq!(value["estado"], serde_json::json!("confirmada"));
    }

    #[test]
    fn test_request_deserializes_camel_case() {
        let request: CreateBookingRequest = serde_json::from_str(
            r#"{
                "fechaEntrada": "2025-06-10",
                "tipoPlaza": "Plaza Aire Libre",
                "coche": "Ford Focus",
                "matricula": "0000AAA",
                "terminalEntrada": "T1"
            }"#,
        )
        .unwrap();

        assert_eq!(request.fecha_entrada.as_deref(), Some("2025-06-10"));
        assert_eq!(request.tipo_plaza.as_deref(), Some("Plaza Aire Libre"));
        assert_eq!(request.terminal_entrada.as_deref(), Some("T1"));
        assert!(request.validate().is_ok());
    }
}
