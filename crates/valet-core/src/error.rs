//! Unified error handling for the valet booking backend
//!
//! This module provides a comprehensive error type that covers all possible
//! failure scenarios in the application, with automatic HTTP response mapping.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// Field-level validation failure as exposed on the wire
///
/// The frontend renders these verbatim, so `campo` carries the wire-format
/// (camelCase) field name and `mensaje` the Spanish message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub campo: String,
    pub mensaje: String,
}

/// Main application error type
///
/// All errors in the application should be converted to this type.
/// It implements `ResponseError` for automatic HTTP response generation.
#[derive(Error, Debug)]
pub enum AppError {
    // ==================== Database Errors ====================
    #[error("Database error: {0}")]
    Database(String),

    #[error("Database pool error: {0}")]
    Pool(String),

    #[error("Transaction failed: {0}")]
    Transaction(String),

    #[error("Error secuencia")]
    Sequence(String),

    // ==================== Pricing Errors ====================
    #[error("Tipo de plaza desconocido: {0}")]
    UnknownSpaceType(String),

    // ==================== Business Logic Errors ====================
    #[error("Reserva no encontrada")]
    BookingNotFound(String),

    #[error("Factura no encontrada")]
    InvoiceNotFound(String),

    #[error("Falta método de pago")]
    MissingPaymentMethod,

    // ==================== Validation Errors ====================
    #[error("Datos de reserva inválidos")]
    Validation(Vec<FieldError>),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    // ==================== Resource Errors ====================
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    // ==================== Internal Errors ====================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // ==================== External Service Errors ====================
    #[error("Email delivery failed: {0}")]
    EmailDelivery(String),

    #[error("Error generando PDF")]
    RenderFailed(String),
}

impl AppError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            AppError::Validation(_)
            | AppError::InvalidInput(_)
            | AppError::MissingField(_)
            | AppError::UnknownSpaceType(_)
            | AppError::MissingPaymentMethod => StatusCode::BAD_REQUEST,

            // 404 Not Found
            AppError::BookingNotFound(_) | AppError::InvoiceNotFound(_) | AppError::NotFound(_) => {
                StatusCode::NOT_FOUND
            }

            // 409 Conflict
            AppError::Conflict(_) | AppError::AlreadyExists(_) => StatusCode::CONFLICT,

            // 502 Bad Gateway
            AppError::EmailDelivery(_) | AppError::RenderFailed(_) => StatusCode::BAD_GATEWAY,

            // 500 Internal Server Error
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "database_error",
            AppError::Pool(_) => "pool_error",
            AppError::Transaction(_) => "transaction_error",
            AppError::Sequence(_) => "sequence_error",
            AppError::UnknownSpaceType(_) => "unknown_space_type",
            AppError::BookingNotFound(_) => "booking_not_found",
            AppError::InvoiceNotFound(_) => "invoice_not_found",
            AppError::MissingPaymentMethod => "missing_payment_method",
            AppError::Validation(_) => "validation_error",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::MissingField(_) => "missing_field",
            AppError::NotFound(_) => "not_found",
            AppError::Conflict(_) => "conflict",
            AppError::AlreadyExists(_) => "already_exists",
            AppError::Internal(_) => "internal_error",
            AppError::Config(_) => "config_error",
            AppError::Serialization(_) => "serialization_error",
            AppError::EmailDelivery(_) => "email_delivery_error",
            AppError::RenderFailed(_) => "render_error",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        AppError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Schema failures carry the per-field error array the frontend
        // expects; everything else uses the generic envelope.
        let body = match self {
            AppError::Validation(errors) => json!({
                "success": false,
                "message": self.to_string(),
                "errors": errors,
            }),
            _ => json!({
                "success": false,
                "error": self.error_code(),
                "message": self.to_string(),
            }),
        };

        HttpResponse::build(status).json(body)
    }
}

/// Maps a struct field identifier to its wire (camelCase) name
fn wire_field_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

// ==================== From implementations ====================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut errors: Vec<FieldError> = err
            .field_errors()
            .iter()
            .flat_map(|(field, failures)| {
                let campo = wire_field_name(field);
                failures.iter().map(move |failure| FieldError {
                    campo: campo.clone(),
                    mensaje: failure
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| failure.code.to_string()),
                })
            })
            .collect();

        // HashMap iteration order is not stable
        errors.sort_by(|a, b| a.campo.cmp(&b.campo));
        AppError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::UnknownSpaceType("Plaza VIP".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::BookingNotFound("123".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::MissingPaymentMethod.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::RenderFailed("timeout".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Validation(vec![]).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::UnknownSpaceType("x".to_string()).error_code(),
            "unknown_space_type"
        );
        assert_eq!(AppError::MissingPaymentMethod.error_code(), "missing_payment_method");
        assert_eq!(AppError::Validation(vec![]).error_code(), "validation_error");
    }

    #[test]
    fn test_error_messages_match_wire_contract() {
        assert_eq!(
            AppError::UnknownSpaceType("Plaza VIP".to_string()).to_string(),
            "Tipo de plaza desconocido: Plaza VIP"
        );
        assert_eq!(AppError::Validation(vec![]).to_string(), "Datos de reserva inválidos");
        assert_eq!(AppError::MissingPaymentMethod.to_string(), "Falta método de pago");
        assert_eq!(
            AppError::RenderFailed("x".to_string()).to_string(),
            "Error generando PDF"
        );
    }

    #[test]
    fn test_wire_field_name() {
        assert_eq!(wire_field_name("fecha_entrada"), "fechaEntrada");
        assert_eq!(wire_field_name("tipo_plaza"), "tipoPlaza");
        assert_eq!(wire_field_name("email"), "email");
        assert_eq!(wire_field_name("nos_conociste"), "nosConociste");
    }

    #[test]
    fn test_validation_errors_conversion() {
        #[derive(Debug, Validate)]
        struct Probe {
            #[validate(length(min = 1, message = "El modelo de coche es obligatorio"))]
            coche: String,
            #[validate(required(message = "Debes elegir entre 'Plaza Aire Libre' o 'Plaza Cubierta'"))]
            tipo_plaza: Option<String>,
        }

        let probe = Probe {
            coche: String::new(),
            tipo_plaza: None,
        };

        let err = AppError::from(probe.validate().unwrap_err());
        match err {
            AppError::Validation(fields) => {
                assert_eq!(fields.len(), 2);
                assert_eq!(fields[0].campo, "coche");
                assert_eq!(fields[0].mensaje, "El modelo de coche es obligatorio");
                assert_eq!(fields[1].campo, "tipoPlaza");
                assert_eq!(
                    fields[1].mensaje,
                    "Debes elegir entre 'Plaza Aire Libre' o 'Plaza Cubierta'"
                );
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
