//! Custom field validators shared by the request DTOs
//!
//! All of these run only when the field is present; requiredness is a
//! separate rule so each failure carries its own message.

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;
use validator::ValidationError;

/// Strict YYYY-MM-DD. The length check matters: chrono alone accepts
/// unpadded parts like "2025-6-1".
pub(crate) fn validate_date_format(value: &str) -> Result<(), ValidationError> {
    if value.len() == 10 && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok() {
        return Ok(());
    }

    let mut err = ValidationError::new("date_format");
    err.message = Some("La fecha debe tener formato YYYY-MM-DD".into());
    Err(err)
}

/// Strict HH:MM, no seconds.
pub(crate) fn validate_time_format(value: &str) -> Result<(), ValidationError> {
    if value.len() == 5 && NaiveTime::parse_from_str(value, "%H:%M").is_ok() {
        return Ok(());
    }

    let mut err = ValidationError::new("time_format");
    err.message = Some("La hora debe tener formato HH:MM".into());
    Err(err)
}

pub(crate) fn validate_uuid(value: &str) -> Result<(), ValidationError> {
    if Uuid::parse_str(value).is_ok() {
        return Ok(());
    }

    let mut err = ValidationError::new("uuid");
    err.message = Some("El ID de usuario no es válido".into());
    Err(err)
}

/// The two space type labels the tariff tables know about.
pub(crate) fn validate_tipo_plaza(value: &str) -> Result<(), ValidationError> {
    if valet_core::models::SpaceType::parse(value).is_some() {
        return Ok(());
    }

    let mut err = ValidationError::new("tipo_plaza");
    err.message = Some("Debes elegir entre 'Plaza Aire Libre' o 'Plaza Cubierta'".into());
    Err(err)
}
