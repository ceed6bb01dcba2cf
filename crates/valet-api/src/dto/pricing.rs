//! Price quote DTOs

use super::validators::validate_date_format;
use serde::Deserialize;
use validator::Validate;

/// Price quote request
///
/// Everything is optional: an incomplete quote is answered with a zero
/// total rather than an error, so the public form can ask while the
/// customer is still filling it in. The space type label is checked by the
/// pricing engine itself, not here.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuoteRequest {
    /// Entry date, YYYY-MM-DD
    #[validate(custom(function = validate_date_format))]
    pub fecha_entrada: Option<String>,

    /// Exit date, YYYY-MM-DD
    #[validate(custom(function = validate_date_format))]
    pub fecha_salida: Option<String>,

    /// Space type label
    pub tipo_plaza: Option<String>,
}
