//! Price quote handler

use crate::dto::{parse_fecha, ApiResponse, PriceQuoteRequest};
use actix_web::{web::Json, Result};
use tracing::{debug, instrument};
use validator::Validate;
use valet_core::pricing::{calculate_price, PriceQuote};
use valet_core::AppError;

/// Quote the parking price for a stay
///
/// Incomplete input quotes zero instead of failing; only a present but
/// unknown space type label is an error.
///
/// # Errors
///
/// Returns 400 when a date has the wrong format or the space type label is
/// not one of the tariff tables.
#[instrument(skip(payload))]
pub async fn quote_price(payload: Json<PriceQuoteRequest>) -> Result<Json<ApiResponse<PriceQuote>>> {
    let request = payload.into_inner();
    request.validate().map_err(AppError::from)?;

    let quote = calculate_price(
        parse_fecha(request.fecha_entrada.as_deref()),
        parse_fecha(request.fecha_salida.as_deref()),
        request.tipo_plaza.as_deref(),
    )?;

    debug!(
        "Quoted {} for tipo_plaza={:?}, {:?} .. {:?}",
        quote.total_price, request.tipo_plaza, request.fecha_entrada, request.fecha_salida
    );

    Ok(Json(ApiResponse::success(quote)))
}
