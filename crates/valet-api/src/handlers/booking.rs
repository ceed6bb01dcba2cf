//! Booking API handlers
//!
//! The price is always computed server side from the stored tariff tables;
//! whatever a client sends as price is ignored. Notification emails go out
//! in the background and never affect the response.

use crate::dto::{
    parse_fecha, ApiResponse, BookingFilterParams, BookingResponse, CreateBookingRequest,
    ListBookingsResponse, UpdateBookingRequest,
};
use actix_web::{
    web::{self, Data, Json, Path, Query},
    HttpResponse, Result,
};
use tracing::{debug, info, instrument};
use uuid::Uuid;
use validator::Validate;
use valet_core::models::BookingStatus;
use valet_core::pricing::calculate_price;
use valet_core::traits::{BookingRepository, PaginatedResponse};
use valet_core::AppError;
use valet_db::repositories::PgBookingRepository;
use valet_db::PgPool;
use valet_services::BookingNotifier;

/// Create a booking
///
/// # Errors
///
/// Returns 400 with per-field errors when validation fails, 400 when the
/// space type label is unknown, or 500 on database failure.
#[instrument(skip(payload, db, notifier))]
pub async fn create_booking(
    payload: Json<CreateBookingRequest>,
    db: Data<PgPool>,
    notifier: Data<BookingNotifier>,
) -> Result<HttpResponse> {
    let request = payload.into_inner();
    request.validate().map_err(AppError::from)?;

    let quote = calculate_price(
        parse_fecha(request.fecha_entrada.as_deref()),
        parse_fecha(request.fecha_salida.as_deref()),
        request.tipo_plaza.as_deref(),
    )?;

    let repo = PgBookingRepository::new(db.get_ref().clone());
    let booking = repo.create(&request.into_booking(quote.total_price)).await?;

    info!("Created booking {} ({})", booking.num_reserva, booking.id);

    let notifier = notifier.into_inner();
    let created = booking.clone();
    tokio::spawn(async move {
        notifier.booking_created(&created).await;
    });

    Ok(HttpResponse::Created().json(ApiResponse::success(BookingResponse::from(booking))))
}

/// List bookings with filtering and pagination
///
/// # Errors
///
/// Returns 400 on invalid pagination, or 500 on database failure.
///
/// # Examples
///
/// ```text
/// GET /api/bookings?page=1&per_page=20&estado=confirmada&matricula=BCD
/// ```
#[instrument(skip(db, query))]
pub async fn list_bookings(
    query: Query<BookingFilterParams>,
    db: Data<PgPool>,
) -> Result<Json<ListBookingsResponse>> {
    let query = query.into_inner();
    query.pagination.validate().map_err(AppError::from)?;

    // An unrecognized status value simply does not filter
    let estado = query.estado.as_deref().and_then(BookingStatus::from_str);

    debug!(
        "Listing bookings: page={}, per_page={}, estado={:?}, matricula={:?}",
        query.pagination.page, query.pagination.per_page, estado, query.matricula
    );

    let repo = PgBookingRepository::new(db.get_ref().clone());
    let (bookings, total) = repo
        .list_filtered(
            estado,
            query.matricula.as_deref(),
            query.pagination.limit(),
            query.pagination.offset(),
        )
        .await?;

    let responses: Vec<BookingResponse> = bookings.into_iter().map(BookingResponse::from).collect();
    let PaginatedResponse { data, pagination } = query.pagination.paginate(responses, total);

    Ok(Json(ListBookingsResponse {
        success: true,
        data,
        pagination,
    }))
}

/// Get a single booking by ID
///
/// # Errors
///
/// Returns 404 if the booking does not exist.
#[instrument(skip(db))]
pub async fn get_booking(
    path: Path<Uuid>,
    db: Data<PgPool>,
) -> Result<Json<ApiResponse<BookingResponse>>> {
    let id = path.into_inner();
    debug!("Fetching booking {}", id);

    let repo = PgBookingRepository::new(db.get_ref().clone());
    let booking = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::BookingNotFound(id.to_string()))?;

    Ok(Json(ApiResponse::success(BookingResponse::from(booking))))
}

/// Update a booking
///
/// Absent fields keep their stored value. The price is recomputed from the
/// resulting dates and space type, never taken from the request.
///
/// # Errors
///
/// Returns 400 on validation failure, 404 if the booking does not exist.
#[instrument(skip(payload, db, notifier))]
pub async fn update_booking(
    path: Path<Uuid>,
    payload: Json<UpdateBookingRequest>,
    db: Data<PgPool>,
    notifier: Data<BookingNotifier>,
) -> Result<Json<ApiResponse<BookingResponse>>> {
    let id = path.into_inner();
    let request = payload.into_inner();
    request.validate().map_err(AppError::from)?;

    let repo = PgBookingRepository::new(db.get_ref().clone());
    let mut booking = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::BookingNotFound(id.to_string()))?;

    request.apply_to(&mut booking);

    let quote = calculate_price(
        booking.fecha_entrada,
        booking.fecha_salida,
        Some(booking.tipo_plaza.as_str()),
    )?;
    booking.precio = quote.total_price;

    let updated = repo.update(&booking).await?;
    info!("Updated booking {} ({})", updated.num_reserva, updated.id);

    let notifier = notifier.into_inner();
    let changed = updated.clone();
    tokio::spawn(async move {
        notifier.booking_updated(&changed).await;
    });

    Ok(Json(ApiResponse::success(BookingResponse::from(updated))))
}

/// Cancel a booking
///
/// Cancellation is soft: the row stays, its status flips to "cancelada".
///
/// # Errors
///
/// Returns 404 if the booking does not exist.
#[instrument(skip(db, notifier))]
pub async fn cancel_booking(
    path: Path<Uuid>,
    db: Data<PgPool>,
    notifier: Data<BookingNotifier>,
) -> Result<Json<ApiResponse<BookingResponse>>> {
    let id = path.into_inner();

    let repo = PgBookingRepository::new(db.get_ref().clone());
    let cancelled = repo.cancel(id).await?;

    info!(
        "Cancelled booking {} ({})",
        cancelled.num_reserva, cancelled.id
    );

    let notifier = notifier.into_inner();
    let booking = cancelled.clone();
    tokio::spawn(async move {
        notifier.booking_cancelled(&booking).await;
    });

    Ok(Json(ApiResponse::success(BookingResponse::from(cancelled))))
}

/// Register booking routes under `/bookings`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bookings")
            .route("", web::get().to(list_bookings))
            .route("", web::post().to(create_booking))
            .route("/pricing", web::post().to(super::pricing::quote_price))
            .route("/{id}", web::get().to(get_booking))
            .route("/{id}", web::put().to(update_booking))
            .route("/{id}", web::delete().to(cancel_booking)),
    );
}
