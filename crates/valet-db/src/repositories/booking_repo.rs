//! Booking repository implementation
//!
//! PostgreSQL-backed storage for bookings. The `reservas` table assigns the
//! human-facing booking number from a sequence, so inserts always read the
//! row back to pick it up.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, error, instrument};
use uuid::Uuid;
use valet_core::{
    models::{Booking, BookingStatus, SpaceType},
    traits::BookingRepository,
    AppError, AppResult,
};

/// PostgreSQL implementation of BookingRepository
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    /// Create a new booking repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Parse booking status from string
    fn parse_estado(s: &str) -> BookingStatus {
        BookingStatus::from_str(s).unwrap_or(BookingStatus::Confirmed)
    }

    /// Parse space type from string
    fn parse_tipo_plaza(s: &str) -> SpaceType {
        SpaceType::parse(s).unwrap_or(SpaceType::AireLibre)
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    #[instrument(skip(self, booking))]
    async fn create(&self, booking: &Booking) -> AppResult<Booking> {
        debug!("Creating booking for plate: {}", booking.matricula);

        let row = sqlx::query_as::<sqlx::Postgres, BookingRow>(
            r#"
            INSERT INTO reservas (
                id, fecha_entrada, hora_entrada, fecha_salida, hora_salida,
                tipo_plaza, coche, matricula, num_vuelo,
                terminal_entrada, terminal_salida, comentarios,
                cliente_id, nombre_completo, telefono, email, nos_conociste,
                cif, nombre_conductor, direccion,
                precio, estado
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                    $13, $14, $15, $16, $17, $18, $19, $20, $21, $22)
            RETURNING
                id, num_reserva, fecha_entrada, hora_entrada, fecha_salida, hora_salida,
                tipo_plaza, coche, matricula, num_vuelo,
                terminal_entrada, terminal_salida, comentarios,
                cliente_id, nombre_completo, telefono, email, nos_conociste,
                cif, nombre_conductor, direccion,
                precio, estado, created_at, updated_at
            "#,
        )
        .bind(booking.id)
        .bind(booking.fecha_entrada)
        .bind(booking.hora_entrada)
        .bind(booking.fecha_salida)
        .bind(booking.hora_salida)
        .bind(booking.tipo_plaza.as_str())
        .bind(&booking.coche)
        .bind(&booking.matricula)
        .bind(&booking.num_vuelo)
        .bind(&booking.terminal_entrada)
        .bind(&booking.terminal_salida)
        .bind(&booking.comentarios)
        .bind(booking.cliente_id)
        .bind(&booking.nombre_completo)
        .bind(&booking.telefono)
        .bind(&booking.email)
        .bind(&booking.nos_conociste)
        .bind(&booking.cif)
        .bind(&booking.nombre_conductor)
        .bind(&booking.direccion)
        .bind(booking.precio)
        .bind(booking.estado.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error creating booking: {}", e);
            AppError::Database(format!("Failed to create booking: {}", e))
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        debug!("Finding booking by id: {}", id);

        let result = sqlx::query_as::<sqlx::Postgres, BookingRow>(
            r#"
            SELECT
                id, num_reserva, fecha_entrada, hora_entrada, fecha_salida, hora_salida,
                tipo_plaza, coche, matricula, num_vuelo,
                terminal_entrada, terminal_salida, comentarios,
                cliente_id, nombre_completo, telefono, email, nos_conociste,
                cif, nombre_conductor, direccion,
                precio, estado, created_at, updated_at
            FROM reservas
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding booking {}: {}", id, e);
            AppError::Database(format!("Failed to find booking: {}", e))
        })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn list_filtered(
        &self,
        estado: Option<BookingStatus>,
        matricula: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> AppResult<(Vec<Booking>, i64)> {
        debug!(
            "Listing bookings estado={:?} matricula={:?} limit={} offset={}",
            estado, matricula, limit, offset
        );

        let estado = estado.map(|e| e.to_string());

        let rows = sqlx::query_as::<sqlx::Postgres, BookingRow>(
            r#"
            SELECT
                id, num_reserva, fecha_entrada, hora_entrada, fecha_salida, hora_salida,
                tipo_plaza, coche, matricula, num_vuelo,
                terminal_entrada, terminal_salida, comentarios,
                cliente_id, nombre_completo, telefono, email, nos_conociste,
                cif, nombre_conductor, direccion,
                precio, estado, created_at, updated_at
            FROM reservas
            WHERE ($1::text IS NULL OR estado = $1)
                AND ($2::text IS NULL OR matricula ILIKE '%' || $2 || '%')
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(&estado)
        .bind(matricula)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error listing bookings: {}", e);
            AppError::Database(format!("Failed to list bookings: {}", e))
        })?;

        let total: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM reservas
            WHERE ($1::text IS NULL OR estado = $1)
                AND ($2::text IS NULL OR matricula ILIKE '%' || $2 || '%')
            "#,
        )
        .bind(&estado)
        .bind(matricula)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error counting bookings: {}", e);
            AppError::Database(format!("Failed to count bookings: {}", e))
        })?;

        Ok((rows.into_iter().map(Into::into).collect(), total.0))
    }

    #[instrument(skip(self, booking))]
    async fn update(&self, booking: &Booking) -> AppResult<Booking> {
        debug!("Updating booking: {}", booking.id);

        let row = sqlx::query_as::<sqlx::Postgres, BookingRow>(
            r#"
            UPDATE reservas
            SET fecha_entrada = $2,
                hora_entrada = $3,
                fecha_salida = $4,
                hora_salida = $5,
                tipo_plaza = $6,
                coche = $7,
                matricula = $8,
                num_vuelo = $9,
                terminal_entrada = $10,
                terminal_salida = $11,
                comentarios = $12,
                cliente_id = $13,
                nombre_completo = $14,
                telefono = $15,
                email = $16,
                nos_conociste = $17,
                cif = $18,
                nombre_conductor = $19,
                direccion = $20,
                precio = $21,
                estado = $22,
                updated_at = NOW()
            WHERE id = $1
            RETURNING
                id, num_reserva, fecha_entrada, hora_entrada, fecha_salida, hora_salida,
                tipo_plaza, coche, matricula, num_vuelo,
                terminal_entrada, terminal_salida, comentarios,
                cliente_id, nombre_completo, telefono, email, nos_conociste,
                cif, nombre_conductor, direccion,
                precio, estado, created_at, updated_at
            "#,
        )
        .bind(booking.id)
        .bind(booking.fecha_entrada)
        .bind(booking.hora_entrada)
        .bind(booking.fecha_salida)
        .bind(booking.hora_salida)
        .bind(booking.tipo_plaza.as_str())
        .bind(&booking.coche)
        .bind(&booking.matricula)
        .bind(&booking.num_vuelo)
        .bind(&booking.terminal_entrada)
        .bind(&booking.terminal_salida)
        .bind(&booking.comentarios)
        .bind(booking.cliente_id)
        .bind(&booking.nombre_completo)
        .bind(&booking.telefono)
        .bind(&booking.email)
        .bind(&booking.nos_conociste)
        .bind(&booking.cif)
        .bind(&booking.nombre_conductor)
        .bind(&booking.direccion)
        .bind(booking.precio)
        .bind(booking.estado.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error updating booking {}: {}", booking.id, e);
            AppError::Database(format!("Failed to update booking: {}", e))
        })?;

        row.map(Into::into)
            .ok_or_else(|| AppError::BookingNotFound(booking.id.to_string()))
    }

    #[instrument(skip(self))]
    async fn cancel(&self, id: Uuid) -> AppResult<Booking> {
        debug!("Cancelling booking: {}", id);

        let row = sqlx::query_as::<sqlx::Postgres, BookingRow>(
            r#"
            UPDATE reservas
            SET estado = 'cancelada',
                updated_at = NOW()
            WHERE id = $1
            RETURNING
                id, num_reserva, fecha_entrada, hora_entrada, fecha_salida, hora_salida,
                tipo_plaza, coche, matricula, num_vuelo,
                terminal_entrada, terminal_salida, comentarios,
                cliente_id, nombre_completo, telefono, email, nos_conociste,
                cif, nombre_conductor, direccion,
                precio, estado, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error cancelling booking {}: {}", id, e);
            AppError::Database(format!("Failed to cancel booking: {}", e))
        })?;

        row.map(Into::into)
            .ok_or_else(|| AppError::BookingNotFound(id.to_string()))
    }
}

/// Helper struct for mapping database rows
#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    num_reserva: i64,
    fecha_entrada: Option<NaiveDate>,
    hora_entrada: Option<NaiveTime>,
    fecha_salida: Option<NaiveDate>,
    hora_salida: Option<NaiveTime>,
    tipo_plaza: String,
    coche: String,
    matricula: String,
    num_vuelo: Option<String>,
    terminal_entrada: Option<String>,
    terminal_salida: Option<String>,
    comentarios: Option<String>,
    cliente_id: Option<Uuid>,
    nombre_completo: Option<String>,
    telefono: Option<String>,
    email: Option<String>,
    nos_conociste: Option<String>,
    cif: Option<String>,
    nombre_conductor: Option<String>,
    direccion: Option<String>,
    precio: Decimal,
    estado: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Self {
            id: row.id,
            num_reserva: row.num_reserva,
            fecha_entrada: row.fecha_entrada,
            hora_entrada: row.hora_entrada,
            fecha_salida: row.fecha_salida,
            hora_salida: row.hora_salida,
            tipo_plaza: PgBookingRepository::parse_tipo_plaza(&row.tipo_plaza),
            coche: row.coche,
            matricula: row.matricula,
            num_vuelo: row.num_vuelo,
            terminal_entrada: row.terminal_entrada,
            terminal_salida: row.terminal_salida,
            comentarios: row.comentarios,
            cliente_id: row.cliente_id,
            nombre_completo: row.nombre_completo,
            telefono: row.telefono,
            email: row.email,
            nos_conociste: row.nos_conociste,
            cif: row.cif,
            nombre_conductor: row.nombre_conductor,
            direccion: row.direccion,
            precio: row.precio,
            estado: PgBookingRepository::parse_estado(&row.estado),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_estado() {
        assert_eq!(
            PgBookingRepository::parse_estado("confirmada"),
            BookingStatus::Confirmed
        );
        assert_eq!(
            PgBookingRepository::parse_estado("cancelada"),
            BookingStatus::Cancelled
        );
        // unknown values fall back to confirmed
        assert_eq!(
            PgBookingRepository::parse_estado("archivada"),
            BookingStatus::Confirmed
        );
    }

    #[test]
    fn test_parse_tipo_plaza() {
        assert_eq!(
            PgBookingRepository::parse_tipo_plaza("Plaza Cubierta"),
            SpaceType::Cubierta
        );
        assert_eq!(
            PgBookingRepository::parse_tipo_plaza("Plaza Aire Libre"),
            SpaceType::AireLibre
        );
    }

    #[test]
    fn test_row_conversion() {
        let now = Utc::now();
        let row = BookingRow {
            id: Uuid::new_v4(),
            num_reserva: 7,
            fecha_entrada: Some(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
            hora_entrada: Some(NaiveTime::from_hms_opt(10, 30, 0).unwrap()),
            fecha_salida: Some(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()),
            hora_salida: None,
            tipo_plaza: "Plaza Cubierta".to_string(),
            coche: "Seat León Rojo".to_string(),
            matricula: "1234BCD".to_string(),
            num_vuelo: Some("FR1234".to_string()),
            terminal_entrada: None,
            terminal_salida: None,
            comentarios: None,
            cliente_id: None,
            nombre_completo: Some("Ana García".to_string()),
            telefono: Some("600123456".to_string()),
            email: Some("ana@example.com".to_string()),
            nos_conociste: None,
            cif: None,
            nombre_conductor: None,
            direccion: None,
            precio: dec!(50),
            estado: "confirmada".to_string(),
            created_at: now,
            updated_at: now,
        };

        let booking: Booking = row.into();
        assert_eq!(booking.num_reserva, 7);
        assert_eq!(booking.tipo_plaza, SpaceType::Cubierta);
        assert_eq!(booking.estado, BookingStatus::Confirmed);
        assert_eq!(booking.precio, dec!(50));
    }
}
