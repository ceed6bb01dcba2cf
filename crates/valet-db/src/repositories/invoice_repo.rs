//! Invoice repository implementation
//!
//! Invoices are numbered from the single-row `factura_secuencia` table. The
//! read, insert and increment happen in one transaction with the sequence
//! row locked, so concurrent invoice generation can never hand out the same
//! number twice.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, error, instrument};
use uuid::Uuid;
use valet_core::{models::Invoice, traits::InvoiceRepository, AppError, AppResult};

/// PostgreSQL implementation of InvoiceRepository
pub struct PgInvoiceRepository {
    pool: PgPool,
}

impl PgInvoiceRepository {
    /// Create a new invoice repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvoiceRepository for PgInvoiceRepository {
    #[instrument(skip(self))]
    async fn find_by_booking(&self, reserva_id: Uuid) -> AppResult<Option<Invoice>> {
        debug!("Finding invoice for booking: {}", reserva_id);

        let result = sqlx::query_as::<sqlx::Postgres, InvoiceRow>(
            r#"
            SELECT id, reserva_id, num_factura, metodo_pago, created_at
            FROM facturas
            WHERE reserva_id = $1
            "#,
        )
        .bind(reserva_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding invoice for booking {}: {}", reserva_id, e);
            AppError::Database(format!("Failed to find invoice: {}", e))
        })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn create_with_sequence(
        &self,
        reserva_id: Uuid,
        metodo_pago: &str,
    ) -> AppResult<Invoice> {
        debug!("Issuing invoice for booking: {}", reserva_id);

        let mut tx = self.pool.begin().await.map_err(|e| {
            error!("Failed to open invoice transaction: {}", e);
            AppError::Transaction(format!("Failed to open transaction: {}", e))
        })?;

        let next: (i64,) =
            sqlx::query_as("SELECT siguiente_numero FROM factura_secuencia FOR UPDATE")
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    error!("Failed to read invoice sequence: {}", e);
                    AppError::Sequence(e.to_string())
                })?;

        let row = sqlx::query_as::<sqlx::Postgres, InvoiceRow>(
            r#"
            INSERT INTO facturas (id, reserva_id, num_factura, metodo_pago)
            VALUES ($1, $2, $3, $4)
            RETURNING id, reserva_id, num_factura, metodo_pago, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(reserva_id)
        .bind(next.0)
        .bind(metodo_pago)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("Database error creating invoice: {}", e);
            AppError::Database(format!("Failed to create invoice: {}", e))
        })?;

        sqlx::query("UPDATE factura_secuencia SET siguiente_numero = siguiente_numero + 1")
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!("Failed to advance invoice sequence: {}", e);
                AppError::Sequence(e.to_string())
            })?;

        tx.commit().await.map_err(|e| {
            error!("Failed to commit invoice transaction: {}", e);
            AppError::Transaction(format!("Failed to commit transaction: {}", e))
        })?;

        debug!("Issued invoice {} for booking {}", row.num_factura, reserva_id);
        Ok(row.into())
    }
}

/// Helper struct for mapping database rows
#[derive(Debug, sqlx::FromRow)]
struct InvoiceRow {
    id: Uuid,
    reserva_id: Uuid,
    num_factura: i64,
    metodo_pago: String,
    created_at: DateTime<Utc>,
}

impl From<InvoiceRow> for Invoice {
    fn from(row: InvoiceRow) -> Self {
        Self {
            id: row.id,
            reserva_id: row.reserva_id,
            num_factura: row.num_factura,
            metodo_pago: row.metodo_pago,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_conversion() {
        let now = Utc::now();
        let reserva_id = Uuid::new_v4();
        let row = InvoiceRow {
            id: Uuid::new_v4(),
            reserva_id,
            num_factura: 12,
            metodo_pago: "Efectivo".to_string(),
            created_at: now,
        };

        let invoice: Invoice = row.into();
        assert_eq!(invoice.reserva_id, reserva_id);
        assert_eq!(invoice.num_factura, 12);
        assert_eq!(invoice.metodo_pago, "Efectivo");
    }
}
