//! # Payment Repository
//!
//! Payments recorded against a sale entry (at most two per entry).

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use salesdesk_core::{NewPayment, SalePayment};

/// Repository for sale payment rows.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: SqlitePool,
}

impl PaymentRepository {
    /// Creates a new PaymentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PaymentRepository { pool }
    }

    /// Inserts the payments of one entry in a single transaction.
    ///
    /// Either every payment row is written or none is.
    pub async fn insert_for_entry(
        &self,
        sale_entry_id: &str,
        payments: &[NewPayment],
    ) -> DbResult<Vec<SalePayment>> {
        if payments.is_empty() {
            return Ok(Vec::new());
        }

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;
        let mut stored = Vec::with_capacity(payments.len());

        for payment in payments {
            let row = SalePayment {
                id: Uuid::new_v4().to_string(),
                sale_entry_id: sale_entry_id.to_string(),
                payment_no: payment.payment_no,
                mode: payment.mode.clone(),
                mode_type: payment.mode_type.clone(),
                reference_no: payment.reference_no.clone(),
                amount_centavos: payment.amount.centavos(),
                created_at: now,
            };

            debug!(
                sale_entry_id = %sale_entry_id,
                payment_no = row.payment_no,
                mode = ?row.mode,
                amount = row.amount_centavos,
                "Recording payment"
            );

            sqlx::query(
                r#"
                INSERT INTO sales_entry_payments (
                    id, sale_entry_id, payment_no,
                    mode, mode_type, reference_no,
                    amount_centavos, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            )
            .bind(&row.id)
            .bind(&row.sale_entry_id)
            .bind(row.payment_no)
            .bind(&row.mode)
            .bind(&row.mode_type)
            .bind(&row.reference_no)
            .bind(row.amount_centavos)
            .bind(row.created_at)
            .execute(&mut *tx)
            .await?;

            stored.push(row);
        }

        tx.commit().await?;
        Ok(stored)
    }

    /// Gets all payments for an entry, payment 1 first.
    pub async fn list_for_entry(&self, sale_entry_id: &str) -> DbResult<Vec<SalePayment>> {
        let payments = sqlx::query_as::<_, SalePayment>(
            r#"
            SELECT
                id, sale_entry_id, payment_no,
                mode, mode_type, reference_no,
                amount_centavos, created_at
            FROM sales_entry_payments
            WHERE sale_entry_id = ?1
            ORDER BY payment_no
            "#,
        )
        .bind(sale_entry_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }
}
