//! # Daily Cash Count Repository
//!
//! One header per (cash date, creator) with its denomination lines.
//!
//! ## Upsert
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BEGIN                                                                  │
//! │    header for (date, creator)?                                          │
//! │       ├── yes: UPDATE total_cash, updated_at                            │
//! │       └── no:  INSERT header                                            │
//! │    DELETE every line of the header                                      │
//! │    INSERT the new lines                                                 │
//! │  COMMIT                                                                 │
//! │  re-read header + lines                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The whole replacement runs in one transaction, so a failed line insert
//! leaves the previous count intact.

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use salesdesk_core::cash::{total_cash, CashLine};
use salesdesk_core::{DailyCashCount, DailyCashCountHeader, DailyCashCountLine};

#[derive(Debug, Clone)]
pub struct CashCountRepository {
    pool: SqlitePool,
}

impl CashCountRepository {
    /// Creates a new CashCountRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CashCountRepository { pool }
    }

    async fn header(&self, cash_date: NaiveDate, created_by: &str) -> DbResult<Option<DailyCashCountHeader>> {
        let header = sqlx::query_as::<_, DailyCashCountHeader>(
            r#"
            SELECT id, cash_date, created_by, total_cash_centavos, created_at, updated_at
            FROM daily_cash_counts
            WHERE cash_date = ?1 AND created_by = ?2
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(cash_date)
        .bind(created_by)
        .fetch_optional(&self.pool)
        .await?;

        Ok(header)
    }

    async fn lines(&self, header_id: &str) -> DbResult<Vec<DailyCashCountLine>> {
        let lines = sqlx::query_as::<_, DailyCashCountLine>(
            r#"
            SELECT id, denomination_centavos, pieces, amount_centavos
            FROM daily_cash_count_lines
            WHERE cash_count_id = ?1
            ORDER BY denomination_centavos DESC
            "#,
        )
        .bind(header_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Gets the count for (date, creator), lines largest denomination first.
    pub async fn get(&self, cash_date: NaiveDate, created_by: &str) -> DbResult<Option<DailyCashCount>> {
        let Some(header) = self.header(cash_date, created_by).await? else {
            return Ok(None);
        };
        let lines = self.lines(&header.id).await?;

        Ok(Some(DailyCashCount { header, lines }))
    }

    /// Saves a count, replacing any lines saved earlier for (date, creator).
    ///
    /// `lines` are expected to be normalised already (see
    /// [`salesdesk_core::cash::normalize_lines`]).
    pub async fn upsert(
        &self,
        cash_date: NaiveDate,
        created_by: &str,
        lines: &[CashLine],
    ) -> DbResult<DailyCashCount> {
        let total = total_cash(lines);
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        let existing: Option<String> = sqlx::query_scalar(
            "SELECT id FROM daily_cash_counts WHERE cash_date = ?1 AND created_by = ?2",
        )
        .bind(cash_date)
        .bind(created_by)
        .fetch_optional(&mut *tx)
        .await?;

        let header_id = match existing {
            Some(id) => {
                sqlx::query(
                    "UPDATE daily_cash_counts SET total_cash_centavos = ?2, updated_at = ?3 WHERE id = ?1",
                )
                .bind(&id)
                .bind(total.centavos())
                .bind(now)
                .execute(&mut *tx)
                .await?;
                debug!(id = %id, "Updating existing cash count");
                id
            }
            None => {
                let id = Uuid::new_v4().to_string();
                sqlx::query(
                    r#"
                    INSERT INTO daily_cash_counts (
                        id, cash_date, created_by, total_cash_centavos, created_at, updated_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?5)
                    "#,
                )
                .bind(&id)
                .bind(cash_date)
                .bind(created_by)
                .bind(total.centavos())
                .bind(now)
                .execute(&mut *tx)
                .await?;
                debug!(id = %id, "Created cash count header");
                id
            }
        };

        sqlx::query("DELETE FROM daily_cash_count_lines WHERE cash_count_id = ?1")
            .bind(&header_id)
            .execute(&mut *tx)
            .await?;

        for line in lines {
            sqlx::query(
                r#"
                INSERT INTO daily_cash_count_lines (
                    id, cash_count_id, denomination_centavos, pieces, amount_centavos
                ) VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&header_id)
            .bind(line.denomination.centavos())
            .bind(line.pieces)
            .bind(line.amount.centavos())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(
            cash_date = %cash_date,
            created_by = %created_by,
            lines = lines.len(),
            total_cash = %total,
            "Saved daily cash count"
        );

        self.get(cash_date, created_by)
            .await?
            .ok_or_else(|| DbError::not_found("Daily cash count", header_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use salesdesk_core::cash::{normalize_lines, CashLineInput};
    use salesdesk_core::Money;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 8).unwrap()
    }

    fn lines(pairs: &[(i64, i64)]) -> Vec<CashLine> {
        let inputs: Vec<CashLineInput> = pairs
            .iter()
            .map(|(denomination_centavos, pieces)| CashLineInput {
                denomination_centavos: *denomination_centavos,
                pieces: *pieces,
            })
            .collect();
        normalize_lines(&inputs).unwrap()
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.cash_counts().get(date(), "user-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_inserts_then_replaces() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.cash_counts();

        let first = repo
            .upsert(date(), "user-1", &lines(&[(100_000, 2), (2_000, 3), (25, 4)]))
            .await
            .unwrap();
        assert_eq!(first.header.total_cash(), Money::from_pesos(2_061));
        assert_eq!(first.lines.len(), 3);
        assert_eq!(first.lines[0].denomination_centavos, 100_000);
        assert_eq!(first.lines[2].amount_centavos, 100);

        let second = repo
            .upsert(date(), "user-1", &lines(&[(50_000, 1)]))
            .await
            .unwrap();
        assert_eq!(second.header.id, first.header.id);
        assert_eq!(second.lines.len(), 1);
        assert_eq!(second.header.total_cash(), Money::from_pesos(500));
    }

    #[tokio::test]
    async fn test_counts_are_per_creator() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.cash_counts();

        repo.upsert(date(), "user-1", &lines(&[(100, 5)])).await.unwrap();
        repo.upsert(date(), "user-2", &lines(&[(100, 7)])).await.unwrap();

        let one = repo.get(date(), "user-1").await.unwrap().unwrap();
        let two = repo.get(date(), "user-2").await.unwrap().unwrap();
        assert_ne!(one.header.id, two.header.id);
        assert_eq!(two.header.total_cash(), Money::from_pesos(7));
    }

    #[tokio::test]
    async fn test_empty_upsert_clears_lines() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.cash_counts();

        repo.upsert(date(), "user-1", &lines(&[(100, 5)])).await.unwrap();
        let cleared = repo.upsert(date(), "user-1", &[]).await.unwrap();
        assert!(cleared.lines.is_empty());
        assert!(cleared.header.total_cash().is_zero());
    }
}
