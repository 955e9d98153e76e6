//! # Sale Entry Repository
//!
//! Database operations for encoded sale entries.
//!
//! ## Snapshot Pattern
//! Derived price fields are stored as computed at encode time. Changing the
//! package price table later never rewrites historic entries.
//!
//! Entries are append-only: there is no update or delete.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use salesdesk_core::report::search_key;
use salesdesk_core::{NewSaleEntry, SaleEntry};

const SELECT_COLUMNS: &str = r#"
    SELECT
        id, location, sale_date, po_number, member_name, username,
        is_new_member, member_type, package_type, to_blister,
        quantity, blister_count,
        original_price_centavos, discount_bps,
        price_after_discount_centavos, one_time_discount_centavos,
        total_sales_centavos,
        remarks, received_by, collected_by, created_by, created_at
    FROM sales_entries
"#;

/// Repository for sale entry database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = SaleEntryRepository::new(pool);
/// let entry = repo.insert(&submission.entry).await?;
/// let again = repo.get_by_id(&entry.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SaleEntryRepository {
    pool: SqlitePool,
}

impl SaleEntryRepository {
    /// Creates a new SaleEntryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleEntryRepository { pool }
    }

    /// Inserts a new entry and returns the stored row.
    ///
    /// The id is a fresh UUID v4; `created_at` is now. The search key is
    /// folded here so report searches match accented names in any case.
    pub async fn insert(&self, entry: &NewSaleEntry) -> DbResult<SaleEntry> {
        let stored = SaleEntry {
            id: Uuid::new_v4().to_string(),
            location: entry.location.clone(),
            sale_date: entry.sale_date,
            po_number: entry.po_number.clone(),
            member_name: entry.member_name.clone(),
            username: entry.username.clone(),
            is_new_member: entry.is_new_member,
            member_type: entry.member_type.clone(),
            package_type: entry.package_type.clone(),
            to_blister: entry.to_blister,
            quantity: entry.quantity,
            blister_count: entry.blister_count,
            original_price_centavos: entry.original_price.centavos(),
            discount_bps: entry.discount_bps,
            price_after_discount_centavos: entry.price_after_discount.centavos(),
            one_time_discount_centavos: entry.one_time_discount.centavos(),
            total_sales_centavos: entry.total_sales.centavos(),
            remarks: entry.remarks.clone(),
            received_by: entry.received_by.clone(),
            collected_by: entry.collected_by.clone(),
            created_by: entry.created_by.clone(),
            created_at: Utc::now(),
        };

        let key = search_key(&[
            stored.member_name.as_deref(),
            stored.po_number.as_deref(),
            stored.username.as_deref(),
        ]);

        debug!(
            id = %stored.id,
            package = ?stored.package_type,
            total_sales = stored.total_sales_centavos,
            "Inserting sale entry"
        );

        sqlx::query(
            r#"
            INSERT INTO sales_entries (
                id, location, sale_date, po_number, member_name, username,
                is_new_member, member_type, package_type, to_blister,
                quantity, blister_count,
                original_price_centavos, discount_bps,
                price_after_discount_centavos, one_time_discount_centavos,
                total_sales_centavos,
                remarks, received_by, collected_by, created_by, created_at,
                search_key
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6,
                ?7, ?8, ?9, ?10,
                ?11, ?12,
                ?13, ?14,
                ?15, ?16,
                ?17,
                ?18, ?19, ?20, ?21, ?22,
                ?23
            )
            "#,
        )
        .bind(&stored.id)
        .bind(&stored.location)
        .bind(stored.sale_date)
        .bind(&stored.po_number)
        .bind(&stored.member_name)
        .bind(&stored.username)
        .bind(stored.is_new_member)
        .bind(&stored.member_type)
        .bind(&stored.package_type)
        .bind(stored.to_blister)
        .bind(stored.quantity)
        .bind(stored.blister_count)
        .bind(stored.original_price_centavos)
        .bind(stored.discount_bps)
        .bind(stored.price_after_discount_centavos)
        .bind(stored.one_time_discount_centavos)
        .bind(stored.total_sales_centavos)
        .bind(&stored.remarks)
        .bind(&stored.received_by)
        .bind(&stored.collected_by)
        .bind(&stored.created_by)
        .bind(stored.created_at)
        .bind(&key)
        .execute(&self.pool)
        .await?;

        Ok(stored)
    }

    /// Gets an entry by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<SaleEntry>> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");
        let entry = sqlx::query_as::<_, SaleEntry>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entry)
    }

    /// Number of stored entries.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales_entries")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use crate::test_support::sample_entry;
    use salesdesk_core::Money;

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.sale_entries();

        let stored = repo.insert(&sample_entry("2026-02-08", "Ana Cruz")).await.unwrap();
        assert!(Uuid::parse_str(&stored.id).is_ok());

        let loaded = repo.get_by_id(&stored.id).await.unwrap().unwrap();
        assert_eq!(loaded.member_name.as_deref(), Some("Ana Cruz"));
        assert_eq!(loaded.total_sales(), Money::from_pesos(10_500));
        assert_eq!(loaded.sale_date, stored.sale_date);
        assert!(loaded.to_blister);
        assert_eq!(loaded.location, "Davao Office");
    }

    #[tokio::test]
    async fn test_missing_entry() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.sale_entries();

        assert!(repo.get_by_id("nope").await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_fractional_discount_round_trips() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.sale_entries();

        let mut entry = sample_entry("2026-02-08", "Ana Cruz");
        entry.discount_bps = 750;
        let stored = repo.insert(&entry).await.unwrap();

        let loaded = repo.get_by_id(&stored.id).await.unwrap().unwrap();
        assert_eq!(loaded.discount_bps, 750);
    }

    #[tokio::test]
    async fn test_out_of_range_discount_is_a_check_violation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let mut entry = sample_entry("2026-02-08", "Ana Cruz");
        entry.discount_bps = 15_000;
        let err = db.sale_entries().insert(&entry).await.unwrap_err();

        assert!(matches!(
            err,
            DbError::CheckViolation { ref field, .. } if field == "discount_percent"
        ));
        assert_eq!(db.sale_entries().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_search_key_is_stored_lowercase() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let stored = db
            .sale_entries()
            .insert(&sample_entry("2026-02-08", "JOSÉ PEÑA"))
            .await
            .unwrap();

        let key: String = sqlx::query_scalar("SELECT search_key FROM sales_entries WHERE id = ?1")
            .bind(&stored.id)
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert!(key.starts_with("josé peña"));
    }
}
