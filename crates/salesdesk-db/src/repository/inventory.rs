//! # Inventory Movement Repository
//!
//! Released and to-follow stock recorded with a sale entry.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use salesdesk_core::{InventoryMovement, NewInventoryMovement};

#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    /// Records the movement for an entry.
    pub async fn insert_for_entry(
        &self,
        sale_entry_id: &str,
        movement: &NewInventoryMovement,
    ) -> DbResult<InventoryMovement> {
        let row = InventoryMovement {
            id: Uuid::new_v4().to_string(),
            sale_entry_id: sale_entry_id.to_string(),
            released_bottle: movement.released_bottle,
            released_blister: movement.released_blister,
            to_follow_bottle: movement.to_follow_bottle,
            to_follow_blister: movement.to_follow_blister,
            created_at: Utc::now(),
        };

        debug!(
            sale_entry_id = %sale_entry_id,
            released_bottle = row.released_bottle,
            to_follow_bottle = row.to_follow_bottle,
            "Recording inventory movement"
        );

        sqlx::query(
            r#"
            INSERT INTO sales_entry_inventory (
                id, sale_entry_id,
                released_bottle, released_blister,
                to_follow_bottle, to_follow_blister,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&row.id)
        .bind(&row.sale_entry_id)
        .bind(row.released_bottle)
        .bind(row.released_blister)
        .bind(row.to_follow_bottle)
        .bind(row.to_follow_blister)
        .bind(row.created_at)
        .execute(&self.pool)
        .await?;

        Ok(row)
    }

    /// Gets the movements recorded for an entry.
    pub async fn list_for_entry(&self, sale_entry_id: &str) -> DbResult<Vec<InventoryMovement>> {
        let rows = sqlx::query_as::<_, InventoryMovement>(
            r#"
            SELECT
                id, sale_entry_id,
                released_bottle, released_blister,
                to_follow_bottle, to_follow_blister,
                created_at
            FROM sales_entry_inventory
            WHERE sale_entry_id = ?1
            ORDER BY created_at
            "#,
        )
        .bind(sale_entry_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::test_support::sample_entry;

    #[tokio::test]
    async fn test_insert_and_list() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let entry = db
            .sale_entries()
            .insert(&sample_entry("2026-02-08", "Ana Cruz"))
            .await
            .unwrap();

        let movement = NewInventoryMovement {
            released_bottle: 2,
            to_follow_bottle: 1,
            ..Default::default()
        };
        db.inventory().insert_for_entry(&entry.id, &movement).await.unwrap();

        let rows = db.inventory().list_for_entry(&entry.id).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].released_bottle, 2);
        assert_eq!(rows[0].to_follow_bottle, 1);
        assert_eq!(rows[0].released_blister, 0);
    }
}
