//! # Form Submission Repository
//!
//! Printable form submissions, their reference numbers and print logs.
//!
//! ## Reference Allocation
//! ```text
//! reference_counters                 form_submissions
//! ┌───────────┬────────────┐         ┌──────────────┬───────────┐
//! │ form_type │ last_value │  +1 ──► │ reference_no │ payload   │
//! │ ER        │ 41         │         │ ER-000042    │ {...}     │
//! └───────────┴────────────┘         └──────────────┴───────────┘
//! ```
//! The counter bump and the insert share one transaction, so numbers are
//! never skipped by a failed insert.

use chrono::Utc;
use serde_json::Value;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use salesdesk_core::forms::FormType;
use salesdesk_core::{FormSubmission, PrintLog};

#[derive(Debug, Clone)]
pub struct FormSubmissionRepository {
    pool: SqlitePool,
}

impl FormSubmissionRepository {
    /// Creates a new FormSubmissionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        FormSubmissionRepository { pool }
    }

    /// Gets a submission by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<FormSubmission>> {
        let submission = sqlx::query_as::<_, FormSubmission>(
            r#"
            SELECT id, form_type, reference_no, payload, created_at, updated_at
            FROM form_submissions
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(submission)
    }

    /// Saves a form for printing.
    ///
    /// ## Behavior
    /// - `id` given: the payload is replaced and the reference is kept
    /// - no `id`: the next reference for `form_type` is allocated and a new
    ///   submission is inserted
    pub async fn save(
        &self,
        id: Option<&str>,
        form_type: FormType,
        payload: &Value,
    ) -> DbResult<FormSubmission> {
        let payload_text = serde_json::to_string(payload)?;
        let now = Utc::now();

        if let Some(id) = id {
            let result = sqlx::query(
                "UPDATE form_submissions SET payload = ?2, updated_at = ?3 WHERE id = ?1",
            )
            .bind(id)
            .bind(&payload_text)
            .bind(now)
            .execute(&self.pool)
            .await?;

            if result.rows_affected() == 0 {
                return Err(DbError::not_found("Form submission", id));
            }

            debug!(id = %id, "Updated form submission payload");
            return self
                .get_by_id(id)
                .await?
                .ok_or_else(|| DbError::not_found("Form submission", id));
        }

        let mut tx = self.pool.begin().await?;

        let sequence: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO reference_counters (form_type, last_value) VALUES (?1, 1)
            ON CONFLICT (form_type) DO UPDATE SET last_value = last_value + 1
            RETURNING last_value
            "#,
        )
        .bind(form_type.code())
        .fetch_one(&mut *tx)
        .await?;

        let submission = FormSubmission {
            id: Uuid::new_v4().to_string(),
            form_type: form_type.code().to_string(),
            reference_no: form_type.reference_no(sequence),
            payload: payload_text,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO form_submissions (id, form_type, reference_no, payload, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&submission.id)
        .bind(&submission.form_type)
        .bind(&submission.reference_no)
        .bind(&submission.payload)
        .bind(submission.created_at)
        .bind(submission.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            id = %submission.id,
            reference_no = %submission.reference_no,
            "Created form submission"
        );
        Ok(submission)
    }

    /// Appends a print log row for a stored submission.
    pub async fn log_print(&self, submission_id: &str) -> DbResult<PrintLog> {
        let submission = self
            .get_by_id(submission_id)
            .await?
            .ok_or_else(|| DbError::not_found("Form submission", submission_id))?;

        let log = PrintLog {
            id: Uuid::new_v4().to_string(),
            submission_id: submission.id,
            form_type: submission.form_type,
            reference_no: submission.reference_no,
            printed_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO print_logs (id, submission_id, form_type, reference_no, printed_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&log.id)
        .bind(&log.submission_id)
        .bind(&log.form_type)
        .bind(&log.reference_no)
        .bind(log.printed_at)
        .execute(&self.pool)
        .await?;

        debug!(reference_no = %log.reference_no, "Logged print");
        Ok(log)
    }

    /// Print history of a submission, oldest first.
    pub async fn print_logs(&self, submission_id: &str) -> DbResult<Vec<PrintLog>> {
        let logs = sqlx::query_as::<_, PrintLog>(
            r#"
            SELECT id, submission_id, form_type, reference_no, printed_at
            FROM print_logs
            WHERE submission_id = ?1
            ORDER BY printed_at
            "#,
        )
        .bind(submission_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use serde_json::json;

    #[tokio::test]
    async fn test_references_are_sequential_per_type() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.form_submissions();

        let first = repo.save(None, FormType::EventReport, &json!({"a": 1})).await.unwrap();
        let second = repo.save(None, FormType::EventReport, &json!({"a": 2})).await.unwrap();
        let other = repo.save(None, FormType::ProductInventory, &json!({})).await.unwrap();

        assert_eq!(first.reference_no, "ER-000001");
        assert_eq!(second.reference_no, "ER-000002");
        assert_eq!(other.reference_no, "PI-000001");
    }

    #[tokio::test]
    async fn test_update_keeps_reference() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.form_submissions();

        let created = repo.save(None, FormType::SpecialCompanyEvent, &json!({"v": 1})).await.unwrap();
        let updated = repo
            .save(Some(&created.id), FormType::SpecialCompanyEvent, &json!({"v": 2}))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.reference_no, "SC-000001");
        assert_eq!(updated.payload, r#"{"v":2}"#);
    }

    #[tokio::test]
    async fn test_update_missing_submission() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let result = db
            .form_submissions()
            .save(Some("missing"), FormType::EventReport, &json!({}))
            .await;
        assert!(matches!(result, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_print_logs() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.form_submissions();

        let submission = repo.save(None, FormType::EventReport, &json!({})).await.unwrap();
        repo.log_print(&submission.id).await.unwrap();
        repo.log_print(&submission.id).await.unwrap();

        let logs = repo.print_logs(&submission.id).await.unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].reference_no, "ER-000001");

        assert!(repo.log_print("missing").await.is_err());
    }
}
