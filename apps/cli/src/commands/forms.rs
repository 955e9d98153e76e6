//! # Printable Form Commands
//!
//! Event report (ER), special company event (SC) and product inventory (PI)
//! forms are stored as JSON payloads with a per-type reference number, and
//! every print is logged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::DbState;
use salesdesk_core::forms::FormType;
use salesdesk_core::validation::validate_uuid;
use salesdesk_core::{CoreError, FormSubmission};
use salesdesk_db::DbError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmissionResponse {
    pub id: String,
    pub form_type: String,
    pub reference_no: String,
    pub payload: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<FormSubmission> for FormSubmissionResponse {
    type Error = ApiError;

    fn try_from(submission: FormSubmission) -> Result<Self, Self::Error> {
        let payload: Value =
            serde_json::from_str(&submission.payload).map_err(DbError::from)?;

        Ok(FormSubmissionResponse {
            id: submission.id,
            form_type: submission.form_type,
            reference_no: submission.reference_no,
            payload,
            created_at: submission.created_at,
            updated_at: submission.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintResponse {
    pub submission_id: String,
    pub form_type: String,
    pub reference_no: String,
    pub printed_at: DateTime<Utc>,
    /// Prints of this submission so far, this one included.
    pub print_count: usize,
}

/// Parses operator-supplied payload text. Only JSON objects are accepted.
pub fn parse_payload(text: &str) -> Result<Value, ApiError> {
    let payload: Value = serde_json::from_str(text)
        .map_err(|e| ApiError::validation(format!("Form payload is not valid JSON: {}", e)))?;

    if !payload.is_object() {
        return Err(ApiError::validation("Form payload must be a JSON object"));
    }
    Ok(payload)
}

/// Saves a form: a new submission gets the next reference number, an
/// existing one keeps its reference and takes the new payload.
pub async fn save_form(
    db: &DbState,
    form_type: &str,
    id: Option<&str>,
    payload: &str,
) -> Result<FormSubmissionResponse, ApiError> {
    debug!(form_type = %form_type, ?id, "save_form command");

    let form_type: FormType = form_type.parse()?;
    if let Some(id) = id {
        validate_uuid("id", id)?;
    }
    let payload = parse_payload(payload)?;

    let saved = db
        .inner()
        .form_submissions()
        .save(id.map(str::trim), form_type, &payload)
        .await?;

    FormSubmissionResponse::try_from(saved)
}

/// Gets a stored submission.
pub async fn get_form_submission(db: &DbState, id: &str) -> Result<FormSubmissionResponse, ApiError> {
    debug!(id = %id, "get_form_submission command");

    let submission = db
        .inner()
        .form_submissions()
        .get_by_id(id)
        .await?
        .ok_or_else(|| CoreError::SubmissionNotFound(id.to_string()))?;

    FormSubmissionResponse::try_from(submission)
}

/// Logs a print of a stored submission.
pub async fn print_form(db: &DbState, id: &str) -> Result<PrintResponse, ApiError> {
    debug!(id = %id, "print_form command");

    let submissions = db.inner().form_submissions();
    let log = submissions.log_print(id).await?;
    let print_count = submissions.print_logs(id).await?.len();

    info!(reference_no = %log.reference_no, print_count, "Form printed");

    Ok(PrintResponse {
        submission_id: log.submission_id,
        form_type: log.form_type,
        reference_no: log.reference_no,
        printed_at: log.printed_at,
        print_count,
    })
}
