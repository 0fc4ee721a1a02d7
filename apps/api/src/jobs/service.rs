//! Turns a job reference and/or description into a stored, ranked-against `JobRequirement`.

use tracing::{debug, info};
use ats_api::ranking::JobRequirement;

use crate::embeddings::embed_or_skip;
use crate::errors::AppError;
use crate::extraction::extract_jd;
use crate::jobs::repository::{self, generate_job_id, JobUpsert};
use crate::jobs::RequirementFields;
use crate::models::job::JobDescriptionRow;
use crate::state::AppState;

const MAX_JOB_ID_LEN: usize = 128;

pub struct PreparedJob {
    pub requirement: JobRequirement,
    pub row: JobDescriptionRow,
    pub extracted_from_text: bool,
}

/// Checks that do not need the database. Call before any I/O.
pub fn validate_job_reference(
    job_id: Option<&str>,
    job_description: Option<&str>,
) -> Result<(), AppError> {
    if let Some(id) = job_id {
        let id = id.trim();
        if id.is_empty() || id.len() > MAX_JOB_ID_LEN {
            return Err(AppError::Validation(format!(
                "job_id must be 1 to {MAX_JOB_ID_LEN} characters"
            )));
        }
    }
    let has_description = job_description.is_some_and(|d| !d.trim().is_empty());
    if job_id.is_none() && !has_description {
        return Err(AppError::Validation(
            "Either job_description or job_id is required".to_string(),
        ));
    }
    Ok(())
}

/// Resolves the requirement (request fields → stored row → extraction),
/// embeds the description when needed and upserts the job row.
pub async fn prepare_job(
    state: &AppState,
    job_id: Option<&str>,
    job_description: Option<&str>,
    fields: RequirementFields,
) -> Result<PreparedJob, AppError> {
    validate_job_reference(job_id, job_description)?;
    fields.validate()?;

    let job_id = job_id.map(str::trim);
    let description = job_description.map(str::trim).filter(|d| !d.is_empty());

    let stored = match job_id {
        Some(id) => repository::get_job(&state.db, id).await?,
        None => None,
    };

    let text = match (description, stored.as_ref()) {
        (Some(d), _) => d.to_string(),
        (None, Some(row)) => row.job_description.clone(),
        (None, None) => {
            return Err(AppError::NotFound(format!(
                "Job {} not found and no job_description given",
                job_id.unwrap_or_default()
            )))
        }
    };

    // The stored row already reflects an extraction of the same text.
    let text_changed = stored.as_ref().map_or(true, |row| row.job_description != text);

    let mut resolved = fields;
    if let Some(row) = stored.as_ref() {
        resolved = resolved.or_else(row.into());
    }

    let mut extracted_from_text = false;
    if !resolved.is_complete() && text_changed {
        let extracted = extract_jd(&text, state.llm.as_ref()).await;
        resolved = resolved.or_else(extracted.into());
        extracted_from_text = true;
    }

    let reusable_embedding = stored
        .as_ref()
        .filter(|_| !text_changed)
        .and_then(|row| row.embedding.clone().zip(row.embedding_model.clone()));
    let embedding = match reusable_embedding {
        Some(stored_embedding) => {
            debug!("Reusing stored job embedding");
            Some(stored_embedding)
        }
        None => embed_or_skip(state.embedder.as_ref(), &text).await,
    };
    let (embedding, embedding_model) = match embedding {
        Some((vector, model)) => (Some(vector), Some(model)),
        None => (None, None),
    };

    let job_title = resolved.job_title.clone();
    let job_id = job_id.map(str::to_string).unwrap_or_else(generate_job_id);
    let requirement = resolved.into_requirement(job_id, embedding);

    let row = repository::upsert_job(
        &state.db,
        JobUpsert {
            requirement: &requirement,
            job_title: job_title.as_deref(),
            job_description: &text,
            embedding_model: embedding_model.as_deref(),
        },
    )
    .await?;

    info!(
        "Prepared job {} (stored: {}, extracted: {extracted_from_text}, embedded: {})",
        requirement.job_id,
        stored.is_some(),
        requirement.embedding.is_some()
    );

    Ok(PreparedJob {
        requirement,
        row,
        extracted_from_text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_job_reference_requires_one_source() {
        assert!(matches!(
            validate_job_reference(None, None),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            validate_job_reference(None, Some("   ")),
            Err(AppError::Validation(_))
        ));
        assert!(validate_job_reference(Some("JD_1"), None).is_ok());
        assert!(validate_job_reference(None, Some("Python developer")).is_ok());
    }

    #[test]
    fn test_validate_job_reference_rejects_bad_ids() {
        assert!(validate_job_reference(Some("  "), Some("text")).is_err());
        let long = "x".repeat(MAX_JOB_ID_LEN + 1);
        assert!(validate_job_reference(Some(&long), Some("text")).is_err());
    }
}
