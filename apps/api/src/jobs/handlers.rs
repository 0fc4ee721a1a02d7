//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::jobs::repository::get_job;
use crate::jobs::service::prepare_job;
use crate::jobs::RequirementFields;
use crate::models::job::JobDescriptionRow;
use crate::models::ranking::RankingHistoryRow;
use crate::rankings::repository::list_job_rankings;
use crate::state::AppState;

const DEFAULT_HISTORY_LIMIT: i64 = 50;
const MAX_HISTORY_LIMIT: i64 = 1000;

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub job_id: Option<String>,
    pub job_description: String,
    #[serde(flatten)]
    pub fields: RequirementFields,
}

#[derive(Debug, Serialize)]
pub struct CreateJobResponse {
    pub job: JobDescriptionRow,
    pub extracted_from_text: bool,
    pub embedded: bool,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct JobRankingsResponse {
    pub job_id: String,
    pub total: usize,
    pub rankings: Vec<RankingHistoryRow>,
}

/// POST /api/v1/jobs
///
/// Stores a job description. Structured fields missing from the request are
/// extracted from the text.
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(request): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<CreateJobResponse>), AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let prepared = prepare_job(
        &state,
        request.job_id.as_deref(),
        Some(&request.job_description),
        request.fields,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateJobResponse {
            embedded: prepared.requirement.embedding.is_some(),
            extracted_from_text: prepared.extracted_from_text,
            job: prepared.row,
        }),
    ))
}

/// GET /api/v1/jobs/:job_id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<JobDescriptionRow>, AppError> {
    get_job(&state.db, &job_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}

/// GET /api/v1/jobs/:job_id/rankings?limit=
pub async fn handle_job_rankings(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<JobRankingsResponse>, AppError> {
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    if !(1..=MAX_HISTORY_LIMIT).contains(&limit) {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {MAX_HISTORY_LIMIT}"
        )));
    }

    if get_job(&state.db, &job_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }

    let rankings = list_job_rankings(&state.db, &job_id, limit).await?;
    Ok(Json(JobRankingsResponse {
        total: rankings.len(),
        job_id,
        rankings,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_job_request_parses_optional_fields() {
        let json = r#"{
            "job_description": "Senior Backend Engineer. Python required.",
            "preferred_skills": [],
            "max_experience": 8
        }"#;
        let request: CreateJobRequest = serde_json::from_str(json).unwrap();
        assert!(request.job_id.is_none());
        assert_eq!(request.fields.preferred_skills, Some(vec![]));
        assert_eq!(request.fields.max_experience, Some(8.0));
        assert!(request.fields.required_skills.is_none());
    }
}
