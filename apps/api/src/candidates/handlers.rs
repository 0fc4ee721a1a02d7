//! Axum route handlers for the Candidates API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use ats_api::ranking::normalizer::normalize_skills;

use crate::candidates::repository::{self, NewCandidate};
use crate::candidates::search::{rank_by_similarity, searchable_text, BooleanQuery, SearchHit};
use crate::embeddings::embed_or_skip;
use crate::errors::AppError;
use crate::extraction::{extract_resume, ExtractionMethod, ResumeExtraction};
use crate::models::candidate::CandidateRow;
use crate::state::AppState;

const DEFAULT_LIST_LIMIT: i64 = 100;
const MAX_LIST_LIMIT: i64 = 1000;
const DEFAULT_SEARCH_LIMIT: usize = 10;
const UNKNOWN_NAME: &str = "Unknown";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Any structured field sent alongside the resume text wins over extraction.
#[derive(Debug, Deserialize)]
pub struct CreateCandidateRequest {
    pub resume_text: String,
    #[serde(flatten)]
    pub overrides: ResumeExtraction,
}

#[derive(Debug, Serialize)]
pub struct CreateCandidateResponse {
    pub candidate: CandidateRow,
    pub extraction_method: ExtractionMethod,
    pub embedded: bool,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CandidateListResponse {
    pub total: usize,
    pub candidates: Vec<CandidateRow>,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    pub limit: Option<usize>,
    #[serde(default = "default_use_boolean_search")]
    pub use_boolean_search: bool,
}

fn default_use_boolean_search() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    /// `None` when keyword filtering was skipped.
    pub parsed_query: Option<BooleanQuery>,
    pub semantic: bool,
    pub total_matches: usize,
    pub candidates: Vec<SearchHit>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/candidates
///
/// Extracts structured fields from the resume text, embeds it and stores the candidate.
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    Json(request): Json<CreateCandidateRequest>,
) -> Result<(StatusCode, Json<CreateCandidateResponse>), AppError> {
    let resume_text = request.resume_text.trim();
    if resume_text.is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }
    if let Some(years) = request.overrides.total_experience {
        if !years.is_finite() || years < 0.0 {
            return Err(AppError::Validation(
                "total_experience must be a non-negative number".to_string(),
            ));
        }
    }

    let (extracted, extraction_method) = extract_resume(resume_text, state.llm.as_ref()).await;
    let fields = request.overrides.or_else(extracted);

    let primary_skills: Vec<String> = normalize_skills(&fields.primary_skills).into_iter().collect();
    let secondary_skills: Vec<String> = normalize_skills(&fields.secondary_skills)
        .into_iter()
        .filter(|s| !primary_skills.contains(s))
        .collect();

    let embedding = embed_or_skip(state.embedder.as_ref(), resume_text).await;

    let candidate = repository::insert_candidate(
        &state.db,
        NewCandidate {
            name: fields.name.as_deref().unwrap_or(UNKNOWN_NAME),
            email: fields.email.as_deref(),
            phone: fields.phone.as_deref(),
            total_experience: fields.total_experience.unwrap_or(0.0),
            primary_skills: &primary_skills,
            secondary_skills: &secondary_skills,
            domain: fields.domain.as_deref(),
            sub_domain: fields.sub_domain.as_deref(),
            education: fields.education.as_deref(),
            current_company: fields.current_company.as_deref(),
            current_designation: fields.current_designation.as_deref(),
            current_location: fields.current_location.as_deref(),
            resume_summary: fields.resume_summary.as_deref(),
            resume_text,
            embedding: embedding.as_ref().map(|(v, _)| v.as_slice()),
            embedding_model: embedding.as_ref().map(|(_, m)| m.as_str()),
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateCandidateResponse {
            candidate,
            extraction_method,
            embedded: embedding.is_some(),
        }),
    ))
}

/// GET /api/v1/candidates?limit=
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<CandidateListResponse>, AppError> {
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    if !(1..=MAX_LIST_LIMIT).contains(&limit) {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {MAX_LIST_LIMIT}"
        )));
    }

    let candidates = repository::list_active_candidates(&state.db, limit).await?;
    Ok(Json(CandidateListResponse {
        total: candidates.len(),
        candidates,
    }))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CandidateRow>, AppError> {
    repository::get_candidate(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))
}

/// DELETE /api/v1/candidates/:id
pub async fn handle_archive_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if repository::archive_candidate(&state.db, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Candidate {id} not found")))
    }
}

/// POST /api/v1/candidates/search
///
/// Keyword filtering over candidate metadata, ordered by similarity between the
/// query and resume embeddings when an embedder is configured.
pub async fn handle_search_candidates(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let limit = request.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    if limit == 0 {
        return Err(AppError::Validation("limit must be at least 1".to_string()));
    }

    let query_embedding = embed_or_skip(state.embedder.as_ref(), &request.query)
        .await
        .map(|(vector, _)| vector);

    // Without a query vector the keyword filter is the only signal left.
    let apply_boolean = request.use_boolean_search || query_embedding.is_none();
    let parsed_query = apply_boolean.then(|| BooleanQuery::parse(&request.query));

    let candidates = repository::load_rankable_candidates(&state.db).await?;
    let scanned = candidates.len();

    let matches: Vec<CandidateRow> = candidates
        .into_iter()
        .filter(|c| {
            parsed_query
                .as_ref()
                .map_or(true, |q| q.matches(&searchable_text(c)))
        })
        .collect();
    let total_matches = matches.len();

    let mut hits = rank_by_similarity(matches, query_embedding.as_deref());
    hits.truncate(limit);

    info!(
        "Search '{}' matched {total_matches} of {scanned} candidates (boolean: {apply_boolean}, semantic: {})",
        request.query,
        query_embedding.is_some()
    );

    Ok(Json(SearchResponse {
        query: request.query,
        parsed_query,
        semantic: query_embedding.is_some(),
        total_matches,
        candidates: hits,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_flattens_overrides() {
        let json = r#"{
            "resume_text": "Asha Rao\nPython developer",
            "name": "Asha R.",
            "primary_skills": ["Python", "JS"],
            "total_experience": 3.5
        }"#;
        let request: CreateCandidateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.resume_text, "Asha Rao\nPython developer");
        assert_eq!(request.overrides.name.as_deref(), Some("Asha R."));
        assert_eq!(request.overrides.total_experience, Some(3.5));
        assert_eq!(request.overrides.primary_skills.len(), 2);
        assert!(request.overrides.email.is_none());
    }

    #[test]
    fn test_search_request_defaults_to_empty_query() {
        let request: SearchRequest = serde_json::from_str("{}").unwrap();
        assert!(request.query.is_empty());
        assert!(request.limit.is_none());
        assert!(request.use_boolean_search);

        let request: SearchRequest =
            serde_json::from_str(r#"{"query": "python", "use_boolean_search": false}"#).unwrap();
        assert!(!request.use_boolean_search);
    }
}
