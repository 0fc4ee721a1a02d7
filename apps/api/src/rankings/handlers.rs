//! Axum route handlers for the Rankings API.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use ats_api::ranking::{CandidateProfile, JobRequirement, RankingEngine, ScoreBreakdown, Weights};

use crate::candidates::repository::load_rankable_candidates;
use crate::config::Config;
use crate::errors::AppError;
use crate::jobs::service::{prepare_job, validate_job_reference};
use crate::jobs::RequirementFields;
use crate::models::candidate::CandidateRow;
use crate::rankings::repository::insert_ranking_history;
use crate::rankings::{filter_eligible, ALGORITHM_VERSION};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct RankRequest {
    pub job_id: Option<String>,
    pub job_description: Option<String>,
    /// Structured requirement fields; each one overrides the stored job and extraction.
    #[serde(flatten)]
    pub fields: RequirementFields,
    pub weights: Option<Weights>,
    pub top_k: Option<usize>,
    pub min_match_percent: Option<f64>,
}

/// Request parameters after validation, with config defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RankParams {
    pub top_k: usize,
    pub min_match_percent: f64,
}

impl RankRequest {
    /// Everything that can be checked without touching the database or a provider.
    pub fn validate(&self, config: &Config) -> Result<RankParams, AppError> {
        validate_job_reference(self.job_id.as_deref(), self.job_description.as_deref())?;
        self.fields.validate()?;

        let top_k = self.top_k.unwrap_or(config.default_top_k);
        if top_k == 0 {
            return Err(AppError::Validation("top_k must be at least 1".to_string()));
        }

        let min_match_percent = self.min_match_percent.unwrap_or(config.min_match_percent);
        if !(0.0..=100.0).contains(&min_match_percent) {
            return Err(AppError::Validation(
                "min_match_percent must be within [0, 100]".to_string(),
            ));
        }

        Ok(RankParams {
            top_k,
            min_match_percent,
        })
    }

    /// The shared engine, or a copy carrying the requested weights.
    pub fn engine(&self, shared: &Arc<RankingEngine>) -> Result<Arc<RankingEngine>, AppError> {
        match self.weights {
            Some(weights) => Ok(Arc::new(shared.with_weights(weights)?)),
            None => Ok(Arc::clone(shared)),
        }
    }
}

/// A score breakdown plus the contact fields a recruiter needs to act on it.
#[derive(Debug, Serialize)]
pub struct RankedProfile {
    #[serde(flatten)]
    pub score: ScoreBreakdown,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub total_experience: f64,
    pub current_company: Option<String>,
    pub current_designation: Option<String>,
    pub current_location: Option<String>,
}

impl RankedProfile {
    fn new(score: ScoreBreakdown, row: Option<&CandidateRow>) -> Self {
        RankedProfile {
            email: row.and_then(|r| r.email.clone()),
            phone: row.and_then(|r| r.phone.clone()),
            total_experience: row.map_or(0.0, |r| r.total_experience),
            current_company: row.and_then(|r| r.current_company.clone()),
            current_designation: row.and_then(|r| r.current_designation.clone()),
            current_location: row.and_then(|r| r.current_location.clone()),
            score,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub ranking_id: Uuid,
    pub job_id: String,
    pub algorithm_version: &'static str,
    pub requirement: JobRequirement,
    pub weights: Weights,
    pub top_k: usize,
    pub min_match_percent: f64,
    pub total_candidates: usize,
    pub ranked_count: usize,
    pub eligible_count: usize,
    pub skipped_candidates: Vec<Uuid>,
    pub extracted_from_text: bool,
    pub ranked_profiles: Vec<RankedProfile>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/rankings
///
/// Resolves the job requirement, ranks every active candidate, keeps the
/// eligible ones and records them in the ranking history.
pub async fn handle_rank_candidates(
    State(state): State<AppState>,
    Json(request): Json<RankRequest>,
) -> Result<Json<RankResponse>, AppError> {
    let params = request.validate(&state.config)?;
    let engine = request.engine(&state.engine)?;

    let prepared = prepare_job(
        &state,
        request.job_id.as_deref(),
        request.job_description.as_deref(),
        request.fields.clone(),
    )
    .await?;
    let requirement = prepared.requirement;

    let rows = load_rankable_candidates(&state.db).await?;
    let profiles: Vec<CandidateProfile> = rows.iter().map(CandidateRow::to_profile).collect();

    let outcome = engine.rank(&profiles, &requirement, params.top_k)?;
    let ranked_count = outcome.ranked.len();
    let eligible = filter_eligible(outcome.ranked, params.min_match_percent);

    let ranking_id = Uuid::new_v4();
    if !eligible.is_empty() {
        insert_ranking_history(
            &state.db,
            ranking_id,
            &requirement.job_id,
            &eligible,
            ALGORITHM_VERSION,
        )
        .await?;
    }

    info!(
        "Ranking {ranking_id} for job {}: {} eligible of {ranked_count} ranked ({} candidates, {} skipped)",
        requirement.job_id,
        eligible.len(),
        rows.len(),
        outcome.skipped.len()
    );

    let by_id: HashMap<Uuid, &CandidateRow> = rows.iter().map(|r| (r.id, r)).collect();
    let eligible_count = eligible.len();
    let ranked_profiles = eligible
        .into_iter()
        .map(|score| {
            let row = by_id.get(&score.candidate_id).copied();
            RankedProfile::new(score, row)
        })
        .collect();

    Ok(Json(RankResponse {
        ranking_id,
        job_id: requirement.job_id.clone(),
        algorithm_version: ALGORITHM_VERSION,
        weights: engine.config().weights,
        top_k: params.top_k,
        min_match_percent: params.min_match_percent,
        total_candidates: rows.len(),
        ranked_count,
        eligible_count,
        skipped_candidates: outcome.skipped,
        extracted_from_text: prepared.extracted_from_text,
        requirement,
        ranked_profiles,
    }))
}
