use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted ranking result joined with the candidate's contact details.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RankingHistoryRow {
    pub id: Uuid,
    pub ranking_id: Uuid,
    pub job_id: String,
    pub candidate_id: Uuid,
    pub candidate_name: String,
    pub candidate_email: Option<String>,
    pub total_score: f64,
    pub skills_score: f64,
    pub experience_score: f64,
    pub domain_score: f64,
    pub education_score: f64,
    pub semantic_bonus: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub experience_tier: String,
    pub domain_tier: String,
    pub rank_position: i32,
    pub algorithm_version: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Statistics {
    pub total_candidates: i64,
    pub total_jobs: i64,
    pub total_rankings: i64,
    pub avg_experience: f64,
}
