use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobDescriptionRow {
    pub job_id: String,
    pub job_title: Option<String>,
    pub job_description: String,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub min_experience: f64,
    pub max_experience: Option<f64>,
    pub domain: Option<String>,
    pub education_required: Option<String>,
    #[serde(skip_serializing, default)]
    pub embedding: Option<Vec<f32>>,
    pub embedding_model: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
