use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use ats_api::ranking::normalizer::normalize_skills;
use ats_api::ranking::CandidateProfile;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub total_experience: f64,
    pub primary_skills: Vec<String>,
    pub secondary_skills: Vec<String>,
    pub domain: Option<String>,
    pub sub_domain: Option<String>,
    pub education: Option<String>,
    pub current_company: Option<String>,
    pub current_designation: Option<String>,
    pub current_location: Option<String>,
    pub resume_summary: Option<String>,
    #[serde(skip_serializing, default)]
    pub resume_text: String,
    #[serde(skip_serializing, default)]
    pub embedding: Option<Vec<f32>>,
    pub embedding_model: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CandidateRow {
    /// Read-only snapshot handed to the ranking engine.
    pub fn to_profile(&self) -> CandidateProfile {
        CandidateProfile {
            id: self.id,
            name: self.name.clone(),
            total_experience_years: self.total_experience,
            primary_skills: normalize_skills(&self.primary_skills),
            secondary_skills: normalize_skills(&self.secondary_skills),
            domain: self.domain.clone().unwrap_or_default(),
            sub_domain: self.sub_domain.clone(),
            education_level: self.education.clone().unwrap_or_default(),
            embedding: self.embedding.clone(),
        }
    }
}
