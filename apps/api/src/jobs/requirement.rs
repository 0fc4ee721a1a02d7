//! Requirement resolution — merges caller-supplied fields, a stored job row and
//! text extraction into one `JobRequirement`, field by field, in that priority.

use serde::{Deserialize, Serialize};
use ats_api::ranking::normalizer::normalize_skills;
use ats_api::ranking::JobRequirement;

use crate::errors::AppError;
use crate::extraction::JdExtraction;
use crate::models::job::JobDescriptionRow;

/// Structured job fields where `None` means "not given, look further".
/// An explicit empty skill list is a value and stops the fallthrough.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequirementFields {
    pub job_title: Option<String>,
    pub required_skills: Option<Vec<String>>,
    pub preferred_skills: Option<Vec<String>>,
    pub min_experience: Option<f64>,
    pub max_experience: Option<f64>,
    pub domain: Option<String>,
    pub education_required: Option<String>,
}

impl RequirementFields {
    /// Rejects values no source could make valid. Runs before any I/O.
    pub fn validate(&self) -> Result<(), AppError> {
        for (name, value) in [
            ("min_experience", self.min_experience),
            ("max_experience", self.max_experience),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(AppError::Validation(format!(
                        "{name} must be a non-negative number"
                    )));
                }
            }
        }
        if let (Some(min), Some(max)) = (self.min_experience, self.max_experience) {
            if max < min {
                return Err(AppError::Validation(format!(
                    "max_experience ({max}) must not be below min_experience ({min})"
                )));
            }
        }
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.job_title.is_some()
            && self.required_skills.is_some()
            && self.preferred_skills.is_some()
            && self.min_experience.is_some()
            && self.domain.is_some()
            && self.education_required.is_some()
    }

    /// Fills every field still `None` from `fallback`.
    ///
    /// Experience bounds travel as a pair: they come from whichever layer
    /// states either of them, so a range is never stitched from two sources.
    pub fn or_else(self, fallback: RequirementFields) -> Self {
        let experience_given = self.min_experience.is_some() || self.max_experience.is_some();
        let (min_experience, max_experience) = if experience_given {
            (self.min_experience, self.max_experience)
        } else {
            (fallback.min_experience, fallback.max_experience)
        };

        RequirementFields {
            job_title: self.job_title.or(fallback.job_title),
            required_skills: self.required_skills.or(fallback.required_skills),
            preferred_skills: self.preferred_skills.or(fallback.preferred_skills),
            min_experience,
            max_experience,
            domain: self.domain.or(fallback.domain),
            education_required: self.education_required.or(fallback.education_required),
        }
    }

    /// Final requirement handed to the engine. Skills are normalized, a skill
    /// listed as both required and preferred counts as required.
    pub fn into_requirement(self, job_id: String, embedding: Option<Vec<f32>>) -> JobRequirement {
        let required_skills = normalize_skills(self.required_skills.unwrap_or_default());
        let mut preferred_skills = normalize_skills(self.preferred_skills.unwrap_or_default());
        preferred_skills.retain(|s| !required_skills.contains(s));

        JobRequirement {
            job_id,
            required_skills,
            preferred_skills,
            min_experience: self.min_experience.unwrap_or(0.0),
            max_experience: self.max_experience,
            domain: self.domain.unwrap_or_default(),
            education_required: self.education_required.unwrap_or_default(),
            embedding,
        }
    }
}

impl From<&JobDescriptionRow> for RequirementFields {
    fn from(row: &JobDescriptionRow) -> Self {
        RequirementFields {
            job_title: row.job_title.clone(),
            required_skills: Some(row.required_skills.clone()),
            preferred_skills: Some(row.preferred_skills.clone()),
            min_experience: Some(row.min_experience),
            max_experience: row.max_experience,
            domain: row.domain.clone(),
            education_required: row.education_required.clone(),
        }
    }
}

impl From<JdExtraction> for RequirementFields {
    fn from(extracted: JdExtraction) -> Self {
        RequirementFields {
            job_title: extracted.job_title,
            required_skills: Some(extracted.required_skills),
            preferred_skills: Some(extracted.preferred_skills),
            min_experience: extracted.min_experience,
            max_experience: extracted.max_experience,
            domain: extracted.domain,
            education_required: extracted.education_required,
        }
    }
}
