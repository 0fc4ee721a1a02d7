//! Typed ranking configuration. Validated once when a `RankingEngine` is built.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Allowed drift of the weight sum away from 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-3;

#[derive(Debug, Error, PartialEq)]
pub enum RankingError {
    #[error("ranking weights must sum to 1.0, got {sum:.4}")]
    InvalidWeights { sum: f64 },

    #[error("ranking weight '{name}' must be a non-negative number, got {value}")]
    NegativeWeight { name: &'static str, value: f64 },

    #[error("top_k must be at least 1")]
    InvalidTopK,

    #[error("semantic bonus cap must be within [0, 100], got {0}")]
    InvalidBonusCap(f64),

    #[error("invalid ranking policy: {0}")]
    InvalidPolicy(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub skills: f64,
    pub experience: f64,
    pub domain: f64,
    pub education: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            skills: 0.4,
            experience: 0.3,
            domain: 0.2,
            education: 0.1,
        }
    }
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.skills + self.experience + self.domain + self.education
    }

    /// Fails fast: weights are never silently renormalized.
    pub fn validate(&self) -> Result<(), RankingError> {
        for (name, value) in [
            ("skills", self.skills),
            ("experience", self.experience),
            ("domain", self.domain),
            ("education", self.education),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RankingError::NegativeWeight { name, value });
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(RankingError::InvalidWeights { sum });
        }
        Ok(())
    }
}

/// Split between required and preferred skill coverage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillsPolicy {
    pub required_weight: f64,
}

impl Default for SkillsPolicy {
    fn default() -> Self {
        Self {
            required_weight: 0.8,
        }
    }
}

/// Decay constants for experience outside the requested range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperiencePolicy {
    /// Under-qualified candidates at or above this years/min ratio are Medium, else Low.
    pub under_medium_ratio: f64,
    /// Points lost per year above `max_experience`.
    pub over_penalty_per_year: f64,
    /// Lowest score an over-qualified candidate can get.
    pub over_floor: f64,
}

impl Default for ExperiencePolicy {
    fn default() -> Self {
        Self {
            under_medium_ratio: 0.7,
            over_penalty_per_year: 2.0,
            over_floor: 70.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainPolicy {
    pub partial_score: f64,
    pub related_score: f64,
    pub mismatch_score: f64,
    pub unspecified_score: f64,
}

impl Default for DomainPolicy {
    fn default() -> Self {
        Self {
            partial_score: 80.0,
            related_score: 70.0,
            mismatch_score: 30.0,
            unspecified_score: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EducationPolicy {
    pub one_below_score: f64,
    pub far_below_score: f64,
    pub unknown_score: f64,
}

impl Default for EducationPolicy {
    fn default() -> Self {
        Self {
            one_below_score: 70.0,
            far_below_score: 40.0,
            unknown_score: 50.0,
        }
    }
}

/// Everything the engine needs besides the candidates and the requirement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RankingConfig {
    pub weights: Weights,
    pub semantic_bonus_cap: f64,
    pub skills: SkillsPolicy,
    pub experience: ExperiencePolicy,
    pub domain: DomainPolicy,
    pub education: EducationPolicy,
}

impl RankingConfig {
    pub const DEFAULT_SEMANTIC_BONUS_CAP: f64 = 5.0;

    pub fn with_weights(weights: Weights, semantic_bonus_cap: f64) -> Self {
        Self {
            weights,
            semantic_bonus_cap,
            ..Self::defaults()
        }
    }

    pub fn defaults() -> Self {
        Self {
            semantic_bonus_cap: Self::DEFAULT_SEMANTIC_BONUS_CAP,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), RankingError> {
        self.weights.validate()?;

        if !(0.0..=100.0).contains(&self.semantic_bonus_cap) {
            return Err(RankingError::InvalidBonusCap(self.semantic_bonus_cap));
        }
        if !(0.0..=1.0).contains(&self.skills.required_weight) {
            return Err(RankingError::InvalidPolicy(format!(
                "skills.required_weight must be within [0, 1], got {}",
                self.skills.required_weight
            )));
        }
        if !(0.0..=1.0).contains(&self.experience.under_medium_ratio) {
            return Err(RankingError::InvalidPolicy(format!(
                "experience.under_medium_ratio must be within [0, 1], got {}",
                self.experience.under_medium_ratio
            )));
        }
        let penalty = self.experience.over_penalty_per_year;
        if !penalty.is_finite() || penalty < 0.0 {
            return Err(RankingError::InvalidPolicy(
                "experience.over_penalty_per_year must be non-negative".to_string(),
            ));
        }

        let scores = [
            ("experience.over_floor", self.experience.over_floor),
            ("domain.partial_score", self.domain.partial_score),
            ("domain.related_score", self.domain.related_score),
            ("domain.mismatch_score", self.domain.mismatch_score),
            ("domain.unspecified_score", self.domain.unspecified_score),
            ("education.one_below_score", self.education.one_below_score),
            ("education.far_below_score", self.education.far_below_score),
            ("education.unknown_score", self.education.unknown_score),
        ];
        for (name, value) in scores {
            if !(0.0..=100.0).contains(&value) {
                return Err(RankingError::InvalidPolicy(format!(
                    "{name} must be within [0, 100], got {value}"
                )));
            }
        }
        Ok(())
    }
}
