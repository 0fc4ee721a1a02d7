use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A candidate as seen by the ranking engine. Built from a `CandidateRow`;
/// the engine only ever borrows it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: Uuid,
    pub name: String,
    pub total_experience_years: f64,
    pub primary_skills: BTreeSet<String>,
    pub secondary_skills: BTreeSet<String>,
    pub domain: String,
    pub sub_domain: Option<String>,
    pub education_level: String,
    pub embedding: Option<Vec<f32>>,
}

impl CandidateProfile {
    /// Primary and secondary skills merged into one set.
    pub fn all_skills(&self) -> BTreeSet<String> {
        self.primary_skills
            .union(&self.secondary_skills)
            .cloned()
            .collect()
    }
}

/// The structured criteria a set of candidates is ranked against.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobRequirement {
    pub job_id: String,
    pub required_skills: BTreeSet<String>,
    pub preferred_skills: BTreeSet<String>,
    pub min_experience: f64,
    /// `None` means no upper bound.
    pub max_experience: Option<f64>,
    pub domain: String,
    pub education_required: String,
    #[serde(skip_serializing)]
    pub embedding: Option<Vec<f32>>,
}

/// Coarse qualitative bucket for a sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    High,
    Medium,
    Low,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::High => "High",
            Tier::Medium => "Medium",
            Tier::Low => "Low",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per (candidate, job) match detail. One ranking call yields an immutable
/// list of these, ordered by `rank_position`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub candidate_id: Uuid,
    pub candidate_name: String,
    pub skills_score: f64,
    pub experience_score: f64,
    pub domain_score: f64,
    pub education_score: f64,
    pub matched_skills: BTreeSet<String>,
    pub missing_skills: BTreeSet<String>,
    pub experience_tier: Tier,
    pub domain_tier: Tier,
    pub semantic_bonus: f64,
    pub total_score: f64,
    pub rank_position: usize,
}

/// Result of a ranking call: the ranked list plus the ids of candidates
/// that were rejected as malformed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RankingOutcome {
    pub ranked: Vec<ScoreBreakdown>,
    pub skipped: Vec<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_skills_merges_primary_and_secondary() {
        let profile = CandidateProfile {
            id: Uuid::new_v4(),
            name: "A".to_string(),
            total_experience_years: 1.0,
            primary_skills: ["rust".to_string(), "sql".to_string()].into(),
            secondary_skills: ["sql".to_string(), "docker".to_string()].into(),
            domain: String::new(),
            sub_domain: None,
            education_level: String::new(),
            embedding: None,
        };
        let all = profile.all_skills();
        assert_eq!(all.len(), 3);
        assert!(all.contains("docker"));
    }

    #[test]
    fn test_tier_serde_uses_variant_names() {
        assert_eq!(serde_json::to_string(&Tier::High).unwrap(), r#""High""#);
        let tier: Tier = serde_json::from_str(r#""Low""#).unwrap();
        assert_eq!(tier, Tier::Low);
        assert_eq!(Tier::Medium.to_string(), "Medium");
    }
}
