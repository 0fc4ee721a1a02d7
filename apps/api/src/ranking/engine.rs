//! Aggregator / Ranker — combines the four weighted sub-scores and the
//! semantic bonus, sorts, assigns positions and truncates to top-K.
//!
//! The engine is immutable after construction: `rank` borrows its inputs,
//! touches no shared state and returns a fresh list, so one `Arc<RankingEngine>`
//! can serve any number of concurrent requests.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::ranking::config::{RankingConfig, RankingError, Weights};
use crate::ranking::domain::score_domain;
use crate::ranking::education::score_education;
use crate::ranking::experience::score_experience;
use crate::ranking::semantic::semantic_bonus;
use crate::ranking::skills::score_skills;
use crate::ranking::types::{CandidateProfile, JobRequirement, RankingOutcome, ScoreBreakdown};

#[derive(Debug, Clone)]
pub struct RankingEngine {
    config: RankingConfig,
}

impl RankingEngine {
    /// Validates the configuration once; a built engine always holds valid weights.
    pub fn new(config: RankingConfig) -> Result<Self, RankingError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Same policies, different weights. Used for per-request weight overrides.
    pub fn with_weights(&self, weights: Weights) -> Result<Self, RankingError> {
        Self::new(RankingConfig {
            weights,
            ..self.config
        })
    }

    /// Scores one candidate. Returns `None` for malformed records.
    pub fn score(
        &self,
        candidate: &CandidateProfile,
        requirement: &JobRequirement,
    ) -> Option<ScoreBreakdown> {
        let years = candidate.total_experience_years;
        if !years.is_finite() || years < 0.0 {
            return None;
        }

        let config = &self.config;
        let weights = &config.weights;

        let skills = score_skills(
            &candidate.all_skills(),
            &requirement.required_skills,
            &requirement.preferred_skills,
            &config.skills,
        );
        let (experience_score, experience_tier) = score_experience(
            years,
            requirement.min_experience,
            requirement.max_experience,
            &config.experience,
        );
        let (domain_score, domain_tier) =
            score_domain(&candidate.domain, &requirement.domain, &config.domain);
        let education_score = score_education(
            &candidate.education_level,
            &requirement.education_required,
            &config.education,
        );

        let weighted = weights.skills * skills.score
            + weights.experience * experience_score
            + weights.domain * domain_score
            + weights.education * education_score;

        let bonus = semantic_bonus(
            usable_embedding(candidate.embedding.as_deref()),
            usable_embedding(requirement.embedding.as_deref()),
            config.semantic_bonus_cap,
        );

        Some(ScoreBreakdown {
            candidate_id: candidate.id,
            candidate_name: candidate.name.clone(),
            skills_score: skills.score,
            experience_score,
            domain_score,
            education_score,
            matched_skills: skills.matched,
            missing_skills: skills.missing,
            experience_tier,
            domain_tier,
            semantic_bonus: bonus,
            total_score: (weighted + bonus).clamp(0.0, 100.0),
            rank_position: 0,
        })
    }

    /// Ranks candidates against one requirement.
    ///
    /// Output length is `min(valid candidates, top_k)`; positions are 1-based and
    /// ties keep input order. Malformed candidates are skipped and reported.
    pub fn rank(
        &self,
        candidates: &[CandidateProfile],
        requirement: &JobRequirement,
        top_k: usize,
    ) -> Result<RankingOutcome, RankingError> {
        if top_k == 0 {
            return Err(RankingError::InvalidTopK);
        }

        let mut skipped: Vec<Uuid> = Vec::new();
        let mut ranked: Vec<ScoreBreakdown> = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            match self.score(candidate, requirement) {
                Some(breakdown) => ranked.push(breakdown),
                None => {
                    warn!(
                        candidate_id = %candidate.id,
                        years = candidate.total_experience_years,
                        "skipping malformed candidate"
                    );
                    skipped.push(candidate.id);
                }
            }
        }

        // `sort_by` is stable, so equal totals keep input order.
        ranked.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
        for (index, breakdown) in ranked.iter_mut().enumerate() {
            breakdown.rank_position = index + 1;
        }
        ranked.truncate(top_k);

        match ranked.first() {
            Some(top) => info!(
                job_id = %requirement.job_id,
                evaluated = candidates.len(),
                returned = ranked.len(),
                skipped = skipped.len(),
                top_score = top.total_score,
                "ranking complete"
            ),
            None => info!(job_id = %requirement.job_id, "ranking complete, no candidates ranked"),
        }

        Ok(RankingOutcome { ranked, skipped })
    }
}

/// Treats vectors containing NaN/inf as absent.
fn usable_embedding(embedding: Option<&[f32]>) -> Option<&[f32]> {
    match embedding {
        Some(v) if !v.is_empty() && v.iter().all(|x| x.is_finite()) => Some(v),
        Some(_) => {
            debug!("ignoring empty or non-finite embedding");
            None
        }
        None => None,
    }
}

/// Standalone entry point: builds a default-policy engine with the given
/// weights and bonus cap, then ranks.
pub fn rank(
    candidates: &[CandidateProfile],
    requirement: &JobRequirement,
    weights: Weights,
    top_k: usize,
    semantic_bonus_cap: f64,
) -> Result<Vec<ScoreBreakdown>, RankingError> {
    let engine = RankingEngine::new(RankingConfig::with_weights(weights, semantic_bonus_cap))?;
    Ok(engine.rank(candidates, requirement, top_k)?.ranked)
}
