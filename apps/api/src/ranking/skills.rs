use std::collections::BTreeSet;

use crate::ranking::config::SkillsPolicy;

#[derive(Debug, Clone, PartialEq)]
pub struct SkillsMatch {
    pub score: f64,
    pub matched: BTreeSet<String>,
    pub missing: BTreeSet<String>,
}

/// Required-skill coverage weighted above preferred-skill coverage.
///
/// The required/preferred split is renormalized over the sets that are
/// present: a job with only required skills is scored purely on required
/// coverage, and a job with no skill requirements at all scores 100.
/// All inputs are expected to be normalized already.
pub fn score_skills(
    candidate: &BTreeSet<String>,
    required: &BTreeSet<String>,
    preferred: &BTreeSet<String>,
    policy: &SkillsPolicy,
) -> SkillsMatch {
    let wanted: BTreeSet<String> = required.union(preferred).cloned().collect();
    let matched: BTreeSet<String> = wanted.intersection(candidate).cloned().collect();
    let missing: BTreeSet<String> = wanted.difference(candidate).cloned().collect();

    if wanted.is_empty() {
        return SkillsMatch {
            score: 100.0,
            matched,
            missing,
        };
    }

    let required_ratio = coverage(required, candidate);
    let preferred_ratio = coverage(preferred, candidate);

    let (w_req, w_pref) = match (required.is_empty(), preferred.is_empty()) {
        (false, true) => (1.0, 0.0),
        (true, false) => (0.0, 1.0),
        _ => (policy.required_weight, 1.0 - policy.required_weight),
    };

    let score = (100.0 * (w_req * required_ratio + w_pref * preferred_ratio)).clamp(0.0, 100.0);

    SkillsMatch {
        score,
        matched,
        missing,
    }
}

fn coverage(wanted: &BTreeSet<String>, have: &BTreeSet<String>) -> f64 {
    wanted.intersection(have).count() as f64 / wanted.len().max(1) as f64
}
