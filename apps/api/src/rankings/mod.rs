// Ranking runs: resolve the job, rank stored candidates, keep the eligible ones
// and append them to the ranking history.

pub mod handlers;
pub mod repository;

use ats_api::ranking::ScoreBreakdown;

/// Stored with every history row so results from different scoring rules stay distinguishable.
pub const ALGORITHM_VERSION: &str = "weighted-4f-semantic-v1";

/// A ranked candidate is kept when the total reaches the threshold or when it
/// matches at least one requested skill.
pub fn is_eligible(breakdown: &ScoreBreakdown, min_match_percent: f64) -> bool {
    breakdown.total_score >= min_match_percent || !breakdown.matched_skills.is_empty()
}

/// Keeps order and the original rank positions.
pub fn filter_eligible(ranked: Vec<ScoreBreakdown>, min_match_percent: f64) -> Vec<ScoreBreakdown> {
    ranked
        .into_iter()
        .filter(|b| is_eligible(b, min_match_percent))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use uuid::Uuid;

    use super::*;
    use ats_api::ranking::Tier;

    fn breakdown(total: f64, matched: &[&str], position: usize) -> ScoreBreakdown {
        ScoreBreakdown {
            candidate_id: Uuid::new_v4(),
            candidate_name: format!("c{position}"),
            skills_score: 0.0,
            experience_score: 0.0,
            domain_score: 0.0,
            education_score: 0.0,
            matched_skills: matched.iter().map(|s| s.to_string()).collect(),
            missing_skills: BTreeSet::new(),
            experience_tier: Tier::Low,
            domain_tier: Tier::Low,
            semantic_bonus: 0.0,
            total_score: total,
            rank_position: position,
        }
    }

    #[test]
    fn test_eligible_by_score_threshold() {
        assert!(is_eligible(&breakdown(50.0, &[], 1), 50.0));
        assert!(!is_eligible(&breakdown(49.9, &[], 1), 50.0));
    }

    #[test]
    fn test_eligible_by_single_matched_skill() {
        assert!(is_eligible(&breakdown(12.0, &["sql"], 1), 50.0));
    }

    #[test]
    fn test_filter_keeps_order_and_positions() {
        let ranked = vec![
            breakdown(80.0, &["python"], 1),
            breakdown(45.0, &[], 2),
            breakdown(30.0, &["sql"], 3),
        ];
        let eligible = filter_eligible(ranked, 50.0);
        let positions: Vec<usize> = eligible.iter().map(|b| b.rank_position).collect();
        assert_eq!(positions, vec![1, 3]);
    }

    #[test]
    fn test_zero_threshold_keeps_everyone() {
        let ranked = vec![breakdown(0.0, &[], 1), breakdown(10.0, &[], 2)];
        assert_eq!(filter_eligible(ranked, 0.0).len(), 2);
    }
}
