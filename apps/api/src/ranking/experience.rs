use crate::ranking::config::ExperiencePolicy;
use crate::ranking::types::Tier;

/// Scores candidate years against the requested range.
///
/// - inside `[min, max]` (or `>= min` with no max) → 100, High
/// - under `min` → proportional `100 * years / min`, Medium or Low by ratio
/// - over `max` → small attrition penalty down to `over_floor`, Medium
///
/// Callers reject negative or non-finite years before getting here.
pub fn score_experience(
    years: f64,
    min_experience: f64,
    max_experience: Option<f64>,
    policy: &ExperiencePolicy,
) -> (f64, Tier) {
    let min = min_experience.max(0.0);

    if years < min {
        let ratio = years / min;
        let tier = if ratio >= policy.under_medium_ratio {
            Tier::Medium
        } else {
            Tier::Low
        };
        return ((100.0 * ratio).clamp(0.0, 100.0), tier);
    }

    match max_experience {
        Some(max) if years > max => {
            let penalty = policy.over_penalty_per_year * (years - max);
            let score = (100.0 - penalty).max(policy.over_floor).clamp(0.0, 100.0);
            (score, Tier::Medium)
        }
        _ => (100.0, Tier::High),
    }
}
