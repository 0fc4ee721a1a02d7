use crate::ranking::config::DomainPolicy;
use crate::ranking::types::Tier;

/// Groups of industries treated as adjacent. Membership in the same group
/// gives a related-domain match.
const RELATED_DOMAINS: &[&[&str]] = &[
    &["finance", "banking", "fintech", "financial services", "insurance"],
    &["technology", "software", "it", "tech", "saas", "fintech"],
    &["healthcare", "medical", "pharma", "health", "hospital"],
    &["retail", "e-commerce", "ecommerce", "commerce", "sales"],
    &["telecom", "telecommunications", "networking"],
    &["manufacturing", "automotive", "industrial"],
    &["education", "edtech", "e-learning"],
];

fn are_related(a: &str, b: &str) -> bool {
    RELATED_DOMAINS
        .iter()
        .any(|group| group.contains(&a) && group.contains(&b))
}

/// Domain mismatch is a soft signal: the lowest outcome is `mismatch_score`, never zero.
pub fn score_domain(candidate: &str, required: &str, policy: &DomainPolicy) -> (f64, Tier) {
    let candidate = candidate.trim().to_lowercase();
    let required = required.trim().to_lowercase();

    if candidate.is_empty() || required.is_empty() {
        return (policy.unspecified_score, Tier::Medium);
    }
    if candidate == required {
        return (100.0, Tier::High);
    }
    if candidate.contains(&required) || required.contains(&candidate) {
        return (policy.partial_score, Tier::Medium);
    }
    if are_related(&candidate, &required) {
        return (policy.related_score, Tier::Medium);
    }
    (policy.mismatch_score, Tier::Low)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_case_insensitive() {
        assert_eq!(
            score_domain("FinTech", " fintech ", &DomainPolicy::default()),
            (100.0, Tier::High)
        );
    }

    #[test]
    fn test_related_domains_are_medium() {
        assert_eq!(
            score_domain("banking", "fintech", &DomainPolicy::default()),
            (70.0, Tier::Medium)
        );
        assert_eq!(
            score_domain("pharma", "healthcare", &DomainPolicy::default()),
            (70.0, Tier::Medium)
        );
    }

    #[test]
    fn test_containment_is_partial() {
        assert_eq!(
            score_domain("retail banking", "banking", &DomainPolicy::default()),
            (80.0, Tier::Medium)
        );
    }

    #[test]
    fn test_unrelated_is_low_not_zero() {
        assert_eq!(
            score_domain("retail", "fintech", &DomainPolicy::default()),
            (30.0, Tier::Low)
        );
    }

    #[test]
    fn test_unspecified_is_neutral() {
        assert_eq!(
            score_domain("", "fintech", &DomainPolicy::default()),
            (50.0, Tier::Medium)
        );
        assert_eq!(
            score_domain("retail", "  ", &DomainPolicy::default()),
            (50.0, Tier::Medium)
        );
    }
}
