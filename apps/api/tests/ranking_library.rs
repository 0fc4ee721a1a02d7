use std::collections::BTreeSet;

use ats_api::ranking::normalizer::normalize_skills;
use ats_api::ranking::{rank, CandidateProfile, JobRequirement, Tier, Weights};
use uuid::Uuid;

fn candidate(n: u128, name: &str, skills: &[&str], years: f64, domain: &str) -> CandidateProfile {
    CandidateProfile {
        id: Uuid::from_u128(n),
        name: name.to_string(),
        total_experience_years: years,
        primary_skills: normalize_skills(skills),
        secondary_skills: BTreeSet::new(),
        domain: domain.to_string(),
        sub_domain: None,
        education_level: "Bachelors".to_string(),
        embedding: None,
    }
}

fn requirement() -> JobRequirement {
    JobRequirement {
        job_id: "JD_payments".to_string(),
        required_skills: normalize_skills(["Python", "Postgres"]),
        preferred_skills: normalize_skills(["K8s"]),
        min_experience: 3.0,
        max_experience: Some(8.0),
        domain: "Fintech".to_string(),
        education_required: "Bachelors".to_string(),
        embedding: None,
    }
}

#[test]
fn test_rank_entry_point_orders_and_positions() {
    let candidates = vec![
        candidate(1, "Retail Analyst", &["Excel"], 1.0, "Retail"),
        candidate(2, "Payments Engineer", &["python", "PostgreSQL", "kubernetes"], 5.0, "fintech"),
    ];

    let ranked = rank(&candidates, &requirement(), Weights::default(), 10, 5.0).unwrap();

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].candidate_name, "Payments Engineer");
    assert_eq!(ranked[0].rank_position, 1);
    assert!((ranked[0].total_score - 100.0).abs() < 1e-9);
    assert_eq!(ranked[0].experience_tier, Tier::High);
    assert_eq!(ranked[1].rank_position, 2);
    assert_eq!(ranked[1].skills_score, 0.0);
}

#[test]
fn test_rank_entry_point_rejects_bad_weights() {
    let weights = Weights {
        skills: 0.5,
        experience: 0.5,
        domain: 0.5,
        education: 0.5,
    };
    assert!(rank(&[], &requirement(), weights, 5, 5.0).is_err());
}
