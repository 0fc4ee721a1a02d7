//! Job description extraction — hiring requirements from plain JD text.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::extraction::heuristics;
use crate::extraction::prompts::{JD_EXTRACT_PROMPT_TEMPLATE, JD_EXTRACT_SYSTEM, JD_PROMPT_MAX_CHARS};
use crate::llm_client::prompts::{truncate_for_prompt, JSON_ONLY_RULES, NO_GUESSING_INSTRUCTION};
use crate::llm_client::{LlmClient, LlmError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JdExtraction {
    pub job_title: Option<String>,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub min_experience: Option<f64>,
    pub max_experience: Option<f64>,
    pub domain: Option<String>,
    pub education_required: Option<String>,
}

impl JdExtraction {
    fn or_else(mut self, fallback: JdExtraction) -> Self {
        if self.job_title.is_none() {
            self.job_title = fallback.job_title;
        }
        if self.required_skills.is_empty() && self.preferred_skills.is_empty() {
            self.required_skills = fallback.required_skills;
            self.preferred_skills = fallback.preferred_skills;
        }
        if self.min_experience.is_none() && self.max_experience.is_none() {
            self.min_experience = fallback.min_experience;
            self.max_experience = fallback.max_experience;
        }
        if self.domain.is_none() {
            self.domain = fallback.domain;
        }
        if self.education_required.is_none() {
            self.education_required = fallback.education_required;
        }
        self
    }

    /// Drops negative or non-finite years and an inverted range's upper bound.
    fn sanitized(mut self) -> Self {
        let valid = |y: &f64| y.is_finite() && *y >= 0.0;
        self.min_experience = self.min_experience.filter(valid);
        self.max_experience = self.max_experience.filter(valid);
        if let (Some(min), Some(max)) = (self.min_experience, self.max_experience) {
            if max < min {
                warn!("Extracted experience range {min}-{max} is inverted, dropping the upper bound");
                self.max_experience = None;
            }
        }
        for slot in [&mut self.job_title, &mut self.domain, &mut self.education_required] {
            if slot.as_deref().is_some_and(|s| s.trim().is_empty()) {
                *slot = None;
            }
        }
        self
    }
}

pub fn heuristic_jd_extraction(text: &str) -> JdExtraction {
    let (required, preferred) = heuristics::extract_jd_skills(text);
    let (min_experience, max_experience) = heuristics::extract_experience_range(text);
    let all_skills = required.union(&preferred).cloned().collect();

    JdExtraction {
        job_title: heuristics::extract_job_title(text),
        domain: heuristics::extract_domain(text, &all_skills),
        education_required: heuristics::extract_education(text),
        required_skills: required.into_iter().collect(),
        preferred_skills: preferred.into_iter().collect(),
        min_experience: Some(min_experience),
        max_experience,
    }
}

async fn llm_jd_extraction(text: &str, llm: &LlmClient) -> Result<JdExtraction, LlmError> {
    let prompt = JD_EXTRACT_PROMPT_TEMPLATE
        .replace("{no_guessing}", NO_GUESSING_INSTRUCTION)
        .replace("{jd_text}", truncate_for_prompt(text, JD_PROMPT_MAX_CHARS));
    let system = format!("{JD_EXTRACT_SYSTEM} {JSON_ONLY_RULES}");
    llm.call_json::<JdExtraction>(&prompt, &system).await
}

/// Extracts hiring requirements, preferring the LLM and falling back to heuristics.
pub async fn extract_jd(text: &str, llm: Option<&LlmClient>) -> JdExtraction {
    let heuristic = heuristic_jd_extraction(text);

    let Some(llm) = llm else {
        debug!("No LLM configured, using heuristic JD extraction");
        return heuristic;
    };

    match llm_jd_extraction(text, llm).await {
        Ok(extracted) => extracted.sanitized().or_else(heuristic),
        Err(e) => {
            warn!("LLM JD extraction failed, using heuristics: {e}");
            heuristic
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FINTECH_JD: &str = "Senior Backend Engineer
We build payments infrastructure for fintech companies.
Requirements: Python, Django, PostgreSQL. 3-6 years of experience.
Nice to have: Kubernetes, AWS
Bachelor's degree in Computer Science";

    #[test]
    fn test_heuristic_jd_extraction_fields() {
        let extracted = heuristic_jd_extraction(FINTECH_JD);
        assert_eq!(extracted.job_title.as_deref(), Some("Senior Backend Engineer"));
        assert_eq!(
            extracted.required_skills,
            vec!["django".to_string(), "postgresql".to_string(), "python".to_string()]
        );
        assert_eq!(
            extracted.preferred_skills,
            vec!["aws".to_string(), "kubernetes".to_string()]
        );
        assert_eq!(extracted.min_experience, Some(3.0));
        assert_eq!(extracted.max_experience, Some(6.0));
        assert_eq!(extracted.domain.as_deref(), Some("Fintech"));
        assert_eq!(extracted.education_required.as_deref(), Some("Bachelors"));
    }

    #[test]
    fn test_sanitized_drops_inverted_upper_bound() {
        let extracted = JdExtraction {
            min_experience: Some(5.0),
            max_experience: Some(2.0),
            ..Default::default()
        }
        .sanitized();
        assert_eq!(extracted.min_experience, Some(5.0));
        assert_eq!(extracted.max_experience, None);
    }

    #[test]
    fn test_or_else_fills_experience_only_when_absent() {
        let fallback = heuristic_jd_extraction(FINTECH_JD);
        let llm = JdExtraction {
            min_experience: Some(4.0),
            ..Default::default()
        };
        let merged = llm.or_else(fallback);
        assert_eq!(merged.min_experience, Some(4.0));
        assert_eq!(merged.max_experience, None);
        assert!(!merged.required_skills.is_empty());
    }

    #[tokio::test]
    async fn test_extract_jd_without_llm_uses_heuristics() {
        let extracted = extract_jd(FINTECH_JD, None).await;
        assert_eq!(extracted, heuristic_jd_extraction(FINTECH_JD));
    }
}
