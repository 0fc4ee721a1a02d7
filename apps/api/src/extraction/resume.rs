//! Resume extraction — structured candidate fields from plain resume text.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::extraction::heuristics;
use crate::extraction::ExtractionMethod;
use crate::extraction::prompts::{
    RESUME_EXTRACT_PROMPT_TEMPLATE, RESUME_EXTRACT_SYSTEM, RESUME_PROMPT_MAX_CHARS,
};
use crate::llm_client::prompts::{truncate_for_prompt, JSON_ONLY_RULES, NO_GUESSING_INSTRUCTION};
use crate::llm_client::{LlmClient, LlmError};

/// Everything we try to learn from a resume. All fields are optional: the
/// model may omit any of them and the heuristics fill what they can.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeExtraction {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub total_experience: Option<f64>,
    pub primary_skills: Vec<String>,
    pub secondary_skills: Vec<String>,
    pub domain: Option<String>,
    pub sub_domain: Option<String>,
    pub education: Option<String>,
    pub current_company: Option<String>,
    pub current_designation: Option<String>,
    pub current_location: Option<String>,
    pub resume_summary: Option<String>,
}

impl ResumeExtraction {
    /// Fills every empty field from `fallback`. Present values are kept.
    pub fn or_else(mut self, fallback: ResumeExtraction) -> Self {
        fn fill<T>(slot: &mut Option<T>, other: Option<T>) {
            if slot.is_none() {
                *slot = other;
            }
        }

        fill(&mut self.name, fallback.name);
        fill(&mut self.email, fallback.email);
        fill(&mut self.phone, fallback.phone);
        fill(&mut self.total_experience, fallback.total_experience);
        fill(&mut self.domain, fallback.domain);
        fill(&mut self.sub_domain, fallback.sub_domain);
        fill(&mut self.education, fallback.education);
        fill(&mut self.current_company, fallback.current_company);
        fill(&mut self.current_designation, fallback.current_designation);
        fill(&mut self.current_location, fallback.current_location);
        fill(&mut self.resume_summary, fallback.resume_summary);
        if self.primary_skills.is_empty() {
            self.primary_skills = fallback.primary_skills;
        }
        if self.secondary_skills.is_empty() {
            self.secondary_skills = fallback.secondary_skills;
        }
        self
    }

    /// Drops blank strings and impossible experience values.
    fn sanitized(mut self) -> Self {
        fn blank_to_none(slot: &mut Option<String>) {
            if slot.as_deref().is_some_and(|s| {
                let s = s.trim();
                s.is_empty() || s.eq_ignore_ascii_case("unknown") || s.eq_ignore_ascii_case("null")
            }) {
                *slot = None;
            }
        }

        for slot in [
            &mut self.name,
            &mut self.email,
            &mut self.phone,
            &mut self.domain,
            &mut self.sub_domain,
            &mut self.education,
            &mut self.current_company,
            &mut self.current_designation,
            &mut self.current_location,
            &mut self.resume_summary,
        ] {
            blank_to_none(slot);
        }

        self.total_experience = self
            .total_experience
            .filter(|years| years.is_finite() && *years >= 0.0);
        self
    }
}

/// Pure text heuristics. Never fails.
pub fn heuristic_resume_extraction(text: &str) -> ResumeExtraction {
    let skills = heuristics::extract_skills(text);
    ResumeExtraction {
        name: heuristics::extract_name(text),
        email: heuristics::extract_email(text),
        phone: heuristics::extract_phone(text),
        total_experience: heuristics::extract_total_experience(text),
        domain: heuristics::extract_domain(text, &skills),
        education: heuristics::extract_education(text),
        current_location: heuristics::extract_location(text),
        primary_skills: skills.into_iter().collect(),
        ..Default::default()
    }
}

async fn llm_resume_extraction(text: &str, llm: &LlmClient) -> Result<ResumeExtraction, LlmError> {
    let prompt = RESUME_EXTRACT_PROMPT_TEMPLATE
        .replace("{no_guessing}", NO_GUESSING_INSTRUCTION)
        .replace(
            "{resume_text}",
            truncate_for_prompt(text, RESUME_PROMPT_MAX_CHARS),
        );
    let system = format!("{RESUME_EXTRACT_SYSTEM} {JSON_ONLY_RULES}");
    llm.call_json::<ResumeExtraction>(&prompt, &system).await
}

/// Extracts candidate fields, preferring the LLM and falling back to heuristics
/// when no client is configured or the call fails. Gaps in the LLM output are
/// filled from the heuristics too. Also reports which extractor was used.
pub async fn extract_resume(
    text: &str,
    llm: Option<&LlmClient>,
) -> (ResumeExtraction, ExtractionMethod) {
    let heuristic = heuristic_resume_extraction(text);

    let Some(llm) = llm else {
        debug!("No LLM configured, using heuristic resume extraction");
        return (heuristic, ExtractionMethod::Heuristic);
    };

    match llm_resume_extraction(text, llm).await {
        Ok(extracted) => (extracted.sanitized().or_else(heuristic), ExtractionMethod::Llm),
        Err(e) => {
            warn!("LLM resume extraction failed, using heuristics: {e}");
            (heuristic, ExtractionMethod::Heuristic)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Ravi Kumar
ravi@example.com
Location: Bengaluru

Data engineer with 4 years of experience in retail analytics.
Skills: Python, Spark, SQL, Airflow
B.Tech, 2016";

    #[test]
    fn test_heuristic_resume_extraction_fields() {
        let extracted = heuristic_resume_extraction(RESUME);
        assert_eq!(extracted.name.as_deref(), Some("Ravi Kumar"));
        assert_eq!(extracted.email.as_deref(), Some("ravi@example.com"));
        assert_eq!(extracted.total_experience, Some(4.0));
        assert_eq!(extracted.domain.as_deref(), Some("Retail"));
        assert_eq!(extracted.education.as_deref(), Some("Bachelors"));
        assert_eq!(extracted.current_location.as_deref(), Some("Bengaluru"));
        assert!(extracted.primary_skills.contains(&"spark".to_string()));
        assert!(extracted.primary_skills.contains(&"sql".to_string()));
    }

    #[test]
    fn test_llm_payload_with_missing_fields_deserializes() {
        let json = r#"{"name": "Ravi Kumar", "primary_skills": ["python"], "total_experience": 4}"#;
        let extracted: ResumeExtraction = serde_json::from_str(json).unwrap();
        assert_eq!(extracted.name.as_deref(), Some("Ravi Kumar"));
        assert_eq!(extracted.total_experience, Some(4.0));
        assert!(extracted.secondary_skills.is_empty());
        assert!(extracted.email.is_none());
    }

    #[test]
    fn test_or_else_keeps_present_values_and_fills_gaps() {
        let llm = ResumeExtraction {
            name: Some("R. Kumar".to_string()),
            primary_skills: vec!["python".to_string()],
            ..Default::default()
        };
        let merged = llm.or_else(heuristic_resume_extraction(RESUME));
        assert_eq!(merged.name.as_deref(), Some("R. Kumar"));
        assert_eq!(merged.primary_skills, vec!["python".to_string()]);
        assert_eq!(merged.email.as_deref(), Some("ravi@example.com"));
        assert_eq!(merged.total_experience, Some(4.0));
    }

    #[test]
    fn test_sanitized_drops_placeholders_and_bad_years() {
        let extracted = ResumeExtraction {
            name: Some("Unknown".to_string()),
            domain: Some("  ".to_string()),
            total_experience: Some(-3.0),
            education: Some("Masters".to_string()),
            ..Default::default()
        }
        .sanitized();
        assert!(extracted.name.is_none());
        assert!(extracted.domain.is_none());
        assert!(extracted.total_experience.is_none());
        assert_eq!(extracted.education.as_deref(), Some("Masters"));
    }

    #[tokio::test]
    async fn test_extract_resume_without_llm_uses_heuristics() {
        let (extracted, method) = extract_resume(RESUME, None).await;
        assert_eq!(extracted, heuristic_resume_extraction(RESUME));
        assert_eq!(method, ExtractionMethod::Heuristic);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_llm_call_reports_heuristic_method() {
        // Nothing listens on the discard port, so every attempt fails.
        let llm = LlmClient::new(
            "test-key".to_string(),
            "http://127.0.0.1:9/v1",
            "gpt-4o-mini".to_string(),
        )
        .unwrap();
        let (extracted, method) = extract_resume(RESUME, Some(&llm)).await;
        assert_eq!(method, ExtractionMethod::Heuristic);
        assert_eq!(extracted, heuristic_resume_extraction(RESUME));
    }
}
