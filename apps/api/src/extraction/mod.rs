// Structured extraction from resume and job description text.
// LLM first, deterministic heuristics as fallback and gap filler.

pub mod heuristics;
pub mod job;
pub mod prompts;
pub mod resume;

use serde::Serialize;

pub use job::{extract_jd, JdExtraction};
pub use resume::{extract_resume, ResumeExtraction};

/// Which extractor produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMethod {
    Llm,
    Heuristic,
}
