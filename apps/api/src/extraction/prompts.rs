// LLM prompt constants for resume and job description extraction.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Characters of resume text sent to the model.
pub const RESUME_PROMPT_MAX_CHARS: usize = 16_000;
/// Characters of job description text sent to the model.
pub const JD_PROMPT_MAX_CHARS: usize = 12_000;

/// System prompt for resume extraction. Append `JSON_ONLY_RULES`.
pub const RESUME_EXTRACT_SYSTEM: &str =
    "You are an expert technical recruiter extracting structured candidate data from resumes.";

/// Resume extraction prompt template.
/// Replace: {no_guessing}, {resume_text}
pub const RESUME_EXTRACT_PROMPT_TEMPLATE: &str = r#"Extract structured candidate information from the resume below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "name": "Asha Rao",
  "email": "asha@example.com",
  "phone": "+91 98765 43210",
  "total_experience": 6.5,
  "primary_skills": ["python", "django", "postgresql"],
  "secondary_skills": ["docker", "aws"],
  "domain": "Fintech",
  "sub_domain": "Payments",
  "education": "Masters",
  "current_company": "Acme Payments",
  "current_designation": "Senior Backend Engineer",
  "current_location": "Pune",
  "resume_summary": "Backend engineer with six years building payment systems."
}

Rules:
- total_experience: total professional years as a number. Prefer an explicit statement
  ("6+ years of experience"); otherwise sum the employment date ranges, merging overlaps.
- primary_skills: the core technical skills the candidate has used in their roles (max 15).
- secondary_skills: tools and skills mentioned but not central (max 15).
- Use lowercase skill names in their common spelling ("javascript", "kubernetes", "postgresql").
- education: the highest degree only, one of "PhD", "Masters", "Bachelors", "Diploma", "High School".
- domain: the industry the candidate works in (e.g. "Fintech", "Healthcare", "Retail", "Information Technology").
- resume_summary: at most two sentences.
- The name is usually in the first lines of the resume. Never return a section header
  ("Education", "Experience", "Skills") or a degree as the name.

{no_guessing}

RESUME:
{resume_text}"#;

/// System prompt for job description extraction. Append `JSON_ONLY_RULES`.
pub const JD_EXTRACT_SYSTEM: &str =
    "You are an expert job description analyst extracting hiring requirements.";

/// Job description extraction prompt template.
/// Replace: {no_guessing}, {jd_text}
pub const JD_EXTRACT_PROMPT_TEMPLATE: &str = r#"Extract the hiring requirements from the job description below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "job_title": "Senior Backend Engineer",
  "required_skills": ["python", "django", "postgresql"],
  "preferred_skills": ["kubernetes", "aws"],
  "min_experience": 3,
  "max_experience": 7,
  "domain": "Fintech",
  "education_required": "Bachelors"
}

Rules:
- required_skills: skills stated as required or must-have.
- preferred_skills: skills stated as preferred, nice-to-have, bonus or "a plus".
- Use lowercase skill names in their common spelling.
- min_experience / max_experience: years. "5+ years" means min 5 and max null.
  "3-5 years" means min 3 and max 5. No mention means min 0 and max null.
- education_required: one of "PhD", "Masters", "Bachelors", "Diploma", "High School", or null.

{no_guessing}

JOB DESCRIPTION:
{jd_text}"#;
