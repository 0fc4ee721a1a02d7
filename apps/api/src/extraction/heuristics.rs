//! Deterministic text extraction used when no LLM is configured or the LLM call fails.
//!
//! Everything here is a pure function of the input text.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use ats_api::ranking::education::{education_level, level_label};
use ats_api::ranking::normalizer::lookup_skill;

/// Longest skill phrase, in words, tried against the alias table.
const MAX_SKILL_WORDS: usize = 3;

/// Aliases that are ordinary English words in prose. Only matched in list form.
const AMBIGUOUS_IN_PROSE: &[&str] = &["go", "rest", "ts", "py", "dl", "node", "swift", "excel"];

/// Experience statements beyond this are treated as noise.
const MAX_PLAUSIBLE_YEARS: f64 = 50.0;

/// Keyword → domain label. First hit in table order wins.
const DOMAIN_KEYWORDS: &[(&str, &str)] = &[
    ("fintech", "Fintech"),
    ("payments", "Fintech"),
    ("banking", "Banking"),
    ("insurance", "Insurance"),
    ("financial services", "Finance"),
    ("healthcare", "Healthcare"),
    ("hospital", "Healthcare"),
    ("pharma", "Pharma"),
    ("e-commerce", "E-commerce"),
    ("ecommerce", "E-commerce"),
    ("retail", "Retail"),
    ("telecom", "Telecom"),
    ("manufacturing", "Manufacturing"),
    ("automotive", "Automotive"),
    ("edtech", "Education"),
    ("logistics", "Logistics"),
];

/// Domain assumed when no industry keyword is present but technical skills are.
const TECH_DOMAIN: &str = "Information Technology";

const SECTION_HEADERS: &[&str] = &[
    "resume",
    "curriculum vitae",
    "cv",
    "education",
    "experience",
    "work experience",
    "skills",
    "contact",
    "objective",
    "summary",
    "professional summary",
    "profile",
    "qualifications",
    "projects",
    "certifications",
    "references",
];

static YEARS_OF_EXPERIENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,2}(?:\.\d)?)\s*\+?\s*(?:years?|yrs?)(?:\s+of)?\s+(?:\w+\s+)?(?:experience|exp)\b")
        .expect("years-of-experience regex")
});

static EXPERIENCE_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)experience\s*[:\-]?\s*(\d{1,2}(?:\.\d)?)\s*\+?\s*(?:years?|yrs?)")
        .expect("experience-label regex")
});

static APPROX_YEARS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:around|over|nearly|almost|about)\s+(\d{1,2})\s*\+?\s*(?:years?|yrs?)")
        .expect("approximate-years regex")
});

static YEAR_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,2})\s*(?:-|–|to)\s*(\d{1,2})\s*\+?\s*(?:years?|yrs?)")
        .expect("year-range regex")
});

static MIN_YEARS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:(?:at\s+least|minimum(?:\s+of)?)\s+(\d{1,2})|(\d{1,2})\s*\+)\s*(?:years?|yrs?)")
        .expect("minimum-years regex")
});

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("email regex")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\d[\d \t().-]{8,}\d").expect("phone regex"));

/// Digit count of a plausible phone number, country code included.
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 10..=15;

static LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*(?:current\s+location|location|based\s+in)\s*[:\-]\s*([A-Za-z][A-Za-z ,]*?)\s*$")
        .expect("location regex")
});

/// Splits text into tokens that keep skill punctuation (`c++`, `c#`, `node.js`, `ci/cd`).
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| {
        c.is_whitespace() || matches!(c, ',' | ';' | ':' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '"' | '!' | '?' | '•')
    })
    .map(|t| t.trim_matches(|c: char| c == '.' || c == '\'' || c == '-'))
    .filter(|t| !t.is_empty())
    .map(str::to_lowercase)
    .collect()
}

/// Known skills mentioned anywhere in the text, in canonical form.
///
/// Greedy longest match over word n-grams, so "spring boot" wins over "spring".
pub fn extract_skills(text: &str) -> BTreeSet<String> {
    let tokens = tokenize(text);
    let mut found = BTreeSet::new();
    let mut i = 0;

    while i < tokens.len() {
        let mut advanced = false;
        for n in (1..=MAX_SKILL_WORDS.min(tokens.len() - i)).rev() {
            let phrase = tokens[i..i + n].join(" ");
            if n == 1 && AMBIGUOUS_IN_PROSE.contains(&phrase.as_str()) {
                continue;
            }
            if let Some(canonical) = lookup_skill(&phrase) {
                found.insert(canonical.to_string());
                i += n;
                advanced = true;
                break;
            }
        }
        if !advanced {
            i += 1;
        }
    }

    found
}

fn plausible_years(raw: &str) -> Option<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|y| (0.0..=MAX_PLAUSIBLE_YEARS).contains(y))
}

/// Total years of experience stated in a resume ("6+ years of experience",
/// "Experience: 4 years", "over 10 years"). `None` when nothing is stated.
pub fn extract_total_experience(text: &str) -> Option<f64> {
    [&*YEARS_OF_EXPERIENCE_RE, &*EXPERIENCE_LABEL_RE, &*APPROX_YEARS_RE]
        .into_iter()
        .find_map(|re| {
            re.captures(text)
                .and_then(|c| c.get(1))
                .and_then(|m| plausible_years(m.as_str()))
        })
}

/// Experience bounds in a job description.
/// "3-5 years" → (3, Some(5)); "5+ years" / "at least 5 years" → (5, None);
/// nothing stated → (0, None).
pub fn extract_experience_range(text: &str) -> (f64, Option<f64>) {
    if let Some(caps) = YEAR_RANGE_RE.captures(text) {
        let min = caps.get(1).and_then(|m| plausible_years(m.as_str()));
        let max = caps.get(2).and_then(|m| plausible_years(m.as_str()));
        if let (Some(min), Some(max)) = (min, max) {
            if min <= max {
                return (min, Some(max));
            }
        }
    }

    if let Some(caps) = MIN_YEARS_RE.captures(text) {
        if let Some(min) = caps
            .get(1)
            .or_else(|| caps.get(2))
            .and_then(|m| plausible_years(m.as_str()))
        {
            return (min, None);
        }
    }

    match extract_total_experience(text) {
        Some(min) => (min, None),
        None => (0.0, None),
    }
}

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

/// Date ranges like "2019 - 2021" also match the pattern, so candidates are
/// filtered by digit count.
pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_RE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .find(|candidate| {
            PHONE_DIGITS.contains(&candidate.chars().filter(char::is_ascii_digit).count())
        })
        .map(str::to_string)
}

pub fn extract_location(text: &str) -> Option<String> {
    LOCATION_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().trim_end_matches(',').to_string())
        .filter(|s| !s.is_empty())
}

/// Highest degree mentioned, as a canonical label.
pub fn extract_education(text: &str) -> Option<String> {
    education_level(text).map(|level| level_label(level).to_string())
}

/// Industry keyword from the text, falling back to IT when technical skills are present.
pub fn extract_domain(text: &str, skills: &BTreeSet<String>) -> Option<String> {
    let lower = text.to_lowercase();
    DOMAIN_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, label)| label.to_string())
        .or_else(|| (!skills.is_empty()).then(|| TECH_DOMAIN.to_string()))
}

/// The candidate's name is expected in the header: the first short line made
/// only of alphabetic words that is not a section header.
pub fn extract_name(text: &str) -> Option<String> {
    text.lines()
        .take(5)
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .find(|line| {
            let words: Vec<&str> = line.split(' ').collect();
            (2..=4).contains(&words.len())
                && words.iter().all(|w| {
                    w.chars()
                        .all(|c| c.is_alphabetic() || c == '.' || c == '-' || c == '\'')
                })
                && !SECTION_HEADERS.contains(&line.to_lowercase().as_str())
                && education_level(line).is_none()
        })
}

/// First non-empty line of a job description, when it reads like a title.
pub fn extract_job_title(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .filter(|line| line.split_whitespace().count() <= 10 && !line.ends_with('.'))
        .map(str::to_string)
}

/// Splits a job description into (required, preferred) skill sets.
///
/// Lines after a "preferred" / "nice to have" marker, or containing "a plus" / "bonus",
/// feed the preferred set; everything else feeds the required set. A skill that
/// appears in both is required.
pub fn extract_jd_skills(text: &str) -> (BTreeSet<String>, BTreeSet<String>) {
    let mut required = BTreeSet::new();
    let mut preferred = BTreeSet::new();
    let mut in_preferred_section = false;

    for line in text.lines() {
        let lower = line.to_lowercase();
        let preferred_marker = ["preferred", "nice to have", "nice-to-have", "good to have"]
            .iter()
            .any(|m| lower.contains(m));
        let required_marker = ["required", "requirements", "must have", "must-have"]
            .iter()
            .any(|m| lower.contains(m));

        if preferred_marker {
            in_preferred_section = true;
        } else if required_marker {
            in_preferred_section = false;
        }

        let skills = extract_skills(line);
        let is_preferred_line = in_preferred_section
            || lower.contains("a plus")
            || lower.contains("bonus")
            || lower.contains("nice to have");

        if is_preferred_line {
            preferred.extend(skills);
        } else {
            required.extend(skills);
        }
    }

    preferred.retain(|s| !required.contains(s));
    (required, preferred)
}
