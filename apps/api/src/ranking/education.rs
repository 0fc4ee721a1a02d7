use crate::ranking::config::EducationPolicy;

/// Keyword → ordinal level. Higher is more advanced; the highest keyword
/// found in a string wins.
const EDUCATION_LEVELS: &[(&str, u8)] = &[
    ("phd", 5),
    ("ph.d", 5),
    ("doctorate", 5),
    ("doctoral", 5),
    ("masters", 4),
    ("master", 4),
    ("mba", 4),
    ("m.tech", 4),
    ("m.sc", 4),
    ("msc", 4),
    ("bachelors", 3),
    ("bachelor", 3),
    ("b.tech", 3),
    ("b.sc", 3),
    ("bsc", 3),
    ("b.e", 3),
    ("diploma", 2),
    ("associate", 2),
    ("high school", 1),
    ("secondary", 1),
];

/// Ordinal level of a free-text education string, `None` if unrecognized.
pub fn education_level(text: &str) -> Option<u8> {
    let text = text.to_lowercase();
    EDUCATION_LEVELS
        .iter()
        .filter(|(keyword, _)| text.contains(keyword))
        .map(|(_, level)| *level)
        .max()
}

/// Canonical label for a level, used when extracting education from text.
pub fn level_label(level: u8) -> &'static str {
    match level {
        5 => "PhD",
        4 => "Masters",
        3 => "Bachelors",
        2 => "Diploma",
        _ => "High School",
    }
}

/// No requirement → 100. Unrecognized on either side → `unknown_score`.
pub fn score_education(candidate: &str, required: &str, policy: &EducationPolicy) -> f64 {
    if required.trim().is_empty() {
        return 100.0;
    }

    let (Some(have), Some(want)) = (education_level(candidate), education_level(required)) else {
        return policy.unknown_score;
    };

    if have >= want {
        100.0
    } else if have + 1 == want {
        policy.one_below_score
    } else {
        policy.far_below_score
    }
}
