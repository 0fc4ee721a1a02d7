//! Skill Normalizer — canonical lowercase skill names with alias resolution.
//!
//! Pure functions over a fixed alias table. Unknown skills pass through in
//! their cleaned lowercase form, so normalization never fails and is idempotent.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

/// Canonical skill → known spellings. Canonical names must not appear as an
/// alias of a different skill.
const SKILL_ALIASES: &[(&str, &[&str])] = &[
    // Languages
    ("javascript", &["js", "java script", "ecmascript", "es6"]),
    ("typescript", &["ts", "type script"]),
    ("python", &["py", "python3", "python 3"]),
    ("java", &["java8", "java11", "java17", "core java"]),
    ("c++", &["cpp", "cplusplus", "c plus plus"]),
    ("c#", &["csharp", "c sharp"]),
    ("go", &["golang", "go lang"]),
    ("rust", &["rust lang", "rustlang"]),
    ("php", &[]),
    ("ruby", &[]),
    ("kotlin", &[]),
    ("swift", &[]),
    ("scala", &[]),
    // Web
    ("html", &["html5"]),
    ("css", &["css3"]),
    ("react", &["reactjs", "react.js", "react js"]),
    ("angular", &["angularjs", "angular.js"]),
    ("vue", &["vuejs", "vue.js", "vue js"]),
    ("node.js", &["node", "nodejs", "node js"]),
    ("django", &["django rest framework", "drf"]),
    ("flask", &[]),
    ("fastapi", &["fast api"]),
    ("spring", &["spring boot", "springboot", "spring framework"]),
    ("bootstrap", &[]),
    ("jquery", &[]),
    ("graphql", &[]),
    ("rest api", &["rest", "restful", "restful api", "rest apis"]),
    // Data stores
    ("sql", &[]),
    ("mysql", &["my sql"]),
    ("postgresql", &["postgres", "psql", "postgre sql"]),
    ("mongodb", &["mongo", "mongo db"]),
    ("redis", &[]),
    ("nosql", &["no sql"]),
    ("elasticsearch", &["elastic search"]),
    // Cloud and delivery
    ("aws", &["amazon web services"]),
    ("azure", &["microsoft azure", "ms azure"]),
    ("gcp", &["google cloud", "google cloud platform"]),
    ("docker", &[]),
    ("kubernetes", &["k8s"]),
    ("terraform", &[]),
    ("jenkins", &[]),
    ("ci/cd", &["cicd", "ci cd"]),
    ("git", &[]),
    ("github", &[]),
    ("gitlab", &[]),
    ("devops", &["dev ops"]),
    ("linux", &[]),
    // Data and ML
    ("machine learning", &["ml"]),
    ("deep learning", &["dl"]),
    ("ai", &["artificial intelligence"]),
    ("data science", &[]),
    ("analytics", &["data analytics"]),
    ("nlp", &["natural language processing"]),
    ("pandas", &[]),
    ("pytorch", &[]),
    ("tensorflow", &[]),
    ("spark", &["apache spark", "pyspark"]),
    ("power bi", &["powerbi"]),
    ("tableau", &[]),
    ("excel", &["ms excel", "microsoft excel"]),
    // Process
    ("agile", &[]),
    ("scrum", &[]),
    ("jira", &[]),
];

static ALIAS_TO_CANONICAL: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for (canonical, aliases) in SKILL_ALIASES {
        map.insert(*canonical, *canonical);
        for alias in *aliases {
            map.insert(*alias, *canonical);
        }
    }
    map
});

/// Strips trailing punctuation, then lowercases and collapses whitespace.
fn clean(raw: &str) -> String {
    raw.trim_end_matches(|c: char| c.is_whitespace() || matches!(c, '.' | ',' | ';' | ':'))
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Returns the canonical form of a skill string.
pub fn normalize_skill(raw: &str) -> String {
    let cleaned = clean(raw);
    match ALIAS_TO_CANONICAL.get(cleaned.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => cleaned,
    }
}

/// Canonical name if the phrase is a known skill or alias, else `None`.
pub fn lookup_skill(phrase: &str) -> Option<&'static str> {
    ALIAS_TO_CANONICAL.get(clean(phrase).as_str()).copied()
}

/// Normalizes every entry and drops the ones that end up empty.
pub fn normalize_skills<I, S>(skills: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    skills
        .into_iter()
        .map(|s| normalize_skill(s.as_ref()))
        .filter(|s| !s.is_empty())
        .collect()
}
