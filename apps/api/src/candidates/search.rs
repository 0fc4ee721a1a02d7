//! Hybrid candidate search: boolean keyword filtering over candidate metadata,
//! then ordering by embedding similarity to the query when one is available.
//!
//! Grammar: `("Product Owner" OR "Product Manager") AND python AND "rest api"`.
//! Quoted phrases are kept whole, `AND` binds groups, `OR` separates
//! alternatives inside a group. Parentheses are decoration only. Matching is
//! case-insensitive substring containment; an empty query matches everything.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use ats_api::ranking::semantic::cosine_similarity;

use crate::models::candidate::CandidateRow;

static QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)""#).expect("quoted phrase regex"));

static AND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+AND\s+").expect("AND regex"));

static OR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+OR\s+|\|").expect("OR regex"));

/// Conjunction of disjunctions: every group must have at least one term present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BooleanQuery {
    pub and_groups: Vec<Vec<String>>,
}

fn placeholder(index: usize) -> String {
    format!("\u{1}{index}\u{1}")
}

impl BooleanQuery {
    pub fn parse(query: &str) -> Self {
        let query = query.trim();
        if query.is_empty() {
            return Self::default();
        }

        // Protect quoted phrases from AND/OR splitting.
        let mut phrases: Vec<String> = Vec::new();
        let protected = QUOTED_RE.replace_all(query, |caps: &regex::Captures| {
            phrases.push(caps[1].to_string());
            placeholder(phrases.len() - 1)
        });

        let restore = |term: &str| -> String {
            phrases
                .iter()
                .enumerate()
                .fold(term.to_string(), |acc, (i, phrase)| {
                    acc.replace(&placeholder(i), phrase)
                })
        };

        let and_groups = AND_RE
            .split(&protected)
            .map(|part| {
                let part = part.trim().trim_matches(['(', ')']);
                OR_RE
                    .split(part)
                    .map(|term| {
                        restore(term.trim().trim_matches(['(', ')']))
                            .trim_matches('"')
                            .trim()
                            .to_lowercase()
                    })
                    .filter(|term| !term.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|group| !group.is_empty())
            .collect();

        Self { and_groups }
    }

    pub fn is_empty(&self) -> bool {
        self.and_groups.is_empty()
    }

    /// `text` must already be lowercase (see [`searchable_text`]).
    pub fn matches(&self, text: &str) -> bool {
        self.and_groups
            .iter()
            .all(|group| group.iter().any(|term| text.contains(term.as_str())))
    }
}

/// Placeholder values that carry no information and must not match queries.
fn is_placeholder(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "" | "unknown" | "n/a" | "none"
    )
}

/// Lowercased concatenation of every field a recruiter can search on.
pub fn searchable_text(candidate: &CandidateRow) -> String {
    let optional_fields = [
        &candidate.email,
        &candidate.current_company,
        &candidate.current_designation,
        &candidate.current_location,
        &candidate.resume_summary,
        &candidate.domain,
        &candidate.sub_domain,
        &candidate.education,
    ];

    std::iter::once(candidate.name.as_str())
        .chain(candidate.primary_skills.iter().map(String::as_str))
        .chain(candidate.secondary_skills.iter().map(String::as_str))
        .chain(optional_fields.into_iter().filter_map(|f| f.as_deref()))
        .filter(|value| !is_placeholder(value))
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// A matched candidate and its similarity to the query.
#[derive(Debug, Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub candidate: CandidateRow,
    /// Cosine similarity; `None` when either side has no comparable embedding.
    pub match_score: Option<f64>,
}

/// Most similar first. Unscored candidates follow in their original order.
pub fn rank_by_similarity(
    candidates: Vec<CandidateRow>,
    query_embedding: Option<&[f32]>,
) -> Vec<SearchHit> {
    let mut hits: Vec<SearchHit> = candidates
        .into_iter()
        .map(|candidate| {
            let match_score = query_embedding
                .zip(candidate.embedding.as_deref())
                .filter(|(query, own)| query.len() == own.len())
                .map(|(query, own)| cosine_similarity(query, own));
            SearchHit {
                candidate,
                match_score,
            }
        })
        .collect();

    hits.sort_by(|a, b| match (a.match_score, b.match_score) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::fixtures::candidate_row;

    #[test]
    fn test_parse_simple_term() {
        let q = BooleanQuery::parse("Python");
        assert_eq!(q.and_groups, vec![vec!["python".to_string()]]);
    }

    #[test]
    fn test_parse_quoted_or_group_with_and_terms() {
        let q = BooleanQuery::parse(
            r#"("Product Owner" OR "Product Manager") AND "Business" AND Analyst"#,
        );
        assert_eq!(
            q.and_groups,
            vec![
                vec!["product owner".to_string(), "product manager".to_string()],
                vec!["business".to_string()],
                vec!["analyst".to_string()],
            ]
        );
    }

    #[test]
    fn test_parse_keeps_and_inside_quotes() {
        let q = BooleanQuery::parse(r#""research and development" and rust"#);
        assert_eq!(
            q.and_groups,
            vec![
                vec!["research and development".to_string()],
                vec!["rust".to_string()]
            ]
        );
    }

    #[test]
    fn test_parse_pipe_is_or() {
        let q = BooleanQuery::parse("java|kotlin");
        assert_eq!(
            q.and_groups,
            vec![vec!["java".to_string(), "kotlin".to_string()]]
        );
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let q = BooleanQuery::parse("   ");
        assert!(q.is_empty());
        assert!(q.matches("anything"));
    }

    #[test]
    fn test_matches_requires_every_and_group() {
        let q = BooleanQuery::parse("python AND (aws OR gcp)");
        assert!(q.matches("python django aws"));
        assert!(q.matches("gcp python"));
        assert!(!q.matches("python azure"));
        assert!(!q.matches("aws gcp"));
    }

    #[test]
    fn test_searchable_text_covers_profile_fields() {
        let mut row = candidate_row("Meera", &["Python", "Django"]);
        row.resume_summary = Some("Led the Payments Platform team".to_string());
        row.sub_domain = Some("Unknown".to_string());
        let text = searchable_text(&row);
        assert!(text.contains("meera"));
        assert!(text.contains("python"));
        assert!(text.contains("acme payments"));
        assert!(text.contains("backend engineer"));
        assert!(text.contains("pune"));
        assert!(text.contains("payments platform"));
        assert!(!text.contains("unknown"));
    }

    #[test]
    fn test_query_against_candidate() {
        let row = candidate_row("Meera", &["Python", "Django"]);
        let text = searchable_text(&row);
        assert!(BooleanQuery::parse(r#""backend engineer" AND python"#).matches(&text));
        assert!(!BooleanQuery::parse("python AND kubernetes").matches(&text));
    }

    fn embedded(name: &str, embedding: Option<Vec<f32>>) -> CandidateRow {
        let mut row = candidate_row(name, &["python"]);
        row.embedding = embedding;
        row
    }

    #[test]
    fn test_rank_by_similarity_orders_most_similar_first() {
        let rows = vec![
            embedded("Far", Some(vec![0.0, 1.0])),
            embedded("Unembedded", None),
            embedded("Near", Some(vec![1.0, 0.1])),
            embedded("Middle", Some(vec![1.0, 1.0])),
        ];
        let hits = rank_by_similarity(rows, Some(&[1.0, 0.0][..]));
        let names: Vec<&str> = hits.iter().map(|h| h.candidate.name.as_str()).collect();
        assert_eq!(names, ["Near", "Middle", "Far", "Unembedded"]);
        assert!(hits[0].match_score.unwrap() > 0.99);
        assert!(hits[3].match_score.is_none());
    }

    #[test]
    fn test_rank_by_similarity_without_query_keeps_order() {
        let rows = vec![
            embedded("First", Some(vec![0.0, 1.0])),
            embedded("Second", Some(vec![1.0, 0.0])),
        ];
        let hits = rank_by_similarity(rows, None);
        assert_eq!(hits[0].candidate.name, "First");
        assert_eq!(hits[1].candidate.name, "Second");
        assert!(hits.iter().all(|h| h.match_score.is_none()));
    }

    #[test]
    fn test_rank_by_similarity_ignores_mismatched_dimensions() {
        let rows = vec![
            embedded("OtherModel", Some(vec![1.0, 0.0, 0.0])),
            embedded("SameModel", Some(vec![0.5, 0.5])),
        ];
        let hits = rank_by_similarity(rows, Some(&[1.0, 0.0][..]));
        assert_eq!(hits[0].candidate.name, "SameModel");
        assert!(hits[1].match_score.is_none());
    }

    #[test]
    fn test_search_hit_serializes_flat() {
        let hit = SearchHit {
            candidate: embedded("Asha", Some(vec![1.0])),
            match_score: Some(0.8),
        };
        let json = serde_json::to_value(hit).unwrap();
        assert_eq!(json["name"], "Asha");
        assert_eq!(json["match_score"], 0.8);
        assert!(json.get("embedding").is_none());
    }
}
