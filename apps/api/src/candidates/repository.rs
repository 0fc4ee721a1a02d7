use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::candidate::CandidateRow;

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_ARCHIVED: &str = "archived";

/// Column values for a new candidate. Skills must already be normalized.
pub struct NewCandidate<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub total_experience: f64,
    pub primary_skills: &'a [String],
    pub secondary_skills: &'a [String],
    pub domain: Option<&'a str>,
    pub sub_domain: Option<&'a str>,
    pub education: Option<&'a str>,
    pub current_company: Option<&'a str>,
    pub current_designation: Option<&'a str>,
    pub current_location: Option<&'a str>,
    pub resume_summary: Option<&'a str>,
    pub resume_text: &'a str,
    pub embedding: Option<&'a [f32]>,
    pub embedding_model: Option<&'a str>,
}

pub async fn insert_candidate(pool: &PgPool, candidate: NewCandidate<'_>) -> Result<CandidateRow> {
    let id = Uuid::new_v4();

    let row = sqlx::query_as::<_, CandidateRow>(
        r#"
        INSERT INTO candidates
            (id, name, email, phone, total_experience, primary_skills, secondary_skills,
             domain, sub_domain, education, current_company, current_designation,
             current_location, resume_summary, resume_text, embedding, embedding_model, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(candidate.name)
    .bind(candidate.email)
    .bind(candidate.phone)
    .bind(candidate.total_experience)
    .bind(candidate.primary_skills)
    .bind(candidate.secondary_skills)
    .bind(candidate.domain)
    .bind(candidate.sub_domain)
    .bind(candidate.education)
    .bind(candidate.current_company)
    .bind(candidate.current_designation)
    .bind(candidate.current_location)
    .bind(candidate.resume_summary)
    .bind(candidate.resume_text)
    .bind(candidate.embedding)
    .bind(candidate.embedding_model)
    .bind(STATUS_ACTIVE)
    .fetch_one(pool)
    .await?;

    info!(
        "Inserted candidate {id} ({}) with {} primary skills",
        row.name,
        row.primary_skills.len()
    );
    Ok(row)
}

/// Most recent active candidates first.
pub async fn list_active_candidates(pool: &PgPool, limit: i64) -> Result<Vec<CandidateRow>> {
    let rows = sqlx::query_as::<_, CandidateRow>(
        "SELECT * FROM candidates WHERE status = $1 ORDER BY created_at DESC LIMIT $2",
    )
    .bind(STATUS_ACTIVE)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Every active candidate, oldest first so ranking ties resolve by insertion order.
pub async fn load_rankable_candidates(pool: &PgPool) -> Result<Vec<CandidateRow>> {
    let rows = sqlx::query_as::<_, CandidateRow>(
        "SELECT * FROM candidates WHERE status = $1 ORDER BY created_at ASC, id ASC",
    )
    .bind(STATUS_ACTIVE)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn get_candidate(pool: &PgPool, id: Uuid) -> Result<Option<CandidateRow>> {
    let row = sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Soft delete. Ranking history keeps pointing at the row.
/// Returns false when no active candidate has that id.
pub async fn archive_candidate(pool: &PgPool, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE candidates SET status = $1, updated_at = NOW() WHERE id = $2 AND status = $3",
    )
    .bind(STATUS_ARCHIVED)
    .bind(id)
    .bind(STATUS_ACTIVE)
    .execute(pool)
    .await?;

    let archived = result.rows_affected() > 0;
    if archived {
        info!("Archived candidate {id}");
    }
    Ok(archived)
}
