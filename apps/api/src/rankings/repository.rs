use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use ats_api::ranking::ScoreBreakdown;

use crate::models::ranking::{RankingHistoryRow, Statistics};

/// Appends one ranking run to the history. All rows commit together or not at all.
pub async fn insert_ranking_history(
    pool: &PgPool,
    ranking_id: Uuid,
    job_id: &str,
    results: &[ScoreBreakdown],
    algorithm_version: &str,
) -> Result<()> {
    let mut tx = pool.begin().await?;

    for result in results {
        let matched: Vec<&str> = result.matched_skills.iter().map(String::as_str).collect();
        let missing: Vec<&str> = result.missing_skills.iter().map(String::as_str).collect();

        sqlx::query(
            r#"
            INSERT INTO ranking_history
                (id, ranking_id, job_id, candidate_id, total_score, skills_score,
                 experience_score, domain_score, education_score, semantic_bonus,
                 matched_skills, missing_skills, experience_tier, domain_tier,
                 rank_position, algorithm_version)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(ranking_id)
        .bind(job_id)
        .bind(result.candidate_id)
        .bind(result.total_score)
        .bind(result.skills_score)
        .bind(result.experience_score)
        .bind(result.domain_score)
        .bind(result.education_score)
        .bind(result.semantic_bonus)
        .bind(&matched)
        .bind(&missing)
        .bind(result.experience_tier.as_str())
        .bind(result.domain_tier.as_str())
        .bind(i32::try_from(result.rank_position)?)
        .bind(algorithm_version)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(
        "Stored ranking {ranking_id} for job {job_id}: {} rows",
        results.len()
    );
    Ok(())
}

/// Best scores first across all runs for the job.
pub async fn list_job_rankings(
    pool: &PgPool,
    job_id: &str,
    limit: i64,
) -> Result<Vec<RankingHistoryRow>> {
    let rows = sqlx::query_as::<_, RankingHistoryRow>(
        r#"
        SELECT h.id, h.ranking_id, h.job_id, h.candidate_id,
               c.name AS candidate_name, c.email AS candidate_email,
               h.total_score, h.skills_score, h.experience_score, h.domain_score,
               h.education_score, h.semantic_bonus, h.matched_skills, h.missing_skills,
               h.experience_tier, h.domain_tier, h.rank_position, h.algorithm_version,
               h.created_at
        FROM ranking_history h
        JOIN candidates c ON c.id = h.candidate_id
        WHERE h.job_id = $1
        ORDER BY h.total_score DESC, h.created_at DESC
        LIMIT $2
        "#,
    )
    .bind(job_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn fetch_statistics(pool: &PgPool) -> Result<Statistics> {
    let stats = sqlx::query_as::<_, Statistics>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM candidates WHERE status = 'active') AS total_candidates,
            (SELECT COUNT(*) FROM job_descriptions WHERE status = 'active') AS total_jobs,
            (SELECT COUNT(*) FROM ranking_history) AS total_rankings,
            COALESCE(
                (SELECT AVG(total_experience) FROM candidates WHERE status = 'active'),
                0
            )::DOUBLE PRECISION AS avg_experience
        "#,
    )
    .fetch_one(pool)
    .await?;
    Ok(stats)
}
