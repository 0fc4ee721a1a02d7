use anyhow::Result;
use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use ats_api::ranking::JobRequirement;

use crate::models::job::JobDescriptionRow;

/// `JD_<unix millis>_<8 hex>`, used when the caller does not name the job.
/// The random suffix keeps ids created in the same millisecond apart.
pub fn generate_job_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("JD_{}_{}", Utc::now().timestamp_millis(), &suffix[..8])
}

/// Column values for a job description upsert.
pub struct JobUpsert<'a> {
    pub requirement: &'a JobRequirement,
    pub job_title: Option<&'a str>,
    pub job_description: &'a str,
    pub embedding_model: Option<&'a str>,
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

/// Inserts the job or overwrites the stored fields of an existing `job_id`.
pub async fn upsert_job(pool: &PgPool, job: JobUpsert<'_>) -> Result<JobDescriptionRow> {
    let requirement = job.requirement;
    let required: Vec<&str> = requirement.required_skills.iter().map(String::as_str).collect();
    let preferred: Vec<&str> = requirement.preferred_skills.iter().map(String::as_str).collect();

    let row = sqlx::query_as::<_, JobDescriptionRow>(
        r#"
        INSERT INTO job_descriptions
            (job_id, job_title, job_description, required_skills, preferred_skills,
             min_experience, max_experience, domain, education_required,
             embedding, embedding_model, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 'active')
        ON CONFLICT (job_id) DO UPDATE SET
            job_title          = EXCLUDED.job_title,
            job_description    = EXCLUDED.job_description,
            required_skills    = EXCLUDED.required_skills,
            preferred_skills   = EXCLUDED.preferred_skills,
            min_experience     = EXCLUDED.min_experience,
            max_experience     = EXCLUDED.max_experience,
            domain             = EXCLUDED.domain,
            education_required = EXCLUDED.education_required,
            embedding          = COALESCE(EXCLUDED.embedding, job_descriptions.embedding),
            embedding_model    = COALESCE(EXCLUDED.embedding_model, job_descriptions.embedding_model),
            status             = 'active',
            updated_at         = NOW()
        RETURNING *
        "#,
    )
    .bind(&requirement.job_id)
    .bind(job.job_title)
    .bind(job.job_description)
    .bind(&required)
    .bind(&preferred)
    .bind(requirement.min_experience)
    .bind(requirement.max_experience)
    .bind(non_empty(&requirement.domain))
    .bind(non_empty(&requirement.education_required))
    .bind(requirement.embedding.as_deref())
    .bind(job.embedding_model)
    .fetch_one(pool)
    .await?;

    info!(
        "Upserted job {} ({} required, {} preferred skills)",
        row.job_id,
        row.required_skills.len(),
        row.preferred_skills.len()
    );
    Ok(row)
}

pub async fn get_job(pool: &PgPool, job_id: &str) -> Result<Option<JobDescriptionRow>> {
    let row = sqlx::query_as::<_, JobDescriptionRow>(
        "SELECT * FROM job_descriptions WHERE job_id = $1",
    )
    .bind(job_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_job_id_format() {
        let id = generate_job_id();
        let (millis, suffix) = id.strip_prefix("JD_").unwrap().split_once('_').unwrap();
        assert!(millis.parse::<i64>().unwrap() > 0);
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generated_job_ids_are_distinct() {
        let ids: std::collections::HashSet<String> = (0..1000).map(|_| generate_job_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_non_empty_trims() {
        assert_eq!(non_empty("  Fintech "), Some("Fintech"));
        assert_eq!(non_empty("   "), None);
    }
}
