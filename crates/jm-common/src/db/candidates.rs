use deadpool_postgres::PoolError;
use tokio_postgres::{Error as PgError, Row};
use tracing::instrument;

use crate::db::util::parse_string_array;
use crate::db::PgPool;
use crate::Candidate;

#[derive(Debug, thiserror::Error)]
pub enum CatalogFetchError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres error: {0}")]
    Postgres(#[from] PgError),
}

const CANDIDATE_COLUMNS: &str = "id, professional_title, degree, city, industry, \
     employment_type, skills, duration_of_internship, resume_path";

fn row_to_candidate(row: &Row) -> Candidate {
    Candidate {
        id: Some(row.get("id")),
        professional_title: row.get("professional_title"),
        degree: row.get("degree"),
        city: row.get("city"),
        industry: row.get("industry"),
        employment_type: row.get("employment_type"),
        skills: parse_string_array(row.get("skills")),
        duration_of_internship: row.get("duration_of_internship"),
        resume_path: row.get("resume_path"),
    }
}

/// The full candidate catalog. The bulk runner deliberately does not filter
/// here: candidates without a resume still take part and simply score
/// `has_resume = false`.
#[instrument(skip(pool))]
pub async fn fetch_candidates(pool: &PgPool) -> Result<Vec<Candidate>, CatalogFetchError> {
    let client = pool.get().await?;

    let rows = client
        .query(
            &format!("SELECT {CANDIDATE_COLUMNS} FROM jobboard.candidates ORDER BY id"),
            &[],
        )
        .await?;

    Ok(rows.iter().map(row_to_candidate).collect())
}

#[instrument(skip(pool))]
pub async fn fetch_candidate(
    pool: &PgPool,
    candidate_id: i64,
) -> Result<Option<Candidate>, CatalogFetchError> {
    let client = pool.get().await?;

    let row = client
        .query_opt(
            &format!("SELECT {CANDIDATE_COLUMNS} FROM jobboard.candidates WHERE id = $1"),
            &[&candidate_id],
        )
        .await?;

    Ok(row.as_ref().map(row_to_candidate))
}
