use std::str::FromStr;

use tokio_postgres::Row;
use tracing::instrument;

use crate::db::candidates::CatalogFetchError;
use crate::db::PgPool;
use crate::{Application, ApplicationStatus};

const APPLICATION_COLUMNS: &str =
    "id, candidate_id, job_post_id, duration_of_internship, status, applied_at";

fn row_to_application(row: &Row) -> Application {
    let status: String = row.get("status");

    Application {
        id: Some(row.get("id")),
        candidate_id: row.get("candidate_id"),
        job_post_id: row.get("job_post_id"),
        duration_of_internship: row.get("duration_of_internship"),
        status: ApplicationStatus::from_str(&status).unwrap_or_default(),
        applied_at: row.get("applied_at"),
    }
}

/// Applications submitted by any of the given candidates, newest first so
/// "most recent application" resolution can take the first hit per key.
#[instrument(skip(pool, candidate_ids), fields(candidates = candidate_ids.len()))]
pub async fn fetch_applications_for_candidates(
    pool: &PgPool,
    candidate_ids: &[i64],
) -> Result<Vec<Application>, CatalogFetchError> {
    if candidate_ids.is_empty() {
        return Ok(vec![]);
    }

    let client = pool.get().await?;

    let rows = client
        .query(
            &format!(
                "SELECT {APPLICATION_COLUMNS} FROM jobboard.applications \
                 WHERE candidate_id = ANY($1) ORDER BY applied_at DESC, id DESC"
            ),
            &[&candidate_ids],
        )
        .await?;

    Ok(rows.iter().map(row_to_application).collect())
}

#[instrument(skip(pool))]
pub async fn fetch_applications_for_job(
    pool: &PgPool,
    job_post_id: i64,
) -> Result<Vec<Application>, CatalogFetchError> {
    let client = pool.get().await?;

    let rows = client
        .query(
            &format!(
                "SELECT {APPLICATION_COLUMNS} FROM jobboard.applications \
                 WHERE job_post_id = $1 ORDER BY applied_at DESC, id DESC"
            ),
            &[&job_post_id],
        )
        .await?;

    Ok(rows.iter().map(row_to_application).collect())
}
