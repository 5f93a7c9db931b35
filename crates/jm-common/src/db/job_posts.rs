use tokio_postgres::Row;
use tracing::instrument;

use crate::db::candidates::CatalogFetchError;
use crate::db::util::parse_string_array;
use crate::db::PgPool;
use crate::JobPosting;

const JOB_POST_COLUMNS: &str = "id, title, location, industry, required_skills, \
     duration_of_internship, is_active, application_deadline";

fn row_to_job_post(row: &Row) -> JobPosting {
    JobPosting {
        id: Some(row.get("id")),
        title: row.get("title"),
        location: row.get("location"),
        industry: row.get("industry"),
        required_skills: parse_string_array(row.get("required_skills")),
        duration_of_internship: row.get("duration_of_internship"),
        is_active: row.get("is_active"),
        application_deadline: row.get("application_deadline"),
    }
}

/// Active postings only: the matching paths never see an inactive job, so an
/// inactive posting can never produce a new match record.
#[instrument(skip(pool))]
pub async fn fetch_active_job_posts(pool: &PgPool) -> Result<Vec<JobPosting>, CatalogFetchError> {
    let client = pool.get().await?;

    let rows = client
        .query(
            &format!(
                "SELECT {JOB_POST_COLUMNS} FROM jobboard.job_posts WHERE is_active ORDER BY id"
            ),
            &[],
        )
        .await?;

    Ok(rows.iter().map(row_to_job_post).collect())
}

#[instrument(skip(pool))]
pub async fn fetch_job_post(
    pool: &PgPool,
    job_post_id: i64,
) -> Result<Option<JobPosting>, CatalogFetchError> {
    let client = pool.get().await?;

    let row = client
        .query_opt(
            &format!("SELECT {JOB_POST_COLUMNS} FROM jobboard.job_posts WHERE id = $1"),
            &[&job_post_id],
        )
        .await?;

    Ok(row.as_ref().map(row_to_job_post))
}
