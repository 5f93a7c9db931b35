use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use jm_common::api::{paginate, CandidateDto, JobPostingDto, Page};
use jm_common::db::{
    fetch_active_job_posts, fetch_applications_for_candidates, fetch_applications_for_job,
    fetch_candidate, fetch_candidates, fetch_job_post,
};
use jm_common::matching::{candidates_for_job, jobs_for_candidate};

use crate::error::ApiError;
use crate::handlers::pagination::validate_pagination;
use crate::SharedState;

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

const fn default_limit() -> i64 {
    5
}

/// Live recommendation read: jobs for one candidate, paginated. Reads the
/// catalogs directly, never the persisted match table.
pub async fn recommended_jobs(
    State(state): State<SharedState>,
    Path(candidate_id): Path<i64>,
    Query(query): Query<RecommendationQuery>,
) -> Result<Json<Page<JobPostingDto>>, ApiError> {
    let (limit, offset) = validate_pagination(query.limit, query.offset)?;

    let candidate = fetch_candidate(&state.pool, candidate_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("candidate {candidate_id} not found")))?;

    let jobs = fetch_active_job_posts(&state.pool).await?;
    let applications = fetch_applications_for_candidates(&state.pool, &[candidate_id]).await?;

    let ranked = jobs_for_candidate(&candidate, &jobs, &applications, &state.recommend);
    let dtos: Vec<JobPostingDto> = ranked.into_iter().map(JobPostingDto::from).collect();

    Ok(Json(paginate(dtos, limit, offset)))
}

/// The symmetric read: candidates for one job post.
pub async fn recommended_candidates(
    State(state): State<SharedState>,
    Path(job_post_id): Path<i64>,
    Query(query): Query<RecommendationQuery>,
) -> Result<Json<Page<CandidateDto>>, ApiError> {
    let (limit, offset) = validate_pagination(query.limit, query.offset)?;

    let job = fetch_job_post(&state.pool, job_post_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("job post {job_post_id} not found")))?;

    let candidates = fetch_candidates(&state.pool).await?;
    let applications = fetch_applications_for_job(&state.pool, job_post_id).await?;

    let ranked = candidates_for_job(&job, &candidates, &applications, &state.recommend);
    let dtos: Vec<CandidateDto> = ranked.into_iter().map(CandidateDto::from).collect();

    Ok(Json(paginate(dtos, limit, offset)))
}
