use axum::{
    extract::{Path, State},
    Json,
};

use jm_common::api::MatchRecordDto;
use jm_common::db::{
    fetch_candidate, fetch_job_post, top_matches_for_candidate, top_matches_for_job,
};

use crate::error::ApiError;
use crate::SharedState;

const TOP_MATCH_LIMIT: i64 = 10;

/// A candidate's best persisted matches, total score descending.
pub async fn candidate_matches(
    State(state): State<SharedState>,
    Path(candidate_id): Path<i64>,
) -> Result<Json<Vec<MatchRecordDto>>, ApiError> {
    fetch_candidate(&state.pool, candidate_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("candidate {candidate_id} not found")))?;

    let records = top_matches_for_candidate(&state.pool, candidate_id, TOP_MATCH_LIMIT).await?;
    Ok(Json(records.iter().map(MatchRecordDto::from).collect()))
}

/// The best persisted candidates for one job post.
pub async fn job_matches(
    State(state): State<SharedState>,
    Path(job_post_id): Path<i64>,
) -> Result<Json<Vec<MatchRecordDto>>, ApiError> {
    fetch_job_post(&state.pool, job_post_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("job post {job_post_id} not found")))?;

    let records = top_matches_for_job(&state.pool, job_post_id, TOP_MATCH_LIMIT).await?;
    Ok(Json(records.iter().map(MatchRecordDto::from).collect()))
}
