use axum::{
    extract::{Path, State},
    Json,
};

use jm_common::matching::runner::{
    refresh_matching, run_incremental, run_matching, IncrementalScope, MatchRunSummary,
    RefreshSummary,
};

use crate::error::ApiError;
use crate::SharedState;

/// Operator-invoked bulk pass over the full active catalog.
pub async fn run(State(state): State<SharedState>) -> Result<Json<MatchRunSummary>, ApiError> {
    let summary = run_matching(&state.pool).await?;
    Ok(Json(summary))
}

/// Explicit recompute of every pair, including ones that already have a
/// persisted snapshot.
pub async fn refresh(State(state): State<SharedState>) -> Result<Json<RefreshSummary>, ApiError> {
    let summary = refresh_matching(&state.pool).await?;
    Ok(Json(summary))
}

/// Lifecycle hook target: a created or updated candidate is matched against
/// the active job catalog.
pub async fn run_for_candidate(
    State(state): State<SharedState>,
    Path(candidate_id): Path<i64>,
) -> Result<Json<MatchRunSummary>, ApiError> {
    let summary = run_incremental(&state.pool, IncrementalScope::Candidate(candidate_id)).await?;
    Ok(Json(summary))
}

/// Lifecycle hook target: a created or updated job post is matched against
/// the candidate catalog.
pub async fn run_for_job(
    State(state): State<SharedState>,
    Path(job_post_id): Path<i64>,
) -> Result<Json<MatchRunSummary>, ApiError> {
    let summary = run_incremental(&state.pool, IncrementalScope::Job(job_post_id)).await?;
    Ok(Json(summary))
}
