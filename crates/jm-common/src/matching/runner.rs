use std::collections::{HashMap, HashSet};

use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument};

use crate::db::{
    existing_pairs_for_candidates, existing_pairs_for_job, fetch_active_job_posts,
    fetch_applications_for_candidates, fetch_applications_for_job, fetch_candidate,
    fetch_candidates, insert_match_record, upsert_match_record, CatalogFetchError,
    MatchRecordInsert, MatchStorageError, PgPool,
};
use crate::{Application, Candidate, JobPosting};

use super::engine::plan_pairs;
use super::scoring::score_pair;

#[derive(Debug, Error)]
pub enum MatchRunError {
    #[error("catalog fetch failed: {0}")]
    Catalog(#[from] CatalogFetchError),
    #[error("match storage failed: {0}")]
    Storage(#[from] MatchStorageError),
    #[error("candidate {0} not found")]
    CandidateNotFound(i64),
    #[error("job post {0} not found")]
    JobNotFound(i64),
}

/// Outcome of one batch or incremental pass. `skipped_existing` counts both
/// pairs skipped up front and pairs lost to a concurrent writer during the
/// run; either way the pair already has a record and that is not an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchRunSummary {
    pub pairs_considered: u64,
    pub created: u64,
    pub skipped_existing: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RefreshSummary {
    pub created: u64,
    pub refreshed: u64,
}

/// Entity-scoped trigger for the lifecycle hooks: a changed entity is
/// matched against the opposite catalog instead of re-running the full
/// product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncrementalScope {
    Candidate(i64),
    Job(i64),
}

/// Index applications by (candidate, job) key, keeping the most recent
/// submission per pair.
fn application_index(applications: &[Application]) -> HashMap<(i64, i64), &Application> {
    let mut index: HashMap<(i64, i64), &Application> = HashMap::new();

    for application in applications {
        let key = (application.candidate_id, application.job_post_id);
        match index.entry(key) {
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(application);
            }
            std::collections::hash_map::Entry::Occupied(mut slot) => {
                if application.applied_at > slot.get().applied_at {
                    slot.insert(application);
                }
            }
        }
    }

    index
}

async fn execute_run(
    pool: &PgPool,
    candidates: &[Candidate],
    jobs: &[JobPosting],
    existing: &HashSet<(i64, i64)>,
    applications: &[Application],
) -> Result<MatchRunSummary, MatchRunError> {
    let keyed_candidates = candidates.iter().filter(|c| c.id.is_some()).count() as u64;
    let active_jobs = jobs
        .iter()
        .filter(|j| j.is_active && j.id.is_some())
        .count() as u64;

    let planned = plan_pairs(candidates, jobs, existing);
    let by_pair = application_index(applications);

    let mut summary = MatchRunSummary {
        pairs_considered: keyed_candidates * active_jobs,
        created: 0,
        skipped_existing: keyed_candidates * active_jobs - planned.len() as u64,
    };

    for pair in planned {
        let application = by_pair.get(&pair.key()).copied();
        let score = score_pair(pair.candidate, pair.job, application);
        let record = MatchRecordInsert::from_score(pair.key().0, pair.key().1, &score);

        // A failed write aborts the whole run; a conflict (0 rows) means a
        // concurrent runner created the pair first and is counted as a skip.
        let rows = insert_match_record(pool, &record).await?;
        if rows == 0 {
            summary.skipped_existing += 1;
        } else {
            summary.created += 1;
        }
    }

    Ok(summary)
}

/// Batch pass over the full candidate catalog and every active job post.
/// Pairs that already have a match record keep their snapshot untouched;
/// use [`refresh_matching`] to recompute them.
#[instrument(skip(pool))]
pub async fn run_matching(pool: &PgPool) -> Result<MatchRunSummary, MatchRunError> {
    let candidates = fetch_candidates(pool).await?;
    let jobs = fetch_active_job_posts(pool).await?;

    let candidate_ids: Vec<i64> = candidates.iter().filter_map(|c| c.id).collect();
    let existing = existing_pairs_for_candidates(pool, &candidate_ids).await?;
    let applications = fetch_applications_for_candidates(pool, &candidate_ids).await?;

    let summary = execute_run(pool, &candidates, &jobs, &existing, &applications).await?;

    info!(
        pairs_considered = summary.pairs_considered,
        created = summary.created,
        skipped_existing = summary.skipped_existing,
        "bulk matching pass finished"
    );

    Ok(summary)
}

/// Lifecycle-hook pass: one changed entity against the opposite catalog.
#[instrument(skip(pool))]
pub async fn run_incremental(
    pool: &PgPool,
    scope: IncrementalScope,
) -> Result<MatchRunSummary, MatchRunError> {
    let summary = match scope {
        IncrementalScope::Candidate(candidate_id) => {
            let candidate = fetch_candidate(pool, candidate_id)
                .await?
                .ok_or(MatchRunError::CandidateNotFound(candidate_id))?;
            let jobs = fetch_active_job_posts(pool).await?;
            let existing = existing_pairs_for_candidates(pool, &[candidate_id]).await?;
            let applications = fetch_applications_for_candidates(pool, &[candidate_id]).await?;

            execute_run(pool, &[candidate], &jobs, &existing, &applications).await?
        }
        IncrementalScope::Job(job_post_id) => {
            let job = crate::db::fetch_job_post(pool, job_post_id)
                .await?
                .ok_or(MatchRunError::JobNotFound(job_post_id))?;

            // An inactive posting never produces new matches; the hook is a
            // no-op rather than an error.
            if !job.is_active {
                return Ok(MatchRunSummary::default());
            }

            let candidates = fetch_candidates(pool).await?;
            let existing = existing_pairs_for_job(pool, job_post_id).await?;
            let applications = fetch_applications_for_job(pool, job_post_id).await?;

            execute_run(pool, &candidates, &[job], &existing, &applications).await?
        }
    };

    info!(?scope, created = summary.created, "incremental matching pass finished");

    Ok(summary)
}

/// Explicit recompute over the full product. This is the only path that
/// rewrites an existing match record; the batch runner never does.
#[instrument(skip(pool))]
pub async fn refresh_matching(pool: &PgPool) -> Result<RefreshSummary, MatchRunError> {
    let candidates = fetch_candidates(pool).await?;
    let jobs = fetch_active_job_posts(pool).await?;

    let candidate_ids: Vec<i64> = candidates.iter().filter_map(|c| c.id).collect();
    let existing = existing_pairs_for_candidates(pool, &candidate_ids).await?;
    let applications = fetch_applications_for_candidates(pool, &candidate_ids).await?;
    let by_pair = application_index(&applications);

    let mut summary = RefreshSummary::default();

    for candidate in &candidates {
        let Some(candidate_id) = candidate.id else {
            continue;
        };

        for job in &jobs {
            let Some(job_post_id) = job.id else {
                continue;
            };

            let key = (candidate_id, job_post_id);
            let score = score_pair(candidate, job, by_pair.get(&key).copied());
            let record = MatchRecordInsert::from_score(candidate_id, job_post_id, &score);

            upsert_match_record(pool, &record).await?;
            if existing.contains(&key) {
                summary.refreshed += 1;
            } else {
                summary.created += 1;
            }
        }
    }

    info!(
        created = summary.created,
        refreshed = summary.refreshed,
        "refresh pass finished"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn application_index_keeps_latest_submission_per_pair() {
        let now = Utc::now();
        let older = Application {
            id: Some(1),
            candidate_id: 1,
            job_post_id: 2,
            duration_of_internship: Some(3),
            applied_at: Some(now - Duration::days(7)),
            ..Application::default()
        };
        let newer = Application {
            id: Some(2),
            candidate_id: 1,
            job_post_id: 2,
            duration_of_internship: Some(6),
            applied_at: Some(now),
            ..Application::default()
        };
        let other_pair = Application {
            id: Some(3),
            candidate_id: 9,
            job_post_id: 2,
            applied_at: Some(now),
            ..Application::default()
        };

        let applications = vec![older, newer, other_pair];
        let index = application_index(&applications);

        assert_eq!(index.len(), 2);
        assert_eq!(index[&(1, 2)].duration_of_internship, Some(6));
        assert_eq!(index[&(9, 2)].id, Some(3));
    }
}
