use std::collections::HashSet;

use chrono::{DateTime, Utc};
use deadpool_postgres::PoolError;
use tokio_postgres::{Error as PgError, Row};
use tracing::instrument;

use crate::db::PgPool;
use crate::matching::PairScore;

#[derive(Debug, thiserror::Error)]
pub enum MatchStorageError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres error: {0}")]
    Postgres(#[from] PgError),
}

/// Row to be written for a newly scored pair. `created_at` defaults to the
/// insert time when unset.
#[derive(Debug, Clone, Default)]
pub struct MatchRecordInsert {
    pub candidate_id: i64,
    pub job_post_id: i64,
    pub title_match: bool,
    pub degree_match: bool,
    pub location_match: bool,
    pub duration_match: bool,
    pub industry_match: bool,
    pub has_resume: bool,
    pub skill_match_score: f64,
    pub total_score: f64,
    pub created_at: Option<DateTime<Utc>>,
}

impl MatchRecordInsert {
    pub fn from_score(candidate_id: i64, job_post_id: i64, score: &PairScore) -> Self {
        Self {
            candidate_id,
            job_post_id,
            title_match: score.signals.title_match,
            degree_match: score.signals.degree_match,
            location_match: score.signals.location_match,
            duration_match: score.signals.duration_match,
            industry_match: score.signals.industry_match,
            has_resume: score.signals.has_resume,
            skill_match_score: score.signals.skill_match_score,
            total_score: score.total,
            created_at: None,
        }
    }
}

/// A persisted match record as read back for ranked lists.
#[derive(Debug, Clone)]
pub struct MatchRecord {
    pub id: i64,
    pub candidate_id: i64,
    pub job_post_id: i64,
    pub title_match: bool,
    pub degree_match: bool,
    pub location_match: bool,
    pub duration_match: bool,
    pub industry_match: bool,
    pub has_resume: bool,
    pub skill_match_score: f64,
    pub total_score: f64,
    pub created_at: DateTime<Utc>,
}

fn row_to_match_record(row: &Row) -> MatchRecord {
    MatchRecord {
        id: row.get("id"),
        candidate_id: row.get("candidate_id"),
        job_post_id: row.get("job_post_id"),
        title_match: row.get("title_match"),
        degree_match: row.get("degree_match"),
        location_match: row.get("location_match"),
        duration_match: row.get("duration_match"),
        industry_match: row.get("industry_match"),
        has_resume: row.get("has_resume"),
        skill_match_score: row.get("skill_match_score"),
        total_score: row.get("total_score"),
        created_at: row.get("created_at"),
    }
}

const MATCH_COLUMNS: &str = "id, candidate_id, job_post_id, title_match, degree_match, \
     location_match, duration_match, industry_match, has_resume, \
     skill_match_score, total_score, created_at";

/// Insert one match record, skipping silently when the unique
/// (candidate, job) key already holds a row. Returns the number of rows
/// written: 0 means another writer got there first and the pair is treated
/// as already matched.
#[instrument(skip(pool, record), fields(candidate_id = record.candidate_id, job_post_id = record.job_post_id))]
pub async fn insert_match_record(
    pool: &PgPool,
    record: &MatchRecordInsert,
) -> Result<u64, MatchStorageError> {
    let client = pool.get().await?;

    let stmt = client
        .prepare(
            "INSERT INTO jobboard.candidate_job_matches (
                candidate_id,
                job_post_id,
                title_match,
                degree_match,
                location_match,
                duration_match,
                industry_match,
                has_resume,
                skill_match_score,
                total_score,
                created_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11
            )
            ON CONFLICT (candidate_id, job_post_id) DO NOTHING;",
        )
        .await?;

    let created_at = record.created_at.unwrap_or_else(Utc::now);
    let rows = client
        .execute(
            &stmt,
            &[
                &record.candidate_id,
                &record.job_post_id,
                &record.title_match,
                &record.degree_match,
                &record.location_match,
                &record.duration_match,
                &record.industry_match,
                &record.has_resume,
                &record.skill_match_score,
                &record.total_score,
                &created_at,
            ],
        )
        .await?;

    Ok(rows)
}

/// Write-or-replace for the explicit refresh pass. Unlike the batch insert,
/// an existing pair is rewritten with the freshly computed signals; its
/// original `created_at` is preserved.
#[instrument(skip(pool, record), fields(candidate_id = record.candidate_id, job_post_id = record.job_post_id))]
pub async fn upsert_match_record(
    pool: &PgPool,
    record: &MatchRecordInsert,
) -> Result<(), MatchStorageError> {
    let client = pool.get().await?;

    let stmt = client
        .prepare(
            "INSERT INTO jobboard.candidate_job_matches (
                candidate_id,
                job_post_id,
                title_match,
                degree_match,
                location_match,
                duration_match,
                industry_match,
                has_resume,
                skill_match_score,
                total_score,
                created_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11
            )
            ON CONFLICT (candidate_id, job_post_id) DO UPDATE SET
                title_match = EXCLUDED.title_match,
                degree_match = EXCLUDED.degree_match,
                location_match = EXCLUDED.location_match,
                duration_match = EXCLUDED.duration_match,
                industry_match = EXCLUDED.industry_match,
                has_resume = EXCLUDED.has_resume,
                skill_match_score = EXCLUDED.skill_match_score,
                total_score = EXCLUDED.total_score;",
        )
        .await?;

    let created_at = record.created_at.unwrap_or_else(Utc::now);
    client
        .execute(
            &stmt,
            &[
                &record.candidate_id,
                &record.job_post_id,
                &record.title_match,
                &record.degree_match,
                &record.location_match,
                &record.duration_match,
                &record.industry_match,
                &record.has_resume,
                &record.skill_match_score,
                &record.total_score,
                &created_at,
            ],
        )
        .await?;

    Ok(())
}

/// Unique keys already persisted for the given candidates, fetched in one
/// index scan on the pair key so the planner can skip them without per-pair
/// round trips.
#[instrument(skip(pool, candidate_ids), fields(candidates = candidate_ids.len()))]
pub async fn existing_pairs_for_candidates(
    pool: &PgPool,
    candidate_ids: &[i64],
) -> Result<HashSet<(i64, i64)>, MatchStorageError> {
    if candidate_ids.is_empty() {
        return Ok(HashSet::new());
    }

    let client = pool.get().await?;

    let rows = client
        .query(
            "SELECT candidate_id, job_post_id FROM jobboard.candidate_job_matches \
             WHERE candidate_id = ANY($1)",
            &[&candidate_ids],
        )
        .await?;

    Ok(rows
        .iter()
        .map(|row| (row.get("candidate_id"), row.get("job_post_id")))
        .collect())
}

#[instrument(skip(pool))]
pub async fn existing_pairs_for_job(
    pool: &PgPool,
    job_post_id: i64,
) -> Result<HashSet<(i64, i64)>, MatchStorageError> {
    let client = pool.get().await?;

    let rows = client
        .query(
            "SELECT candidate_id, job_post_id FROM jobboard.candidate_job_matches \
             WHERE job_post_id = $1",
            &[&job_post_id],
        )
        .await?;

    Ok(rows
        .iter()
        .map(|row| (row.get("candidate_id"), row.get("job_post_id")))
        .collect())
}

/// Ranked read: a candidate's best persisted matches, total score
/// descending.
#[instrument(skip(pool))]
pub async fn top_matches_for_candidate(
    pool: &PgPool,
    candidate_id: i64,
    limit: i64,
) -> Result<Vec<MatchRecord>, MatchStorageError> {
    let client = pool.get().await?;

    let rows = client
        .query(
            &format!(
                "SELECT {MATCH_COLUMNS} FROM jobboard.candidate_job_matches \
                 WHERE candidate_id = $1 ORDER BY total_score DESC, id ASC LIMIT $2"
            ),
            &[&candidate_id, &limit],
        )
        .await?;

    Ok(rows.iter().map(row_to_match_record).collect())
}

#[instrument(skip(pool))]
pub async fn top_matches_for_job(
    pool: &PgPool,
    job_post_id: i64,
    limit: i64,
) -> Result<Vec<MatchRecord>, MatchStorageError> {
    let client = pool.get().await?;

    let rows = client
        .query(
            &format!(
                "SELECT {MATCH_COLUMNS} FROM jobboard.candidate_job_matches \
                 WHERE job_post_id = $1 ORDER BY total_score DESC, id ASC LIMIT $2"
            ),
            &[&job_post_id, &limit],
        )
        .await?;

    Ok(rows.iter().map(row_to_match_record).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{MatchSignals, PairScore};

    #[test]
    fn insert_is_built_from_a_pair_score() {
        let score = PairScore {
            signals: MatchSignals {
                title_match: true,
                degree_match: false,
                location_match: true,
                duration_match: true,
                industry_match: false,
                has_resume: true,
                skill_match_score: 0.5,
            },
            total: 0.65,
        };

        let record = MatchRecordInsert::from_score(7, 9, &score);

        assert_eq!(record.candidate_id, 7);
        assert_eq!(record.job_post_id, 9);
        assert!(record.title_match && record.location_match && record.duration_match);
        assert!(!record.degree_match && !record.industry_match);
        assert_eq!(record.skill_match_score, 0.5);
        assert_eq!(record.total_score, 0.65);
        assert!(record.created_at.is_none());
    }
}
