use deadpool_postgres::PoolError;
use thiserror::Error;
use tokio_postgres::Error as PgError;
use tracing::{info, instrument};

use crate::db::PgPool;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("failed to run migration: {0}")]
    Postgres(#[from] PgError),
}

struct Migration {
    version: i32,
    label: &'static str,
    ddl: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        label: "catalog tables read by the matching engine",
        ddl: r#"
CREATE TABLE IF NOT EXISTS jobboard.candidates (
    id BIGSERIAL PRIMARY KEY,
    professional_title TEXT NOT NULL DEFAULT '',
    degree TEXT NOT NULL DEFAULT '',
    city TEXT NOT NULL DEFAULT '',
    industry TEXT,
    employment_type TEXT NOT NULL DEFAULT '',
    skills JSONB NOT NULL DEFAULT '[]',
    duration_of_internship INTEGER,
    resume_path TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS jobboard.job_posts (
    id BIGSERIAL PRIMARY KEY,
    title TEXT NOT NULL DEFAULT '',
    location TEXT NOT NULL DEFAULT 'Remote',
    industry TEXT NOT NULL DEFAULT '',
    required_skills JSONB NOT NULL DEFAULT '[]',
    duration_of_internship INTEGER,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    application_deadline DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_job_posts_active ON jobboard.job_posts(is_active, id);

CREATE TABLE IF NOT EXISTS jobboard.applications (
    id BIGSERIAL PRIMARY KEY,
    candidate_id BIGINT NOT NULL REFERENCES jobboard.candidates(id) ON DELETE CASCADE,
    job_post_id BIGINT NOT NULL REFERENCES jobboard.job_posts(id) ON DELETE CASCADE,
    duration_of_internship INTEGER,
    status TEXT NOT NULL DEFAULT 'pending',
    applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_application_status CHECK (status IN ('pending', 'accepted', 'rejected'))
);

CREATE INDEX IF NOT EXISTS idx_applications_candidate ON jobboard.applications(candidate_id, applied_at DESC);
CREATE INDEX IF NOT EXISTS idx_applications_job ON jobboard.applications(job_post_id, applied_at DESC);
"#,
    },
    Migration {
        version: 2,
        label: "match records keyed by the unique (candidate, job) pair",
        ddl: r#"
CREATE TABLE IF NOT EXISTS jobboard.candidate_job_matches (
    id BIGSERIAL PRIMARY KEY,
    candidate_id BIGINT NOT NULL REFERENCES jobboard.candidates(id) ON DELETE CASCADE,
    job_post_id BIGINT NOT NULL REFERENCES jobboard.job_posts(id) ON DELETE CASCADE,

    title_match BOOLEAN NOT NULL DEFAULT FALSE,
    degree_match BOOLEAN NOT NULL DEFAULT FALSE,
    location_match BOOLEAN NOT NULL DEFAULT FALSE,
    duration_match BOOLEAN NOT NULL DEFAULT FALSE,
    industry_match BOOLEAN NOT NULL DEFAULT FALSE,
    has_resume BOOLEAN NOT NULL DEFAULT FALSE,

    skill_match_score DOUBLE PRECISION NOT NULL DEFAULT 0.0,
    total_score DOUBLE PRECISION NOT NULL DEFAULT 0.0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_candidate_job_match UNIQUE (candidate_id, job_post_id),
    CONSTRAINT chk_skill_match_score_range
        CHECK (skill_match_score >= 0.0 AND skill_match_score <= 1.0),
    CONSTRAINT chk_total_score_range
        CHECK (total_score >= 0.0 AND total_score <= 1.0)
);

CREATE INDEX IF NOT EXISTS idx_matches_candidate_score
    ON jobboard.candidate_job_matches(candidate_id, total_score DESC, id);
CREATE INDEX IF NOT EXISTS idx_matches_job_score
    ON jobboard.candidate_job_matches(job_post_id, total_score DESC, id);
"#,
    },
];

/// Apply any migrations the ledger has not seen yet. Each pending migration
/// runs inside its own transaction together with its ledger row, so a failed
/// DDL statement leaves neither half behind.
#[instrument(skip(pool))]
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrationError> {
    let mut client = pool.get().await?;

    client
        .batch_execute("CREATE SCHEMA IF NOT EXISTS jobboard")
        .await?;
    client
        .batch_execute(
            "CREATE TABLE IF NOT EXISTS jobboard.schema_migrations (
                version INTEGER PRIMARY KEY,
                label TEXT NOT NULL,
                applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )",
        )
        .await?;

    for migration in MIGRATIONS {
        let seen = client
            .query_opt(
                "SELECT 1 FROM jobboard.schema_migrations WHERE version = $1",
                &[&migration.version],
            )
            .await?;
        if seen.is_some() {
            continue;
        }

        let tx = client.transaction().await?;
        tx.batch_execute(migration.ddl).await?;
        tx.execute(
            "INSERT INTO jobboard.schema_migrations (version, label) VALUES ($1, $2)",
            &[&migration.version, &migration.label],
        )
        .await?;
        tx.commit().await?;

        info!(version = migration.version, label = migration.label, "applied migration");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migration_versions_are_unique_and_ordered() {
        let versions: Vec<i32> = MIGRATIONS.iter().map(|m| m.version).collect();
        let mut sorted = versions.clone();
        sorted.sort_unstable();
        sorted.dedup();

        assert_eq!(versions, sorted);
    }

    #[test]
    fn match_table_ddl_carries_the_unique_pair_key() {
        let ddl = MIGRATIONS
            .iter()
            .find(|m| m.version == 2)
            .map(|m| m.ddl)
            .unwrap();

        assert!(ddl.contains("UNIQUE (candidate_id, job_post_id)"));
        assert!(ddl.contains("total_score >= 0.0 AND total_score <= 1.0"));
    }
}
