pub mod applications;
pub mod candidates;
pub mod job_posts;
pub mod matches;
pub mod migrations;
pub mod pool;
mod util;

// Keep re-exports unique so downstream crates see a single symbol per helper.
pub use applications::{fetch_applications_for_candidates, fetch_applications_for_job};
pub use candidates::{fetch_candidate, fetch_candidates, CatalogFetchError};
pub use job_posts::{fetch_active_job_posts, fetch_job_post};
pub use matches::{
    existing_pairs_for_candidates, existing_pairs_for_job, insert_match_record,
    top_matches_for_candidate, top_matches_for_job, upsert_match_record, MatchRecord,
    MatchRecordInsert, MatchStorageError,
};
pub use migrations::{run_migrations, MigrationError};
pub use pool::{connect_pool, connect_pool_checked, DbPoolError, PgPool};
