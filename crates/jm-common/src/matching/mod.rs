pub mod engine;
pub mod industry;
pub mod recommend;
pub mod runner;
pub mod scoring;
pub mod skills;
pub mod titles;
pub mod weights;

pub use engine::{plan_pairs, PlannedPair};
pub use industry::{effective_industry, infer_industry};
pub use recommend::{candidates_for_job, jobs_for_candidate, RecommendationConfig};
pub use runner::{IncrementalScope, MatchRunError, MatchRunSummary, RefreshSummary};
pub use scoring::{
    combine_score, resolve_internship_duration, round4, score_pair, MatchSignals, PairScore,
};
pub use skills::skill_score;
pub use titles::{titles_match, titles_match_with_threshold, TITLE_SIMILARITY_THRESHOLD};
pub use weights::{Weights, MATCH_WEIGHTS};
