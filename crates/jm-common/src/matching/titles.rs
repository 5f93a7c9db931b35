use std::collections::HashMap;
use std::sync::LazyLock;

use strsim::normalized_levenshtein;

/// Similarity ratio above which two otherwise-unrelated titles are treated
/// as a match. Fixed default; `JM_TITLE_SIMILARITY_THRESHOLD` can override
/// it for experiments.
pub const TITLE_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Canonical title → accepted synonym phrases. Process-wide configuration
/// data, not runtime-editable.
static TITLE_SYNONYMS: &[(&str, &[&str])] = &[
    (
        "frontend developer",
        &["frontend engineer", "front end developer", "web developer", "react developer"],
    ),
    (
        "backend developer",
        &["backend engineer", "back end developer", "server side developer", "api developer"],
    ),
    (
        "software engineer",
        &["software developer", "full stack developer", "fullstack engineer"],
    ),
    (
        "mobile developer",
        &["mobile engineer", "android developer", "ios developer", "flutter developer"],
    ),
    (
        "data analyst",
        &["data scientist", "business analyst", "analytics engineer"],
    ),
    (
        "devops engineer",
        &["site reliability engineer", "platform engineer", "infrastructure engineer"],
    ),
    (
        "product designer",
        &["ui designer", "ux designer", "ui/ux designer"],
    ),
    (
        "legal researcher",
        &["legal analyst", "law researcher", "paralegal"],
    ),
];

static TITLE_TO_CANONICAL: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for (canonical, synonyms) in TITLE_SYNONYMS {
        map.insert(*canonical, *canonical);
        for synonym in *synonyms {
            map.insert(*synonym, *canonical);
        }
    }
    map
});

fn env_similarity_threshold() -> f64 {
    std::env::var("JM_TITLE_SIMILARITY_THRESHOLD")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(TITLE_SIMILARITY_THRESHOLD)
}

fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

fn canonical_title(normalized: &str) -> Option<&'static str> {
    TITLE_TO_CANONICAL.get(normalized).copied()
}

/// Three-tier title comparison, applied in order:
/// 1. case-insensitive exact match,
/// 2. both titles resolve to the same canonical synonym-table entry,
/// 3. normalized edit-distance similarity above the threshold.
pub fn titles_match(candidate_title: &str, job_title: &str) -> bool {
    titles_match_with_threshold(candidate_title, job_title, env_similarity_threshold())
}

pub fn titles_match_with_threshold(
    candidate_title: &str,
    job_title: &str,
    threshold: f64,
) -> bool {
    let left = normalize_title(candidate_title);
    let right = normalize_title(job_title);

    if left.is_empty() || right.is_empty() {
        return false;
    }

    if left == right {
        return true;
    }

    if let (Some(a), Some(b)) = (canonical_title(&left), canonical_title(&right)) {
        if a == b {
            return true;
        }
    }

    normalized_levenshtein(&left, &right) > threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_ignores_case_and_whitespace() {
        assert!(titles_match("Software Engineer", "  software engineer "));
    }

    #[test]
    fn synonym_table_matches_canonical_and_synonyms() {
        assert!(titles_match("Frontend Developer", "frontend engineer"));
        assert!(titles_match("web developer", "react developer"));
        assert!(titles_match("Paralegal", "legal researcher"));
    }

    #[test]
    fn unrelated_titles_do_not_match() {
        assert!(!titles_match("legal researcher", "backend developer"));
        assert!(!titles_match("data analyst", "mobile developer"));
    }

    #[test]
    fn fuzzy_tier_tolerates_small_typos() {
        assert!(titles_match("Backend Developer", "Backend Developr"));
        assert!(!titles_match_with_threshold(
            "Backend Developer",
            "Backend Developr",
            0.99
        ));
    }

    #[test]
    fn empty_titles_never_match() {
        assert!(!titles_match("", ""));
        assert!(!titles_match("software engineer", "  "));
    }

    #[test]
    fn synonym_lists_do_not_bleed_across_entries() {
        // "frontend engineer" and "backend engineer" both resolve, but to
        // different canonical titles; the fuzzy tier must not rescue them.
        assert!(!titles_match("frontend engineer", "backend engineer"));
    }
}
