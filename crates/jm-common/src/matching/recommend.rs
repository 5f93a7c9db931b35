use std::cmp::Ordering;

use crate::{Application, Candidate, JobPosting};

use super::skills::skill_score;

/// Knobs for the live recommendation queries. Defaults follow the engine's
/// documented behavior; the skill threshold can be tuned per deployment via
/// `JM_SKILL_MATCH_THRESHOLD`.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationConfig {
    pub skill_threshold: f64,
    pub fallback_limit: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            skill_threshold: env_skill_threshold(),
            fallback_limit: 10,
        }
    }
}

fn env_skill_threshold() -> f64 {
    std::env::var("JM_SKILL_MATCH_THRESHOLD")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.4)
}

fn nonblank_eq_ignore_case(left: &str, right: &str) -> bool {
    let left = left.trim();
    let right = right.trim();
    !left.is_empty() && left.eq_ignore_ascii_case(right)
}

fn latest_application_for_candidate<'a>(
    applications: &'a [Application],
    candidate_id: i64,
) -> Option<&'a Application> {
    applications
        .iter()
        .filter(|app| app.candidate_id == candidate_id)
        .max_by_key(|app| app.applied_at)
}

fn application_for_pair<'a>(
    applications: &'a [Application],
    candidate_id: i64,
    job_post_id: i64,
) -> Option<&'a Application> {
    applications
        .iter()
        .filter(|app| app.candidate_id == candidate_id && app.job_post_id == job_post_id)
        .max_by_key(|app| app.applied_at)
}

fn wanted_duration(candidate: &Candidate, application: Option<&Application>) -> Option<i32> {
    super::scoring::resolve_internship_duration(candidate, application)
}

fn durations_match(wanted: Option<i32>, offered: Option<i32>) -> bool {
    matches!((wanted, offered), (Some(w), Some(o)) if w == o)
}

fn sort_ranked<T>(ranked: &mut [(f64, Option<i64>, T)]) {
    ranked.sort_by(|a, b| {
        match b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal) {
            Ordering::Equal => a.1.cmp(&b.1),
            other => other,
        }
    });
}

/// Contract A: live filter over the active job catalog for one candidate.
/// Primary pass requires location, duration and industry-vs-employment-type
/// agreement plus a minimum skill score; when it comes up empty, up to
/// `fallback_limit` postings matching only the industry test are returned.
/// Ordering is descending skill score with ascending id as the tie-break,
/// so repeated calls over the same catalog page identically.
pub fn jobs_for_candidate<'a>(
    candidate: &Candidate,
    jobs: &'a [JobPosting],
    applications: &[Application],
    config: &RecommendationConfig,
) -> Vec<&'a JobPosting> {
    let candidate_id = candidate.id.unwrap_or_default();
    let latest = latest_application_for_candidate(applications, candidate_id);
    let wanted = wanted_duration(candidate, latest);

    let active: Vec<&JobPosting> = jobs.iter().filter(|job| job.is_active).collect();

    let mut primary: Vec<(f64, Option<i64>, &JobPosting)> = active
        .iter()
        .filter(|job| nonblank_eq_ignore_case(&candidate.city, &job.location))
        .filter(|job| durations_match(wanted, job.duration_of_internship))
        .filter(|job| nonblank_eq_ignore_case(&job.industry, &candidate.employment_type))
        .map(|job| (skill_score(&candidate.skills, &job.required_skills), job.id, *job))
        .filter(|(score, _, _)| *score >= config.skill_threshold)
        .collect();

    if primary.is_empty() {
        let mut fallback: Vec<(f64, Option<i64>, &JobPosting)> = active
            .iter()
            .filter(|job| nonblank_eq_ignore_case(&job.industry, &candidate.employment_type))
            .map(|job| (skill_score(&candidate.skills, &job.required_skills), job.id, *job))
            .collect();

        sort_ranked(&mut fallback);
        fallback.truncate(config.fallback_limit);
        return fallback.into_iter().map(|(_, _, job)| job).collect();
    }

    sort_ranked(&mut primary);
    primary.into_iter().map(|(_, _, job)| job).collect()
}

/// Contract B: the symmetric query, ranking candidates for one job post.
/// Duration resolution is pair-scoped here because the job is fixed.
pub fn candidates_for_job<'a>(
    job: &JobPosting,
    candidates: &'a [Candidate],
    applications: &[Application],
    config: &RecommendationConfig,
) -> Vec<&'a Candidate> {
    let job_id = job.id.unwrap_or_default();

    let mut primary: Vec<(f64, Option<i64>, &Candidate)> = candidates
        .iter()
        .filter(|candidate| nonblank_eq_ignore_case(&candidate.city, &job.location))
        .filter(|candidate| {
            let application = candidate
                .id
                .and_then(|id| application_for_pair(applications, id, job_id));
            durations_match(
                wanted_duration(candidate, application),
                job.duration_of_internship,
            )
        })
        .filter(|candidate| nonblank_eq_ignore_case(&job.industry, &candidate.employment_type))
        .map(|candidate| {
            (
                skill_score(&candidate.skills, &job.required_skills),
                candidate.id,
                candidate,
            )
        })
        .filter(|(score, _, _)| *score >= config.skill_threshold)
        .collect();

    if primary.is_empty() {
        let mut fallback: Vec<(f64, Option<i64>, &Candidate)> = candidates
            .iter()
            .filter(|candidate| {
                nonblank_eq_ignore_case(&job.industry, &candidate.employment_type)
            })
            .map(|candidate| {
                (
                    skill_score(&candidate.skills, &job.required_skills),
                    candidate.id,
                    candidate,
                )
            })
            .collect();

        sort_ranked(&mut fallback);
        fallback.truncate(config.fallback_limit);
        return fallback.into_iter().map(|(_, _, candidate)| candidate).collect();
    }

    sort_ranked(&mut primary);
    primary.into_iter().map(|(_, _, candidate)| candidate).collect()
}
