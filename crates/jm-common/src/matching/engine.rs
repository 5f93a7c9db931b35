use std::collections::HashSet;

use crate::{Candidate, JobPosting};

/// One not-yet-persisted (candidate, job) combination selected by the
/// planner.
#[derive(Debug, Clone, Copy)]
pub struct PlannedPair<'a> {
    pub candidate: &'a Candidate,
    pub job: &'a JobPosting,
}

impl PlannedPair<'_> {
    pub fn key(&self) -> (i64, i64) {
        // plan_pairs only yields pairs whose ids are present.
        (
            self.candidate.id.unwrap_or_default(),
            self.job.id.unwrap_or_default(),
        )
    }
}

/// Select the pairs the bulk runner should evaluate: the Cartesian product
/// of all candidates and the *active* jobs, minus pairs that already have a
/// persisted match record. Existing pairs are skipped, not refreshed.
///
/// Entities without an id cannot be keyed and are left out.
pub fn plan_pairs<'a>(
    candidates: &'a [Candidate],
    jobs: &'a [JobPosting],
    existing: &HashSet<(i64, i64)>,
) -> Vec<PlannedPair<'a>> {
    let active_jobs: Vec<&JobPosting> = jobs
        .iter()
        .filter(|job| job.is_active && job.id.is_some())
        .collect();

    let mut planned = Vec::new();
    for candidate in candidates {
        let Some(candidate_id) = candidate.id else {
            continue;
        };

        for &job in &active_jobs {
            let Some(job_id) = job.id else {
                continue;
            };
            if existing.contains(&(candidate_id, job_id)) {
                continue;
            }

            planned.push(PlannedPair { candidate, job });
        }
    }

    planned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: i64) -> Candidate {
        Candidate {
            id: Some(id),
            professional_title: "Software Engineer".into(),
            ..Candidate::default()
        }
    }

    fn job(id: i64, is_active: bool) -> JobPosting {
        JobPosting {
            id: Some(id),
            title: "Software Engineer".into(),
            is_active,
            ..JobPosting::default()
        }
    }

    #[test]
    fn plans_product_of_candidates_and_active_jobs() {
        let candidates = vec![candidate(1), candidate(2)];
        let jobs = vec![job(10, true), job(11, true), job(12, false)];

        let planned = plan_pairs(&candidates, &jobs, &HashSet::new());

        assert_eq!(planned.len(), 4);
        assert!(planned.iter().all(|pair| pair.job.is_active));
    }

    #[test]
    fn existing_pairs_are_skipped() {
        let candidates = vec![candidate(1)];
        let jobs = vec![job(10, true)];
        let existing: HashSet<(i64, i64)> = [(1, 10)].into_iter().collect();

        let planned = plan_pairs(&candidates, &jobs, &existing);

        assert!(planned.is_empty());
    }

    #[test]
    fn rerun_after_planning_everything_is_empty() {
        let candidates = vec![candidate(1), candidate(2)];
        let jobs = vec![job(10, true), job(11, true)];

        let first = plan_pairs(&candidates, &jobs, &HashSet::new());
        let existing: HashSet<(i64, i64)> = first.iter().map(PlannedPair::key).collect();
        let second = plan_pairs(&candidates, &jobs, &existing);

        assert_eq!(first.len(), 4);
        assert!(second.is_empty());
    }

    #[test]
    fn unsaved_entities_are_not_planned() {
        let candidates = vec![Candidate::default()];
        let jobs = vec![JobPosting {
            is_active: true,
            ..JobPosting::default()
        }];

        assert!(plan_pairs(&candidates, &jobs, &HashSet::new()).is_empty());
    }
}
