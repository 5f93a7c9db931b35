use crate::{Application, Candidate, JobPosting};

use super::industry::{effective_industry, is_technical_degree, is_technical_industry};
use super::skills::skill_score;
use super::titles::titles_match;
use super::weights::MATCH_WEIGHTS;

/// Round to 4 decimal places. Persisted scores and ranking keys go through
/// this so equal inputs always produce bit-identical totals.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// The per-criterion outcome of scoring one (candidate, job) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MatchSignals {
    pub title_match: bool,
    pub degree_match: bool,
    pub location_match: bool,
    pub duration_match: bool,
    pub industry_match: bool,
    pub has_resume: bool,
    pub skill_match_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairScore {
    pub signals: MatchSignals,
    pub total: f64,
}

/// Weighted combination of the sub-signals using the fixed weight table.
pub fn combine_score(signals: &MatchSignals) -> f64 {
    let weights = MATCH_WEIGHTS;
    let total = weights.title * f64::from(signals.title_match as u8)
        + weights.skills * signals.skill_match_score
        + weights.degree * f64::from(signals.degree_match as u8)
        + weights.location * f64::from(signals.location_match as u8)
        + weights.duration * f64::from(signals.duration_match as u8)
        + weights.industry * f64::from(signals.industry_match as u8)
        + weights.resume * f64::from(signals.has_resume as u8);

    round4(total)
}

/// Duration to compare against the job's: the application's own requested
/// duration when one is recorded for the pair, otherwise the candidate
/// profile value. `None` means the comparison cannot match.
pub fn resolve_internship_duration(
    candidate: &Candidate,
    application: Option<&Application>,
) -> Option<i32> {
    application
        .and_then(|app| app.duration_of_internship)
        .or(candidate.duration_of_internship)
}

fn nonblank_eq_ignore_case(left: &str, right: &str) -> bool {
    let left = left.trim();
    let right = right.trim();
    !left.is_empty() && left.eq_ignore_ascii_case(right)
}

/// Compute every sub-signal and the weighted total for one pair. Total over
/// its domain: a missing or blank field degrades the corresponding signal to
/// "no match" instead of failing.
pub fn score_pair(
    candidate: &Candidate,
    job: &JobPosting,
    application: Option<&Application>,
) -> PairScore {
    let duration = resolve_internship_duration(candidate, application);
    let duration_match = matches!(
        (duration, job.duration_of_internship),
        (Some(wanted), Some(offered)) if wanted == offered
    );

    let candidate_industry =
        effective_industry(candidate.industry.as_deref(), &candidate.professional_title);
    let job_industry = effective_industry(Some(job.industry.as_str()), &job.title);

    let signals = MatchSignals {
        title_match: titles_match(&candidate.professional_title, &job.title),
        degree_match: is_technical_degree(&candidate.degree)
            && is_technical_industry(&job.industry),
        location_match: nonblank_eq_ignore_case(&candidate.city, &job.location),
        duration_match,
        industry_match: candidate_industry
            .as_deref()
            .is_some_and(is_technical_industry)
            && job_industry.as_deref().is_some_and(is_technical_industry),
        has_resume: candidate.has_resume(),
        skill_match_score: skill_score(&candidate.skills, &job.required_skills),
    };

    PairScore {
        signals,
        total: combine_score(&signals),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_signals() -> MatchSignals {
        MatchSignals {
            title_match: true,
            degree_match: true,
            location_match: true,
            duration_match: true,
            industry_match: true,
            has_resume: true,
            skill_match_score: 1.0,
        }
    }

    #[test]
    fn perfect_pair_scores_exactly_one() {
        assert_eq!(combine_score(&full_signals()), 1.0);
    }

    #[test]
    fn empty_signals_score_zero() {
        assert_eq!(combine_score(&MatchSignals::default()), 0.0);
    }

    #[test]
    fn skill_score_contributes_continuously() {
        let mut signals = MatchSignals::default();
        signals.skill_match_score = 0.5;
        assert_eq!(combine_score(&signals), 0.15);
    }

    #[test]
    fn application_duration_overrides_profile() {
        let candidate = Candidate {
            duration_of_internship: Some(3),
            ..Candidate::default()
        };
        let application = Application {
            candidate_id: 1,
            job_post_id: 2,
            duration_of_internship: Some(6),
            ..Application::default()
        };

        assert_eq!(
            resolve_internship_duration(&candidate, Some(&application)),
            Some(6)
        );
    }

    #[test]
    fn application_without_duration_falls_back_to_profile() {
        let candidate = Candidate {
            duration_of_internship: Some(3),
            ..Candidate::default()
        };
        let application = Application {
            candidate_id: 1,
            job_post_id: 2,
            ..Application::default()
        };

        assert_eq!(
            resolve_internship_duration(&candidate, Some(&application)),
            Some(3)
        );
        assert_eq!(resolve_internship_duration(&candidate, None), Some(3));
    }

    #[test]
    fn missing_durations_never_match() {
        let candidate = Candidate::default();
        let job = JobPosting {
            duration_of_internship: Some(6),
            is_active: true,
            ..JobPosting::default()
        };

        let score = score_pair(&candidate, &job, None);
        assert!(!score.signals.duration_match);
    }

    #[test]
    fn scores_frontend_pair_end_to_end() {
        let candidate = Candidate {
            id: Some(1),
            professional_title: "Frontend Developer".into(),
            degree: "Computer Science".into(),
            city: "Lagos".into(),
            industry: None,
            employment_type: "Tech".into(),
            skills: vec!["python".into(), "react".into()],
            duration_of_internship: Some(6),
            resume_path: Some("resumes/ada.pdf".into()),
        };
        let job = JobPosting {
            id: Some(2),
            title: "Frontend Engineer".into(),
            location: "Lagos".into(),
            industry: "Tech".into(),
            required_skills: vec!["python".into(), "react".into(), "sql".into()],
            duration_of_internship: Some(6),
            is_active: true,
            application_deadline: None,
        };

        let score = score_pair(&candidate, &job, None);

        assert!(score.signals.title_match);
        assert_eq!(score.signals.skill_match_score, 0.6667);
        assert!(score.signals.location_match);
        assert!(score.signals.duration_match);
        assert!(score.signals.degree_match);
        assert!(score.signals.industry_match);
        assert!(score.signals.has_resume);
        assert_eq!(score.total, 0.9);
    }

    #[test]
    fn blank_fields_degrade_to_no_match() {
        let score = score_pair(&Candidate::default(), &JobPosting::default(), None);

        assert_eq!(score.signals, MatchSignals::default());
        assert_eq!(score.total, 0.0);
    }
}
