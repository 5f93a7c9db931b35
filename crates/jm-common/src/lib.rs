pub mod api;
pub mod db;
pub mod logging;
pub mod matching;

use chrono::{DateTime, NaiveDate, Utc};
use strum::{Display, EnumString};

// Commonly used catalog models for the matching functions. Candidates,
// job posts and applications are owned by the surrounding job board; the
// matching engine only ever reads them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidate {
    pub id: Option<i64>,
    pub professional_title: String,
    pub degree: String,
    pub city: String,
    pub industry: Option<String>,
    pub employment_type: String,
    pub skills: Vec<String>,
    pub duration_of_internship: Option<i32>,
    pub resume_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobPosting {
    pub id: Option<i64>,
    pub title: String,
    pub location: String,
    pub industry: String,
    pub required_skills: Vec<String>,
    pub duration_of_internship: Option<i32>,
    pub is_active: bool,
    pub application_deadline: Option<NaiveDate>,
}

impl Candidate {
    pub fn has_resume(&self) -> bool {
        self.resume_path
            .as_deref()
            .is_some_and(|path| !path.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

/// A candidate's application to one job post. When present for a pair it can
/// carry its own requested internship duration, which overrides the profile
/// value during duration matching.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Application {
    pub id: Option<i64>,
    pub candidate_id: i64,
    pub job_post_id: i64,
    pub duration_of_internship: Option<i32>,
    pub status: ApplicationStatus,
    pub applied_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_resume_reference_counts_as_absent() {
        let mut candidate = Candidate::default();
        assert!(!candidate.has_resume());

        candidate.resume_path = Some("   ".into());
        assert!(!candidate.has_resume());

        candidate.resume_path = Some("resumes/jane.pdf".into());
        assert!(candidate.has_resume());
    }

    #[test]
    fn application_status_round_trips_snake_case() {
        use std::str::FromStr;

        assert_eq!(ApplicationStatus::Accepted.to_string(), "accepted");
        assert_eq!(
            ApplicationStatus::from_str("rejected").unwrap(),
            ApplicationStatus::Rejected
        );
    }
}
