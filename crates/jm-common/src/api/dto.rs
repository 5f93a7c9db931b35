use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::db::MatchRecord;
use crate::{Candidate, JobPosting};

/// Serialized job post as returned by the recommendation endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct JobPostingDto {
    pub id: Option<i64>,
    pub title: String,
    pub location: String,
    pub industry: String,
    pub required_skills: Vec<String>,
    pub duration_of_internship: Option<i32>,
    pub application_deadline: Option<NaiveDate>,
}

impl From<&JobPosting> for JobPostingDto {
    fn from(job: &JobPosting) -> Self {
        Self {
            id: job.id,
            title: job.title.clone(),
            location: job.location.clone(),
            industry: job.industry.clone(),
            required_skills: job.required_skills.clone(),
            duration_of_internship: job.duration_of_internship,
            application_deadline: job.application_deadline,
        }
    }
}

/// Serialized candidate as returned by the recommendation endpoints. The
/// resume itself stays private; only its presence is exposed.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateDto {
    pub id: Option<i64>,
    pub professional_title: String,
    pub degree: String,
    pub city: String,
    pub industry: Option<String>,
    pub employment_type: String,
    pub skills: Vec<String>,
    pub duration_of_internship: Option<i32>,
    pub has_resume: bool,
}

impl From<&Candidate> for CandidateDto {
    fn from(candidate: &Candidate) -> Self {
        Self {
            id: candidate.id,
            professional_title: candidate.professional_title.clone(),
            degree: candidate.degree.clone(),
            city: candidate.city.clone(),
            industry: candidate.industry.clone(),
            employment_type: candidate.employment_type.clone(),
            skills: candidate.skills.clone(),
            duration_of_internship: candidate.duration_of_internship,
            has_resume: candidate.has_resume(),
        }
    }
}

/// Persisted match record for the ranked-list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRecordDto {
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

impl From<&MatchRecord> for MatchRecordDto {
    fn from(record: &MatchRecord) -> Self {
        Self {
            id: record.id,
            candidate_id: record.candidate_id,
            job_post_id: record.job_post_id,
            title_match: record.title_match,
            degree_match: record.degree_match,
            location_match: record.location_match,
            duration_match: record.duration_match,
            industry_match: record.industry_match,
            has_resume: record.has_resume,
            skill_match_score: record.skill_match_score,
            total_score: record.total_score,
            created_at: record.created_at,
        }
    }
}
