//! Result schemas for recommendation replies.
//!
//! The model is asked for JSON; its reply is parsed into these types and checked
//! against the sample it was shown before anything reaches the caller.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::llm_client::strip_json_fences;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("reply is not valid recommendation JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("match_percentage {value} for '{id}' is outside 0-100")]
    MatchOutOfRange { id: String, value: f64 },

    #[error("{kind} '{id}' was not among the {kind}s offered")]
    UnknownId { kind: &'static str, id: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecommendation {
    pub job_id: String,
    pub title: String,
    pub match_percentage: f64,
    pub reasons: Vec<String>,
    pub tips: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecommendations {
    pub recommendations: Vec<JobRecommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecommendation {
    pub candidate_id: String,
    pub match_percentage: f64,
    pub strengths: Vec<String>,
    pub concerns: Vec<String>,
    pub interview_tips: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecommendations {
    pub recommendations: Vec<CandidateRecommendation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    pub provider: String,
    pub duration: String,
    pub skill_focus: String,
    pub career_impact: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecommendations {
    pub courses: Vec<Course>,
}

fn parse_reply<T: DeserializeOwned>(reply: &str) -> Result<T, SchemaError> {
    Ok(serde_json::from_str(strip_json_fences(reply))?)
}

fn check_match(id: &str, value: f64) -> Result<(), SchemaError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(SchemaError::MatchOutOfRange {
            id: id.to_string(),
            value,
        });
    }
    Ok(())
}

fn check_offered(kind: &'static str, id: &str, offered: &[&str]) -> Result<(), SchemaError> {
    if !offered.contains(&id) {
        return Err(SchemaError::UnknownId {
            kind,
            id: id.to_string(),
        });
    }
    Ok(())
}

/// Parses job recommendations; every `job_id` must be one of `offered`.
pub fn parse_job_recommendations(
    reply: &str,
    offered: &[&str],
) -> Result<JobRecommendations, SchemaError> {
    let parsed: JobRecommendations = parse_reply(reply)?;
    for rec in &parsed.recommendations {
        check_offered("job", &rec.job_id, offered)?;
        check_match(&rec.job_id, rec.match_percentage)?;
    }
    Ok(parsed)
}

/// Parses candidate recommendations; every `candidate_id` must be one of `offered`.
pub fn parse_candidate_recommendations(
    reply: &str,
    offered: &[&str],
) -> Result<CandidateRecommendations, SchemaError> {
    let parsed: CandidateRecommendations = parse_reply(reply)?;
    for rec in &parsed.recommendations {
        check_offered("candidate", &rec.candidate_id, offered)?;
        check_match(&rec.candidate_id, rec.match_percentage)?;
    }
    Ok(parsed)
}

pub fn parse_course_recommendations(reply: &str) -> Result<CourseRecommendations, SchemaError> {
    parse_reply(reply)
}
