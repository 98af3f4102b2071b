use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mapper::Entity;

/// Employment type. Values outside the known set are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    #[serde(untagged)]
    Other(String),
}

/// Seniority. Values outside the known set are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Executive,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub company_id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub salary_min: Option<i64>,
    #[serde(default)]
    pub salary_max: Option<i64>,
    pub location: String,
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
    pub posted_at: DateTime<Utc>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl Job {
    /// A freshly posted job is always active.
    pub fn new(company_id: String, input: JobInput) -> Self {
        Self {
            id: super::new_id(),
            company_id,
            title: input.title,
            description: input.description,
            requirements: input.requirements,
            salary_min: input.salary_min,
            salary_max: input.salary_max,
            location: input.location,
            job_type: input.job_type,
            experience_level: input.experience_level,
            posted_at: Utc::now(),
            deadline: input.deadline,
            is_active: true,
        }
    }
}

impl Entity for Job {
    const COLLECTION: &'static str = "jobs";
    const DATETIME_FIELDS: &'static [&'static str] = &["posted_at", "deadline"];
}

/// Body of `POST /jobs/:company_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobInput {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub salary_min: Option<i64>,
    #[serde(default)]
    pub salary_max: Option<i64>,
    pub location: String,
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
}
