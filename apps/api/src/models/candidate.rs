use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mapper::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub education: String,
    /// Base64-encoded CV, stored inline.
    #[serde(default)]
    pub cv_file: Option<String>,
    #[serde(default)]
    pub desired_position: String,
    #[serde(default)]
    pub desired_salary: Option<i64>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub bio: String,
    pub updated_at: DateTime<Utc>,
}

impl Candidate {
    pub fn new(user_id: String, input: CandidateInput) -> Self {
        Self {
            id: super::new_id(),
            user_id,
            skills: input.skills,
            experience: input.experience,
            education: input.education,
            cv_file: None,
            desired_position: input.desired_position,
            desired_salary: input.desired_salary,
            location: input.location,
            bio: input.bio,
            updated_at: Utc::now(),
        }
    }
}

impl Entity for Candidate {
    const COLLECTION: &'static str = "candidates";
    const DATETIME_FIELDS: &'static [&'static str] = &["updated_at"];
}

/// Body of `POST`/`PUT /candidates/:user_id`. On update every field is replaced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateInput {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub desired_position: String,
    #[serde(default)]
    pub desired_salary: Option<i64>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub bio: String,
}
