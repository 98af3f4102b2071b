use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mapper::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Candidate,
    Employer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, name: String, role: Role) -> Self {
        Self {
            id: super::new_id(),
            email,
            name,
            role,
            avatar: None,
            created_at: Utc::now(),
        }
    }
}

impl Entity for User {
    const COLLECTION: &'static str = "users";
    const DATETIME_FIELDS: &'static [&'static str] = &["created_at"];
}

/// Body of `POST /register`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub name: String,
    pub role: Role,
}
