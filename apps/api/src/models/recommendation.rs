use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::mapper::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationType {
    Job,
    Candidate,
    Course,
}

/// Append-only log of recommendations handed out to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiRecommendation {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub content: Value,
    pub created_at: DateTime<Utc>,
}

impl AiRecommendation {
    pub fn new(user_id: String, kind: RecommendationType, content: Value) -> Self {
        Self {
            id: super::new_id(),
            user_id,
            kind,
            content,
            created_at: Utc::now(),
        }
    }
}

impl Entity for AiRecommendation {
    const COLLECTION: &'static str = "ai_recommendations";
    const DATETIME_FIELDS: &'static [&'static str] = &["created_at"];
}
