use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mapper::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub industry: String,
    pub size: String,
    pub location: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    pub fn new(user_id: String, input: CompanyInput) -> Self {
        Self {
            id: super::new_id(),
            user_id,
            name: input.name,
            description: input.description,
            industry: input.industry,
            size: input.size,
            location: input.location,
            website: input.website,
            logo: None,
            updated_at: Utc::now(),
        }
    }
}

impl Entity for Company {
    const COLLECTION: &'static str = "companies";
    const DATETIME_FIELDS: &'static [&'static str] = &["updated_at"];
}

/// Body of `POST /companies/:user_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyInput {
    pub name: String,
    pub description: String,
    pub industry: String,
    pub size: String,
    pub location: String,
    #[serde(default)]
    pub website: Option<String>,
}
