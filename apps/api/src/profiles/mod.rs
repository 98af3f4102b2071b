// Candidate and company profiles, one of each per user, plus inline CV storage.

pub mod candidates;
pub mod companies;
pub mod cv;
pub mod handlers;

use chrono::{DateTime, Duration, Utc};

use crate::errors::AppError;
use crate::models::user::User;
use crate::store::{find_entity, DocumentStore, Filter};

/// Fails with NotFound unless a user with `user_id` exists.
pub(crate) async fn require_user(store: &dyn DocumentStore, user_id: &str) -> Result<User, AppError> {
    find_entity(store, &Filter::new().eq("id", user_id))
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// A fresh `updated_at` strictly after `previous`, even if the wall clock is not.
pub(crate) fn next_update_stamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    Utc::now().max(previous + Duration::microseconds(1))
}
