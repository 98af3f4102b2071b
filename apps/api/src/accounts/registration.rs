use tracing::info;

use crate::errors::AppError;
use crate::models::user::{User, UserCreate};
use crate::store::{find_entity, insert_entity, DocumentStore, Filter, StoreError};

const EMAIL_TAKEN: &str = "Email already registered";

/// Registers a new user. A second registration with the same email is a conflict.
pub async fn register_user(store: &dyn DocumentStore, input: UserCreate) -> Result<User, AppError> {
    let existing: Option<User> =
        find_entity(store, &Filter::new().eq("email", input.email.as_str())).await?;
    if existing.is_some() {
        return Err(AppError::Conflict(EMAIL_TAKEN.to_string()));
    }

    let user = User::new(input.email, input.name, input.role);
    match insert_entity(store, &user).await {
        Ok(()) => {}
        // lost a race with a concurrent registration
        Err(StoreError::Duplicate { .. }) => return Err(AppError::Conflict(EMAIL_TAKEN.to_string())),
        Err(e) => return Err(e.into()),
    }

    info!(user_id = %user.id, role = ?user.role, "User registered");
    Ok(user)
}

pub async fn get_user(store: &dyn DocumentStore, user_id: &str) -> Result<User, AppError> {
    find_entity(store, &Filter::new().eq("id", user_id))
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}
