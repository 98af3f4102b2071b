use axum::{
    extract::{Path, State},
    Json,
};

use crate::accounts::registration::{get_user, register_user};
use crate::errors::AppError;
use crate::models::user::{User, UserCreate};
use crate::state::AppState;

/// POST /api/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<UserCreate>,
) -> Result<Json<User>, AppError> {
    let user = register_user(state.store.as_ref(), req).await?;
    Ok(Json(user))
}

/// GET /api/users/:id
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, AppError> {
    Ok(Json(get_user(state.store.as_ref(), &user_id).await?))
}
