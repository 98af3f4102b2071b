use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::errors::AppError;
use crate::jobs::postings::{create_job, get_job, list_jobs, JobListQuery};
use crate::models::job::{Job, JobInput};
use crate::state::AppState;

/// POST /api/jobs/:company_id
pub async fn handle_create_job(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
    Json(req): Json<JobInput>,
) -> Result<Json<Job>, AppError> {
    Ok(Json(create_job(state.store.as_ref(), &company_id, req).await?))
}

/// GET /api/jobs?skip=&limit=
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<Json<Vec<Job>>, AppError> {
    Ok(Json(list_jobs(state.store.as_ref(), query).await?))
}

/// GET /api/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<Job>, AppError> {
    Ok(Json(get_job(state.store.as_ref(), &job_id).await?))
}
