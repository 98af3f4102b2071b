use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::candidate::{Candidate, CandidateInput};
use crate::models::company::{Company, CompanyInput};
use crate::profiles::{candidates, companies, cv};
use crate::state::AppState;

/// Multipart field carrying the CV.
const CV_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct CvUploadResponse {
    pub message: String,
    pub filename: String,
}

/// POST /api/candidates/:user_id
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<CandidateInput>,
) -> Result<Json<Candidate>, AppError> {
    let candidate = candidates::create_candidate(state.store.as_ref(), &user_id, req).await?;
    Ok(Json(candidate))
}

/// GET /api/candidates/:user_id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Candidate>, AppError> {
    Ok(Json(
        candidates::get_candidate(state.store.as_ref(), &user_id).await?,
    ))
}

/// PUT /api/candidates/:user_id
pub async fn handle_update_candidate(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<CandidateInput>,
) -> Result<Json<Candidate>, AppError> {
    let candidate = candidates::update_candidate(state.store.as_ref(), &user_id, req).await?;
    Ok(Json(candidate))
}

/// POST /api/companies/:user_id
pub async fn handle_create_company(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<CompanyInput>,
) -> Result<Json<Company>, AppError> {
    let company = companies::create_company(state.store.as_ref(), &user_id, req).await?;
    Ok(Json(company))
}

/// GET /api/companies/:user_id
pub async fn handle_get_company(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Company>, AppError> {
    Ok(Json(
        companies::get_company(state.store.as_ref(), &user_id).await?,
    ))
}

/// POST /api/upload-cv/:user_id
///
/// Reads the whole `file` field into memory; no size or content-type checks.
pub async fn handle_upload_cv(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<CvUploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Upload(e.to_string()))?
    {
        if field.name() != Some(CV_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let contents = field
            .bytes()
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;

        cv::store_cv(state.store.as_ref(), &user_id, &contents).await?;

        return Ok(Json(CvUploadResponse {
            message: "CV uploaded successfully".to_string(),
            filename,
        }));
    }

    Err(AppError::Validation(format!(
        "multipart field '{CV_FIELD}' is required"
    )))
}
