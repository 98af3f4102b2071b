use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::recommendations::gateway::{recommend_candidates, recommend_courses, recommend_jobs};
use crate::recommendations::schema::{
    CandidateRecommendations, CourseRecommendations, JobRecommendations,
};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct JobIdQuery {
    pub job_id: String,
}

/// POST /api/ai/job-recommendations/:user_id
pub async fn handle_job_recommendations(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<JobRecommendations>, AppError> {
    let result = recommend_jobs(state.store.as_ref(), state.llm.as_ref(), &user_id).await?;
    Ok(Json(result))
}

/// POST /api/ai/candidate-recommendations/:company_id?job_id=
pub async fn handle_candidate_recommendations(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
    Query(params): Query<JobIdQuery>,
) -> Result<Json<CandidateRecommendations>, AppError> {
    let result = recommend_candidates(
        state.store.as_ref(),
        state.llm.as_ref(),
        &company_id,
        &params.job_id,
    )
    .await?;
    Ok(Json(result))
}

/// POST /api/ai/course-recommendations/:user_id
pub async fn handle_course_recommendations(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<CourseRecommendations>, AppError> {
    let result = recommend_courses(state.store.as_ref(), state.llm.as_ref(), &user_id).await?;
    Ok(Json(result))
}
