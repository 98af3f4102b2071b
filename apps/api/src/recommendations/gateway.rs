use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::postings::{active_jobs, get_job};
use crate::llm_client::ChatCompletion;
use crate::models::candidate::Candidate;
use crate::models::job::Job;
use crate::models::recommendation::{AiRecommendation, RecommendationType};
use crate::profiles::candidates::get_candidate;
use crate::recommendations::prompts::{
    candidate_recommendation_prompt, course_recommendation_prompt, job_recommendation_prompt,
    system_prompt, CANDIDATE_RECOMMENDATION_ROLE, COURSE_RECOMMENDATION_ROLE,
    JOB_RECOMMENDATION_ROLE,
};
use crate::recommendations::schema::{
    parse_candidate_recommendations, parse_course_recommendations, parse_job_recommendations,
    CandidateRecommendations, CourseRecommendations, JobRecommendations, SchemaError,
};
use crate::store::{find_entities, insert_entity, DocumentStore, Filter};

/// Upper bound on counterpart entities shown to the model.
pub const SAMPLE_SIZE: u64 = 10;

fn session_id(prefix: &str, anchor: &str) -> String {
    format!("{prefix}_{anchor}_{}", Uuid::new_v4())
}

async fn ask(llm: &dyn ChatCompletion, session: &str, prompt: &str, role: &str) -> Result<String, AppError> {
    llm.complete(prompt, &system_prompt(role)).await.map_err(|e| {
        error!(session, "Chat completion failed: {e}");
        AppError::Llm(e)
    })
}

fn rejected(session: &str, err: SchemaError) -> AppError {
    error!(session, "Recommendation reply rejected: {err}");
    AppError::RecommendationParse(err.to_string())
}

fn prompt_error(err: serde_json::Error) -> AppError {
    AppError::Internal(err.into())
}

/// Suggests active jobs for the user's candidate profile and logs the result.
pub async fn recommend_jobs(
    store: &dyn DocumentStore,
    llm: &dyn ChatCompletion,
    user_id: &str,
) -> Result<JobRecommendations, AppError> {
    let candidate = get_candidate(store, user_id).await?;
    let jobs: Vec<Job> = find_entities(store, &active_jobs(), 0, SAMPLE_SIZE).await?;

    let session = session_id("job_rec", user_id);
    let prompt = job_recommendation_prompt(&candidate, &jobs).map_err(prompt_error)?;
    let reply = ask(llm, &session, &prompt, JOB_RECOMMENDATION_ROLE).await?;

    let offered: Vec<&str> = jobs.iter().map(|j| j.id.as_str()).collect();
    let parsed = parse_job_recommendations(&reply, &offered).map_err(|e| rejected(&session, e))?;

    let log_entry = AiRecommendation::new(
        user_id.to_string(),
        RecommendationType::Job,
        json!({
            "recommendations": parsed.recommendations,
            "session_id": session,
        }),
    );
    insert_entity(store, &log_entry).await?;

    info!(
        user_id,
        session = %session,
        offered = offered.len(),
        returned = parsed.recommendations.len(),
        "Job recommendations produced"
    );
    Ok(parsed)
}

/// Suggests candidates for `job_id`. `company_id` only labels the session.
pub async fn recommend_candidates(
    store: &dyn DocumentStore,
    llm: &dyn ChatCompletion,
    company_id: &str,
    job_id: &str,
) -> Result<CandidateRecommendations, AppError> {
    let job = get_job(store, job_id).await?;
    let candidates: Vec<Candidate> = find_entities(store, &Filter::new(), 0, SAMPLE_SIZE).await?;

    let session = session_id("candidate_rec", company_id);
    let prompt = candidate_recommendation_prompt(&job, &candidates).map_err(prompt_error)?;
    let reply = ask(llm, &session, &prompt, CANDIDATE_RECOMMENDATION_ROLE).await?;

    let offered: Vec<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
    let parsed =
        parse_candidate_recommendations(&reply, &offered).map_err(|e| rejected(&session, e))?;

    info!(
        company_id,
        job_id,
        session = %session,
        offered = offered.len(),
        returned = parsed.recommendations.len(),
        "Candidate recommendations produced"
    );
    Ok(parsed)
}

pub async fn recommend_courses(
    store: &dyn DocumentStore,
    llm: &dyn ChatCompletion,
    user_id: &str,
) -> Result<CourseRecommendations, AppError> {
    let candidate = get_candidate(store, user_id).await?;

    let session = session_id("course_rec", user_id);
    let prompt = course_recommendation_prompt(&candidate);
    let reply = ask(llm, &session, &prompt, COURSE_RECOMMENDATION_ROLE).await?;

    let parsed = parse_course_recommendations(&reply).map_err(|e| rejected(&session, e))?;

    info!(user_id, session = %session, returned = parsed.courses.len(), "Course recommendations produced");
    Ok(parsed)
}
