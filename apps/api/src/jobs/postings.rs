use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::company::Company;
use crate::models::job::{Job, JobInput};
use crate::store::{find_entities, find_entity, insert_entity, DocumentStore, Filter};

pub const DEFAULT_LIMIT: u64 = 20;

/// `skip`/`limit` window over active jobs. `limit` has no upper bound.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct JobListQuery {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

impl Default for JobListQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

pub fn active_jobs() -> Filter {
    Filter::new().eq("is_active", true)
}

pub async fn create_job(
    store: &dyn DocumentStore,
    company_id: &str,
    input: JobInput,
) -> Result<Job, AppError> {
    let company: Option<Company> = find_entity(store, &Filter::new().eq("id", company_id)).await?;
    if company.is_none() {
        return Err(AppError::NotFound("Company not found".to_string()));
    }

    let job = Job::new(company_id.to_string(), input);
    insert_entity(store, &job).await?;

    info!(company_id, job_id = %job.id, "Job posted");
    Ok(job)
}

pub async fn list_jobs(store: &dyn DocumentStore, query: JobListQuery) -> Result<Vec<Job>, AppError> {
    Ok(find_entities(store, &active_jobs(), query.skip, query.limit).await?)
}

/// Fetches a job whether or not it is still active.
pub async fn get_job(store: &dyn DocumentStore, job_id: &str) -> Result<Job, AppError> {
    find_entity(store, &Filter::new().eq("id", job_id))
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))
}
