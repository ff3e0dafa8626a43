use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use validator::Validate;

use crate::{
    pkg::{
        internal::adaptors::jobs::spec::{
            CreateJobListingInput, DeleteJobResponse, JobListing, Page, UpdateJobListingInput,
        },
        server::state::AppState,
    },
    prelude::Result,
};

#[derive(Serialize)]
pub struct JobList {
    pub jobs: Vec<JobListing>,
    pub total: u64,
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateJobListingInput>,
) -> Result<Json<JobListing>> {
    input.validate()?;
    let job = state.store.create_job_listing(input).await?;
    tracing::info!("created job listing {}", &job.id);
    Ok(Json(job))
}

pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<Page>,
) -> Result<Json<JobList>> {
    let page = (!page.is_unbounded()).then_some(page);
    let jobs = state.store.get_jobs(page).await?;
    let total = match page {
        Some(_) => state.store.count_jobs().await?,
        None => jobs.len() as u64,
    };
    Ok(Json(JobList { jobs, total }))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JobListing>> {
    Ok(Json(state.store.get_job(&id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateJobListingInput>,
) -> Result<Json<JobListing>> {
    let job = state.store.update_job_listing(&id, input).await?;
    tracing::info!("updated job listing {}", &job.id);
    Ok(Json(job))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteJobResponse>> {
    let res = state.store.delete_job_listing(&id).await?;
    tracing::info!("deleted job listing {}", &res.deleted_id);
    Ok(Json(res))
}
