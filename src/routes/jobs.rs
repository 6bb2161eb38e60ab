use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::{AppJson, AppPath, RequestId, Requester},
    models::{Job, NewJob},
    routes::AppState,
};

/// Lists every job posting
pub async fn list_jobs(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Job>>> {
    let jobs = state.jobs.list_all().await?;
    Ok(Json(jobs))
}

/// Creates a job posting
pub async fn create_job(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    requester: Requester,
    AppJson(request): AppJson<NewJob>,
) -> AppResult<(StatusCode, Json<Job>)> {
    request.validate()?;

    let job = state.jobs.create(request).await?;

    tracing::info!(
        request_id = %request_id,
        requester_id = %requester.0,
        job_id = %job.id,
        "Job created"
    );

    Ok((StatusCode::CREATED, Json(job)))
}

/// Deletes a job posting
pub async fn delete_job(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    requester: Requester,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<Value>> {
    if !state.jobs.delete(id).await? {
        return Err(AppError::NotFound(format!("Job {} not found", id)));
    }

    tracing::info!(
        request_id = %request_id,
        requester_id = %requester.0,
        job_id = %id,
        "Job deleted"
    );

    Ok(Json(json!({ "message": "Job deleted" })))
}
