use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{ApplicationDecision, JobDetails, JobStatusRequest},
    repo_types::{Application, Job, NewJob},
    services::{Applicant, WorkerApplication},
};
use crate::{
    auth::jwt::AuthUser,
    error::AppResult,
    extract::{AppJson, AppPath},
    state::AppState,
};

// --- public routers ---

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/jobs/:id", get(get_job))
        .route("/jobs/:id/applications", get(list_applications))
        .route("/me/applications", get(my_applications))
        .route("/me/jobs", get(my_jobs))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/jobs", post(post_job))
        .route("/jobs/:id/apply", post(apply))
        .route("/jobs/:id/status", put(set_job_status))
        .route("/jobs/:id/applications/:worker_id", put(decide_application))
}

// --- handlers ---

#[instrument(skip(state, body))]
pub async fn post_job(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(body): AppJson<NewJob>,
) -> AppResult<(StatusCode, HeaderMap, Json<Job>)> {
    let job = state.jobs.post_job(&user_id, body)?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/api/v1/jobs/{}", job.id)) {
        headers.insert(header::LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(job)))
}

#[instrument(skip(state))]
pub async fn get_job(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    AppPath(id): AppPath<String>,
) -> AppResult<Json<JobDetails>> {
    let job = state.jobs.get_job(&id)?;
    let employer = state.jobs.employer_of(&job);
    Ok(Json(JobDetails { job, employer }))
}

#[instrument(skip(state))]
pub async fn apply(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppPath(id): AppPath<String>,
) -> AppResult<(StatusCode, Json<Application>)> {
    let application = state.jobs.apply(&user_id, &id)?;
    Ok((StatusCode::CREATED, Json(application)))
}

#[instrument(skip(state))]
pub async fn list_applications(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppPath(id): AppPath<String>,
) -> AppResult<Json<Vec<Applicant>>> {
    Ok(Json(state.jobs.applications_for(&user_id, &id)?))
}

#[instrument(skip(state))]
pub async fn set_job_status(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppPath(id): AppPath<String>,
    AppJson(body): AppJson<JobStatusRequest>,
) -> AppResult<Json<Job>> {
    Ok(Json(state.jobs.set_job_status(&user_id, &id, body.status)?))
}

#[instrument(skip(state))]
pub async fn decide_application(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppPath((id, worker_id)): AppPath<(String, String)>,
    AppJson(body): AppJson<ApplicationDecision>,
) -> AppResult<Json<Application>> {
    Ok(Json(state.jobs.set_application_status(
        &user_id,
        &id,
        &worker_id,
        body.status,
    )?))
}

#[instrument(skip(state))]
pub async fn my_applications(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Json<Vec<WorkerApplication>> {
    Json(state.jobs.worker_applications(&user_id))
}

#[instrument(skip(state))]
pub async fn my_jobs(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Json<Vec<Job>> {
    Json(state.jobs.jobs_by_employer(&user_id))
}
