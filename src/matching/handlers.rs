use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{JobSearchQuery, WorkerSearchQuery},
    search::WorkerSummary,
    services::{JobMatch, WorkerMatch},
};
use crate::{
    auth::{
        jwt::AuthUser,
        policy::{authorize, Action},
    },
    error::AppResult,
    extract::AppQuery,
    jobs::repo_types::Job,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/jobs/search", get(search_jobs))
        .route("/workers/search", get(search_workers))
        .route("/recommendations/jobs", get(recommended_jobs))
        .route("/recommendations/workers", get(recommended_workers))
}

#[instrument(skip(state))]
pub async fn search_jobs(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    AppQuery(query): AppQuery<JobSearchQuery>,
) -> Json<Vec<Job>> {
    Json(state.matching.search_jobs(&query.q, &query.location))
}

#[instrument(skip(state))]
pub async fn search_workers(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppQuery(query): AppQuery<WorkerSearchQuery>,
) -> AppResult<Json<Vec<WorkerSummary>>> {
    let found = state.matching.search_workers(
        &user_id,
        &query.q,
        &query.skill_list(),
        &query.location,
    )?;
    Ok(Json(found))
}

#[instrument(skip(state))]
pub async fn recommended_jobs(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Json<Vec<JobMatch>> {
    Json(state.matching.recommended_jobs(&user_id))
}

#[instrument(skip(state))]
pub async fn recommended_workers(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<Vec<WorkerMatch>>> {
    let actor = state.auth.get_user(&user_id)?;
    authorize(&actor, Action::RecommendWorkers)?;
    Ok(Json(state.matching.recommended_workers(&user_id)))
}
