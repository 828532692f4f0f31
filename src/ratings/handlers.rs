use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use super::{repo_types::Rating, services::NewRating};
use crate::{
    auth::jwt::AuthUser,
    error::AppResult,
    extract::{AppJson, AppPath},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RateRequest {
    #[serde(default = "default_rating")]
    pub rating: i64,
    pub comment: Option<String>,
    pub job_id: Option<String>,
}

fn default_rating() -> i64 {
    5
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/users/:id/ratings", get(list_ratings).post(rate_user))
}

#[instrument(skip(state))]
pub async fn rate_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppPath(id): AppPath<String>,
    AppJson(body): AppJson<RateRequest>,
) -> AppResult<(StatusCode, Json<Rating>)> {
    let rating = state.ratings.add_rating(
        &user_id,
        &id,
        NewRating {
            rating: body.rating,
            comment: body.comment,
            job_id: body.job_id,
        },
    )?;
    Ok((StatusCode::CREATED, Json(rating)))
}

#[instrument(skip(state))]
pub async fn list_ratings(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    AppPath(id): AppPath<String>,
) -> Json<Vec<Rating>> {
    Json(state.ratings.ratings_for(&id))
}
