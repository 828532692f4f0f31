use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, ProfileResponse, RefreshRequest, RegisterRequest},
        jwt::{AuthUser, JwtKeys},
        repo_types::{User, UserUpdate},
        services::NewUser,
    },
    error::{AppError, AppResult},
    extract::{AppJson, AppPath},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

pub fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me).put(update_me))
        .route("/users/:id", get(view_profile))
}

fn token_pair(state: &AppState, user: User) -> AppResult<AuthResponse> {
    let keys = JwtKeys::from_ref(state);
    Ok(AuthResponse {
        access_token: keys.sign_access(&user.id)?,
        refresh_token: keys.sign_refresh(&user.id)?,
        user,
    })
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = state.auth.register(NewUser {
        name: payload.name,
        email: payload.email,
        password: payload.password,
        user_type: payload.user_type,
    })?;
    Ok(Json(token_pair(&state, user)?))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = state
        .auth
        .authenticate(&payload.email, &payload.password)
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".into()))?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(token_pair(&state, user)?))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify_refresh(&payload.refresh_token)
        .map_err(|e| AppError::Unauthorized(e.to_string()))?;

    let user = state
        .auth
        .get_user(&claims.sub)
        .map_err(|_| AppError::Unauthorized("User not found".into()))?;
    Ok(Json(token_pair(&state, user)?))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<User>> {
    let user = state
        .auth
        .get_user(&user_id)
        .map_err(|_| AppError::Unauthorized("User not found".into()))?;
    Ok(Json(user))
}

#[instrument(skip(state, payload))]
pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(payload): AppJson<UserUpdate>,
) -> AppResult<Json<User>> {
    Ok(Json(state.auth.update_user(&user_id, payload)?))
}

#[instrument(skip(state))]
pub async fn view_profile(
    State(state): State<AppState>,
    AuthUser(_viewer): AuthUser,
    AppPath(id): AppPath<String>,
) -> AppResult<Json<ProfileResponse>> {
    let user = state.auth.get_user(&id)?;
    Ok(Json(ProfileResponse {
        ratings: state.ratings.ratings_for(&id),
        average_rating: state.ratings.average_rating(&id),
        user,
    }))
}
