pub mod catalog;

use axum::{extract::State, routing::get, Json, Router};

use crate::state::AppState;
use catalog::Skill;

pub fn router() -> Router<AppState> {
    Router::new().route("/skills", get(list_skills))
}

async fn list_skills(State(state): State<AppState>) -> Json<Vec<Skill>> {
    Json(state.skills.all().to_vec())
}
