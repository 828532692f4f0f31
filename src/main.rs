mod app;
mod auth;
mod config;
mod error;
mod extract;
mod jobs;
mod matching;
mod messages;
mod ratings;
mod seed;
mod skills;
mod state;
mod store;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "jobmatch=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let state = AppState::init()?;
    let config = state.config.clone();
    tracing::info!(
        seeded = config.seed_sample_data,
        recommendation_limit = config.recommendation_limit,
        "state ready"
    );

    app::serve(app::build_app(state), &config).await
}
