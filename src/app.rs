use std::net::SocketAddr;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::state::AppState;
use crate::{auth, jobs, matching, messages, ratings, skills};

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .nest(
            "/api/v1",
            Router::new()
                .merge(auth::router())
                .merge(jobs::router())
                .merge(matching::router())
                .merge(messages::router())
                .merge(ratings::router())
                .merge(skills::router())
                .route("/health", get(|| async { "ok" })),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        let latency_ms = latency.as_millis() as u64;
                        if status.is_server_error() {
                            tracing::error!(%status, latency_ms, "response");
                        } else {
                            tracing::info!(%status, latency_ms, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router, config: &AppConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn call(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let req = match body {
            Some(body) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => req.body(Body::empty()),
        }
        .unwrap();

        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn register(app: &Router, name: &str, kind: &str) -> (String, String) {
        let (status, body) = call(
            app,
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({
                "name": name,
                "email": format!("{name}@example.com"),
                "password": "password123",
                "user_type": kind,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        (
            body["access_token"].as_str().unwrap().to_string(),
            body["user"]["id"].as_str().unwrap().to_string(),
        )
    }

    #[tokio::test]
    async fn health_is_public() {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(Request::get("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn protected_routes_need_a_bearer_token() {
        let app = build_app(AppState::fake());
        let (status, body) = call(&app, Method::GET, "/api/v1/me", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["error"].is_string());
        let (status, _) = call(&app, Method::GET, "/api/v1/me", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_requests_get_json_error_bodies() {
        let app = build_app(AppState::fake());
        let (status, body) = call(
            &app,
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({"name": "x", "email": "x@example.com", "password": "password123", "user_type": "admin"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (token, _) = register(&app, "dev", "employer").await;
        let (status, body) = call(
            &app,
            Method::PUT,
            "/api/v1/jobs/some-job/status",
            Some(&token),
            Some(json!({"status": "paused"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn register_login_and_duplicate_email() {
        let app = build_app(AppState::fake());
        let (token, id) = register(&app, "asha", "worker").await;

        let (status, me) = call(&app, Method::GET, "/api/v1/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["id"], id.as_str());
        assert!(me.get("password_hash").is_none());

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({"name": "x", "email": "ASHA@example.com", "password": "password123", "user_type": "worker"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].is_string());

        let (status, _) = call(
            &app,
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({"email": "asha@example.com", "password": "wrong-password"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({"email": "asha@example.com", "password": "password123"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let refresh = body["refresh_token"].as_str().unwrap();

        let (status, _) = call(
            &app,
            Method::POST,
            "/api/v1/auth/refresh",
            None,
            Some(json!({ "refresh_token": refresh })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn job_lifecycle_over_http() {
        let app = build_app(AppState::fake());
        let (employer, employer_id) = register(&app, "tata", "employer").await;
        let (worker, worker_id) = register(&app, "ravi", "worker").await;

        let (status, _) = call(
            &app,
            Method::PUT,
            "/api/v1/me",
            Some(&worker),
            Some(json!({"skills": ["s1", "s5"], "location": "Thane, Maharashtra"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = call(
            &app,
            Method::POST,
            "/api/v1/jobs",
            Some(&worker),
            Some(json!({"title": "t", "description": "d"})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, job) = call(
            &app,
            Method::POST,
            "/api/v1/jobs",
            Some(&employer),
            Some(json!({
                "title": "Masons wanted",
                "description": "Township project",
                "location": "Thane, Maharashtra",
                "skills_required": ["Masonry", "Carpentry"],
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let job_id = job["id"].as_str().unwrap().to_string();
        let job_uri = format!("/api/v1/jobs/{job_id}");

        let (status, details) = call(&app, Method::GET, &job_uri, Some(&worker), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(details["job"]["title"], "Masons wanted");
        assert_eq!(details["employer"]["id"], employer_id.as_str());
        assert!(details["employer"].get("password_hash").is_none());

        let (status, own) = call(&app, Method::GET, "/api/v1/me/jobs", Some(&employer), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(own.as_array().unwrap().len(), 1);
        assert_eq!(own[0]["id"], job_id.as_str());

        let (status, recs) = call(&app, Method::GET, "/api/v1/recommendations/jobs", Some(&worker), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(recs[0]["job"]["id"], job_id.as_str());
        assert_eq!(recs[0]["score"], 3);

        let (status, found) = call(&app, Method::GET, "/api/v1/jobs/search?q=mason&location=thane", Some(&worker), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found.as_array().unwrap().len(), 1);

        let apply = format!("/api/v1/jobs/{job_id}/apply");
        let (status, _) = call(&app, Method::POST, &apply, Some(&worker), None).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) = call(&app, Method::POST, &apply, Some(&worker), None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, applicants) = call(
            &app,
            Method::GET,
            &format!("/api/v1/jobs/{job_id}/applications"),
            Some(&employer),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(applicants.as_array().unwrap().len(), 1);

        let (status, decided) = call(
            &app,
            Method::PUT,
            &format!("/api/v1/jobs/{job_id}/applications/{worker_id}"),
            Some(&employer),
            Some(json!({"status": "accepted"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(decided["status"], "accepted");

        let (_, mine) = call(&app, Method::GET, "/api/v1/me/applications", Some(&worker), None).await;
        assert_eq!(mine[0]["employer_name"], "tata");

        let (status, workers) = call(&app, Method::GET, "/api/v1/recommendations/workers", Some(&employer), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(workers[0]["worker"]["id"], worker_id.as_str());
        let (status, _) = call(&app, Method::GET, "/api/v1/recommendations/workers", Some(&worker), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let status_uri = format!("{job_uri}/status");
        let (status, _) = call(&app, Method::PUT, &status_uri, Some(&worker), Some(json!({"status": "filled"}))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, filled) = call(&app, Method::PUT, &status_uri, Some(&employer), Some(json!({"status": "filled"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(filled["status"], "filled");
        let (_, found) = call(&app, Method::GET, "/api/v1/jobs/search?q=mason", Some(&worker), None).await;
        assert!(found.as_array().unwrap().is_empty());

        let (status, _) = call(&app, Method::GET, "/api/v1/jobs/missing", Some(&worker), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn messages_and_ratings_over_http() {
        let app = build_app(AppState::fake());
        let (employer, employer_id) = register(&app, "sai", "employer").await;
        let (worker, worker_id) = register(&app, "meena", "worker").await;

        let (status, _) = call(
            &app,
            Method::POST,
            "/api/v1/messages",
            Some(&employer),
            Some(json!({"receiver_id": worker_id, "content": "Can you start Monday?"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, inbox) = call(&app, Method::GET, "/api/v1/messages", Some(&worker), None).await;
        assert_eq!(inbox[0]["partner_id"], employer_id.as_str());
        assert_eq!(inbox[0]["unread"], 1);

        let (status, marked) = call(
            &app,
            Method::POST,
            &format!("/api/v1/messages/{employer_id}/read"),
            Some(&worker),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(marked["marked"], 1);

        let ratings = format!("/api/v1/users/{worker_id}/ratings");
        let (status, _) = call(&app, Method::POST, &ratings, Some(&employer), Some(json!({"rating": 4}))).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) = call(&app, Method::POST, &ratings, Some(&employer), Some(json!({"rating": 9}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = call(&app, Method::POST, &ratings, Some(&worker), Some(json!({"rating": 5}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, profile) = call(
            &app,
            Method::GET,
            &format!("/api/v1/users/{worker_id}"),
            Some(&employer),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(profile["average_rating"], 4.0);
        assert_eq!(profile["ratings"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn skills_catalog_is_listed() {
        let app = build_app(AppState::fake());
        let (token, _) = register(&app, "kiran", "worker").await;
        let (status, skills) = call(&app, Method::GET, "/api/v1/skills", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(skills.as_array().unwrap().len(), 15);
    }
}
