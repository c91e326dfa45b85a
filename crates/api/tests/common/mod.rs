#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use tracareer_api::auth::jwt::{issue_token, AuthConfig};
use tracareer_api::config::ServerConfig;
use tracareer_api::router::build_app_router;
use tracareer_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// The provider URL points at a closed local port so sign-out forwarding
/// fails fast without network access.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        auth: AuthConfig {
            jwt_secret: "integration-test-secret".to_string(),
            provider_url: "http://127.0.0.1:9/auth/v1".to_string(),
            site_url: "http://localhost:5173".to_string(),
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        http: reqwest::Client::new(),
    };
    build_app_router(state, &config)
}

/// Mint a bearer token for `user` signed with the test secret.
pub fn token_for(user: Uuid) -> String {
    issue_token(user, Some("tester@example.com"), 15, &test_config().auth).unwrap()
}

/// Send a request with an optional bearer token and optional JSON body.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a tracker through the API and return its id.
pub async fn create_tracker(app: Router, token: &str, title: &str) -> i64 {
    let response = post_json_auth(
        app,
        "/api/v1/trackers",
        token,
        serde_json::json!({ "title": title }),
    )
    .await;
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create an application through the API and return its id.
pub async fn create_application(app: Router, token: &str, tracker_id: i64, company: &str) -> i64 {
    let response = post_json_auth(
        app,
        &format!("/api/v1/trackers/{tracker_id}/applications"),
        token,
        serde_json::json!({ "company": company, "position": "Engineer" }),
    )
    .await;
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
