//! Integration tests for `/api/v1/auth`.

mod common;

use axum::http::{header, Method, StatusCode};
use common::{body_json, get, get_auth, send, token_for};
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_user_without_session_is_null(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/auth/user").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["data"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_user_with_session(pool: PgPool) {
    let user = Uuid::new_v4();
    let response = get_auth(common::build_test_app(pool), "/api/v1/auth/user", &token_for(user)).await;

    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user.to_string());
    assert_eq!(json["data"]["email"], "tester@example.com");
    assert!(json["data"].get("access_token").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_user_with_bad_token_is_null(pool: PgPool) {
    let response = get_auth(common::build_test_app(pool), "/api/v1/auth/user", "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sign_in_redirects_to_provider(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/auth/sign-in?provider=github").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("http://127.0.0.1:9/auth/v1/authorize?provider=github"));
    assert!(location.contains("redirect_to=http%3A%2F%2Flocalhost%3A5173%2Fauth%2Fcallback"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sign_out_succeeds_even_if_provider_unreachable(pool: PgPool) {
    let token = token_for(Uuid::new_v4());
    let response = send(
        common::build_test_app(pool),
        Method::POST,
        "/api/v1/auth/sign-out",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sign_out_requires_auth(pool: PgPool) {
    let response = send(
        common::build_test_app(pool),
        Method::POST,
        "/api/v1/auth/sign-out",
        None,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
