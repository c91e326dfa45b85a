//! Session extractors.
//!
//! [`AuthUser`] rejects requests without a valid bearer token; as an
//! `Option<AuthUser>` it reads a missing or bad token as "signed out".

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use serde::Serialize;
use tracareer_core::error::CoreError;
use tracareer_core::types::UserId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The signed-in user, as returned by `GET /auth/user`.
#[derive(Debug, Clone, Serialize)]
pub struct AuthUser {
    #[serde(rename = "id")]
    pub user_id: UserId,
    pub email: Option<String>,
    pub role: String,
    /// Forwarded to the provider on sign-out.
    #[serde(skip)]
    pub access_token: String,
}

fn bearer_token(parts: &Parts) -> Result<&str, CoreError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| CoreError::Unauthorized("Missing Authorization header".into()))?;
    header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .ok_or_else(|| CoreError::Unauthorized("Expected 'Authorization: Bearer <token>'".into()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = validate_token(token, &state.config.auth).map_err(|err| {
            tracing::debug!(error = %err, "Rejected access token");
            CoreError::Unauthorized("Invalid or expired token".into())
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
            access_token: token.to_owned(),
        })
    }
}

impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(
            <AuthUser as FromRequestParts<AppState>>::from_request_parts(parts, state)
                .await
                .ok(),
        )
    }
}
