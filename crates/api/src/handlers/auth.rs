//! Handlers for the `/auth` resource (session lookup, sign-in, sign-out).

use axum::extract::{Query, State};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::auth::provider;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{done, ok, Envelope};
use crate::state::AppState;

/// OAuth provider used when the query string names none.
const DEFAULT_OAUTH_PROVIDER: &str = "github";

/// Query parameters for `GET /auth/sign-in`.
#[derive(Debug, Deserialize)]
pub struct SignInParams {
    pub provider: Option<String>,
}

/// GET /api/v1/auth/user
///
/// The signed-in user, or `data: null` when there is no valid session.
pub async fn get_user(user: Option<AuthUser>) -> Envelope<Option<AuthUser>> {
    ok(user)
}

/// GET /api/v1/auth/sign-in?provider=github
///
/// Redirects the browser (302 Found) to the provider's authorize page.
pub async fn sign_in(
    State(state): State<AppState>,
    Query(params): Query<SignInParams>,
) -> AppResult<Response> {
    let provider_name = params
        .provider
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_OAUTH_PROVIDER);

    let url = provider::sign_in_url(&state.config.auth, provider_name)
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    Ok((StatusCode::FOUND, [(LOCATION, url)]).into_response())
}

/// POST /api/v1/auth/sign-out
///
/// Revokes the session at the provider. A provider failure is logged; the
/// client discards its token either way.
pub async fn sign_out(State(state): State<AppState>, user: AuthUser) -> Envelope<()> {
    if let Err(err) = provider::sign_out(&state.http, &state.config.auth, &user.access_token).await {
        tracing::warn!(user_id = %user.user_id, error = %err, "Provider sign-out failed");
    } else {
        tracing::info!(user_id = %user.user_id, "User signed out");
    }
    done()
}
