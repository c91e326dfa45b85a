//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// GET  /user      -> get_user
/// GET  /sign-in   -> sign_in
/// POST /sign-out  -> sign_out (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user", get(auth::get_user))
        .route("/sign-in", get(auth::sign_in))
        .route("/sign-out", post(auth::sign_out))
}
