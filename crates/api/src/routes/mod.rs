pub mod auth;
pub mod health;
pub mod tracker;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/user                                       current session (public)
/// /auth/sign-in                                    OAuth redirect (public)
/// /auth/sign-out                                   revoke (requires auth)
///
/// /trackers                                        list, create
/// /trackers/{tracker_id}/applications              page, create
/// /trackers/{tracker_id}/applications/{id}         single-column update (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/trackers", tracker::router())
}
