//! Route definitions for the `/trackers` resource.
//!
//! Also nests application routes under `/trackers/{tracker_id}/applications`.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::{application, tracker};
use crate::state::AppState;

/// Routes mounted at `/trackers`.
///
/// ```text
/// GET    /                                      -> list
/// POST   /                                      -> create
///
/// GET    /{tracker_id}/applications             -> list_by_tracker
/// POST   /{tracker_id}/applications             -> create
/// PATCH  /{tracker_id}/applications/{id}        -> update_field
/// ```
pub fn router() -> Router<AppState> {
    let application_routes = Router::new()
        .route(
            "/",
            get(application::list_by_tracker).post(application::create),
        )
        .route("/{id}", patch(application::update_field));

    Router::new()
        .route("/", get(tracker::list).post(tracker::create))
        .nest("/{tracker_id}/applications", application_routes)
}
