//! Handlers for the `/trackers` resource.

use axum::extract::State;
use axum::http::StatusCode;
use tracareer_core::error::CoreError;
use tracareer_core::tracker::{CreateTracker, Tracker};
use tracareer_core::types::DbId;
use tracareer_db::repositories::TrackerRepo;
use tracareer_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::middleware::auth::AuthUser;
use crate::response::{ok, Envelope};
use crate::state::AppState;

/// Load a tracker owned by `user`, or 404.
///
/// Trackers belonging to someone else are indistinguishable from missing ones.
pub(crate) async fn ensure_owned(pool: &DbPool, id: DbId, user: &AuthUser) -> AppResult<Tracker> {
    TrackerRepo::find_for_owner(pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Tracker",
            id,
        }))
}

/// POST /api/v1/trackers
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(input): ApiJson<CreateTracker>,
) -> AppResult<(StatusCode, Envelope<Tracker>)> {
    let input = input.validated()?;
    let tracker = TrackerRepo::create(&state.pool, user.user_id, &input).await?;
    tracing::info!(tracker_id = tracker.id, user_id = %user.user_id, "Tracker created");
    Ok((StatusCode::CREATED, ok(tracker)))
}

/// GET /api/v1/trackers
pub async fn list(State(state): State<AppState>, user: AuthUser) -> AppResult<Envelope<Vec<Tracker>>> {
    let trackers = TrackerRepo::list_for_owner(&state.pool, user.user_id).await?;
    Ok(ok(trackers))
}
