//! Handlers for applications nested under `/trackers/{tracker_id}`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracareer_core::application::{
    Application, ApplicationPage, CreateApplication, UpdateApplicationField,
};
use tracareer_core::error::CoreError;
use tracareer_core::field::FieldValue;
use tracareer_core::types::DbId;
use tracareer_db::pagination::{clamp_limit, clamp_page};
use tracareer_db::repositories::ApplicationRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::handlers::tracker::ensure_owned;
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::{done, ok, Envelope};
use crate::state::AppState;

/// GET /api/v1/trackers/{tracker_id}/applications?page=&page_size=
///
/// One page of applications, newest first, with the tracker's exact total.
pub async fn list_by_tracker(
    State(state): State<AppState>,
    user: AuthUser,
    Path(tracker_id): Path<DbId>,
    Query(params): Query<PageParams>,
) -> AppResult<Envelope<ApplicationPage>> {
    ensure_owned(&state.pool, tracker_id, &user).await?;
    let page = clamp_page(params.page);
    let limit = clamp_limit(params.page_size);
    let result = ApplicationRepo::page(&state.pool, tracker_id, page, limit).await?;
    tracing::debug!(tracker_id, page, limit, total_rows = result.total_rows, "Fetched applications page");
    Ok(ok(result))
}

/// POST /api/v1/trackers/{tracker_id}/applications
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(tracker_id): Path<DbId>,
    ApiJson(input): ApiJson<CreateApplication>,
) -> AppResult<(StatusCode, Envelope<Application>)> {
    ensure_owned(&state.pool, tracker_id, &user).await?;
    let input = input.validated()?;
    let application = ApplicationRepo::create(&state.pool, tracker_id, &input).await?;
    tracing::info!(tracker_id, application_id = application.id, "Application created");
    Ok((StatusCode::CREATED, ok(application)))
}

/// PATCH /api/v1/trackers/{tracker_id}/applications/{id}
///
/// Sets exactly one column. The value is normalized for the column's kind
/// (blank optional text becomes NULL, numbers may arrive as strings).
pub async fn update_field(
    State(state): State<AppState>,
    user: AuthUser,
    Path((tracker_id, id)): Path<(DbId, DbId)>,
    ApiJson(input): ApiJson<UpdateApplicationField>,
) -> AppResult<Envelope<()>> {
    ensure_owned(&state.pool, tracker_id, &user).await?;
    let value = FieldValue::from_json(input.column, &input.value)?;

    let updated =
        ApplicationRepo::update_field(&state.pool, tracker_id, id, input.column, &value).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Application",
            id,
        }));
    }

    tracing::info!(tracker_id, application_id = id, column = %input.column, "Application field updated");
    Ok(done())
}
