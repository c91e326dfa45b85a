//! Success responses wrapped in the shared envelope.
//!
//! Handlers return [`Envelope<T>`] rather than building
//! `serde_json::json!({ "success": true, ... })` by hand.

use axum::Json;
use tracareer_core::response::ApiResponse;

/// `{ "success": true, "data": T }` JSON body.
pub type Envelope<T> = Json<ApiResponse<T>>;

pub fn ok<T>(data: T) -> Envelope<T> {
    Json(ApiResponse::ok(data))
}

/// `{ "success": true }` with no payload.
pub fn done() -> Envelope<()> {
    Json(ApiResponse::done())
}
