//! Storage seams the grid and forms talk through.
//!
//! [`TrackerApi`] implements both traits over HTTP; tests substitute
//! in-memory fakes.

use async_trait::async_trait;
use tracareer_core::application::{Application, ApplicationPage, CreateApplication};
use tracareer_core::field::{ApplicationField, FieldValue};
use tracareer_core::tracker::{CreateTracker, Tracker};
use tracareer_core::types::DbId;

use crate::client::{AccessError, TrackerApi};

/// Reads and writes of one tracker's applications.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// One page (0-based) of applications, newest first, plus the total count.
    async fn fetch_page(
        &self,
        tracker_id: DbId,
        page: i64,
        page_size: i64,
    ) -> Result<ApplicationPage, AccessError>;

    async fn create_application(
        &self,
        tracker_id: DbId,
        input: &CreateApplication,
    ) -> Result<Application, AccessError>;

    /// Set exactly one field of one application.
    async fn update_field(
        &self,
        tracker_id: DbId,
        id: DbId,
        field: ApplicationField,
        value: &FieldValue,
    ) -> Result<(), AccessError>;
}

/// Reads and writes of the signed-in user's trackers.
#[async_trait]
pub trait TrackerStore: Send + Sync {
    async fn list_trackers(&self) -> Result<Vec<Tracker>, AccessError>;

    async fn create_tracker(&self, input: &CreateTracker) -> Result<Tracker, AccessError>;
}

#[async_trait]
impl ApplicationStore for TrackerApi {
    async fn fetch_page(
        &self,
        tracker_id: DbId,
        page: i64,
        page_size: i64,
    ) -> Result<ApplicationPage, AccessError> {
        self.get_all_applications(tracker_id, page, page_size).await
    }

    async fn create_application(
        &self,
        tracker_id: DbId,
        input: &CreateApplication,
    ) -> Result<Application, AccessError> {
        TrackerApi::create_application(self, tracker_id, input).await
    }

    async fn update_field(
        &self,
        tracker_id: DbId,
        id: DbId,
        field: ApplicationField,
        value: &FieldValue,
    ) -> Result<(), AccessError> {
        self.update_application(tracker_id, id, field, value).await
    }
}

#[async_trait]
impl TrackerStore for TrackerApi {
    async fn list_trackers(&self) -> Result<Vec<Tracker>, AccessError> {
        self.get_all_trackers().await
    }

    async fn create_tracker(&self, input: &CreateTracker) -> Result<Tracker, AccessError> {
        TrackerApi::create_tracker(self, input).await
    }
}
