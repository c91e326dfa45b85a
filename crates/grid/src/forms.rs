//! Creation forms: new tracker and new application.

use chrono::FixedOffset;
use tracareer_core::application::{Application, CreateApplication};
use tracareer_core::status::{ApplicationStatus, DEFAULT_STATUS};
use tracareer_core::tracker::{CreateTracker, Tracker};

use crate::client::AccessError;
use crate::controller::GridController;
use crate::notify::{Notifier, Toast};
use crate::store::{ApplicationStore, TrackerStore};

/// The "Create Tracker" dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTrackerForm {
    pub title: String,
    pub description: String,
}

impl CreateTrackerForm {
    pub fn can_submit(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Create the tracker and toast the outcome. The form is cleared only on
    /// success.
    pub async fn submit(
        &mut self,
        store: &dyn TrackerStore,
        notifier: &dyn Notifier,
        offset: FixedOffset,
    ) -> Result<Tracker, AccessError> {
        let input = CreateTracker {
            title: self.title.clone(),
            description: Some(self.description.clone()),
        };

        match store.create_tracker(&input).await {
            Ok(tracker) => {
                tracing::info!(tracker_id = tracker.id, "Tracker created");
                notifier.notify(Toast::success("Tracker has been created", offset));
                *self = Self::default();
                Ok(tracker)
            }
            Err(err) => {
                notifier.notify(Toast::error(err.to_string(), offset));
                Err(err)
            }
        }
    }
}

/// The "Add Application" dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplicationForm {
    pub company: String,
    pub position: String,
    pub status: ApplicationStatus,
}

impl Default for NewApplicationForm {
    fn default() -> Self {
        Self {
            company: String::new(),
            position: String::new(),
            status: DEFAULT_STATUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormErrors {
    pub company: Option<&'static str>,
    pub position: Option<&'static str>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.company.is_none() && self.position.is_none()
    }
}

impl NewApplicationForm {
    pub fn validate(&self) -> FormErrors {
        fn required(value: &str, message: &'static str) -> Option<&'static str> {
            value.trim().is_empty().then_some(message)
        }

        FormErrors {
            company: required(&self.company, "Company is required"),
            position: required(&self.position, "Position is required"),
        }
    }

    /// Create the application and hand it to the grid.
    ///
    /// Returns `None` when validation blocks the request or the request
    /// fails; failures are logged only and the form keeps its input.
    pub async fn submit(
        &mut self,
        store: &dyn ApplicationStore,
        grid: &GridController,
    ) -> Option<Application> {
        if !self.validate().is_empty() {
            return None;
        }

        let input = CreateApplication {
            company: self.company.trim().to_string(),
            position: self.position.trim().to_string(),
            status: self.status,
        };

        match store.create_application(grid.tracker_id(), &input).await {
            Ok(app) => {
                tracing::info!(
                    tracker_id = grid.tracker_id(),
                    application_id = app.id,
                    "Application created"
                );
                grid.add_records(vec![app.clone()]).await;
                *self = Self::default();
                Some(app)
            }
            Err(err) => {
                tracing::error!(
                    tracker_id = grid.tracker_id(),
                    error = %err,
                    "Failed to create application"
                );
                None
            }
        }
    }
}
