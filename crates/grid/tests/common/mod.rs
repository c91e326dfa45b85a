//! Shared helpers for grid integration tests.
//!
//! Provides in-memory fakes for [`ApplicationStore`] and [`TrackerStore`]
//! that count calls and can be switched into failure mode.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Offset, Utc};
use tracareer_core::application::{Application, ApplicationPage, CreateApplication};
use tracareer_core::field::{ApplicationField, FieldValue};
use tracareer_core::status::ApplicationStatus;
use tracareer_core::tracker::{CreateTracker, Tracker};
use tracareer_core::types::DbId;
use tracareer_grid::client::AccessError;
use tracareer_grid::controller::{GridController, RecordMutationSink};
use tracareer_grid::editor::EditorContext;
use tracareer_grid::notify::{Notifier, ToastLog};
use tracareer_grid::store::{ApplicationStore, TrackerStore};

pub const TRACKER_ID: DbId = 1;
pub const PAGE_SIZE: i64 = 5;

pub fn application(id: DbId, company: &str) -> Application {
    Application {
        id,
        company: company.to_string(),
        position: "Software Engineer".to_string(),
        remote: None,
        location: None,
        status: ApplicationStatus::InProgress,
        applied_at: None,
        interview_at: None,
        expected_salary: None,
        resume_version: None,
        hiring_manager: None,
        contact: None,
        link: None,
        tracker_id: TRACKER_ID,
    }
}

/// `count` applications, newest (highest id) first.
pub fn applications(count: i64) -> Vec<Application> {
    (1..=count)
        .rev()
        .map(|id| application(id, &format!("Company {id}")))
        .collect()
}

pub fn failure() -> AccessError {
    AccessError::Api {
        status: 500,
        message: "Internal server error".into(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCall {
    pub tracker_id: DbId,
    pub id: DbId,
    pub field: ApplicationField,
    pub value: FieldValue,
}

/// In-memory application store. Rows are kept newest first.
#[derive(Default)]
pub struct FakeStore {
    rows: Mutex<Vec<Application>>,
    fetches: AtomicUsize,
    updates: Mutex<Vec<UpdateCall>>,
    page_delays: Mutex<HashMap<i64, Duration>>,
    pub fail_fetch: AtomicBool,
    pub fail_update: AtomicBool,
    pub fail_create: AtomicBool,
}

impl FakeStore {
    pub fn with_rows(rows: Vec<Application>) -> Arc<Self> {
        Arc::new(Self {
            rows: Mutex::new(rows),
            ..Self::default()
        })
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> Vec<UpdateCall> {
        self.updates.lock().unwrap().clone()
    }

    pub fn delay_page(&self, page: i64, delay: Duration) {
        self.page_delays.lock().unwrap().insert(page, delay);
    }

    pub fn set_fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_update(&self, fail: bool) {
        self.fail_update.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ApplicationStore for FakeStore {
    async fn fetch_page(
        &self,
        tracker_id: DbId,
        page: i64,
        page_size: i64,
    ) -> Result<ApplicationPage, AccessError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let delay = self.page_delays.lock().unwrap().get(&page).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(failure());
        }

        let rows = self.rows.lock().unwrap();
        let scoped: Vec<_> = rows.iter().filter(|a| a.tracker_id == tracker_id).collect();
        let data = scoped
            .iter()
            .skip((page * page_size) as usize)
            .take(page_size as usize)
            .map(|a| (*a).clone())
            .collect();
        Ok(ApplicationPage {
            data,
            total_rows: scoped.len() as i64,
        })
    }

    async fn create_application(
        &self,
        tracker_id: DbId,
        input: &CreateApplication,
    ) -> Result<Application, AccessError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(failure());
        }
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        let mut app = application(id, &input.company);
        app.position = input.position.clone();
        app.status = input.status;
        app.tracker_id = tracker_id;
        rows.insert(0, app.clone());
        Ok(app)
    }

    async fn update_field(
        &self,
        tracker_id: DbId,
        id: DbId,
        field: ApplicationField,
        value: &FieldValue,
    ) -> Result<(), AccessError> {
        self.updates.lock().unwrap().push(UpdateCall {
            tracker_id,
            id,
            field,
            value: value.clone(),
        });
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(failure());
        }
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|a| a.id == id && a.tracker_id == tracker_id) {
            row.set_field(field, value.clone())
                .map_err(|e| AccessError::Malformed(e.to_string()))?;
        }
        Ok(())
    }
}

/// In-memory tracker store.
#[derive(Default)]
pub struct FakeTrackerStore {
    trackers: Mutex<Vec<Tracker>>,
    creates: AtomicUsize,
    pub fail: AtomicBool,
}

impl FakeTrackerStore {
    pub fn create_count(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TrackerStore for FakeTrackerStore {
    async fn list_trackers(&self) -> Result<Vec<Tracker>, AccessError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(failure());
        }
        let mut trackers = self.trackers.lock().unwrap().clone();
        trackers.reverse();
        Ok(trackers)
    }

    async fn create_tracker(&self, input: &CreateTracker) -> Result<Tracker, AccessError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(failure());
        }
        let input = input
            .clone()
            .validated()
            .map_err(|e| AccessError::Api {
                status: 400,
                message: e.to_string(),
            })?;
        let mut trackers = self.trackers.lock().unwrap();
        let now = Utc::now();
        let tracker = Tracker {
            id: trackers.len() as DbId + 1,
            title: input.title,
            description: input.description,
            created_at: now,
            updated_at: now,
        };
        trackers.push(tracker.clone());
        Ok(tracker)
    }
}

/// A grid over `store` with page 0 already loaded.
pub async fn loaded_grid(store: &Arc<FakeStore>) -> Arc<GridController> {
    let grid = Arc::new(GridController::new(TRACKER_ID, PAGE_SIZE, store.clone()));
    grid.load_page(0).await;
    grid
}

/// Editor context for the displayed row at `row_index`.
pub fn editor_context(
    grid: &Arc<GridController>,
    store: &Arc<FakeStore>,
    toasts: &Arc<ToastLog>,
    row_index: usize,
    field: ApplicationField,
    quiet: Duration,
) -> EditorContext {
    let row_id = grid.rows()[row_index].id;
    let sink: Arc<dyn RecordMutationSink> = grid.clone();
    let store: Arc<dyn ApplicationStore> = store.clone();
    let notifier: Arc<dyn Notifier> = toasts.clone();
    EditorContext {
        tracker_id: TRACKER_ID,
        row_id,
        row_index,
        field,
        store,
        sink,
        notifier,
        quiet,
        display_offset: Utc.fix(),
    }
}
