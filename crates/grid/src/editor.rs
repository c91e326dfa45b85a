//! Debounced inline editors for grid cells.
//!
//! Every editor variant wraps a [`FieldEditor`], which owns the commit state
//! machine:
//!
//! ```text
//! Clean --input--> Dirty --quiet interval--> Committing --ok--> Clean
//!                    ^  \                              \--err--> Error
//!                    |   \--invalid input--> Invalid
//!                    \--- further input restarts the interval
//! ```
//!
//! Each input cancels the pending timer and starts a new one, so a burst of
//! edits produces one write carrying the last value. A commit already in
//! flight is never cancelled.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracareer_core::field::{ApplicationField, FieldValue};
use tracareer_core::format::{format_picker_date, format_picker_date_time, format_salary};
use tracareer_core::status::{ApplicationStatus, Remote};
use tracareer_core::types::DbId;

use crate::controller::RecordMutationSink;
use crate::notify::{Notifier, Toast};
use crate::store::ApplicationStore;

/// Message shown when a required text field is cleared.
pub const EMPTY_REQUIRED_MESSAGE: &str = "Can't be empty";

/// Placeholder for date pickers with no value.
pub const EMPTY_DATE_PLACEHOLDER: &str = "Pick a date";

/// Label of the remote picker entry that clears the value.
pub const NO_SELECTION_LABEL: &str = "No Selection";

/// Everything an editor needs to address and report one cell.
#[derive(Clone)]
pub struct EditorContext {
    pub tracker_id: DbId,
    pub row_id: DbId,
    /// Index into the controller's displayed records.
    pub row_index: usize,
    pub field: ApplicationField,
    pub store: Arc<dyn ApplicationStore>,
    pub sink: Arc<dyn RecordMutationSink>,
    pub notifier: Arc<dyn Notifier>,
    pub quiet: Duration,
    pub display_offset: FixedOffset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorState {
    Clean,
    Dirty,
    Committing,
    /// Client-side validation failed; nothing will be written.
    Invalid(String),
    /// The last write failed with this message.
    Error(String),
}

struct Shared {
    state: EditorState,
    committed: FieldValue,
    pending: Option<FieldValue>,
    timer: Option<CancellationToken>,
    tasks: Vec<JoinHandle<()>>,
}

/// Debounce and commit engine shared by all editor variants.
#[derive(Clone)]
pub struct FieldEditor {
    ctx: Arc<EditorContext>,
    shared: Arc<Mutex<Shared>>,
}

impl FieldEditor {
    pub fn new(ctx: EditorContext, initial: FieldValue) -> Self {
        Self {
            ctx: Arc::new(ctx),
            shared: Arc::new(Mutex::new(Shared {
                state: EditorState::Clean,
                committed: initial,
                pending: None,
                timer: None,
                tasks: Vec::new(),
            })),
        }
    }

    pub fn field(&self) -> ApplicationField {
        self.ctx.field
    }

    pub fn state(&self) -> EditorState {
        self.lock().state.clone()
    }

    /// Last value the server accepted (or the initial value).
    pub fn committed(&self) -> FieldValue {
        self.lock().committed.clone()
    }

    /// Queue `value` for commit after the quiet interval, replacing any
    /// pending value and restarting the timer.
    pub fn schedule(&self, value: FieldValue) {
        let token = CancellationToken::new();
        let mut shared = self.lock();
        if let Some(previous) = shared.timer.replace(token.clone()) {
            previous.cancel();
        }
        shared.pending = Some(value);
        shared.state = EditorState::Dirty;
        shared.tasks.retain(|task| !task.is_finished());

        let editor = self.clone();
        let quiet = self.ctx.quiet;
        shared.tasks.push(tokio::spawn(async move {
            tokio::select! {
                biased;
                () = token.cancelled() => {}
                () = tokio::time::sleep(quiet) => editor.flush(&token).await,
            }
        }));
    }

    /// Drop the pending value and show a validation message instead.
    pub fn mark_invalid(&self, message: impl Into<String>) {
        let mut shared = self.lock();
        if let Some(timer) = shared.timer.take() {
            timer.cancel();
        }
        shared.pending = None;
        shared.state = EditorState::Invalid(message.into());
    }

    /// Cancel any pending commit without touching the committed value.
    pub fn cancel(&self) {
        let mut shared = self.lock();
        if let Some(timer) = shared.timer.take() {
            timer.cancel();
        }
        shared.pending = None;
        if shared.state == EditorState::Dirty {
            shared.state = EditorState::Clean;
        }
    }

    /// Re-sync to new row data: cancel pending work and adopt `initial`.
    pub fn reset(&self, initial: FieldValue) {
        let mut shared = self.lock();
        if let Some(timer) = shared.timer.take() {
            timer.cancel();
        }
        shared.pending = None;
        shared.committed = initial;
        shared.state = EditorState::Clean;
    }

    /// Wait until every spawned timer and commit has finished.
    pub async fn wait_idle(&self) {
        loop {
            let tasks = std::mem::take(&mut self.lock().tasks);
            if tasks.is_empty() {
                return;
            }
            for task in tasks {
                if let Err(err) = task.await {
                    tracing::error!(field = %self.ctx.field, error = %err, "Editor task failed");
                }
            }
        }
    }

    async fn flush(&self, token: &CancellationToken) {
        let value = {
            let mut shared = self.lock();
            // A newer input cancelled this timer after it fired.
            if token.is_cancelled() {
                return;
            }
            shared.timer = None;
            let Some(value) = shared.pending.take() else {
                return;
            };
            if value == shared.committed {
                shared.state = EditorState::Clean;
                return;
            }
            shared.state = EditorState::Committing;
            value
        };

        let ctx = &self.ctx;
        tracing::debug!(
            tracker_id = ctx.tracker_id,
            row_id = ctx.row_id,
            field = %ctx.field,
            "Committing field"
        );

        match ctx
            .store
            .update_field(ctx.tracker_id, ctx.row_id, ctx.field, &value)
            .await
        {
            Ok(()) => {
                ctx.sink.commit(ctx.row_id, ctx.row_index, ctx.field, value.clone());
                ctx.notifier.notify(Toast::success(
                    format!("{} has been updated", ctx.field),
                    ctx.display_offset,
                ));
                let mut shared = self.lock();
                shared.committed = value;
                if shared.state == EditorState::Committing {
                    shared.state = EditorState::Clean;
                }
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(
                    tracker_id = ctx.tracker_id,
                    row_id = ctx.row_id,
                    field = %ctx.field,
                    error = %message,
                    "Field update failed"
                );
                ctx.notifier
                    .notify(Toast::error(message.clone(), ctx.display_offset));
                let mut shared = self.lock();
                if shared.state == EditorState::Committing {
                    shared.state = EditorState::Error(message);
                }
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// Required text (company, position). Blank input is rejected locally.
pub struct TextEditor {
    engine: FieldEditor,
    value: String,
}

impl TextEditor {
    pub fn new(ctx: EditorContext, initial: String) -> Self {
        Self {
            engine: FieldEditor::new(ctx, FieldValue::Text(initial.clone())),
            value: initial,
        }
    }

    pub fn input(&mut self, raw: &str) {
        self.value = raw.to_string();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.engine.mark_invalid(EMPTY_REQUIRED_MESSAGE);
        } else {
            self.engine.schedule(FieldValue::Text(trimmed.to_string()));
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn reset(&mut self, initial: String) {
        self.engine.reset(FieldValue::Text(initial.clone()));
        self.value = initial;
    }

    pub fn engine(&self) -> &FieldEditor {
        &self.engine
    }
}

/// Optional text. Blank input clears the field.
pub struct OptionalTextEditor {
    engine: FieldEditor,
    value: String,
}

impl OptionalTextEditor {
    pub fn new(ctx: EditorContext, initial: Option<String>) -> Self {
        Self {
            engine: FieldEditor::new(ctx, text_value(initial.clone())),
            value: initial.unwrap_or_default(),
        }
    }

    pub fn input(&mut self, raw: &str) {
        self.value = raw.to_string();
        let trimmed = raw.trim();
        self.engine.schedule(if trimmed.is_empty() {
            FieldValue::Null
        } else {
            FieldValue::Text(trimmed.to_string())
        });
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn reset(&mut self, initial: Option<String>) {
        self.engine.reset(text_value(initial.clone()));
        self.value = initial.unwrap_or_default();
    }

    pub fn engine(&self) -> &FieldEditor {
        &self.engine
    }
}

fn text_value(value: Option<String>) -> FieldValue {
    value.map_or(FieldValue::Null, FieldValue::Text)
}

// ---------------------------------------------------------------------------
// Number
// ---------------------------------------------------------------------------

/// Optional non-negative whole number (expected salary).
///
/// Outside edit mode the cell shows the currency form; in edit mode it shows
/// the raw input.
pub struct NumberEditor {
    engine: FieldEditor,
    raw: String,
    shown: Option<i64>,
    editing: bool,
}

impl NumberEditor {
    pub fn new(ctx: EditorContext, initial: Option<i64>) -> Self {
        Self {
            engine: FieldEditor::new(ctx, initial.map_or(FieldValue::Null, FieldValue::Integer)),
            raw: initial.map(|n| n.to_string()).unwrap_or_default(),
            shown: initial,
            editing: false,
        }
    }

    pub fn begin_edit(&mut self) {
        self.editing = true;
        self.raw = self.shown.map(|n| n.to_string()).unwrap_or_default();
    }

    /// Blur or Enter.
    pub fn finish_edit(&mut self) {
        self.editing = false;
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn input(&mut self, raw: &str) {
        self.raw = raw.to_string();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.shown = None;
            self.engine.schedule(FieldValue::Null);
            return;
        }
        match trimmed.parse::<i64>() {
            Ok(n) if n >= 0 => {
                self.shown = Some(n);
                self.engine.schedule(FieldValue::Integer(n));
            }
            _ => self.engine.mark_invalid("Must be a whole number of 0 or more"),
        }
    }

    /// Text for the cell in its current mode.
    pub fn display(&self) -> String {
        if self.editing {
            self.raw.clone()
        } else {
            format_salary(self.shown)
        }
    }

    pub fn reset(&mut self, initial: Option<i64>) {
        self.engine
            .reset(initial.map_or(FieldValue::Null, FieldValue::Integer));
        self.shown = initial;
        self.raw = initial.map(|n| n.to_string()).unwrap_or_default();
        self.editing = false;
    }

    pub fn engine(&self) -> &FieldEditor {
        &self.engine
    }
}

// ---------------------------------------------------------------------------
// Enum selects
// ---------------------------------------------------------------------------

/// Work arrangement select with a "No Selection" entry.
pub struct RemoteEditor {
    engine: FieldEditor,
    selected: Option<Remote>,
}

impl RemoteEditor {
    pub fn new(ctx: EditorContext, initial: Option<Remote>) -> Self {
        Self {
            engine: FieldEditor::new(ctx, initial.map_or(FieldValue::Null, FieldValue::Remote)),
            selected: initial,
        }
    }

    /// Picker entries, "No Selection" first.
    pub fn options() -> Vec<(&'static str, Option<Remote>)> {
        std::iter::once((NO_SELECTION_LABEL, None))
            .chain(Remote::ALL.into_iter().map(|r| (r.label(), Some(r))))
            .collect()
    }

    pub fn select(&mut self, remote: Option<Remote>) {
        self.selected = remote;
        self.engine
            .schedule(remote.map_or(FieldValue::Null, FieldValue::Remote));
    }

    pub fn selected(&self) -> Option<Remote> {
        self.selected
    }

    pub fn label(&self) -> &'static str {
        self.selected.map_or(NO_SELECTION_LABEL, Remote::label)
    }

    pub fn reset(&mut self, initial: Option<Remote>) {
        self.engine
            .reset(initial.map_or(FieldValue::Null, FieldValue::Remote));
        self.selected = initial;
    }

    pub fn engine(&self) -> &FieldEditor {
        &self.engine
    }
}

pub struct StatusEditor {
    engine: FieldEditor,
    selected: ApplicationStatus,
}

impl StatusEditor {
    pub fn new(ctx: EditorContext, initial: ApplicationStatus) -> Self {
        Self {
            engine: FieldEditor::new(ctx, FieldValue::Status(initial)),
            selected: initial,
        }
    }

    /// Picker groups; the UI draws a separator between them.
    pub fn groups() -> &'static [&'static [ApplicationStatus]] {
        &ApplicationStatus::GROUPS
    }

    pub fn select(&mut self, status: ApplicationStatus) {
        self.selected = status;
        self.engine.schedule(FieldValue::Status(status));
    }

    pub fn selected(&self) -> ApplicationStatus {
        self.selected
    }

    pub fn reset(&mut self, initial: ApplicationStatus) {
        self.engine.reset(FieldValue::Status(initial));
        self.selected = initial;
    }

    pub fn engine(&self) -> &FieldEditor {
        &self.engine
    }
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

pub struct DateEditor {
    engine: FieldEditor,
    selected: Option<NaiveDate>,
}

impl DateEditor {
    pub fn new(ctx: EditorContext, initial: Option<NaiveDate>) -> Self {
        Self {
            engine: FieldEditor::new(ctx, initial.map_or(FieldValue::Null, FieldValue::Date)),
            selected: initial,
        }
    }

    pub fn select(&mut self, date: Option<NaiveDate>) {
        self.selected = date;
        self.engine
            .schedule(date.map_or(FieldValue::Null, FieldValue::Date));
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn button_text(&self) -> String {
        self.selected
            .map(format_picker_date)
            .unwrap_or_else(|| EMPTY_DATE_PLACEHOLDER.to_string())
    }

    pub fn reset(&mut self, initial: Option<NaiveDate>) {
        self.engine
            .reset(initial.map_or(FieldValue::Null, FieldValue::Date));
        self.selected = initial;
    }

    pub fn engine(&self) -> &FieldEditor {
        &self.engine
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

/// Date plus 12-hour clock picker. Minutes move in steps of five.
///
/// Time controls do nothing until a date has been picked.
pub struct DateTimeEditor {
    engine: FieldEditor,
    selected: Option<NaiveDateTime>,
}

impl DateTimeEditor {
    pub const HOURS: [u32; 12] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
    pub const MINUTES: [u32; 12] = [0, 5, 10, 15, 20, 25, 30, 35, 40, 45, 50, 55];

    pub fn new(ctx: EditorContext, initial: Option<NaiveDateTime>) -> Self {
        Self {
            engine: FieldEditor::new(ctx, initial.map_or(FieldValue::Null, FieldValue::DateTime)),
            selected: initial,
        }
    }

    /// Pick a calendar day; the time resets to midnight.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.set(date.and_time(NaiveTime::MIN));
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.engine.schedule(FieldValue::Null);
    }

    /// `hour` on the 12-hour clock, keeping the current AM/PM.
    pub fn set_hour(&mut self, hour: u32) {
        let Some(current) = self.selected else { return };
        if !(1..=12).contains(&hour) {
            return;
        }
        let pm = current.hour() >= 12;
        let hour24 = (hour % 12) + if pm { 12 } else { 0 };
        if let Some(next) = current.with_hour(hour24) {
            self.set(next);
        }
    }

    pub fn set_minute(&mut self, minute: u32) {
        let Some(current) = self.selected else { return };
        if !Self::MINUTES.contains(&minute) {
            return;
        }
        if let Some(next) = current.with_minute(minute) {
            self.set(next);
        }
    }

    pub fn set_meridiem(&mut self, meridiem: Meridiem) {
        let Some(current) = self.selected else { return };
        let base = current.hour() % 12;
        let hour24 = match meridiem {
            Meridiem::Am => base,
            Meridiem::Pm => base + 12,
        };
        if let Some(next) = current.with_hour(hour24) {
            self.set(next);
        }
    }

    pub fn selected(&self) -> Option<NaiveDateTime> {
        self.selected
    }

    /// Hour on the 12-hour clock and AM/PM of the current value.
    pub fn clock(&self) -> Option<(u32, u32, Meridiem)> {
        self.selected.map(|dt| {
            let (pm, hour12) = dt.hour12();
            let meridiem = if pm { Meridiem::Pm } else { Meridiem::Am };
            (hour12, dt.minute(), meridiem)
        })
    }

    pub fn button_text(&self) -> String {
        self.selected
            .map(format_picker_date_time)
            .unwrap_or_else(|| EMPTY_DATE_PLACEHOLDER.to_string())
    }

    pub fn reset(&mut self, initial: Option<NaiveDateTime>) {
        self.engine
            .reset(initial.map_or(FieldValue::Null, FieldValue::DateTime));
        self.selected = initial;
    }

    pub fn engine(&self) -> &FieldEditor {
        &self.engine
    }

    fn set(&mut self, value: NaiveDateTime) {
        self.selected = Some(value);
        self.engine.schedule(FieldValue::DateTime(value));
    }
}

#[cfg(test)]
mod tests {
    use chrono::Offset;

    use super::*;
    use crate::client::AccessError;
    use crate::notify::ToastLog;
    use async_trait::async_trait;
    use tracareer_core::application::{Application, ApplicationPage, CreateApplication};

    struct NullStore;

    #[async_trait]
    impl ApplicationStore for NullStore {
        async fn fetch_page(&self, _: DbId, _: i64, _: i64) -> Result<ApplicationPage, AccessError> {
            Ok(ApplicationPage {
                data: Vec::new(),
                total_rows: 0,
            })
        }

        async fn create_application(
            &self,
            _: DbId,
            _: &CreateApplication,
        ) -> Result<Application, AccessError> {
            Err(AccessError::Malformed("unused".into()))
        }

        async fn update_field(
            &self,
            _: DbId,
            _: DbId,
            _: ApplicationField,
            _: &FieldValue,
        ) -> Result<(), AccessError> {
            Ok(())
        }
    }

    struct NullSink;

    impl RecordMutationSink for NullSink {
        fn commit(&self, _: DbId, _: usize, _: ApplicationField, _: FieldValue) {}
    }

    fn ctx(field: ApplicationField) -> EditorContext {
        EditorContext {
            tracker_id: 1,
            row_id: 42,
            row_index: 0,
            field,
            store: Arc::new(NullStore),
            sink: Arc::new(NullSink),
            notifier: Arc::new(ToastLog::new()),
            quiet: Duration::from_millis(300),
            display_offset: chrono::Utc.fix(),
        }
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 6)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_time_edits_ignored_without_date() {
        let mut editor = DateTimeEditor::new(ctx(ApplicationField::InterviewAt), None);
        editor.set_hour(3);
        editor.set_minute(15);
        editor.set_meridiem(Meridiem::Pm);
        assert_eq!(editor.selected(), None);
        assert_eq!(editor.engine().state(), EditorState::Clean);
        assert_eq!(editor.button_text(), "Pick a date");
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_date_resets_time() {
        let mut editor = DateTimeEditor::new(ctx(ApplicationField::InterviewAt), Some(at(15, 5)));
        editor.select_date(NaiveDate::from_ymd_opt(2025, 2, 3).unwrap());
        assert_eq!(
            editor.selected(),
            NaiveDate::from_ymd_opt(2025, 2, 3).and_then(|d| d.and_hms_opt(0, 0, 0))
        );
        editor.engine().wait_idle().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_hour_keeps_meridiem() {
        let mut editor = DateTimeEditor::new(ctx(ApplicationField::InterviewAt), Some(at(15, 5)));
        editor.set_hour(12);
        assert_eq!(editor.selected(), Some(at(12, 5)));
        editor.set_hour(9);
        assert_eq!(editor.selected(), Some(at(21, 5)));
        assert_eq!(editor.clock(), Some((9, 5, Meridiem::Pm)));

        editor.set_meridiem(Meridiem::Am);
        assert_eq!(editor.selected(), Some(at(9, 5)));
        editor.set_hour(12);
        assert_eq!(editor.selected(), Some(at(0, 5)));
        assert_eq!(editor.clock(), Some((12, 5, Meridiem::Am)));
        editor.engine().wait_idle().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_minutes_step_by_five() {
        let mut editor = DateTimeEditor::new(ctx(ApplicationField::InterviewAt), Some(at(9, 0)));
        editor.set_minute(7);
        assert_eq!(editor.selected(), Some(at(9, 0)));
        editor.set_minute(55);
        assert_eq!(editor.selected(), Some(at(9, 55)));
        assert_eq!(editor.button_text(), "06 Jan 2025 | 09:55 AM");
        editor.engine().wait_idle().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_number_display_modes() {
        let mut editor = NumberEditor::new(ctx(ApplicationField::ExpectedSalary), Some(120_000));
        assert_eq!(editor.display(), "$120,000");

        editor.begin_edit();
        assert_eq!(editor.display(), "120000");
        editor.input("abc");
        assert!(matches!(editor.engine().state(), EditorState::Invalid(_)));
        editor.input("150000");
        editor.finish_edit();
        assert_eq!(editor.display(), "$150,000");
        editor.engine().wait_idle().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_negative_number_is_invalid() {
        let mut editor = NumberEditor::new(ctx(ApplicationField::ExpectedSalary), None);
        editor.input("-5");
        assert!(matches!(editor.engine().state(), EditorState::Invalid(_)));
        assert_eq!(editor.engine().committed(), FieldValue::Null);
    }

    #[test]
    fn test_remote_options() {
        let labels: Vec<_> = RemoteEditor::options().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["No Selection", "On Site", "Hybrid", "Remote"]);
    }
}
