//! Record grid controller.
//!
//! Owns the rows on screen for one tracker, the per-page cache, and the
//! sort/filter/visibility state. Editors report confirmed writes back through
//! [`RecordMutationSink`]; nothing else mutates the displayed rows.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use tracareer_core::application::Application;
use tracareer_core::field::{ApplicationField, FieldValue};
use tracareer_core::sort::SortState;
use tracareer_core::types::DbId;

use crate::columns::{column, compare_by, ColumnDef, ColumnId, COLUMNS};
use crate::store::ApplicationStore;

/// Funnel for applying a confirmed single-field write to local grid state.
pub trait RecordMutationSink: Send + Sync {
    /// Replace `field` of record `row_id`. `row_index` is where the record
    /// was displayed when editing began; rows may have moved since.
    fn commit(&self, row_id: DbId, row_index: usize, field: ApplicationField, value: FieldValue);
}

#[derive(Debug, Default)]
struct GridState {
    rows: Vec<Application>,
    total_rows: i64,
    cache: HashMap<i64, Vec<Application>>,
    page_index: i64,
    /// Single-column sort; `None` keeps server order.
    sort: Option<(ColumnId, SortState)>,
    company_filter: String,
    hidden: HashSet<ColumnId>,
    is_loading: bool,
}

pub struct GridController {
    tracker_id: DbId,
    page_size: i64,
    store: Arc<dyn ApplicationStore>,
    state: Mutex<GridState>,
}

impl GridController {
    pub fn new(tracker_id: DbId, page_size: i64, store: Arc<dyn ApplicationStore>) -> Self {
        Self {
            tracker_id,
            page_size: page_size.max(1),
            store,
            state: Mutex::new(GridState::default()),
        }
    }

    // ---- paging ----

    /// Show page `index` (0-based), from cache when possible.
    ///
    /// A fetch failure is logged and the previous rows stay on screen.
    pub async fn load_page(&self, index: i64) {
        let index = index.max(0);
        let previous = {
            let mut state = self.lock();
            let previous = state.page_index;
            state.page_index = index;
            if let Some(rows) = state.cache.get(&index) {
                state.rows = rows.clone();
                state.is_loading = false;
                tracing::debug!(tracker_id = self.tracker_id, page = index, "Served page from cache");
                return;
            }
            state.is_loading = true;
            previous
        };

        let result = self
            .store
            .fetch_page(self.tracker_id, index, self.page_size)
            .await;

        let mut state = self.lock();
        match result {
            Ok(page) => {
                state.total_rows = page.total_rows;
                state.cache.insert(index, page.data.clone());
                if state.page_index == index {
                    state.rows = page.data;
                    state.is_loading = false;
                } else {
                    tracing::debug!(
                        tracker_id = self.tracker_id,
                        page = index,
                        current = state.page_index,
                        "Cached response for a page no longer shown"
                    );
                }
            }
            Err(err) => {
                tracing::error!(
                    tracker_id = self.tracker_id,
                    page = index,
                    error = %err,
                    "Failed to fetch applications page"
                );
                // The old rows stay on screen, so the index must follow them.
                if state.page_index == index {
                    state.page_index = previous;
                    state.is_loading = false;
                }
            }
        }
    }

    /// Fold freshly created records in: clear the cache, grow the total and
    /// refetch the current page. If the refetch fails the new records are
    /// prepended locally.
    pub async fn add_records(&self, new_records: Vec<Application>) {
        let index = {
            let mut state = self.lock();
            state.cache.clear();
            state.total_rows += new_records.len() as i64;
            state.page_index
        };

        match self
            .store
            .fetch_page(self.tracker_id, index, self.page_size)
            .await
        {
            Ok(page) => {
                let mut state = self.lock();
                state.total_rows = page.total_rows;
                state.cache.insert(index, page.data.clone());
                if state.page_index == index {
                    state.rows = page.data;
                }
            }
            Err(err) => {
                tracing::warn!(
                    tracker_id = self.tracker_id,
                    error = %err,
                    "Refetch after create failed, prepending locally"
                );
                let mut state = self.lock();
                let mut rows = new_records;
                rows.append(&mut state.rows);
                rows.truncate(self.page_size as usize);
                state.rows = rows;
            }
        }
    }

    pub fn page_count(&self) -> i64 {
        let total = self.lock().total_rows;
        ((total + self.page_size - 1) / self.page_size).max(1)
    }

    pub fn can_previous(&self) -> bool {
        self.page_index() > 0
    }

    pub fn can_next(&self) -> bool {
        self.page_index() + 1 < self.page_count()
    }

    pub async fn first_page(&self) {
        self.load_page(0).await;
    }

    /// No-op while a fetch is in flight.
    pub async fn previous_page(&self) {
        if self.can_previous() && !self.is_loading() {
            self.load_page(self.page_index() - 1).await;
        }
    }

    /// No-op while a fetch is in flight.
    pub async fn next_page(&self) {
        if self.can_next() && !self.is_loading() {
            self.load_page(self.page_index() + 1).await;
        }
    }

    pub async fn last_page(&self) {
        self.load_page(self.page_count() - 1).await;
    }

    // ---- sort / filter / visibility ----

    /// Advance the sort of `id` one click. Sorting one column clears any other.
    /// Non-sortable columns stay unsorted.
    pub fn toggle_sort(&self, id: ColumnId) -> SortState {
        if !column(id).is_some_and(ColumnDef::is_sortable) {
            return SortState::Unsorted;
        }
        let mut state = self.lock();
        let current = match state.sort {
            Some((sorted, direction)) if sorted == id => direction,
            _ => SortState::Unsorted,
        };
        let next = current.next();
        state.sort = (next != SortState::Unsorted).then_some((id, next));
        next
    }

    pub fn sort_state(&self, id: ColumnId) -> SortState {
        match self.lock().sort {
            Some((sorted, direction)) if sorted == id => direction,
            _ => SortState::Unsorted,
        }
    }

    /// Case-insensitive substring filter on company.
    pub fn set_company_filter(&self, text: &str) {
        self.lock().company_filter = text.trim().to_lowercase();
    }

    /// Show or hide a column. Returns `false` for columns that cannot be hidden.
    pub fn set_column_visibility(&self, id: ColumnId, visible: bool) -> bool {
        if !column(id).is_some_and(|c| c.hideable) {
            return false;
        }
        let mut state = self.lock();
        if visible {
            state.hidden.remove(&id);
        } else {
            state.hidden.insert(id);
        }
        true
    }

    pub fn is_column_visible(&self, id: ColumnId) -> bool {
        !self.lock().hidden.contains(&id)
    }

    pub fn visible_columns(&self) -> Vec<&'static ColumnDef> {
        let state = self.lock();
        COLUMNS.iter().filter(|c| !state.hidden.contains(&c.id)).collect()
    }

    /// Rows of the current page after filter and sort, each paired with its
    /// index into the displayed records (the index editors commit against).
    pub fn visible_rows(&self) -> Vec<(usize, Application)> {
        let state = self.lock();
        let mut rows: Vec<(usize, Application)> = state
            .rows
            .iter()
            .enumerate()
            .filter(|(_, app)| {
                state.company_filter.is_empty()
                    || app.company.to_lowercase().contains(&state.company_filter)
            })
            .map(|(i, app)| (i, app.clone()))
            .collect();
        if let Some((id, direction)) = state.sort {
            rows.sort_by(|(_, a), (_, b)| compare_by(a, b, id, direction));
        }
        rows
    }

    // ---- accessors ----

    pub fn tracker_id(&self) -> DbId {
        self.tracker_id
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn page_index(&self) -> i64 {
        self.lock().page_index
    }

    pub fn total_rows(&self) -> i64 {
        self.lock().total_rows
    }

    pub fn is_loading(&self) -> bool {
        self.lock().is_loading
    }

    pub fn rows(&self) -> Vec<Application> {
        self.lock().rows.clone()
    }

    pub fn is_cached(&self, index: i64) -> bool {
        self.lock().cache.contains_key(&index)
    }

    fn lock(&self) -> MutexGuard<'_, GridState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl RecordMutationSink for GridController {
    fn commit(&self, row_id: DbId, row_index: usize, field: ApplicationField, value: FieldValue) {
        let mut guard = self.lock();
        let state = &mut *guard;

        let displayed = match state.rows.get(row_index) {
            Some(row) if row.id == row_id => Some(row_index),
            _ => state.rows.iter().position(|row| row.id == row_id),
        };
        if let Some(i) = displayed {
            if let Err(err) = state.rows[i].set_field(field, value.clone()) {
                tracing::warn!(row_id, %field, error = %err, "Rejected local commit");
                return;
            }
        } else {
            tracing::debug!(row_id, row_index, %field, "Committed row is not displayed");
        }

        let mut patched = displayed.is_some();
        for row in state.cache.values_mut().flatten().filter(|row| row.id == row_id) {
            if let Err(err) = row.set_field(field, value.clone()) {
                tracing::warn!(row_id, %field, error = %err, "Rejected cached commit");
                return;
            }
            patched = true;
        }
        if !patched {
            tracing::warn!(row_id, row_index, %field, "Commit for a record that is not loaded");
        }
    }
}
