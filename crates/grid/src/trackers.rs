//! Tracker list shown on the home page.

use chrono::FixedOffset;
use tracareer_core::format::format_timestamp;
use tracareer_core::tracker::Tracker;
use tracareer_core::types::DbId;

use crate::client::AccessError;
use crate::columns::ActionItem;
use crate::store::TrackerStore;

/// One card in the tracker list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerCard {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub created: String,
    pub updated: String,
}

impl TrackerCard {
    pub fn from_tracker(tracker: &Tracker, offset: FixedOffset) -> Self {
        Self {
            id: tracker.id,
            title: tracker.title.clone(),
            description: tracker.description.clone().unwrap_or_default(),
            created: format_timestamp(tracker.created_at, offset),
            updated: format_timestamp(tracker.updated_at, offset),
        }
    }

    /// The card's option menu: "Edit" and "Delete", neither of which does
    /// anything yet.
    pub fn menu_items(&self) -> Vec<ActionItem> {
        ["Edit", "Delete"]
            .into_iter()
            .map(|label| ActionItem {
                label,
                copy_text: None,
            })
            .collect()
    }

    /// Route of the tracker's application grid.
    pub fn href(&self) -> String {
        format!("/tracker/{}", self.id)
    }
}

/// Fetch the signed-in user's trackers as cards, newest first.
pub async fn load_tracker_cards(
    store: &dyn TrackerStore,
    offset: FixedOffset,
) -> Result<Vec<TrackerCard>, AccessError> {
    let trackers = store.list_trackers().await.inspect_err(|err| {
        tracing::error!(error = %err, "Failed to load trackers");
    })?;
    tracing::debug!(count = trackers.len(), "Loaded trackers");
    Ok(trackers
        .iter()
        .map(|t| TrackerCard::from_tracker(t, offset))
        .collect())
}
