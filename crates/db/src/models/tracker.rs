//! Tracker row model.

use sqlx::FromRow;
use tracareer_core::tracker::Tracker;
use tracareer_core::types::{DbId, Timestamp, UserId};

/// A row from the `trackers` table.
#[derive(Debug, Clone, FromRow)]
pub struct TrackerRow {
    pub id: DbId,
    pub owner_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<TrackerRow> for Tracker {
    fn from(row: TrackerRow) -> Self {
        Tracker {
            id: row.id,
            title: row.title,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
