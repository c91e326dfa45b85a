//! Tracker workspace and its creation DTO.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// A named workspace grouping job applications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tracker {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new tracker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTracker {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateTracker {
    /// Trim both fields; the title is required, a blank description is dropped.
    pub fn validated(self) -> Result<Self, CoreError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(CoreError::Validation("title can't be empty".into()));
        }
        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        Ok(Self { title, description })
    }
}
