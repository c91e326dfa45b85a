//! Application row model.
//!
//! Enumerated columns are stored as TEXT guarded by CHECK constraints, so
//! the row keeps them as strings and parses on conversion.

use chrono::{NaiveDate, NaiveDateTime};
use sqlx::FromRow;
use tracareer_core::application::Application;
use tracareer_core::error::CoreError;
use tracareer_core::status::Remote;
use tracareer_core::types::DbId;

/// A row from the `applications` table.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationRow {
    pub id: DbId,
    pub company: String,
    pub position: String,
    pub remote: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub applied_at: Option<NaiveDate>,
    pub interview_at: Option<NaiveDateTime>,
    pub expected_salary: Option<i64>,
    pub resume_version: Option<String>,
    pub hiring_manager: Option<String>,
    pub contact: Option<String>,
    pub link: Option<String>,
    pub tracker_id: DbId,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = CoreError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        Ok(Application {
            id: row.id,
            company: row.company,
            position: row.position,
            remote: row.remote.as_deref().map(str::parse::<Remote>).transpose()?,
            location: row.location,
            status: row.status.parse()?,
            applied_at: row.applied_at,
            interview_at: row.interview_at,
            expected_salary: row.expected_salary,
            resume_version: row.resume_version,
            hiring_manager: row.hiring_manager,
            contact: row.contact,
            link: row.link,
            tracker_id: row.tracker_id,
        })
    }
}

/// Convert a batch of rows, surfacing a corrupt enum value as a decode error.
pub(crate) fn into_applications(rows: Vec<ApplicationRow>) -> Result<Vec<Application>, sqlx::Error> {
    rows.into_iter()
        .map(|row| Application::try_from(row).map_err(|e| sqlx::Error::Decode(Box::new(e))))
        .collect()
}
