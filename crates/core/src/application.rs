//! Application record and its wire DTOs.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::field::{ApplicationField, FieldValue};
use crate::status::{ApplicationStatus, Remote, DEFAULT_STATUS};
use crate::types::DbId;

/// Default number of applications per grid page.
pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// Upper bound for a requested page size.
pub const MAX_PAGE_SIZE: i64 = 100;

/// One tracked job application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: DbId,
    pub company: String,
    pub position: String,
    pub remote: Option<Remote>,
    pub location: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: Option<NaiveDate>,
    #[serde(default, with = "crate::field::minute_precision::option")]
    pub interview_at: Option<NaiveDateTime>,
    pub expected_salary: Option<i64>,
    pub resume_version: Option<String>,
    pub hiring_manager: Option<String>,
    pub contact: Option<String>,
    pub link: Option<String>,
    pub tracker_id: DbId,
}

impl Application {
    /// Current value of a single editable field.
    pub fn field(&self, field: ApplicationField) -> FieldValue {
        fn text(value: &Option<String>) -> FieldValue {
            value.clone().map_or(FieldValue::Null, FieldValue::Text)
        }

        match field {
            ApplicationField::Company => FieldValue::Text(self.company.clone()),
            ApplicationField::Position => FieldValue::Text(self.position.clone()),
            ApplicationField::Remote => self.remote.map_or(FieldValue::Null, FieldValue::Remote),
            ApplicationField::Location => text(&self.location),
            ApplicationField::Status => FieldValue::Status(self.status),
            ApplicationField::AppliedAt => {
                self.applied_at.map_or(FieldValue::Null, FieldValue::Date)
            }
            ApplicationField::InterviewAt => {
                self.interview_at.map_or(FieldValue::Null, FieldValue::DateTime)
            }
            ApplicationField::ExpectedSalary => {
                self.expected_salary.map_or(FieldValue::Null, FieldValue::Integer)
            }
            ApplicationField::ResumeVersion => text(&self.resume_version),
            ApplicationField::HiringManager => text(&self.hiring_manager),
            ApplicationField::Contact => text(&self.contact),
            ApplicationField::Link => text(&self.link),
        }
    }

    /// Replace exactly one field, leaving every other field untouched.
    ///
    /// The value must already be normalized for `field` (see
    /// [`FieldValue::validate_for`]); a mismatched value is rejected.
    pub fn set_field(&mut self, field: ApplicationField, value: FieldValue) -> Result<(), CoreError> {
        let value = value.validate_for(field)?;
        match (field, value) {
            (ApplicationField::Company, FieldValue::Text(s)) => self.company = s,
            (ApplicationField::Position, FieldValue::Text(s)) => self.position = s,
            (ApplicationField::Remote, v) => self.remote = v.into_remote(),
            (ApplicationField::Location, v) => self.location = v.into_text(),
            (ApplicationField::Status, FieldValue::Status(s)) => self.status = s,
            (ApplicationField::AppliedAt, v) => self.applied_at = v.into_date(),
            (ApplicationField::InterviewAt, v) => self.interview_at = v.into_date_time(),
            (ApplicationField::ExpectedSalary, v) => self.expected_salary = v.into_integer(),
            (ApplicationField::ResumeVersion, v) => self.resume_version = v.into_text(),
            (ApplicationField::HiringManager, v) => self.hiring_manager = v.into_text(),
            (ApplicationField::Contact, v) => self.contact = v.into_text(),
            (ApplicationField::Link, v) => self.link = v.into_text(),
            (field, value) => {
                return Err(CoreError::Validation(format!(
                    "{value:?} is not a valid value for {}",
                    field.column()
                )))
            }
        }
        Ok(())
    }
}

/// DTO for creating an application from the "Add Application" form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateApplication {
    pub company: String,
    pub position: String,
    #[serde(default = "default_status")]
    pub status: ApplicationStatus,
}

fn default_status() -> ApplicationStatus {
    DEFAULT_STATUS
}

impl CreateApplication {
    /// Trim the required text fields and reject blanks.
    pub fn validated(self) -> Result<Self, CoreError> {
        let company = self.company.trim().to_string();
        let position = self.position.trim().to_string();
        if company.is_empty() {
            return Err(CoreError::Validation("company can't be empty".into()));
        }
        if position.is_empty() {
            return Err(CoreError::Validation("position can't be empty".into()));
        }
        Ok(Self {
            company,
            position,
            status: self.status,
        })
    }
}

/// One page of a tracker's applications plus the tracker's total row count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationPage {
    pub data: Vec<Application>,
    pub total_rows: i64,
}

/// Single-column update request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateApplicationField {
    pub column: ApplicationField,
    pub value: serde_json::Value,
}
