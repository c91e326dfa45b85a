//! Editable application columns and the values they accept.
//!
//! Every inline edit is a single-column update. [`FieldValue::from_json`]
//! normalizes raw input for a column (trimming, blank-to-null, numeric
//! parsing) and is shared by the API handlers and the grid editors so both
//! sides agree on what a committed value looks like.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::status::{ApplicationStatus, Remote};

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format for interview date-times (minute precision, no zone).
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// A column of the `applications` table that can be edited in place.
///
/// `id` and `tracker_id` are deliberately absent: neither may change after
/// creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationField {
    Company,
    Position,
    Remote,
    Location,
    Status,
    AppliedAt,
    InterviewAt,
    ExpectedSalary,
    ResumeVersion,
    HiringManager,
    Contact,
    Link,
}

/// Value domain of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    RequiredText,
    OptionalText,
    OptionalInteger,
    OptionalDate,
    OptionalDateTime,
    Status,
    OptionalRemote,
}

impl ApplicationField {
    pub const ALL: [ApplicationField; 12] = [
        Self::Company,
        Self::Position,
        Self::Remote,
        Self::Location,
        Self::Status,
        Self::AppliedAt,
        Self::InterviewAt,
        Self::ExpectedSalary,
        Self::ResumeVersion,
        Self::HiringManager,
        Self::Contact,
        Self::Link,
    ];

    /// Database column name. Only these names are ever interpolated into SQL.
    pub fn column(self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Position => "position",
            Self::Remote => "remote",
            Self::Location => "location",
            Self::Status => "status",
            Self::AppliedAt => "applied_at",
            Self::InterviewAt => "interview_at",
            Self::ExpectedSalary => "expected_salary",
            Self::ResumeVersion => "resume_version",
            Self::HiringManager => "hiring_manager",
            Self::Contact => "contact",
            Self::Link => "link",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Self::Company | Self::Position => FieldKind::RequiredText,
            Self::Remote => FieldKind::OptionalRemote,
            Self::Status => FieldKind::Status,
            Self::AppliedAt => FieldKind::OptionalDate,
            Self::InterviewAt => FieldKind::OptionalDateTime,
            Self::ExpectedSalary => FieldKind::OptionalInteger,
            Self::Location
            | Self::ResumeVersion
            | Self::HiringManager
            | Self::Contact
            | Self::Link => FieldKind::OptionalText,
        }
    }
}

impl fmt::Display for ApplicationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for ApplicationField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.column() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown application column '{s}'")))
    }
}

/// A normalized single-column value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Text(String),
    Integer(i64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Status(ApplicationStatus),
    Remote(Remote),
}

impl FieldValue {
    /// Normalize raw JSON input for `field`.
    ///
    /// - required text is trimmed and must be non-empty
    /// - optional text/number/date inputs that trim to `""` become `Null`
    /// - numbers accept JSON numbers or numeric strings and must be >= 0
    pub fn from_json(field: ApplicationField, raw: &Value) -> Result<Self, CoreError> {
        let column = field.column();
        let invalid = |what: &str| CoreError::Validation(format!("{column}: {what}"));

        // Blank strings collapse to null for every optional column.
        let trimmed = match raw {
            Value::String(s) => Some(s.trim()),
            _ => None,
        };
        let is_blank = raw.is_null() || trimmed == Some("");

        match field.kind() {
            FieldKind::RequiredText => match trimmed {
                Some(s) if !s.is_empty() => Ok(Self::Text(s.to_string())),
                _ if is_blank => Err(invalid("can't be empty")),
                _ => Err(invalid("expected a string")),
            },
            FieldKind::Status => match trimmed {
                Some(s) => Ok(Self::Status(s.parse()?)),
                None => Err(invalid("expected a status key")),
            },
            _ if is_blank => Ok(Self::Null),
            FieldKind::OptionalText => match trimmed {
                Some(s) => Ok(Self::Text(s.to_string())),
                None => Err(invalid("expected a string")),
            },
            FieldKind::OptionalInteger => {
                let number = match (raw, trimmed) {
                    (Value::Number(n), _) => n.as_i64().ok_or_else(|| invalid("expected a whole number"))?,
                    (_, Some(s)) => s
                        .parse::<i64>()
                        .map_err(|_| invalid("expected a whole number"))?,
                    _ => return Err(invalid("expected a whole number")),
                };
                if number < 0 {
                    return Err(invalid("must not be negative"));
                }
                Ok(Self::Integer(number))
            }
            FieldKind::OptionalDate => {
                let s = trimmed.ok_or_else(|| invalid("expected a date"))?;
                NaiveDate::parse_from_str(s, DATE_FORMAT)
                    .map(Self::Date)
                    .map_err(|_| invalid("expected YYYY-MM-DD"))
            }
            FieldKind::OptionalDateTime => {
                let s = trimmed.ok_or_else(|| invalid("expected a date-time"))?;
                minute_precision::parse(s)
                    .map(Self::DateTime)
                    .map_err(|_| invalid("expected YYYY-MM-DDTHH:MM"))
            }
            FieldKind::OptionalRemote => match trimmed {
                Some("none") => Ok(Self::Null),
                Some(s) => Ok(Self::Remote(s.parse()?)),
                None => Err(invalid("expected a work arrangement")),
            },
        }
    }

    /// Check that an already-typed value fits `field`.
    pub fn validate_for(self, field: ApplicationField) -> Result<Self, CoreError> {
        let ok = match (field.kind(), &self) {
            (FieldKind::RequiredText, Self::Text(s)) => !s.trim().is_empty(),
            (FieldKind::Status, Self::Status(_)) => true,
            (FieldKind::RequiredText | FieldKind::Status, _) => false,
            (_, Self::Null) => true,
            (FieldKind::OptionalText, Self::Text(_)) => true,
            (FieldKind::OptionalInteger, Self::Integer(n)) => *n >= 0,
            (FieldKind::OptionalDate, Self::Date(_)) => true,
            (FieldKind::OptionalDateTime, Self::DateTime(_)) => true,
            (FieldKind::OptionalRemote, Self::Remote(_)) => true,
            _ => false,
        };
        if ok {
            Ok(self)
        } else {
            Err(CoreError::Validation(format!(
                "{self:?} is not a valid value for {}",
                field.column()
            )))
        }
    }

    /// Wire representation, the inverse of [`FieldValue::from_json`].
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Text(s) => Value::String(s.clone()),
            Self::Integer(n) => Value::from(*n),
            Self::Date(d) => Value::String(d.format(DATE_FORMAT).to_string()),
            Self::DateTime(dt) => Value::String(dt.format(DATE_TIME_FORMAT).to_string()),
            Self::Status(s) => Value::String(s.key().to_string()),
            Self::Remote(r) => Value::String(r.label().to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub(crate) fn into_text(self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub(crate) fn into_integer(self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(n),
            _ => None,
        }
    }

    pub(crate) fn into_date(self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(d),
            _ => None,
        }
    }

    pub(crate) fn into_date_time(self) -> Option<NaiveDateTime> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    pub(crate) fn into_remote(self) -> Option<Remote> {
        match self {
            Self::Remote(r) => Some(r),
            _ => None,
        }
    }
}

/// Serde helpers for minute-precision `NaiveDateTime` values.
///
/// Serializes as `YYYY-MM-DDTHH:MM`; deserializes that form and also the
/// seconds-bearing form Postgres clients tend to emit.
pub mod minute_precision {
    use chrono::NaiveDateTime;

    use super::DATE_TIME_FORMAT;

    pub fn parse(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
    }

    pub mod option {
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer};

        use super::super::DATE_TIME_FORMAT;

        pub fn serialize<S: Serializer>(
            value: &Option<NaiveDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(dt) => serializer.serialize_str(&dt.format(DATE_TIME_FORMAT).to_string()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDateTime>, D::Error> {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            raw.map(|s| super::parse(&s).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}
