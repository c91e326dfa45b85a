//! Application lifecycle status and work-arrangement enumerations.
//!
//! Statuses travel on the wire and in the `applications.status` column as
//! their key (`"NotStarted"`), while the work arrangement is stored as its
//! human label (`"On Site"`). Both conventions predate this crate and are
//! kept so existing rows decode unchanged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle state of a job application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    NotStarted,
    InProgress,
    Withdrawed,
    Applied,
    Screening,
    AwaitingInterview,
    InterviewScheduled,
    InterviewCompleted,
    Offered,
    Accepted,
    Rejected,
    OnHold,
}

/// Status assigned to newly created applications when the form is untouched.
pub const DEFAULT_STATUS: ApplicationStatus = ApplicationStatus::InProgress;

impl ApplicationStatus {
    /// Every status, in picker order.
    pub const ALL: [ApplicationStatus; 12] = [
        Self::NotStarted,
        Self::InProgress,
        Self::Withdrawed,
        Self::Applied,
        Self::Screening,
        Self::AwaitingInterview,
        Self::InterviewScheduled,
        Self::InterviewCompleted,
        Self::Offered,
        Self::Accepted,
        Self::Rejected,
        Self::OnHold,
    ];

    /// Picker groups; a separator is drawn between consecutive groups.
    pub const GROUPS: [&'static [ApplicationStatus]; 4] = [
        &[Self::NotStarted, Self::InProgress, Self::Withdrawed],
        &[Self::Applied, Self::Screening],
        &[
            Self::AwaitingInterview,
            Self::InterviewScheduled,
            Self::InterviewCompleted,
        ],
        &[Self::Offered, Self::Accepted, Self::Rejected, Self::OnHold],
    ];

    /// Storage / wire key.
    pub fn key(self) -> &'static str {
        match self {
            Self::NotStarted => "NotStarted",
            Self::InProgress => "InProgress",
            Self::Withdrawed => "Withdrawed",
            Self::Applied => "Applied",
            Self::Screening => "Screening",
            Self::AwaitingInterview => "AwaitingInterview",
            Self::InterviewScheduled => "InterviewScheduled",
            Self::InterviewCompleted => "InterviewCompleted",
            Self::Offered => "Offered",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
            Self::OnHold => "OnHold",
        }
    }

    /// Human-readable label shown in badges and pickers.
    pub fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Withdrawed => "Withdrawed",
            Self::Applied => "Applied",
            Self::Screening => "Screening",
            Self::AwaitingInterview => "Awaiting Interview",
            Self::InterviewScheduled => "Interview Scheduled",
            Self::InterviewCompleted => "Interview Completed",
            Self::Offered => "Offered",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
            Self::OnHold => "On Hold",
        }
    }

    /// Badge background class.
    pub fn color(self) -> &'static str {
        match self {
            Self::NotStarted | Self::InProgress | Self::Withdrawed => "bg-status-gray/70",
            Self::Applied => "bg-status-blue/70",
            Self::Screening
            | Self::AwaitingInterview
            | Self::InterviewScheduled
            | Self::InterviewCompleted => "bg-status-yellow/70",
            Self::Offered => "bg-status-green/70",
            Self::Accepted => "bg-status-darkgreen/70",
            Self::Rejected => "bg-status-rose/70",
            Self::OnHold => "bg-status-orange/70",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ApplicationStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.key() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown application status '{s}'")))
    }
}

/// Work arrangement of a position. Serialized as its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Remote {
    #[serde(rename = "On Site")]
    OnSite,
    Hybrid,
    Remote,
}

impl Remote {
    pub const ALL: [Remote; 3] = [Self::OnSite, Self::Hybrid, Self::Remote];

    pub fn label(self) -> &'static str {
        match self {
            Self::OnSite => "On Site",
            Self::Hybrid => "Hybrid",
            Self::Remote => "Remote",
        }
    }
}

impl fmt::Display for Remote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Remote {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|remote| remote.label() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown work arrangement '{s}'")))
    }
}
