//! Domain types shared by the tracker backend and the grid client.
//!
//! Holds everything that must agree on both sides of the wire: the record
//! shapes, the status and work-arrangement enumerations, single-column value
//! normalization, display formatting, and the response envelope.

pub mod application;
pub mod error;
pub mod field;
pub mod format;
pub mod response;
pub mod sort;
pub mod status;
pub mod tracker;
pub mod types;
