//! Row structs mapping database rows onto the shared domain types.
//!
//! Each submodule contains a `FromRow` row struct and its conversion into the
//! `tracareer_core` entity that handlers and clients exchange.

pub mod application;
pub mod tracker;
