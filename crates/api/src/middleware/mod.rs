//! Authentication extractors.
//!
//! - [`auth::AuthUser`] -- Requires a valid Bearer token.
//! - `Option<auth::AuthUser>` -- Optional session; never rejects.

pub mod auth;
