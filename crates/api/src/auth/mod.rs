//! Authentication primitives.
//!
//! - [`jwt`] -- verification of access tokens issued by the identity provider.
//! - [`provider`] -- sign-in redirect URLs and sign-out forwarding.

pub mod jwt;
pub mod provider;
