//! Client side of the tracker: the editable, paginated application grid.
//!
//! - [`client`] -- HTTP access functions against the tracker API.
//! - [`controller`] -- page fetching, per-page cache, sort/filter/visibility.
//! - [`columns`] -- column definitions and cell view models.
//! - [`editor`] -- debounced per-field inline editors.
//! - [`forms`] -- tracker and application creation forms.
//! - [`trackers`] -- the tracker list as cards.
//! - [`session`] -- the signed-in user's session.

pub mod client;
pub mod columns;
pub mod config;
pub mod controller;
pub mod editor;
pub mod forms;
pub mod notify;
pub mod session;
pub mod store;
pub mod trackers;
