//! # simpleui-store
//!
//! Persistent state of the SimpleUi landing service, backed by SQLite.
//!
//! The crate exposes a synchronous [`Database`] handle that wraps a
//! `rusqlite::Connection`, brings the schema up to date when it is opened,
//! and offers the only operations the rest of the system uses to touch the
//! data: reading the download counter, registering a download, submitting
//! feedback, and listing both logs.

pub mod counter;
pub mod database;
pub mod downloads;
pub mod feedback;
pub mod migrations;
pub mod models;

mod error;
mod timestamp;

pub use database::Database;
pub use error::{Result, StoreError};
pub use models::*;
