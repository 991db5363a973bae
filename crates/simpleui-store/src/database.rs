//! Database connection management.
//!
//! The [`Database`] struct owns a [`rusqlite::Connection`] and guarantees that
//! migrations are run before any other operation. Dropping it closes the
//! connection.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::Connection;

use crate::error::Result;
use crate::migrations;

/// Busy timeout applied when the caller does not pick one.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Wrapper around a [`rusqlite::Connection`].
///
/// All reads and writes go through the typed operations implemented in the
/// `counter`, `downloads` and `feedback` modules.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a database at an explicit path with the default busy
    /// timeout.
    pub fn open_at(path: &Path) -> Result<Self> {
        Self::open_with_timeout(path, DEFAULT_BUSY_TIMEOUT)
    }

    /// Open (or create) a database at `path`.
    ///
    /// Missing parent directories are created. Other connections to the same
    /// file are waited on for up to `busy_timeout` before a write fails.
    pub fn open_with_timeout(path: &Path, busy_timeout: Duration) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        tracing::info!(path = %path.display(), "opening database");

        let mut conn = Connection::open(path)?;

        conn.busy_timeout(busy_timeout)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        migrations::run_migrations(&mut conn)?;

        Ok(Self { conn })
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    pub(crate) fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Return the filesystem path of the open database (if any).
    pub fn path(&self) -> Option<PathBuf> {
        self.conn.path().map(PathBuf::from)
    }

    /// Schema version recorded in the database file.
    pub fn schema_version(&self) -> Result<u32> {
        migrations::applied_version(&self.conn)
    }
}
