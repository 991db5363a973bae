//! The single-row download counter.

use rusqlite::OptionalExtension;

use crate::database::Database;
use crate::error::Result;

impl Database {
    /// Total number of successful download registrations.
    ///
    /// Returns 0 if the counter row is missing; migrations normally seed it.
    pub fn download_count(&self) -> Result<u64> {
        let count: Option<Option<i64>> = self
            .conn()
            .query_row("SELECT count FROM download_count WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()?;

        Ok(count.flatten().map_or(0, |c| u64::try_from(c).unwrap_or(0)))
    }
}
