//! Download registrations: the counter increment plus the log row.

use rusqlite::{params, TransactionBehavior};
use simpleui_shared::validation;

use crate::database::Database;
use crate::error::Result;
use crate::models::{DownloadEntry, DownloadReceipt};
use crate::timestamp;

impl Database {
    /// Register a download for `name`.
    ///
    /// The name is trimmed and must keep at least three characters; a
    /// shorter one fails with a validation error and writes nothing.  The
    /// counter increment and the log row commit in one transaction.
    pub fn register_download(&mut self, name: &str) -> Result<DownloadReceipt> {
        let user = validation::download_name(name)?;
        let now = timestamp::now();

        // IMMEDIATE takes the write lock up front so concurrent writers queue
        // on the busy timeout instead of failing on lock upgrade.
        let tx = self
            .conn_mut()
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        // A legacy row may hold NULL; treat it as 0 like `download_count` does.
        tx.execute(
            "INSERT INTO download_count (id, count) VALUES (1, 1)
             ON CONFLICT(id) DO UPDATE SET count = COALESCE(count, 0) + 1",
            [],
        )?;
        tx.execute(
            "INSERT INTO downloads (user, date) VALUES (?1, ?2)",
            params![user, timestamp::format(&now)],
        )?;
        let entry_id = tx.last_insert_rowid();
        let total: i64 =
            tx.query_row("SELECT count FROM download_count WHERE id = 1", [], |row| {
                row.get(0)
            })?;

        tx.commit()?;

        tracing::debug!(entry_id, user, total, "download registered");

        Ok(DownloadReceipt {
            entry_id,
            user: user.to_string(),
            total_downloads: u64::try_from(total).unwrap_or(0),
        })
    }

    /// Every download registration, oldest first.
    pub fn list_downloads(&self) -> Result<Vec<DownloadEntry>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT id, user, date FROM downloads ORDER BY id ASC")?;

        let rows = stmt.query_map([], row_to_download)?;

        let mut downloads = Vec::new();
        for row in rows {
            downloads.push(row?);
        }
        Ok(downloads)
    }
}

fn row_to_download(row: &rusqlite::Row<'_>) -> rusqlite::Result<DownloadEntry> {
    let id: i64 = row.get(0)?;
    let user: Option<String> = row.get(1)?;
    let date: Option<String> = row.get(2)?;

    Ok(DownloadEntry {
        id,
        user: user.unwrap_or_default(),
        downloaded_at: timestamp::parse_column("downloads", date),
    })
}
