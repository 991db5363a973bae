//! Feedback submissions and the feedback log.

use rusqlite::params;
use simpleui_shared::validation;

use crate::database::Database;
use crate::error::Result;
use crate::models::{FeedbackEntry, FeedbackReceipt};
use crate::timestamp;

impl Database {
    /// Append a feedback entry.
    ///
    /// `message` must contain something other than whitespace and is stored
    /// as given.  `name` is trimmed; a blank one is recorded as
    /// `"Anonymous"`.  `rating` must be within 1..=5.
    pub fn submit_feedback(
        &self,
        name: &str,
        message: &str,
        rating: u8,
    ) -> Result<FeedbackReceipt> {
        let message = validation::feedback_message(message)?;
        let rating = validation::rating(rating)?;
        let user = validation::feedback_author(name);
        let now = timestamp::now();

        self.conn().execute(
            "INSERT INTO feedback (user, feedback, rating, date) VALUES (?1, ?2, ?3, ?4)",
            params![user, message, rating, timestamp::format(&now)],
        )?;
        let entry_id = self.conn().last_insert_rowid();

        tracing::debug!(entry_id, user, rating, "feedback stored");

        Ok(FeedbackReceipt {
            entry_id,
            user: user.to_string(),
            rating,
        })
    }

    /// Every feedback entry, in submission order.
    pub fn list_feedback(&self) -> Result<Vec<FeedbackEntry>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, user, feedback, rating, date
             FROM feedback
             ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], row_to_feedback)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }
}

fn row_to_feedback(row: &rusqlite::Row<'_>) -> rusqlite::Result<FeedbackEntry> {
    let id: i64 = row.get(0)?;
    let user: Option<String> = row.get(1)?;
    let message: Option<String> = row.get(2)?;
    let rating: Option<u8> = row.get(3)?;
    let date: Option<String> = row.get(4)?;

    Ok(FeedbackEntry {
        id,
        user: user.unwrap_or_default(),
        message: message.unwrap_or_default(),
        rating,
        submitted_at: timestamp::parse_column("feedback", date),
    })
}
