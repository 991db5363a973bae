//! Domain model structs persisted in the SQLite database.
//!
//! Every struct derives `Serialize` so it can be handed directly to the
//! presentation layer as JSON.

use chrono::NaiveDateTime;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Feedback
// ---------------------------------------------------------------------------

/// One submitted piece of feedback.  Rows are never updated or deleted.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FeedbackEntry {
    /// Auto-increment row id; also gives the submission order.
    pub id: i64,
    /// Trimmed author name, or `"Anonymous"`.
    pub user: String,
    /// Message exactly as submitted.
    pub message: String,
    /// Star rating, 1..=5.  `None` for rows written before ratings existed.
    pub rating: Option<u8>,
    /// Local wall-clock submission time, minute precision.  `None` for rows
    /// written before the column existed or holding unreadable text.
    pub submitted_at: Option<NaiveDateTime>,
}

// ---------------------------------------------------------------------------
// Download
// ---------------------------------------------------------------------------

/// One successful download registration.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DownloadEntry {
    /// Auto-increment row id.
    pub id: i64,
    /// Trimmed name given at registration (at least three characters).
    pub user: String,
    /// Local wall-clock registration time, minute precision.  `None` when
    /// missing or unreadable.
    pub downloaded_at: Option<NaiveDateTime>,
}

// ---------------------------------------------------------------------------
// Acknowledgements
// ---------------------------------------------------------------------------

/// Returned by [`Database::register_download`] once the counter increment
/// and the log row are committed.  The caller hands out the artifact on
/// receipt of it.
///
/// [`Database::register_download`]: crate::Database::register_download
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DownloadReceipt {
    pub entry_id: i64,
    pub user: String,
    /// Counter value after this registration.
    pub total_downloads: u64,
}

/// Returned by [`Database::submit_feedback`].
///
/// [`Database::submit_feedback`]: crate::Database::submit_feedback
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FeedbackReceipt {
    pub entry_id: i64,
    pub user: String,
    pub rating: u8,
}
