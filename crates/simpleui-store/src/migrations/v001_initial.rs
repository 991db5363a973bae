//! v001 -- Initial schema creation.
//!
//! Creates the three tables in their oldest shape: the download counter, the
//! feedback log and the download log. Columns added later live in their own
//! steps.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Download counter (single row, id = 1)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS download_count (
    id    INTEGER PRIMARY KEY,
    count INTEGER
);

-- ----------------------------------------------------------------
-- Feedback log
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS feedback (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    user     TEXT,
    feedback TEXT
);

-- ----------------------------------------------------------------
-- Download log
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS downloads (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    user TEXT
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
