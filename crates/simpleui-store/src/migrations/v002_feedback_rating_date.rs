use rusqlite::Connection;

use super::add_column_if_absent;

/// Star rating and submission time on feedback rows.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    add_column_if_absent(conn, "feedback", "rating", "INTEGER")?;
    add_column_if_absent(conn, "feedback", "date", "TEXT")
}
