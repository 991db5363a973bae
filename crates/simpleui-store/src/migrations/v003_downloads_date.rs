use rusqlite::Connection;

use super::add_column_if_absent;

/// Registration time on download rows.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    add_column_if_absent(conn, "downloads", "date", "TEXT")
}
