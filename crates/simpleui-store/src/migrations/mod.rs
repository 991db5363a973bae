//! Database migration runner.
//!
//! Migrations are executed in order on every [`Database::open_at`] call.
//! `PRAGMA user_version` records the last applied step so each one normally
//! runs once. Every step is also safe to re-run on its own, which lets a
//! database file created before versioning existed (`user_version = 0`, some
//! or all columns already present) upgrade cleanly.
//!
//! [`Database::open_at`]: crate::Database::open_at

pub mod v001_initial;
pub mod v002_feedback_rating_date;
pub mod v003_downloads_date;

use rusqlite::Connection;

use crate::error::{Result, StoreError};

/// A single schema step.
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Connection) -> rusqlite::Result<()>,
}

/// Every known step, in application order.
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "v001_initial",
        up: v001_initial::up,
    },
    Migration {
        version: 2,
        name: "v002_feedback_rating_date",
        up: v002_feedback_rating_date::up,
    },
    Migration {
        version: 3,
        name: "v003_downloads_date",
        up: v003_downloads_date::up,
    },
];

/// Current schema version.  Bump this and add a new migration module whenever
/// the schema changes.
pub const CURRENT_VERSION: u32 = 3;

const SEED_COUNTER_SQL: &str = "INSERT OR IGNORE INTO download_count (id, count) VALUES (1, 0)";

/// Run all pending migrations against the open connection, then make sure
/// the counter row exists.
///
/// Each step commits together with its `user_version` bump, so a crash
/// leaves the database at the last fully applied step.
pub fn run_migrations(conn: &mut Connection) -> Result<()> {
    let current = applied_version(conn)?;

    tracing::info!(
        current_version = current,
        target_version = CURRENT_VERSION,
        "checking database migrations"
    );

    if current > CURRENT_VERSION {
        return Err(StoreError::Migration(format!(
            "database schema version {current} is newer than supported version {CURRENT_VERSION}"
        )));
    }

    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        tracing::info!(version = migration.version, "applying migration {}", migration.name);

        let tx = conn.transaction()?;
        (migration.up)(&tx)
            .map_err(|e| StoreError::Migration(format!("{}: {e}", migration.name)))?;
        tx.pragma_update(None, "user_version", migration.version)?;
        tx.commit()?;
    }

    // Runs on every open: a fresh file needs the row, an existing one keeps
    // its count.
    conn.execute(SEED_COUNTER_SQL, [])?;

    Ok(())
}

/// Read the schema version recorded in the database file.
pub fn applied_version(conn: &Connection) -> Result<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// `ALTER TABLE .. ADD COLUMN` that is a no-op when the column is already
/// there. SQLite has no `ADD COLUMN IF NOT EXISTS`.
///
/// `table`, `column` and `decl` are compile-time identifiers, never user input.
pub(crate) fn add_column_if_absent(
    conn: &Connection,
    table: &str,
    column: &str,
    decl: &str,
) -> rusqlite::Result<()> {
    if column_exists(conn, table, column)? {
        tracing::debug!(table, column, "column already present");
        return Ok(());
    }

    conn.execute_batch(&format!("ALTER TABLE {table} ADD COLUMN {column} {decl}"))
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for name in names {
        if name? == column {
            return Ok(true);
        }
    }
    Ok(false)
}
