// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Record store — the `entries` table, backed by SQLite.
//
// Holds digests, salts, eligibility flags, and initials.  There is no
// column for, and no code path that writes, any raw identifying field.
// Rows are append-only: this module has no update or delete.

use std::path::Path;

use hashforge_core::error::{HashForgeError, Result};
use hashforge_core::types::{Eligibility, NewRecord, StoredRecord};
use rusqlite::{Connection, params};
use tracing::{debug, info, instrument, warn};

/// SQLite schema for the entries table.
const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS entries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        hash TEXT NOT NULL,
        salt TEXT NOT NULL,
        age_verified TEXT NOT NULL,
        initials TEXT NOT NULL
    )
"#;

fn storage_err(context: &str, e: rusqlite::Error) -> HashForgeError {
    HashForgeError::StorageUnavailable(format!("{context}: {e}"))
}

/// Persistent record table backed by a SQLite database.
///
/// All methods are synchronous.  A `RecordStore` is meant to be opened once
/// per session and dropped when the session ends; `Registry` wraps it in a
/// `Mutex` so scans and appends are serialised.
pub struct RecordStore {
    /// The open SQLite connection.
    conn: Connection,
}

impl RecordStore {
    /// Open (or create) the record database at the given path.
    ///
    /// Applies WAL journal mode and creates the `entries` table if it does
    /// not exist.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref()).map_err(|e| storage_err("open", e))?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| storage_err("WAL pragma", e))?;

        conn.execute_batch(CREATE_TABLE_SQL)
            .map_err(|e| storage_err("create table", e))?;

        info!("record store opened");
        Ok(Self { conn })
    }

    /// Open an in-memory database (useful for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| storage_err("open in-memory", e))?;

        conn.execute_batch(CREATE_TABLE_SQL)
            .map_err(|e| storage_err("create table", e))?;

        debug!("in-memory record store opened");
        Ok(Self { conn })
    }

    /// Append a record and return its new id.
    ///
    /// A single INSERT: either the whole row is committed or nothing is.
    #[instrument(skip(self, record), fields(initials = %record.initials))]
    pub fn append(&self, record: &NewRecord) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO entries (hash, salt, age_verified, initials)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    record.digest,
                    record.salt,
                    record.eligibility.as_column(),
                    record.initials,
                ],
            )
            .map_err(|e| storage_err("insert entry", e))?;

        let id = self.conn.last_insert_rowid();
        debug!(record_id = id, "entry appended");
        Ok(id)
    }

    /// Read every row, ordered by id.
    ///
    /// Runs as one SELECT, so the result is a consistent snapshot.  Rows
    /// whose `age_verified` value is not `Yes`/`No` are skipped as corrupt.
    #[instrument(skip(self))]
    pub fn scan_all(&self) -> Result<Vec<StoredRecord>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, hash, salt, age_verified, initials
                 FROM entries ORDER BY id ASC",
            )
            .map_err(|e| storage_err("prepare scan", e))?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })
            .map_err(|e| storage_err("query scan", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| storage_err("collect rows", e))?;

        let mut records = Vec::with_capacity(rows.len());
        for (id, digest, salt, age_verified, initials) in rows {
            match Eligibility::from_column(&age_verified) {
                Some(eligibility) => records.push(StoredRecord {
                    id,
                    digest,
                    salt,
                    eligibility,
                    initials,
                }),
                None => warn!(record_id = id, "skipping row with unrecognised age_verified value"),
            }
        }

        debug!(count = records.len(), "scanned entries");
        Ok(records)
    }

    /// Total number of rows in the table.
    pub fn count(&self) -> Result<u64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))
            .map_err(|e| storage_err("count entries", e))
    }
}
