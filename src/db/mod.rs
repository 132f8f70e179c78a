// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Persistence of schedules and favourites.
//!
//! The core only knows the [`Repository`] interface: load and save whole
//! collections. Two implementations are provided, [`SqliteRepository`] for
//! durable storage and [`MemoryRepository`] for embedding and tests.
//!
//! # Tables
//!
//! * `schedules` - One row per schedule, ordered by `position`.
//! * `schedule_performances` - The performances of each schedule, stored by
//!   value so a schedule outlives catalog reloads.
//! * `favourite_artists` - Favourite artist names.
//!
//! # Atomicity
//!
//! Saves replace a whole collection inside a single transaction, so a reader
//! sees either the previous or the new contents, never a mix.

mod model;

use std::{collections::BTreeSet, path::Path};

use anyhow::{Context, Result};
use rusqlite::{Connection, params};

use crate::model::{Performance, ScheduleId, ScheduleRecord};

/// Load/save interface for the user's persistent state.
pub trait Repository {
    /// Loads every stored schedule, in store order.
    fn load_schedules(&self) -> Result<Vec<ScheduleRecord>>;

    /// Replaces every stored schedule with `records`.
    fn save_schedules(&mut self, records: &[ScheduleRecord]) -> Result<()>;

    fn load_favourites(&self) -> Result<BTreeSet<String>>;

    fn save_favourites(&mut self, names: &BTreeSet<String>) -> Result<()>;
}

/// Opens a connection to the SQLite database and configures performance settings.
///
/// This function performs the following setup:
/// * **WAL Mode**: Enables Write-Ahead Logging for better concurrency.
/// * **Performance Tuning**: Sets synchronous mode to `NORMAL`.
/// * **Constraints**: Enforces foreign key integrity.
/// * **Schema**: Executes [`create_schema`] to ensure all tables and indices exist.
///
/// # Errors
///
/// Returns an error if:
/// * The database file cannot be opened.
/// * The initial PRAGMA configurations fail.
/// * The schema initialization fails.
pub(crate) fn init_db(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open database {}", path.display()))?;

    let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
    if journal_mode != "wal" {
        anyhow::bail!(
            "Failed to switch to WAL mode. Current mode: {}",
            journal_mode
        );
    }

    conn.execute_batch(
        "
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
    ",
    )?;

    conn.set_prepared_statement_cache_capacity(16);

    create_schema(&conn)?;

    Ok(conn)
}

/// Create the database schema.
///
/// Performances are owned by their schedule and are removed with it via
/// `ON DELETE CASCADE`. The whole schema is created in one transaction.
///
/// # Errors
///
/// Returns an error if the transaction fails, if there are permission issues
/// with the database file, or if the SQL syntax is invalid.
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "BEGIN;

        CREATE TABLE IF NOT EXISTS schedules (
            id TEXT PRIMARY KEY,
            position INTEGER NOT NULL,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS schedule_performances (
            schedule_id TEXT NOT NULL,
            position INTEGER NOT NULL,
            performance_id TEXT NOT NULL,
            artist_name TEXT NOT NULL,
            stage_name TEXT NOT NULL,
            date TEXT NOT NULL,
            start_time TEXT NOT NULL,
            end_time TEXT NOT NULL,
            PRIMARY KEY (schedule_id, performance_id),
            FOREIGN KEY (schedule_id) REFERENCES schedules (id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_schedule_performances_schedule_id
            ON schedule_performances (schedule_id, position);

        CREATE TABLE IF NOT EXISTS favourite_artists (
            name TEXT PRIMARY KEY
        );

        COMMIT;",
    )
    .context("Failed to create schema")
}

/// SQLite-backed [`Repository`].
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Opens (creating if needed) the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialised.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = init_db(path)?;
        log::info!("Opened schedule database {}", path.display());

        Ok(Self { conn })
    }

    fn fetch_schedule_performances(&self, schedule_id: ScheduleId) -> Result<Vec<Performance>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT performance_id, artist_name, stage_name, date, start_time, end_time
             FROM schedule_performances
             WHERE schedule_id = ?
             ORDER BY position",
        )?;

        let results = stmt
            .query_map([schedule_id], Performance::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(results)
    }
}

impl Repository for SqliteRepository {
    fn load_schedules(&self) -> Result<Vec<ScheduleRecord>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, name, created_at FROM schedules ORDER BY position")?;

        let headers = stmt
            .query_map([], ScheduleRecord::header_from_row)?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read schedules")?;

        let mut records = Vec::with_capacity(headers.len());
        for mut record in headers {
            record.performances = self
                .fetch_schedule_performances(record.id)
                .with_context(|| format!("Failed to read performances of schedule {}", record.id))?;
            records.push(record);
        }

        Ok(records)
    }

    fn save_schedules(&mut self, records: &[ScheduleRecord]) -> Result<()> {
        let tx = self.conn.transaction()?;

        tx.execute("DELETE FROM schedules", [])?;

        {
            let mut insert_schedule = tx.prepare_cached(
                "INSERT INTO schedules (id, position, name, created_at) VALUES (?1, ?2, ?3, ?4)",
            )?;
            let mut insert_performance = tx.prepare_cached(
                "INSERT INTO schedule_performances
                    (schedule_id, position, performance_id, artist_name, stage_name,
                     date, start_time, end_time)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;

            for (position, record) in records.iter().enumerate() {
                insert_schedule.execute(params![
                    record.id,
                    position as i64,
                    record.name,
                    record.created_at.to_string(),
                ])?;

                for (position, performance) in record.performances.iter().enumerate() {
                    insert_performance.execute(params![
                        record.id,
                        position as i64,
                        performance.id(),
                        performance.artist_name(),
                        performance.stage_name(),
                        performance.date().to_string(),
                        performance.start_time().to_string(),
                        performance.end_time().to_string(),
                    ])?;
                }
            }
        }

        tx.commit().context("Failed to commit schedules")?;
        log::debug!("Saved {} schedules", records.len());

        Ok(())
    }

    fn load_favourites(&self) -> Result<BTreeSet<String>> {
        let mut stmt = self.conn.prepare_cached("SELECT name FROM favourite_artists")?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<BTreeSet<String>, _>>()?;

        Ok(names)
    }

    fn save_favourites(&mut self, names: &BTreeSet<String>) -> Result<()> {
        let tx = self.conn.transaction()?;

        tx.execute("DELETE FROM favourite_artists", [])?;
        {
            let mut insert = tx.prepare_cached("INSERT INTO favourite_artists (name) VALUES (?)")?;
            for name in names {
                insert.execute([name])?;
            }
        }

        tx.commit().context("Failed to commit favourites")?;

        Ok(())
    }
}

/// [`Repository`] that keeps everything in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    schedules: Vec<ScheduleRecord>,
    favourites: BTreeSet<String>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Repository for MemoryRepository {
    fn load_schedules(&self) -> Result<Vec<ScheduleRecord>> {
        Ok(self.schedules.clone())
    }

    fn save_schedules(&mut self, records: &[ScheduleRecord]) -> Result<()> {
        self.schedules = records.to_vec();
        Ok(())
    }

    fn load_favourites(&self) -> Result<BTreeSet<String>> {
        Ok(self.favourites.clone())
    }

    fn save_favourites(&mut self, names: &BTreeSet<String>) -> Result<()> {
        self.favourites = names.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, civil::date};

    use super::*;

    fn at(value: &str) -> Timestamp {
        value.parse().unwrap()
    }

    fn records() -> Vec<ScheduleRecord> {
        let performance = |id: &str, start: &str, end: &str| {
            Performance::new(
                id,
                format!("Artist {id}"),
                "Dome",
                date(2025, 7, 28),
                at(start),
                at(end),
            )
            .unwrap()
        };

        vec![
            ScheduleRecord {
                id: ScheduleId::new(),
                name: "Night one".to_string(),
                created_at: at("2025-07-01T10:00:00Z"),
                performances: vec![
                    performance("b", "2025-07-28T22:00:00Z", "2025-07-28T23:00:00Z"),
                    performance("a", "2025-07-28T20:00:00Z", "2025-07-28T21:00:00Z"),
                ],
            },
            ScheduleRecord {
                id: ScheduleId::new(),
                name: String::new(),
                created_at: at("2025-07-02T10:00:00Z"),
                performances: Vec::new(),
            },
        ]
    }

    #[test]
    fn sqlite_round_trip_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lineup.db");
        let records = records();

        let mut repository = SqliteRepository::open(&path).unwrap();
        repository.save_schedules(&records).unwrap();
        drop(repository);

        let repository = SqliteRepository::open(&path).unwrap();
        assert_eq!(repository.load_schedules().unwrap(), records);
    }

    #[test]
    fn sqlite_save_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let mut repository = SqliteRepository::open(dir.path().join("lineup.db")).unwrap();
        let records = records();

        repository.save_schedules(&records).unwrap();
        repository.save_schedules(&records[1..]).unwrap();

        assert_eq!(repository.load_schedules().unwrap(), records[1..].to_vec());
    }

    #[test]
    fn sqlite_favourites_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut repository = SqliteRepository::open(dir.path().join("lineup.db")).unwrap();
        let names: BTreeSet<String> = ["Artist X".to_string(), "Artist Y".to_string()].into();

        repository.save_favourites(&names).unwrap();
        assert_eq!(repository.load_favourites().unwrap(), names);

        repository.save_favourites(&BTreeSet::new()).unwrap();
        assert!(repository.load_favourites().unwrap().is_empty());
    }

    #[test]
    fn memory_round_trip() {
        let mut repository = MemoryRepository::new();
        let records = records();

        repository.save_schedules(&records).unwrap();

        assert_eq!(repository.load_schedules().unwrap(), records);
    }
}
