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

//! Raw lineup records and their validation.
//!
//! A [`PerformanceRecord`] is what a timetable source hands over: strings as
//! they appear in storage. Turning a record into a [`Performance`] resolves
//! its day and clock times in the festival zone and can fail per record;
//! failures are collected into a [`LoadReport`] instead of aborting the load.
//!
//! # Clock times
//!
//! `startTime` and `endTime` are either `HH:MM` clock times or RFC 3339
//! instants. Clock times follow the usual running-order conventions:
//!
//! * a start earlier than the calendar's night rollover is on the morning
//!   after the listed date,
//! * an end earlier than its start is on the following day,
//! * an end equal to its start is a zero length set and is rejected.

use std::{collections::HashSet, fs, path::Path};

use anyhow::{Context, Result};
use jiff::{
    Timestamp,
    civil::{Date, Time},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use xxhash_rust::xxh3::xxh3_64;

use crate::{
    model::{Performance, PerformanceId},
    time::FestivalCalendar,
};

/// Reasons a record is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("invalid date {value:?}: {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("invalid time {value:?}: {reason}")]
    InvalidTime { value: String, reason: String },

    #[error("performance must end after it starts ({start} to {end})")]
    NonPositiveDuration { start: Timestamp, end: Timestamp },

    #[error("duplicate performance id {0}")]
    DuplicateId(PerformanceId),
}

/// A performance as stored by a timetable source.
///
/// Field names follow the in-memory model; the short storage keys used by
/// the festival's own timetable files are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(alias = "artista")]
    pub artist_name: String,
    #[serde(alias = "palco")]
    pub stage_name: String,
    #[serde(alias = "dia")]
    pub date: String,
    #[serde(alias = "inicio")]
    pub start_time: String,
    #[serde(alias = "fim")]
    pub end_time: String,
}

enum Moment {
    Instant(Timestamp),
    Clock(Time),
}

impl PerformanceRecord {
    /// Validates the record and resolves it into a [`Performance`].
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] describing the first problem found.
    pub fn resolve(&self, calendar: &FestivalCalendar) -> Result<Performance, RecordError> {
        let artist_name = self.artist_name.trim();
        if artist_name.is_empty() {
            return Err(RecordError::MissingField("artist name"));
        }

        let stage_name = self.stage_name.trim();
        if stage_name.is_empty() {
            return Err(RecordError::MissingField("stage name"));
        }

        let date: Date = self
            .date
            .trim()
            .parse()
            .map_err(|e: jiff::Error| RecordError::InvalidDate {
                value: self.date.clone(),
                reason: e.to_string(),
            })?;

        let start = match parse_moment(&self.start_time)? {
            Moment::Instant(instant) => instant,
            Moment::Clock(clock) => {
                let day = if clock < calendar.night_rollover() {
                    next_day(date, &self.start_time)?
                } else {
                    date
                };
                resolve_clock(calendar, day, clock, &self.start_time)?
            }
        };

        let end = match parse_moment(&self.end_time)? {
            Moment::Instant(instant) => instant,
            Moment::Clock(clock) => {
                let start_civil = calendar.to_civil(start);
                if clock == start_civil.time() {
                    return Err(RecordError::NonPositiveDuration { start, end: start });
                }

                let day = start_civil.date();
                let end = resolve_clock(calendar, day, clock, &self.end_time)?;
                if end < start {
                    let day = next_day(day, &self.end_time)?;
                    resolve_clock(calendar, day, clock, &self.end_time)?
                } else {
                    end
                }
            }
        };

        let id = match self.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => PerformanceId::new(id),
            _ => derive_id(artist_name, stage_name, start),
        };

        Performance::new(id, artist_name, stage_name, date, start, end)
    }
}

fn parse_moment(value: &str) -> Result<Moment, RecordError> {
    let value = value.trim();
    let invalid = |reason: String| RecordError::InvalidTime {
        value: value.to_string(),
        reason,
    };

    if let Ok(instant) = value.parse::<Timestamp>() {
        return Ok(Moment::Instant(instant));
    }

    Time::strptime("%H:%M", value)
        .map(Moment::Clock)
        .map_err(|e| invalid(e.to_string()))
}

fn resolve_clock(
    calendar: &FestivalCalendar,
    day: Date,
    clock: Time,
    raw: &str,
) -> Result<Timestamp, RecordError> {
    calendar
        .resolve(day, clock)
        .map_err(|e| RecordError::InvalidTime {
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

fn next_day(day: Date, raw: &str) -> Result<Date, RecordError> {
    day.tomorrow().map_err(|e| RecordError::InvalidTime {
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Derives a stable id for a record that did not carry one, so that
/// reloading the same timetable yields the same ids.
fn derive_id(artist_name: &str, stage_name: &str, start: Timestamp) -> PerformanceId {
    let key = format!("{artist_name}\u{1f}{stage_name}\u{1f}{start}");
    PerformanceId::new(format!("{:016x}", xxh3_64(key.as_bytes())))
}

/// A record that did not make it into the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Position of the record in the loaded batch.
    pub index: usize,
    pub id: Option<String>,
    pub artist_name: String,
    pub reason: RecordError,
}

/// Outcome of loading a batch of records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub rejected: Vec<RejectedRecord>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Resolves a batch of records, keeping the first performance for any
/// repeated id.
pub(crate) fn resolve_all(
    records: &[PerformanceRecord],
    calendar: &FestivalCalendar,
) -> (Vec<Performance>, Vec<RejectedRecord>) {
    let mut performances = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();
    let mut seen: HashSet<PerformanceId> = HashSet::new();

    for (index, record) in records.iter().enumerate() {
        let result = record.resolve(calendar).and_then(|performance| {
            if seen.insert(performance.id().clone()) {
                Ok(performance)
            } else {
                Err(RecordError::DuplicateId(performance.id().clone()))
            }
        });

        match result {
            Ok(performance) => performances.push(performance),
            Err(reason) => rejected.push(RejectedRecord {
                index,
                id: record.id.clone(),
                artist_name: record.artist_name.clone(),
                reason,
            }),
        }
    }

    (performances, rejected)
}

/// Parses a JSON array of performance records.
pub fn parse_timetable(json: &str) -> serde_json::Result<Vec<PerformanceRecord>> {
    serde_json::from_str(json)
}

/// Reads and parses a JSON timetable file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array of
/// records. Individual records are not validated here.
pub fn load_timetable(path: impl AsRef<Path>) -> Result<Vec<PerformanceRecord>> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read timetable {}", path.display()))?;

    parse_timetable(&json).with_context(|| format!("Failed to parse timetable {}", path.display()))
}
