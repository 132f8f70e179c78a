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

//! Database row mapping for domain models.
//!
//! This module provides the conversion logic between raw SQLite result rows
//! and domain models. Instants and days are stored as their canonical text
//! forms and parsed back on read.

use std::str::FromStr;

use jiff::{Timestamp, civil::Date};
use rusqlite::{
    Result, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, Type, ValueRef},
};

use crate::model::{Performance, PerformanceId, ScheduleId, ScheduleRecord};

impl Performance {
    /// Maps an SQLite row to a [`Performance`] instance.
    ///
    /// Expects the columns `performance_id, artist_name, stage_name, date,
    /// start_time, end_time` in that order.
    ///
    /// # Errors
    ///
    /// Returns a [`rusqlite::Error`] if a column is missing, cannot be
    /// parsed, or the stored times do not form a valid performance.
    pub(crate) fn from_row(row: &Row) -> Result<Self> {
        let date: Date = parse_column(row, 3)?;
        let start_time: Timestamp = parse_column(row, 4)?;
        let end_time: Timestamp = parse_column(row, 5)?;

        Performance::new(
            row.get::<_, PerformanceId>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            date,
            start_time,
            end_time,
        )
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))
    }
}

impl ScheduleRecord {
    /// Maps a `schedules` row (`id, name, created_at`) to a record with no
    /// performances yet.
    pub(crate) fn header_from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            created_at: parse_column(row, 2)?,
            performances: Vec::new(),
        })
    }
}

fn parse_column<T>(row: &Row, idx: usize) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let text: String = row.get(idx)?;
    text.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

impl ToSql for PerformanceId {
    fn to_sql(&self) -> Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for PerformanceId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str().map(PerformanceId::from)
    }
}

impl ToSql for ScheduleId {
    fn to_sql(&self) -> Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl FromSql for ScheduleId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}
