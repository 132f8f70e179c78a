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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the lineup: the
//! [`Performance`] value type, the derived [`Artist`] and [`Stage`]
//! groupings, and user-curated [`CustomSchedule`]s.

pub mod artist;
pub mod schedule;
pub mod stage;

pub use artist::Artist;
pub use schedule::{CustomSchedule, ScheduleId, ScheduleRecord};
pub use stage::Stage;

use std::{fmt, str::FromStr};

use jiff::{SignedDuration, Timestamp, civil::Date};
use serde::{Deserialize, Serialize};

use crate::{records::RecordError, time};

/// Opaque unique identifier of a performance.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PerformanceId(String);

impl PerformanceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PerformanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PerformanceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PerformanceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl FromStr for PerformanceId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

/// A single set by one artist on one stage.
///
/// Immutable once created. The constructor enforces that a performance ends
/// strictly after it starts, so every `Performance` in the crate upholds it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PerformanceParts")]
pub struct Performance {
    id: PerformanceId,
    artist_name: String,
    stage_name: String,
    date: Date,
    start_time: Timestamp,
    end_time: Timestamp,
}

impl Performance {
    /// Creates a performance listed on `date`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::NonPositiveDuration`] unless `end_time` is
    /// after `start_time`.
    pub fn new(
        id: impl Into<PerformanceId>,
        artist_name: impl Into<String>,
        stage_name: impl Into<String>,
        date: Date,
        start_time: Timestamp,
        end_time: Timestamp,
    ) -> Result<Self, RecordError> {
        if end_time <= start_time {
            return Err(RecordError::NonPositiveDuration {
                start: start_time,
                end: end_time,
            });
        }

        Ok(Self {
            id: id.into(),
            artist_name: artist_name.into(),
            stage_name: stage_name.into(),
            date,
            start_time,
            end_time,
        })
    }

    pub fn id(&self) -> &PerformanceId {
        &self.id
    }

    pub fn artist_name(&self) -> &str {
        &self.artist_name
    }

    pub fn stage_name(&self) -> &str {
        &self.stage_name
    }

    /// The calendar day the performance is listed on.
    pub fn date(&self) -> Date {
        self.date
    }

    pub fn start_time(&self) -> Timestamp {
        self.start_time
    }

    pub fn end_time(&self) -> Timestamp {
        self.end_time
    }

    pub fn duration(&self) -> SignedDuration {
        self.end_time.duration_since(self.start_time)
    }

    pub fn is_playing_at(&self, instant: Timestamp) -> bool {
        time::is_playing_at(self, instant)
    }

    pub fn is_on_day(&self, day: Date) -> bool {
        time::is_on_day(self, day)
    }

    pub fn overlaps(&self, other: &Performance) -> bool {
        time::overlaps(self, other)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PerformanceParts {
    id: PerformanceId,
    artist_name: String,
    stage_name: String,
    date: Date,
    start_time: Timestamp,
    end_time: Timestamp,
}

impl TryFrom<PerformanceParts> for Performance {
    type Error = RecordError;

    fn try_from(parts: PerformanceParts) -> Result<Self, Self::Error> {
        Performance::new(
            parts.id,
            parts.artist_name,
            parts.stage_name,
            parts.date,
            parts.start_time,
            parts.end_time,
        )
    }
}

/// Ordering used wherever performances are listed across days: by listed
/// day, then start time, then stage name.
pub(crate) fn by_day_then_start(a: &Performance, b: &Performance) -> std::cmp::Ordering {
    a.date
        .cmp(&b.date)
        .then(a.start_time.cmp(&b.start_time))
        .then_with(|| a.stage_name.cmp(&b.stage_name))
}

/// Filter criteria for browsing the lineup.
///
/// Empty criteria match everything. The artist criterion is a
/// case-insensitive substring match.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct PerformanceQuery {
    pub day: Option<Date>,
    pub stage: Option<String>,
    pub artist: String,
    pub favourites_only: bool,
}

impl PerformanceQuery {
    pub fn for_day(day: Date) -> Self {
        Self {
            day: Some(day),
            ..Self::default()
        }
    }

    pub fn for_stage(stage: impl Into<String>) -> Self {
        Self {
            stage: Some(stage.into()),
            ..Self::default()
        }
    }

    pub fn for_artist(artist: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn favourites_only(mut self) -> Self {
        self.favourites_only = true;
        self
    }

    /// Whether `performance` satisfies the day, stage and artist criteria.
    ///
    /// The favourites criterion needs a [`crate::favourites::Favourites`]
    /// set and is applied by [`crate::catalog::Catalog::filter`].
    pub fn matches(&self, performance: &Performance) -> bool {
        if let Some(day) = self.day {
            if !performance.is_on_day(day) {
                return false;
            }
        }

        if let Some(stage) = &self.stage {
            if performance.stage_name() != stage {
                return false;
            }
        }

        contains_ignore_case(performance.artist_name(), &self.artist)
    }
}

/// Case-insensitive substring test; an empty needle matches everything.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn at(value: &str) -> Timestamp {
        value.parse().unwrap()
    }

    fn set(start: &str, end: &str) -> Performance {
        Performance::new(
            "p1",
            "Artist X",
            "Dome",
            date(2025, 7, 28),
            at(start),
            at(end),
        )
        .unwrap()
    }

    #[test]
    fn rejects_non_positive_duration() {
        let start = at("2025-07-28T20:00:00Z");

        let zero = Performance::new("p", "a", "s", date(2025, 7, 28), start, start);
        assert!(matches!(zero, Err(RecordError::NonPositiveDuration { .. })));

        let negative = Performance::new(
            "p",
            "a",
            "s",
            date(2025, 7, 28),
            start,
            at("2025-07-28T19:00:00Z"),
        );
        assert!(negative.is_err());
    }

    #[test]
    fn playing_includes_both_ends() {
        let p = set("2025-07-28T20:00:00Z", "2025-07-28T21:00:00Z");

        assert!(p.is_playing_at(at("2025-07-28T20:00:00Z")));
        assert!(p.is_playing_at(at("2025-07-28T20:30:00Z")));
        assert!(p.is_playing_at(at("2025-07-28T21:00:00Z")));
        assert!(!p.is_playing_at(at("2025-07-28T21:00:01Z")));
        assert!(!p.is_playing_at(at("2025-07-28T19:59:59Z")));
    }

    #[test]
    fn duration_in_hours() {
        let p = set("2025-07-28T20:00:00Z", "2025-07-28T21:30:00Z");

        assert_eq!(p.duration().as_secs_f64() / 3600.0, 1.5);
    }

    #[test]
    fn deserializing_enforces_duration() {
        let json = r#"{
            "id": "p1",
            "artistName": "Artist X",
            "stageName": "Dome",
            "date": "2025-07-28",
            "startTime": "2025-07-28T21:00:00Z",
            "endTime": "2025-07-28T20:00:00Z"
        }"#;

        assert!(serde_json::from_str::<Performance>(json).is_err());
    }

    #[test]
    fn query_matches_criteria() {
        let p = set("2025-07-28T20:00:00Z", "2025-07-28T21:00:00Z");

        assert!(PerformanceQuery::default().matches(&p));
        assert!(PerformanceQuery::for_artist("artist x").matches(&p));
        assert!(PerformanceQuery::for_stage("Dome").matches(&p));
        assert!(PerformanceQuery::for_day(date(2025, 7, 28)).matches(&p));

        assert!(!PerformanceQuery::for_artist("zzz").matches(&p));
        assert!(!PerformanceQuery::for_stage("Pumpui").matches(&p));
        assert!(!PerformanceQuery::for_day(date(2025, 7, 29)).matches(&p));
    }
}
