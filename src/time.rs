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

//! Festival time keeping.
//!
//! Every conversion between an absolute instant and a calendar day goes
//! through a [`FestivalCalendar`], which pins the festival's time zone. Day
//! bucketing that depended on the machine's local zone would put late night
//! sets on the wrong day for anyone not sitting in the festival's zone.
//!
//! The free functions at the bottom of this module are the interval
//! predicates shared by the catalog, the schedule store and the conflict
//! detector.

use jiff::{
    Timestamp,
    civil::{self, Date, DateTime, Time},
    tz::TimeZone,
};
use thiserror::Error;

use crate::model::Performance;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Clock time before which a listed start time is taken to belong to the
/// night following the listed date.
pub const DEFAULT_NIGHT_ROLLOVER: Time = civil::time(6, 0, 0, 0);

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("unknown time zone {name:?}: {reason}")]
    UnknownTimeZone { name: String, reason: String },

    #[error("{value} does not exist in the festival time zone: {reason}")]
    InvalidInstant { value: DateTime, reason: String },

    #[error("festival ends ({end}) before it starts ({start})")]
    InvertedWindow { start: Timestamp, end: Timestamp },
}

/// Time remaining until the festival starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

/// The festival's canonical time zone and opening window.
#[derive(Debug, Clone)]
pub struct FestivalCalendar {
    time_zone: TimeZone,
    start: Timestamp,
    end: Timestamp,
    night_rollover: Time,
}

impl FestivalCalendar {
    /// Creates a calendar for a festival running from `start` to `end`
    /// inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvertedWindow`] if `end` is before `start`.
    pub fn new(
        time_zone: TimeZone,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Self, CalendarError> {
        if end < start {
            return Err(CalendarError::InvertedWindow { start, end });
        }

        Ok(Self {
            time_zone,
            start,
            end,
            night_rollover: DEFAULT_NIGHT_ROLLOVER,
        })
    }

    /// Creates a calendar from an IANA zone name and civil opening and
    /// closing times in that zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the zone is unknown, if either civil time falls
    /// in a gap of the zone, or if the window is inverted.
    pub fn from_civil(
        time_zone: &str,
        start: DateTime,
        end: DateTime,
    ) -> Result<Self, CalendarError> {
        let tz = TimeZone::get(time_zone).map_err(|e| CalendarError::UnknownTimeZone {
            name: time_zone.to_string(),
            reason: e.to_string(),
        })?;

        let start = resolve_in(&tz, start)?;
        let end = resolve_in(&tz, end)?;

        Self::new(tz, start, end)
    }

    #[must_use]
    pub fn with_night_rollover(mut self, night_rollover: Time) -> Self {
        self.night_rollover = night_rollover;
        self
    }

    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    pub fn night_rollover(&self) -> Time {
        self.night_rollover
    }

    /// Truncates an instant to its calendar day in the festival time zone.
    pub fn normalize_to_day(&self, instant: Timestamp) -> Date {
        instant.to_zoned(self.time_zone.clone()).date()
    }

    /// Returns the civil date and time of an instant in the festival zone.
    pub fn to_civil(&self, instant: Timestamp) -> DateTime {
        instant.to_zoned(self.time_zone.clone()).datetime()
    }

    /// Resolves a civil date and clock time in the festival zone.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidInstant`] when the civil time cannot
    /// be represented in the zone.
    pub fn resolve(&self, date: Date, time: Time) -> Result<Timestamp, CalendarError> {
        resolve_in(&self.time_zone, date.to_datetime(time))
    }

    /// Whether `now` lies within the festival window, both ends inclusive.
    pub fn is_festival_active(&self, now: Timestamp) -> bool {
        self.start <= now && now <= self.end
    }

    /// Every calendar day touched by the festival window, in order.
    pub fn festival_days(&self) -> Vec<Date> {
        let last = self.normalize_to_day(self.end);

        let mut days = Vec::new();
        let mut day = self.normalize_to_day(self.start);
        while day <= last {
            days.push(day);
            match day.tomorrow() {
                Ok(next) => day = next,
                Err(_) => break,
            }
        }

        days
    }

    /// Time left until the festival opens, or `None` once it has started.
    pub fn time_until_start(&self, now: Timestamp) -> Option<Countdown> {
        if now >= self.start {
            return None;
        }

        let remaining = self.start.duration_since(now).as_secs();

        Some(Countdown {
            days: remaining / SECONDS_PER_DAY,
            hours: (remaining % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
            minutes: (remaining % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
        })
    }

    /// The 1-based festival day `now` falls on, or `None` before the first
    /// day.
    pub fn festival_day(&self, now: Timestamp) -> Option<u32> {
        let first = self.normalize_to_day(self.start);
        let today = self.normalize_to_day(now);
        if today < first {
            return None;
        }

        let elapsed = today.since(first).ok()?.get_days();
        u32::try_from(elapsed).ok().map(|days| days + 1)
    }
}

fn resolve_in(tz: &TimeZone, value: DateTime) -> Result<Timestamp, CalendarError> {
    value
        .to_zoned(tz.clone())
        .map(|zoned| zoned.timestamp())
        .map_err(|e| CalendarError::InvalidInstant {
            value,
            reason: e.to_string(),
        })
}

/// Whether `performance` is on stage at `instant`.
///
/// Both ends are inclusive: a set is still "playing" at its exact end time.
pub fn is_playing_at(performance: &Performance, instant: Timestamp) -> bool {
    performance.start_time() <= instant && instant <= performance.end_time()
}

/// Whether `performance` is listed on calendar day `day`.
pub fn is_on_day(performance: &Performance, day: Date) -> bool {
    performance.date() == day
}

/// Whether two performances overlap as half-open intervals.
///
/// A set that starts at the exact minute another one ends does not overlap
/// it.
pub fn overlaps(a: &Performance, b: &Performance) -> bool {
    a.start_time() < b.end_time() && a.end_time() > b.start_time()
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn calendar() -> FestivalCalendar {
        FestivalCalendar::from_civil(
            "Europe/Budapest",
            date(2025, 7, 28).at(0, 0, 0, 0),
            date(2025, 8, 3).at(23, 59, 0, 0),
        )
        .unwrap()
    }

    fn at(value: &str) -> Timestamp {
        value.parse().unwrap()
    }

    #[test]
    fn normalizes_in_festival_zone_not_utc() {
        let calendar = calendar();

        // 23:30 UTC on the 28th is already 01:30 on the 29th in Budapest.
        let instant = at("2025-07-28T23:30:00Z");

        assert_eq!(calendar.normalize_to_day(instant), date(2025, 7, 29));
    }

    #[test]
    fn window_is_inclusive() {
        let calendar = calendar();

        assert!(calendar.is_festival_active(calendar.start()));
        assert!(calendar.is_festival_active(calendar.end()));
        assert!(!calendar.is_festival_active(at("2025-07-27T21:59:59Z")));
        assert!(!calendar.is_festival_active(at("2025-08-03T22:00:00Z")));
    }

    #[test]
    fn inverted_window_is_rejected() {
        let result = FestivalCalendar::new(
            TimeZone::UTC,
            at("2025-08-03T00:00:00Z"),
            at("2025-07-28T00:00:00Z"),
        );

        assert!(matches!(result, Err(CalendarError::InvertedWindow { .. })));
    }

    #[test]
    fn unknown_zone_is_rejected() {
        let result = FestivalCalendar::from_civil(
            "Nowhere/Atlantis",
            date(2025, 7, 28).at(0, 0, 0, 0),
            date(2025, 8, 3).at(0, 0, 0, 0),
        );

        assert!(matches!(result, Err(CalendarError::UnknownTimeZone { .. })));
    }

    #[test]
    fn festival_days_cover_the_window() {
        let days = calendar().festival_days();

        assert_eq!(days.len(), 7);
        assert_eq!(days.first(), Some(&date(2025, 7, 28)));
        assert_eq!(days.last(), Some(&date(2025, 8, 3)));
    }

    #[test]
    fn countdown_before_start() {
        let calendar = calendar();

        // Start is 2025-07-27T22:00:00Z.
        let countdown = calendar.time_until_start(at("2025-07-25T19:55:00Z"));

        assert_eq!(
            countdown,
            Some(Countdown {
                days: 2,
                hours: 2,
                minutes: 5
            })
        );
        assert_eq!(calendar.time_until_start(calendar.start()), None);
    }

    #[test]
    fn festival_day_numbers() {
        let calendar = calendar();

        assert_eq!(calendar.festival_day(at("2025-07-27T12:00:00Z")), None);
        assert_eq!(calendar.festival_day(at("2025-07-28T10:00:00Z")), Some(1));
        assert_eq!(calendar.festival_day(at("2025-07-29T23:00:00Z")), Some(3));
    }
}
