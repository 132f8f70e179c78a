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

//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use jiff::{Timestamp, civil::date};
use lineup::{FestivalCalendar, PerformanceRecord};

pub const STAGES: [&str; 4] = ["Dome Stage", "Dragons Nest", "Ozora", "Pumpui"];

pub fn calendar() -> FestivalCalendar {
    FestivalCalendar::from_civil(
        "Europe/Budapest",
        date(2025, 7, 28).at(0, 0, 0, 0),
        date(2025, 8, 3).at(23, 59, 0, 0),
    )
    .unwrap()
}

pub fn at(value: &str) -> Timestamp {
    value.parse().unwrap()
}

pub fn record(
    id: &str,
    artist: &str,
    stage: &str,
    day: &str,
    start: &str,
    end: &str,
) -> PerformanceRecord {
    PerformanceRecord {
        id: Some(id.to_string()),
        artist_name: artist.to_string(),
        stage_name: stage.to_string(),
        date: day.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
    }
}

/// A procedural lineup covering the whole festival: every day, every stage
/// runs eight two hour sets from noon until 04:00 the next morning.
///
/// Records carry no ids, so the loader derives them.
pub fn sample_lineup(calendar: &FestivalCalendar) -> Vec<PerformanceRecord> {
    let mut records = Vec::new();

    for day in calendar.festival_days() {
        for stage in STAGES {
            for hour in (12..28).step_by(2) {
                let start = hour % 24;
                let end = (hour + 2) % 24;

                records.push(PerformanceRecord {
                    id: None,
                    artist_name: format!("Artist {start} - {stage}"),
                    stage_name: stage.to_string(),
                    date: day.to_string(),
                    start_time: format!("{start:02}:00"),
                    end_time: format!("{end:02}:00"),
                });
            }
        }
    }

    records
}
