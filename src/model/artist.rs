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

//! Artists derived from the lineup.

use std::collections::BTreeSet;

use jiff::{Timestamp, civil::Date};

use crate::model::Performance;

/// An artist and every performance billed under their name.
///
/// Artists are never stored on their own; the catalog derives them by
/// grouping performances on `artist_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    name: String,
    performances: Vec<Performance>,
}

impl Artist {
    pub(crate) fn new(name: String, performances: Vec<Performance>) -> Self {
        Self { name, performances }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn performances(&self) -> &[Performance] {
        &self.performances
    }

    /// Distinct stage names the artist plays on, sorted.
    pub fn stages(&self) -> Vec<&str> {
        self.performances
            .iter()
            .map(|p| p.stage_name())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct days the artist plays on, sorted.
    pub fn dates(&self) -> Vec<Date> {
        self.performances
            .iter()
            .map(|p| p.date())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn is_currently_playing(&self, at: Timestamp) -> bool {
        self.performances.iter().any(|p| p.is_playing_at(at))
    }

    pub fn current_performance(&self, at: Timestamp) -> Option<&Performance> {
        self.performances.iter().find(|p| p.is_playing_at(at))
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn at(value: &str) -> Timestamp {
        value.parse().unwrap()
    }

    fn artist() -> Artist {
        let performances = vec![
            Performance::new(
                "a",
                "Artist X",
                "Pumpui",
                date(2025, 7, 30),
                at("2025-07-30T20:00:00Z"),
                at("2025-07-30T21:00:00Z"),
            )
            .unwrap(),
            Performance::new(
                "b",
                "Artist X",
                "Dome",
                date(2025, 7, 28),
                at("2025-07-28T20:00:00Z"),
                at("2025-07-28T21:00:00Z"),
            )
            .unwrap(),
            Performance::new(
                "c",
                "Artist X",
                "Dome",
                date(2025, 7, 30),
                at("2025-07-30T23:00:00Z"),
                at("2025-07-31T00:00:00Z"),
            )
            .unwrap(),
        ];

        Artist::new("Artist X".to_string(), performances)
    }

    #[test]
    fn stages_and_dates_are_distinct_and_sorted() {
        let artist = artist();

        assert_eq!(artist.stages(), vec!["Dome", "Pumpui"]);
        assert_eq!(artist.dates(), vec![date(2025, 7, 28), date(2025, 7, 30)]);
    }

    #[test]
    fn currently_playing() {
        let artist = artist();

        assert!(artist.is_currently_playing(at("2025-07-28T20:30:00Z")));
        assert!(!artist.is_currently_playing(at("2025-07-29T20:30:00Z")));
        assert_eq!(
            artist
                .current_performance(at("2025-07-30T23:30:00Z"))
                .map(|p| p.id().as_str()),
            Some("c")
        );
    }
}
