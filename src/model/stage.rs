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

//! Stages derived from the lineup.

use jiff::{Timestamp, civil::Date};

use crate::model::{Performance, by_day_then_start};

/// A stage and every performance scheduled on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    name: String,
    performances: Vec<Performance>,
}

impl Stage {
    pub(crate) fn new(name: String, performances: Vec<Performance>) -> Self {
        Self { name, performances }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn performances(&self) -> &[Performance] {
        &self.performances
    }

    /// Performances ordered by listed day, then start time.
    pub fn sorted_performances(&self) -> Vec<&Performance> {
        let mut sorted: Vec<&Performance> = self.performances.iter().collect();
        sorted.sort_by(|a, b| by_day_then_start(a, b));
        sorted
    }

    /// Performances listed on `day`, ordered by start time.
    pub fn performances_on_day(&self, day: Date) -> Vec<&Performance> {
        let mut on_day: Vec<&Performance> = self
            .performances
            .iter()
            .filter(|p| p.is_on_day(day))
            .collect();
        on_day.sort_by_key(|p| p.start_time());
        on_day
    }

    /// The set in progress at `at`, otherwise the next one to start.
    ///
    /// Returns `None` once the stage has nothing left to play.
    pub fn current_or_next(&self, at: Timestamp) -> Option<&Performance> {
        self.performances
            .iter()
            .find(|p| p.is_playing_at(at))
            .or_else(|| {
                self.performances
                    .iter()
                    .filter(|p| p.start_time() > at)
                    .min_by_key(|p| p.start_time())
            })
    }
}
