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

//! User-curated schedules.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    str::FromStr,
};

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    conflicts::{self, Conflicts},
    model::{Performance, PerformanceId},
};

/// Unique identifier of a [`CustomSchedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleId(Uuid);

impl ScheduleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ScheduleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ScheduleId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A named selection of performances.
///
/// The performance list is a working set: order is insertion order, and no
/// two entries share a [`PerformanceId`]. Performances are held by value,
/// so a schedule stays valid after the catalog is reloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomSchedule {
    id: ScheduleId,
    name: String,
    performances: Vec<Performance>,
    created_at: Timestamp,
}

impl CustomSchedule {
    /// Creates a schedule with a fresh id. Later duplicates of a
    /// performance id are dropped.
    pub fn new(
        name: impl Into<String>,
        performances: impl IntoIterator<Item = Performance>,
        created_at: Timestamp,
    ) -> Self {
        Self::with_id(ScheduleId::new(), name.into(), performances, created_at)
    }

    fn with_id(
        id: ScheduleId,
        name: String,
        performances: impl IntoIterator<Item = Performance>,
        created_at: Timestamp,
    ) -> Self {
        let mut schedule = Self {
            id,
            name,
            performances: Vec::new(),
            created_at,
        };
        for performance in performances {
            schedule.add(performance);
        }
        schedule
    }

    pub fn id(&self) -> ScheduleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn performances(&self) -> &[Performance] {
        &self.performances
    }

    pub fn len(&self) -> usize {
        self.performances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.performances.is_empty()
    }

    pub fn contains(&self, id: &PerformanceId) -> bool {
        self.performances.iter().any(|p| p.id() == id)
    }

    /// Appends `performance` unless one with the same id is already present.
    ///
    /// Returns `true` if the schedule changed.
    pub fn add(&mut self, performance: Performance) -> bool {
        if self.contains(performance.id()) {
            return false;
        }
        self.performances.push(performance);
        true
    }

    /// Removes every performance with id `id`.
    ///
    /// Returns `true` if the schedule changed.
    pub fn remove(&mut self, id: &PerformanceId) -> bool {
        let before = self.performances.len();
        self.performances.retain(|p| p.id() != id);
        self.performances.len() != before
    }

    /// Performances bucketed by listed day, each day ordered by start time.
    pub fn performances_by_day(&self) -> BTreeMap<Date, Vec<&Performance>> {
        let mut days: BTreeMap<Date, Vec<&Performance>> = BTreeMap::new();
        for performance in &self.performances {
            days.entry(performance.date()).or_default().push(performance);
        }
        for performances in days.values_mut() {
            performances.sort_by_key(|p| p.start_time());
        }
        days
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

    pub fn has_performances_on_day(&self, day: Date) -> bool {
        self.performances.iter().any(|p| p.is_on_day(day))
    }

    pub fn total_artists(&self) -> usize {
        self.performances
            .iter()
            .map(|p| p.artist_name())
            .collect::<BTreeSet<_>>()
            .len()
    }

    pub fn total_days(&self) -> usize {
        self.performances
            .iter()
            .map(|p| p.date())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Sum of every performance's length in hours.
    ///
    /// Overlapping sets are counted in full; this is a raw duration sum, not
    /// wall-clock time spent at the festival.
    pub fn total_hours(&self) -> f64 {
        self.performances
            .iter()
            .map(|p| p.duration().as_secs_f64() / 3600.0)
            .sum()
    }

    pub fn find_conflicts(&self) -> Conflicts {
        conflicts::find_conflicts(&self.performances)
    }
}

/// Persisted form of a [`CustomSchedule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    pub id: ScheduleId,
    pub name: String,
    pub created_at: Timestamp,
    pub performances: Vec<Performance>,
}

impl From<&CustomSchedule> for ScheduleRecord {
    fn from(schedule: &CustomSchedule) -> Self {
        Self {
            id: schedule.id,
            name: schedule.name.clone(),
            created_at: schedule.created_at,
            performances: schedule.performances.clone(),
        }
    }
}

impl From<ScheduleRecord> for CustomSchedule {
    fn from(record: ScheduleRecord) -> Self {
        CustomSchedule::with_id(record.id, record.name, record.performances, record.created_at)
    }
}
