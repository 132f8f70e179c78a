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

//! The custom schedule store.
//!
//! Every mutation addresses a schedule by id. A missing schedule or
//! performance is a no-op rather than an error: stale ids are routine when a
//! front end races itself (a double tap on "remove", say). Mutators report
//! whether they changed anything for callers that care.

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    catalog::Catalog,
    favourites::Favourites,
    model::{CustomSchedule, Performance, PerformanceId, ScheduleId, ScheduleRecord},
};

/// Name given to schedules built from the favourite artists.
pub const FAVOURITES_SCHEDULE_NAME: &str = "My Favorites";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("schedule name must not be empty")]
    EmptyName,
}

/// Whether schedules may have an empty name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NamePolicy {
    #[default]
    AllowEmpty,
    RequireNonEmpty,
}

impl NamePolicy {
    fn check(self, name: &str) -> Result<(), ScheduleError> {
        match self {
            NamePolicy::RequireNonEmpty if name.trim().is_empty() => Err(ScheduleError::EmptyName),
            _ => Ok(()),
        }
    }
}

/// Result of building a schedule from the favourite artists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavouritesOutcome {
    Created(ScheduleId),
    /// No catalog performance is by a favourite artist; nothing was created.
    NothingToCreate,
}

#[derive(Debug, Clone, Default)]
pub struct ScheduleStore {
    schedules: Vec<CustomSchedule>,
    policy: NamePolicy,
}

impl ScheduleStore {
    pub fn new(policy: NamePolicy) -> Self {
        Self {
            schedules: Vec::new(),
            policy,
        }
    }

    /// Rebuilds a store from persisted records, keeping their order.
    pub fn from_records(records: Vec<ScheduleRecord>, policy: NamePolicy) -> Self {
        Self {
            schedules: records.into_iter().map(CustomSchedule::from).collect(),
            policy,
        }
    }

    /// The persisted form of every schedule, in store order.
    pub fn to_records(&self) -> Vec<ScheduleRecord> {
        self.schedules.iter().map(ScheduleRecord::from).collect()
    }

    pub fn policy(&self) -> NamePolicy {
        self.policy
    }

    /// Schedules in creation order.
    pub fn schedules(&self) -> &[CustomSchedule] {
        &self.schedules
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    pub fn get(&self, id: ScheduleId) -> Option<&CustomSchedule> {
        self.schedules.iter().find(|s| s.id() == id)
    }

    fn get_mut(&mut self, id: ScheduleId) -> Option<&mut CustomSchedule> {
        self.schedules.iter_mut().find(|s| s.id() == id)
    }

    /// Creates a schedule and appends it to the store.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::EmptyName`] if the store requires names and
    /// `name` is blank.
    pub fn create(
        &mut self,
        name: &str,
        performances: Vec<Performance>,
        now: Timestamp,
    ) -> Result<&CustomSchedule, ScheduleError> {
        self.policy.check(name)?;

        let schedule = CustomSchedule::new(name, performances, now);
        log::debug!("Created schedule {} ({:?})", schedule.id(), schedule.name());

        self.schedules.push(schedule);
        Ok(&self.schedules[self.schedules.len() - 1])
    }

    /// Removes the schedule with id `id`.
    pub fn delete(&mut self, id: ScheduleId) -> bool {
        let before = self.schedules.len();
        self.schedules.retain(|s| s.id() != id);
        self.schedules.len() != before
    }

    /// Replaces the stored schedule with the same id as `schedule`.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::EmptyName`] if the store requires names and
    /// the schedule's name is blank.
    pub fn update(&mut self, schedule: CustomSchedule) -> Result<bool, ScheduleError> {
        self.policy.check(schedule.name())?;

        Ok(match self.get_mut(schedule.id()) {
            Some(stored) => {
                *stored = schedule;
                true
            }
            None => false,
        })
    }

    /// Renames a schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::EmptyName`] if the store requires names and
    /// `name` is blank.
    pub fn rename(&mut self, id: ScheduleId, name: &str) -> Result<bool, ScheduleError> {
        self.policy.check(name)?;

        Ok(match self.get_mut(id) {
            Some(schedule) => {
                schedule.rename(name);
                true
            }
            None => false,
        })
    }

    /// Adds `performance` to a schedule unless it is already there.
    pub fn add_performance(&mut self, schedule_id: ScheduleId, performance: Performance) -> bool {
        self.get_mut(schedule_id)
            .is_some_and(|schedule| schedule.add(performance))
    }

    /// Removes a performance from a schedule.
    pub fn remove_performance(
        &mut self,
        schedule_id: ScheduleId,
        performance_id: &PerformanceId,
    ) -> bool {
        self.get_mut(schedule_id)
            .is_some_and(|schedule| schedule.remove(performance_id))
    }

    pub fn contains_performance(
        &self,
        schedule_id: ScheduleId,
        performance_id: &PerformanceId,
    ) -> bool {
        self.get(schedule_id)
            .is_some_and(|schedule| schedule.contains(performance_id))
    }

    /// Creates a schedule holding every catalog performance by a favourite
    /// artist.
    pub fn create_from_favourites(
        &mut self,
        favourites: &Favourites,
        catalog: &Catalog,
        now: Timestamp,
    ) -> FavouritesOutcome {
        let performances: Vec<Performance> = favourites
            .filter_favourites(catalog.performances())
            .into_iter()
            .cloned()
            .collect();

        if performances.is_empty() {
            return FavouritesOutcome::NothingToCreate;
        }

        let schedule = CustomSchedule::new(FAVOURITES_SCHEDULE_NAME, performances, now);
        let id = schedule.id();
        log::debug!("Created schedule {id} from {} favourites", favourites.len());

        self.schedules.push(schedule);
        FavouritesOutcome::Created(id)
    }
}
