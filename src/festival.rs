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

//! The festival planner.
//!
//! [`Festival`] ties the lineup, the favourite artists and the user's
//! schedules together and writes user state through a [`Repository`] after
//! every change that touched it. It does no locking of its own: callers
//! serialize access, for example by handing it to the task worker in
//! [`crate::tasks`].

use anyhow::{Context, Result};
use jiff::Timestamp;

use crate::{
    catalog::Catalog,
    config::FestivalConfig,
    conflicts::Conflicts,
    db::{Repository, SqliteRepository},
    favourites::Favourites,
    model::{CustomSchedule, Performance, PerformanceId, ScheduleId},
    records::{LoadReport, PerformanceRecord},
    schedules::{FavouritesOutcome, NamePolicy, ScheduleStore},
    time::FestivalCalendar,
};

pub struct Festival {
    catalog: Catalog,
    favourites: Favourites,
    schedules: ScheduleStore,
    repository: Option<Box<dyn Repository + Send>>,
}

impl Festival {
    /// Creates a planner with an empty lineup and no persistence.
    pub fn new(calendar: FestivalCalendar, policy: NamePolicy) -> Self {
        Self {
            catalog: Catalog::new(calendar),
            favourites: Favourites::new(),
            schedules: ScheduleStore::new(policy),
            repository: None,
        }
    }

    /// Creates a planner from configuration, backed by the configured SQLite
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the calendar is invalid or the database cannot be
    /// opened or read.
    pub fn open(config: &FestivalConfig) -> Result<Self> {
        let calendar = config.calendar().context("Invalid festival calendar")?;
        let repository = SqliteRepository::open(&config.database_file)?;

        Self::new(calendar, config.name_policy()).with_repository(Box::new(repository))
    }

    /// Attaches a repository, replacing the current schedules and favourites
    /// with the ones it holds.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    pub fn with_repository(mut self, repository: Box<dyn Repository + Send>) -> Result<Self> {
        let records = repository
            .load_schedules()
            .context("Failed to load schedules")?;
        let favourites = repository
            .load_favourites()
            .context("Failed to load favourites")?;

        log::info!(
            "Restored {} schedules and {} favourite artists",
            records.len(),
            favourites.len()
        );

        self.schedules = ScheduleStore::from_records(records, self.schedules.policy());
        self.favourites = favourites.into_iter().collect();
        self.repository = Some(repository);

        Ok(self)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn favourites(&self) -> &Favourites {
        &self.favourites
    }

    pub fn schedules(&self) -> &ScheduleStore {
        &self.schedules
    }

    pub fn calendar(&self) -> &FestivalCalendar {
        self.catalog.calendar()
    }

    /// Replaces the lineup. Schedules keep their own copies of performances
    /// and are not touched.
    pub fn load_lineup(&mut self, records: &[PerformanceRecord]) -> LoadReport {
        self.catalog.load(records)
    }

    /// Flips an artist's favourite status, returning the new status.
    ///
    /// # Errors
    ///
    /// Returns an error if the favourites cannot be saved, in which case the
    /// status is left as it was.
    pub fn toggle_favourite(&mut self, artist_name: &str) -> Result<bool> {
        let mut favourites = self.favourites.clone();
        let favourite = favourites.toggle(artist_name);

        self.commit_favourites(favourites)?;
        Ok(favourite)
    }

    /// Creates a schedule holding `performances`.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is rejected by the store's name policy or
    /// the schedules cannot be saved. Either way no schedule is added.
    pub fn create_schedule(
        &mut self,
        name: &str,
        performances: Vec<Performance>,
        now: Timestamp,
    ) -> Result<ScheduleId> {
        let mut schedules = self.schedules.clone();
        let id = schedules.create(name, performances, now)?.id();

        self.commit_schedules(schedules)?;
        Ok(id)
    }

    /// Creates a schedule from a selection of catalog performance ids.
    /// Ids not in the catalog are ignored.
    ///
    /// # Errors
    ///
    /// As for [`Festival::create_schedule`].
    pub fn create_schedule_from_selection(
        &mut self,
        name: &str,
        selection: &[PerformanceId],
        now: Timestamp,
    ) -> Result<ScheduleId> {
        let performances = selection
            .iter()
            .filter_map(|id| self.catalog.performance(id))
            .cloned()
            .collect();

        self.create_schedule(name, performances, now)
    }

    /// Builds a schedule from every performance by a favourite artist.
    ///
    /// # Errors
    ///
    /// Returns an error if a created schedule cannot be saved.
    pub fn create_from_favourites(&mut self, now: Timestamp) -> Result<FavouritesOutcome> {
        let mut schedules = self.schedules.clone();
        let outcome = schedules.create_from_favourites(&self.favourites, &self.catalog, now);

        if let FavouritesOutcome::Created(_) = outcome {
            self.commit_schedules(schedules)?;
        }

        Ok(outcome)
    }

    pub fn delete_schedule(&mut self, id: ScheduleId) -> Result<bool> {
        let mut schedules = self.schedules.clone();
        let changed = schedules.delete(id);
        self.commit_schedules_if(schedules, changed)
    }

    /// Replaces a stored schedule with an edited copy.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is rejected by the store's name policy or
    /// the schedules cannot be saved.
    pub fn update_schedule(&mut self, schedule: CustomSchedule) -> Result<bool> {
        let mut schedules = self.schedules.clone();
        let changed = schedules.update(schedule)?;
        self.commit_schedules_if(schedules, changed)
    }

    pub fn rename_schedule(&mut self, id: ScheduleId, name: &str) -> Result<bool> {
        let mut schedules = self.schedules.clone();
        let changed = schedules.rename(id, name)?;
        self.commit_schedules_if(schedules, changed)
    }

    /// Adds the catalog performance `performance_id` to a schedule.
    ///
    /// Unknown schedule or performance ids are a no-op.
    pub fn add_performance(
        &mut self,
        schedule_id: ScheduleId,
        performance_id: &PerformanceId,
    ) -> Result<bool> {
        let Some(performance) = self.catalog.performance(performance_id).cloned() else {
            return Ok(false);
        };

        let mut schedules = self.schedules.clone();
        let changed = schedules.add_performance(schedule_id, performance);
        self.commit_schedules_if(schedules, changed)
    }

    pub fn remove_performance(
        &mut self,
        schedule_id: ScheduleId,
        performance_id: &PerformanceId,
    ) -> Result<bool> {
        let mut schedules = self.schedules.clone();
        let changed = schedules.remove_performance(schedule_id, performance_id);
        self.commit_schedules_if(schedules, changed)
    }

    /// Conflicts within a schedule, or `None` if there is no such schedule.
    pub fn conflicts(&self, schedule_id: ScheduleId) -> Option<Conflicts> {
        self.schedules
            .get(schedule_id)
            .map(|schedule| schedule.find_conflicts())
    }

    fn commit_schedules_if(&mut self, schedules: ScheduleStore, changed: bool) -> Result<bool> {
        if changed {
            self.commit_schedules(schedules)?;
        }
        Ok(changed)
    }

    /// Saves `schedules` and only then makes them current.
    fn commit_schedules(&mut self, schedules: ScheduleStore) -> Result<()> {
        if let Some(repository) = self.repository.as_mut() {
            repository
                .save_schedules(&schedules.to_records())
                .context("Failed to save schedules")?;
        }

        self.schedules = schedules;
        Ok(())
    }

    fn commit_favourites(&mut self, favourites: Favourites) -> Result<()> {
        if let Some(repository) = self.repository.as_mut() {
            repository
                .save_favourites(favourites.names())
                .context("Failed to save favourites")?;
        }

        self.favourites = favourites;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use anyhow::bail;
    use jiff::civil::date;

    use super::*;
    use crate::model::ScheduleRecord;

    /// Serves `schedules` but fails every save.
    struct FailingRepository {
        schedules: Vec<ScheduleRecord>,
    }

    impl Repository for FailingRepository {
        fn load_schedules(&self) -> Result<Vec<ScheduleRecord>> {
            Ok(self.schedules.clone())
        }

        fn save_schedules(&mut self, _records: &[ScheduleRecord]) -> Result<()> {
            bail!("disk full")
        }

        fn load_favourites(&self) -> Result<BTreeSet<String>> {
            Ok(BTreeSet::new())
        }

        fn save_favourites(&mut self, _names: &BTreeSet<String>) -> Result<()> {
            bail!("disk full")
        }
    }

    fn calendar() -> FestivalCalendar {
        FestivalCalendar::from_civil(
            "Europe/Budapest",
            date(2025, 7, 28).at(0, 0, 0, 0),
            date(2025, 8, 3).at(23, 59, 0, 0),
        )
        .unwrap()
    }

    fn record(id: &str, artist: &str, start: &str, end: &str) -> PerformanceRecord {
        PerformanceRecord {
            id: Some(id.to_string()),
            artist_name: artist.to_string(),
            stage_name: "Dome".to_string(),
            date: "2025-07-28".to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
        }
    }

    fn now() -> Timestamp {
        "2025-07-20T12:00:00Z".parse().unwrap()
    }

    fn festival() -> Festival {
        let mut festival = Festival::new(calendar(), NamePolicy::AllowEmpty);
        festival.load_lineup(&[
            record("1", "Artist X", "22:00", "23:00"),
            record("2", "Artist Y", "22:30", "23:30"),
        ]);
        festival
    }

    #[test]
    fn selection_skips_unknown_ids() {
        let mut festival = festival();

        let id = festival
            .create_schedule_from_selection(
                "Pick",
                &[PerformanceId::from("1"), PerformanceId::from("nope")],
                now(),
            )
            .unwrap();

        assert_eq!(festival.schedules().get(id).unwrap().len(), 1);
    }

    #[test]
    fn add_unknown_performance_is_a_no_op() {
        let mut festival = festival();
        let id = festival.create_schedule("Empty", Vec::new(), now()).unwrap();

        assert!(!festival.add_performance(id, &PerformanceId::from("nope")).unwrap());
        assert!(festival.add_performance(id, &PerformanceId::from("1")).unwrap());
        assert!(!festival.add_performance(id, &PerformanceId::from("1")).unwrap());
    }

    #[test]
    fn conflicts_by_schedule_id() {
        let mut festival = festival();
        let id = festival
            .create_schedule_from_selection(
                "Both",
                &[PerformanceId::from("1"), PerformanceId::from("2")],
                now(),
            )
            .unwrap();

        let conflicts = festival.conflicts(id).unwrap();

        assert_eq!(conflicts.len(), 2);
        assert!(festival.conflicts(ScheduleId::new()).is_none());
    }

    #[test]
    fn schedules_survive_lineup_reload() {
        let mut festival = festival();
        let id = festival
            .create_schedule_from_selection("Kept", &[PerformanceId::from("1")], now())
            .unwrap();

        festival.load_lineup(&[record("9", "Other", "20:00", "21:00")]);

        assert_eq!(festival.schedules().get(id).unwrap().len(), 1);
    }

    #[test]
    fn failed_saves_leave_state_unchanged() {
        let existing = CustomSchedule::new("Saved", Vec::new(), now());
        let id = existing.id();
        let repository = FailingRepository {
            schedules: vec![ScheduleRecord::from(&existing)],
        };
        let mut festival = festival().with_repository(Box::new(repository)).unwrap();

        assert!(festival.toggle_favourite("Artist X").is_err());
        assert!(!festival.favourites().is_favourite("Artist X"));

        assert!(festival.create_schedule("New", Vec::new(), now()).is_err());
        assert_eq!(festival.schedules().len(), 1);

        assert!(festival.rename_schedule(id, "Renamed").is_err());
        assert!(festival.add_performance(id, &PerformanceId::from("1")).is_err());
        assert!(festival.delete_schedule(id).is_err());

        let schedule = festival.schedules().get(id).unwrap();
        assert_eq!(schedule.name(), "Saved");
        assert!(schedule.is_empty());
    }

    #[test]
    fn update_rejects_blank_names_when_required() {
        let mut festival = Festival::new(calendar(), NamePolicy::RequireNonEmpty);
        let id = festival.create_schedule("Named", Vec::new(), now()).unwrap();

        let mut blanked = festival.schedules().get(id).unwrap().clone();
        blanked.rename("");

        assert!(festival.update_schedule(blanked).is_err());
        assert_eq!(festival.schedules().get(id).unwrap().name(), "Named");
    }
}
