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

//! The festival lineup.
//!
//! The [`Catalog`] holds every known performance along with the artist and
//! stage groupings derived from them. The groupings are rebuilt in full
//! whenever the performance list is replaced, so they can never drift from
//! it.

use std::collections::{BTreeMap, HashSet};

use jiff::{Timestamp, civil::Date};

use crate::{
    favourites::Favourites,
    model::{
        Artist, Performance, PerformanceId, PerformanceQuery, Stage, by_day_then_start,
        contains_ignore_case,
    },
    records::{self, LoadReport, PerformanceRecord},
    time::FestivalCalendar,
};

#[derive(Debug, Clone)]
pub struct Catalog {
    calendar: FestivalCalendar,
    performances: Vec<Performance>,
    artists: Vec<Artist>,
    stages: Vec<Stage>,
}

impl Catalog {
    /// Creates an empty catalog for the festival described by `calendar`.
    pub fn new(calendar: FestivalCalendar) -> Self {
        Self {
            calendar,
            performances: Vec::new(),
            artists: Vec::new(),
            stages: Vec::new(),
        }
    }

    pub fn calendar(&self) -> &FestivalCalendar {
        &self.calendar
    }

    /// Replaces the catalog contents with the valid records in `records`.
    ///
    /// Invalid records are skipped and listed in the returned report; the
    /// rest of the batch is still loaded.
    pub fn load(&mut self, records: &[PerformanceRecord]) -> LoadReport {
        let (performances, rejected) = records::resolve_all(records, &self.calendar);

        for rejection in &rejected {
            log::warn!(
                "Rejected performance record {} ({:?}): {}",
                rejection.index,
                rejection.artist_name,
                rejection.reason
            );
        }

        let report = LoadReport {
            loaded: performances.len(),
            rejected,
        };

        // Ids are already unique after resolve_all.
        self.replace(performances);

        log::info!(
            "Loaded {} performances by {} artists on {} stages ({} rejected)",
            report.loaded,
            self.artists.len(),
            self.stages.len(),
            report.rejected.len()
        );

        report
    }

    /// Replaces the catalog contents with already validated performances.
    ///
    /// Later duplicates of an id are dropped; their ids are returned in
    /// input order.
    pub fn replace(&mut self, performances: Vec<Performance>) -> Vec<PerformanceId> {
        let mut seen = HashSet::new();
        let mut dropped = Vec::new();

        self.performances = performances
            .into_iter()
            .filter(|p| {
                let first = seen.insert(p.id().clone());
                if !first {
                    log::warn!("Dropped duplicate performance {}", p.id());
                    dropped.push(p.id().clone());
                }
                first
            })
            .collect();

        self.rebuild_indices();
        dropped
    }

    fn rebuild_indices(&mut self) {
        let mut by_artist: BTreeMap<String, Vec<Performance>> = BTreeMap::new();
        let mut by_stage: BTreeMap<String, Vec<Performance>> = BTreeMap::new();

        for performance in &self.performances {
            by_artist
                .entry(performance.artist_name().to_string())
                .or_default()
                .push(performance.clone());
            by_stage
                .entry(performance.stage_name().to_string())
                .or_default()
                .push(performance.clone());
        }

        // BTreeMap iteration gives the ordinal name order the lists are
        // expected in.
        self.artists = by_artist
            .into_iter()
            .map(|(name, performances)| Artist::new(name, performances))
            .collect();
        self.stages = by_stage
            .into_iter()
            .map(|(name, performances)| Stage::new(name, performances))
            .collect();
    }

    pub fn performances(&self) -> &[Performance] {
        &self.performances
    }

    /// Artists sorted by name.
    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    /// Stages sorted by name.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn is_empty(&self) -> bool {
        self.performances.is_empty()
    }

    pub fn performance(&self, id: &PerformanceId) -> Option<&Performance> {
        self.performances.iter().find(|p| p.id() == id)
    }

    pub fn artist(&self, name: &str) -> Option<&Artist> {
        self.artists
            .binary_search_by(|a| a.name().cmp(name))
            .ok()
            .map(|i| &self.artists[i])
    }

    pub fn stage(&self, name: &str) -> Option<&Stage> {
        self.stages
            .binary_search_by(|s| s.name().cmp(name))
            .ok()
            .map(|i| &self.stages[i])
    }

    /// Performances on stage at `now`, ends inclusive.
    pub fn currently_playing(&self, now: Timestamp) -> Vec<&Performance> {
        self.performances
            .iter()
            .filter(|p| p.is_playing_at(now))
            .collect()
    }

    /// Sorted names of the stages with a set in progress at `now`.
    pub fn stages_playing(&self, now: Timestamp) -> Vec<&str> {
        self.stages
            .iter()
            .filter(|s| s.performances().iter().any(|p| p.is_playing_at(now)))
            .map(|s| s.name())
            .collect()
    }

    /// Performances listed on `day`, ordered by start time.
    pub fn on_day(&self, day: Date) -> Vec<&Performance> {
        let mut on_day: Vec<&Performance> = self
            .performances
            .iter()
            .filter(|p| p.is_on_day(day))
            .collect();
        on_day.sort_by_key(|p| p.start_time());
        on_day
    }

    /// Performances listed on the festival-zone day containing `now`.
    pub fn today(&self, now: Timestamp) -> Vec<&Performance> {
        self.on_day(self.calendar.normalize_to_day(now))
    }

    /// Artists whose name contains `query`, ignoring case.
    ///
    /// An empty query returns every artist. Results keep catalog order.
    pub fn search_artists(&self, query: &str) -> Vec<&Artist> {
        self.artists
            .iter()
            .filter(|a| contains_ignore_case(a.name(), query))
            .collect()
    }

    /// Performances matching `query`, ordered by day, start time and stage.
    pub fn filter(&self, query: &PerformanceQuery, favourites: &Favourites) -> Vec<&Performance> {
        let mut matches: Vec<&Performance> = self
            .performances
            .iter()
            .filter(|p| query.matches(p))
            .filter(|p| !query.favourites_only || favourites.is_favourite(p.artist_name()))
            .collect();
        matches.sort_by(|a, b| by_day_then_start(a, b));
        matches
    }

    pub fn is_festival_active(&self, now: Timestamp) -> bool {
        self.calendar.is_festival_active(now)
    }

    pub fn festival_days(&self) -> Vec<Date> {
        self.calendar.festival_days()
    }
}
