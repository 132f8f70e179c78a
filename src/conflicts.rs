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

//! Time conflict detection.
//!
//! Two performances conflict when their half-open intervals
//! `[start, end)` overlap, so back-to-back sets are not a conflict.
//!
//! # Scaling
//!
//! [`find_conflicts`] compares every pair, which is O(n²) in the number of
//! performances. Schedules are hand-picked by a user and hold tens of
//! entries, so this is fine there; it is not meant to be run over a whole
//! catalog.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{Performance, PerformanceId};

/// Conflicts found in a list of performances.
///
/// Maps each conflicted performance to the performances it overlaps, in the
/// order they appear in the input. Performances without a conflict have no
/// entry at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conflicts {
    entries: BTreeMap<PerformanceId, Vec<Performance>>,
}

impl Conflicts {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of performances with at least one conflict.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, id: &PerformanceId) -> bool {
        self.entries.contains_key(id)
    }

    /// The performances overlapping `id`, if any.
    pub fn get(&self, id: &PerformanceId) -> Option<&[Performance]> {
        self.entries.get(id).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PerformanceId, &[Performance])> {
        self.entries.iter().map(|(id, others)| (id, others.as_slice()))
    }

    /// Each conflicting pair once, smaller id first.
    pub fn pairs(&self) -> Vec<(PerformanceId, PerformanceId)> {
        self.entries
            .iter()
            .flat_map(|(id, others)| {
                others.iter().map(move |other| {
                    if id <= other.id() {
                        (id.clone(), other.id().clone())
                    } else {
                        (other.id().clone(), id.clone())
                    }
                })
            })
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Finds every pair of distinct entries in `performances` whose times
/// overlap. The result is symmetric: if `b` is listed under `a`, `a` is
/// listed under `b`.
pub fn find_conflicts(performances: &[Performance]) -> Conflicts {
    let mut entries: BTreeMap<PerformanceId, Vec<Performance>> = BTreeMap::new();

    for (i, performance) in performances.iter().enumerate() {
        let overlapping: Vec<Performance> = performances
            .iter()
            .enumerate()
            .filter(|&(j, other)| i != j && performance.overlaps(other))
            .map(|(_, other)| other.clone())
            .collect();

        if !overlapping.is_empty() {
            entries
                .entry(performance.id().clone())
                .or_default()
                .extend(overlapping);
        }
    }

    Conflicts { entries }
}
