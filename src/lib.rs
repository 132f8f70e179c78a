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

//! # Festival schedule planner.
//!
//! The data model and query engine behind a festival lineup app: it ingests
//! a flat list of performances, derives artist and stage groupings, answers
//! time based questions ("what's on now", "what's on day N") and manages the
//! user's own schedules, including spotting time conflicts within them.
//!
//! ## Architecture
//!
//! * [`catalog::Catalog`] - the immutable lineup and its derived indices.
//! * [`favourites::Favourites`] - the set of favourite artist names.
//! * [`schedules::ScheduleStore`] - the user's named schedules.
//! * [`conflicts`] - pairwise overlap detection within a schedule.
//! * [`time::FestivalCalendar`] - the one place instants become days.
//!
//! [`festival::Festival`] ties these together with a [`db::Repository`] so
//! user state survives restarts. All of it is synchronous and single
//! threaded; [`tasks`] provides a worker thread that owns a `Festival` and
//! serializes access to it through channels.
//!
//! Nothing in this crate renders anything or reads the system clock on its
//! own, except [`tasks::spawn_task_worker`] which stamps tasks with
//! [`jiff::Timestamp::now`].

pub mod catalog;
pub mod config;
pub mod conflicts;
pub mod db;
pub mod events;
pub mod favourites;
pub mod festival;
pub mod model;
pub mod records;
pub mod schedules;
pub mod tasks;
pub mod time;
pub mod util;

pub use catalog::Catalog;
pub use conflicts::{Conflicts, find_conflicts};
pub use favourites::Favourites;
pub use festival::Festival;
pub use model::{
    Artist, CustomSchedule, Performance, PerformanceId, PerformanceQuery, ScheduleId,
    ScheduleRecord, Stage,
};
pub use records::{LoadReport, PerformanceRecord, RecordError, RejectedRecord};
pub use schedules::{FavouritesOutcome, NamePolicy, ScheduleError, ScheduleStore};
pub use time::FestivalCalendar;
