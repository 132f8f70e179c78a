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

//! Results broadcast by the task worker.
//!
//! Each [`crate::tasks::FestivalTask`] answers with zero or more
//! [`FestivalEvent`]s on the worker's event channel. Failures are reported as
//! [`FestivalEvent::Error`] rather than ending the worker.

use crate::{
    conflicts::Conflicts,
    model::{CustomSchedule, Performance, ScheduleId},
    records::LoadReport,
};

#[derive(Debug)]
pub enum FestivalEvent {
    LineupLoaded(LoadReport),

    FavouriteToggled {
        artist_name: String,
        favourite: bool,
    },

    ScheduleCreated(CustomSchedule),
    NothingToCreate,
    SchedulesChanged(Vec<CustomSchedule>),

    ConflictsReady(ScheduleId, Conflicts),
    NowPlaying(Vec<Performance>),

    Error(String),
}
