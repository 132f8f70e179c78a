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

//! Serialized access to a [`Festival`].
//!
//! The planner itself is single threaded. This module implements the command
//! pattern used to share it: one worker thread owns the [`Festival`], takes
//! [`FestivalTask`]s off a channel in order and broadcasts the results back
//! as [`FestivalEvent`]s. Because only the worker ever touches the planner,
//! no caller can observe a half-applied change.

mod handlers;

use std::{
    sync::mpsc::{Receiver, Sender},
    thread::{self, JoinHandle},
};

use anyhow::Result;
use jiff::Timestamp;

use crate::{
    events::FestivalEvent,
    festival::Festival,
    model::{PerformanceId, ScheduleId},
    records::PerformanceRecord,
};

#[derive(Debug)]
pub enum FestivalTask {
    LoadLineup(Vec<PerformanceRecord>),

    ToggleFavourite(String),

    CreateSchedule {
        name: String,
        selection: Vec<PerformanceId>,
    },
    CreateFromFavourites,
    RenameSchedule(ScheduleId, String),
    DeleteSchedule(ScheduleId),

    AddPerformance(ScheduleId, PerformanceId),
    RemovePerformance(ScheduleId, PerformanceId),

    FindConflicts(ScheduleId),
    NowPlaying,
}

/// Spawns a background thread that owns `festival` and processes tasks
/// until every sender of `task_rx` has been dropped.
///
/// # Arguments
///
/// * `festival` - The planner the worker takes ownership of.
/// * `task_rx` - The receiving end of the task channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
///
/// Joining the returned handle gives the planner back.
pub fn spawn_task_worker(
    festival: Festival,
    task_rx: Receiver<FestivalTask>,
    event_tx: Sender<FestivalEvent>,
) -> JoinHandle<Festival> {
    spawn_task_worker_with_clock(festival, task_rx, event_tx, Timestamp::now)
}

/// As [`spawn_task_worker`], reading the current time from `clock`.
pub fn spawn_task_worker_with_clock(
    mut festival: Festival,
    task_rx: Receiver<FestivalTask>,
    event_tx: Sender<FestivalEvent>,
    clock: fn() -> Timestamp,
) -> JoinHandle<Festival> {
    thread::spawn(move || {
        while let Ok(task) = task_rx.recv() {
            let mut ctx = TaskContext {
                festival: &mut festival,
                event_tx: &event_tx,
                clock,
            };

            if let Err(e) = handle_task(task, &mut ctx) {
                log::error!("Task failed: {e:#}");
                let _ = event_tx.send(FestivalEvent::Error(format!("{e:#}")));
            }
        }

        festival
    })
}

/// Bundles shared resources required by task handlers to simplify resource
/// passing when invoking those handler functions.
struct TaskContext<'a> {
    festival: &'a mut Festival,
    event_tx: &'a Sender<FestivalEvent>,
    clock: fn() -> Timestamp,
}

/// Orchestrates the execution of a single task.
fn handle_task(task: FestivalTask, ctx: &mut TaskContext) -> Result<()> {
    match task {
        FestivalTask::LoadLineup(records) => handlers::load_lineup(ctx, records),

        FestivalTask::ToggleFavourite(name) => handlers::toggle_favourite(ctx, name),

        FestivalTask::CreateSchedule { name, selection } => {
            handlers::create_schedule(ctx, name, selection)
        }
        FestivalTask::CreateFromFavourites => handlers::create_from_favourites(ctx),
        FestivalTask::RenameSchedule(id, name) => handlers::rename_schedule(ctx, id, name),
        FestivalTask::DeleteSchedule(id) => handlers::delete_schedule(ctx, id),

        FestivalTask::AddPerformance(id, performance_id) => {
            handlers::add_performance(ctx, id, performance_id)
        }
        FestivalTask::RemovePerformance(id, performance_id) => {
            handlers::remove_performance(ctx, id, performance_id)
        }

        FestivalTask::FindConflicts(id) => handlers::find_conflicts(ctx, id),
        FestivalTask::NowPlaying => handlers::now_playing(ctx),
    }
}
