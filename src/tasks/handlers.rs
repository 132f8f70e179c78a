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

use anyhow::{Result, anyhow};

use crate::{
    events::FestivalEvent,
    model::{PerformanceId, ScheduleId},
    records::PerformanceRecord,
    schedules::FavouritesOutcome,
    tasks::TaskContext,
};

pub(super) fn load_lineup(ctx: &mut TaskContext, records: Vec<PerformanceRecord>) -> Result<()> {
    let report = ctx.festival.load_lineup(&records);
    ctx.event_tx.send(FestivalEvent::LineupLoaded(report))?;

    Ok(())
}

pub(super) fn toggle_favourite(ctx: &mut TaskContext, artist_name: String) -> Result<()> {
    let favourite = ctx.festival.toggle_favourite(&artist_name)?;
    ctx.event_tx.send(FestivalEvent::FavouriteToggled {
        artist_name,
        favourite,
    })?;

    Ok(())
}

pub(super) fn create_schedule(
    ctx: &mut TaskContext,
    name: String,
    selection: Vec<PerformanceId>,
) -> Result<()> {
    let now = (ctx.clock)();
    let id = ctx
        .festival
        .create_schedule_from_selection(&name, &selection, now)?;

    send_created(ctx, id)
}

pub(super) fn create_from_favourites(ctx: &mut TaskContext) -> Result<()> {
    let now = (ctx.clock)();
    match ctx.festival.create_from_favourites(now)? {
        FavouritesOutcome::Created(id) => send_created(ctx, id),
        FavouritesOutcome::NothingToCreate => {
            ctx.event_tx.send(FestivalEvent::NothingToCreate)?;
            Ok(())
        }
    }
}

fn send_created(ctx: &mut TaskContext, id: ScheduleId) -> Result<()> {
    let schedule = ctx
        .festival
        .schedules()
        .get(id)
        .cloned()
        .ok_or_else(|| anyhow!("Schedule {id} vanished after creation"))?;

    ctx.event_tx.send(FestivalEvent::ScheduleCreated(schedule))?;
    send_schedules(ctx)
}

pub(super) fn rename_schedule(ctx: &mut TaskContext, id: ScheduleId, name: String) -> Result<()> {
    if ctx.festival.rename_schedule(id, &name)? {
        send_schedules(ctx)?;
    }

    Ok(())
}

pub(super) fn delete_schedule(ctx: &mut TaskContext, id: ScheduleId) -> Result<()> {
    if ctx.festival.delete_schedule(id)? {
        send_schedules(ctx)?;
    }

    Ok(())
}

pub(super) fn add_performance(
    ctx: &mut TaskContext,
    id: ScheduleId,
    performance_id: PerformanceId,
) -> Result<()> {
    if ctx.festival.add_performance(id, &performance_id)? {
        send_schedules(ctx)?;
    }

    Ok(())
}

pub(super) fn remove_performance(
    ctx: &mut TaskContext,
    id: ScheduleId,
    performance_id: PerformanceId,
) -> Result<()> {
    if ctx.festival.remove_performance(id, &performance_id)? {
        send_schedules(ctx)?;
    }

    Ok(())
}

pub(super) fn find_conflicts(ctx: &mut TaskContext, id: ScheduleId) -> Result<()> {
    if let Some(conflicts) = ctx.festival.conflicts(id) {
        ctx.event_tx.send(FestivalEvent::ConflictsReady(id, conflicts))?;
    }

    Ok(())
}

pub(super) fn now_playing(ctx: &mut TaskContext) -> Result<()> {
    let now = (ctx.clock)();
    let playing = ctx
        .festival
        .catalog()
        .currently_playing(now)
        .into_iter()
        .cloned()
        .collect();

    ctx.event_tx.send(FestivalEvent::NowPlaying(playing))?;

    Ok(())
}

fn send_schedules(ctx: &mut TaskContext) -> Result<()> {
    let schedules = ctx.festival.schedules().schedules().to_vec();
    ctx.event_tx.send(FestivalEvent::SchedulesChanged(schedules))?;

    Ok(())
}
