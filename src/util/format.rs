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

//! Display formatting for days, clock times and countdowns.

use jiff::{SignedDuration, Timestamp, civil::Date};

use crate::{
    model::Performance,
    time::{Countdown, FestivalCalendar},
};

/// Formats a day as e.g. "Monday, Jul 28".
pub fn format_day(day: Date) -> String {
    day.strftime("%A, %b %-d").to_string()
}

/// Formats an instant as a 24 hour clock time in the festival zone.
pub fn format_clock(calendar: &FestivalCalendar, instant: Timestamp) -> String {
    calendar.to_civil(instant).strftime("%H:%M").to_string()
}

/// Formats a performance's slot as e.g. "22:00 - 23:00".
pub fn format_time_range(calendar: &FestivalCalendar, performance: &Performance) -> String {
    format!(
        "{} - {}",
        format_clock(calendar, performance.start_time()),
        format_clock(calendar, performance.end_time())
    )
}

/// Formats a length of time as "HH:MM".
pub fn format_duration(duration: SignedDuration) -> String {
    let total_minutes = duration.as_secs() / 60;
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

pub fn format_hours(hours: f64) -> String {
    format!("{hours:.1}h")
}

pub fn format_countdown(countdown: &Countdown) -> String {
    format!(
        "{} days, {} hours, {} minutes",
        countdown.days, countdown.hours, countdown.minutes
    )
}

/// Formats a 1-based festival day number, or a teaser before the festival.
pub fn format_festival_day(day: Option<u32>) -> String {
    match day {
        Some(day) => format!("Day {day}"),
        None => "Coming Soon".to_string(),
    }
}
