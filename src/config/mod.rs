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

//! Application configuration.
//!
//! This module manages the festival configuration file: the festival's time
//! zone and opening window, and where user state is stored.

use jiff::civil::{self, DateTime, Time};
use serde::{Deserialize, Serialize};

use crate::{
    schedules::NamePolicy,
    time::{CalendarError, DEFAULT_NIGHT_ROLLOVER, FestivalCalendar},
};

const CONFIG_NAME: &str = "lineup";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FestivalConfig {
    pub version: u32,
    /// IANA name of the zone all day bucketing happens in.
    pub time_zone: String,
    pub festival_start: DateTime,
    pub festival_end: DateTime,
    pub night_rollover: Time,
    pub database_file: String,
    pub require_schedule_names: bool,
}

impl Default for FestivalConfig {
    fn default() -> Self {
        Self {
            version: 1,
            time_zone: "Europe/Budapest".to_string(),
            festival_start: civil::date(2025, 7, 28).at(0, 0, 0, 0),
            festival_end: civil::date(2025, 8, 3).at(23, 59, 0, 0),
            night_rollover: DEFAULT_NIGHT_ROLLOVER,
            database_file: "lineup.db".to_string(),
            require_schedule_names: false,
        }
    }
}

impl FestivalConfig {
    /// Resolves the configured zone and window.
    ///
    /// # Errors
    ///
    /// Returns a [`CalendarError`] if the zone is unknown or the window is
    /// not valid in it.
    pub fn calendar(&self) -> Result<FestivalCalendar, CalendarError> {
        Ok(
            FestivalCalendar::from_civil(&self.time_zone, self.festival_start, self.festival_end)?
                .with_night_rollover(self.night_rollover),
        )
    }

    pub fn name_policy(&self) -> NamePolicy {
        if self.require_schedule_names {
            NamePolicy::RequireNonEmpty
        } else {
            NamePolicy::AllowEmpty
        }
    }
}

pub fn load_config() -> FestivalConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

pub fn save_config(cfg: &FestivalConfig) -> Result<(), confy::ConfyError> {
    confy::store(CONFIG_NAME, None, cfg)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;

    #[test]
    fn default_calendar_is_ozora_week() {
        let calendar = FestivalConfig::default().calendar().unwrap();

        assert_eq!(calendar.start(), "2025-07-27T22:00:00Z".parse::<Timestamp>().unwrap());
        assert_eq!(calendar.end(), "2025-08-03T21:59:00Z".parse::<Timestamp>().unwrap());
        assert_eq!(calendar.night_rollover(), DEFAULT_NIGHT_ROLLOVER);
    }

    #[test]
    fn name_policy_follows_flag() {
        let mut config = FestivalConfig::default();
        assert_eq!(config.name_policy(), NamePolicy::AllowEmpty);

        config.require_schedule_names = true;
        assert_eq!(config.name_policy(), NamePolicy::RequireNonEmpty);
    }

    #[test]
    fn bad_zone_is_reported() {
        let config = FestivalConfig {
            time_zone: "Mars/Olympus_Mons".to_string(),
            ..FestivalConfig::default()
        };

        assert!(config.calendar().is_err());
    }
}
