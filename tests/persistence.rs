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

//! User state survives a restart through the SQLite repository.

mod common;

use common::{at, calendar, sample_lineup};
use lineup::{
    FavouritesOutcome, Festival, NamePolicy, PerformanceId,
    config::FestivalConfig,
    db::{MemoryRepository, SqliteRepository},
};
use tempfile::tempdir;

fn planner(path: &std::path::Path) -> Festival {
    let calendar = calendar();
    let mut festival = Festival::new(calendar.clone(), NamePolicy::AllowEmpty)
        .with_repository(Box::new(SqliteRepository::open(path).unwrap()))
        .unwrap();
    festival.load_lineup(&sample_lineup(&calendar));
    festival
}

#[test]
fn schedules_and_favourites_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("lineup.db");
    let now = at("2025-07-20T12:00:00Z");

    let (first, second) = {
        let mut festival = planner(&path);
        let selection: Vec<PerformanceId> = festival
            .catalog()
            .stage("Ozora")
            .unwrap()
            .performances()
            .iter()
            .take(3)
            .map(|p| p.id().clone())
            .collect();

        let first = festival
            .create_schedule_from_selection("Ozora mornings", &selection, now)
            .unwrap();
        assert!(festival.toggle_favourite("Artist 20 - Pumpui").unwrap());
        let FavouritesOutcome::Created(second) = festival.create_from_favourites(now).unwrap()
        else {
            panic!("expected a favourites schedule");
        };
        assert!(festival.remove_performance(first, &selection[0]).unwrap());

        (first, second)
    };

    let festival = planner(&path);
    let schedules = festival.schedules();

    assert_eq!(schedules.len(), 2);
    assert_eq!(schedules.schedules()[0].id(), first);
    assert_eq!(schedules.schedules()[1].id(), second);

    let restored = schedules.get(first).unwrap();
    assert_eq!(restored.name(), "Ozora mornings");
    assert_eq!(restored.len(), 2);
    assert_eq!(restored.created_at(), now);

    let favourites = schedules.get(second).unwrap();
    assert_eq!(favourites.name(), "My Favorites");
    assert_eq!(favourites.len(), 7);
    assert!(
        favourites
            .performances()
            .iter()
            .all(|p| p.artist_name() == "Artist 20 - Pumpui")
    );
    assert!(festival.favourites().is_favourite("Artist 20 - Pumpui"));
}

#[test]
fn deleted_schedules_stay_deleted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("lineup.db");

    {
        let mut festival = planner(&path);
        let id = festival
            .create_schedule("Temporary", Vec::new(), at("2025-07-20T12:00:00Z"))
            .unwrap();
        festival
            .create_schedule("Keeper", Vec::new(), at("2025-07-20T12:00:00Z"))
            .unwrap();
        assert!(festival.delete_schedule(id).unwrap());
        assert!(!festival.delete_schedule(id).unwrap());
    }

    let festival = planner(&path);
    let names: Vec<&str> = festival
        .schedules()
        .schedules()
        .iter()
        .map(|s| s.name())
        .collect();
    assert_eq!(names, vec!["Keeper"]);
}

#[test]
fn open_uses_configured_database() {
    let dir = tempdir().unwrap();
    let config = FestivalConfig {
        database_file: dir.path().join("festival.db").to_string_lossy().into_owned(),
        require_schedule_names: true,
        ..FestivalConfig::default()
    };

    let mut festival = Festival::open(&config).unwrap();
    assert!(festival.create_schedule(" ", Vec::new(), at("2025-07-20T12:00:00Z")).is_err());
    festival.toggle_favourite("Artist 0 - Ozora").unwrap();
    drop(festival);

    let festival = Festival::open(&config).unwrap();
    assert!(festival.schedules().is_empty());
    assert_eq!(festival.favourites().len(), 1);
}

#[test]
fn memory_repository_keeps_state_for_the_session() {
    let mut festival = Festival::new(calendar(), NamePolicy::AllowEmpty)
        .with_repository(Box::new(MemoryRepository::new()))
        .unwrap();

    festival.toggle_favourite("Artist 14 - Dome Stage").unwrap();
    assert!(!festival.toggle_favourite("Artist 14 - Dome Stage").unwrap());
    assert!(festival.favourites().is_empty());
}
