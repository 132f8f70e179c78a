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

//! Favourite artists.
//!
//! A plain set of artist names. Names are matched exactly, and every
//! operation is total: unknown names are simply not favourites.

use std::collections::BTreeSet;

use crate::model::Performance;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favourites {
    artists: BTreeSet<String>,
}

impl Favourites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `artist_name`.
    ///
    /// Returns `true` if the artist is a favourite afterwards.
    pub fn toggle(&mut self, artist_name: &str) -> bool {
        if self.artists.remove(artist_name) {
            false
        } else {
            self.artists.insert(artist_name.to_string());
            true
        }
    }

    pub fn is_favourite(&self, artist_name: &str) -> bool {
        self.artists.contains(artist_name)
    }

    /// The performances by favourite artists, in input order.
    pub fn filter_favourites<'a>(
        &self,
        performances: impl IntoIterator<Item = &'a Performance>,
    ) -> Vec<&'a Performance> {
        performances
            .into_iter()
            .filter(|p| self.is_favourite(p.artist_name()))
            .collect()
    }

    pub fn names(&self) -> &BTreeSet<String> {
        &self.artists
    }

    pub fn len(&self) -> usize {
        self.artists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }
}

impl FromIterator<String> for Favourites {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            artists: iter.into_iter().collect(),
        }
    }
}
