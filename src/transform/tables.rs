// Copyright 2025 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.
//
// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

//! Table projections over raw playlist documents.
//!
//! Each projection explodes the documents' `items` arrays and flattens the
//! nested track/album/artist structures into flat rows, deduplicated by the
//! entity key. Deduplication keeps the first-seen row per key; duplicates of
//! the same real-world entity are expected to be field-identical, so no
//! conflict resolution exists.
//!
//! All three projections run over the same unioned document set in one batch,
//! so every song's `album_id` and `artist_id` reference an album/artist row
//! present in the same batch's output.

use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;
use tracing::warn;

use crate::catalog::model::{PlaylistDocument, Track};

/// One row of the albums table, keyed by `album_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumRow {
    pub album_id: String,
    pub album_name: String,
    pub release_date: String,
    pub total_tracks: u32,
    pub url: String,
}

/// One row of the artists table, keyed by `artist_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistRow {
    pub artist_id: String,
    pub artist_name: String,
    pub external_url: String,
}

/// One row of the songs table, keyed by `song_id`.
///
/// `album_id` and `artist_id` are foreign keys into the albums and artists
/// tables of the same batch; `artist_id` is the track's *first* artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongRow {
    pub song_id: String,
    pub song_name: String,
    pub duration_ms: u64,
    pub url: String,
    pub popularity: u32,
    /// The `added_at` timestamp reduced to a calendar date.
    pub song_added: Option<NaiveDate>,
    pub album_id: String,
    pub artist_id: String,
}

fn tracks(docs: &[PlaylistDocument]) -> impl Iterator<Item = (Option<&str>, &Track)> {
    docs.iter()
        .flat_map(|doc| doc.items.iter())
        .filter_map(|item| {
            let Some(track) = &item.track else {
                warn!("Skipping playlist item without a track");
                return None;
            };
            Some((item.added_at.as_deref(), track))
        })
}

/// Project the albums table: one row per distinct `album_id` across all
/// tracks, fields taken from the track's nested album object.
pub fn project_albums(docs: &[PlaylistDocument]) -> Vec<AlbumRow> {
    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    for (_, track) in tracks(docs) {
        let Some(album) = &track.album else { continue };
        let Some(album_id) = &album.id else { continue };
        if !seen.insert(album_id.clone()) {
            continue;
        }
        rows.push(AlbumRow {
            album_id: album_id.clone(),
            album_name: album.name.clone(),
            release_date: album.release_date.clone(),
            total_tracks: album.total_tracks,
            url: album.external_urls.spotify.clone().unwrap_or_default(),
        });
    }

    rows
}

/// Project the artists table: explode every track's artist list, one row per
/// distinct `artist_id`.
pub fn project_artists(docs: &[PlaylistDocument]) -> Vec<ArtistRow> {
    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    for (_, track) in tracks(docs) {
        for artist in &track.artists {
            let Some(artist_id) = &artist.id else { continue };
            if !seen.insert(artist_id.clone()) {
                continue;
            }
            rows.push(ArtistRow {
                artist_id: artist_id.clone(),
                artist_name: artist.name.clone(),
                external_url: artist.external_urls.spotify.clone().unwrap_or_default(),
            });
        }
    }

    rows
}

/// Project the songs table: one row per distinct track id, `artist_id` taken
/// from the first entry of the track's artist list, `added_at` parsed into a
/// calendar date.
///
/// # Errors
///
/// Returns a parse error if an `added_at` value is neither RFC 3339 nor a
/// bare `YYYY-MM-DD` date; per the pipeline's error policy this aborts the
/// run.
pub fn project_songs(docs: &[PlaylistDocument]) -> Result<Vec<SongRow>, chrono::ParseError> {
    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    for (added_at, track) in tracks(docs) {
        let Some(song_id) = &track.id else {
            warn!("Skipping track without an id");
            continue;
        };
        if seen.contains(song_id) {
            continue;
        }
        let Some(first_artist) = track.artists.first() else {
            warn!("Skipping track id={} without artists", song_id);
            continue;
        };

        let song_added = added_at.map(parse_added_date).transpose()?;

        seen.insert(song_id.clone());
        rows.push(SongRow {
            song_id: song_id.clone(),
            song_name: track.name.clone(),
            duration_ms: track.duration_ms,
            url: track.external_urls.spotify.clone().unwrap_or_default(),
            popularity: track.popularity,
            song_added,
            album_id: track
                .album
                .as_ref()
                .and_then(|album| album.id.clone())
                .unwrap_or_default(),
            artist_id: first_artist.id.clone().unwrap_or_default(),
        });
    }

    Ok(rows)
}

/// Reduce an `added_at` timestamp string to its calendar date.
fn parse_added_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
}
