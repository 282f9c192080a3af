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

//! Typed views over a stored raw playlist document.
//!
//! The ingest stage never reshapes the API response, so these models only
//! need the fields the transform stage projects. Everything else in the
//! document is ignored on deserialization, and fields the API may omit
//! (local tracks carry `track: null`) are optional.

use serde::Deserialize;

/// One raw playlist document: the track listing as returned by the catalog API.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistDocument {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
}

/// One entry of the playlist's `items` array.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    /// Timestamp the track was added to the playlist, RFC 3339.
    #[serde(default)]
    pub added_at: Option<String>,

    /// The track itself. Null for local or removed tracks.
    #[serde(default)]
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub duration_ms: u64,

    #[serde(default)]
    pub popularity: u32,

    #[serde(default)]
    pub external_urls: ExternalUrls,

    #[serde(default)]
    pub album: Option<TrackAlbum>,

    #[serde(default)]
    pub artists: Vec<TrackArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackAlbum {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub release_date: String,

    #[serde(default)]
    pub total_tracks: u32,

    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackArtist {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub external_urls: ExternalUrls,
}

/// External link map; only the catalog's own link is projected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "href": "https://api.spotify.com/v1/playlists/abc/tracks",
        "items": [
            {
                "added_at": "2024-03-01T09:30:00Z",
                "track": {
                    "id": "t1",
                    "name": "First Song",
                    "duration_ms": 201000,
                    "popularity": 83,
                    "external_urls": {"spotify": "https://open.spotify.com/track/t1"},
                    "album": {
                        "id": "al1",
                        "name": "Album One",
                        "release_date": "2024-02-16",
                        "total_tracks": 12,
                        "external_urls": {"spotify": "https://open.spotify.com/album/al1"}
                    },
                    "artists": [
                        {"id": "ar1", "name": "Artist One",
                         "external_urls": {"spotify": "https://open.spotify.com/artist/ar1"}}
                    ]
                }
            },
            {
                "added_at": "2024-03-02T10:00:00Z",
                "track": null
            }
        ],
        "total": 2
    }"#;

    #[test]
    fn test_parse_playlist_document() {
        let doc: PlaylistDocument = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(doc.items.len(), 2);

        let track = doc.items[0].track.as_ref().unwrap();
        assert_eq!(track.id.as_deref(), Some("t1"));
        assert_eq!(track.duration_ms, 201000);
        assert_eq!(track.popularity, 83);
        assert_eq!(track.artists.len(), 1);

        let album = track.album.as_ref().unwrap();
        assert_eq!(album.id.as_deref(), Some("al1"));
        assert_eq!(album.total_tracks, 12);
        assert_eq!(
            album.external_urls.spotify.as_deref(),
            Some("https://open.spotify.com/album/al1")
        );

        // Local/removed tracks deserialize as None instead of failing the document
        assert!(doc.items[1].track.is_none());
    }

    #[test]
    fn test_parse_empty_document() {
        let doc: PlaylistDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.items.is_empty());
    }

    #[test]
    fn test_missing_fields_default() {
        let doc: PlaylistDocument =
            serde_json::from_str(r#"{"items":[{"track":{"id":"t9"}}]}"#).unwrap();
        let track = doc.items[0].track.as_ref().unwrap();
        assert_eq!(track.name, "");
        assert_eq!(track.duration_ms, 0);
        assert!(track.album.is_none());
        assert!(track.artists.is_empty());
        assert!(doc.items[0].added_at.is_none());
    }
}
