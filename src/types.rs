//! Data types for playlist metadata, tracks and the final scrape result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel used when a row has no title text.
pub const UNKNOWN_TITLE: &str = "Unknown";
/// Sentinel used when a row has no artist links.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
/// Sentinel used when a row has no album link.
pub const UNKNOWN_ALBUM: &str = "Unknown Album";
/// Sentinel used when no duration token was found on a row.
pub const UNKNOWN_DURATION: &str = "Unknown";

/// Separator used when joining a track's artists into one string.
pub const ARTIST_SEPARATOR: &str = ", ";

// ================================================================================================
// PLAYLIST METADATA
// ================================================================================================

/// Playlist-level fields read from the static page's meta tags.
///
/// # Examples
///
/// ```rust
/// use playlist_scrape::PlaylistMetadata;
///
/// let meta = PlaylistMetadata {
///     title: "Chill Mix".to_string(),
///     description: "Playlist · Acme · 3 songs".to_string(),
///     image_url: String::new(),
///     owner: "Acme".to_string(),
///     declared_track_count: Some(3),
///     source_url: "https://open.spotify.com/playlist/abc".to_string(),
/// };
///
/// println!("{meta}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistMetadata {
    /// Playlist title from the social title meta tag
    pub title: String,
    /// Trimmed social description, empty if absent
    pub description: String,
    /// Cover image from the social image meta tag, empty if absent
    pub image_url: String,
    /// Owner extracted from the description
    pub owner: String,
    /// Track count advertised in the description, if any
    ///
    /// This is advisory: it caps the collected list but never pads it.
    pub declared_track_count: Option<u32>,
    /// The URL the metadata was fetched from
    pub source_url: String,
}

impl fmt::Display for PlaylistMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.declared_track_count {
            Some(count) => write!(f, "{} by {} ({count} tracks)", self.title, self.owner),
            None => write!(f, "{} by {}", self.title, self.owner),
        }
    }
}

// ================================================================================================
// TRACKS
// ================================================================================================

/// A track as parsed from one rendered row, before it has a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRow {
    pub title: String,
    /// Distinct artist names in first-seen order; never empty
    pub artists: Vec<String>,
    pub album: String,
    /// Duration text as shown on the row, or [`UNKNOWN_DURATION`]
    pub duration: String,
    pub image_url: String,
}

/// Identity of a track for deduplication across scroll positions.
pub type TrackKey = (String, String);

impl TrackRow {
    /// The artists joined with [`ARTIST_SEPARATOR`].
    pub fn artist(&self) -> String {
        self.artists.join(ARTIST_SEPARATOR)
    }

    /// `(title, joined artists)`; rows with equal keys are the same track.
    pub fn key(&self) -> TrackKey {
        (self.title.clone(), self.artist())
    }

    /// Give this row its final 1-based position.
    pub fn into_track(self, index: u32) -> Track {
        let artist = self.artist();
        Track {
            index,
            title: self.title,
            artist,
            artists: self.artists,
            album: self.album,
            duration: self.duration,
            image_url: self.image_url,
        }
    }
}

/// A track in the final, ordered playlist output.
///
/// # Examples
///
/// ```rust
/// use playlist_scrape::Track;
///
/// let track = Track {
///     index: 1,
///     title: "Paranoid Android".to_string(),
///     artist: "Radiohead".to_string(),
///     artists: vec!["Radiohead".to_string()],
///     album: "OK Computer".to_string(),
///     duration: "6:23".to_string(),
///     image_url: String::new(),
/// };
///
/// assert_eq!(track.to_string(), "1. Radiohead - Paranoid Android (6:23)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Track {
    /// 1-based position in first-seen order
    pub index: u32,
    pub title: String,
    /// All artists joined with `", "`
    pub artist: String,
    pub artists: Vec<String>,
    pub album: String,
    /// `mm:ss`/`h:mm:ss` text, or `"Unknown"`
    pub duration: String,
    pub image_url: String,
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {} - {} ({})",
            self.index, self.artist, self.title, self.duration
        )
    }
}

/// A single field of [`Track`] that can be pulled out as a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackColumn {
    Title,
    Artist,
    Album,
    Duration,
    ImageUrl,
    Index,
}

impl TrackColumn {
    fn value(self, track: &Track) -> String {
        match self {
            TrackColumn::Title => track.title.clone(),
            TrackColumn::Artist => track.artist.clone(),
            TrackColumn::Album => track.album.clone(),
            TrackColumn::Duration => track.duration.clone(),
            TrackColumn::ImageUrl => track.image_url.clone(),
            TrackColumn::Index => track.index.to_string(),
        }
    }
}

impl FromStr for TrackColumn {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "title" => Ok(TrackColumn::Title),
            "artist" => Ok(TrackColumn::Artist),
            "album" => Ok(TrackColumn::Album),
            "duration" => Ok(TrackColumn::Duration),
            "image_url" => Ok(TrackColumn::ImageUrl),
            "index" => Ok(TrackColumn::Index),
            other => Err(format!(
                "Invalid column name: {other} (expected title, artist, album, duration, image_url or index)"
            )),
        }
    }
}

// ================================================================================================
// RESULT
// ================================================================================================

/// The complete outcome of one playlist scrape.
///
/// Built once by [`PlaylistScraper::scrape_playlist`](crate::PlaylistScraper::scrape_playlist)
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistResult {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub owner: String,
    pub declared_track_count: Option<u32>,
    pub source_url: String,
    /// Number of tracks actually collected
    pub scraped_track_count: u32,
    /// Sum of all parseable track durations
    pub total_duration_seconds: u64,
    /// `total_duration_seconds` formatted for display
    pub total_duration_text: String,
    /// When the scrape finished
    pub scraped_at: DateTime<Utc>,
    /// Tracks ordered by `index`
    pub tracks: Vec<Track>,
}

impl PlaylistResult {
    /// One field of every track, in track order.
    pub fn column(&self, column: TrackColumn) -> Vec<String> {
        self.tracks.iter().map(|t| column.value(t)).collect()
    }

    /// Tracks at 1-based positions `start..=end`, clamped to what was collected.
    pub fn track_range(&self, start: usize, end: usize) -> &[Track] {
        let start = start.saturating_sub(1);
        let end = end.min(self.tracks.len());
        if start >= end {
            return &[];
        }
        &self.tracks[start..end]
    }

    /// Pretty-printed JSON document of the whole result.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for PlaylistResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {}: {} tracks, {}",
            self.title, self.owner, self.scraped_track_count, self.total_duration_text
        )
    }
}
