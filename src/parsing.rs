//! HTML parsing utilities for playlist pages.
//!
//! This module contains the parsing logic for both halves of a scrape: the
//! playlist-level meta tags of the static page, and the track rows of the
//! rendered page. These are pure functions over `scraper` documents.

use crate::types::{TrackRow, UNKNOWN_ALBUM, UNKNOWN_ARTIST, UNKNOWN_DURATION, UNKNOWN_TITLE};
use crate::{PlaylistMetadata, Result, ScrapeError};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// The platform name some system-curated playlists put in their description
/// instead of an owner segment.
pub const PLATFORM_BRAND: &str = "Spotify";

/// Owner used when the description names neither an owner nor the platform.
pub const UNKNOWN_OWNER: &str = "Unknown";

/// Parser for playlist pages.
///
/// Holds its compiled selectors and patterns so a single instance can be
/// reused across every sampling round of a scrape.
#[derive(Debug, Clone)]
pub struct PlaylistParser {
    title: Selector,
    artist_links: Selector,
    album_link: Selector,
    image: Selector,
    meta_title: Selector,
    meta_description: Selector,
    meta_image: Selector,
    duration_pattern: Regex,
    owner_pattern: Regex,
    count_pattern: Regex,
}

impl Default for PlaylistParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaylistParser {
    /// Create a new parser instance.
    pub fn new() -> Self {
        Self {
            title: Selector::parse(r#"div[dir="auto"]"#).unwrap(),
            artist_links: Selector::parse(r#"a[href*="/artist/"]"#).unwrap(),
            album_link: Selector::parse(r#"a[href*="/album/"]"#).unwrap(),
            image: Selector::parse("img").unwrap(),
            meta_title: Selector::parse(r#"meta[property="og:title"]"#).unwrap(),
            meta_description: Selector::parse(r#"meta[property="og:description"]"#).unwrap(),
            meta_image: Selector::parse(r#"meta[property="og:image"]"#).unwrap(),
            duration_pattern: Regex::new(r"^\d{1,2}:\d{2}$").unwrap(),
            owner_pattern: Regex::new(r"Playlist\s*[·•]\s*(.*?)\s*[·•]").unwrap(),
            count_pattern: Regex::new(r"(?i)([\d,]+)\s*(?:items|songs|tracks)").unwrap(),
        }
    }

    // === PLAYLIST METADATA ===

    /// Parse playlist-level metadata from the static page's meta tags.
    ///
    /// Fails with [`ScrapeError::MissingTitle`] when there is no social title;
    /// every other field has a fallback.
    pub fn parse_metadata(&self, document: &Html, source_url: &str) -> Result<PlaylistMetadata> {
        let title = self
            .meta_content(document, &self.meta_title)
            .ok_or(ScrapeError::MissingTitle)?
            .trim()
            .to_string();

        let description = self
            .meta_content(document, &self.meta_description)
            .map(|d| d.trim().to_string())
            .unwrap_or_default();

        let image_url = self
            .meta_content(document, &self.meta_image)
            .map(str::to_string)
            .unwrap_or_default();

        let owner = self.extract_owner(&description);
        let declared_track_count = self.extract_declared_count(&description);

        log::debug!(
            "Parsed metadata: title='{title}', owner='{owner}', declared={declared_track_count:?}"
        );

        Ok(PlaylistMetadata {
            title,
            description,
            image_url,
            owner,
            declared_track_count,
            source_url: source_url.to_string(),
        })
    }

    fn meta_content<'a>(&self, document: &'a Html, selector: &Selector) -> Option<&'a str> {
        document
            .select(selector)
            .next()
            .and_then(|meta| meta.value().attr("content"))
    }

    /// Owner from a `Playlist · <owner> · ...` description.
    pub fn extract_owner(&self, description: &str) -> String {
        if let Some(captures) = self.owner_pattern.captures(description) {
            return captures[1].trim().to_string();
        }
        if description.contains(PLATFORM_BRAND) {
            return PLATFORM_BRAND.to_string();
        }
        UNKNOWN_OWNER.to_string()
    }

    /// Track count from `"<n> songs"`, `"1,234 items"` and the like.
    pub fn extract_declared_count(&self, description: &str) -> Option<u32> {
        let captures = self.count_pattern.captures(description)?;
        let digits = captures[1].replace(',', "");
        match digits.parse::<u32>() {
            Ok(count) => Some(count),
            Err(e) => {
                log::debug!("Ignoring declared track count '{digits}': {e}");
                None
            }
        }
    }

    // === TRACK ROWS ===

    /// Parse every row matched by `rows` in a rendered document.
    ///
    /// Each row yields its own result so that one bad row never hides the
    /// others.
    pub fn parse_rows(&self, document: &Html, rows: &Selector) -> Vec<Result<TrackRow>> {
        document
            .select(rows)
            .map(|row| self.parse_track_row(&row))
            .collect()
    }

    /// Parse a single rendered track row.
    ///
    /// A row with neither title text nor artist links is a placeholder the
    /// virtualized list mounted before its data arrived, and is rejected.
    pub fn parse_track_row(&self, row: &ElementRef) -> Result<TrackRow> {
        let title = row
            .select(&self.title)
            .next()
            .map(|div| div.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty());

        let artists = self.extract_artists(row);

        if title.is_none() && artists.is_empty() {
            return Err(ScrapeError::Parse(
                "Row has neither title nor artist".to_string(),
            ));
        }

        let artists = if artists.is_empty() {
            vec![UNKNOWN_ARTIST.to_string()]
        } else {
            artists
        };

        let album = row
            .select(&self.album_link)
            .next()
            .map(|a| a.text().collect::<String>().trim().to_string())
            .unwrap_or_else(|| UNKNOWN_ALBUM.to_string());

        Ok(TrackRow {
            title: title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            artists,
            album,
            duration: self.extract_duration(row),
            image_url: self.extract_image(row),
        })
    }

    /// Artist link texts, de-duplicated in first-seen order.
    fn extract_artists(&self, row: &ElementRef) -> Vec<String> {
        let mut artists: Vec<String> = Vec::new();
        for link in row.select(&self.artist_links) {
            let name = link.text().collect::<String>().trim().to_string();
            if !artists.contains(&name) {
                artists.push(name);
            }
        }
        artists
    }

    /// The `src` of the row's image, else the first URL of its `srcset`.
    fn extract_image(&self, row: &ElementRef) -> String {
        let Some(img) = row.select(&self.image).next() else {
            return String::new();
        };

        match img.value().attr("src").filter(|src| !src.is_empty()) {
            Some(src) => src.to_string(),
            None => img
                .value()
                .attr("srcset")
                .and_then(|srcset| srcset.split_whitespace().next())
                .unwrap_or("")
                .to_string(),
        }
    }

    /// The last text token on the row that looks like `m:ss`/`mm:ss`.
    ///
    /// Scanning backwards skips numeric-looking text earlier in the row such as
    /// play counts or dates.
    fn extract_duration(&self, row: &ElementRef) -> String {
        row.text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .find(|t| self.duration_pattern.is_match(t))
            .map(str::to_string)
            .unwrap_or_else(|| UNKNOWN_DURATION.to_string())
    }
}
