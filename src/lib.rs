//! Scrape a music-streaming playlist page into structured metadata.
//!
//! Playlist-level fields come from one static fetch of the page's meta tags.
//! The track list is rendered client-side as a virtualized list, so it is
//! collected by scrolling a rendering session and sampling the mounted rows
//! until the declared track count is reached or the list stops growing.

pub mod accumulator;
#[cfg(feature = "chrome")]
pub mod chrome;
pub mod client;
pub mod collector;
pub mod config;
pub mod debug;
pub mod duration;
pub mod error;
pub mod headers;
pub mod metadata;
pub mod parsing;
pub mod session;
pub mod r#trait;
pub mod types;

pub use accumulator::TrackAccumulator;
#[cfg(feature = "chrome")]
pub use chrome::{ChromeLauncher, ChromeSession};
pub use client::{assemble_result, PlaylistScraper};
pub use collector::{Collection, ScrollCollector, StopReason};
pub use config::{CollectorConfig, ScraperConfig};
pub use duration::{format_total, parse_duration};
pub use error::ScrapeError;
pub use metadata::MetadataFetcher;
pub use parsing::PlaylistParser;
pub use r#trait::PlaylistScrapeClient;
pub use session::{RenderSession, SessionLauncher};
pub use types::{PlaylistMetadata, PlaylistResult, Track, TrackColumn, TrackRow};

#[cfg(feature = "mock")]
pub use r#trait::MockPlaylistScrapeClient;
#[cfg(feature = "mock")]
pub use session::{MockRenderSession, MockSessionLauncher};

pub type Result<T> = std::result::Result<T, ScrapeError>;
