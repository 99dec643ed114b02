use crate::{PlaylistResult, Result};
use async_trait::async_trait;

/// The scrape operation as seen by callers such as a web front end.
///
/// Depend on this trait rather than on [`PlaylistScraper`](crate::PlaylistScraper)
/// to substitute a fake in tests.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockPlaylistScrapeClient`
/// that implements this trait using the `mockall` library.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait PlaylistScrapeClient: Send + Sync {
    /// Scrape the playlist at `url` into a complete result.
    async fn scrape_playlist(&self, url: &str) -> Result<PlaylistResult>;
}
