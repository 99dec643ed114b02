use thiserror::Error;

/// Error types for playlist scraping.
///
/// A scrape either fully succeeds or fails with one of these variants; no layer
/// retries on its own, so the caller decides whether to try again.
///
/// # Error Handling Examples
///
/// ```rust,no_run
/// use playlist_scrape::{PlaylistScraper, ScrapeError, ScraperConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), ScrapeError> {
///     let http_client = http_client::native::NativeClient::new();
///     let scraper = PlaylistScraper::with_chrome(Box::new(http_client), ScraperConfig::default())?;
///
///     match scraper.scrape_playlist("https://open.spotify.com/playlist/xyz").await {
///         Ok(result) => println!("{} tracks", result.scraped_track_count),
///         Err(e) if e.is_fetch_failure() => eprintln!("Could not fetch metadata: {}", e),
///         Err(ScrapeError::Session(msg)) => eprintln!("Browser session failed: {}", msg),
///         Err(e) => eprintln!("Other error: {}", e),
///     }
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// HTTP/network related errors on the metadata request.
    ///
    /// This includes connection failures, timeouts, DNS errors, and other
    /// low-level networking issues.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The metadata request completed with a non-success status code.
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// The fetched page carried no social title meta tag.
    ///
    /// The title is the one mandatory playlist field, so the whole fetch is
    /// treated as failed.
    #[error("Playlist title not found in page metadata")]
    MissingTitle,

    /// The playlist URL could not be turned into a request.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The rendering session failed during launch, navigation, sampling or scrolling.
    #[error("Rendering session error: {0}")]
    Session(String),

    /// The scraper was configured with an unusable value, such as a row
    /// selector that is not valid CSS.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A single rendered row could not be parsed.
    ///
    /// The collector skips these rows; this variant never aborts a scrape.
    #[error("Failed to parse row: {0}")]
    Parse(String),

    /// File system I/O errors.
    ///
    /// This can occur when saving debug responses or writing exported results.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization of the result failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    /// Whether this error means the static metadata fetch failed.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            ScrapeError::Http(_) | ScrapeError::Status(_) | ScrapeError::MissingTitle
        )
    }
}
