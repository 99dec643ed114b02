use crate::debug::save_debug_page;
use crate::headers::add_page_headers;
use crate::parsing::PlaylistParser;
use crate::{PlaylistMetadata, Result, ScrapeError};
use http_client::{HttpClient, Request};
use http_types::{Method, Url};
use scraper::Html;
use std::path::PathBuf;
use std::time::Duration;

/// Upper bound for the single metadata request
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches a playlist page once and reads its playlist-level metadata.
///
/// There is no retry: any transport error, non-success status or missing
/// title fails the fetch.
///
/// ```rust,no_run
/// # use playlist_scrape::MetadataFetcher;
/// # tokio_test::block_on(async {
/// let fetcher = MetadataFetcher::new(Box::new(http_client::native::NativeClient::new()));
/// let meta = fetcher.fetch("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M").await?;
/// println!("{} ({:?} tracks)", meta.title, meta.declared_track_count);
/// # Ok::<(), playlist_scrape::ScrapeError>(())
/// # });
/// ```
pub struct MetadataFetcher {
    client: Box<dyn HttpClient>,
    parser: PlaylistParser,
    debug_dir: Option<PathBuf>,
}

impl MetadataFetcher {
    pub fn new(client: Box<dyn HttpClient>) -> Self {
        Self {
            client,
            parser: PlaylistParser::new(),
            debug_dir: None,
        }
    }

    /// Save every fetched page under `dir`.
    pub fn with_debug_dir(mut self, dir: PathBuf) -> Self {
        self.debug_dir = Some(dir);
        self
    }

    /// Fetch `url` and parse its metadata.
    pub async fn fetch(&self, url: &str) -> Result<PlaylistMetadata> {
        let body = self.fetch_page(url).await?;
        let document = Html::parse_document(&body);
        self.parser.parse_metadata(&document, url)
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        let parsed = url
            .parse::<Url>()
            .map_err(|e| ScrapeError::InvalidUrl(format!("{url}: {e}")))?;

        let mut request = Request::new(Method::Get, parsed);
        add_page_headers(&mut request);

        log::debug!("Fetching playlist page {url}");
        let mut response = tokio::time::timeout(FETCH_TIMEOUT, self.client.send(request))
            .await
            .map_err(|_| ScrapeError::Http(format!("Request to {url} timed out")))?
            .map_err(|e| ScrapeError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            log::debug!("Metadata request for {url} returned {status}");
            return Err(ScrapeError::Status(status.into()));
        }

        let body = response
            .body_string()
            .await
            .map_err(|e| ScrapeError::Http(e.to_string()))?;

        if let Some(dir) = &self.debug_dir {
            save_debug_page(dir, "metadata", url, &body);
        }

        Ok(body)
    }
}
