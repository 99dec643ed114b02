use crate::collector::ScrollCollector;
use crate::duration::{format_total, parse_duration};
use crate::metadata::MetadataFetcher;
use crate::r#trait::PlaylistScrapeClient;
use crate::session::SessionLauncher;
use crate::{PlaylistMetadata, PlaylistResult, Result, ScraperConfig, Track};
use async_trait::async_trait;
use http_client::HttpClient;

/// Main entry point for scraping a playlist page.
///
/// A scrape fetches the static page once for playlist metadata, then opens a
/// rendering session to collect the full track list. It either returns a
/// complete [`PlaylistResult`] or fails; there are no partial results.
///
/// The scraper is `Send + Sync` and its futures are `Send`, so one instance
/// can serve several scrapes spawned onto a multi-threaded runtime. Each
/// scrape opens its own rendering session.
///
/// # Examples
///
/// ```rust,no_run
/// use playlist_scrape::{PlaylistScraper, Result, ScraperConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<()> {
///     let http_client = http_client::native::NativeClient::new();
///     let scraper = PlaylistScraper::with_chrome(Box::new(http_client), ScraperConfig::from_env())?;
///
///     let result = scraper
///         .scrape_playlist("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M")
///         .await?;
///
///     println!("{result}");
///     for track in result.track_range(1, 10) {
///         println!("{track}");
///     }
///     Ok(())
/// }
/// ```
pub struct PlaylistScraper {
    fetcher: MetadataFetcher,
    collector: ScrollCollector,
    launcher: Box<dyn SessionLauncher>,
}

impl PlaylistScraper {
    /// Create a scraper from an HTTP client and a rendering session launcher.
    ///
    /// # Arguments
    ///
    /// * `client` - Any HTTP client implementation that implements [`HttpClient`]
    /// * `launcher` - Opens the rendering session used for track collection
    /// * `config` - Collection timing, selector and debug settings
    pub fn new(
        client: Box<dyn HttpClient>,
        launcher: Box<dyn SessionLauncher>,
        config: ScraperConfig,
    ) -> Result<Self> {
        let mut fetcher = MetadataFetcher::new(client);
        let mut collector = ScrollCollector::new(config.collector)?;
        if config.debug_save_responses {
            fetcher = fetcher.with_debug_dir(config.debug_dir.clone());
            collector = collector.with_debug_dir(config.debug_dir);
        }

        Ok(Self {
            fetcher,
            collector,
            launcher,
        })
    }

    /// Create a scraper that renders pages in headless Chrome.
    #[cfg(feature = "chrome")]
    pub fn with_chrome(client: Box<dyn HttpClient>, config: ScraperConfig) -> Result<Self> {
        let launcher = crate::chrome::ChromeLauncher::new(config.headless);
        Self::new(client, Box::new(launcher), config)
    }

    /// Scrape the playlist at `url`.
    ///
    /// Fails without opening a rendering session when the metadata fetch
    /// fails. Session errors are reported after the session has been closed.
    pub async fn scrape_playlist(&self, url: &str) -> Result<PlaylistResult> {
        log::info!("Starting scrape for {url}");

        let metadata = self.fetcher.fetch(url).await?;
        log::info!("Found playlist: {metadata}");

        let collection = self
            .collector
            .collect(self.launcher.as_ref(), url, metadata.declared_track_count)
            .await?;
        if collection.skipped_rows > 0 {
            log::debug!("Skipped {} unparseable rows", collection.skipped_rows);
        }

        let result = assemble_result(metadata, collection.tracks);
        log::info!("Scrape complete: {result}");
        Ok(result)
    }
}

#[async_trait]
impl PlaylistScrapeClient for PlaylistScraper {
    async fn scrape_playlist(&self, url: &str) -> Result<PlaylistResult> {
        PlaylistScraper::scrape_playlist(self, url).await
    }
}

/// Combine metadata and collected tracks into the final result.
pub fn assemble_result(metadata: PlaylistMetadata, tracks: Vec<Track>) -> PlaylistResult {
    let total_duration_seconds: u64 = tracks.iter().map(|t| parse_duration(&t.duration)).sum();

    PlaylistResult {
        title: metadata.title,
        description: metadata.description,
        image_url: metadata.image_url,
        owner: metadata.owner,
        declared_track_count: metadata.declared_track_count,
        source_url: metadata.source_url,
        scraped_track_count: tracks.len() as u32,
        total_duration_seconds,
        total_duration_text: format_total(total_duration_seconds),
        scraped_at: chrono::Utc::now(),
        tracks,
    }
}
