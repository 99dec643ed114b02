use std::path::PathBuf;
use std::time::Duration;

/// Rows of the playlist track list in the rendered page
pub const DEFAULT_ROW_SELECTOR: &str = r#"div[data-testid="tracklist-row"]"#;

/// Configuration for the scroll-driven track collection
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// CSS selector matching one rendered track row
    pub row_selector: String,
    /// Wait after navigation before the first sample
    pub initial_settle: Duration,
    /// Wait after scrolling a row into view
    pub advance_settle: Duration,
    /// Wait when there was no row to scroll to
    pub idle_settle: Duration,
    /// Consecutive rounds without new tracks before giving up
    pub stagnation_threshold: u32,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            row_selector: DEFAULT_ROW_SELECTOR.to_string(),
            initial_settle: Duration::from_secs(3),
            advance_settle: Duration::from_millis(1500),
            idle_settle: Duration::from_secs(1),
            stagnation_threshold: 15,
        }
    }
}

/// Configuration for a [`PlaylistScraper`](crate::PlaylistScraper)
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub collector: CollectorConfig,
    /// Run the browser without a window
    pub headless: bool,
    /// Save fetched and rendered pages to `debug_dir`
    pub debug_save_responses: bool,
    pub debug_dir: PathBuf,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            collector: CollectorConfig::default(),
            headless: true,
            debug_save_responses: false,
            debug_dir: PathBuf::from("debug_responses"),
        }
    }
}

/// Any value other than `0`, `false` or `no` turns a flag on.
fn flag_enabled(value: &str) -> bool {
    !matches!(value.trim().to_lowercase().as_str(), "0" | "false" | "no")
}

impl ScraperConfig {
    /// Defaults overridden by `PLAYLIST_SCRAPE_*` environment variables.
    ///
    /// - `PLAYLIST_SCRAPE_HEADLESS=0|false` shows the browser window
    /// - `PLAYLIST_SCRAPE_DEBUG_SAVE_RESPONSES` enables debug dumps unless `0|false|no`
    /// - `PLAYLIST_SCRAPE_DEBUG_DIR` changes where they go
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(value) = lookup("PLAYLIST_SCRAPE_HEADLESS") {
            config.headless = flag_enabled(&value);
        }
        if let Some(value) = lookup("PLAYLIST_SCRAPE_DEBUG_SAVE_RESPONSES") {
            config.debug_save_responses = flag_enabled(&value);
        }
        if let Some(dir) = lookup("PLAYLIST_SCRAPE_DEBUG_DIR") {
            config.debug_dir = PathBuf::from(dir);
        }

        config
    }
}
