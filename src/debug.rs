//! Optional dumps of fetched and rendered pages for diagnosing selector drift.

use crate::Result;
use std::fs;
use std::path::Path;

/// Save `body` under `dir`, logging instead of failing.
pub fn save_debug_page(dir: &Path, label: &str, url: &str, body: &str) {
    if let Err(e) = try_save_debug_page(dir, label, url, body) {
        log::warn!("Failed to save debug page: {e}");
    }
}

fn try_save_debug_page(dir: &Path, label: &str, url: &str, body: &str) -> Result<()> {
    fs::create_dir_all(dir)?;

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S_%3f");
    let file_path = dir.join(format!("{timestamp}_{label}_{}.html", safe_name(url)));

    fs::write(&file_path, body)?;
    log::debug!("Saved {label} page for {url} to {file_path:?}");
    Ok(())
}

/// The URL path with separators replaced, safe to use in a file name.
fn safe_name(url: &str) -> String {
    let path = url.split_once("://").map_or(url, |(_, rest)| rest);
    path.replace(['/', '?', '&', '=', '%', '+', ':', '#'], "_")
}
