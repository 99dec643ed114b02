//! Rendering-session driver abstraction.
//!
//! The collector never talks to a browser directly. It drives a
//! [`RenderSession`] obtained from a [`SessionLauncher`], so any engine that
//! can navigate, hand back its current markup and scroll an element into view
//! can back a scrape.

use crate::Result;
use async_trait::async_trait;
use std::time::Duration;

/// One live rendering session (a browser tab or equivalent).
///
/// A session is owned by exactly one collection run and must be closed by it
/// on every exit path. Sessions move between worker threads with the scrape
/// that owns them.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait RenderSession: Send {
    /// Load `url` in the session.
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// The markup as currently rendered, including client-side mounted rows.
    async fn page_source(&mut self) -> Result<String>;

    /// Number of elements currently matching `selector`.
    async fn count_elements(&mut self, selector: &str) -> Result<usize>;

    /// Scroll the `index`-th element matching `selector` into view.
    async fn scroll_into_view(&mut self, selector: &str, index: usize) -> Result<()>;

    /// Let the page settle for `duration`.
    async fn wait(&mut self, duration: Duration) -> Result<()> {
        tokio::time::sleep(duration).await;
        Ok(())
    }

    /// Release the session and everything it holds.
    async fn close(&mut self) -> Result<()>;
}

/// Opens fresh rendering sessions.
///
/// One launcher is shared by every scrape a [`PlaylistScraper`](crate::PlaylistScraper)
/// runs, including concurrent ones.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn RenderSession>>;
}
