//! Headless Chrome backed rendering sessions.
//!
//! Calls into the DevTools connection block until Chrome answers, so each one
//! runs on tokio's blocking pool rather than on an async worker.

use crate::session::{RenderSession, SessionLauncher};
use crate::{Result, ScrapeError};
use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::sync::Arc;

const WINDOW_SIZE: (u32, u32) = (1920, 1080);

const CHROME_ARGS: &[&str] = &[
    "--no-sandbox",
    "--disable-dev-shm-usage",
    "--disable-blink-features=AutomationControlled",
    "--log-level=3",
];

fn session_error(context: &str, e: impl std::fmt::Display) -> ScrapeError {
    ScrapeError::Session(format!("{context}: {e}"))
}

/// Run a blocking DevTools call on the blocking thread pool.
async fn blocking<T, F>(context: &'static str, call: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(call)
        .await
        .map_err(|e| session_error(context, e))?
}

fn launch_browser(headless: bool) -> Result<(Browser, Arc<Tab>)> {
    let args: Vec<&OsStr> = CHROME_ARGS.iter().map(OsStr::new).collect();
    let options = LaunchOptions::default_builder()
        .headless(headless)
        .window_size(Some(WINDOW_SIZE))
        .args(args)
        .build()
        .map_err(|e| session_error("Invalid launch options", e))?;

    let browser = Browser::new(options).map_err(|e| session_error("Failed to launch Chrome", e))?;
    let tab = browser
        .new_tab()
        .map_err(|e| session_error("Failed to open tab", e))?;
    Ok((browser, tab))
}

/// Launches one Chrome process per session.
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    headless: bool,
}

impl ChromeLauncher {
    pub fn new(headless: bool) -> Self {
        Self { headless }
    }
}

#[async_trait]
impl SessionLauncher for ChromeLauncher {
    async fn launch(&self) -> Result<Box<dyn RenderSession>> {
        let headless = self.headless;
        log::debug!("Launching Chrome (headless: {headless})");
        let (browser, tab) =
            blocking("Chrome launch aborted", move || launch_browser(headless)).await?;

        Ok(Box::new(ChromeSession {
            browser: Some(browser),
            tab,
        }))
    }
}

/// A single Chrome tab driven over the DevTools protocol.
pub struct ChromeSession {
    browser: Option<Browser>,
    tab: Arc<Tab>,
}

impl ChromeSession {
    fn open_tab(&self) -> Result<Arc<Tab>> {
        if self.browser.is_none() {
            return Err(ScrapeError::Session("Session already closed".to_string()));
        }
        Ok(Arc::clone(&self.tab))
    }

    async fn evaluate(&self, expression: String) -> Result<Option<serde_json::Value>> {
        let tab = self.open_tab()?;
        blocking("Script evaluation aborted", move || {
            let remote = tab
                .evaluate(&expression, false)
                .map_err(|e| session_error("Script evaluation failed", e))?;
            Ok(remote.value)
        })
        .await
    }

    /// `document.querySelectorAll(<selector>)` with the selector as a JS string literal.
    fn query_all(selector: &str) -> Result<String> {
        Ok(format!(
            "document.querySelectorAll({})",
            serde_json::to_string(selector)?
        ))
    }
}

#[async_trait]
impl RenderSession for ChromeSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        log::debug!("Navigating to {url}");
        let tab = self.open_tab()?;
        let url = url.to_string();
        blocking("Navigation aborted", move || {
            tab.navigate_to(&url)
                .map_err(|e| session_error("Navigation failed", e))?
                .wait_until_navigated()
                .map_err(|e| session_error("Navigation did not complete", e))?;
            Ok(())
        })
        .await
    }

    async fn page_source(&mut self) -> Result<String> {
        let tab = self.open_tab()?;
        blocking("Content read aborted", move || {
            tab.get_content()
                .map_err(|e| session_error("Failed to read page content", e))
        })
        .await
    }

    async fn count_elements(&mut self, selector: &str) -> Result<usize> {
        let expression = format!("{}.length", Self::query_all(selector)?);
        let count = self
            .evaluate(expression)
            .await?
            .and_then(|v| v.as_u64())
            .unwrap_or(0);
        Ok(count as usize)
    }

    async fn scroll_into_view(&mut self, selector: &str, index: usize) -> Result<()> {
        let expression = format!(
            "(() => {{ const el = {}[{index}]; if (el) {{ el.scrollIntoView(true); return true; }} return false; }})()",
            Self::query_all(selector)?
        );
        let scrolled = self
            .evaluate(expression)
            .await?
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        if !scrolled {
            log::debug!("No element {index} for '{selector}' to scroll to");
        }
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        let Some(browser) = self.browser.take() else {
            return Ok(());
        };
        let tab = Arc::clone(&self.tab);
        blocking("Close aborted", move || {
            let closed = tab.close(true);
            // Dropping the browser terminates the Chrome process.
            drop(browser);
            closed
                .map(|_| ())
                .map_err(|e| session_error("Failed to close tab", e))
        })
        .await
    }
}
