#![allow(dead_code)]
use async_trait::async_trait;
use http_client::{HttpClient, Request};
use http_types::{Error, Response, StatusCode};
use playlist_scrape::{RenderSession, Result, ScrapeError, SessionLauncher};
use scraper::{Html, Selector};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const PLAYLIST_URL: &str = "https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M";

// ================================================================================================
// HTML BUILDERS
// ================================================================================================

/// One rendered track row in the web player's markup.
pub fn row(title: &str, artist: &str, duration: &str) -> String {
    format!(
        r#"<div data-testid="tracklist-row" role="row">
            <div role="gridcell"><span>1</span></div>
            <div role="gridcell">
                <img src="https://i.scdn.co/image/{title}">
                <div dir="auto">{title}</div>
                <span><a href="/artist/{artist}">{artist}</a></span>
            </div>
            <div role="gridcell"><a href="/album/{title}">{title} (Single)</a></div>
            <div role="gridcell"><span>{duration}</span></div>
        </div>"#
    )
}

/// A row the virtualized list mounted before its content arrived.
pub fn placeholder_row() -> String {
    r#"<div data-testid="tracklist-row" role="row"><div role="gridcell"></div></div>"#.to_string()
}

pub fn page(rows: &[String]) -> String {
    format!(
        r#"<html><body><div data-testid="playlist-tracklist">{}</div></body></html>"#,
        rows.concat()
    )
}

/// A page whose window shows `Song {i}` for each `i` in `indices`.
pub fn window(indices: impl IntoIterator<Item = u32>) -> String {
    let rows: Vec<String> = indices
        .into_iter()
        .map(|i| row(&format!("Song {i}"), &format!("Artist {i}"), "3:00"))
        .collect();
    page(&rows)
}

pub fn metadata_page(title: &str, description: &str) -> String {
    format!(
        r#"<html><head>
            <meta property="og:title" content="{title}">
            <meta property="og:description" content="{description}">
            <meta property="og:image" content="https://i.scdn.co/image/playlist-cover">
        </head><body></body></html>"#
    )
}

// ================================================================================================
// FAKE HTTP CLIENT
// ================================================================================================

/// Serves one canned response for every request.
#[derive(Debug, Clone)]
pub struct FakeHttpClient {
    status: u16,
    body: String,
    fail: bool,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl FakeHttpClient {
    pub fn ok(body: String) -> Self {
        Self::with_status(200, body)
    }

    pub fn with_status(status: u16, body: String) -> Self {
        Self {
            status,
            body,
            fail: false,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::ok(String::new())
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpClient for FakeHttpClient {
    async fn send(&self, req: Request) -> std::result::Result<Response, Error> {
        self.requests.lock().unwrap().push(req.url().to_string());

        if self.fail {
            return Err(Error::from_str(
                StatusCode::BadGateway,
                "connection refused",
            ));
        }

        let mut response = Response::new(StatusCode::try_from(self.status).unwrap());
        response.set_body(self.body.clone());
        Ok(response)
    }
}

// ================================================================================================
// SCRIPTED RENDERING SESSION
// ================================================================================================

/// Where a scripted session should raise an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    Navigate,
    /// The n-th page sample (1-based)
    Sample(u32),
    /// The n-th scroll (1-based)
    Scroll(u32),
}

/// Everything a scripted session was asked to do.
#[derive(Debug, Default)]
pub struct SessionLog {
    pub launches: u32,
    pub navigations: Vec<String>,
    pub samples: u32,
    pub scrolls: Vec<usize>,
    pub waits: Vec<Duration>,
    pub closes: u32,
}

/// Launches sessions that replay a fixed sequence of rendered pages.
///
/// The n-th sample returns the n-th page; once the script runs out the last
/// page is repeated, as a list that has reached its end would be.
#[derive(Clone)]
pub struct ScriptedLauncher {
    pages: Vec<String>,
    fail: Option<FailPoint>,
    fail_launch: bool,
    pub log: Arc<Mutex<SessionLog>>,
}

impl ScriptedLauncher {
    pub fn new(pages: Vec<String>) -> Self {
        Self {
            pages,
            fail: None,
            fail_launch: false,
            log: Arc::new(Mutex::new(SessionLog::default())),
        }
    }

    pub fn failing_at(mut self, point: FailPoint) -> Self {
        self.fail = Some(point);
        self
    }

    pub fn failing_launch(mut self) -> Self {
        self.fail_launch = true;
        self
    }
}

#[async_trait]
impl SessionLauncher for ScriptedLauncher {
    async fn launch(&self) -> Result<Box<dyn RenderSession>> {
        self.log.lock().unwrap().launches += 1;
        if self.fail_launch {
            return Err(ScrapeError::Session("browser binary not found".to_string()));
        }
        Ok(Box::new(ScriptedSession {
            pages: self.pages.clone(),
            fail: self.fail,
            samples: 0,
            log: Arc::clone(&self.log),
        }))
    }
}

pub struct ScriptedSession {
    pages: Vec<String>,
    fail: Option<FailPoint>,
    /// Samples taken by this session; the shared log counts across sessions
    samples: u32,
    log: Arc<Mutex<SessionLog>>,
}

impl ScriptedSession {
    fn current_page(&self) -> String {
        let shown = self.samples.max(1) as usize;
        self.pages
            .get(shown - 1)
            .or_else(|| self.pages.last())
            .cloned()
            .unwrap_or_else(|| page(&[]))
    }
}

#[async_trait]
impl RenderSession for ScriptedSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        if self.fail == Some(FailPoint::Navigate) {
            return Err(ScrapeError::Session("navigation timed out".to_string()));
        }
        self.log.lock().unwrap().navigations.push(url.to_string());
        Ok(())
    }

    async fn page_source(&mut self) -> Result<String> {
        self.samples += 1;
        self.log.lock().unwrap().samples += 1;
        if self.fail == Some(FailPoint::Sample(self.samples)) {
            return Err(ScrapeError::Session("target crashed".to_string()));
        }
        Ok(self.current_page())
    }

    async fn count_elements(&mut self, selector: &str) -> Result<usize> {
        let selector = Selector::parse(selector).unwrap();
        let document = Html::parse_document(&self.current_page());
        let count = document.select(&selector).count();
        Ok(count)
    }

    async fn scroll_into_view(&mut self, _selector: &str, index: usize) -> Result<()> {
        let scroll = {
            let mut log = self.log.lock().unwrap();
            log.scrolls.push(index);
            log.scrolls.len() as u32
        };
        if self.fail == Some(FailPoint::Scroll(scroll)) {
            return Err(ScrapeError::Session("element detached".to_string()));
        }
        Ok(())
    }

    async fn wait(&mut self, duration: Duration) -> Result<()> {
        self.log.lock().unwrap().waits.push(duration);
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.log.lock().unwrap().closes += 1;
        Ok(())
    }
}
