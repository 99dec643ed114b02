//! Scroll-driven collection of a virtualized track list.
//!
//! The page only keeps a window of rows mounted at any time. The collector
//! repeatedly samples whatever is mounted, folds new rows into a
//! [`TrackAccumulator`], and scrolls the last mounted row into view so the
//! page mounts the next ones. It stops once the declared track count is
//! reached or when a fixed number of consecutive rounds add nothing.

use crate::accumulator::TrackAccumulator;
use crate::config::CollectorConfig;
use crate::debug::save_debug_page;
use crate::parsing::PlaylistParser;
use crate::session::{RenderSession, SessionLauncher};
use crate::{Result, ScrapeError, Track};
use scraper::{Html, Selector};
use std::path::PathBuf;

/// States of one collection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CollectorState {
    Start,
    Sample,
    CheckCompletion,
    Advance,
    StagnationCheck,
    Finish,
}

/// Why a collection run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// At least the declared number of tracks was collected
    DeclaredCountReached,
    /// Too many consecutive rounds without a new track
    Stagnated,
}

/// The outcome of one collection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    /// Tracks in first-seen order, indexed from 1
    pub tracks: Vec<Track>,
    /// Number of sampling rounds performed
    pub rounds: u32,
    /// Rows that could not be parsed, summed over all rounds
    pub skipped_rows: usize,
    pub stop_reason: StopReason,
}

/// Mutable bookkeeping for a single run; never shared between runs.
struct RunState {
    accumulator: TrackAccumulator,
    no_change_streak: u32,
    last_size: usize,
    rounds: u32,
    skipped_rows: usize,
    stop_reason: StopReason,
    last_markup: Option<String>,
}

impl RunState {
    fn new() -> Self {
        Self {
            accumulator: TrackAccumulator::new(),
            no_change_streak: 0,
            last_size: 0,
            rounds: 0,
            skipped_rows: 0,
            stop_reason: StopReason::Stagnated,
            last_markup: None,
        }
    }
}

/// Collects every row of a virtualized track list through a rendering session.
#[derive(Debug, Clone)]
pub struct ScrollCollector {
    config: CollectorConfig,
    rows: Selector,
    parser: PlaylistParser,
    debug_dir: Option<PathBuf>,
}

impl ScrollCollector {
    /// Create a collector, validating the configured row selector.
    pub fn new(config: CollectorConfig) -> Result<Self> {
        let rows = Selector::parse(&config.row_selector).map_err(|e| {
            ScrapeError::Config(format!("Invalid row selector '{}': {e}", config.row_selector))
        })?;

        Ok(Self {
            config,
            rows,
            parser: PlaylistParser::new(),
            debug_dir: None,
        })
    }

    /// Save the last sampled markup under `dir` when a run finishes.
    pub fn with_debug_dir(mut self, dir: PathBuf) -> Self {
        self.debug_dir = Some(dir);
        self
    }

    /// Collect the track list at `url` in a fresh session from `launcher`.
    ///
    /// `expected` is the declared track count, if any. It ends the run early
    /// once reached and caps the result, but never pads it. The session is
    /// closed before this returns, whether the run succeeded or not.
    pub async fn collect(
        &self,
        launcher: &dyn SessionLauncher,
        url: &str,
        expected: Option<u32>,
    ) -> Result<Collection> {
        let mut session = launcher.launch().await?;

        let outcome = self.run(session.as_mut(), url, expected).await;
        let closed = session.close().await;

        match (outcome, closed) {
            (Ok(collection), Ok(())) => Ok(collection),
            (Ok(collection), Err(e)) => {
                log::warn!("Failed to close rendering session: {e}");
                Ok(collection)
            }
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(close_error)) => {
                log::warn!("Failed to close rendering session after error: {close_error}");
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        session: &mut dyn RenderSession,
        url: &str,
        expected: Option<u32>,
    ) -> Result<Collection> {
        // A declared count of zero carries no information.
        let expected = expected.filter(|&n| n > 0).map(|n| n as usize);
        let mut run = RunState::new();
        let mut state = CollectorState::Start;

        while state != CollectorState::Finish {
            state = match state {
                CollectorState::Start => {
                    session.navigate(url).await?;
                    session.wait(self.config.initial_settle).await?;
                    CollectorState::Sample
                }
                CollectorState::Sample => {
                    self.sample(session, &mut run).await?;
                    CollectorState::CheckCompletion
                }
                CollectorState::CheckCompletion => match expected {
                    Some(count) if run.accumulator.len() >= count => {
                        run.stop_reason = StopReason::DeclaredCountReached;
                        CollectorState::Finish
                    }
                    _ => CollectorState::Advance,
                },
                CollectorState::Advance => {
                    self.advance(session).await?;
                    CollectorState::StagnationCheck
                }
                CollectorState::StagnationCheck => {
                    let size = run.accumulator.len();
                    if size == run.last_size {
                        run.no_change_streak += 1;
                    } else {
                        run.no_change_streak = 0;
                        run.last_size = size;
                    }

                    if run.no_change_streak >= self.config.stagnation_threshold {
                        run.stop_reason = StopReason::Stagnated;
                        CollectorState::Finish
                    } else {
                        CollectorState::Sample
                    }
                }
                CollectorState::Finish => CollectorState::Finish,
            };
        }

        if let (Some(dir), Some(markup)) = (&self.debug_dir, &run.last_markup) {
            save_debug_page(dir, "rendered", url, markup);
        }

        let collected = run.accumulator.len();
        if let Some(count) = expected {
            if run.stop_reason == StopReason::Stagnated {
                log::warn!(
                    "Stopped after {} rounds with {collected} of {count} declared tracks",
                    run.rounds
                );
            }
        }

        let tracks = run.accumulator.finish(expected);
        log::info!(
            "Collected {} tracks in {} rounds ({:?})",
            tracks.len(),
            run.rounds,
            run.stop_reason
        );

        Ok(Collection {
            tracks,
            rounds: run.rounds,
            skipped_rows: run.skipped_rows,
            stop_reason: run.stop_reason,
        })
    }

    /// Parse the currently mounted rows and keep the ones not seen before.
    async fn sample(&self, session: &mut dyn RenderSession, run: &mut RunState) -> Result<()> {
        let markup = session.page_source().await?;
        run.rounds += 1;

        let document = Html::parse_document(&markup);
        let mut added = 0;
        let mut skipped = 0;
        for row in self.parser.parse_rows(&document, &self.rows) {
            match row {
                Ok(row) => {
                    if run.accumulator.insert(row) {
                        added += 1;
                    }
                }
                Err(e) => {
                    log::trace!("Skipping row: {e}");
                    skipped += 1;
                }
            }
        }
        run.skipped_rows += skipped;

        log::debug!(
            "Round {}: {added} new, {skipped} skipped, {} total",
            run.rounds,
            run.accumulator.len()
        );

        if self.debug_dir.is_some() {
            run.last_markup = Some(markup);
        }
        Ok(())
    }

    /// Scroll the last mounted row into view so the list mounts the next ones.
    async fn advance(&self, session: &mut dyn RenderSession) -> Result<()> {
        let mounted = session.count_elements(&self.config.row_selector).await?;
        if mounted > 0 {
            session
                .scroll_into_view(&self.config.row_selector, mounted - 1)
                .await?;
            session.wait(self.config.advance_settle).await
        } else {
            session.wait(self.config.idle_settle).await
        }
    }
}
