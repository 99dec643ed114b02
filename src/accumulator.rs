use crate::types::{Track, TrackKey, TrackRow};
use std::collections::HashSet;

/// Insertion-ordered set of tracks keyed by `(title, artists)`.
///
/// Rows seen again at a later scroll position are ignored, so re-sampling an
/// overlapping window never changes what has already been collected.
#[derive(Debug, Default)]
pub struct TrackAccumulator {
    seen: HashSet<TrackKey>,
    rows: Vec<TrackRow>,
}

impl TrackAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `row` unless a track with the same key is already present.
    ///
    /// Returns whether the row was new.
    pub fn insert(&mut self, row: TrackRow) -> bool {
        if !self.seen.insert(row.key()) {
            return false;
        }
        self.rows.push(row);
        true
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number the tracks 1.. in first-seen order, keeping at most `limit`.
    pub fn finish(self, limit: Option<usize>) -> Vec<Track> {
        let keep = limit.unwrap_or(usize::MAX);
        self.rows
            .into_iter()
            .take(keep)
            .zip(1..)
            .map(|(row, index)| row.into_track(index))
            .collect()
    }
}
