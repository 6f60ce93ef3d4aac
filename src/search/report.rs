//! Attempt results, search parameters, and best-so-far bookkeeping shared by
//! every strategy.

use tracing::{info, trace, warn};

use crate::error::InvalidCutoff;
use crate::models::{Room, SplitOutcome};

/// Result of one successful attempt: score and start letters in room order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    /// Sum of squared start-letter lengths.
    pub score: u32,
    /// One start letter per room.
    pub start_letters: Vec<String>,
}

impl Attempt {
    /// Creates an attempt result.
    pub fn new(score: u32, start_letters: Vec<String>) -> Self {
        Self {
            score,
            start_letters,
        }
    }

    /// Appends another attempt covering the rooms that follow this one.
    pub fn join(mut self, other: Attempt) -> Self {
        self.score += other.score;
        self.start_letters.extend(other.start_letters);
        self
    }
}

/// Limits shared by the search strategies.
///
/// # Examples
///
/// ```
/// use u_seating::search::SearchParams;
///
/// let params = SearchParams::new(500, 4).with_max_ratio(0.45);
/// assert_eq!(params.max_tries, 500);
/// assert_eq!(params.best_score, 4);
/// assert_eq!(params.max_ratio, 0.45);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    /// Maximum number of attempts (randomized strategies).
    pub max_tries: usize,
    /// Stop as soon as an attempt scores at or below this.
    pub best_score: u32,
    /// Maximum occupancy ratio for any room (bisection only).
    pub max_ratio: f64,
}

impl SearchParams {
    /// Creates parameters with a maximum occupancy ratio of 0.5.
    pub fn new(max_tries: usize, best_score: u32) -> Self {
        Self {
            max_tries,
            best_score,
            max_ratio: 0.5,
        }
    }

    /// Sets the maximum occupancy ratio.
    pub fn with_max_ratio(mut self, max_ratio: f64) -> Self {
        self.max_ratio = max_ratio;
        self
    }
}

/// What a search strategy produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    /// Best split found, if any attempt succeeded.
    pub best: Option<SplitOutcome>,
    /// Attempts made (successful or not).
    pub attempts: usize,
    /// Attempts that produced a valid split.
    pub successes: usize,
    /// `true` if the search stopped because of a cancellation request.
    pub interrupted: bool,
}

impl SearchReport {
    /// Fraction of attempts that succeeded (0 when nothing was tried).
    pub fn success_ratio(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.successes as f64 / self.attempts as f64
        }
    }
}

/// Keeps the best outcome across attempts.
#[derive(Debug, Default)]
pub(crate) struct BestTracker {
    best: Option<SplitOutcome>,
    attempts: usize,
    successes: usize,
}

impl BestTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn attempts(&self) -> usize {
        self.attempts
    }

    /// Records a failed attempt.
    pub(crate) fn failure(&mut self, err: &InvalidCutoff) {
        self.attempts += 1;
        trace!(attempt = self.attempts, %err, "attempt failed");
    }

    /// Records a successful attempt for `rooms` (in band order) and returns
    /// its score. Only a strictly better score replaces the current best.
    pub(crate) fn success(&mut self, attempt: Attempt, rooms: &[Room]) -> u32 {
        self.attempts += 1;
        self.successes += 1;
        let score = attempt.score;
        let improved = self.best.as_ref().map_or(true, |b| score < b.score());
        if improved {
            trace!(attempt = self.attempts, score, "new best split");
            self.best = Some(SplitOutcome::new(
                score,
                rooms.to_vec(),
                attempt.start_letters,
            ));
        }
        score
    }

    pub(crate) fn finish(self, strategy: &str, interrupted: bool) -> SearchReport {
        if interrupted {
            warn!(strategy, attempts = self.attempts, "search interrupted");
        }
        info!(
            strategy,
            attempts = self.attempts,
            successes = self.successes,
            best_score = self.best.as_ref().map(SplitOutcome::score),
            "search finished"
        );
        SearchReport {
            best: self.best,
            attempts: self.attempts,
            successes: self.successes,
            interrupted,
        }
    }
}
