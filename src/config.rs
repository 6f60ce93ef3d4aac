//! Room-split run configuration.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::search::{SearchParams, PERMUTATION_LIMIT};

/// Accepted range for [`SplitConfig::max_tries`].
pub const MAX_TRIES_RANGE: std::ops::RangeInclusive<usize> = 50..=10_000;

/// Which search strategy a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Recursive capacity bisection with randomized restarts.
    #[default]
    Bisection,
    /// Proportional slicing over shuffled room orders.
    Shuffle,
    /// Proportional slicing over every room order.
    Permutations,
}

/// Parameters of a room-split run.
///
/// Every field has a default, so partial JSON documents deserialize.
///
/// # Examples
///
/// ```
/// use u_seating::config::{SplitConfig, Strategy};
///
/// let config = SplitConfig::default()
///     .with_max_tries(200)
///     .with_strategy(Strategy::Shuffle)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.min_ratio, 0.3);
/// assert!(config.commit);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Attempt budget for the randomized strategies.
    pub max_tries: usize,
    /// Lowest acceptable overall occupancy ratio.
    pub min_ratio: f64,
    /// Highest acceptable occupancy ratio, overall and per room.
    pub max_ratio: f64,
    /// Stop once a split scores at or below this; `None` means the room count.
    pub best_score: Option<u32>,
    /// Search strategy.
    pub strategy: Strategy,
    /// Validate the exam without searching.
    pub check_only: bool,
    /// Persist the winning assignment.
    pub commit: bool,
    /// RNG seed for reproducible runs.
    pub seed: Option<u64>,
    /// Maximum room count for [`Strategy::Permutations`].
    pub permutation_limit: usize,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            max_tries: 1000,
            min_ratio: 0.3,
            max_ratio: 0.5,
            best_score: None,
            strategy: Strategy::Bisection,
            check_only: false,
            commit: true,
            seed: None,
            permutation_limit: PERMUTATION_LIMIT,
        }
    }
}

impl SplitConfig {
    /// Sets the attempt budget.
    pub fn with_max_tries(mut self, max_tries: usize) -> Self {
        self.max_tries = max_tries;
        self
    }

    /// Sets the accepted occupancy ratio range.
    pub fn with_ratio_range(mut self, min_ratio: f64, max_ratio: f64) -> Self {
        self.min_ratio = min_ratio;
        self.max_ratio = max_ratio;
        self
    }

    /// Sets the early-exit score threshold.
    pub fn with_best_score(mut self, best_score: u32) -> Self {
        self.best_score = Some(best_score);
        self
    }

    /// Sets the search strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Validate only; no search, nothing persisted.
    pub fn with_check_only(mut self, check_only: bool) -> Self {
        self.check_only = check_only;
        self
    }

    /// Whether to persist the result.
    pub fn with_commit(mut self, commit: bool) -> Self {
        self.commit = commit;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the room limit for exhaustive search.
    pub fn with_permutation_limit(mut self, limit: usize) -> Self {
        self.permutation_limit = limit;
        self
    }

    /// Checks that the parameters are usable.
    ///
    /// # Errors
    ///
    /// [`ValidationError::InvalidConfig`] describing the first bad field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let invalid = |msg: String| Err(ValidationError::InvalidConfig(msg));
        if !MAX_TRIES_RANGE.contains(&self.max_tries) {
            return invalid(format!(
                "max_tries must be between {} and {} (got {})",
                MAX_TRIES_RANGE.start(),
                MAX_TRIES_RANGE.end(),
                self.max_tries
            ));
        }
        for (field, value) in [("min_ratio", self.min_ratio), ("max_ratio", self.max_ratio)] {
            if !value.is_finite() || value <= 0.0 {
                return invalid(format!("{field} must be a positive number (got {value})"));
            }
        }
        if self.min_ratio > self.max_ratio {
            return invalid(format!(
                "min_ratio {} is greater than max_ratio {}",
                self.min_ratio, self.max_ratio
            ));
        }
        if self.best_score == Some(0) {
            return invalid("best_score must be positive".to_string());
        }
        Ok(())
    }

    /// Search limits for a run over `num_rooms` rooms.
    pub fn search_params(&self, num_rooms: usize) -> SearchParams {
        let best_score = self
            .best_score
            .unwrap_or_else(|| u32::try_from(num_rooms).unwrap_or(u32::MAX));
        SearchParams::new(self.max_tries, best_score).with_max_ratio(self.max_ratio)
    }

    /// Parses a configuration from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// [`ValidationError::InvalidConfig`] if the document does not parse.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json).map_err(|e| ValidationError::InvalidConfig(e.to_string()))
    }
}
