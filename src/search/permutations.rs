//! Exhaustive search over every room ordering.
//!
//! # Algorithm
//!
//! Orderings are generated lexicographically by position and each is scored
//! with [`proportional_attempt`]. When an attempt fails, the rooms it had
//! processed form a prefix; later orderings starting with the same prefix
//! are skipped. Only the most recent failing prefix is remembered, so the
//! pruning is best-effort: an ordering that would fail for the same reason
//! may still be tried.
//!
//! # Complexity
//!
//! O(r! · n) for `r` rooms. Rough wall-clock figures: 9 rooms take seconds,
//! 12 rooms take hours, 13 rooms take days.

use itertools::Itertools;
use tracing::warn;

use crate::error::ValidationError;
use crate::models::{Room, RoomId};

use super::cancel::CancelToken;
use super::proportional::proportional_attempt;
use super::report::{BestTracker, SearchReport};

/// Default maximum number of rooms for exhaustive search.
pub const PERMUTATION_LIMIT: usize = 12;

/// Orderings above this count are logged as a long-running search.
const SLOW_PERMUTATIONS: u128 = 362_880;

/// Number of orderings of `n` rooms, or `None` if it does not fit in `u128`.
///
/// # Examples
///
/// ```
/// use u_seating::search::permutation_count;
///
/// assert_eq!(permutation_count(4), Some(24));
/// assert_eq!(permutation_count(12), Some(479_001_600));
/// assert_eq!(permutation_count(40), None);
/// ```
pub fn permutation_count(n: usize) -> Option<u128> {
    (1..=n as u128).try_fold(1u128, |acc, k| acc.checked_mul(k))
}

/// Tries every ordering of `rooms`, keeping the lowest score.
///
/// Stops early once an ordering scores at or below `best_score`.
///
/// # Errors
///
/// Returns [`ValidationError::TooManyRooms`] without searching when there
/// are more than `limit` rooms.
///
/// # Panics
///
/// Panics if `rooms` is empty.
///
/// # Examples
///
/// ```
/// use u_seating::models::{Room, Roster};
/// use u_seating::search::{permutation_search, CancelToken, PERMUTATION_LIMIT};
///
/// let roster = Roster::new(["adams", "baker", "clark", "davis"]);
/// let rooms = vec![Room::new(0, 10), Room::new(1, 10)];
/// let report = permutation_search(&rooms, &roster, 0, PERMUTATION_LIMIT, &CancelToken::new())
///     .unwrap();
/// assert_eq!(report.attempts, 2);
/// assert_eq!(report.best.unwrap().start_letters(), &["a", "c"]);
/// ```
pub fn permutation_search(
    rooms: &[Room],
    names: &[String],
    best_score: u32,
    limit: usize,
    cancel: &CancelToken,
) -> Result<SearchReport, ValidationError> {
    if rooms.len() > limit {
        return Err(ValidationError::TooManyRooms {
            rooms: rooms.len(),
            limit,
        });
    }
    let total = permutation_count(rooms.len());
    if total.map_or(true, |t| t > SLOW_PERMUTATIONS) {
        warn!(rooms = rooms.len(), orderings = ?total, "exhaustive search will be slow");
    }

    let mut tracker = BestTracker::new();
    let mut interrupted = false;
    let mut exclude: Option<Vec<RoomId>> = None;

    for order in rooms.iter().cloned().permutations(rooms.len()) {
        if cancel.is_cancelled() {
            interrupted = true;
            break;
        }
        if let Some(prefix) = &exclude {
            if order.iter().map(Room::id).take(prefix.len()).eq(prefix.iter().copied()) {
                continue;
            }
        }
        match proportional_attempt(&order, names) {
            Ok(attempt) => {
                if tracker.success(attempt, &order) <= best_score {
                    break;
                }
            }
            Err(err) => {
                tracker.failure(&err);
                exclude = Some(err.rooms);
            }
        }
    }

    Ok(tracker.finish("permutations", interrupted))
}
