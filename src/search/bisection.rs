//! Bisection-partition search.
//!
//! # Algorithm
//!
//! Rooms are halved by capacity ([`partition_rooms`]) and the roster is cut
//! at the cheapest boundary ([`best_split`]) inside the window that keeps
//! both halves at or below the maximum occupancy ratio. Both halves recurse
//! until each room holds one band. An attempt fails as soon as any level
//! has no usable boundary; the search then shuffles the room order and
//! tries again, keeping the lowest-scoring split.
//!
//! Each attempt is fast (O(r · n) for `r` rooms and `n` names); roughly one
//! in five random room orders produces a valid split on realistic rosters.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::cutoff::letter_score;
use crate::error::{CutoffFailure, InvalidCutoff};
use crate::models::{total_capacity, Room, RoomId};
use crate::partition::{best_split, partition_rooms};

use super::cancel::CancelToken;
use super::report::{Attempt, BestTracker, SearchParams, SearchReport};
use super::FIRST_START;

fn ids(rooms: &[Room]) -> Vec<RoomId> {
    rooms.iter().map(Room::id).collect()
}

/// One recursive bisection attempt over `rooms` in their current order.
///
/// `first_start` is the start letter of the first room's band. On success
/// the start letters follow `rooms`, whose order may have been changed in
/// place by the capacity partitioner.
///
/// # Panics
///
/// Panics if `rooms` is empty.
///
/// # Examples
///
/// ```
/// use u_seating::models::{Room, Roster};
/// use u_seating::search::bisect_try;
///
/// let roster = Roster::new(["adams", "baker", "clark", "nguyen", "owens", "price"]);
/// let mut rooms = vec![Room::new(0, 10), Room::new(1, 10)];
/// let attempt = bisect_try(&mut rooms, &roster, 0.5, "a").unwrap();
/// assert_eq!(attempt.start_letters, vec!["a", "n"]);
/// assert_eq!(attempt.score, 2);
/// ```
pub fn bisect_try(
    rooms: &mut [Room],
    names: &[String],
    max_ratio: f64,
    first_start: &str,
) -> Result<Attempt, InvalidCutoff> {
    assert!(!rooms.is_empty(), "bisection needs at least one room");

    if rooms.len() == 1 {
        let ratio = names.len() as f64 / f64::from(rooms[0].capacity());
        if ratio > max_ratio {
            return Err(InvalidCutoff::new(
                ids(rooms),
                CutoffFailure::RatioExceeded { ratio, max_ratio },
            ));
        }
        return Ok(Attempt::new(
            letter_score(first_start),
            vec![first_start.to_string()],
        ));
    }

    let involved = ids(rooms);
    let (c1, c2) = partition_rooms(rooms);
    let n1 = total_capacity(c1) as f64;
    let n2 = total_capacity(c2) as f64;
    let len = names.len() as f64;

    let local_ratio = len / (n1 + n2);
    if local_ratio > max_ratio {
        return Err(InvalidCutoff::new(
            involved,
            CutoffFailure::RatioExceeded {
                ratio: local_ratio,
                max_ratio,
            },
        ));
    }

    let target = (n1 * local_ratio) as i64;
    let max1 = (n1 * max_ratio) as i64;
    let max2 = (n2 * max_ratio) as i64;
    let min1 = names.len() as i64 - max2;
    debug!(
        left_rooms = c1.len(),
        right_rooms = c2.len(),
        n1,
        n2,
        names = names.len(),
        first_start,
        local_ratio,
        min1,
        target,
        max1,
        "bisecting"
    );

    let split = best_split(names, min1, max1, target, first_start)
        .map_err(|reason| InvalidCutoff::new(involved.clone(), reason))?;
    debug!(
        cutoff = %split.cutoff,
        left = split.left.len(),
        right = split.right.len(),
        "cutoff chosen"
    );
    if split.left.is_empty() || split.right.is_empty() {
        return Err(InvalidCutoff::new(involved, CutoffFailure::EmptyBand));
    }

    let first = bisect_try(c1, split.left, max_ratio, first_start)?;
    let second = bisect_try(c2, split.right, max_ratio, &split.cutoff)?;
    Ok(first.join(second))
}

/// Repeated bisection attempts over shuffled room orders.
///
/// Makes up to `params.max_tries` attempts. After every attempt the room
/// order is shuffled; a success scoring at or below `params.best_score`
/// ends the search early. Cancellation is checked before each attempt.
///
/// # Examples
///
/// ```
/// use u_seating::models::{Room, Roster};
/// use u_seating::search::{bisection_search, create_rng, CancelToken, SearchParams};
///
/// let names: Vec<String> = (0..40)
///     .map(|i| format!("{}son{:02}", (b'a' + (i * 26 / 40) as u8) as char, i))
///     .collect();
/// let roster = Roster::new(names);
/// let rooms = vec![Room::new(0, 50), Room::new(1, 50)];
/// let mut rng = create_rng(Some(7));
/// let params = SearchParams::new(100, 2).with_max_ratio(0.5);
///
/// let report = bisection_search(&rooms, &roster, &params, &mut rng, &CancelToken::new());
/// let best = report.best.unwrap();
/// assert_eq!(best.num_rooms(), 2);
/// assert_eq!(best.start_letters()[0], "a");
/// ```
pub fn bisection_search<R: Rng + ?Sized>(
    rooms: &[Room],
    names: &[String],
    params: &SearchParams,
    rng: &mut R,
    cancel: &CancelToken,
) -> SearchReport {
    let mut order = rooms.to_vec();
    let mut tracker = BestTracker::new();
    let mut interrupted = false;

    while tracker.attempts() < params.max_tries {
        if cancel.is_cancelled() {
            interrupted = true;
            break;
        }
        match bisect_try(&mut order, names, params.max_ratio, FIRST_START) {
            Ok(attempt) => {
                if tracker.success(attempt, &order) <= params.best_score {
                    break;
                }
            }
            Err(err) => tracker.failure(&err),
        }
        order.shuffle(rng);
    }

    tracker.finish("bisection", interrupted)
}
