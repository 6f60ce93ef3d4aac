//! Proportional slicing and the shuffle search built on it.
//!
//! # Algorithm
//!
//! Every room gets a contiguous slice of the roster sized by its share of
//! the total capacity. The boundary between two slices becomes the next
//! room's start letter; if the boundary falls inside a run of identical
//! surnames it is nudged forward a few names. Unlike bisection, the slice
//! sizes never adapt to where cheap boundaries are, so scores depend
//! entirely on the room order.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::cutoff::{letter_cutoff, score};
use crate::error::{CutoffFailure, InvalidCutoff};
use crate::models::{total_capacity, Room};

use super::cancel::CancelToken;
use super::report::{Attempt, BestTracker, SearchParams, SearchReport};
use super::FIRST_START;

/// How far past a slice boundary a run of identical surnames may extend.
const MAX_NUDGE: usize = 5;

/// Registrants a room should receive: its capacity share of the roster,
/// rounded up.
///
/// # Panics
///
/// Panics if `total_capacity` is zero.
///
/// # Examples
///
/// ```
/// use u_seating::search::target_occupancy;
///
/// assert_eq!(target_occupancy(100, 150, 200), 75);
/// assert_eq!(target_occupancy(33, 10, 100), 4);
/// ```
pub fn target_occupancy(capacity: u32, registrants: usize, total_capacity: u64) -> usize {
    assert!(total_capacity > 0, "total capacity must be positive");
    (u64::from(capacity) * registrants as u64).div_ceil(total_capacity) as usize
}

/// One proportional slicing attempt over `rooms` in the given order.
///
/// The last room's slice runs to the end of the roster. A failure carries
/// the rooms processed so far, including the one that failed.
///
/// # Errors
///
/// - [`CutoffFailure::EmptyBand`] when a room's slice is empty
/// - [`CutoffFailure::TooManyDuplicates`] when more than five names past a
///   boundary share the previous slice's last surname
/// - [`CutoffFailure::ZeroWidthBand`] when a start letter does not sort
///   after the previous room's, as with surnames below `"a"` (`"'t Hooft"`)
///
/// # Examples
///
/// ```
/// use u_seating::models::{Room, Roster};
/// use u_seating::search::proportional_attempt;
///
/// let roster = Roster::new(["adams", "baker", "clark", "davis", "evans", "frank"]);
/// let rooms = vec![Room::new(0, 10), Room::new(1, 10), Room::new(2, 10)];
/// let attempt = proportional_attempt(&rooms, &roster).unwrap();
/// assert_eq!(attempt.start_letters, vec!["a", "c", "e"]);
/// ```
pub fn proportional_attempt(rooms: &[Room], names: &[String]) -> Result<Attempt, InvalidCutoff> {
    assert!(!rooms.is_empty(), "proportional slicing needs at least one room");
    let total = total_capacity(rooms);

    let mut letters: Vec<String> = Vec::with_capacity(rooms.len());
    let mut start = 0;
    let mut last_end: Option<&str> = None;

    for (i, room) in rooms.iter().enumerate() {
        let fail = |reason| InvalidCutoff::new(rooms[..=i].iter().map(Room::id).collect(), reason);
        let end = if i + 1 == rooms.len() {
            names.len()
        } else {
            (start + target_occupancy(room.capacity(), names.len(), total)).min(names.len())
        };
        let slice = &names[start..end];
        let Some(last) = slice.last() else {
            return Err(fail(CutoffFailure::EmptyBand));
        };

        let letter = match last_end {
            None => FIRST_START.to_string(),
            Some(prev) => {
                let next = slice
                    .iter()
                    .take(MAX_NUDGE + 1)
                    .find(|n| n.as_str() != prev)
                    .ok_or_else(|| {
                        fail(CutoffFailure::TooManyDuplicates {
                            name: prev.to_string(),
                        })
                    })?;
                let letter = letter_cutoff(prev, next).map_err(fail)?;
                // Names sorting below "a" can cut before an earlier band.
                if let Some(floor) = letters.last() {
                    if letter.as_str() <= floor.as_str() {
                        return Err(fail(CutoffFailure::ZeroWidthBand {
                            cutoff: letter,
                            start: floor.clone(),
                        }));
                    }
                }
                letter
            }
        };
        letters.push(letter);
        last_end = Some(last.as_str());
        start = end;
    }

    Ok(Attempt::new(score(&letters), letters))
}

/// Repeated proportional attempts over shuffled room orders.
///
/// Same loop as [`bisection_search`](super::bisection_search): up to
/// `params.max_tries` attempts, the order shuffled after each, early exit at
/// `params.best_score`. `params.max_ratio` is not used.
pub fn shuffle_search<R: Rng + ?Sized>(
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
        match proportional_attempt(&order, names) {
            Ok(attempt) => {
                if tracker.success(attempt, &order) <= params.best_score {
                    break;
                }
            }
            Err(err) => tracker.failure(&err),
        }
        order.shuffle(rng);
    }

    tracker.finish("shuffle", interrupted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::check_assignment;
    use crate::models::{Roster, SplitOutcome};
    use crate::search::{create_rng, CancelOnDraw};

    fn rooms(caps: &[u32]) -> Vec<Room> {
        caps.iter()
            .enumerate()
            .map(|(i, &c)| Room::new(i, c))
            .collect()
    }

    fn roster(parts: &[(&str, usize)]) -> Roster {
        Roster::new(
            parts
                .iter()
                .flat_map(|&(name, count)| std::iter::repeat(name).take(count)),
        )
    }

    #[test]
    fn test_target_occupancy_rounds_up() {
        assert_eq!(target_occupancy(30, 10, 100), 3);
        assert_eq!(target_occupancy(31, 10, 100), 4);
        assert_eq!(target_occupancy(0, 10, 100), 0);
    }

    #[test]
    fn test_attempt_nudges_past_duplicates() {
        let names = roster(&[("adams", 1), ("smith", 2), ("tyler", 1), ("young", 1), ("zhou", 1)]);
        let r = rooms(&[10, 10, 10]);
        let attempt = proportional_attempt(&r, &names).unwrap();
        assert_eq!(attempt.start_letters, vec!["a", "t", "y"]);
        assert_eq!(attempt.score, 3);
        let outcome = SplitOutcome::new(attempt.score, r, attempt.start_letters);
        assert!(check_assignment(&outcome, &names, None).is_ok());
    }

    #[test]
    fn test_attempt_duplicates_fill_slice() {
        let names = roster(&[("adams", 1), ("smith", 3), ("young", 1), ("zhou", 1)]);
        let r = rooms(&[10, 10, 10]);
        let err = proportional_attempt(&r, &names).unwrap_err();
        assert_eq!(err.rooms, vec![0, 1]);
        assert_eq!(
            err.reason,
            CutoffFailure::TooManyDuplicates {
                name: "smith".into()
            }
        );
    }

    #[test]
    fn test_attempt_nudge_limit() {
        // The next surname sits 6 names past the boundary: one too far.
        let names = roster(&[("adams", 1), ("smith", 12), ("zhou", 1)]);
        let r = rooms(&[10, 10]);
        let err = proportional_attempt(&r, &names).unwrap_err();
        assert!(matches!(err.reason, CutoffFailure::TooManyDuplicates { .. }));

        // Five names past the boundary is still fine.
        let names = roster(&[("adams", 1), ("smith", 11), ("zhou", 2)]);
        let attempt = proportional_attempt(&r, &names).unwrap();
        assert_eq!(attempt.start_letters, vec!["a", "z"]);
    }

    #[test]
    fn test_attempt_empty_slice() {
        let names = roster(&[("adams", 3), ("baker", 3), ("clark", 4)]);
        let r = rooms(&[1, 1000, 1]);
        let err = proportional_attempt(&r, &names).unwrap_err();
        assert_eq!(err.rooms, vec![0, 1, 2]);
        assert_eq!(err.reason, CutoffFailure::EmptyBand);
    }

    #[test]
    fn test_shuffle_search_stops_at_threshold() {
        let names = roster(&[("adams", 20), ("baker", 20), ("clark", 20)]);
        let r = rooms(&[30, 30, 30]);
        let mut rng = create_rng(Some(5));
        let report = shuffle_search(&r, &names, &SearchParams::new(100, 3), &mut rng, &CancelToken::new());
        assert_eq!(report.attempts, 1);
        assert_eq!(report.best.unwrap().start_letters(), &["a", "b", "c"]);
    }

    #[test]
    fn test_shuffle_search_spends_budget() {
        let names = Roster::new((0..60).map(|i| format!("{}name{i:02}", (b'a' + i as u8 / 20) as char)));
        let r = rooms(&[30, 30, 30]);
        let mut rng = create_rng(Some(5));
        let report = shuffle_search(&r, &names, &SearchParams::new(20, 2), &mut rng, &CancelToken::new());
        assert_eq!(report.attempts, 20);
        assert_eq!(report.successes, 20);
        let best = report.best.unwrap();
        assert_eq!(best.score(), 3);
        assert!(check_assignment(&best, &names, None).is_ok());
    }

    #[test]
    fn test_attempt_rejects_cutoff_below_first_start() {
        // "'t hooft" sorts before "a", so the second room would start at
        // "'t v" and its band would come before the first room's.
        let names = Roster::new(["'t Hooft", "'t Veld", "Adams", "Baker"]);
        let r = rooms(&[1, 3]);
        let err = proportional_attempt(&r, &names).unwrap_err();
        assert_eq!(err.rooms, vec![0, 1]);
        assert_eq!(
            err.reason,
            CutoffFailure::ZeroWidthBand {
                cutoff: "'t v".into(),
                start: "a".into()
            }
        );

        // With the large room first the cut lands after "adams".
        let r = vec![Room::new(1, 3), Room::new(0, 1)];
        let attempt = proportional_attempt(&r, &names).unwrap();
        assert_eq!(attempt.start_letters, vec!["a", "b"]);
        let outcome = SplitOutcome::new(attempt.score, r, attempt.start_letters);
        assert!(check_assignment(&outcome, &names, None).is_ok());
    }

    #[test]
    fn test_shuffle_search_never_keeps_decreasing_letters() {
        let names = Roster::new(["'t Hooft", "'t Veld", "'t Zand", "Adams", "Baker", "Cole"]);
        let r = rooms(&[10, 10, 10]);
        let mut rng = create_rng(Some(9));
        let report = shuffle_search(&r, &names, &SearchParams::new(30, 0), &mut rng, &CancelToken::new());
        assert_eq!(report.attempts, 30);
        assert_eq!(report.successes, 0);
        assert!(report.best.is_none());
    }

    #[test]
    fn test_shuffle_search_cancelled_keeps_best() {
        let names = roster(&[("adams", 20), ("baker", 20), ("clark", 20)]);
        let cancel = CancelToken::new();
        let mut rng = CancelOnDraw::new(create_rng(Some(5)), cancel.clone());
        // Threshold 0 is out of reach; the shuffle after the first success
        // cancels the search.
        let report = shuffle_search(&rooms(&[30, 30, 30]), &names, &SearchParams::new(100, 0), &mut rng, &cancel);
        assert!(report.interrupted);
        assert_eq!(report.attempts, 1);
        assert_eq!(report.successes, 1);
        assert_eq!(report.best.unwrap().start_letters(), &["a", "b", "c"]);
    }

    #[test]
    fn test_shuffle_search_cancelled() {
        let names = roster(&[("adams", 20), ("baker", 20)]);
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut rng = create_rng(Some(5));
        let report = shuffle_search(&rooms(&[30, 30]), &names, &SearchParams::new(100, 0), &mut rng, &cancel);
        assert!(report.interrupted);
        assert_eq!(report.attempts, 0);
    }
}
