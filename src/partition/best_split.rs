//! Cheapest surname boundary near a target index.
//!
//! # Algorithm
//!
//! A candidate boundary `k` splits the roster into `names[..k]` and
//! `names[k..]`; its cost is the squared length of the cutoff between
//! `names[k - 1]` and `names[k]`. Every candidate in the window is scored,
//! the minimum cost wins, and ties go to the candidate closest to the
//! target, left side first. Boundaries inside a run of identical surnames
//! are never chosen.
//!
//! # Complexity
//!
//! O(w · m) for a window of `w` candidates and names of length `m`.

use crate::cutoff::Boundary;
use crate::error::CutoffFailure;

/// Windows narrower than this skip scoring and cut at the midpoint.
const NARROW_WINDOW: usize = 3;

/// A roster split at a single boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split<'a> {
    /// Start letter of the right-hand band.
    pub cutoff: String,
    /// Boundary index: `left = names[..index]`, `right = names[index..]`.
    pub index: usize,
    /// Names before the boundary.
    pub left: &'a [String],
    /// Names from the boundary on.
    pub right: &'a [String],
}

/// Finds the cheapest boundary in `[start, stop]`, preferring `target`.
///
/// The window is normalized first: both ends are clamped into
/// `[1, names.len() - 1]` (so both sides are non-empty), swapped if
/// inverted, and widened to the full range if they coincide. `target` is
/// clamped into the window and moved off `start` when possible.
///
/// `floor` is the start letter of the band being split; a cutoff that does
/// not sort strictly after it would leave the left room empty of letters.
///
/// # Errors
///
/// - [`CutoffFailure::TooFewNames`] — fewer than two names
/// - [`CutoffFailure::TiedBoundary`] — only unsplittable boundaries available
/// - [`CutoffFailure::ZeroWidthBand`] — the chosen cutoff is `<= floor`
///
/// # Examples
///
/// ```
/// use u_seating::partition::best_split;
///
/// let names: Vec<String> = ["adams", "allen", "baker", "brown", "clark", "cole"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// let split = best_split(&names, 1, 5, 3, "a").unwrap();
/// // "b" (index 2) and "c" (index 4) both cost 1 and sit one step from the
/// // target, so the left one wins.
/// assert_eq!(split.cutoff, "b");
/// assert_eq!(split.left.len(), 2);
/// ```
pub fn best_split<'a>(
    names: &'a [String],
    start: i64,
    stop: i64,
    target: i64,
    floor: &str,
) -> Result<Split<'a>, CutoffFailure> {
    if names.len() < 2 {
        return Err(CutoffFailure::TooFewNames);
    }
    let hi = (names.len() - 1) as i64;
    let mut start = start.clamp(1, hi);
    let mut stop = stop.clamp(1, hi);
    if stop < start {
        std::mem::swap(&mut start, &mut stop);
    }
    if start == stop {
        start = 1;
        stop = hi;
    }
    let (start, stop) = (start as usize, stop as usize);

    if stop - start < NARROW_WINDOW {
        return cut_at(names, start + (stop - start) / 2, floor);
    }

    let mut target = target.clamp(start as i64, stop as i64) as usize;
    if target == start {
        target += 1;
    }

    let scores: Vec<Option<u32>> = (start..=stop)
        .map(|k| Boundary::between(&names[k - 1], &names[k]).score())
        .collect();
    let min_score = scores
        .iter()
        .flatten()
        .min()
        .copied()
        .ok_or(CutoffFailure::TiedBoundary)?;

    let is_best = |k: usize| scores[k - start] == Some(min_score);
    let mut chosen = None;
    for d in 0..=(stop - start) {
        if target >= start + d && is_best(target - d) {
            chosen = Some(target - d);
            break;
        }
        if target + d <= stop && is_best(target + d) {
            chosen = Some(target + d);
            break;
        }
    }
    match chosen {
        Some(k) => cut_at(names, k, floor),
        None => Err(CutoffFailure::TiedBoundary),
    }
}

fn cut_at<'a>(names: &'a [String], k: usize, floor: &str) -> Result<Split<'a>, CutoffFailure> {
    let cutoff = match Boundary::between(&names[k - 1], &names[k]) {
        Boundary::Cut(c) => c,
        Boundary::Unsplittable => return Err(CutoffFailure::TiedBoundary),
    };
    if cutoff.as_str() <= floor {
        return Err(CutoffFailure::ZeroWidthBand {
            cutoff,
            start: floor.to_string(),
        });
    }
    let (left, right) = names.split_at(k);
    Ok(Split {
        cutoff,
        index: k,
        left,
        right,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn pairs() -> Vec<String> {
        names(&["aa", "ab", "ba", "bb", "ca", "cb", "da", "db"])
    }

    #[test]
    fn test_best_split_at_target() {
        let n = pairs();
        let split = best_split(&n, 1, 7, 4, "a").unwrap();
        assert_eq!(split.cutoff, "c");
        assert_eq!(split.index, 4);
        assert_eq!(split.left, &n[..4]);
        assert_eq!(split.right, &n[4..]);
    }

    #[test]
    fn test_best_split_tie_prefers_left() {
        let n = pairs();
        // Candidates 4 ("c") and 6 ("d") are both one away from 5.
        let split = best_split(&n, 1, 7, 5, "a").unwrap();
        assert_eq!(split.cutoff, "c");
    }

    #[test]
    fn test_best_split_nearest_cheap_boundary() {
        let n = pairs();
        let split = best_split(&n, 1, 7, 3, "a").unwrap();
        assert_eq!(split.index, 2);
        assert_eq!(split.cutoff, "b");
    }

    #[test]
    fn test_best_split_cheap_beats_close() {
        let n = names(&["kaa", "kab", "kac", "kad", "kae", "la", "lb"]);
        let split = best_split(&n, 1, 6, 2, "a").unwrap();
        assert_eq!(split.cutoff, "l");
        assert_eq!(split.index, 5);
    }

    #[test]
    fn test_best_split_skips_tied_boundaries() {
        let n = names(&["kim", "kim", "kim", "kim", "lee", "lee", "lee"]);
        let split = best_split(&n, 1, 6, 2, "a").unwrap();
        assert_eq!(split.index, 4);
        assert_eq!(split.cutoff, "l");
    }

    #[test]
    fn test_best_split_all_tied() {
        let n = names(&["kim", "kim", "kim", "kim", "kim", "kim"]);
        assert_eq!(
            best_split(&n, 1, 5, 3, "a").unwrap_err(),
            CutoffFailure::TiedBoundary
        );
    }

    #[test]
    fn test_best_split_narrow_window_inside_tie_group() {
        let n = names(&[
            "adams", "baker", "smith", "smith", "smith", "smith", "smith", "young", "zhou",
        ]);
        assert_eq!(
            best_split(&n, 3, 4, 3, "a").unwrap_err(),
            CutoffFailure::TiedBoundary
        );
    }

    #[test]
    fn test_best_split_narrow_window_midpoint() {
        let n = pairs();
        // Window [3, 5] is narrow: midpoint 4 without scoring.
        let split = best_split(&n, 3, 5, 3, "a").unwrap();
        assert_eq!(split.index, 4);
    }

    #[test]
    fn test_best_split_normalizes_window() {
        let n = pairs();
        // Inverted and out of range: becomes [1, 7].
        let split = best_split(&n, 40, -3, 4, "a").unwrap();
        assert_eq!(split.index, 4);
        // Degenerate: widened to the full range.
        let split = best_split(&n, 4, 4, 6, "a").unwrap();
        assert_eq!(split.index, 6);
    }

    #[test]
    fn test_best_split_zero_width_band() {
        let n = names(&["aa", "ab", "ac", "ad", "ae", "af"]);
        // Every cutoff is "a?" which sorts after "a": usable.
        assert!(best_split(&n, 1, 5, 3, "a").is_ok());
        // All cutoffs cost 4; the one at the target is "ad", equal to the floor.
        let err = best_split(&n, 1, 5, 3, "ad").unwrap_err();
        assert!(matches!(err, CutoffFailure::ZeroWidthBand { .. }));
    }

    #[test]
    fn test_best_split_too_few_names() {
        let n = names(&["solo"]);
        assert_eq!(
            best_split(&n, 0, 1, 0, "a").unwrap_err(),
            CutoffFailure::TooFewNames
        );
    }
}
