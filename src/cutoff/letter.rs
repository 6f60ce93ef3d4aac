//! Minimal distinguishing prefixes between adjacent surnames.
//!
//! # Algorithm
//!
//! For two names `s1 < s2`, the cutoff is `s2` truncated to one character
//! past their common prefix. Every name `n` with `s1 < cutoff <= n` sorts
//! after the boundary, and every name `<= s1` before it, so the cutoff is
//! the shortest string a sign on the door needs to show.
//!
//! Shorter cutoffs are preferred: a candidate boundary costs the square of
//! its cutoff length, which penalizes long name breaks far more than a
//! linear cost would.

use crate::error::CutoffFailure;

/// Returns the shortest prefix of `s2` that sorts strictly after `s1`.
///
/// Fails with [`CutoffFailure::Unordered`] unless `s1 < s2`. Lengths are
/// counted in characters, not bytes.
///
/// # Examples
///
/// ```
/// use u_seating::cutoff::letter_cutoff;
///
/// assert_eq!(letter_cutoff("adams", "baker").unwrap(), "b");
/// assert_eq!(letter_cutoff("smith", "smyth").unwrap(), "smy");
/// assert_eq!(letter_cutoff("brown", "browne").unwrap(), "browne");
/// assert!(letter_cutoff("smith", "smith").is_err());
/// ```
pub fn letter_cutoff(s1: &str, s2: &str) -> Result<String, CutoffFailure> {
    if s1 >= s2 {
        return Err(CutoffFailure::Unordered {
            left: s1.to_string(),
            right: s2.to_string(),
        });
    }
    let common = s1
        .chars()
        .zip(s2.chars())
        .take_while(|(a, b)| a == b)
        .count();
    Ok(s2.chars().take(common + 1).collect())
}

/// Cost of a single start letter: its length in characters, squared.
pub fn letter_score(letter: &str) -> u32 {
    let n = letter.chars().count() as u32;
    n * n
}

/// Total cost of a sequence of start letters.
///
/// # Examples
///
/// ```
/// use u_seating::cutoff::score;
///
/// assert_eq!(score(&["a", "n"]), 2);
/// assert_eq!(score(&["a", "mc", "sch"]), 1 + 4 + 9);
/// ```
pub fn score<S: AsRef<str>>(letters: &[S]) -> u32 {
    letters.iter().map(|l| letter_score(l.as_ref())).sum()
}

/// The boundary between two adjacent names of a sorted roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Boundary {
    /// The names differ; the band to the right starts at this cutoff.
    Cut(String),
    /// The names are equal (or out of order): no cut is possible here.
    Unsplittable,
}

impl Boundary {
    /// Classifies the boundary between `left` and `right`.
    pub fn between(left: &str, right: &str) -> Self {
        match letter_cutoff(left, right) {
            Ok(cutoff) => Boundary::Cut(cutoff),
            Err(_) => Boundary::Unsplittable,
        }
    }

    /// Cost of cutting here, or `None` if no cut is possible.
    pub fn score(&self) -> Option<u32> {
        match self {
            Boundary::Cut(c) => Some(letter_score(c)),
            Boundary::Unsplittable => None,
        }
    }

    /// The cutoff string, if any.
    pub fn cutoff(&self) -> Option<&str> {
        match self {
            Boundary::Cut(c) => Some(c),
            Boundary::Unsplittable => None,
        }
    }
}
