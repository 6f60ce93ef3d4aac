//! Inclusive band endings for display.
//!
//! A band runs from its start letter up to, but excluding, the next room's
//! start letter ("upto"). Signs read better with an inclusive ending, so the
//! upto letter is mapped to its predecessor in base-26 (`a` = 0 .. `z` = 25)
//! with a leading sentinel digit of 25. The sentinel keeps leading `a`s
//! significant and marks where conversion back to letters stops.
//!
//! Only used for presentation; no split decision depends on it.

const SENTINEL: u128 = 25;

/// Rank of the open upper bound after the last room (formerly spelled `"|"`).
const NO_UPPER_BOUND: u128 = 26 * 26;

fn to_rank(s: &str) -> Option<u128> {
    s.chars().try_fold(SENTINEL, |n, c| {
        if !c.is_ascii_lowercase() {
            return None;
        }
        n.checked_mul(26)?.checked_add(u128::from(c as u8 - b'a'))
    })
}

fn from_rank(mut n: u128) -> Option<String> {
    let mut letters = Vec::new();
    loop {
        if n < 26 {
            return None;
        }
        letters.push(char::from(b'a' + (n % 26) as u8));
        n /= 26;
        if n == SENTINEL {
            break;
        }
    }
    letters.reverse();
    Some(letters.into_iter().collect())
}

/// Computes the inclusive last letters of a band.
///
/// `upto` is the next room's start letter, or `None` for the last room.
/// When the predecessor is a prefix of `start` itself, a trailing `"z"` is
/// appended so the ending still sorts after the start.
///
/// Returns `None` when there is nothing sensible to display: an empty
/// `upto`, `start >= upto`, letters outside `a..=z`, or no predecessor.
///
/// # Examples
///
/// ```
/// use u_seating::cutoff::finish_letter;
///
/// assert_eq!(finish_letter("a", Some("n")).as_deref(), Some("m"));
/// assert_eq!(finish_letter("a", Some("ba")).as_deref(), Some("az"));
/// assert_eq!(finish_letter("sm", Some("sn")).as_deref(), Some("smz"));
/// assert_eq!(finish_letter("t", None).as_deref(), Some("z"));
/// ```
pub fn finish_letter(start: &str, upto: Option<&str>) -> Option<String> {
    let rank = match upto {
        None => NO_UPPER_BOUND,
        Some(u) => {
            if u.is_empty() || start >= u {
                return None;
            }
            to_rank(u)?
        }
    };
    let mut finish = from_rank(rank.checked_sub(1)?)?;
    if start.starts_with(finish.as_str()) {
        finish.push('z');
    }
    Some(finish)
}
