//! Band membership, occupancy, and assignment checks.

use std::ops::Range;

use crate::cutoff::finish_letter;
use crate::models::{Room, RoomId, SplitOutcome};

/// One room's share of the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Band {
    /// The classroom.
    pub room: Room,
    /// First letters of the band (inclusive).
    pub start_letter: String,
    /// Next room's start letter (exclusive); `None` for the last room.
    pub upto_letter: Option<String>,
    /// Surnames seated in this room, ascending.
    pub surnames: Vec<String>,
}

impl Band {
    /// Number of registrants in the band.
    pub fn student_count(&self) -> usize {
        self.surnames.len()
    }

    /// Integer occupancy percentage, or `None` for a room of unknown capacity.
    pub fn occupancy_percent(&self) -> Option<u32> {
        if !self.room.has_capacity() {
            return None;
        }
        let percent = 100 * self.surnames.len() as u64 / u64::from(self.room.capacity());
        Some(u32::try_from(percent).unwrap_or(u32::MAX))
    }

    /// Inclusive last letters of the band, for door signs.
    pub fn finish_letter(&self) -> Option<String> {
        finish_letter(&self.start_letter, self.upto_letter.as_deref())
    }
}

/// A way in which an outcome fails to describe a valid split of a roster.
#[derive(Debug, Clone, PartialEq)]
pub enum BandViolation {
    /// The outcome has no rooms but the roster is not empty.
    NoBands,
    /// Rooms and start letters differ in number.
    LengthMismatch {
        /// Number of rooms.
        rooms: usize,
        /// Number of start letters.
        letters: usize,
    },
    /// `start_letters[index]` does not sort strictly after its predecessor.
    NotIncreasing {
        /// Position of the offending letter.
        index: usize,
    },
    /// A room receives nobody.
    EmptyBand {
        /// The empty room.
        room: RoomId,
    },
    /// A room's occupancy ratio is above the allowed maximum.
    Overfull {
        /// The overfull room.
        room: RoomId,
        /// Registrants in the band.
        count: usize,
        /// Room capacity.
        capacity: u32,
    },
}

/// Computes the bands an outcome induces on a sorted roster.
///
/// Band `i` holds the names `>= start_letters[i]` and `< start_letters[i + 1]`;
/// the first band is open below and the last open above.
///
/// # Examples
///
/// ```
/// use u_seating::evaluation::BandEvaluator;
/// use u_seating::models::{Room, Roster, SplitOutcome};
///
/// let roster = Roster::new(["adams", "baker", "nguyen", "owens"]);
/// let outcome = SplitOutcome::new(
///     2,
///     vec![Room::new(0, 10), Room::new(1, 4)],
///     vec!["a".into(), "n".into()],
/// );
/// let bands = BandEvaluator::new(&roster).bands(&outcome);
/// assert_eq!(bands[0].surnames, vec!["adams", "baker"]);
/// assert_eq!(bands[0].finish_letter().as_deref(), Some("m"));
/// assert_eq!(bands[1].occupancy_percent(), Some(50));
/// ```
pub struct BandEvaluator<'a> {
    names: &'a [String],
}

impl<'a> BandEvaluator<'a> {
    /// Creates an evaluator over an ascending roster.
    pub fn new(names: &'a [String]) -> Self {
        Self { names }
    }

    /// Index ranges of each band in the roster.
    ///
    /// Out-of-order letters yield empty ranges rather than overlapping ones.
    pub fn band_ranges<S: AsRef<str>>(&self, start_letters: &[S]) -> Vec<Range<usize>> {
        let mut ranges = Vec::with_capacity(start_letters.len());
        let mut lo = 0;
        for (i, _) in start_letters.iter().enumerate() {
            let hi = match start_letters.get(i + 1) {
                Some(next) => {
                    let next = next.as_ref();
                    self.names.partition_point(|n| n.as_str() < next).max(lo)
                }
                None => self.names.len(),
            };
            ranges.push(lo..hi);
            lo = hi;
        }
        ranges
    }

    /// Number of registrants in each band.
    pub fn band_sizes<S: AsRef<str>>(&self, start_letters: &[S]) -> Vec<usize> {
        self.band_ranges(start_letters)
            .into_iter()
            .map(|r| r.len())
            .collect()
    }

    /// The bands of `outcome`, in room order.
    pub fn bands(&self, outcome: &SplitOutcome) -> Vec<Band> {
        let letters = outcome.start_letters();
        self.band_ranges(letters)
            .into_iter()
            .zip(outcome.rooms())
            .enumerate()
            .map(|(i, (range, room))| Band {
                room: room.clone(),
                start_letter: letters[i].clone(),
                upto_letter: letters.get(i + 1).cloned(),
                surnames: self.names[range].to_vec(),
            })
            .collect()
    }

    /// Lists every way `outcome` fails to split the roster.
    ///
    /// With `max_ratio`, bands above that occupancy ratio are reported too.
    pub fn check(&self, outcome: &SplitOutcome, max_ratio: Option<f64>) -> Vec<BandViolation> {
        let rooms = outcome.rooms();
        let letters = outcome.start_letters();
        let mut violations = Vec::new();

        if rooms.len() != letters.len() {
            violations.push(BandViolation::LengthMismatch {
                rooms: rooms.len(),
                letters: letters.len(),
            });
            return violations;
        }
        if rooms.is_empty() {
            if !self.names.is_empty() {
                violations.push(BandViolation::NoBands);
            }
            return violations;
        }

        for (i, pair) in letters.windows(2).enumerate() {
            if pair[0] >= pair[1] {
                violations.push(BandViolation::NotIncreasing { index: i + 1 });
            }
        }

        for (room, count) in rooms.iter().zip(self.band_sizes(letters)) {
            if count == 0 {
                violations.push(BandViolation::EmptyBand { room: room.id() });
                continue;
            }
            if let Some(max) = max_ratio {
                if count as f64 > max * f64::from(room.capacity()) {
                    violations.push(BandViolation::Overfull {
                        room: room.id(),
                        count,
                        capacity: room.capacity(),
                    });
                }
            }
        }
        violations
    }
}

/// Checks that `outcome` is a valid split of `names`.
///
/// Valid means one start letter per room, strictly increasing letters,
/// and a non-empty band for every room; the bands then cover the roster
/// exactly. With `max_ratio`, no band may exceed that occupancy ratio.
///
/// # Errors
///
/// Every violation found.
pub fn check_assignment(
    outcome: &SplitOutcome,
    names: &[String],
    max_ratio: Option<f64>,
) -> Result<(), Vec<BandViolation>> {
    let violations = BandEvaluator::new(names).check(outcome, max_ratio);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
