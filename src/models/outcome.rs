//! Split outcome and room assignment types.

use serde::{Deserialize, Serialize};

use super::{Room, RoomId};

/// One room paired with the first letters of its alphabetical band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomAssignment {
    /// The classroom.
    pub room: Room,
    /// Lower-case prefix marking the start of this room's band.
    pub start_letter: String,
}

impl RoomAssignment {
    /// Creates a new assignment.
    pub fn new(room: Room, start_letter: impl Into<String>) -> Self {
        Self {
            room,
            start_letter: start_letter.into(),
        }
    }
}

/// A complete room split: rooms in band order with their start letters.
///
/// `rooms[i]` receives the surnames from `start_letters[i]` up to, but
/// excluding, `start_letters[i + 1]`.
///
/// # Examples
///
/// ```
/// use u_seating::models::{Room, SplitOutcome};
///
/// let outcome = SplitOutcome::new(
///     2,
///     vec![Room::new(0, 100), Room::new(1, 100)],
///     vec!["a".into(), "n".into()],
/// );
/// assert_eq!(outcome.num_rooms(), 2);
/// let pairs = outcome.assignments();
/// assert_eq!(pairs[1].start_letter, "n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitOutcome {
    score: u32,
    rooms: Vec<Room>,
    start_letters: Vec<String>,
}

impl SplitOutcome {
    /// Creates an outcome. `rooms` and `start_letters` must have equal length.
    pub fn new(score: u32, rooms: Vec<Room>, start_letters: Vec<String>) -> Self {
        debug_assert_eq!(rooms.len(), start_letters.len());
        Self {
            score,
            rooms,
            start_letters,
        }
    }

    /// Sum of squared start-letter lengths. Lower is better.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Rooms in band order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Start letters in band order.
    pub fn start_letters(&self) -> &[String] {
        &self.start_letters
    }

    /// Number of rooms in the split.
    pub fn num_rooms(&self) -> usize {
        self.rooms.len()
    }

    /// Room IDs in band order.
    pub fn room_ids(&self) -> Vec<RoomId> {
        self.rooms.iter().map(|r| r.id()).collect()
    }

    /// Pairs each room with its start letter.
    pub fn assignments(&self) -> Vec<RoomAssignment> {
        self.rooms
            .iter()
            .zip(&self.start_letters)
            .map(|(room, letter)| RoomAssignment::new(room.clone(), letter.clone()))
            .collect()
    }
}
