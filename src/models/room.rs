//! Classroom type with seating capacity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a classroom.
pub type RoomId = usize;

/// A classroom that receives one alphabetical band of an exam roster.
///
/// A capacity of zero means the capacity is unknown; the planner rejects
/// such rooms before any search runs.
///
/// # Examples
///
/// ```
/// use u_seating::models::Room;
///
/// let r = Room::new(3, 120).with_name("MATH 101");
/// assert_eq!(r.id(), 3);
/// assert_eq!(r.capacity(), 120);
/// assert_eq!(r.to_string(), "MATH 101");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    id: RoomId,
    name: String,
    capacity: u32,
}

impl Room {
    /// Creates a room with the given ID and capacity.
    ///
    /// The display name defaults to `"room <id>"`.
    pub fn new(id: RoomId, capacity: u32) -> Self {
        Self {
            id,
            name: format!("room {id}"),
            capacity,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Room ID.
    pub fn id(&self) -> RoomId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Seating capacity (0 = unknown).
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns `true` if a positive capacity is recorded.
    pub fn has_capacity(&self) -> bool {
        self.capacity > 0
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Sum of capacities over a set of rooms.
pub fn total_capacity(rooms: &[Room]) -> u64 {
    rooms.iter().map(|r| u64::from(r.capacity)).sum()
}
