//! Domain model types for exam room splitting.
//!
//! Provides the core abstractions: classrooms with capacities, the sorted
//! surname roster of an exam, and the split outcome pairing each room with
//! the start letter of its alphabetical band.

mod outcome;
mod room;
mod roster;

/// Identifier of an exam, as understood by the exam source and sink.
pub type ExamId = usize;

pub use outcome::{RoomAssignment, SplitOutcome};
pub use room::{total_capacity, Room, RoomId};
pub use roster::Roster;
