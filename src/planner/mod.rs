//! Exam-level orchestration.
//!
//! [`RoomSplitter`] reads an exam's rooms and surnames from an
//! [`ExamSource`], runs the sanity checks and the configured search, and
//! writes the winning `(room, start letter)` pairs to an [`AssignmentSink`].

mod splitter;
mod store;

pub use splitter::{sanity_checks, RoomSplitter, SplitReport};
pub use store::{AssignmentSink, ExamSource, MemoryStore};
