//! Error types for room splitting.
//!
//! - [`InvalidCutoff`] — a candidate split is unusable; search loops consume
//!   it and try another room order.
//! - [`ValidationError`] — fatal, user-facing; raised before a search starts
//!   or when every attempt failed.
//! - [`StoreError`] — failure reported by an exam source or assignment sink.
//! - [`SplitError`] — what the planner returns.

use thiserror::Error;

use crate::models::{ExamId, RoomId};

/// Why a candidate split was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CutoffFailure {
    /// The two names are not strictly ordered.
    #[error("names are not ordered correctly (\"{left}\" is not strictly less than \"{right}\")")]
    Unordered { left: String, right: String },

    /// A run of identical surnames spans the only usable boundary.
    #[error("identical surnames span the cutoff")]
    TiedBoundary,

    /// The cutoff does not advance past the band's own start letter.
    #[error("cutoff \"{cutoff}\" does not advance past start \"{start}\"")]
    ZeroWidthBand { cutoff: String, start: String },

    /// A room was left without any registrants.
    #[error("a room received no registrants")]
    EmptyBand,

    /// Too many registrants for the capacity of a room group.
    #[error("occupancy {ratio:.3} exceeds the maximum {max_ratio:.3}")]
    RatioExceeded { ratio: f64, max_ratio: f64 },

    /// Fewer than two names remain to be split.
    #[error("too few names to split")]
    TooFewNames,

    /// Too many people with the same surname at a slice boundary.
    #[error("too many people named \"{name}\" at a band boundary")]
    TooManyDuplicates { name: String },
}

/// A split attempt that cannot work for the given rooms.
///
/// Carries the rooms involved, in attempt order, so exhaustive search can
/// skip orderings that share the failing prefix.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid cutoff for rooms {rooms:?}: {reason}")]
pub struct InvalidCutoff {
    /// Rooms (in attempt order) involved in the failure.
    pub rooms: Vec<RoomId>,
    /// What went wrong.
    pub reason: CutoffFailure,
}

impl InvalidCutoff {
    /// Creates a new failure for the given rooms.
    pub fn new(rooms: Vec<RoomId>, reason: CutoffFailure) -> Self {
        Self { rooms, reason }
    }
}

/// A fatal, user-facing validation failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Two or more rooms required for splits")]
    TooFewRooms,

    #[error("There are no students registered for this exam")]
    NoRegistrants,

    #[error("The following room{} unknown capacity: {}", plural_have(.rooms.len()), .rooms.join(", "))]
    UnknownCapacity { rooms: Vec<String> },

    #[error("There is an occupancy ratio of {ratio:.2}, which is outside the given range of values")]
    RatioOutOfRange { ratio: f64, min: f64, max: f64 },

    #[error("Could not find any valid splits.")]
    NoValidSplit,

    #[error("It is unwise to use permutation search with more than {limit} classrooms. (You have {rooms}.)")]
    TooManyRooms { rooms: usize, limit: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

fn plural_have(n: usize) -> &'static str {
    if n == 1 {
        " has"
    } else {
        "s have"
    }
}

/// Failure reported by an exam source or assignment sink.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("exam {0} not found")]
    ExamNotFound(ExamId),

    #[error("storage backend failure: {0}")]
    Backend(String),

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Top-level error returned by the planner.
#[derive(Error, Debug)]
pub enum SplitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
