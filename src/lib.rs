//! # u-seating
//!
//! Exam room splitting: seats an exam's registrants in its classrooms by
//! cutting the alphabetical roster into contiguous surname bands, one per
//! room, with cut points that need as few letters as possible.
//!
//! ## Modules
//!
//! - [`models`] — Domain types (Room, Roster, RoomAssignment, SplitOutcome)
//! - [`cutoff`] — Surname cutoffs, scoring, and inclusive band endings
//! - [`partition`] — Capacity partitioner and best-split selector
//! - [`search`] — Bisection, shuffle, and permutation search strategies
//! - [`evaluation`] — Band membership, occupancy, and assignment checks
//! - [`planner`] — Sanity checks, strategy dispatch, and persistence
//! - [`config`] — Run configuration
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```
//! use u_seating::models::{Room, Roster};
//! use u_seating::search::{bisection_search, create_rng, CancelToken, SearchParams};
//!
//! let roster = Roster::new(["Adams", "Baker", "Clark", "Nguyen", "Owens", "Price"]);
//! let rooms = vec![Room::new(0, 10), Room::new(1, 10)];
//! let mut rng = create_rng(Some(42));
//!
//! let report = bisection_search(
//!     &rooms,
//!     &roster,
//!     &SearchParams::new(100, 2),
//!     &mut rng,
//!     &CancelToken::new(),
//! );
//! let best = report.best.unwrap();
//! assert_eq!(best.start_letters(), &["a", "n"]);
//! ```

pub mod config;
pub mod cutoff;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod partition;
pub mod planner;
pub mod search;
