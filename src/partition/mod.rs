//! Partitioning primitives shared by the search strategies.
//!
//! - [`partition_rooms`] — split rooms into two capacity-balanced halves
//! - [`best_split`] — cheapest surname boundary in a window near a target

mod best_split;
mod capacity;

pub use best_split::{best_split, Split};
pub use capacity::partition_rooms;
