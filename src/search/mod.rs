//! Room-order search strategies.
//!
//! - [`bisection_search`] — recursive capacity bisection with randomized
//!   restarts (primary strategy)
//! - [`shuffle_search`] — proportional slicing over shuffled room orders
//! - [`permutation_search`] — proportional slicing over every room order
//!
//! All strategies share [`SearchParams`]-style limits, report through
//! [`SearchReport`], and stop between attempts when their [`CancelToken`]
//! is cancelled.

mod bisection;
mod cancel;
mod permutations;
mod proportional;
mod report;

pub use bisection::{bisect_try, bisection_search};
pub use cancel::CancelToken;
#[cfg(test)]
pub(crate) use cancel::CancelOnDraw;
pub use permutations::{permutation_count, permutation_search, PERMUTATION_LIMIT};
pub use proportional::{proportional_attempt, shuffle_search, target_occupancy};
pub use report::{Attempt, SearchParams, SearchReport};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Start letter of the first band.
pub const FIRST_START: &str = "a";

/// Creates the search RNG: seeded for reproducible runs, OS-seeded otherwise.
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}
