//! Split evaluation: which registrants each room receives, and whether an
//! outcome is a valid split of a roster.

mod bands;

pub use bands::{check_assignment, Band, BandEvaluator, BandViolation};
