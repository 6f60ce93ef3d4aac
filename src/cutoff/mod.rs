//! Surname cutoffs: where one room's band ends and the next begins.
//!
//! - [`letter_cutoff`] — shortest prefix distinguishing two ordered names
//! - [`Boundary`] — cut / unsplittable classification of adjacent names
//! - [`score`] — sum of squared start-letter lengths
//! - [`finish_letter`] — inclusive band ending for display

mod finish;
mod letter;

pub use finish::finish_letter;
pub use letter::{letter_cutoff, letter_score, score, Boundary};
