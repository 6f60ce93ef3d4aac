//! Sorted, case-normalized surname roster.

use std::ops::Deref;

/// The surnames of an exam's registrants, lower-cased and sorted ascending.
///
/// Construction always normalizes, so every `Roster` satisfies the ordering
/// the splitting algorithms depend on. Duplicate surnames are kept: each
/// entry is one registrant.
///
/// # Examples
///
/// ```
/// use u_seating::models::Roster;
///
/// let roster = Roster::new(["Smith", "adams", "Brown", "smith"]);
/// assert_eq!(roster.as_slice(), &["adams", "brown", "smith", "smith"]);
/// assert_eq!(roster.len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    /// Builds a roster from surnames in any order and case.
    pub fn new<I, S>(surnames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = surnames
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .collect();
        names.sort();
        Self { names }
    }

    /// The normalized surnames.
    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    /// Consumes the roster, returning the normalized surnames.
    pub fn into_inner(self) -> Vec<String> {
        self.names
    }
}

impl Deref for Roster {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.names
    }
}
