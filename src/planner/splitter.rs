//! Room-split orchestration: validate, search, persist.

use rand::Rng;
use tracing::{debug, info};

use crate::config::{SplitConfig, Strategy};
use crate::error::{SplitError, ValidationError};
use crate::models::{total_capacity, ExamId, Room, Roster, SplitOutcome};
use crate::search::{
    bisection_search, create_rng, permutation_search, shuffle_search, CancelToken, SearchReport,
};

use super::store::{AssignmentSink, ExamSource};

/// Checks that an exam can be split at all and returns its occupancy ratio.
///
/// # Errors
///
/// In order of precedence: fewer than two rooms, no registrants, rooms of
/// unknown capacity, or an overall ratio outside `[min_ratio, max_ratio]`.
///
/// # Examples
///
/// ```
/// use u_seating::models::Room;
/// use u_seating::planner::sanity_checks;
///
/// let rooms = vec![Room::new(0, 100), Room::new(1, 100)];
/// assert_eq!(sanity_checks(&rooms, 80, 0.3, 0.5).unwrap(), 0.4);
/// assert!(sanity_checks(&rooms, 120, 0.3, 0.5).is_err());
/// ```
pub fn sanity_checks(
    rooms: &[Room],
    registrants: usize,
    min_ratio: f64,
    max_ratio: f64,
) -> Result<f64, ValidationError> {
    if rooms.len() < 2 {
        return Err(ValidationError::TooFewRooms);
    }
    if registrants == 0 {
        return Err(ValidationError::NoRegistrants);
    }
    let unknown: Vec<String> = rooms
        .iter()
        .filter(|r| !r.has_capacity())
        .map(|r| r.name().to_string())
        .collect();
    if !unknown.is_empty() {
        return Err(ValidationError::UnknownCapacity { rooms: unknown });
    }
    let ratio = registrants as f64 / total_capacity(rooms) as f64;
    if !(min_ratio..=max_ratio).contains(&ratio) {
        return Err(ValidationError::RatioOutOfRange {
            ratio,
            min: min_ratio,
            max: max_ratio,
        });
    }
    Ok(ratio)
}

/// Result of a [`RoomSplitter::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct SplitReport {
    /// The exam that was split.
    pub exam: ExamId,
    /// Registrants divided by total capacity.
    pub ratio: f64,
    /// Winning split; `None` for a check-only run.
    pub outcome: Option<SplitOutcome>,
    /// Search attempts made.
    pub attempts: usize,
    /// Attempts that produced a valid split.
    pub successes: usize,
    /// The search was cancelled before its budget ran out.
    pub interrupted: bool,
    /// The outcome was written to the sink.
    pub committed: bool,
}

impl SplitReport {
    /// Score of the winning split.
    pub fn score(&self) -> Option<u32> {
        self.outcome.as_ref().map(SplitOutcome::score)
    }
}

/// Runs room splits against an exam store.
///
/// # Examples
///
/// ```
/// use u_seating::config::SplitConfig;
/// use u_seating::models::Room;
/// use u_seating::planner::{MemoryStore, RoomSplitter};
/// use u_seating::search::CancelToken;
///
/// let mut store = MemoryStore::new();
/// let names: Vec<String> = (0..80)
///     .map(|i| format!("{}son{:02}", (b'a' + (i * 26 / 80) as u8) as char, i))
///     .collect();
/// store.insert_exam(7, vec![Room::new(0, 100), Room::new(1, 100)], names);
///
/// let mut splitter = RoomSplitter::new(store);
/// let config = SplitConfig::default().with_seed(1);
/// let report = splitter.run(7, &config, &CancelToken::new()).unwrap();
/// assert!(report.committed);
/// assert_eq!(splitter.store().assignments(7).unwrap().len(), 2);
/// ```
#[derive(Debug)]
pub struct RoomSplitter<S> {
    store: S,
}

impl<S: ExamSource + AssignmentSink> RoomSplitter<S> {
    /// Creates a splitter over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the splitter, returning the store.
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Splits `exam` into surname bands and, when `config.commit` is set,
    /// replaces its stored assignments in one call.
    ///
    /// # Errors
    ///
    /// - [`SplitError::Validation`] for a bad configuration, a failed sanity
    ///   check, too many rooms for exhaustive search, or no valid split
    /// - [`SplitError::Store`] when reading or writing the store fails
    ///
    /// A cancelled search still commits the best split found before it
    /// stopped; [`SplitReport::interrupted`] tells the two apart.
    pub fn run(
        &mut self,
        exam: ExamId,
        config: &SplitConfig,
        cancel: &CancelToken,
    ) -> Result<SplitReport, SplitError> {
        self.run_with_rng(exam, config, &mut create_rng(config.seed), cancel)
    }

    /// Like [`run`](Self::run), but shuffles room orders with `rng` instead
    /// of one seeded from `config.seed`.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub fn run_with_rng<R: Rng + ?Sized>(
        &mut self,
        exam: ExamId,
        config: &SplitConfig,
        rng: &mut R,
        cancel: &CancelToken,
    ) -> Result<SplitReport, SplitError> {
        config.validate()?;
        let rooms = self.store.classrooms(exam)?;
        let roster = Roster::new(self.store.surnames(exam)?);

        let ratio = sanity_checks(&rooms, roster.len(), config.min_ratio, config.max_ratio)?;
        info!(
            exam,
            rooms = rooms.len(),
            registrants = roster.len(),
            ratio,
            strategy = ?config.strategy,
            "room split checks passed"
        );
        if config.check_only {
            return Ok(SplitReport {
                exam,
                ratio,
                outcome: None,
                attempts: 0,
                successes: 0,
                interrupted: false,
                committed: false,
            });
        }

        let search = run_strategy(&rooms, &roster, config, rng, cancel)?;
        let outcome = search.best.ok_or(ValidationError::NoValidSplit)?;
        debug!(
            exam,
            score = outcome.score(),
            letters = ?outcome.start_letters(),
            "best split"
        );

        if config.commit {
            self.store.replace_assignments(exam, &outcome.assignments())?;
            info!(exam, rooms = outcome.num_rooms(), "room assignments replaced");
        }

        Ok(SplitReport {
            exam,
            ratio,
            outcome: Some(outcome),
            attempts: search.attempts,
            successes: search.successes,
            interrupted: search.interrupted,
            committed: config.commit,
        })
    }
}

fn run_strategy<R: Rng + ?Sized>(
    rooms: &[Room],
    roster: &Roster,
    config: &SplitConfig,
    rng: &mut R,
    cancel: &CancelToken,
) -> Result<SearchReport, ValidationError> {
    let params = config.search_params(rooms.len());
    match config.strategy {
        Strategy::Bisection => Ok(bisection_search(rooms, roster, &params, rng, cancel)),
        Strategy::Shuffle => Ok(shuffle_search(rooms, roster, &params, rng, cancel)),
        Strategy::Permutations => permutation_search(
            rooms,
            roster,
            params.best_score,
            config.permutation_limit,
            cancel,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::evaluation::check_assignment;
    use crate::models::RoomAssignment;
    use crate::planner::MemoryStore;
    use crate::search::CancelOnDraw;
    use tracing_subscriber::{fmt, EnvFilter};

    fn init_test() {
        let _ = fmt()
            .with_env_filter(EnvFilter::new("debug"))
            .with_test_writer()
            .try_init();
    }

    fn rooms(caps: &[u32]) -> Vec<Room> {
        caps.iter()
            .enumerate()
            .map(|(i, &c)| Room::new(i, c).with_name(format!("R{}", i + 1)))
            .collect()
    }

    fn spread(n: usize) -> Vec<String> {
        (0..n)
            .map(|i| {
                let c = (b'a' + (i * 26 / n) as u8) as char;
                format!("{}Name{i:04}", c.to_ascii_uppercase())
            })
            .collect()
    }

    fn splitter(caps: &[u32], names: Vec<String>) -> RoomSplitter<MemoryStore> {
        let mut store = MemoryStore::new();
        store.insert_exam(1, rooms(caps), names);
        RoomSplitter::new(store)
    }

    #[test]
    fn test_sanity_precedence() {
        let one = rooms(&[10]);
        // A single room fails the room count before the ratio is looked at.
        assert_eq!(sanity_checks(&one, 15, 0.3, 0.5), Err(ValidationError::TooFewRooms));
        let two = rooms(&[10, 0]);
        assert_eq!(sanity_checks(&two, 0, 0.3, 0.5), Err(ValidationError::NoRegistrants));
        assert_eq!(
            sanity_checks(&two, 3, 0.3, 0.5),
            Err(ValidationError::UnknownCapacity {
                rooms: vec!["R2".into()]
            })
        );
    }

    #[test]
    fn test_sanity_ratio_out_of_range() {
        let r = rooms(&[5, 5]);
        let err = sanity_checks(&r, 15, 0.3, 0.5).unwrap_err();
        assert_eq!(
            err.to_string(),
            "There is an occupancy ratio of 1.50, which is outside the given range of values"
        );
        assert!(sanity_checks(&r, 2, 0.3, 0.5).is_err());
        assert_eq!(sanity_checks(&r, 3, 0.3, 0.5), Ok(0.3));
        assert_eq!(sanity_checks(&r, 5, 0.3, 0.5), Ok(0.5));
    }

    #[test]
    fn test_run_even_split_commits() {
        init_test();
        let mut s = splitter(&[100, 100], spread(100));
        let config = SplitConfig::default().with_seed(42);
        let report = s.run(1, &config, &CancelToken::new()).unwrap();
        assert!(report.score().unwrap() <= 2);
        assert!(report.committed);
        assert_eq!(report.ratio, 0.5);

        let outcome = report.outcome.unwrap();
        let names = Roster::new(spread(100));
        assert!(check_assignment(&outcome, &names, Some(0.5)).is_ok());
        let stored = s.store().assignments(1).unwrap();
        assert_eq!(stored, outcome.assignments().as_slice());
        assert_eq!(stored[0].start_letter, "a");
    }

    #[test]
    fn test_run_twice_same_stored_state() {
        let mut s = splitter(&[100, 100], spread(100));
        let config = SplitConfig::default().with_seed(3);
        s.run(1, &config, &CancelToken::new()).unwrap();
        let first: Vec<RoomAssignment> = s.store().assignments(1).unwrap().to_vec();
        s.run(1, &config, &CancelToken::new()).unwrap();
        assert_eq!(s.store().assignments(1).unwrap(), first.as_slice());
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_run_single_room_rejected() {
        let mut s = splitter(&[10], spread(15));
        let err = s
            .run(1, &SplitConfig::default(), &CancelToken::new())
            .unwrap_err();
        assert!(matches!(
            err,
            SplitError::Validation(ValidationError::TooFewRooms)
        ));
        assert!(s.store().assignments(1).unwrap().is_empty());
    }

    #[test]
    fn test_run_ratio_rejected_two_rooms() {
        // 15 registrants in two rooms of 5: ratio 1.5 against a maximum of 0.5.
        let mut s = splitter(&[5, 5], spread(15));
        let err = s
            .run(1, &SplitConfig::default(), &CancelToken::new())
            .unwrap_err();
        match err {
            SplitError::Validation(ValidationError::RatioOutOfRange { ratio, min, max }) => {
                assert_eq!(ratio, 1.5);
                assert_eq!((min, max), (0.3, 0.5));
            }
            other => panic!("expected RatioOutOfRange, got {other:?}"),
        }
        assert!(s.store().assignments(1).unwrap().is_empty());
    }

    #[test]
    fn test_run_cancelled_commits_best_so_far() {
        init_test();
        let mut s = splitter(&[100, 100], spread(100));
        let cancel = CancelToken::new();
        let mut rng = CancelOnDraw::new(create_rng(Some(42)), cancel.clone());
        // Score 2 misses a threshold of 1, so the search shuffles and the
        // shuffle cancels it.
        let config = SplitConfig::default().with_best_score(1);
        let report = s.run_with_rng(1, &config, &mut rng, &cancel).unwrap();
        assert!(report.interrupted);
        assert_eq!(report.attempts, 1);
        assert!(report.committed);

        let outcome = report.outcome.unwrap();
        assert_eq!(outcome.start_letters(), &["a", "n"]);
        let stored = s.store().assignments(1).unwrap();
        assert_eq!(stored, outcome.assignments().as_slice());
    }

    #[test]
    fn test_run_check_only() {
        let mut s = splitter(&[100, 100], spread(80));
        let config = SplitConfig::default().with_check_only(true);
        let report = s.run(1, &config, &CancelToken::new()).unwrap();
        assert_eq!(report.outcome, None);
        assert_eq!(report.attempts, 0);
        assert!(!report.committed);
        assert!(s.store().assignments(1).unwrap().is_empty());
    }

    #[test]
    fn test_run_without_commit() {
        let mut s = splitter(&[100, 100], spread(80));
        let config = SplitConfig::default().with_commit(false).with_seed(8);
        let report = s.run(1, &config, &CancelToken::new()).unwrap();
        assert!(report.outcome.is_some());
        assert!(!report.committed);
        assert!(s.store().assignments(1).unwrap().is_empty());
    }

    #[test]
    fn test_run_permutations_refused_above_limit() {
        let mut s = splitter(&[20; 13], spread(100));
        let config = SplitConfig::default().with_strategy(Strategy::Permutations);
        let err = s.run(1, &config, &CancelToken::new()).unwrap_err();
        assert!(matches!(
            err,
            SplitError::Validation(ValidationError::TooManyRooms { rooms: 13, limit: 12 })
        ));
    }

    #[test]
    fn test_run_permutations_small() {
        let mut s = splitter(&[40, 40, 40], spread(60));
        let config = SplitConfig::default().with_strategy(Strategy::Permutations);
        let report = s.run(1, &config, &CancelToken::new()).unwrap();
        assert!(report.attempts >= 1);
        assert_eq!(s.store().assignments(1).unwrap().len(), 3);
    }

    #[test]
    fn test_run_shuffle() {
        let mut s = splitter(&[40, 40, 40], spread(60));
        let config = SplitConfig::default()
            .with_strategy(Strategy::Shuffle)
            .with_max_tries(50)
            .with_seed(4);
        let report = s.run(1, &config, &CancelToken::new()).unwrap();
        let names = Roster::new(spread(60));
        assert!(check_assignment(&report.outcome.unwrap(), &names, None).is_ok());
    }

    #[test]
    fn test_run_no_valid_split() {
        let names: Vec<String> = ["Adams", "Baker", "Cole"]
            .into_iter()
            .chain(std::iter::repeat("Smith").take(5))
            .chain(["Young", "Zhou"])
            .map(String::from)
            .collect();
        let mut s = splitter(&[10, 10], names);
        let config = SplitConfig::default().with_max_tries(50).with_seed(2);
        let err = s.run(1, &config, &CancelToken::new()).unwrap_err();
        assert_eq!(err.to_string(), "Could not find any valid splits.");
    }

    #[test]
    fn test_run_invalid_config() {
        let mut s = splitter(&[100, 100], spread(80));
        let config = SplitConfig::default().with_max_tries(5);
        let err = s.run(1, &config, &CancelToken::new()).unwrap_err();
        assert!(matches!(
            err,
            SplitError::Validation(ValidationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_run_unknown_exam() {
        let mut s = splitter(&[100, 100], spread(80));
        let err = s
            .run(2, &SplitConfig::default(), &CancelToken::new())
            .unwrap_err();
        assert!(matches!(err, SplitError::Store(StoreError::ExamNotFound(2))));
    }

    struct FailingSink(MemoryStore);

    impl ExamSource for FailingSink {
        fn classrooms(&self, exam: ExamId) -> Result<Vec<Room>, StoreError> {
            self.0.classrooms(exam)
        }
        fn surnames(&self, exam: ExamId) -> Result<Vec<String>, StoreError> {
            self.0.surnames(exam)
        }
    }

    impl AssignmentSink for FailingSink {
        fn replace_assignments(
            &mut self,
            _exam: ExamId,
            _assignments: &[RoomAssignment],
        ) -> Result<(), StoreError> {
            Err(StoreError::Backend("disk full".into()))
        }
    }

    #[test]
    fn test_run_sink_failure_propagates() {
        let mut store = MemoryStore::new();
        store.insert_exam(1, rooms(&[100, 100]), spread(100));
        let mut s = RoomSplitter::new(FailingSink(store));
        let err = s
            .run(1, &SplitConfig::default().with_seed(1), &CancelToken::new())
            .unwrap_err();
        assert_eq!(err.to_string(), "storage backend failure: disk full");
    }
}
