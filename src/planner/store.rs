//! Exam data access: where rooms and surnames come from, and where the
//! chosen assignment goes.

use std::collections::HashMap;

use crate::error::StoreError;
use crate::models::{ExamId, Room, RoomAssignment};

/// Read access to an exam's classrooms and registrants.
pub trait ExamSource {
    /// Classrooms currently assigned to the exam.
    fn classrooms(&self, exam: ExamId) -> Result<Vec<Room>, StoreError>;

    /// Surnames of every registrant, in any order and case.
    fn surnames(&self, exam: ExamId) -> Result<Vec<String>, StoreError>;
}

/// Write access for room assignments.
pub trait AssignmentSink {
    /// Replaces all of the exam's assignments with `assignments`.
    ///
    /// Implementations must make this atomic: after an error the previous
    /// assignments are still in place.
    fn replace_assignments(
        &mut self,
        exam: ExamId,
        assignments: &[RoomAssignment],
    ) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
struct ExamRecord {
    rooms: Vec<Room>,
    surnames: Vec<String>,
    assignments: Vec<RoomAssignment>,
}

/// In-memory exam store implementing both [`ExamSource`] and
/// [`AssignmentSink`].
///
/// # Examples
///
/// ```
/// use u_seating::models::{Room, RoomAssignment};
/// use u_seating::planner::{AssignmentSink, ExamSource, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// store.insert_exam(1, vec![Room::new(0, 30), Room::new(1, 30)], ["Ng", "Adams"]);
/// assert_eq!(store.surnames(1).unwrap().len(), 2);
///
/// let pairs = vec![RoomAssignment::new(Room::new(0, 30), "a")];
/// store.replace_assignments(1, &pairs).unwrap();
/// assert_eq!(store.assignments(1).unwrap(), pairs.as_slice());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    exams: HashMap<ExamId, ExamRecord>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an exam with no assignments.
    pub fn insert_exam<I, S>(&mut self, exam: ExamId, rooms: Vec<Room>, surnames: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exams.insert(
            exam,
            ExamRecord {
                rooms,
                surnames: surnames.into_iter().map(Into::into).collect(),
                assignments: Vec::new(),
            },
        );
    }

    /// Current assignments of an exam, or `None` for an unknown exam.
    pub fn assignments(&self, exam: ExamId) -> Option<&[RoomAssignment]> {
        self.exams.get(&exam).map(|r| r.assignments.as_slice())
    }

    fn record(&self, exam: ExamId) -> Result<&ExamRecord, StoreError> {
        self.exams.get(&exam).ok_or(StoreError::ExamNotFound(exam))
    }
}

impl ExamSource for MemoryStore {
    fn classrooms(&self, exam: ExamId) -> Result<Vec<Room>, StoreError> {
        Ok(self.record(exam)?.rooms.clone())
    }

    fn surnames(&self, exam: ExamId) -> Result<Vec<String>, StoreError> {
        Ok(self.record(exam)?.surnames.clone())
    }
}

impl AssignmentSink for MemoryStore {
    fn replace_assignments(
        &mut self,
        exam: ExamId,
        assignments: &[RoomAssignment],
    ) -> Result<(), StoreError> {
        let record = self
            .exams
            .get_mut(&exam)
            .ok_or(StoreError::ExamNotFound(exam))?;
        record.assignments = assignments.to_vec();
        Ok(())
    }
}
