//! The record store: pupils, attendance log, assignments and grade book.
//!
//! The store is an explicit value owned by the caller and passed by reference
//! to the metrics, report and layout functions. Every mutator validates its
//! whole input before touching any state, so a rejected call leaves the store
//! exactly as it was.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;

use crate::error::{KeyKind, RecordError};
use crate::model::{Assignment, AttendanceDay, AttendanceEntry, Pupil};

/// Lowest accepted score.
pub const MIN_SCORE: i32 = 0;
/// Highest accepted score.
pub const MAX_SCORE: i32 = 100;

/// In-memory record store for one classroom.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    /// Pupils in registration order.
    pupils: Vec<Pupil>,
    /// Pupil id → position in `pupils`.
    pupil_index: HashMap<String, usize>,
    /// Assignments in creation order.
    assignments: Vec<Assignment>,
    attendance: BTreeMap<NaiveDate, AttendanceDay>,
    /// (pupil id, assignment name) → score.
    grades: HashMap<(String, String), u8>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pupil. Fails if the id is already taken.
    pub fn add_pupil(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<(), RecordError> {
        let id = id.into();
        if self.pupil_index.contains_key(&id) {
            tracing::warn!(pupil = %id, "rejected duplicate pupil id");
            return Err(RecordError::duplicate(KeyKind::Pupil, id));
        }
        let name = name.into();
        tracing::debug!(pupil = %id, name = %name, "registered pupil");
        self.pupil_index.insert(id.clone(), self.pupils.len());
        self.pupils.push(Pupil { id, name });
        Ok(())
    }

    /// Create an assignment. Fails if the name already exists.
    pub fn add_assignment(&mut self, name: impl Into<String>) -> Result<(), RecordError> {
        let name = name.into();
        if self.has_assignment(&name) {
            tracing::warn!(assignment = %name, "rejected duplicate assignment");
            return Err(RecordError::duplicate(KeyKind::Assignment, name));
        }
        tracing::debug!(assignment = %name, "created assignment");
        self.assignments.push(Assignment { name });
        Ok(())
    }

    /// Record attendance for every registered pupil on `date`.
    ///
    /// The list is stored as given, all or nothing. It must mention each
    /// registered pupil exactly once and nobody else, and the date must not
    /// have been recorded before.
    pub fn record_attendance(
        &mut self,
        date: NaiveDate,
        entries: Vec<AttendanceEntry>,
    ) -> Result<(), RecordError> {
        if let Err(err) = self.check_attendance(date, &entries) {
            tracing::warn!(%date, error = %err, "rejected attendance");
            return Err(err);
        }
        tracing::debug!(%date, entries = entries.len(), "recorded attendance");
        self.attendance
            .insert(date, AttendanceDay { date, entries });
        Ok(())
    }

    fn check_attendance(
        &self,
        date: NaiveDate,
        entries: &[AttendanceEntry],
    ) -> Result<(), RecordError> {
        if self.attendance.contains_key(&date) {
            return Err(RecordError::duplicate_day(date));
        }

        let mut seen = HashSet::new();
        for entry in entries {
            if !self.pupil_index.contains_key(&entry.pupil_id) {
                return Err(RecordError::UnknownPupil(entry.pupil_id.clone()));
            }
            if !seen.insert(entry.pupil_id.as_str()) {
                return Err(RecordError::duplicate(KeyKind::Pupil, &entry.pupil_id));
            }
        }

        if let Some(missing) = self.pupils.iter().find(|p| !seen.contains(p.id.as_str())) {
            return Err(RecordError::IncompleteAttendance(missing.id.clone()));
        }

        Ok(())
    }

    /// Set a pupil's score on an assignment, replacing any earlier score.
    pub fn record_score(
        &mut self,
        pupil_id: &str,
        assignment: &str,
        score: i32,
    ) -> Result<(), RecordError> {
        let err = if !self.pupil_index.contains_key(pupil_id) {
            Some(RecordError::UnknownPupil(pupil_id.to_string()))
        } else if !self.has_assignment(assignment) {
            Some(RecordError::UnknownAssignment(assignment.to_string()))
        } else if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            Some(RecordError::OutOfRange(score))
        } else {
            None
        };
        if let Some(err) = err {
            tracing::warn!(pupil = %pupil_id, %assignment, error = %err, "rejected score");
            return Err(err);
        }

        // Range checked above.
        let score = score as u8;
        let previous = self
            .grades
            .insert((pupil_id.to_string(), assignment.to_string()), score);
        tracing::debug!(pupil = %pupil_id, %assignment, score, ?previous, "recorded score");
        Ok(())
    }

    /// Pupils in registration order.
    pub fn pupils(&self) -> &[Pupil] {
        &self.pupils
    }

    pub fn pupil(&self, id: &str) -> Option<&Pupil> {
        self.pupil_index.get(id).map(|&i| &self.pupils[i])
    }

    pub fn pupil_count(&self) -> usize {
        self.pupils.len()
    }

    /// Assignments in creation order.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn has_assignment(&self, name: &str) -> bool {
        self.assignments.iter().any(|a| a.name == name)
    }

    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Recorded days, oldest first.
    pub fn attendance_days(&self) -> impl DoubleEndedIterator<Item = &AttendanceDay> {
        self.attendance.values()
    }

    pub fn attendance_day(&self, date: NaiveDate) -> Option<&AttendanceDay> {
        self.attendance.get(&date)
    }

    pub fn attendance_day_count(&self) -> usize {
        self.attendance.len()
    }

    /// The latest recorded date, if any.
    pub fn most_recent_day(&self) -> Option<&AttendanceDay> {
        self.attendance.values().next_back()
    }

    pub fn score(&self, pupil_id: &str, assignment: &str) -> Option<u8> {
        self.grades
            .get(&(pupil_id.to_string(), assignment.to_string()))
            .copied()
    }

    /// A pupil's recorded scores, in assignment creation order.
    pub fn scores_for(&self, pupil_id: &str) -> Vec<(&str, u8)> {
        self.assignments
            .iter()
            .filter_map(|a| {
                self.score(pupil_id, &a.name)
                    .map(|score| (a.name.as_str(), score))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AttendanceStatus::{Absent, Present};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn store_with_pupils() -> RecordStore {
        let mut store = RecordStore::new();
        store.add_pupil("P1001", "Alex Brown").unwrap();
        store.add_pupil("P1002", "Sam Wilson").unwrap();
        store.add_pupil("P1003", "Taylor Green").unwrap();
        store.add_assignment("Math Test").unwrap();
        store
    }

    fn full_attendance() -> Vec<AttendanceEntry> {
        vec![
            AttendanceEntry::new("P1001", Present),
            AttendanceEntry::new("P1002", Absent),
            AttendanceEntry::new("P1003", Present),
        ]
    }

    #[test]
    fn duplicate_pupil_keeps_first_name() {
        let mut store = store_with_pupils();
        let err = store.add_pupil("P1001", "Someone Else").unwrap_err();
        assert_eq!(err.key_kind(), Some(KeyKind::Pupil));
        assert_eq!(store.pupil("P1001").unwrap().name, "Alex Brown");
        assert_eq!(store.pupil_count(), 3);
    }

    #[test]
    fn pupils_keep_registration_order() {
        let mut store = store_with_pupils();
        store.add_pupil("A0001", "First Alphabetically").unwrap();
        let ids: Vec<&str> = store.pupils().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["P1001", "P1002", "P1003", "A0001"]);
    }

    #[test]
    fn duplicate_assignment_rejected() {
        let mut store = store_with_pupils();
        let err = store.add_assignment("Math Test").unwrap_err();
        assert_eq!(
            err,
            RecordError::DuplicateKey {
                kind: KeyKind::Assignment,
                key: "Math Test".into()
            }
        );
        assert_eq!(store.assignment_count(), 1);
    }

    #[test]
    fn second_attendance_for_same_date_rejected() {
        let mut store = store_with_pupils();
        store.record_attendance(day(16), full_attendance()).unwrap();

        let all_present = vec![
            AttendanceEntry::new("P1001", Present),
            AttendanceEntry::new("P1002", Present),
            AttendanceEntry::new("P1003", Present),
        ];
        let err = store.record_attendance(day(16), all_present).unwrap_err();
        assert_eq!(err.key_kind(), Some(KeyKind::AttendanceDay));

        let kept = store.attendance_day(day(16)).unwrap();
        assert_eq!(kept.entries, full_attendance());
        assert_eq!(store.attendance_day_count(), 1);
    }

    #[test]
    fn attendance_with_unknown_pupil_stores_nothing() {
        let mut store = store_with_pupils();
        let mut entries = full_attendance();
        entries.push(AttendanceEntry::new("P9999", Present));
        assert_eq!(
            store.record_attendance(day(16), entries),
            Err(RecordError::UnknownPupil("P9999".into()))
        );
        assert!(store.attendance_day(day(16)).is_none());
    }

    #[test]
    fn attendance_must_cover_every_pupil_once() {
        let mut store = store_with_pupils();

        let mut missing = full_attendance();
        missing.pop();
        assert_eq!(
            store.record_attendance(day(16), missing),
            Err(RecordError::IncompleteAttendance("P1003".into()))
        );

        let mut doubled = full_attendance();
        doubled.push(AttendanceEntry::new("P1002", Present));
        let err = store.record_attendance(day(16), doubled).unwrap_err();
        assert_eq!(err.key_kind(), Some(KeyKind::Pupil));

        assert_eq!(store.attendance_day_count(), 0);
    }

    #[test]
    fn days_iterate_oldest_first() {
        let mut store = store_with_pupils();
        store.record_attendance(day(20), full_attendance()).unwrap();
        store.record_attendance(day(3), full_attendance()).unwrap();
        store.record_attendance(day(11), full_attendance()).unwrap();

        let dates: Vec<NaiveDate> = store.attendance_days().map(|d| d.date).collect();
        assert_eq!(dates, vec![day(3), day(11), day(20)]);
        assert_eq!(store.most_recent_day().unwrap().date, day(20));
    }

    #[test]
    fn record_score_validates_references_and_range() {
        let mut store = store_with_pupils();
        assert_eq!(
            store.record_score("P9999", "Math Test", 50),
            Err(RecordError::UnknownPupil("P9999".into()))
        );
        assert_eq!(
            store.record_score("P1001", "Art", 50),
            Err(RecordError::UnknownAssignment("Art".into()))
        );
        assert_eq!(
            store.record_score("P1001", "Math Test", 101),
            Err(RecordError::OutOfRange(101))
        );
        assert_eq!(
            store.record_score("P1001", "Math Test", -1),
            Err(RecordError::OutOfRange(-1))
        );
        assert_eq!(store.score("P1001", "Math Test"), None);

        store.record_score("P1001", "Math Test", 0).unwrap();
        store.record_score("P1002", "Math Test", 100).unwrap();
        assert_eq!(store.score("P1001", "Math Test"), Some(0));
        assert_eq!(store.score("P1002", "Math Test"), Some(100));
    }

    #[test]
    fn record_score_overwrites_previous() {
        let mut store = store_with_pupils();
        store.record_score("P1001", "Math Test", 72).unwrap();
        store.record_score("P1001", "Math Test", 85).unwrap();
        assert_eq!(store.scores_for("P1001"), vec![("Math Test", 85)]);
    }

    #[test]
    fn scores_follow_assignment_order() {
        let mut store = store_with_pupils();
        store.add_assignment("Science Project").unwrap();
        store.add_assignment("Reading Assignment").unwrap();
        store.record_score("P1001", "Reading Assignment", 70).unwrap();
        store.record_score("P1001", "Math Test", 88).unwrap();

        assert_eq!(
            store.scores_for("P1001"),
            vec![("Math Test", 88), ("Reading Assignment", 70)]
        );
        assert!(store.scores_for("P1002").is_empty());
    }
}
