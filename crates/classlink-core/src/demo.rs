//! The sample classroom that ships with classlink.
//!
//! Three pupils, three assignments, one attendance day and six scores, useful
//! for trying the reports without typing a class in first.

use chrono::NaiveDate;

use crate::error::RecordError;
use crate::model::AttendanceEntry;
use crate::model::AttendanceStatus::{Absent, Present};
use crate::store::RecordStore;

const PUPILS: [(&str, &str); 3] = [
    ("P1001", "Alex Brown"),
    ("P1002", "Sam Wilson"),
    ("P1003", "Taylor Green"),
];

const ASSIGNMENTS: [&str; 3] = ["Math Test", "Science Project", "Reading Assignment"];

const SCORES: [(&str, &str, i32); 6] = [
    ("P1001", "Math Test", 88),
    ("P1001", "Science Project", 92),
    ("P1002", "Math Test", 72),
    ("P1002", "Science Project", 68),
    ("P1003", "Math Test", 58),
    ("P1003", "Science Project", 62),
];

/// Build the sample store with its attendance day keyed on `today`.
pub fn demo_store(today: NaiveDate) -> Result<RecordStore, RecordError> {
    let mut store = RecordStore::new();
    for (id, name) in PUPILS {
        store.add_pupil(id, name)?;
    }
    for name in ASSIGNMENTS {
        store.add_assignment(name)?;
    }
    store.record_attendance(
        today,
        vec![
            AttendanceEntry::new("P1001", Present),
            AttendanceEntry::new("P1002", Absent),
            AttendanceEntry::new("P1003", Present),
        ],
    )?;
    for (pupil, assignment, score) in SCORES {
        store.record_score(pupil, assignment, score)?;
    }
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{at_risk, attendance_tally, average};

    #[test]
    fn demo_store_matches_sample_class() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let store = demo_store(today).unwrap();

        assert_eq!(store.pupil_count(), 3);
        assert_eq!(store.assignment_count(), 3);
        assert_eq!(store.attendance_day_count(), 1);
        assert_eq!(average(&store, "P1001"), 90.0);
        assert_eq!(average(&store, "P1002"), 70.0);
        assert_eq!(average(&store, "P1003"), 60.0);

        let risky: Vec<&str> = at_risk(&store).into_iter().map(|p| p.id.as_str()).collect();
        assert_eq!(risky, vec!["P1003"]);

        let tally = attendance_tally(&store, today).unwrap();
        assert_eq!((tally.present, tally.absent), (2, 1));
    }
}
