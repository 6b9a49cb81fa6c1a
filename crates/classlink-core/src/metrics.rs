//! Derived metrics over the record store.
//!
//! All functions are pure reads. Averages use the 0.0 sentinel for pupils
//! without scores, so "no data" and "scored zero" look the same here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::Pupil;
use crate::store::RecordStore;

/// Averages strictly below this mark a pupil as at risk.
pub const AT_RISK_THRESHOLD: f64 = 65.0;

/// Round to one decimal place, halves away from zero.
pub fn round_one_decimal(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Mean of a pupil's recorded scores, rounded to one decimal.
///
/// Returns 0.0 when the pupil has no scores (or is not registered).
pub fn average(store: &RecordStore, pupil_id: &str) -> f64 {
    let scores = store.scores_for(pupil_id);
    if scores.is_empty() {
        return 0.0;
    }
    let total: u32 = scores.iter().map(|&(_, s)| u32::from(s)).sum();
    round_one_decimal(f64::from(total) / scores.len() as f64)
}

/// Pupils whose average is below [`AT_RISK_THRESHOLD`], in registration order.
///
/// Pupils with no scores average 0.0 and are therefore always included.
pub fn at_risk(store: &RecordStore) -> Vec<&Pupil> {
    store
        .pupils()
        .iter()
        .filter(|p| average(store, &p.id) < AT_RISK_THRESHOLD)
        .collect()
}

/// Present/absent counts for one attendance day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceTally {
    pub present: usize,
    pub absent: usize,
}

/// Tally for a recorded date, or `None` if the date was never recorded.
///
/// `absent` is the *current* pupil count minus the present count, so pupils
/// registered after `date` are counted as absent on it.
pub fn attendance_tally(store: &RecordStore, date: NaiveDate) -> Option<AttendanceTally> {
    let day = store.attendance_day(date)?;
    let present = day.present_count();
    Some(AttendanceTally {
        present,
        absent: store.pupil_count().saturating_sub(present),
    })
}
