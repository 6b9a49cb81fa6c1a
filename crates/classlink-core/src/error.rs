//! Record store error types.
//!
//! Every variant is a caller error surfaced synchronously from the failing
//! mutation. A failed mutation never leaves the store partially updated.

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

/// Which uniqueness rule a [`RecordError::DuplicateKey`] violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Pupil,
    Assignment,
    AttendanceDay,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::Pupil => write!(f, "pupil"),
            KeyKind::Assignment => write!(f, "assignment"),
            KeyKind::AttendanceDay => write!(f, "attendance day"),
        }
    }
}

/// Errors returned by [`crate::store::RecordStore`] mutators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The id, assignment name or date already exists.
    #[error("{kind} '{key}' already exists")]
    DuplicateKey { kind: KeyKind, key: String },

    /// A pupil id that is not registered.
    #[error("unknown pupil: {0}")]
    UnknownPupil(String),

    /// An assignment name that was never created.
    #[error("unknown assignment: {0}")]
    UnknownAssignment(String),

    /// A score outside `0..=100`.
    #[error("score {0} is out of range (0-100)")]
    OutOfRange(i32),

    /// An attendance list that omits a registered pupil.
    #[error("attendance is missing an entry for pupil {0}")]
    IncompleteAttendance(String),
}

impl RecordError {
    pub(crate) fn duplicate(kind: KeyKind, key: impl Into<String>) -> Self {
        RecordError::DuplicateKey {
            kind,
            key: key.into(),
        }
    }

    pub(crate) fn duplicate_day(date: NaiveDate) -> Self {
        Self::duplicate(KeyKind::AttendanceDay, date.to_string())
    }

    /// Returns the key kind if this is a uniqueness violation.
    pub fn key_kind(&self) -> Option<KeyKind> {
        match self {
            RecordError::DuplicateKey { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
