//! Core data model types for classlink.
//!
//! Pupils, attendance entries and assignments as held by the record store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

/// A registered pupil.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pupil {
    /// Unique identifier assigned at registration (e.g. "P1001").
    pub id: String,
    /// Display name.
    pub name: String,
}

/// A named unit of work that can carry one score per pupil.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub name: String,
}

/// Presence of a pupil on an attendance day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn is_present(self) -> bool {
        self == AttendanceStatus::Present
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "present"),
            AttendanceStatus::Absent => write!(f, "absent"),
        }
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "present" | "here" | "y" | "yes" => Ok(AttendanceStatus::Present),
            "absent" | "n" | "no" => Ok(AttendanceStatus::Absent),
            other => Err(format!("unknown attendance status: {other}")),
        }
    }
}

/// One pupil's status within an attendance day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub pupil_id: String,
    pub status: AttendanceStatus,
}

impl AttendanceEntry {
    pub fn new(pupil_id: impl Into<String>, status: AttendanceStatus) -> Self {
        Self {
            pupil_id: pupil_id.into(),
            status,
        }
    }
}

/// An immutable snapshot of presence for every pupil on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceDay {
    pub date: NaiveDate,
    /// Entries in the order the caller supplied them.
    pub entries: Vec<AttendanceEntry>,
}

impl AttendanceDay {
    /// Number of entries marked present.
    pub fn present_count(&self) -> usize {
        self.entries.iter().filter(|e| e.status.is_present()).count()
    }

    pub fn status_of(&self, pupil_id: &str) -> Option<AttendanceStatus> {
        self.entries
            .iter()
            .find(|e| e.pupil_id == pupil_id)
            .map(|e| e.status)
    }
}
