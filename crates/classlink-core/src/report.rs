//! Report formatting: attendance by day, grade summary and the at-risk list.
//!
//! Reports are plain row structures built from the metrics. Each one renders
//! as console text (via `Display`), as markdown, or as JSON through serde.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::metrics::{at_risk, attendance_tally, average};
use crate::model::Pupil;
use crate::store::RecordStore;

/// One recorded date with its tally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRow {
    pub date: NaiveDate,
    pub present: usize,
    pub absent: usize,
}

/// Attendance per recorded day, most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceReport {
    pub rows: Vec<AttendanceRow>,
}

/// A pupil with their current average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PupilAverage {
    pub name: String,
    pub id: String,
    pub average: f64,
}

impl PupilAverage {
    fn of(store: &RecordStore, pupil: &Pupil) -> Self {
        Self {
            name: pupil.name.clone(),
            id: pupil.id.clone(),
            average: average(store, &pupil.id),
        }
    }
}

/// Every pupil's average, in registration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeSummaryReport {
    pub rows: Vec<PupilAverage>,
}

/// Pupils below the at-risk threshold.
///
/// An empty result is its own variant so renderers always say so explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "pupils", rename_all = "snake_case")]
pub enum AtRiskReport {
    NoPupilsAtRisk,
    AtRisk(Vec<PupilAverage>),
}

pub fn attendance_report(store: &RecordStore) -> AttendanceReport {
    let rows = store
        .attendance_days()
        .rev()
        .filter_map(|day| {
            attendance_tally(store, day.date).map(|t| AttendanceRow {
                date: day.date,
                present: t.present,
                absent: t.absent,
            })
        })
        .collect();
    AttendanceReport { rows }
}

pub fn grade_summary_report(store: &RecordStore) -> GradeSummaryReport {
    GradeSummaryReport {
        rows: store
            .pupils()
            .iter()
            .map(|p| PupilAverage::of(store, p))
            .collect(),
    }
}

pub fn at_risk_report(store: &RecordStore) -> AtRiskReport {
    let rows: Vec<PupilAverage> = at_risk(store)
        .into_iter()
        .map(|p| PupilAverage::of(store, p))
        .collect();
    if rows.is_empty() {
        AtRiskReport::NoPupilsAtRisk
    } else {
        AtRiskReport::AtRisk(rows)
    }
}

impl AtRiskReport {
    pub fn is_empty(&self) -> bool {
        matches!(self, AtRiskReport::NoPupilsAtRisk)
    }

    pub fn pupils(&self) -> &[PupilAverage] {
        match self {
            AtRiskReport::NoPupilsAtRisk => &[],
            AtRiskReport::AtRisk(rows) => rows,
        }
    }
}

/// Which report to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Attendance,
    GradeSummary,
    AtRisk,
}

impl ReportKind {
    pub fn title(self) -> &'static str {
        match self {
            ReportKind::Attendance => "Attendance Overview",
            ReportKind::GradeSummary => "Grade Summary",
            ReportKind::AtRisk => "Pupils Needing Help",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Attendance => write!(f, "attendance"),
            ReportKind::GradeSummary => write!(f, "grades"),
            ReportKind::AtRisk => write!(f, "at-risk"),
        }
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "attendance" => Ok(ReportKind::Attendance),
            "grades" | "grade-summary" | "summary" => Ok(ReportKind::GradeSummary),
            "at-risk" | "at_risk" | "needing-help" => Ok(ReportKind::AtRisk),
            other => Err(format!("unknown report: {other}")),
        }
    }
}

/// Any of the three reports, for callers that pick one at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "report", rename_all = "snake_case")]
pub enum ClassReport {
    Attendance(AttendanceReport),
    GradeSummary(GradeSummaryReport),
    AtRisk { result: AtRiskReport },
}

impl ClassReport {
    pub fn build(kind: ReportKind, store: &RecordStore) -> Self {
        match kind {
            ReportKind::Attendance => ClassReport::Attendance(attendance_report(store)),
            ReportKind::GradeSummary => ClassReport::GradeSummary(grade_summary_report(store)),
            ReportKind::AtRisk => ClassReport::AtRisk {
                result: at_risk_report(store),
            },
        }
    }

    pub fn kind(&self) -> ReportKind {
        match self {
            ClassReport::Attendance(_) => ReportKind::Attendance,
            ClassReport::GradeSummary(_) => ReportKind::GradeSummary,
            ClassReport::AtRisk { .. } => ReportKind::AtRisk,
        }
    }

    pub fn to_markdown(&self) -> String {
        match self {
            ClassReport::Attendance(r) => r.to_markdown(),
            ClassReport::GradeSummary(r) => r.to_markdown(),
            ClassReport::AtRisk { result } => result.to_markdown(),
        }
    }
}

impl fmt::Display for ClassReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassReport::Attendance(r) => fmt::Display::fmt(r, f),
            ClassReport::GradeSummary(r) => fmt::Display::fmt(r, f),
            ClassReport::AtRisk { result } => fmt::Display::fmt(result, f),
        }
    }
}

// ---------------------------------------------------------------------------
// Console text
// ---------------------------------------------------------------------------

impl fmt::Display for AttendanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "No attendance recorded");
        }
        for r in &self.rows {
            writeln!(f, "{}: {} present, {} absent", r.date, r.present, r.absent)?;
        }
        Ok(())
    }
}

impl fmt::Display for GradeSummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "No pupils registered");
        }
        for r in &self.rows {
            writeln!(f, "{} (ID: {}): {:.1} average", r.name, r.id, r.average)?;
        }
        Ok(())
    }
}

impl fmt::Display for AtRiskReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtRiskReport::NoPupilsAtRisk => writeln!(f, "All pupils meeting expectations"),
            AtRiskReport::AtRisk(rows) => {
                for r in rows {
                    writeln!(
                        f,
                        "{} (ID: {}) - Current average: {:.1}",
                        r.name, r.id, r.average
                    )?;
                }
                Ok(())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Markdown
// ---------------------------------------------------------------------------

impl AttendanceReport {
    pub fn to_markdown(&self) -> String {
        let mut md = format!("### {}\n\n", ReportKind::Attendance.title());
        if self.rows.is_empty() {
            md.push_str("_No attendance recorded._\n");
            return md;
        }
        md.push_str("| Date | Present | Absent |\n");
        md.push_str("|------|---------|--------|\n");
        for r in &self.rows {
            md.push_str(&format!("| {} | {} | {} |\n", r.date, r.present, r.absent));
        }
        md
    }
}

impl GradeSummaryReport {
    pub fn to_markdown(&self) -> String {
        let mut md = format!("### {}\n\n", ReportKind::GradeSummary.title());
        if self.rows.is_empty() {
            md.push_str("_No pupils registered._\n");
            return md;
        }
        push_average_table(&mut md, &self.rows);
        md
    }
}

impl AtRiskReport {
    pub fn to_markdown(&self) -> String {
        let mut md = format!("### {}\n\n", ReportKind::AtRisk.title());
        match self {
            AtRiskReport::NoPupilsAtRisk => md.push_str("_All pupils meeting expectations._\n"),
            AtRiskReport::AtRisk(rows) => push_average_table(&mut md, rows),
        }
        md
    }
}

fn push_average_table(md: &mut String, rows: &[PupilAverage]) {
    md.push_str("| Name | ID | Average |\n");
    md.push_str("|------|----|---------|\n");
    for r in rows {
        md.push_str(&format!("| {} | {} | {:.1} |\n", r.name, r.id, r.average));
    }
}
