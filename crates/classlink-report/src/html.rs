//! HTML page backend.
//!
//! Produces a self-contained HTML file: the SVG dashboard followed by the
//! attendance, grade summary and at-risk reports, with all CSS inlined.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use classlink_core::dashboard::{DashboardLayout, DashboardRenderer};
use classlink_core::report::{
    AtRiskReport, AttendanceReport, ClassReport, GradeSummaryReport, PupilAverage, ReportKind,
};

use crate::html_escape;
use crate::svg::generate_svg;

/// Renders the dashboard inside a page that also carries the reports.
pub struct HtmlRenderer {
    pub reports: Vec<ClassReport>,
    pub generated_on: NaiveDate,
}

impl DashboardRenderer for HtmlRenderer {
    fn name(&self) -> &str {
        "html"
    }

    fn render(&self, layout: &DashboardLayout) -> String {
        generate_html(layout, &self.reports, self.generated_on)
    }
}

/// Generate an HTML page from a dashboard layout and any reports.
pub fn generate_html(
    layout: &DashboardLayout,
    reports: &[ClassReport],
    generated_on: NaiveDate,
) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>{}</title>\n",
        html_escape(&layout.header.text)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&layout.header.text)));
    html.push_str(&format!(
        "<p class=\"meta\">{} tiles | generated {}</p>\n",
        layout.tiles.len(),
        generated_on.format("%Y-%m-%d")
    ));
    html.push_str("</header>\n");

    html.push_str("<section class=\"dashboard\">\n");
    html.push_str(&generate_svg(layout));
    html.push_str("</section>\n");

    for report in reports {
        html.push_str(&format!(
            "<section class=\"report\" id=\"{}\">\n<h2>{}</h2>\n",
            report.kind(),
            report.kind().title()
        ));
        match report {
            ClassReport::Attendance(r) => push_attendance(&mut html, r),
            ClassReport::GradeSummary(r) => push_grades(&mut html, r),
            ClassReport::AtRisk { result } => push_at_risk(&mut html, result),
        }
        html.push_str("</section>\n");
    }

    if !reports.is_empty() {
        html.push_str("<section class=\"raw-data\">\n");
        html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
        html.push_str("<pre><code>");
        html.push_str(&html_escape(
            &serde_json::to_string_pretty(reports).unwrap_or_default(),
        ));
        html.push_str("</code></pre>\n");
        html.push_str("</details>\n</section>\n");
    }

    html.push_str("</body>\n</html>");
    html
}

fn push_attendance(html: &mut String, report: &AttendanceReport) {
    if report.rows.is_empty() {
        html.push_str("<p class=\"empty\">No attendance recorded</p>\n");
        return;
    }
    html.push_str("<table>\n<thead><tr><th>Date</th><th>Present</th><th>Absent</th></tr></thead>\n<tbody>\n");
    for r in &report.rows {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            r.date, r.present, r.absent
        ));
    }
    html.push_str("</tbody></table>\n");
}

fn push_grades(html: &mut String, report: &GradeSummaryReport) {
    if report.rows.is_empty() {
        html.push_str("<p class=\"empty\">No pupils registered</p>\n");
        return;
    }
    push_average_table(html, &report.rows, "");
}

fn push_at_risk(html: &mut String, report: &AtRiskReport) {
    match report {
        AtRiskReport::NoPupilsAtRisk => {
            html.push_str("<p class=\"empty\">All pupils meeting expectations</p>\n")
        }
        AtRiskReport::AtRisk(rows) => push_average_table(html, rows, "at-risk"),
    }
}

fn push_average_table(html: &mut String, rows: &[PupilAverage], row_class: &str) {
    html.push_str("<table>\n<thead><tr><th>Name</th><th>ID</th><th>Average</th></tr></thead>\n<tbody>\n");
    for r in rows {
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{:.1}</td></tr>\n",
            row_class,
            html_escape(&r.name),
            html_escape(&r.id),
            r.average
        ));
    }
    html.push_str("</tbody></table>\n");
}

/// Write an HTML page to a file.
pub fn write_html_report(
    layout: &DashboardLayout,
    reports: &[ClassReport],
    generated_on: NaiveDate,
    path: &Path,
) -> Result<()> {
    let html = generate_html(layout, reports, generated_on);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

/// All three reports, in menu order.
pub fn all_reports(store: &classlink_core::RecordStore) -> Vec<ClassReport> {
    [
        ReportKind::Attendance,
        ReportKind::GradeSummary,
        ReportKind::AtRisk,
    ]
    .into_iter()
    .map(|kind| ClassReport::build(kind, store))
    .collect()
}

const CSS: &str = r#"
:root { --bg: #f5f5f5; --fg: #1a1a1a; --border: #d1d5db; --risk: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --risk: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.empty { font-style: italic; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.at-risk { background: var(--risk); }
svg { margin: 1rem 0; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use classlink_core::dashboard::DEFAULT_TITLE;
    use classlink_core::demo::demo_store;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn html_page_contains_dashboard_and_reports() {
        let store = demo_store(today()).unwrap();
        let layout = DashboardLayout::build(&store, DEFAULT_TITLE);
        let html = generate_html(&layout, &all_reports(&store), today());

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("<svg"));
        assert!(html.contains("Attendance Overview"));
        assert!(html.contains("<td>2026-10-16</td><td>2</td><td>1</td>"));
        assert!(html.contains("<td>Alex Brown</td><td>P1001</td><td>90.0</td>"));
        assert!(html.contains("<tr class=\"at-risk\"><td>Taylor Green</td>"));
    }

    #[test]
    fn html_renderer_reports_empty_at_risk() {
        let store = classlink_core::RecordStore::new();
        let renderer = HtmlRenderer {
            reports: all_reports(&store),
            generated_on: today(),
        };
        let html = renderer.render(&DashboardLayout::build(&store, DEFAULT_TITLE));
        assert!(html.contains("All pupils meeting expectations"));
        assert!(html.contains("No attendance recorded"));
        assert_eq!(renderer.name(), "html");
    }

    #[test]
    fn html_report_write_to_file() {
        let store = demo_store(today()).unwrap();
        let layout = DashboardLayout::build(&store, DEFAULT_TITLE);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.html");

        write_html_report(&layout, &all_reports(&store), today(), &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Class Management Dashboard"));
    }
}
