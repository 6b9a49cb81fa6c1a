//! The `classlink report` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use classlink_core::clock::SystemClock;
use classlink_core::report::{ClassReport, PupilAverage, ReportKind};

use crate::config::{load_config_from, ReportFormat};

pub fn execute(
    kind: String,
    demo: bool,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let kind: ReportKind = kind.parse().map_err(anyhow::Error::msg)?;
    let format = match format {
        Some(f) => f.parse().map_err(anyhow::Error::msg)?,
        None => config.default_format,
    };

    let store = super::initial_store(demo || config.seed_demo, &SystemClock)?;
    let report = ClassReport::build(kind, &store);

    match format {
        ReportFormat::Text => {
            println!("«« {} »»", kind.title());
            print!("{report}");
        }
        ReportFormat::Table => {
            println!("{}", kind.title());
            println!("{}", report_table(&report));
        }
        ReportFormat::Markdown => print!("{}", report.to_markdown()),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

fn report_table(report: &ClassReport) -> Table {
    let mut table = Table::new();
    match report {
        ClassReport::Attendance(r) => {
            table.set_header(vec!["Date", "Present", "Absent"]);
            for row in &r.rows {
                table.add_row(vec![
                    Cell::new(row.date),
                    Cell::new(row.present),
                    Cell::new(row.absent),
                ]);
            }
        }
        ClassReport::GradeSummary(r) => add_average_rows(&mut table, &r.rows),
        ClassReport::AtRisk { result } if result.is_empty() => {
            table.set_header(vec!["Result"]);
            table.add_row(vec!["All pupils meeting expectations"]);
        }
        ClassReport::AtRisk { result } => add_average_rows(&mut table, result.pupils()),
    }
    table
}

fn add_average_rows(table: &mut Table, rows: &[PupilAverage]) {
    table.set_header(vec!["Name", "ID", "Average"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.name),
            Cell::new(&row.id),
            Cell::new(format!("{:.1}", row.average)),
        ]);
    }
}
