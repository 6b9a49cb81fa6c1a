//! The `classlink dashboard` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use classlink_core::clock::{Clock, SystemClock};
use classlink_core::dashboard::{DashboardLayout, DashboardRenderer};
use classlink_report::html::all_reports;
use classlink_report::{HtmlRenderer, SvgRenderer, TextRenderer};

use crate::config::load_config_from;

pub fn execute(
    demo: bool,
    format: String,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = super::initial_store(demo || config.seed_demo, &SystemClock)?;
    let layout = DashboardLayout::build(&store, &config.class_name);

    let (renderer, extension): (Box<dyn DashboardRenderer>, &str) = match format.as_str() {
        "text" => (Box::new(TextRenderer), "txt"),
        "svg" => (Box::new(SvgRenderer), "svg"),
        "html" => (
            Box::new(HtmlRenderer {
                reports: all_reports(&store),
                generated_on: SystemClock.today(),
            }),
            "html",
        ),
        "json" => {
            println!("{}", serde_json::to_string_pretty(&layout)?);
            return Ok(());
        }
        other => anyhow::bail!("unknown dashboard format: {other} (expected text, svg, html or json)"),
    };

    let rendered = renderer.render(&layout);

    // Text goes to the terminal unless a file was asked for.
    let path = match (output, renderer.name()) {
        (Some(path), _) => path,
        (None, "text") => {
            print!("{rendered}");
            return Ok(());
        }
        (None, _) => config.output_dir.join(format!("dashboard.{extension}")),
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(&path, rendered)
        .with_context(|| format!("failed to write dashboard to {}", path.display()))?;
    tracing::info!(renderer = renderer.name(), tiles = layout.tiles.len(), "dashboard written");
    println!("Dashboard saved to: {}", path.display());

    Ok(())
}
