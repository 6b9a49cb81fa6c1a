//! SVG dashboard backend.

use std::path::Path;

use anyhow::{Context, Result};

use classlink_core::dashboard::{DashboardLayout, DashboardRenderer};

use crate::html_escape;

/// Blank space around the drawing, in layout units.
const MARGIN: i32 = 20;
/// Room above the header origin for the header text.
const HEADER_HEIGHT: i32 = 24;

pub struct SvgRenderer;

impl DashboardRenderer for SvgRenderer {
    fn name(&self) -> &str {
        "svg"
    }

    fn render(&self, layout: &DashboardLayout) -> String {
        generate_svg(layout)
    }
}

/// Generate a standalone SVG document for the layout.
///
/// The layout's y-up coordinates are flipped into SVG's y-down space.
pub fn generate_svg(layout: &DashboardLayout) -> String {
    let (min_x, min_y, max_x, max_y) = layout.bounds();
    let top = max_y + HEADER_HEIGHT;
    let width = max_x - min_x + 2 * MARGIN;
    let height = top - min_y + 2 * MARGIN;

    let sx = |x: i32| x - min_x + MARGIN;
    let sy = |y: i32| top - y + MARGIN;

    let mut svg = format!(
        "<svg width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" xmlns=\"http://www.w3.org/2000/svg\">\n"
    );
    svg.push_str(&format!(
        "  <rect width=\"{width}\" height=\"{height}\" fill=\"#f5f5f5\"/>\n"
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" font-family=\"Verdana\" font-size=\"14\" font-weight=\"bold\" fill=\"{}\">{}</text>\n",
        sx(layout.header.x),
        sy(layout.header.y),
        layout.header.color,
        html_escape(&layout.header.text)
    ));

    for tile in &layout.tiles {
        let (lx, ly) = tile.label_anchor();
        let (vx, vy) = tile.value_anchor();
        svg.push_str(&format!(
            "  <g class=\"tile\">\n    <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1\"/>\n",
            sx(tile.x),
            sy(tile.y),
            tile.width,
            tile.height,
            tile.color
        ));
        svg.push_str(&format!(
            "    <text x=\"{}\" y=\"{}\" font-family=\"Arial\" font-size=\"9\" text-anchor=\"middle\" fill=\"{}\">{}</text>\n",
            sx(lx),
            sy(ly),
            tile.color,
            html_escape(&tile.label)
        ));
        svg.push_str(&format!(
            "    <text x=\"{}\" y=\"{}\" font-family=\"Arial\" font-size=\"12\" font-weight=\"bold\" text-anchor=\"middle\" fill=\"{}\">{}</text>\n  </g>\n",
            sx(vx),
            sy(vy),
            tile.color,
            tile.value
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

/// Write the SVG dashboard to a file, creating parent directories.
pub fn write_svg(layout: &DashboardLayout, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, generate_svg(layout))
        .with_context(|| format!("failed to write dashboard to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use classlink_core::dashboard::{DEFAULT_TITLE, PRESENT_COLOR};
    use classlink_core::demo::demo_store;
    use classlink_core::RecordStore;

    fn demo_layout() -> DashboardLayout {
        let today = chrono::NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        DashboardLayout::build(&demo_store(today).unwrap(), DEFAULT_TITLE)
    }

    #[test]
    fn svg_has_one_group_per_tile() {
        let svg = generate_svg(&demo_layout());
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<g class=\"tile\">").count(), 5);
        assert!(svg.contains("Present 2026-10-16"));
        assert!(svg.contains(PRESENT_COLOR));
    }

    #[test]
    fn svg_flips_y_axis() {
        let svg = generate_svg(&demo_layout());
        // Top row tile (y=160) sits above the bottom row tile (y=60).
        // bounds top = 210 + 24 = 234, so y=160 -> 94 and y=60 -> 194.
        assert!(svg.contains("<rect x=\"20\" y=\"94\" width=\"130\" height=\"90\""));
        assert!(svg.contains("<rect x=\"230\" y=\"194\" width=\"130\" height=\"90\""));
    }

    #[test]
    fn svg_escapes_header() {
        let layout = DashboardLayout::build(&RecordStore::new(), "Room <12> & co");
        let svg = SvgRenderer.render(&layout);
        assert!(svg.contains("Room &lt;12&gt; &amp; co"));
        assert_eq!(svg.matches("<g class=\"tile\">").count(), 4);
    }

    #[test]
    fn write_svg_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/dashboard.svg");
        write_svg(&demo_layout(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Needing Help"));
    }

    #[test]
    fn write_svg_names_directory_it_could_not_create() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("taken");
        std::fs::write(&blocker, "").unwrap();

        let err = write_svg(&demo_layout(), &blocker.join("out/dashboard.svg")).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("failed to create directory"));
        assert!(message.contains("taken"));
    }
}
