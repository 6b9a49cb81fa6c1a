//! Plain-text dashboard for the console.
//!
//! Tiles sharing a `y` form one row of boxes. Horizontal offsets are scaled
//! from layout units to columns so the staggered second row stays staggered.

use std::collections::BTreeMap;

use classlink_core::dashboard::{DashboardLayout, DashboardRenderer, Tile};

/// Minimum inner width of a tile box, in characters.
const MIN_INNER_WIDTH: usize = 18;
/// Layout units per tile slot (tile width plus gap).
const SLOT_UNITS: i32 = 140;

pub struct TextRenderer;

impl DashboardRenderer for TextRenderer {
    fn name(&self) -> &str {
        "text"
    }

    fn render(&self, layout: &DashboardLayout) -> String {
        render_text(layout)
    }
}

/// Render the layout as boxed text, header first.
pub fn render_text(layout: &DashboardLayout) -> String {
    let mut out = String::new();
    out.push_str(&layout.header.text);
    out.push('\n');
    out.push_str(&"=".repeat(layout.header.text.chars().count()));
    out.push('\n');

    if layout.tiles.is_empty() {
        return out;
    }

    let inner = layout
        .tiles
        .iter()
        .map(|t| t.label.chars().count().max(t.value.to_string().len()) + 2)
        .max()
        .unwrap_or(0)
        .max(MIN_INNER_WIDTH);
    let slot = inner + 3;
    let min_x = layout.tiles.iter().map(|t| t.x).min().unwrap_or(0);

    // Rows keyed by y, top row first.
    let mut rows: BTreeMap<std::cmp::Reverse<i32>, Vec<&Tile>> = BTreeMap::new();
    for tile in &layout.tiles {
        rows.entry(std::cmp::Reverse(tile.y)).or_default().push(tile);
    }

    for tiles in rows.values_mut() {
        tiles.sort_by_key(|t| t.x);
        let mut lines = vec![String::new(); 4];
        for tile in tiles.iter() {
            let column = ((tile.x - min_x) as usize * slot) / SLOT_UNITS as usize;
            for (line, text) in lines.iter_mut().zip(tile_box(tile, inner)) {
                let used = line.chars().count();
                // Keep at least one space between neighbouring boxes.
                let pad = if used == 0 {
                    column
                } else {
                    column.saturating_sub(used).max(1)
                };
                line.push_str(&" ".repeat(pad));
                line.push_str(&text);
            }
        }
        for line in lines {
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }

    out
}

fn tile_box(tile: &Tile, inner: usize) -> [String; 4] {
    let border = format!("+{}+", "-".repeat(inner));
    [
        border.clone(),
        format!("|{:^inner$}|", tile.label),
        format!("|{:^inner$}|", tile.value),
        border,
    ]
}
