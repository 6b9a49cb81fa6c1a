//! Dashboard layout: fixed metric tiles computed from the record store.
//!
//! Coordinates use a y-up plane centred on the origin. A tile's `(x, y)` is its
//! top-left corner and it extends `width` to the right and `height` downwards.
//! Drawing is left to a [`DashboardRenderer`]; nothing here performs I/O.

use serde::{Deserialize, Serialize};

use crate::metrics::{at_risk, attendance_tally};
use crate::store::RecordStore;

pub const TILE_WIDTH: i32 = 130;
pub const TILE_HEIGHT: i32 = 90;

pub const DEFAULT_TITLE: &str = "Class Management Dashboard";
pub const HEADER_COLOR: &str = "#333366";
pub const TILE_COLOR: &str = "#333333";
pub const AT_RISK_COLOR: &str = "#cc0000";
pub const PRESENT_COLOR: &str = "#009900";

const HEADER_ORIGIN: (i32, i32) = (-210, 210);
const PUPILS_AT: (i32, i32) = (-210, 160);
const DAYS_AT: (i32, i32) = (-70, 160);
const ASSIGNMENTS_AT: (i32, i32) = (70, 160);
const AT_RISK_AT: (i32, i32) = (-140, 60);
const PRESENT_AT: (i32, i32) = (0, 60);

/// Offsets of the two text lines from a tile's top-left corner.
const LABEL_OFFSET: (i32, i32) = (65, -25);
const VALUE_OFFSET: (i32, i32) = (65, -55);

/// One labelled metric box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub label: String,
    pub value: usize,
    /// CSS-style hex color for the outline and text.
    pub color: String,
}

impl Tile {
    fn at((x, y): (i32, i32), label: impl Into<String>, value: usize, color: &str) -> Self {
        Self {
            x,
            y,
            width: TILE_WIDTH,
            height: TILE_HEIGHT,
            label: label.into(),
            value,
            color: color.to_string(),
        }
    }

    /// Centre point for the label line.
    pub fn label_anchor(&self) -> (i32, i32) {
        (self.x + LABEL_OFFSET.0, self.y + LABEL_OFFSET.1)
    }

    /// Centre point for the value line.
    pub fn value_anchor(&self) -> (i32, i32) {
        (self.x + VALUE_OFFSET.0, self.y + VALUE_OFFSET.1)
    }
}

/// The dashboard heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub color: String,
}

/// Everything a backend needs to draw the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardLayout {
    pub header: Header,
    pub tiles: Vec<Tile>,
}

/// The ordered tiles for the current store state.
///
/// Always pupils, attendance days, assignments and at-risk count; a fifth
/// tile with the present count of the most recent day is added once any
/// attendance has been recorded.
pub fn dashboard_tiles(store: &RecordStore) -> Vec<Tile> {
    let mut tiles = vec![
        Tile::at(PUPILS_AT, "Pupils", store.pupil_count(), TILE_COLOR),
        Tile::at(
            DAYS_AT,
            "Attendance Days",
            store.attendance_day_count(),
            TILE_COLOR,
        ),
        Tile::at(
            ASSIGNMENTS_AT,
            "Assignments",
            store.assignment_count(),
            TILE_COLOR,
        ),
        Tile::at(AT_RISK_AT, "Needing Help", at_risk(store).len(), AT_RISK_COLOR),
    ];

    if let Some(day) = store.most_recent_day() {
        let present = attendance_tally(store, day.date).map_or(0, |t| t.present);
        tiles.push(Tile::at(
            PRESENT_AT,
            format!("Present {}", day.date),
            present,
            PRESENT_COLOR,
        ));
    }

    tiles
}

impl DashboardLayout {
    pub fn build(store: &RecordStore, title: &str) -> Self {
        Self {
            header: Header {
                x: HEADER_ORIGIN.0,
                y: HEADER_ORIGIN.1,
                text: title.to_string(),
                color: HEADER_COLOR.to_string(),
            },
            tiles: dashboard_tiles(store),
        }
    }

    /// Smallest box `(min_x, min_y, max_x, max_y)` holding the header origin
    /// and every tile.
    pub fn bounds(&self) -> (i32, i32, i32, i32) {
        self.tiles.iter().fold(
            (self.header.x, self.header.y, self.header.x, self.header.y),
            |(min_x, min_y, max_x, max_y), t| {
                (
                    min_x.min(t.x),
                    min_y.min(t.y - t.height),
                    max_x.max(t.x + t.width),
                    max_y.max(t.y),
                )
            },
        )
    }
}

/// A drawing backend for the dashboard.
///
/// Backends draw one rectangle and two lines of text (label, value) per tile
/// and hold no business logic.
pub trait DashboardRenderer {
    /// Short backend name (e.g. "svg").
    fn name(&self) -> &str;

    /// Render the layout into the backend's output format.
    fn render(&self, layout: &DashboardLayout) -> String;
}

/// Renderer that draws nothing.
pub struct NoopRenderer;

impl DashboardRenderer for NoopRenderer {
    fn name(&self) -> &str {
        "noop"
    }

    fn render(&self, _: &DashboardLayout) -> String {
        String::new()
    }
}
