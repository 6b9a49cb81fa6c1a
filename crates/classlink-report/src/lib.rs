//! classlink-report: Drawing backends for the classlink dashboard.
//!
//! Each backend implements `DashboardRenderer` from `classlink-core` and only
//! turns a precomputed `DashboardLayout` into text, SVG or a full HTML page.

pub mod html;
pub mod svg;
pub mod text;

pub use html::HtmlRenderer;
pub use svg::SvgRenderer;
pub use text::TextRenderer;

/// Escape a string for safe HTML/SVG insertion.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
