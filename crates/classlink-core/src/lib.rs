//! classlink-core: Record store, metrics, reports and dashboard layout.
//!
//! This crate holds the classroom records (pupils, attendance, assignments,
//! grade book) and every value derived from them. It performs no I/O; the
//! CLI and the rendering backends consume what it produces.

pub mod clock;
pub mod dashboard;
pub mod demo;
pub mod error;
pub mod metrics;
pub mod model;
pub mod report;
pub mod store;

pub use error::{KeyKind, RecordError};
pub use store::RecordStore;
