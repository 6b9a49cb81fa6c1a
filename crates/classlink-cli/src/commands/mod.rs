pub mod dashboard;
pub mod init;
pub mod report;
pub mod session;

use anyhow::{Context, Result};

use classlink_core::clock::Clock;
use classlink_core::demo::demo_store;
use classlink_core::RecordStore;

/// The starting store: the sample class when asked for, otherwise empty.
pub(crate) fn initial_store(demo: bool, clock: &impl Clock) -> Result<RecordStore> {
    if demo {
        tracing::debug!("seeding store with the sample class");
        demo_store(clock.today()).context("failed to build the sample class")
    } else {
        Ok(RecordStore::new())
    }
}
