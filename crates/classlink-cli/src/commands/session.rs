//! The `classlink session` command.

use std::path::PathBuf;

use anyhow::Result;

use classlink_core::clock::SystemClock;

use crate::config::load_config_from;
use crate::session::{Session, SessionOptions};

pub fn execute(config_path: Option<PathBuf>, demo: bool, save_dashboard: bool) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = super::initial_store(demo || config.seed_demo, &SystemClock)?;

    let options = SessionOptions {
        class_name: config.class_name.clone(),
        dashboard_dir: save_dashboard.then(|| config.output_dir.clone()),
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(store, stdin.lock(), stdout.lock(), SystemClock, options);
    session.run()
}
