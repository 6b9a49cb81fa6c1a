//! classlink configuration.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use classlink_core::dashboard::DEFAULT_TITLE;

/// How reports are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Console lines, as the session prints them.
    Text,
    /// A comfy-table grid.
    Table,
    Markdown,
    Json,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Table => write!(f, "table"),
            ReportFormat::Markdown => write!(f, "markdown"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "table" => Ok(ReportFormat::Table),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format: {other}")),
        }
    }
}

/// Top-level classlink configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClasslinkConfig {
    /// Heading shown on the dashboard.
    #[serde(default = "default_class_name")]
    pub class_name: String,
    /// Start with the sample class loaded.
    #[serde(default)]
    pub seed_demo: bool,
    /// Report format when `--format` is not given.
    #[serde(default = "default_format")]
    pub default_format: ReportFormat,
    /// Where dashboard files are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_class_name() -> String {
    DEFAULT_TITLE.to_string()
}
fn default_format() -> ReportFormat {
    ReportFormat::Text
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./classlink-out")
}

impl Default for ClasslinkConfig {
    fn default() -> Self {
        Self {
            class_name: default_class_name(),
            seed_demo: false,
            default_format: default_format(),
            output_dir: default_output_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `classlink.toml` in the current directory
/// 2. `~/.config/classlink/config.toml`
///
/// Environment variable overrides: `CLASSLINK_CLASS_NAME`, `CLASSLINK_SEED_DEMO`.
pub fn load_config_from(path: Option<&Path>) -> Result<ClasslinkConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("classlink.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<ClasslinkConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ClasslinkConfig::default(),
    };

    if let Ok(name) = std::env::var("CLASSLINK_CLASS_NAME") {
        config.class_name = name;
    }
    if let Ok(raw) = std::env::var("CLASSLINK_SEED_DEMO") {
        match parse_flag(&raw) {
            Some(flag) => config.seed_demo = flag,
            None => tracing::warn!("ignoring CLASSLINK_SEED_DEMO={raw:?}: expected true or false"),
        }
    }

    config.class_name = resolve_env_vars(&config.class_name);
    config.output_dir = PathBuf::from(resolve_env_vars(&config.output_dir.to_string_lossy()));

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("classlink"))
}
