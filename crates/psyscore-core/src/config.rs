//! psyscore configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

/// Top-level psyscore configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsyscoreConfig {
    /// Output directory for exports and reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Use the strict scoring entry points by default.
    #[serde(default)]
    pub strict: bool,
    /// `chrono` format string for dates in dashboard exports.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./psyscore-results")
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

impl Default for PsyscoreConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            strict: false,
            date_format: default_date_format(),
        }
    }
}

/// Reject `chrono` format strings with unknown specifiers.
pub fn check_date_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        anyhow::bail!("invalid date_format: {format:?}");
    }
    Ok(())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl PsyscoreConfig {
    /// Apply `PSYSCORE_STRICT` and `PSYSCORE_OUTPUT_DIR` from the environment.
    fn apply_env(&mut self) {
        if let Ok(value) = std::env::var("PSYSCORE_STRICT") {
            match parse_bool(&value) {
                Some(strict) => self.strict = strict,
                None => tracing::warn!("ignoring PSYSCORE_STRICT={value:?}: not a boolean"),
            }
        }
        if let Ok(dir) = std::env::var("PSYSCORE_OUTPUT_DIR") {
            if !dir.is_empty() {
                self.output_dir = PathBuf::from(dir);
            }
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `psyscore.toml` in the current directory
/// 2. `~/.config/psyscore/config.toml`
///
/// Environment variable overrides: `PSYSCORE_STRICT`, `PSYSCORE_OUTPUT_DIR`.
pub fn load_config() -> Result<PsyscoreConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<PsyscoreConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("psyscore.toml");
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
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<PsyscoreConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            check_date_format(&config.date_format)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            config
        }
        None => PsyscoreConfig::default(),
    };

    config.apply_env();
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("psyscore"))
}
