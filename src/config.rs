//! Runtime configuration: defaults, optional JSON file, environment overrides

use crate::error::{CsvPeekError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Name of the config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = ".csvpeek.json";

pub const ENV_CONFIG: &str = "CSVPEEK_CONFIG";
pub const ENV_PREVIEW_ROWS: &str = "CSVPEEK_PREVIEW_ROWS";
pub const ENV_PROGRESS_INTERVAL: &str = "CSVPEEK_PROGRESS_INTERVAL";
pub const ENV_NO_PROGRESS: &str = "CSVPEEK_NO_PROGRESS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeekConfig {
    /// Data rows shown by the plain preview when no row cap is given
    pub preview_rows: usize,
    /// Rows between progress refreshes
    pub progress_interval: u64,
    pub show_progress: bool,
}

impl Default for PeekConfig {
    fn default() -> Self {
        Self {
            preview_rows: crate::DEFAULT_PREVIEW_ROWS,
            progress_interval: crate::DEFAULT_PROGRESS_INTERVAL,
            show_progress: true,
        }
    }
}

impl PeekConfig {
    /// Load configuration from the explicit path, `CSVPEEK_CONFIG`, or
    /// `.csvpeek.json` in the working directory, then apply env overrides
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match Self::locate(explicit) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Ok(path) = env::var(ENV_CONFIG) {
            return Some(PathBuf::from(path));
        }
        let local = PathBuf::from(CONFIG_FILE_NAME);
        local.exists().then_some(local)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CsvPeekError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            CsvPeekError::config(format!("invalid config {}: {}", path.display(), e))
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply overrides from a key lookup (the environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_PREVIEW_ROWS) {
            self.preview_rows = parse_setting(ENV_PREVIEW_ROWS, &value)?;
        }
        if let Some(value) = lookup(ENV_PROGRESS_INTERVAL) {
            self.progress_interval = parse_setting(ENV_PROGRESS_INTERVAL, &value)?;
        }
        if lookup(ENV_NO_PROGRESS).is_some() {
            self.show_progress = false;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.preview_rows == 0 {
            return Err(CsvPeekError::config("preview_rows must be greater than 0"));
        }
        if self.progress_interval == 0 {
            return Err(CsvPeekError::config(
                "progress_interval must be greater than 0",
            ));
        }
        Ok(())
    }
}

fn parse_setting<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CsvPeekError::config(format!("invalid value for {}: '{}'", key, value)))
}
