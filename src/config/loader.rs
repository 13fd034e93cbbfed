use std::fs;
use std::path::{Path, PathBuf};

use super::{PyauditConfig, ThresholdsConfig};
use crate::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".pyaudit.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse a TOML string and repair invalid sections
pub fn parse_and_validate_config(contents: &str) -> Result<PyauditConfig> {
    let mut config = toml::from_str::<PyauditConfig>(contents)
        .map_err(|e| Error::config(format!("Failed to parse {CONFIG_FILE_NAME}: {e}")))?;

    if let Err(e) = config.thresholds.validate() {
        log::warn!("Invalid thresholds: {}. Using defaults.", e);
        config.thresholds = ThresholdsConfig::default();
    }

    Ok(config)
}

/// Load an explicitly named config file; any failure is an error
pub fn load_config_from(path: &Path) -> Result<PyauditConfig> {
    let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let config = parse_and_validate_config(&contents)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

fn try_load_config_from_path(config_path: &Path) -> Option<PyauditConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // Absent files are the normal case while searching upward
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!(
                    "Failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// The start directory followed by its parents, at most `max_depth` entries
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Find `.pyaudit.toml` in the current directory or one of its parents
pub fn load_config() -> PyauditConfig {
    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return PyauditConfig::default();
        }
    };

    directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            PyauditConfig::default()
        })
}
