//! Settings overlay loading.
//!
//! An overlay is an optional JSON or TOML file whose keys are
//! [`SweepConfig`] fields. Present keys override the defaults field-wise;
//! absent keys keep their default values. A missing file is not an error, a
//! malformed one is fatal.

use std::path::Path;

use tracing::{debug, info};

use retcal_core::SweepConfig;

use crate::error::{SettingsError, SettingsResult};

/// Load an overlay file, selected by extension.
pub fn load_overlay(path: &Path) -> SettingsResult<SweepConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| SettingsError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    let cfg: SweepConfig = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content).map_err(|e| SettingsError::InvalidJson {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?
    } else if path.extension().is_some_and(|ext| ext == "toml") {
        toml::from_str(&content).map_err(|e| SettingsError::InvalidToml {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?
    } else {
        return Err(SettingsError::UnsupportedExtension(path.to_path_buf()));
    };

    debug!(path = %path.display(), "settings overlay applied");
    Ok(cfg)
}

/// Load an overlay if the file exists, defaults otherwise.
pub fn load_or_default(path: &Path) -> SettingsResult<SweepConfig> {
    if !path.exists() {
        info!(
            path = %path.display(),
            "no settings overlay found, using defaults"
        );
        return Ok(SweepConfig::default());
    }
    load_overlay(path)
}
