//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod extract;
pub mod verify;

use std::path::{Path, PathBuf};

use tracing::debug;

use payverify_core::models::config::AppConfig;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("payverify")
        .join("config.json")
}

/// The config file in use: the `--config` path if given, else the default location.
pub fn config_path(explicit: Option<&str>) -> PathBuf {
    explicit.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load configuration. An explicit path must exist; a missing default file yields defaults.
pub fn load_config(explicit: Option<&str>) -> anyhow::Result<AppConfig> {
    if let Some(path) = explicit {
        return Ok(AppConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading config from {}", path.display());
        Ok(AppConfig::from_file(&path)?)
    } else {
        Ok(AppConfig::default())
    }
}
