//! CLI command implementations.

pub mod check;
pub mod parse;
pub mod sources;
pub mod update;

use anyhow::Result;
use std::path::Path;
use tracing::warn;

use crate::config::Config;

/// Load the config file, falling back to built-in defaults when it is missing
pub(crate) fn load_config(config_path: &Path) -> Result<Config> {
    if config_path.exists() {
        Config::load(config_path)
    } else {
        warn!(
            "Config file {:?} not found, using built-in list sources",
            config_path
        );
        Ok(Config::default())
    }
}
