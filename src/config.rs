//! Configuration management for hostmerge.
//!
//! The file is YAML. JSON is a subset of YAML, so a `config.json` with the
//! same layout loads as well.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::parser::ListFormat;

/// Default config path, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source lists, processed in this order
    pub lists: Vec<ListSource>,

    /// Output and fetch settings
    pub settings: Settings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lists: default_lists(),
            settings: Settings::default(),
        }
    }
}

/// One named source list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListSource {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub format: ListFormat,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl ListSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>, format: ListFormat) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            format,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rendered blocklist path
    pub output_file: String,

    /// JSON run summary path
    pub summary_file: String,

    /// Project home page shown in the blocklist header (optional)
    pub repository_url: Option<String>,

    /// Per-request timeout
    pub timeout_secs: u64,

    /// Maximum lists downloaded at the same time
    pub max_concurrent: usize,

    /// User-Agent header for list downloads
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_file: "pihole_list.txt".to_string(),
            summary_file: "summary.json".to_string(),
            repository_url: None,
            timeout_secs: 30,
            max_concurrent: 4,
            user_agent: format!("hostmerge/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Load configuration from a YAML (or JSON) file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config = Self::from_str_validated(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    fn from_str_validated(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for list in &self.lists {
            if list.name.trim().is_empty() {
                anyhow::bail!("List with URL '{}' has an empty name", list.url);
            }
            if !names.insert(list.name.as_str()) {
                anyhow::bail!("Duplicate list name '{}'", list.name);
            }
            if !list.url.starts_with("https://") && !list.url.starts_with("http://") {
                anyhow::bail!(
                    "List '{}' URL must use http or https: {}",
                    list.name,
                    list.url
                );
            }
        }

        if self.settings.timeout_secs == 0 {
            anyhow::bail!("settings.timeout_secs must be greater than 0");
        }

        if self.settings.max_concurrent == 0 {
            anyhow::bail!("settings.max_concurrent must be greater than 0");
        }

        if self.settings.output_file.trim().is_empty() {
            anyhow::bail!("settings.output_file must not be empty");
        }

        Ok(())
    }

    /// Enabled lists in declared order
    pub fn enabled_lists(&self) -> Vec<ListSource> {
        self.lists.iter().filter(|l| l.enabled).cloned().collect()
    }
}

fn default_true() -> bool {
    true
}

fn default_lists() -> Vec<ListSource> {
    vec![
        ListSource::new(
            "stevenblack_unified",
            "https://raw.githubusercontent.com/StevenBlack/hosts/master/hosts",
            ListFormat::Hosts,
        ),
        ListSource::new(
            "adguard_dns",
            "https://adguardteam.github.io/AdGuardSDNSFilter/Filters/filter.txt",
            ListFormat::Adblock,
        ),
        ListSource::new(
            "peter_lowe",
            "https://pgl.yoyo.org/adservers/serverlist.php?hostformat=hosts&showintro=0&mimetype=plaintext",
            ListFormat::Hosts,
        ),
        ListSource::new(
            "disconnect_ads",
            "https://s3.amazonaws.com/lists.disconnect.me/simple_ad.txt",
            ListFormat::Auto,
        ),
    ]
}
