//! CLI configuration file.
//!
//! Values are resolved in this order:
//! 1. Command-line flags
//! 2. The TOML file given with `--config`
//! 3. Defaults
//!
//! ```toml
//! inactivity_range = "strict"    # fill_gap | strict | legacy
//! booking_rollover = "discard"   # carry_date | discard
//! reject_inverted = true         # fail inactivity that ends before it starts
//! timezone = "Europe/Madrid"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use schedule_engine::EngineOptions;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub options: EngineOptions,

    /// IANA timezone used when expanding business hours.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            options: EngineOptions::default(),
            timezone: default_timezone(),
        }
    }
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Config {
    /// Load from `path`, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
