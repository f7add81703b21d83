use crate::output::OutputFormat;
use crate::scanner::CheckId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Top-level configuration.
///
/// Only presentation is configurable. The battery and its scores are fixed.
///
/// Example YAML:
/// ```yaml
/// theme: dark
/// format: table
/// pacing:
///   enabled: true
///   start_delay: 500ms
///   checks:
///     webdriver: 1s
///     languages: 200ms
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub pacing: PacingConfig,

    #[serde(default)]
    pub theme: ThemeChoice,

    /// Default output format for `scan` when `--format` is not given
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Auto,
    Dark,
    Light,
}

/// Delays the live view inserts before each check.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PacingConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Pause before the first check, humantime format (e.g. "500ms")
    #[serde(default = "default_start_delay")]
    pub start_delay: String,

    /// Per-check overrides keyed by check id; unlisted checks use the defaults
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub checks: BTreeMap<String, String>,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            start_delay: default_start_delay(),
            checks: BTreeMap::new(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_start_delay() -> String {
    "500ms".to_string()
}

/// Built-in pause before each check.
pub fn default_check_delay(id: CheckId) -> Duration {
    let ms = match id {
        CheckId::Https => 600,
        CheckId::Cookies => 500,
        CheckId::Dnt => 450,
        CheckId::Webdriver => 700,
        CheckId::Screen => 550,
        CheckId::Connection => 400,
        CheckId::Languages => 350,
    };
    Duration::from_millis(ms)
}

impl PacingConfig {
    /// Pause before the first check. Zero when pacing is disabled.
    pub fn start_delay(&self) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }
        humantime::parse_duration(&self.start_delay).unwrap_or(Duration::from_millis(500))
    }

    /// Pause before `id`. Zero when pacing is disabled. Unparsable overrides
    /// fall back to the default; validation reports them at startup.
    pub fn delay_for(&self, id: CheckId) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }
        self.checks
            .get(id.as_str())
            .and_then(|s| humantime::parse_duration(s).ok())
            .unwrap_or_else(|| default_check_delay(id))
    }
}
