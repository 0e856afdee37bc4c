//! TOML-based application configuration.
//!
//! Stores deployment settings:
//! - Timer defaults for a fresh session
//! - The expiry policy applied to persisted sessions
//! - The form endpoint and its opaque entry-field identifiers
//! - The optional name-suggestion source
//!
//! Configuration is stored at `~/.config/scoredeck/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use super::store::ExpiryPolicy;
use crate::error::{ConfigError, Result};

/// Timer defaults used when a session starts fresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_minutes")]
    pub default_minutes: u32,
    #[serde(default)]
    pub default_seconds: u32,
}

/// Session defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_occupancy")]
    pub default_occupancy: u32,
}

/// Which expiry rule invalidates a stored session.
///
/// The two rules are alternatives, never blended: a deployment picks one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ExpiryPolicyKind {
    /// Rolling TTL: stale after `ttl_hours` since the last save.
    #[default]
    Rolling,
    /// Stale once the local calendar day of the last save has passed.
    CalendarDay,
}

/// Expiry policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpiryConfig {
    #[serde(default)]
    pub policy: ExpiryPolicyKind,
    /// Only consulted for the rolling policy.
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,
}

impl ExpiryConfig {
    pub fn policy(&self) -> ExpiryPolicy {
        match self.policy {
            ExpiryPolicyKind::Rolling => ExpiryPolicy::RollingTtl {
                hours: self.ttl_hours,
            },
            ExpiryPolicyKind::CalendarDay => ExpiryPolicy::CalendarDay,
        }
    }
}

/// Form gateway configuration.
///
/// The entry identifiers are opaque external configuration supplied by
/// whoever owns the form; they cannot be derived.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormConfig {
    /// Form endpoint URL. Empty means submission is not configured.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub entry_session_id: String,
    /// Entry ids for the four name fields, in slot order.
    #[serde(default)]
    pub entry_names: Vec<String>,
    /// Entry ids for the four count fields, in slot order.
    #[serde(default)]
    pub entry_counts: Vec<String>,
    #[serde(default)]
    pub entry_submitted_at: String,
}

/// Name-suggestion source configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SuggestionsConfig {
    /// URL of a published tabular name list. Absent means no suggestions.
    #[serde(default)]
    pub url: Option<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/scoredeck/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub expiry: ExpiryConfig,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub suggestions: SuggestionsConfig,
}

fn default_minutes() -> u32 {
    5
}
fn default_occupancy() -> u32 {
    4
}
fn default_ttl_hours() -> u64 {
    6
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            default_minutes: default_minutes(),
            default_seconds: 0,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_occupancy: default_occupancy(),
        }
    }
}

impl Default for ExpiryConfig {
    fn default() -> Self {
        Self {
            policy: ExpiryPolicyKind::default(),
            ttl_hours: default_ttl_hours(),
        }
    }
}

impl Config {
    /// Path of the configuration file.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when the file
    /// does not exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)?;
        let config = toml::from_str(&raw).map_err(|e| ConfigError::LoadFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(config)
    }

    /// Write the configuration back to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_station_setup() {
        let config = Config::default();
        assert_eq!(config.timer.default_minutes, 5);
        assert_eq!(config.timer.default_seconds, 0);
        assert_eq!(config.session.default_occupancy, 4);
        assert_eq!(config.expiry.policy, ExpiryPolicyKind::Rolling);
        assert_eq!(config.expiry.ttl_hours, 6);
        assert!(config.form.url.is_empty());
        assert!(config.suggestions.url.is_none());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [expiry]
            policy = "calendar-day"

            [form]
            url = "https://example.com/formResponse"
            "#,
        )
        .unwrap();
        assert_eq!(config.expiry.policy, ExpiryPolicyKind::CalendarDay);
        assert_eq!(config.expiry.ttl_hours, 6);
        assert_eq!(config.form.url, "https://example.com/formResponse");
        assert_eq!(config.timer.default_minutes, 5);
    }

    #[test]
    fn expiry_config_maps_to_policy() {
        let mut expiry = ExpiryConfig::default();
        assert_eq!(expiry.policy(), ExpiryPolicy::RollingTtl { hours: 6 });
        expiry.policy = ExpiryPolicyKind::CalendarDay;
        assert_eq!(expiry.policy(), ExpiryPolicy::CalendarDay);
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = Config::default();
        config.form.entry_names = vec!["entry.1".into(), "entry.2".into()];
        config.suggestions.url = Some("https://example.com/names.csv".into());
        let raw = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&raw).unwrap();
        assert_eq!(back.form.entry_names, config.form.entry_names);
        assert_eq!(back.suggestions.url, config.suggestions.url);
    }
}
