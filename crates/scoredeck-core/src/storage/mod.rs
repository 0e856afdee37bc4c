mod config;
pub mod store;

pub use config::{
    Config, ExpiryConfig, ExpiryPolicyKind, FormConfig, SessionConfig, SuggestionsConfig,
    TimerConfig,
};
pub use store::{ExpiryPolicy, PersistedRecord, SessionStore};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/scoredeck[-dev]/` based on SCOREDECK_ENV.
///
/// Set SCOREDECK_ENV=dev to use a development data directory.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SCOREDECK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("scoredeck-dev")
    } else {
        base_dir.join("scoredeck")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
