//! Core error types for scoredeck-core.
//!
//! This module defines the error hierarchy using thiserror. Nothing in
//! this system is fatal to the process: storage and configuration errors
//! bubble up to the caller, and a stale or unreadable persisted record is
//! treated as absence rather than an error.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for scoredeck-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Submission-related errors
    #[error("Submission error: {0}")]
    Submit(#[from] SubmitError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the store
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Store is locked by another process
    #[error("Store is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Submission-specific errors.
///
/// Transport failures are deliberately NOT represented here: the gateway
/// reports them as a [`crate::submit::SubmitOutcome::Failed`] outcome so the
/// caller can surface them as a recoverable condition. These variants cover
/// misconfiguration only.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// No form endpoint configured
    #[error("Form endpoint is not configured (set [form].url in the config file)")]
    EndpointNotConfigured,

    /// Endpoint URL did not parse
    #[error("Invalid form endpoint '{url}': {message}")]
    InvalidEndpoint { url: String, message: String },

    /// Entry field identifiers are missing or malformed
    #[error("Form field configuration invalid: {0}")]
    Misconfigured(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Storage(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
