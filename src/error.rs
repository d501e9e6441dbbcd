//! Error types for wraith.
//!
//! Uses `thiserror` for ergonomic error definitions. Expected per-probe
//! network failures are not errors — they live on
//! [`crate::engine::ProbeOutcome`] as data. The enums here cover what can
//! genuinely stop a run: bad input, configuration problems, storage
//! problems, and unreachable collaborators.

use crate::types::{DomainError, PortError, TargetError};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading and saving errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine a home directory for configuration")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("invalid settings format: {0}")]
    InvalidFormat(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Report persistence errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage directory error: {0}")]
    Directory(String),

    #[error("failed to save report: {0}")]
    SaveFailed(String),

    #[error("failed to load report: {0}")]
    LoadFailed(String),

    #[error("report not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Top-level error for command execution.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Port(#[from] PortError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Target(#[from] TargetError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for command execution.
pub type CliResult<T> = Result<T, CliError>;
