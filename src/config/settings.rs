//! Application settings and paths.
//!
//! Manages XDG-compliant paths for configuration and data, plus the
//! persisted scan defaults that CLI flags override.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Global paths singleton.
static PATHS: OnceLock<Paths> = OnceLock::new();

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/wraith)
    pub config_dir: PathBuf,
    /// Data directory (~/.local/share/wraith)
    pub data_dir: PathBuf,
}

impl Paths {
    /// Get the global paths instance.
    pub fn get() -> &'static Paths {
        PATHS.get_or_init(|| Self::new().expect("Failed to initialize paths"))
    }

    /// Initialize paths using XDG directories.
    fn new() -> ConfigResult<Self> {
        let project =
            ProjectDirs::from("io", "wraith", "wraith").ok_or(ConfigError::DirectoryNotFound)?;

        let paths = Self {
            config_dir: project.config_dir().to_path_buf(),
            data_dir: project.data_dir().to_path_buf(),
        };

        fs::create_dir_all(&paths.config_dir)?;
        fs::create_dir_all(&paths.data_dir)?;

        Ok(paths)
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    /// Get the path to the saved-reports directory.
    pub fn reports_dir(&self) -> PathBuf {
        self.data_dir.join("reports")
    }
}

/// Persisted scan defaults.
///
/// Fan-out defaults differ by probe weight: TCP connects and DNS lookups
/// are cheap and refusal-dominated, HTTP requests are not.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Worker count for TCP port probes.
    pub port_concurrency: usize,
    /// Worker count for DNS brute-force probes.
    pub dns_concurrency: usize,
    /// Worker count for HTTP profile probes.
    pub http_concurrency: usize,
    /// Per-probe timeout for TCP connects, in milliseconds.
    pub port_timeout_ms: u64,
    /// Per-probe timeout for DNS lookups, in milliseconds.
    pub dns_timeout_ms: u64,
    /// Per-probe timeout for HTTP requests, in milliseconds.
    pub http_timeout_ms: u64,
    /// Persist a report for every completed scan.
    pub auto_save_reports: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            port_concurrency: 50,
            dns_concurrency: 20,
            http_concurrency: 10,
            port_timeout_ms: 1000,
            dns_timeout_ms: 3000,
            http_timeout_ms: 8000,
            auto_save_reports: true,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location, falling back to defaults
    /// when no settings file exists yet.
    pub fn load() -> ConfigResult<Self> {
        let file = Paths::get().settings_file();

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }

    /// Save settings to the default location.
    pub fn save(&self) -> ConfigResult<()> {
        let file = Paths::get().settings_file();

        let content = serde_json::to_string_pretty(self)?;
        fs::write(&file, content).map_err(|e| ConfigError::WriteFailed {
            path: file,
            reason: e.to_string(),
        })
    }
}
