//! Configuration management.
//!
//! Resolution order: built-in defaults, then the TOML config file, then
//! `PREFSTORE_*` environment variables.

use crate::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the preference store database inside the data directory.
const PREFERENCES_DB_FILE: &str = "preferences.db";

/// Main configuration for prefstore.
#[derive(Debug, Clone)]
pub struct PrefstoreConfig {
    /// Which storage backend to use.
    pub backend: BackendKind,
    /// Application-private data directory.
    pub data_dir: PathBuf,
    /// File name for the file backend, inside `data_dir`.
    pub file_name: String,
    /// Key the settings record is stored under.
    pub key: String,
}

/// Available storage backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// In-process map; state dies with the process.
    Memory,
    /// `SQLite` preference store in the data directory.
    #[default]
    Preferences,
    /// Single file in the data directory.
    File,
}

impl BackendKind {
    /// Returns the backend kind as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Preferences => "preferences",
            Self::File => "file",
        }
    }

    /// Parses a backend kind from a string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "mock" => Some(Self::Memory),
            "preferences" | "prefs" => Some(Self::Preferences),
            "file" => Some(Self::File),
            _ => None,
        }
    }
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Backend name.
    pub backend: Option<String>,
    /// Data directory.
    pub data_dir: Option<String>,
    /// File name for the file backend.
    pub file_name: Option<String>,
    /// Storage key.
    pub key: Option<String>,
}

impl Default for PrefstoreConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Preferences,
            data_dir: default_data_dir(),
            file_name: "settings.json".to_string(),
            key: "settings".to_string(),
        }
    }
}

impl PrefstoreConfig {
    /// Loads configuration from defaults, the config file, and environment.
    ///
    /// With an explicit `config_path` the file must exist; the default
    /// location (`<config_dir>/config.toml`) is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if any
    /// source names an unknown backend.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let path = config_path.map_or_else(default_config_path, |p| Some(p.to_path_buf()));
        if let Some(path) = path {
            if path.exists() {
                let raw = fs::read_to_string(&path).map_err(|e| Error::MediumUnavailable {
                    operation: "read_config_file".to_string(),
                    cause: e.to_string(),
                })?;
                let file: ConfigFile = toml::from_str(&raw).map_err(|e| {
                    Error::InvalidInput(format!("malformed config file {}: {e}", path.display()))
                })?;
                config.apply_file(&file)?;
            } else if config_path.is_some() {
                return Err(Error::InvalidInput(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
        }

        config.apply_env()?;
        Ok(config)
    }

    /// Applies config file values over the current configuration.
    fn apply_file(&mut self, file: &ConfigFile) -> Result<()> {
        if let Some(backend) = &file.backend {
            self.backend = parse_backend(backend)?;
        }
        if let Some(data_dir) = &file.data_dir {
            self.data_dir = PathBuf::from(data_dir);
        }
        if let Some(file_name) = &file.file_name {
            self.file_name.clone_from(file_name);
        }
        if let Some(key) = &file.key {
            self.key.clone_from(key);
        }
        Ok(())
    }

    /// Applies `PREFSTORE_*` environment overrides.
    fn apply_env(&mut self) -> Result<()> {
        if let Ok(backend) = std::env::var("PREFSTORE_BACKEND") {
            self.backend = parse_backend(&backend)?;
        }
        if let Ok(data_dir) = std::env::var("PREFSTORE_DATA_DIR") {
            self.data_dir = PathBuf::from(data_dir);
        }
        if let Ok(file_name) = std::env::var("PREFSTORE_FILE_NAME") {
            self.file_name = file_name;
        }
        if let Ok(key) = std::env::var("PREFSTORE_KEY") {
            self.key = key;
        }
        Ok(())
    }

    /// Returns the preference store database path inside the data directory.
    #[must_use]
    pub fn preferences_db_path(&self) -> PathBuf {
        self.data_dir.join(PREFERENCES_DB_FILE)
    }
}

fn parse_backend(s: &str) -> Result<BackendKind> {
    BackendKind::parse(s).ok_or_else(|| {
        Error::InvalidInput(format!(
            "unknown backend '{s}' (expected memory, preferences, or file)"
        ))
    })
}

/// Per-application data directory, with a working-directory fallback when
/// no home directory can be resolved.
fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("dev", "prefstore", "prefstore")
        .map_or_else(|| PathBuf::from(".prefstore"), |d| d.data_dir().to_path_buf())
}

/// Default config file location, if a config directory can be resolved.
fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "prefstore", "prefstore")
        .map(|d| d.config_dir().join("config.toml"))
}
