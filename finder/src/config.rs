//! Configuration module for jbrecents.
//!
//! This module handles parsing configuration from environment variables.
//!
//! # Environment Variables
//!
//! | Variable | Required | Default | Description |
//! |----------|----------|---------|-------------|
//! | `JBRECENTS_JETBRAINS_DIR` | No | `<data dir>/JetBrains` | Root holding per-IDE record files |
//! | `JBRECENTS_TOOLBOX_DIR` | No | detected under the JetBrains root | Installation suite root |
//! | `JBRECENTS_HOME` | No | user home | Substituted for `$USER_HOME$` in project paths |
//! | `JBRECENTS_IDENTITY_SCOPE` | No | `application` | `application` or `global` |
//!
//! On macOS the default JetBrains root is `~/Library/Application Support/JetBrains`.
//!
//! With the default `application` scope a project opened from two IDEs is
//! listed once per IDE. Set `JBRECENTS_IDENTITY_SCOPE=global` to keep only the
//! most recently opened copy across all IDEs.
//!
//! # Example
//!
//! ```no_run
//! use jbrecents_finder::config::Config;
//!
//! let config = Config::from_env().expect("Failed to load configuration");
//! println!("JetBrains root: {}", config.projects_root.display());
//! ```

use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

use directories::BaseDirs;
use thiserror::Error;

use crate::types::IdentityScope;

/// Directory name of the IDE vendor's folder inside the platform data dir.
const DEFAULT_JETBRAINS_DIR: &str = "JetBrains";

/// Substring identifying the installation suite directory under the root.
pub const DEFAULT_SUITE_MARKER: &str = "Toolbox";

/// Applications whose record files are never read.
pub const DEFAULT_IGNORED_APPLICATIONS: &[&str] = &["CodeWithMeGuest", "DataGrip"];

/// Errors that can occur during configuration parsing.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has an invalid value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to determine home directory.
    #[error("failed to determine home directory")]
    NoHomeDirectory,
}

/// Configuration for a discovery run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory containing per-application record files.
    pub projects_root: PathBuf,

    /// Installation suite root. If `None`, the marker directory found under
    /// `projects_root` is used.
    pub toolbox_dir: Option<PathBuf>,

    /// Substring a directory directly under `projects_root` must contain to
    /// count as the installation suite.
    pub suite_marker: String,

    /// Home directory substituted for the `$USER_HOME$` placeholder.
    pub home_dir: PathBuf,

    /// Application identifiers whose record files are skipped.
    pub ignored_applications: HashSet<String>,

    /// How duplicate projects are merged in the registry.
    pub identity_scope: IdentityScope,
}

impl Config {
    /// Creates a config with default settings for the given roots.
    #[must_use]
    pub fn new(projects_root: impl Into<PathBuf>, home_dir: impl Into<PathBuf>) -> Self {
        Self {
            projects_root: projects_root.into(),
            toolbox_dir: None,
            suite_marker: DEFAULT_SUITE_MARKER.to_string(),
            home_dir: home_dir.into(),
            ignored_applications: DEFAULT_IGNORED_APPLICATIONS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            identity_scope: IdentityScope::default(),
        }
    }

    /// Creates a new `Config` by parsing environment variables.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if:
    /// - The home directory cannot be determined and `JBRECENTS_HOME` is unset
    /// - `JBRECENTS_IDENTITY_SCOPE` is set to an unknown value
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_dirs = BaseDirs::new();

        // Optional: JBRECENTS_HOME (default: user home)
        let home_dir = match env::var("JBRECENTS_HOME") {
            Ok(path) => PathBuf::from(path),
            Err(_) => base_dirs
                .as_ref()
                .map(|dirs| dirs.home_dir().to_path_buf())
                .ok_or(ConfigError::NoHomeDirectory)?,
        };

        // Optional: JBRECENTS_JETBRAINS_DIR (default: <data dir>/JetBrains)
        let projects_root = match env::var("JBRECENTS_JETBRAINS_DIR") {
            Ok(path) => PathBuf::from(path),
            Err(_) => base_dirs
                .as_ref()
                .map(|dirs| dirs.data_dir().join(DEFAULT_JETBRAINS_DIR))
                .ok_or(ConfigError::NoHomeDirectory)?,
        };

        let mut config = Self::new(projects_root, home_dir);

        // Optional: JBRECENTS_TOOLBOX_DIR (default: detected)
        config.toolbox_dir = env::var("JBRECENTS_TOOLBOX_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        // Optional: JBRECENTS_IDENTITY_SCOPE (default: application)
        if let Ok(val) = env::var("JBRECENTS_IDENTITY_SCOPE") {
            config.identity_scope = val
                .parse::<IdentityScope>()
                .map_err(|message| ConfigError::InvalidValue {
                    key: "JBRECENTS_IDENTITY_SCOPE".to_string(),
                    message,
                })?;
        }

        Ok(config)
    }

    /// Returns `true` if record files owned by `application` should be skipped.
    #[must_use]
    pub fn is_ignored(&self, application: &str) -> bool {
        self.ignored_applications.contains(application)
    }
}
