//! Backend connection settings as operator-tunable TOML values
//!
//! Everything needed to reach the collections backend lives here. Defaults
//! point at a local development backend, so the crate works with no config
//! file present.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for the feedback engine.
///
/// Load with `FeedbackConfig::load()` which searches:
/// 1. `$FEEDBACK_CONFIG` env var
/// 2. `./feedback_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackConfig {
    /// Collections backend connection
    #[serde(default)]
    pub backend: BackendConfig,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
        }
    }
}

impl FeedbackConfig {
    /// Load configuration using the standard search order:
    /// 1. `$FEEDBACK_CONFIG` environment variable
    /// 2. `./feedback_config.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var("FEEDBACK_CONFIG") {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), backend = %config.backend.base_url, "Loaded config from FEEDBACK_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from FEEDBACK_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "FEEDBACK_CONFIG points to non-existent file, falling back");
            }
        }

        // 2. Check ./feedback_config.toml
        let local = PathBuf::from("feedback_config.toml");
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(backend = %config.backend.base_url, "Loaded config from ./feedback_config.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./feedback_config.toml, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No feedback_config.toml found — using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        // Two-pass: check for unknown keys first (warnings only)
        let typo_warnings = super::validation::validate_unknown_keys(&contents);
        for w in &typo_warnings {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate the loaded values.
    ///
    /// Impossible values error out; suspicious ones are logged and kept.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = super::validation::validate_ranges(self);

        for w in &warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Backend Section
// ============================================================================

/// Connection settings for the collections backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendConfig {
    /// Base URL of the backend API. A trailing slash is tolerated and
    /// trimmed by the clients.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Session token sent verbatim in the `Token` header. Empty disables
    /// the header entirely.
    #[serde(default)]
    pub token: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BackendConfig {
    /// Token as an option: `None` when the configured token is empty.
    pub fn token_opt(&self) -> Option<&str> {
        if self.token.is_empty() {
            None
        } else {
            Some(self.token.as_str())
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}
