//! Configuration resolution for Quill.
//!
//! Implements hierarchical config resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/quill/settings.json)
//! 3. Explicit config file (`--config`)
//! 4. Environment variables
//! 5. CLI arguments (highest priority, applied by the binary)
//!
//! The resolved config is built once at startup and passed by value to the
//! services that need it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};

pub const ENV_JWT_SECRET: &str = "QUILL_JWT_SECRET";
pub const ENV_LOG_LEVEL: &str = "QUILL_LOG_LEVEL";
pub const ENV_LOG_JSON: &str = "QUILL_LOG_JSON";

/// Complete Quill configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Token signing configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// HMAC secret for session tokens. Empty means "not configured".
    #[serde(default)]
    pub jwt_secret: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Load configuration with hierarchical resolution.
pub fn load_config(explicit_path: Option<&Path>) -> Result<Config> {
    let global = global_config_path().filter(|p| p.exists());
    resolve_config(global.as_deref(), explicit_path, |key| std::env::var(key).ok())
}

/// Resolve configuration from the given files and an environment lookup.
///
/// Later sources override earlier ones: defaults, `global`, `explicit`,
/// then whatever `lookup` returns for the `QUILL_*` variables.
pub fn resolve_config(
    global: Option<&Path>,
    explicit: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Config> {
    let mut config = Config::default();

    for path in [global, explicit].into_iter().flatten() {
        let overlay = load_config_file(path)?;
        debug!(
            path = %path.display(),
            sets_secret = !overlay.auth.jwt_secret.is_empty(),
            "Merging config file"
        );
        merge_config(&mut config, overlay);
    }

    apply_env_overrides(&mut config, lookup);
    Ok(config)
}

/// Get the global config file path.
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("quill").join("settings.json"))
}

/// Read and parse one settings file.
pub fn load_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse config file {}: {}", path.display(), e))
    })
}

fn merge_config(base: &mut Config, overlay: Config) {
    if !overlay.auth.jwt_secret.is_empty() {
        base.auth.jwt_secret = overlay.auth.jwt_secret;
    }
    base.log = overlay.log;
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup(ENV_JWT_SECRET) {
        config.auth.jwt_secret = val;
    }
    if let Some(val) = lookup(ENV_LOG_LEVEL) {
        config.log.level = val;
    }
    if let Some(val) = lookup(ENV_LOG_JSON) {
        if let Ok(b) = val.parse() {
            config.log.json = b;
        }
    }
}
