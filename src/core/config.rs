//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.ghostwrite/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::inference::providers::autocomplete::DEFAULT_SERVICE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GhostwriteConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServiceConfig {
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    pub resync_interval_ms: Option<u64>,
    pub discovery_poll_ms: Option<u64>,
    pub default_subject: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_RESYNC_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_DISCOVERY_POLL_MS: u64 = 500;

/// Floor for the resync cadence; anything faster just burns reads.
const MIN_RESYNC_INTERVAL_MS: u64 = 50;
/// Floor for the discovery poll; tokio intervals reject a zero period.
const MIN_DISCOVERY_POLL_MS: u64 = 10;
/// Floor for the request timeout; below this every request fails immediately.
const MIN_TIMEOUT_MS: u64 = 100;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub service_url: String,
    pub request_timeout: Duration,
    pub resync_interval: Duration,
    pub discovery_poll: Duration,
    pub subject: Option<String>,
}

/// Values coming from the command line. `None` means "not given".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub service_url: Option<String>,
    pub subject: Option<String>,
    pub resync_ms: Option<u64>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.ghostwrite/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".ghostwrite").join("config.toml"))
}

/// Load config from `~/.ghostwrite/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `GhostwriteConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<GhostwriteConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(GhostwriteConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<GhostwriteConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(GhostwriteConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: GhostwriteConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Ghostwrite Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [service]
# base_url = "http://127.0.0.1:5000"   # Or set GHOSTWRITE_SERVICE_URL
# timeout_ms = 5000

# [session]
# resync_interval_ms = 1000            # Or set GHOSTWRITE_RESYNC_MS
# discovery_poll_ms = 500
# default_subject = "Weekly update"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &GhostwriteConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Service URL: CLI → env → config → default
    let service_url = cli
        .service_url
        .clone()
        .or_else(|| std::env::var("GHOSTWRITE_SERVICE_URL").ok())
        .or_else(|| config.service.base_url.clone())
        .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());

    // Resync cadence: CLI → env → config → default
    let resync_ms = cli
        .resync_ms
        .or_else(|| {
            std::env::var("GHOSTWRITE_RESYNC_MS")
                .ok()
                .and_then(|v| v.parse().ok())
        })
        .or(config.session.resync_interval_ms)
        .unwrap_or(DEFAULT_RESYNC_INTERVAL_MS)
        .max(MIN_RESYNC_INTERVAL_MS);

    // Subject: CLI → config (None means ask the user)
    let subject = cli
        .subject
        .clone()
        .or_else(|| config.session.default_subject.clone())
        .filter(|s| !s.trim().is_empty());

    ResolvedConfig {
        service_url,
        request_timeout: Duration::from_millis(
            config
                .service
                .timeout_ms
                .unwrap_or(DEFAULT_TIMEOUT_MS)
                .max(MIN_TIMEOUT_MS),
        ),
        resync_interval: Duration::from_millis(resync_ms),
        discovery_poll: Duration::from_millis(
            config
                .session
                .discovery_poll_ms
                .unwrap_or(DEFAULT_DISCOVERY_POLL_MS)
                .max(MIN_DISCOVERY_POLL_MS),
        ),
        subject,
    }
}
