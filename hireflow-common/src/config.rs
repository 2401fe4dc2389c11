//! Bootstrap configuration loading and module root resolution
//!
//! The TOML file is read once at startup. It only carries bootstrap concerns
//! (where the module root is, where to listen, how loud to log); the agent
//! registry itself is derived from the module root on every start.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the module root
pub const MODULES_DIR_ENV: &str = "HIREFLOW_MODULES_DIR";

/// Compiled default module root, relative to the working directory
pub const DEFAULT_MODULES_DIR: &str = "agents";

/// Default hub port
pub const DEFAULT_PORT: u16 = 5790;

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct HubConfig {
    /// Directory holding one subdirectory per agent module
    #[serde(default)]
    pub modules_dir: Option<PathBuf>,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// HTTP bind address
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            modules_dir: None,
            port: default_port(),
            bind_address: default_bind_address(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl HubConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
    }

    /// Load configuration from an explicit file
    ///
    /// Unlike [`HubConfig::load`], every failure here is reported to the caller.
    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::NotFound(format!("Config file {}", path.display())));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration, tolerating an absent or broken default file
    ///
    /// An explicit path must exist and parse. Without one, the platform default
    /// location is tried; if it is missing or malformed, a warning is logged
    /// and compiled defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let config = Self::load_file(path)?;
            info!("Loaded config from {}", path.display());
            return Ok(config);
        }

        let Some(path) = default_config_path() else {
            warn!("Could not determine config directory, using defaults");
            return Ok(Self::default());
        };

        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        match Self::load_file(&path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                Ok(config)
            }
            Err(e) => {
                warn!("Ignoring config file {}: {}", path.display(), e);
                Ok(Self::default())
            }
        }
    }
}

/// Platform config file location (`<config_dir>/hireflow/hub.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hireflow").join("hub.toml"))
}

/// Resolve the module root directory
///
/// Priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable `HIREFLOW_MODULES_DIR`
/// 3. TOML `modules_dir`
/// 4. Compiled default `./agents`
pub fn resolve_modules_dir(cli_arg: Option<&Path>, config: &HubConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(MODULES_DIR_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &config.modules_dir {
        return path.clone();
    }

    PathBuf::from(DEFAULT_MODULES_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_fields_missing() {
        let config = HubConfig::from_toml_str("").unwrap();
        assert!(config.modules_dir.is_none());
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_full_config_parses() {
        let config = HubConfig::from_toml_str(
            r#"
            modules_dir = "/srv/hireflow/agents"
            port = 6000
            bind_address = "0.0.0.0"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.modules_dir, Some(PathBuf::from("/srv/hireflow/agents")));
        assert_eq!(config.port, 6000);
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = HubConfig::from_toml_str("port = \"not a number\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_cli_arg_wins_without_touching_env() {
        let config = HubConfig {
            modules_dir: Some(PathBuf::from("/from/toml")),
            ..HubConfig::default()
        };
        let resolved = resolve_modules_dir(Some(Path::new("/from/cli")), &config);
        assert_eq!(resolved, PathBuf::from("/from/cli"));
    }
}
