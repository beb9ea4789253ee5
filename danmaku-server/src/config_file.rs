//! Configuration file support
//!
//! Loads server configuration from TOML files.

use danmaku_lib::LayoutConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::{LimitsConfig, ServerConfig};
use crate::error::{Result, ServerError};

/// Configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Server settings
    pub server: ServerSettings,
    /// Logging settings
    pub logging: Option<LoggingSettings>,
    /// Limits settings
    pub limits: Option<LimitsSettings>,
    /// Subtitle layout, any field may be omitted
    pub layout: Option<LayoutConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Enable CORS
    pub cors_enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty)
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsSettings {
    /// Maximum request body size in MB
    pub max_body_mb: Option<usize>,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| ServerError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ServerError::Config(e.to_string()))?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Generate default configuration file
    pub fn default_config() -> Self {
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 3000,
                cors_enabled: Some(true),
            },
            logging: Some(LoggingSettings {
                level: "info".to_string(),
                format: Some("pretty".to_string()),
            }),
            limits: Some(LimitsSettings {
                max_body_mb: Some(16),
            }),
            layout: Some(LayoutConfig::default()),
        }
    }

    /// Convert to ServerConfig
    pub fn into_server_config(self) -> ServerConfig {
        let defaults = ServerConfig::default();
        let (log_level, log_format) = match self.logging {
            Some(l) => (l.level, l.format.unwrap_or(defaults.log_format)),
            None => (defaults.log_level, defaults.log_format),
        };

        ServerConfig {
            host: self.server.host,
            port: self.server.port,
            cors_enabled: self.server.cors_enabled.unwrap_or(true),
            log_level,
            log_format,
            limits: LimitsConfig {
                max_body_mb: self
                    .limits
                    .and_then(|l| l.max_body_mb)
                    .unwrap_or(defaults.limits.max_body_mb),
            },
            layout: self.layout.unwrap_or_default(),
        }
    }
}

/// Generate default configuration file at the specified path
pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    ConfigFile::default_config().to_file(path)
}

/// Load a config file if one is given, falling back to defaults otherwise
pub fn load_server_config(path: Option<&Path>) -> Result<ServerConfig> {
    match path {
        Some(path) => Ok(ConfigFile::from_file(path)?.into_server_config()),
        None => Ok(ServerConfig::default()),
    }
}
