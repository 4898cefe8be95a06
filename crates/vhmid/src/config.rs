//! Daemon configuration file
//!
//! ```toml
//! [server]
//! port = 8000
//!
//! [bus]
//! type = "socketcan"
//! interface = "can0"
//!
//! [service]
//! recv_timeout_ms = 100
//!
//! [staleness]
//! scan_period_ms = 100
//! ```
//!
//! Every section is optional and falls back to its defaults.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use vhmi_can::{BusConfig, ServiceConfig};
use vhmi_core::StalenessConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: vhmi_core::ConfigError,
    },
}

/// Top-level daemon configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub bus: BusConfig,
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub staleness: StalenessConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

fn default_bind() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8000
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config
            .staleness
            .validate()
            .map_err(|source| ConfigError::Invalid {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use vhmi_can::SocketCanConfig;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"
            [server]
            bind = "127.0.0.1"
            port = 9000

            [bus]
            type = "socketcan"
            interface = "vcan0"

            [service]
            error_backoff_ms = 250

            [staleness]
            scan_period_ms = 50
            "#,
        );

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.server.addr(), "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(
            config.bus,
            BusConfig::SocketCan(SocketCanConfig {
                interface: "vcan0".to_string()
            })
        );
        assert_eq!(config.service.error_backoff_ms, 250);
        assert_eq!(config.service.recv_timeout_ms, 100);
        assert_eq!(config.staleness.scan_period_ms, 50);
        assert_eq!(config.staleness.watch.len(), 5);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = write_config("");
        let config = AppConfig::load(file.path()).unwrap();

        assert_eq!(config.server, ServerConfig::default());
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.bus, BusConfig::default());
        assert_eq!(config.staleness, StalenessConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::load(Path::new("/nonexistent/vhmid.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_zero_scan_period_rejected() {
        let file = write_config("[staleness]\nscan_period_ms = 0\n");
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                source: vhmi_core::ConfigError::ZeroScanPeriod,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_toml() {
        let file = write_config("[bus]\ntype = \"carrier-pigeon\"\n");
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
