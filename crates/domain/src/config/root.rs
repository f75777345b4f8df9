use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::timeouts::TimeoutConfig;
use super::tls::TlsConfig;
use crate::QueryOptions;

/// Everything a single client invocation needs besides the query list.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ClientConfig {
    /// Where to connect
    pub server: ServerConfig,

    /// Trust and identity material
    pub tls: TlsConfig,

    pub timeouts: TimeoutConfig,

    /// Flags placed on every query
    pub query: QueryOptions,

    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Start from defaults and apply whatever the command line set.
    pub fn load(cli_overrides: CliOverrides) -> Self {
        let mut config = Self::default();
        config.apply_cli_overrides(cli_overrides);
        config
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(server) = overrides.server {
            self.server.address = server;
        }
        if let Some(name) = overrides.server_name {
            self.server.server_name = Some(name);
        }
        if let Some(dnssec) = overrides.dnssec {
            self.query.dnssec_ok = dnssec;
        }
        if let Some(recursion) = overrides.recursion {
            self.query.recursion_desired = recursion;
        }
        if let Some(path) = overrides.export_keys_path {
            self.tls.export_keys_path = Some(path);
        }
        if let Some(timeout) = overrides.connect_timeout {
            self.timeouts.connect = timeout;
        }
        if let Some(timeout) = overrides.read_timeout {
            self.timeouts.read = timeout;
        }
        if let Some(path) = overrides.ca_certs {
            self.tls.ca_certs = Some(path);
        }
        if let Some(path) = overrides.cert {
            self.tls.cert = Some(path);
        }
        if let Some(path) = overrides.key {
            self.tls.key = Some(path);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host_port().is_none() {
            return Err(ConfigError::Validation(format!(
                "server address '{}' is not host:port",
                self.server.address
            )));
        }

        if self.server.tls_server_name().is_none() {
            return Err(ConfigError::Validation(
                "no TLS server name could be derived".to_string(),
            ));
        }

        if self.timeouts.connect.is_zero() {
            return Err(ConfigError::Validation(
                "connect timeout cannot be 0".to_string(),
            ));
        }

        if self.timeouts.read.is_zero() {
            return Err(ConfigError::Validation(
                "read timeout cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub server: Option<String>,
    pub server_name: Option<String>,
    pub dnssec: Option<bool>,
    pub recursion: Option<bool>,
    pub export_keys_path: Option<PathBuf>,
    pub connect_timeout: Option<Duration>,
    pub read_timeout: Option<Duration>,
    pub ca_certs: Option<PathBuf>,
    pub cert: Option<PathBuf>,
    pub key: Option<PathBuf>,
    pub log_level: Option<String>,
}
