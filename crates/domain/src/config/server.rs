use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVER: &str = "127.0.0.1:853";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// `host:port` of the DNS-over-QUIC server.
    #[serde(default = "default_address")]
    pub address: String,

    /// TLS server name. Falls back to the host part of `address`.
    #[serde(default)]
    pub server_name: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            server_name: None,
        }
    }
}

impl ServerConfig {
    /// Splits `address` into host and port. IPv6 literals must be bracketed.
    pub fn host_port(&self) -> Option<(&str, u16)> {
        let (host, port) = self.address.rsplit_once(':')?;
        let port = port.parse::<u16>().ok()?;
        let host = match host.strip_prefix('[') {
            Some(inner) => inner.strip_suffix(']')?,
            None if host.contains(':') => return None,
            None => host,
        };
        if host.is_empty() {
            return None;
        }
        Some((host, port))
    }

    pub fn tls_server_name(&self) -> Option<&str> {
        match &self.server_name {
            Some(name) => Some(name.as_str()),
            None => self.host_port().map(|(host, _)| host),
        }
    }
}

fn default_address() -> String {
    DEFAULT_SERVER.to_string()
}
