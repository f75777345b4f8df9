use super::tls::build_client_tls_config;
use async_trait::async_trait;
use ferrous_doq_application::ports::{DoqConnection, QueryStream};
use ferrous_doq_domain::{ClientConfig, ConfigError, DomainError, QueryError};
use quinn::crypto::rustls::QuicClientConfig;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use tracing::{debug, info};

/// Establishes the single QUIC connection every query of a run shares.
pub struct QuicConnector;

impl QuicConnector {
    /// Resolves the server, then runs the handshake. Both steps together are
    /// bounded by the connect timeout.
    pub async fn connect(config: &ClientConfig) -> Result<QuicConnection, DomainError> {
        let (host, port) = config.server.host_port().ok_or_else(|| {
            ConfigError::Validation(format!(
                "server address '{}' is not host:port",
                config.server.address
            ))
        })?;
        let server_name = config.server.tls_server_name().ok_or_else(|| {
            ConfigError::Validation("no TLS server name could be derived".to_string())
        })?;

        let tls = build_client_tls_config(&config.tls)?;
        let quic_tls =
            QuicClientConfig::try_from(Arc::new(tls)).map_err(|e| ConfigError::Tls(e.to_string()))?;
        let client_config = quinn::ClientConfig::new(Arc::new(quic_tls));

        let server = config.server.address.clone();
        let timeout = config.timeouts.connect;

        let establish = async {
            let server_addr = resolve(host, port).await?;
            let mut endpoint = quinn::Endpoint::client(unspecified_for(&server_addr))
                .map_err(|e| DomainError::IoError(format!("QUIC client endpoint: {}", e)))?;
            endpoint.set_default_client_config(client_config);

            let connecting = endpoint.connect(server_addr, server_name).map_err(|e| {
                DomainError::TransportConnectionRefused {
                    server: server.clone(),
                    reason: e.to_string(),
                }
            })?;

            let connection = connecting
                .await
                .map_err(|e| DomainError::TransportConnectionRefused {
                    server: format!("{}({})", server, server_addr),
                    reason: e.to_string(),
                })?;

            Ok::<_, DomainError>((endpoint, connection, server_addr))
        };

        let (endpoint, connection, server_addr) = tokio::time::timeout(timeout, establish)
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: server.clone(),
            })??;

        info!(
            server = %server_addr,
            server_name = server_name,
            alpn = "doq",
            "QUIC connection established"
        );

        Ok(QuicConnection {
            endpoint,
            connection,
            server_addr,
        })
    }
}

async fn resolve(host: &str, port: u16) -> Result<SocketAddr, DomainError> {
    let mut addrs = tokio::net::lookup_host((host, port))
        .await
        .map_err(|e| DomainError::TransportConnectionRefused {
            server: format!("{}:{}", host, port),
            reason: format!("resolve: {}", e),
        })?;

    addrs
        .next()
        .ok_or_else(|| DomainError::TransportConnectionRefused {
            server: format!("{}:{}", host, port),
            reason: "resolve: no addresses".to_string(),
        })
}

fn unspecified_for(addr: &SocketAddr) -> SocketAddr {
    if addr.is_ipv4() {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
    } else {
        SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
    }
}

pub struct QuicConnection {
    endpoint: quinn::Endpoint,
    connection: quinn::Connection,
    server_addr: SocketAddr,
}

impl QuicConnection {
    pub fn remote_address(&self) -> SocketAddr {
        self.server_addr
    }

    /// Closes with application code 0 and waits until the peer has been
    /// told.
    pub async fn close(&self) {
        self.connection.close(0u32.into(), b"");
        self.endpoint.wait_idle().await;
        debug!(server = %self.server_addr, "QUIC connection closed");
    }
}

#[async_trait]
impl DoqConnection for QuicConnection {
    async fn open_stream(&self) -> Result<QueryStream, QueryError> {
        let (send, recv) = self
            .connection
            .open_bi()
            .await
            .map_err(|e| QueryError::StreamOpen(e.to_string()))?;

        Ok(QueryStream::new(Box::new(send), Box::new(recv)))
    }

    fn peer(&self) -> String {
        self.server_addr.to_string()
    }
}
