mod key_log;
pub mod quic;
pub mod tls;

pub use key_log::KeyLogFile;
pub use quic::{QuicConnection, QuicConnector};
pub use tls::{build_client_tls_config, DOQ_ALPN};
