pub mod errors;
pub mod logging;
pub mod root;
pub mod server;
pub mod timeouts;
pub mod tls;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, ClientConfig};
pub use server::ServerConfig;
pub use timeouts::TimeoutConfig;
pub use tls::TlsConfig;
