use crate::args::Cli;
use ferrous_doq_domain::{CliOverrides, ClientConfig};
use tracing::info;

pub fn build_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let config = ClientConfig::load(cli_overrides(cli));
    config.validate()?;
    Ok(config)
}

/// Called once the subscriber is installed.
pub fn log_config(config: &ClientConfig) {
    info!(
        server = %config.server.address,
        server_name = config.server.tls_server_name().unwrap_or_default(),
        verify_server = config.tls.verifies_server(),
        connect_timeout = ?config.timeouts.connect,
        read_timeout = ?config.timeouts.read,
        "Configuration loaded"
    );
}

fn cli_overrides(cli: &Cli) -> CliOverrides {
    CliOverrides {
        server: Some(cli.server.clone()),
        server_name: cli.server_name.clone(),
        dnssec: Some(cli.dnssec),
        recursion: Some(cli.recursion),
        export_keys_path: cli.export_keys_path.clone(),
        connect_timeout: Some(cli.timeout),
        read_timeout: Some(cli.read_timeout),
        ca_certs: cli.ca_certs.clone(),
        cert: cli.cert.clone(),
        key: cli.key.clone(),
        log_level: Some(cli.log_level.clone()),
    }
}
