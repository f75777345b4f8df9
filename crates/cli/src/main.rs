use clap::{CommandFactory, Parser};
use ferrous_doq_application::use_cases::{DispatchQueriesUseCase, RunQueryUseCase};
use ferrous_doq_domain::{DomainError, QueryPlan};
use ferrous_doq_infrastructure::dns::{HickoryCodec, QuicConnector};
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};

mod args;
mod bootstrap;
mod output;

use args::{normalize_args, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli, std::io::stdout()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => ExitCode::from(report_failure(&e, &mut std::io::stderr())),
    }
}

/// Writes a fatal error, plus the usage text for usage mistakes, and
/// returns the process exit status.
fn report_failure(err: &anyhow::Error, stderr: &mut impl Write) -> u8 {
    let _ = writeln!(stderr, "{:#}", err);
    if err.downcast_ref::<DomainError>().is_some_and(DomainError::is_usage) {
        let _ = writeln!(stderr, "{}", Cli::command().render_usage());
    }
    1
}

async fn run(cli: Cli, stdout: impl Write) -> anyhow::Result<()> {
    // Usage mistakes are reported before any configuration or network work.
    let plan = QueryPlan::from_args(&cli.queries)?;

    let config = bootstrap::build_config(&cli)?;
    bootstrap::init_logging(&config.logging);
    bootstrap::log_config(&config);

    for skipped in &plan.skipped {
        eprintln!("{}", skipped.warning());
    }
    if plan.is_empty() {
        info!("No queries left to send");
        return Ok(());
    }

    let connection = match QuicConnector::connect(&config).await {
        Ok(connection) => Arc::new(connection),
        Err(e @ DomainError::Config(_)) => return Err(e.into()),
        Err(e) => return Err(anyhow::Error::new(e).context("failed to connect")),
    };

    let run_query = RunQueryUseCase::new(
        connection.clone(),
        Arc::new(HickoryCodec::new()),
        config.query,
        config.timeouts.read,
    );
    let dispatch = DispatchQueriesUseCase::new(Arc::new(run_query)).execute(plan.queries);

    let printed = output::drain(dispatch.output, stdout).await?;
    let summary = dispatch.coordinator.await?;

    debug!(
        printed,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Dispatch finished"
    );

    connection.close().await;
    Ok(())
}
