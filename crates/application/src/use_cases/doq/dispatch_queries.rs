use super::RunQueryUseCase;
use ferrous_doq_domain::{DnsQuery, QueryError};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, error, info};

const OUTPUT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    /// Rendered responses forwarded by successful runs.
    pub responses: usize,
}

/// Handle to a running dispatch. `output` yields lines in completion order
/// and closes once every query has finished.
pub struct Dispatch {
    pub output: mpsc::Receiver<String>,
    pub coordinator: JoinHandle<DispatchSummary>,
}

/// Fans queries out over one connection, one task per query, and fans their
/// output back in through a single channel.
pub struct DispatchQueriesUseCase {
    run_query: Arc<RunQueryUseCase>,
    channel_capacity: usize,
}

impl DispatchQueriesUseCase {
    pub fn new(run_query: Arc<RunQueryUseCase>) -> Self {
        Self {
            run_query,
            channel_capacity: OUTPUT_CHANNEL_CAPACITY,
        }
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    /// Must be called from within a tokio runtime.
    ///
    /// A failing query contributes one formatted error line and never stops
    /// its siblings. The coordinator holds the last sender and drops it only
    /// after every task has been joined, so the channel cannot close early.
    pub fn execute(&self, queries: Vec<DnsQuery>) -> Dispatch {
        let (tx, rx) = mpsc::channel(self.channel_capacity);
        let mut tasks = JoinSet::new();

        info!(queries = queries.len(), "Dispatching queries");

        for query in queries {
            let run_query = self.run_query.clone();
            let tx = tx.clone();

            tasks.spawn(async move {
                match run_query.execute(&query, &tx).await {
                    Ok(responses) => Ok(responses),
                    Err(e) => {
                        debug!(domain = %query.domain, kind = e.kind(), error = %e, "Query failed");
                        let _ = tx.send(format_query_error(&query, &e)).await;
                        Err(e)
                    }
                }
            });
        }

        let coordinator = tokio::spawn(async move {
            let mut summary = DispatchSummary::default();

            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok(Ok(responses)) => {
                        summary.succeeded += 1;
                        summary.responses += responses;
                    }
                    Ok(Err(_)) => summary.failed += 1,
                    Err(join_error) => {
                        summary.failed += 1;
                        error!(error = %join_error, "Query task aborted");
                        let _ = tx
                            .send(format!("failed to send query: task aborted: {}", join_error))
                            .await;
                    }
                }
            }

            drop(tx);
            debug!(
                succeeded = summary.succeeded,
                failed = summary.failed,
                "All queries finished, output closed"
            );
            summary
        });

        Dispatch {
            output: rx,
            coordinator,
        }
    }
}

/// The line printed in place of results for a failed query.
pub fn format_query_error(query: &DnsQuery, error: &QueryError) -> String {
    format!("failed to send query {}: {}", query, error)
}
