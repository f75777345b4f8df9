mod dispatch_queries;
mod run_query;

pub use dispatch_queries::{format_query_error, Dispatch, DispatchQueriesUseCase, DispatchSummary};
pub use run_query::RunQueryUseCase;
