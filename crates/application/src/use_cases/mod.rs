pub mod doq;

// Re-export use cases
pub use doq::{
    format_query_error, Dispatch, DispatchQueriesUseCase, DispatchSummary, RunQueryUseCase,
};
