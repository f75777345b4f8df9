//! Ferrous DoQ Domain Layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod query_options;
pub mod query_plan;

pub use config::{CliOverrides, ClientConfig, ConfigError};
pub use dns_query::DnsQuery;
pub use dns_record::RecordType;
pub use errors::{DomainError, QueryError};
pub use query_options::{QueryOptions, DOQ_MESSAGE_ID, EDNS_MAX_PAYLOAD};
pub use query_plan::{QueryPlan, SkippedQuery};
