//! Tracing setup and the per-engine query log.

mod query_log;
mod tracing_setup;

pub use query_log::{QueryLog, QueryLogEntry};
pub use tracing_setup::{
    filter_from_config, init_tracing, init_tracing_from_config, init_tracing_with_filter, LOG_ENV_VAR,
};
