//! Ledgerly: category budgets, expenses, and the analytics derived from them.

pub mod analytics;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod filter;
pub mod format;
pub mod models;
pub mod validate;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global stderr subscriber. Later calls are no-ops.
pub fn init_tracing(filter: &str) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_new(filter)
            .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_tracing_is_idempotent() {
        super::init_tracing("ledgerly=debug");
        super::init_tracing("not a [valid filter");
    }
}
