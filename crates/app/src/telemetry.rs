//! Tracing subscriber setup

use siteplan_common::{Config, LogFormat};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` from the config drives the
/// filter; a malformed directive falls back to `siteplan=info`.
#[mutants::skip]
pub fn init(config: &Config) {
    let filter =
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("siteplan=info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    // A host may already have installed a subscriber
    let result = match config.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };

    if result.is_err() {
        tracing::debug!("Global tracing subscriber already set");
    }
}
