//! Tracing subscriber setup
//!
//! `RUST_LOG` wins over the configured level. `--verbose` raises the
//! crate's own events to debug.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

fn filter(config: &LoggingConfig, verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { config.level.as_str() };
        EnvFilter::new(format!("warn,wanderlens={level},tower_http={level}"))
    })
}

pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let filter = filter(config, verbose);
    let registry = tracing_subscriber::registry().with(filter);

    let initialized = match config.format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        "compact" => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init(),
        _ => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
    };

    initialized.map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_raises_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LoggingConfig {
            level: "warn".into(),
            format: "compact".into(),
        };
        assert!(filter(&config, true).to_string().contains("wanderlens=debug"));
        assert!(filter(&config, false).to_string().contains("wanderlens=warn"));
    }
}
