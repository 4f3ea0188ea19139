use anyhow::Context;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::shared::config::{CONFIG, LoggingConfig};

pub const LOG_FILE_PREFIX: &str = "decimal_agg.log";

fn parse_level(key: &str, value: &str) -> anyhow::Result<LevelFilter> {
    value
        .parse::<LevelFilter>()
        .with_context(|| format!("invalid logging.{key} {value:?}"))
}

/// Installs the global subscriber from `logging.*` in `CONFIG`.
pub fn init() -> anyhow::Result<()> {
    init_with(&CONFIG.logging)?;
    info!(
        partitions = CONFIG.aggregate.partitions,
        state_pool_capacity = CONFIG.aggregate.state_pool_capacity,
        "Logging initialized"
    );
    Ok(())
}

/// Stdout layer plus a daily file under `log_dir`, each with its own level.
///
/// Levels are validated before anything is installed. Fails if a global
/// subscriber is already set.
pub fn init_with(cfg: &LoggingConfig) -> anyhow::Result<()> {
    let stdout_filter = parse_level("stdout_level", &cfg.stdout_level)?;
    let file_filter = parse_level("file_level", &cfg.file_level)?;

    let stdout_layer = fmt::layer().with_ansi(true).with_filter(stdout_filter);

    let file_appender = tracing_appender::rolling::daily(&cfg.log_dir, LOG_FILE_PREFIX);
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(file_appender)
        .with_filter(file_filter);

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .try_init()?;
    Ok(())
}

#[cfg(test)]
pub fn init_for_tests() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;

    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let filter =
            EnvFilter::from_default_env().add_directive("decimal_agg=debug".parse().unwrap());

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
