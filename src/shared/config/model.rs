use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub aggregate: AggregateConfig,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            stdout_level: "info".to_string(),
            file_level: "debug".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AggregateConfig {
    /// Default fan-out of the partitioned driver (0 = one per rayon thread)
    #[serde(default)]
    pub partitions: usize,
    /// Reset group-state vectors a pool keeps for reuse
    #[serde(default = "default_state_pool_capacity")]
    pub state_pool_capacity: usize,
}

fn default_state_pool_capacity() -> usize {
    1024
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            partitions: 0,
            state_pool_capacity: default_state_pool_capacity(),
        }
    }
}

use std::env;

pub const CONFIG_ENV: &str = "DECIMAL_AGG_CONFIG";

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var(CONFIG_ENV).unwrap_or_else(|_| "config".to_string());
    load_settings_from(&config_path)
}

/// Reads `path` (any extension the `config` crate knows, or none), filling
/// every missing key with its default. A missing file yields the defaults.
pub fn load_settings_from(path: &str) -> Result<Settings, config::ConfigError> {
    let defaults = Settings::default();
    let settings: Settings = config::Config::builder()
        .set_default("logging.log_dir", defaults.logging.log_dir)?
        .set_default("logging.stdout_level", defaults.logging.stdout_level)?
        .set_default("logging.file_level", defaults.logging.file_level)?
        .set_default("aggregate.partitions", defaults.aggregate.partitions as i64)?
        .set_default(
            "aggregate.state_pool_capacity",
            defaults.aggregate.state_pool_capacity as i64,
        )?
        .add_source(config::File::with_name(path).required(false))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
