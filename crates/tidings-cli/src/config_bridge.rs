//! Conversion from loaded configuration to domain types.

use tidings_config::Config;
use tidings_telemetry::{LogConfig, TelemetryResult};

/// Build the telemetry `LogConfig` from the `[logging]` section.
///
/// # Errors
///
/// Returns an error if the configured format is unknown.
pub(crate) fn to_log_config(config: &Config) -> TelemetryResult<LogConfig> {
    let logging = &config.logging;
    let mut log_config = LogConfig::new(logging.level.to_ascii_lowercase())
        .with_format(logging.format.parse()?);
    for directive in &logging.directives {
        log_config = log_config.with_directive(directive.clone());
    }
    Ok(log_config)
}
