//! Logging and tracing bootstrap.

use anyhow::{anyhow, Context};
use tracing_subscriber::EnvFilter;

use bookshelf_kernel::settings::{LogFormat, TelemetrySettings};

/// Install the global tracing subscriber. Logs go to stderr so command output
/// on stdout stays clean.
///
/// `RUST_LOG` wins over `telemetry.filter` when set.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(settings)?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = match settings.log_format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))?;

    tracing::debug!(
        target: "bookshelf-telemetry",
        format = ?settings.log_format,
        "telemetry initialized"
    );
    Ok(())
}

/// Filter from the configured directive string.
pub fn build_filter(settings: &TelemetrySettings) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_new(&settings.filter)
        .with_context(|| format!("invalid telemetry filter '{}'", settings.filter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses() {
        assert!(build_filter(&TelemetrySettings::default()).is_ok());
    }

    #[test]
    fn per_target_directives_parse() {
        let settings = TelemetrySettings {
            filter: "warn,bookshelf_app=debug".to_string(),
            ..Default::default()
        };
        assert!(build_filter(&settings).is_ok());
    }
}
