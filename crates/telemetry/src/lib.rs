//! Logging bootstrap for the bookshelf binaries.

use anyhow::Context;
use bookshelf_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `telemetry.log_level` when it is set.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(&settings.log_level)?,
    };

    let registry = tracing_subscriber::registry().with(filter);

    match settings.log_format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .try_init(),
    }
    .context("failed to install tracing subscriber")?;

    tracing::debug!(
        target: "bookshelf-telemetry",
        format = ?settings.log_format,
        "telemetry initialized"
    );
    Ok(())
}

/// Parse a filter directive such as `info` or `bookshelf_app=debug,tower_http=info`
pub fn build_filter(directives: &str) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_new(directives)
        .with_context(|| format!("invalid log filter '{}'", directives))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_level_and_target_directives() {
        assert!(build_filter("info").is_ok());
        assert!(build_filter("bookshelf_app=debug,tower_http=info").is_ok());
    }

    #[test]
    fn rejects_malformed_level() {
        let err = build_filter("bookshelf_app=loud").unwrap_err();
        assert!(err.to_string().contains("bookshelf_app=loud"));
    }

    #[test]
    fn second_install_fails() {
        let settings = TelemetrySettings::default();
        let _ = init(&settings);
        assert!(init(&settings).is_err());
    }
}
