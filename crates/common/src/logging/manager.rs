//! Logging initialization.

use thiserror::Error;
use tracing::*;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{
    filter::{Directive, ParseError},
    fmt::layer,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter, Layer,
};

use super::types::LoggerConfig;

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log directive '{directive}': {source}")]
    Directive {
        directive: String,
        #[source]
        source: ParseError,
    },

    #[error("global subscriber already installed: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Builds the filter shared by every layer.
///
/// INFO by default, then the configured directives, then anything in `RUST_LOG`.
pub fn build_filter(directives: &[String]) -> Result<EnvFilter, LoggingError> {
    let mut filt = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    for directive in directives {
        let parsed: Directive = directive.parse().map_err(|source| LoggingError::Directive {
            directive: directive.clone(),
            source,
        })?;
        filt = filt.add_directive(parsed);
    }

    Ok(filt)
}

/// Initializes the logging subsystem with the provided config.
pub fn init(config: LoggerConfig) -> Result<(), LoggingError> {
    let filt = build_filter(&config.directives)?;

    let stdout_sub = if config.stdout_config.json_format {
        layer()
            .json()
            .with_span_events(config.stdout_config.fmt_span.clone())
            .with_filter(filt)
            .boxed()
    } else {
        layer()
            .compact()
            .with_span_events(config.stdout_config.fmt_span.clone())
            .with_filter(filt)
            .boxed()
    };

    let file_layer = match config.file_logging_config.as_ref() {
        Some(file_config) => {
            let file_appender = RollingFileAppender::new(
                file_config.rotation.clone(),
                &file_config.directory,
                &file_config.file_name_prefix,
            );
            let filt = build_filter(&config.directives)?;

            let file_layer = if file_config.json_format {
                layer()
                    .json()
                    .with_writer(file_appender)
                    .with_ansi(false) // No color codes in files
                    .with_filter(filt)
                    .boxed()
            } else {
                layer()
                    .compact()
                    .with_writer(file_appender)
                    .with_ansi(false) // No color codes in files
                    .with_filter(filt)
                    .boxed()
            };
            Some(file_layer)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stdout_sub)
        .with(file_layer)
        .try_init()?;

    info!(
        service_name = %config.service_name,
        json = config.stdout_config.json_format,
        "logging initialized"
    );
    Ok(())
}
