//! Settings consumed by [`init`](super::init).

use std::path::PathBuf;

use tracing_appender::rolling::Rotation;
use tracing_subscriber::fmt::format::FmtSpan;

/// How events are rendered on stdout.
#[derive(Debug, Clone)]
pub struct StdoutConfig {
    pub json_format: bool,
    /// Span lifecycle events to emit. Only `CLOSE` by default, which carries span timings.
    pub fmt_span: FmtSpan,
}

impl Default for StdoutConfig {
    fn default() -> Self {
        Self {
            json_format: false,
            fmt_span: FmtSpan::CLOSE,
        }
    }
}

/// A daily-rotated log file written next to stdout output.
#[derive(Debug, Clone)]
pub struct FileLoggingConfig {
    pub directory: PathBuf,
    /// File names start with this, followed by the rotation date.
    pub file_name_prefix: String,
    pub rotation: Rotation,
    pub json_format: bool,
}

impl FileLoggingConfig {
    pub fn new(directory: PathBuf, file_name_prefix: String) -> Self {
        Self {
            directory,
            file_name_prefix,
            rotation: Rotation::DAILY,
            json_format: false,
        }
    }
}

/// Everything [`init`](super::init) needs to install the global subscriber.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Reported once the subscriber is up.
    pub service_name: String,
    /// Applied after the INFO default and before `RUST_LOG`.
    pub directives: Vec<String>,
    pub stdout_config: StdoutConfig,
    pub file_logging_config: Option<FileLoggingConfig>,
}

impl LoggerConfig {
    pub fn new(service_name: String) -> Self {
        Self {
            service_name,
            directives: Vec::new(),
            stdout_config: StdoutConfig::default(),
            file_logging_config: None,
        }
    }

    /// Appends a filter directive, e.g. `jsonrpsee=warn`.
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    pub fn with_json_logging(mut self, enabled: bool) -> Self {
        self.stdout_config.json_format = enabled;
        self
    }

    pub fn with_file_logging(mut self, config: FileLoggingConfig) -> Self {
        self.file_logging_config = Some(config);
        self
    }
}
