use std::{fs, path::PathBuf};

use alpen_evm_matchers::{MatcherConfig, RpcProviderConfig};
use anyhow::{bail, Context};
use serde::Deserialize;

use crate::args::Args;

/// Logging configuration for the CLI.
#[derive(Debug, Clone, Deserialize, Default)]
pub(crate) struct LoggingConfig {
    /// Service label to append to the service name (e.g., "prod", "dev").
    pub service_label: Option<String>,

    /// Extra filter directives such as `alpen_evm_matchers=debug`.
    #[serde(default)]
    pub directives: Vec<String>,

    /// Directory path for file-based logging.
    pub log_dir: Option<PathBuf>,

    /// Prefix for log file names (defaults to "alpen-fn-change" if not set).
    pub log_file_prefix: Option<String>,

    /// Use JSON format for logs instead of compact format.
    pub json_format: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Config {
    pub rpc: RpcProviderConfig,

    #[serde(default)]
    pub matcher: MatcherConfig,

    /// Logging configuration (optional).
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Loads the config file if one was given, then applies command line overrides.
    pub(crate) fn from_args(args: &Args) -> anyhow::Result<Config> {
        let mut config = match &args.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("config: failed to read {}", path.display()))?;
                Self::from_toml(&raw)
                    .with_context(|| format!("config: failed to parse {}", path.display()))?
            }
            None => {
                let Some(rpc_url) = &args.rpc_url else {
                    bail!("args: no --config or --rpc-url provided");
                };
                Self {
                    rpc: RpcProviderConfig::new(rpc_url.clone()),
                    matcher: MatcherConfig::default(),
                    logging: LoggingConfig::default(),
                }
            }
        };

        if let Some(rpc_url) = &args.rpc_url {
            config.rpc.rpc_url = rpc_url.clone();
        }

        Ok(config)
    }

    pub(crate) fn from_toml(raw: &str) -> anyhow::Result<Config> {
        Ok(toml::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use alpen_evm_matchers::EvaluationMode;

    use super::*;
    use crate::args::{SubcBalance, Subcommand};

    fn args(config: Option<PathBuf>, rpc_url: Option<&str>) -> Args {
        Args {
            config,
            rpc_url: rpc_url.map(str::to_owned),
            tx: "0x11".to_string(),
            expected: "1".to_string(),
            not: false,
            subc: Subcommand::Balance(SubcBalance {
                address: "0xaa".to_string(),
            }),
        }
    }

    #[test]
    fn test_full_config_parses() {
        let config = Config::from_toml(
            r#"
            [rpc]
            rpc_url = "http://localhost:8545"
            receipt_poll_interval_ms = 100
            receipt_max_polls = 50

            [matcher]
            evaluation_mode = "concurrent"

            [logging]
            service_label = "dev"
            directives = ["jsonrpsee=warn"]
            json_format = true
            "#,
        )
        .unwrap();

        assert_eq!(config.rpc.rpc_url, "http://localhost:8545");
        assert_eq!(config.rpc.receipt_poll_interval_ms, 100);
        assert_eq!(config.rpc.receipt_max_polls, Some(50));
        assert_eq!(config.rpc.request_timeout_ms, 30_000);
        assert_eq!(config.matcher.evaluation_mode, EvaluationMode::Concurrent);
        assert_eq!(config.logging.service_label.as_deref(), Some("dev"));
        assert_eq!(config.logging.directives, vec!["jsonrpsee=warn".to_string()]);
        assert_eq!(config.logging.json_format, Some(true));
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_toml(
            r#"
            [rpc]
            rpc_url = "http://localhost:8545"
            "#,
        )
        .unwrap();

        assert_eq!(config.matcher.evaluation_mode, EvaluationMode::Sequential);
        assert!(config.logging.log_dir.is_none());
        assert!(config.logging.directives.is_empty());
    }

    #[test]
    fn test_config_requires_rpc_section() {
        assert!(Config::from_toml("[matcher]\nevaluation_mode = \"sequential\"\n").is_err());
    }

    #[test]
    fn test_rpc_url_without_file() {
        let config = Config::from_args(&args(None, Some("http://node:8545"))).unwrap();
        assert_eq!(config.rpc.rpc_url, "http://node:8545");
        assert_eq!(config.rpc.receipt_max_polls, None);
    }

    #[test]
    fn test_no_source_is_rejected() {
        let err = Config::from_args(&args(None, None)).unwrap_err();
        assert!(err.to_string().contains("--rpc-url"));
    }

    #[test]
    fn test_rpc_url_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[rpc]\nrpc_url = \"http://file:8545\"\n\n[matcher]\nevaluation_mode = \"concurrent\"\n",
        )
        .unwrap();

        let config = Config::from_args(&args(Some(path), Some("http://flag:8545"))).unwrap();
        assert_eq!(config.rpc.rpc_url, "http://flag:8545");
        assert_eq!(config.matcher.evaluation_mode, EvaluationMode::Concurrent);
    }
}
