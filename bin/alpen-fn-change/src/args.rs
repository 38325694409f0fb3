use std::{env, path::PathBuf};

use argh::FromArgs;

/// Configs overridable by environment.
#[derive(Debug, Clone)]
pub(crate) struct EnvArgs {
    /// Service label to include in service name
    pub service_label: Option<String>,
}

impl EnvArgs {
    pub(crate) fn from_env() -> Self {
        Self {
            service_label: env::var("STRATA_SVC_LABEL").ok(),
        }
    }
}

#[derive(Debug, Clone, FromArgs)]
#[argh(description = "checks how a mined transaction changed a balance or a storage slot")]
pub(crate) struct Args {
    #[argh(option, short = 'c', description = "path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[argh(
        option,
        short = 'r',
        description = "JSON-RPC endpoint (overrides the config file)"
    )]
    pub rpc_url: Option<String>,

    #[argh(option, short = 't', description = "hash of the transaction to check")]
    pub tx: String,

    #[argh(
        option,
        short = 'e',
        description = "expected change, decimal (optionally signed) or 0x-prefixed"
    )]
    pub expected: String,

    #[argh(switch, description = "assert that the change is NOT the expected one")]
    pub not: bool,

    #[argh(subcommand)]
    pub subc: Subcommand,
}

#[derive(Debug, Clone, PartialEq, FromArgs)]
#[argh(subcommand)]
pub(crate) enum Subcommand {
    Balance(SubcBalance),
    Storage(SubcStorage),
}

#[derive(Debug, Clone, PartialEq, FromArgs)]
#[argh(
    subcommand,
    name = "balance",
    description = "measures the change of an account balance in wei"
)]
pub(crate) struct SubcBalance {
    #[argh(option, short = 'a', description = "account address")]
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, FromArgs)]
#[argh(
    subcommand,
    name = "storage",
    description = "measures the change of a contract storage slot"
)]
pub(crate) struct SubcStorage {
    #[argh(option, short = 'a', description = "contract address")]
    pub address: String,

    #[argh(option, short = 's', description = "storage slot, decimal or 0x-prefixed")]
    pub slot: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, argh::EarlyExit> {
        Args::from_args(&["alpen-fn-change"], args)
    }

    #[test]
    fn test_parse_balance_command() {
        let args = parse(&[
            "--rpc-url",
            "http://localhost:8545",
            "--tx",
            "0x11",
            "--expected",
            "10",
            "balance",
            "--address",
            "0xaa",
        ])
        .unwrap();

        assert_eq!(args.rpc_url.as_deref(), Some("http://localhost:8545"));
        assert!(!args.not);
        assert_eq!(
            args.subc,
            Subcommand::Balance(SubcBalance {
                address: "0xaa".to_string()
            })
        );
    }

    #[test]
    fn test_parse_negated_storage_command() {
        let args = parse(&[
            "--tx", "0x11", "--expected", "0x05", "--not", "storage", "-a", "0xbb", "-s", "3",
        ])
        .unwrap();

        assert!(args.not);
        assert_eq!(args.expected, "0x05");
        assert_eq!(
            args.subc,
            Subcommand::Storage(SubcStorage {
                address: "0xbb".to_string(),
                slot: "3".to_string(),
            })
        );
    }

    #[test]
    fn test_missing_subcommand_is_rejected() {
        assert!(parse(&["--tx", "0x11", "--expected", "1"]).is_err());
    }
}
