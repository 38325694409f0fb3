//! Alpen function change checker
//!
//! Asserts that a mined transaction changed an account balance or a storage slot by an
//! expected amount. Exits non-zero if the assertion fails or cannot be evaluated.

mod args;
mod config;

use std::str::FromStr;

use alloy_primitives::{Address, TxHash, U256};
use alpen_evm_matchers::{
    BalanceEvaluator, ChainMatchers, FnChangeEngine, JsonRpcProvider, RawValue, StorageEvaluator,
};
use anyhow::Context;
use args::{Args, EnvArgs, Subcommand};
use config::{Config, LoggingConfig};
use strata_common::logging;
use tracing::info;

const SERVICE_NAME: &str = "alpen-fn-change";

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();
    if let Err(e) = main_inner(args) {
        eprintln!("FATAL ERROR: {e:#}");

        return Err(e);
    }

    Ok(())
}

fn main_inner(args: Args) -> anyhow::Result<()> {
    let config = Config::from_args(&args)?;

    // Init the logging before we do anything else.
    init_logging(&config.logging)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("fn-change-rt")
        .build()
        .context("init: build rt")?;

    runtime.block_on(check_change(args, config))
}

async fn check_change(args: Args, config: Config) -> anyhow::Result<()> {
    let tx_hash = TxHash::from_str(&args.tx).context("args: invalid --tx")?;
    let expected = RawValue::from(args.expected);

    info!(rpc_url = %config.rpc.rpc_url, "connecting to node");
    let provider = JsonRpcProvider::connect(config.rpc)?;
    let matchers = ChainMatchers::new(FnChangeEngine::from_config(
        provider.clone(),
        &config.matcher,
    ));

    let mut assertion = matchers.expect(provider.transaction(tx_hash));
    if args.not {
        assertion.negate();
    }

    let deferred = match &args.subc {
        Subcommand::Balance(subc) => {
            let address = parse_address(&subc.address)?;
            info!(
                %tx_hash,
                %address,
                %expected,
                negated = args.not,
                "checking balance change"
            );
            assertion.change_fn_evaluation(BalanceEvaluator::new(provider, address), expected)?
        }
        Subcommand::Storage(subc) => {
            let address = parse_address(&subc.address)?;
            let slot = U256::from_str(&subc.slot).context("args: invalid --slot")?;
            info!(
                %tx_hash,
                %address,
                %slot,
                %expected,
                negated = args.not,
                "checking storage change"
            );
            assertion.change_fn_evaluation(
                StorageEvaluator::new(provider, address, slot),
                expected,
            )?
        }
    };

    deferred.await?;

    info!(%tx_hash, "assertion passed");
    println!("passed");
    Ok(())
}

fn parse_address(raw: &str) -> anyhow::Result<Address> {
    Address::from_str(raw).with_context(|| format!("args: invalid address '{raw}'"))
}

/// Sets up logging from the config file, with the service label taken from the environment
/// when the file has none.
fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let env_args = EnvArgs::from_env();
    let service_label = config
        .service_label
        .as_deref()
        .or(env_args.service_label.as_deref());

    logging::init_logging_from_config(logging::LoggingInitConfig {
        service_base_name: SERVICE_NAME,
        service_label,
        directives: &config.directives,
        log_dir: config.log_dir.as_ref(),
        log_file_prefix: config.log_file_prefix.as_deref(),
        json_format: config.json_format,
        default_log_prefix: SERVICE_NAME,
    })?;

    Ok(())
}
