//! Configuration for the matcher and the JSON-RPC provider.

use serde::{Deserialize, Serialize};

/// Default value for `receipt_poll_interval_ms` in [`RpcProviderConfig`].
const DEFAULT_RECEIPT_POLL_INTERVAL_MS: u64 = 500;

/// Default value for `request_timeout_ms` in [`RpcProviderConfig`].
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// How the two historical evaluations are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationMode {
    /// Evaluate after the transaction's block, then before it.
    #[default]
    Sequential,
    /// Evaluate both heights at the same time.
    Concurrent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherConfig {
    #[serde(default)]
    pub evaluation_mode: EvaluationMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcProviderConfig {
    /// HTTP endpoint of the node.
    pub rpc_url: String,

    /// Delay between `eth_getTransactionReceipt` polls while waiting for a transaction.
    #[serde(default = "default_receipt_poll_interval_ms")]
    pub receipt_poll_interval_ms: u64,

    /// Give up waiting for a receipt after this many polls. Waits forever if unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_max_polls: Option<u32>,

    /// Per-request timeout of the HTTP client.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl RpcProviderConfig {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            receipt_poll_interval_ms: DEFAULT_RECEIPT_POLL_INTERVAL_MS,
            receipt_max_polls: None,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

fn default_receipt_poll_interval_ms() -> u64 {
    DEFAULT_RECEIPT_POLL_INTERVAL_MS
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}
