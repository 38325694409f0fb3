use alloy_primitives::{BlockHash, TxHash};
use async_trait::async_trait;
use thiserror::Error;

use crate::{BlockRecord, BlockTransactionsKind, TxReceipt};

/// Access to the chain the transaction under test was sent to.
///
/// The matcher itself only looks up blocks; receipts are normally reached through a
/// [`SentTransaction`](crate::SentTransaction) handle, which may in turn poll
/// [`transaction_receipt`](ChainProvider::transaction_receipt).
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait ChainProvider: Send + Sync {
    /// Fetches a block by hash, equivalent to `eth_getBlockByHash`.
    ///
    /// Returns `None` if the provider does not know the block.
    async fn block_by_hash(
        &self,
        block_hash: BlockHash,
        kind: BlockTransactionsKind,
    ) -> Result<Option<BlockRecord>, ProviderError>;

    /// Fetches a receipt, equivalent to `eth_getTransactionReceipt`.
    ///
    /// Returns `None` while the transaction is not mined.
    async fn transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<TxReceipt>, ProviderError>;
}

/// Errors that can occur when talking to a provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The node answered with a JSON-RPC error.
    #[error("rpc error: {0}")]
    Rpc(String),

    /// The request did not reach the node or the connection failed.
    #[error("network error: {0}")]
    Network(String),

    /// The response could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Other unspecified error.
    #[error(transparent)]
    Other(#[from] eyre::Error),
}

impl ProviderError {
    /// Creates an RPC error.
    pub fn rpc(msg: impl Into<String>) -> Self {
        Self::Rpc(msg.into())
    }

    /// Creates a network error.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Creates a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}
