use std::time::Duration;

use alloy_primitives::TxHash;
use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{debug, trace};

use crate::{ChainProvider, ProviderError, RpcProviderConfig, SentTransaction, TxReceipt};

/// How a [`RpcTransaction`] waits for its receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptPolling {
    /// Delay between two receipt lookups.
    pub interval: Duration,
    /// Stop after this many lookups without a receipt. Unbounded if `None`.
    pub max_polls: Option<u32>,
}

impl From<&RpcProviderConfig> for ReceiptPolling {
    fn from(config: &RpcProviderConfig) -> Self {
        Self {
            interval: Duration::from_millis(config.receipt_poll_interval_ms),
            max_polls: config.receipt_max_polls,
        }
    }
}

/// A sent transaction, waited on by polling `eth_getTransactionReceipt`.
#[derive(Debug, Clone)]
pub struct RpcTransaction<P> {
    hash: TxHash,
    provider: P,
    polling: ReceiptPolling,
}

impl<P: ChainProvider> RpcTransaction<P> {
    pub fn new(hash: TxHash, provider: P, polling: ReceiptPolling) -> Self {
        Self {
            hash,
            provider,
            polling,
        }
    }

    pub fn polling(&self) -> ReceiptPolling {
        self.polling
    }
}

#[async_trait]
impl<P: ChainProvider> SentTransaction for RpcTransaction<P> {
    fn hash(&self) -> TxHash {
        self.hash
    }

    async fn wait(&self) -> Result<Option<TxReceipt>, ProviderError> {
        let mut polls = 0u32;
        loop {
            // Lookup errors are not retried.
            if let Some(receipt) = self.provider.transaction_receipt(self.hash).await? {
                debug!(
                    tx_hash = %self.hash,
                    block_number = receipt.block_number,
                    polls,
                    "transaction mined"
                );
                return Ok(Some(receipt));
            }

            polls += 1;
            if self.polling.max_polls.is_some_and(|max| polls >= max) {
                debug!(tx_hash = %self.hash, polls, "gave up waiting for receipt");
                return Ok(None);
            }

            trace!(tx_hash = %self.hash, polls, "receipt not available yet");
            sleep(self.polling.interval).await;
        }
    }
}
