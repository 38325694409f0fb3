use alloy_primitives::TxHash;
use async_trait::async_trait;

use crate::{ProviderError, TxReceipt};

/// Handle to a transaction that has been submitted to the chain.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait SentTransaction: Send + Sync {
    /// Hash of the submitted transaction.
    fn hash(&self) -> TxHash;

    /// Waits until the transaction is mined and returns its receipt.
    ///
    /// `None` means the wait ended without a receipt, e.g. the transaction was dropped.
    async fn wait(&self) -> Result<Option<TxReceipt>, ProviderError>;
}
