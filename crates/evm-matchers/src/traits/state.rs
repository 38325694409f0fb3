use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;

use crate::{BlockTag, ProviderError};

/// Historical account state reads used by the ready-made evaluators.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait StateReader: Send + Sync {
    /// Balance of `address` in wei after `block` was applied (`eth_getBalance`).
    async fn balance_at(&self, address: Address, block: BlockTag) -> Result<U256, ProviderError>;

    /// Raw storage word of `address` at `slot` after `block` was applied
    /// (`eth_getStorageAt`).
    async fn storage_at(
        &self,
        address: Address,
        slot: U256,
        block: BlockTag,
    ) -> Result<B256, ProviderError>;
}
