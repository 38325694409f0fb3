use alloy_primitives::{Address, U256};
use async_trait::async_trait;

use crate::{BlockTag, Evaluator, RawValue, StateReader};

/// Evaluates the balance of an account.
#[derive(Debug, Clone)]
pub struct BalanceEvaluator<R> {
    reader: R,
    address: Address,
}

impl<R: StateReader> BalanceEvaluator<R> {
    pub fn new(reader: R, address: Address) -> Self {
        Self { reader, address }
    }
}

#[async_trait]
impl<R: StateReader> Evaluator for BalanceEvaluator<R> {
    async fn evaluate(&self, block_tag: BlockTag) -> eyre::Result<RawValue> {
        let balance = self.reader.balance_at(self.address, block_tag).await?;
        Ok(balance.into())
    }
}

/// Evaluates one storage slot of a contract, read as an unsigned 256-bit integer.
#[derive(Debug, Clone)]
pub struct StorageEvaluator<R> {
    reader: R,
    address: Address,
    slot: U256,
}

impl<R: StateReader> StorageEvaluator<R> {
    pub fn new(reader: R, address: Address, slot: U256) -> Self {
        Self {
            reader,
            address,
            slot,
        }
    }
}

#[async_trait]
impl<R: StateReader> Evaluator for StorageEvaluator<R> {
    async fn evaluate(&self, block_tag: BlockTag) -> eyre::Result<RawValue> {
        let word = self
            .reader
            .storage_at(self.address, self.slot, block_tag)
            .await?;
        Ok(U256::from_be_bytes(word.0).into())
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, B256};

    use super::*;
    use crate::{
        test_utils::{mined_tx, provider_with_block},
        parse_bigint, FnChangeEngine, MockStateReader, ProviderError, TxSubject,
    };

    const ACCOUNT: Address = address!("00000000000000000000000000000000000000aa");

    #[tokio::test]
    async fn test_balance_evaluator_reads_requested_block() {
        let mut reader = MockStateReader::new();
        reader
            .expect_balance_at()
            .withf(|address, block| *address == ACCOUNT && block.number() == 7)
            .returning(|_, _| Ok(U256::from(1_000u64)));

        let value = BalanceEvaluator::new(reader, ACCOUNT)
            .evaluate(BlockTag::new(7))
            .await
            .unwrap();

        assert_eq!(value.to_string(), "1000");
    }

    #[tokio::test]
    async fn test_storage_evaluator_reads_word_as_integer() {
        let mut reader = MockStateReader::new();
        reader
            .expect_storage_at()
            .withf(|_, slot, _| *slot == U256::from(3u64))
            .returning(|_, _, _| Ok(B256::with_last_byte(0x2a)));

        let value = StorageEvaluator::new(reader, ACCOUNT, U256::from(3u64))
            .evaluate(BlockTag::new(1))
            .await
            .unwrap();

        assert_eq!(value.to_string(), "42");
    }

    #[tokio::test]
    async fn test_reader_errors_surface_as_evaluator_errors() {
        let mut reader = MockStateReader::new();
        reader
            .expect_balance_at()
            .returning(|_, _| Err(ProviderError::rpc("header not found")));

        let err = BalanceEvaluator::new(reader, ACCOUNT)
            .evaluate(BlockTag::new(1))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("header not found"));
    }

    #[tokio::test]
    async fn test_balance_change_through_engine() {
        let mut reader = MockStateReader::new();
        reader
            .expect_balance_at()
            .returning(|_, block| match block.number() {
                100 => Ok(U256::from(250u64)),
                _ => Ok(U256::from(1_000u64)),
            });

        let engine = FnChangeEngine::new(provider_with_block(1));
        let change = engine
            .fn_change(
                TxSubject::sent(mined_tx(100)),
                &BalanceEvaluator::new(reader, ACCOUNT),
            )
            .await
            .unwrap();

        assert_eq!(change, parse_bigint("-750").unwrap());
    }
}
