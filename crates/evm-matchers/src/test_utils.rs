//! Fixtures for exercising the matcher without a node.

use std::collections::HashMap;

use alloy_primitives::{BlockHash, TxHash, B256};
use futures::future;

use crate::{
    BlockRecord, BlockTag, Evaluator, MockChainProvider, MockSentTransaction, TxReceipt,
};

/// Hash of the transaction every fixture is built around.
pub fn test_tx_hash() -> TxHash {
    B256::repeat_byte(0x11)
}

/// Hash of the block the fixture transaction is mined in.
pub fn test_block_hash() -> BlockHash {
    B256::repeat_byte(0x22)
}

/// A transaction that mines into `block_number`.
pub fn mined_tx(block_number: u64) -> MockSentTransaction {
    let receipt = TxReceipt::new(test_tx_hash(), test_block_hash(), block_number);
    let mut tx = MockSentTransaction::new();
    tx.expect_hash().return_const(test_tx_hash());
    tx.expect_wait().returning(move || Ok(Some(receipt)));
    tx
}

/// A transaction whose wait ends without a receipt.
pub fn dropped_tx() -> MockSentTransaction {
    let mut tx = MockSentTransaction::new();
    tx.expect_hash().return_const(test_tx_hash());
    tx.expect_wait().returning(|| Ok(None));
    tx
}

/// A provider whose fixture block holds the test transaction plus `tx_count - 1` others.
pub fn provider_with_block(tx_count: usize) -> MockChainProvider {
    let transactions = (0..tx_count)
        .map(|i| match i {
            0 => test_tx_hash(),
            i => B256::with_last_byte(i as u8),
        })
        .collect::<Vec<_>>();
    let block = BlockRecord::new(test_block_hash(), transactions);

    let mut provider = MockChainProvider::new();
    provider
        .expect_block_by_hash()
        .returning(move |_, _| Ok(Some(block.clone())));
    provider
}

/// An evaluator answering from a fixed `height -> value` table.
///
/// Heights missing from the table fail the evaluation.
pub fn evaluator_from_table(values: &[(u64, &str)]) -> impl Evaluator + 'static {
    let table: HashMap<u64, String> = values
        .iter()
        .map(|(height, value)| (*height, (*value).to_owned()))
        .collect();

    move |tag: BlockTag| {
        future::ready(
            table
                .get(&tag.number())
                .cloned()
                .ok_or_else(|| eyre::eyre!("no value at {tag}")),
        )
    }
}
