use alloy_primitives::{BlockHash, TxHash};
use serde::{Deserialize, Serialize};

/// The parts of a transaction receipt needed to locate the transaction's block.
///
/// Deserializes from an `eth_getTransactionReceipt` response; other receipt fields are
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    pub transaction_hash: TxHash,
    pub block_hash: BlockHash,
    #[serde(with = "alloy_serde::quantity")]
    pub block_number: u64,
}

impl TxReceipt {
    pub fn new(transaction_hash: TxHash, block_hash: BlockHash, block_number: u64) -> Self {
        Self {
            transaction_hash,
            block_hash,
            block_number,
        }
    }
}
