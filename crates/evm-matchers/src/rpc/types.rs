use alloy_primitives::{BlockHash, TxHash};
use serde::Deserialize;

use crate::BlockRecord;

/// Block object as returned by `eth_getBlockByHash`.
///
/// Only the fields the matcher reads are decoded.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RpcBlock {
    hash: BlockHash,
    #[serde(default)]
    transactions: Vec<RpcBlockTransaction>,
}

/// Entry of a block's `transactions` array, which holds bare hashes or full objects
/// depending on the request.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RpcBlockTransaction {
    Hash(TxHash),
    Full { hash: TxHash },
}

impl RpcBlockTransaction {
    fn hash(&self) -> TxHash {
        match self {
            Self::Hash(hash) | Self::Full { hash } => *hash,
        }
    }
}

impl From<RpcBlock> for BlockRecord {
    fn from(block: RpcBlock) -> Self {
        let transactions = block.transactions.iter().map(RpcBlockTransaction::hash).collect();
        BlockRecord::new(block.hash, transactions)
    }
}
