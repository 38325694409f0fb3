use std::fmt;

use alloy_primitives::{BlockHash, TxHash};
use serde::{Serialize, Serializer};

/// Historical state selector handed to evaluators.
///
/// Renders as `0x` followed by the lowercase hex height with no leading zeros (`0x0` for
/// genesis), which is the block parameter format of the `eth_*` JSON-RPC methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockTag(u64);

impl BlockTag {
    pub fn new(number: u64) -> Self {
        Self(number)
    }

    pub fn number(&self) -> u64 {
        self.0
    }

    /// Tag of the block immediately before this one, if any.
    pub fn parent(&self) -> Option<Self> {
        self.0.checked_sub(1).map(Self)
    }
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl From<BlockTag> for String {
    fn from(tag: BlockTag) -> Self {
        tag.to_string()
    }
}

impl Serialize for BlockTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How much transaction detail to request with a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTransactionsKind {
    /// Only transaction hashes.
    Hashes,
    /// Full transaction objects.
    Full,
}

impl BlockTransactionsKind {
    /// Value of the `includeFullTransactions` parameter of `eth_getBlockByHash`.
    pub fn is_full(&self) -> bool {
        matches!(self, Self::Full)
    }
}

/// A block as seen by the matcher: its hash and the ordered hashes of its transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRecord {
    hash: BlockHash,
    transactions: Vec<TxHash>,
}

impl BlockRecord {
    pub fn new(hash: BlockHash, transactions: Vec<TxHash>) -> Self {
        Self { hash, transactions }
    }

    pub fn hash(&self) -> BlockHash {
        self.hash
    }

    pub fn transactions(&self) -> &[TxHash] {
        &self.transactions
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}
