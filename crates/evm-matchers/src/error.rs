use alloy_primitives::{BlockHash, TxHash};
use thiserror::Error;

use num_bigint::BigInt;

use crate::{ParseBigIntError, ProviderError};

/// Errors produced while computing or asserting a function change.
///
/// Everything except [`ChangeError::AssertionFailed`] means the environment or the usage
/// was wrong rather than the expectation not being met.
#[derive(Debug, Error)]
pub enum ChangeError {
    /// The subject failed to produce a transaction.
    #[error(transparent)]
    Resolve(eyre::Report),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Waiting for confirmation returned no receipt.
    #[error("transaction receipt for {tx_hash} should not be null")]
    NullReceipt { tx_hash: TxHash },

    /// The provider has no block with the receipt's block hash.
    #[error("block {0} not found")]
    MissingBlock(BlockHash),

    /// The transaction's block does not contain exactly one transaction.
    #[error("Multiple transactions found in block {block_hash} (expected 1, found {count})")]
    MultipleTransactionsInBlock { block_hash: BlockHash, count: usize },

    /// The transaction was included at genesis, so there is no state before it.
    #[error("transaction {tx_hash} is in block 0, which has no preceding block")]
    NoPrecedingBlock { tx_hash: TxHash },

    /// The caller's evaluator failed.
    #[error(transparent)]
    Evaluator(eyre::Report),

    #[error(transparent)]
    Conversion(#[from] ParseBigIntError),

    #[error(transparent)]
    AssertionFailed(#[from] AssertionFailure),
}

impl ChangeError {
    /// Returns true if the expectation was checked and not met.
    pub fn is_assertion_failure(&self) -> bool {
        matches!(self, Self::AssertionFailed(_))
    }

    /// Returns the assertion failure, if that is what this error is.
    pub fn as_assertion_failure(&self) -> Option<&AssertionFailure> {
        match self {
            Self::AssertionFailed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// The computed change did not satisfy the (possibly negated) expectation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AssertionFailure {
    pub expected: BigInt,
    pub actual: BigInt,
    pub negated: bool,
    pub message: String,
}

/// An async matcher was invoked on an assertion that already has one pending.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "The matcher '{matcher}' cannot be chained after '{previous}'. Async matchers must each be \
     called on their own assertion."
)]
pub struct ChainingMisuseError {
    pub matcher: &'static str,
    pub previous: &'static str,
}
