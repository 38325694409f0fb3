//! Assertions about how a single EVM transaction changes the result of a read function.
//!
//! The core measurement lives in [`FnChangeEngine::fn_change`]: resolve the transaction, wait
//! for its receipt, require it to be alone in its block `N`, evaluate the caller's function at
//! `N` and `N - 1` and return the difference. [`ChainMatchers`] wraps it in a chainable,
//! negatable `changeFnEvaluation` assertion.

mod assertion;
mod config;
mod error;
mod fn_change;
mod rpc;
mod traits;
mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use num_bigint::BigInt;

pub use assertion::{Assertion, AssertionState, ChainMatchers, Deferred, CHANGE_FN_EVALUATION};
pub use config::{EvaluationMode, MatcherConfig, RpcProviderConfig};
pub use error::{AssertionFailure, ChainingMisuseError, ChangeError};
pub use fn_change::{EvaluationPair, FnChangeEngine, TxSubject};
pub use rpc::{BalanceEvaluator, JsonRpcProvider, ReceiptPolling, RpcTransaction, StorageEvaluator};
pub use traits::{
    evaluator::Evaluator,
    provider::{ChainProvider, ProviderError},
    state::StateReader,
    transaction::SentTransaction,
};
#[cfg(any(test, feature = "test-utils"))]
pub use traits::{
    evaluator::MockEvaluator, provider::MockChainProvider, state::MockStateReader,
    transaction::MockSentTransaction,
};
pub use types::{
    bigint::{parse_bigint, BigIntParser, ParseBigIntError, RawValue, StandardParser},
    block::{BlockRecord, BlockTag, BlockTransactionsKind},
    receipt::TxReceipt,
};
