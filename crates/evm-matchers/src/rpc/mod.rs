//! JSON-RPC backed implementations of the chain traits.

mod evaluators;
mod provider;
mod transaction;
mod types;

pub use self::{
    evaluators::{BalanceEvaluator, StorageEvaluator},
    provider::JsonRpcProvider,
    transaction::{ReceiptPolling, RpcTransaction},
};
