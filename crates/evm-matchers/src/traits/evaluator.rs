use std::future::Future;

use async_trait::async_trait;

use crate::{BlockTag, RawValue};

/// A read-only query evaluated against historical chain state.
///
/// Closures of the form `Fn(BlockTag) -> impl Future<Output = eyre::Result<V>>` implement
/// this trait for any `V: Into<RawValue>`.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait Evaluator: Send + Sync {
    /// Evaluates the query as of the state after `block_tag` was applied.
    async fn evaluate(&self, block_tag: BlockTag) -> eyre::Result<RawValue>;
}

#[async_trait]
impl<F, Fut, V> Evaluator for F
where
    F: Fn(BlockTag) -> Fut + Send + Sync,
    Fut: Future<Output = eyre::Result<V>> + Send,
    V: Into<RawValue>,
{
    async fn evaluate(&self, block_tag: BlockTag) -> eyre::Result<RawValue> {
        self(block_tag).await.map(Into::into)
    }
}
