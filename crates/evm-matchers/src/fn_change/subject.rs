use std::fmt;

use futures::future::{self, BoxFuture, Future, FutureExt};

use crate::ChangeError;

type ProduceFn<T> = Box<dyn FnOnce() -> BoxFuture<'static, eyre::Result<T>> + Send>;

/// The transaction under test, in any of the shapes a caller can have it in.
pub enum TxSubject<T> {
    /// A transaction that has already been sent.
    Sent(T),
    /// A pending resolution of a sent transaction.
    Pending(BoxFuture<'static, eyre::Result<T>>),
    /// A zero-argument producer, invoked once when the subject is resolved.
    Producer(ProduceFn<T>),
}

impl<T: Send + 'static> TxSubject<T> {
    pub fn sent(tx: T) -> Self {
        Self::Sent(tx)
    }

    pub fn pending<Fut>(fut: Fut) -> Self
    where
        Fut: Future<Output = eyre::Result<T>> + Send + 'static,
    {
        Self::Pending(fut.boxed())
    }

    /// Wraps an async producer such as a closure that sends the transaction.
    pub fn producer<F, Fut>(produce: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = eyre::Result<T>> + Send + 'static,
    {
        Self::Producer(Box::new(move || produce().boxed()))
    }

    /// Wraps a synchronous producer.
    pub fn from_fn<F>(produce: F) -> Self
    where
        F: FnOnce() -> eyre::Result<T> + Send + 'static,
    {
        Self::Producer(Box::new(move || future::ready(produce()).boxed()))
    }

    /// Turns the subject into a transaction handle, consuming it.
    pub(crate) async fn resolve(self) -> Result<T, ChangeError> {
        let resolved = match self {
            Self::Sent(tx) => Ok(tx),
            Self::Pending(fut) => fut.await,
            Self::Producer(produce) => produce().await,
        };
        resolved.map_err(ChangeError::Resolve)
    }
}

impl<T> From<T> for TxSubject<T> {
    fn from(tx: T) -> Self {
        Self::Sent(tx)
    }
}

impl<T> fmt::Debug for TxSubject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = match self {
            Self::Sent(_) => "Sent",
            Self::Pending(_) => "Pending",
            Self::Producer(_) => "Producer",
        };
        f.debug_tuple("TxSubject").field(&shape).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;

    #[tokio::test]
    async fn test_resolves_every_shape_to_the_same_handle() {
        assert_eq!(TxSubject::sent(7u32).resolve().await.unwrap(), 7);
        assert_eq!(TxSubject::from(7u32).resolve().await.unwrap(), 7);
        assert_eq!(
            TxSubject::pending(async { Ok(7u32) }).resolve().await.unwrap(),
            7
        );
        assert_eq!(
            TxSubject::producer(|| async { Ok(7u32) })
                .resolve()
                .await
                .unwrap(),
            7
        );
        assert_eq!(TxSubject::from_fn(|| Ok(7u32)).resolve().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_producer_runs_once_and_only_on_resolve() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let subject = TxSubject::from_fn(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(1u8)
        });

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        subject.resolve().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_propagates_producer_failure() {
        let err = TxSubject::<u8>::producer(|| async { Err(eyre::eyre!("nonce too low")) })
            .resolve()
            .await
            .unwrap_err();

        assert!(matches!(err, ChangeError::Resolve(_)));
        assert_eq!(err.to_string(), "nonce too low");
    }
}
