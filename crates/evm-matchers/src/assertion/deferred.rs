use std::{
    fmt,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use futures::future::{BoxFuture, Future, FutureExt, TryFutureExt};
use parking_lot::Mutex;
use tracing::{trace, warn};

use crate::ChangeError;

/// Lifecycle of one matcher invocation.
///
/// Moves strictly forward: `Created -> PipelineRunning -> Evaluated -> Passed | Failed`, or
/// `PipelineRunning -> Errored` when a stage faults before the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssertionState {
    /// Negation flag and subject captured, nothing awaited yet.
    Created,
    /// Resolving, waiting, validating or evaluating.
    PipelineRunning,
    /// Actual change computed, comparison in progress.
    Evaluated,
    Passed,
    Failed,
    /// A pipeline stage failed before the comparison.
    Errored,
}

impl AssertionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Passed | Self::Failed | Self::Errored)
    }

    fn can_advance_to(&self, next: Self) -> bool {
        use AssertionState::*;
        matches!(
            (*self, next),
            (Created, PipelineRunning)
                | (PipelineRunning, Evaluated)
                | (PipelineRunning, Errored)
                | (Evaluated, Passed)
                | (Evaluated, Failed)
        )
    }
}

/// Shared view of an invocation's [`AssertionState`].
#[derive(Debug, Clone)]
pub(crate) struct StateCell(Arc<Mutex<AssertionState>>);

impl StateCell {
    pub(crate) fn new() -> Self {
        Self(Arc::new(Mutex::new(AssertionState::Created)))
    }

    pub(crate) fn get(&self) -> AssertionState {
        *self.0.lock()
    }

    pub(crate) fn advance(&self, next: AssertionState) {
        let mut state = self.0.lock();
        if state.can_advance_to(next) {
            trace!(from = ?*state, to = ?next, "assertion state change");
            *state = next;
        } else {
            warn!(from = ?*state, to = ?next, "ignoring backwards assertion state change");
        }
    }
}

/// Pending outcome of an async matcher.
///
/// Awaiting it runs the pipeline; nothing happens until it is first polled. [`then`] and
/// [`catch`] compose further work the same way continuation and error hooks do on any
/// other pending assertion.
///
/// [`then`]: Deferred::then
/// [`catch`]: Deferred::catch
#[must_use = "assertions do nothing unless awaited"]
pub struct Deferred<T> {
    inner: BoxFuture<'static, Result<T, ChangeError>>,
    pub(super) state: StateCell,
}

impl<T: Send + 'static> Deferred<T> {
    pub(crate) fn new(inner: BoxFuture<'static, Result<T, ChangeError>>, state: StateCell) -> Self {
        Self { inner, state }
    }

    /// Current state of the underlying matcher invocation.
    pub fn state(&self) -> AssertionState {
        self.state.get()
    }

    /// Runs `f` with the result once the assertion succeeds.
    pub fn then<U, F, Fut>(self, f: F) -> Deferred<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = Result<U, ChangeError>> + Send + 'static,
    {
        Deferred {
            inner: self.inner.and_then(f).boxed(),
            state: self.state,
        }
    }

    /// Runs `f` with the error if the assertion fails or errors.
    pub fn catch<F, Fut>(self, f: F) -> Deferred<T>
    where
        F: FnOnce(ChangeError) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, ChangeError>> + Send + 'static,
    {
        Deferred {
            inner: self.inner.or_else(f).boxed(),
            state: self.state,
        }
    }

    /// Gives up state tracking and returns the underlying future.
    pub fn into_inner(self) -> BoxFuture<'static, Result<T, ChangeError>> {
        self.inner
    }
}

impl<T> Future for Deferred<T> {
    type Output = Result<T, ChangeError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("state", &self.state.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use futures::future;

    use super::*;

    #[test]
    fn test_state_only_moves_forward() {
        let state = StateCell::new();
        assert_eq!(state.get(), AssertionState::Created);

        state.advance(AssertionState::PipelineRunning);
        state.advance(AssertionState::Evaluated);
        state.advance(AssertionState::PipelineRunning);
        assert_eq!(state.get(), AssertionState::Evaluated);

        state.advance(AssertionState::Passed);
        state.advance(AssertionState::Failed);
        assert_eq!(state.get(), AssertionState::Passed);
        assert!(state.get().is_terminal());
    }

    #[test]
    fn test_errored_only_reachable_from_pipeline() {
        let state = StateCell::new();
        state.advance(AssertionState::Errored);
        assert_eq!(state.get(), AssertionState::Created);

        state.advance(AssertionState::PipelineRunning);
        state.advance(AssertionState::Errored);
        assert_eq!(state.get(), AssertionState::Errored);
    }

    #[tokio::test]
    async fn test_then_and_catch_compose() {
        let ok = Deferred::new(future::ok(2u32).boxed(), StateCell::new());
        let doubled = ok.then(|v| future::ok(v * 2)).await.unwrap();
        assert_eq!(doubled, 4);

        let failing: Deferred<u32> = Deferred::new(
            future::err(ChangeError::Evaluator(eyre::eyre!("boom"))).boxed(),
            StateCell::new(),
        );
        let recovered = failing
            .then(|v| future::ok(v + 1))
            .catch(|err| {
                assert_eq!(err.to_string(), "boom");
                future::ok(0)
            })
            .await
            .unwrap();
        assert_eq!(recovered, 0);
    }

    #[tokio::test]
    async fn test_into_inner_yields_same_result() {
        let deferred = Deferred::new(future::ok("done").boxed(), StateCell::new());
        assert_eq!(deferred.into_inner().await.unwrap(), "done");
    }
}
