//! Chainable, negatable assertions over [`FnChangeEngine`].
//!
//! ```ignore
//! let matchers = ChainMatchers::new(FnChangeEngine::new(provider.clone()));
//! matchers
//!     .expect(provider.transaction(deposit_tx))
//!     .change_fn_evaluation(BalanceEvaluator::new(provider, bridge), 1_000u64)?
//!     .await?;
//! ```

mod check;
mod deferred;

use std::{fmt, mem, sync::Arc};

use futures::FutureExt;
use tracing::debug;

use self::{check::check_fn_change, deferred::StateCell};
pub use self::deferred::{AssertionState, Deferred};
use crate::{
    ChainProvider, ChainingMisuseError, ChangeError, Evaluator, FnChangeEngine, RawValue,
    SentTransaction, TxSubject,
};

/// Name under which the function-change matcher is registered.
pub const CHANGE_FN_EVALUATION: &str = "changeFnEvaluation";

/// Creates assertions that share one engine.
pub struct ChainMatchers<P> {
    engine: Arc<FnChangeEngine<P>>,
}

impl<P: ChainProvider + 'static> ChainMatchers<P> {
    pub fn new(engine: FnChangeEngine<P>) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    pub fn engine(&self) -> &FnChangeEngine<P> {
        &self.engine
    }

    /// Starts an assertion about `subject`.
    ///
    /// A [`TxSubject`] argument needs the handle type spelled out, e.g.
    /// `expect::<MyTx>(TxSubject::producer(..))`.
    pub fn expect<T>(&self, subject: impl Into<TxSubject<T>>) -> Assertion<P, T> {
        Assertion {
            engine: self.engine.clone(),
            subject: SubjectSlot::Ready(subject.into()),
            negated: false,
        }
    }
}

impl<P> Clone for ChainMatchers<P> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
        }
    }
}

impl<P> fmt::Debug for ChainMatchers<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainMatchers").finish_non_exhaustive()
    }
}

/// Where the subject is in its lifetime: still available, or handed to a pending async
/// matcher.
enum SubjectSlot<T> {
    Ready(TxSubject<T>),
    Claimed { matcher: &'static str },
}

/// One `expect(subject)` chain.
pub struct Assertion<P, T> {
    engine: Arc<FnChangeEngine<P>>,
    subject: SubjectSlot<T>,
    negated: bool,
}

impl<P, T> Assertion<P, T>
where
    P: ChainProvider + 'static,
    T: SentTransaction + 'static,
{
    /// Negates the assertion.
    #[expect(
        clippy::should_implement_trait,
        reason = "reads as part of the assertion chain"
    )]
    pub fn not(mut self) -> Self {
        self.negate();
        self
    }

    /// Flips the negation flag in place.
    pub fn negate(&mut self) -> &mut Self {
        self.negated = !self.negated;
        self
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Asserts that the transaction changes `evaluator`'s result by `expected`.
    ///
    /// The negation flag is read once, here. Flipping it afterwards does not affect the
    /// returned [`Deferred`].
    ///
    /// # Errors
    ///
    /// Returns [`ChainingMisuseError`] if another async matcher is already pending on this
    /// assertion.
    pub fn change_fn_evaluation<E>(
        &mut self,
        evaluator: E,
        expected: impl Into<RawValue>,
    ) -> Result<Deferred<()>, ChainingMisuseError>
    where
        E: Evaluator + 'static,
    {
        let negated = self.negated;
        let subject = self.claim_subject(CHANGE_FN_EVALUATION)?;

        let shown = expected.into();
        let engine = self.engine.clone();
        let state = StateCell::new();
        let pipeline_state = state.clone();

        let pipeline = async move {
            pipeline_state.advance(AssertionState::PipelineRunning);

            let measured = async {
                let actual = engine.fn_change(subject, &evaluator).await?;
                let expected = engine.parser().parse(&shown)?;
                Ok::<_, ChangeError>((expected, actual))
            }
            .await;

            let (expected, actual) = match measured {
                Ok(measured) => measured,
                Err(err) => {
                    debug!(%err, "function change pipeline errored");
                    pipeline_state.advance(AssertionState::Errored);
                    return Err(err);
                }
            };

            pipeline_state.advance(AssertionState::Evaluated);
            debug!(%expected, %actual, negated, "checking function change");

            let outcome = check_fn_change(negated, &shown, expected, actual);
            pipeline_state.advance(match outcome {
                Ok(()) => AssertionState::Passed,
                Err(_) => AssertionState::Failed,
            });

            outcome.map_err(ChangeError::from)
        };

        Ok(Deferred::new(pipeline.boxed(), state))
    }

    /// Hands the subject to `matcher`, refusing if an async matcher already has it.
    fn claim_subject(
        &mut self,
        matcher: &'static str,
    ) -> Result<TxSubject<T>, ChainingMisuseError> {
        match mem::replace(&mut self.subject, SubjectSlot::Claimed { matcher }) {
            SubjectSlot::Ready(subject) => Ok(subject),
            SubjectSlot::Claimed { matcher: previous } => {
                self.subject = SubjectSlot::Claimed { matcher: previous };
                Err(ChainingMisuseError { matcher, previous })
            }
        }
    }
}

impl<P, T> fmt::Debug for Assertion<P, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pending = match &self.subject {
            SubjectSlot::Ready(_) => None,
            SubjectSlot::Claimed { matcher } => Some(*matcher),
        };
        f.debug_struct("Assertion")
            .field("negated", &self.negated)
            .field("pending_matcher", &pending)
            .finish_non_exhaustive()
    }
}
