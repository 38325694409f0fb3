//! Measures how a read function's result changes across a transaction's block.

mod block;
mod diff;
mod evaluate;
mod receipt;
mod subject;

use std::sync::Arc;

use num_bigint::BigInt;
use tracing::{debug, instrument};

use self::{
    block::fetch_single_tx_block, diff::compute_change, evaluate::evaluate_around,
    receipt::wait_for_receipt,
};
pub use self::{evaluate::EvaluationPair, subject::TxSubject};
use crate::{
    BigIntParser, BlockTag, ChainProvider, ChangeError, EvaluationMode, Evaluator, MatcherConfig,
    SentTransaction, StandardParser,
};

/// Computes the change of an evaluator's result caused by a single transaction.
#[derive(Debug)]
pub struct FnChangeEngine<P> {
    provider: P,
    parser: Arc<dyn BigIntParser>,
    mode: EvaluationMode,
}

impl<P: ChainProvider> FnChangeEngine<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            parser: Arc::new(StandardParser),
            mode: EvaluationMode::default(),
        }
    }

    pub fn from_config(provider: P, config: &MatcherConfig) -> Self {
        Self::new(provider).with_evaluation_mode(config.evaluation_mode)
    }

    /// Replaces the parser used to convert evaluator outputs.
    pub fn with_parser(mut self, parser: impl BigIntParser + 'static) -> Self {
        self.parser = Arc::new(parser);
        self
    }

    pub fn with_evaluation_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn parser(&self) -> &dyn BigIntParser {
        self.parser.as_ref()
    }

    pub fn evaluation_mode(&self) -> EvaluationMode {
        self.mode
    }

    /// Resolves the subject, waits for it to be mined alone in a block `N` and returns
    /// `evaluator(N) - evaluator(N - 1)`.
    #[instrument(skip_all, fields(mode = ?self.mode))]
    pub async fn fn_change<T, E>(
        &self,
        subject: TxSubject<T>,
        evaluator: &E,
    ) -> Result<BigInt, ChangeError>
    where
        T: SentTransaction + 'static,
        E: Evaluator + ?Sized,
    {
        let tx = subject.resolve().await?;
        let receipt = wait_for_receipt(&tx).await?;
        fetch_single_tx_block(&self.provider, receipt.block_hash).await?;

        let block = BlockTag::new(receipt.block_number);
        let parent = block.parent().ok_or(ChangeError::NoPrecedingBlock {
            tx_hash: receipt.transaction_hash,
        })?;

        let pair = evaluate_around(evaluator, block, parent, self.mode).await?;
        let change = compute_change(self.parser.as_ref(), &pair)?;

        debug!(%block, %change, "computed function change");
        Ok(change)
    }
}
