use tracing::debug;

use crate::{BlockTag, ChangeError, EvaluationMode, Evaluator, RawValue};

/// Raw evaluator outputs on either side of the transaction's block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationPair {
    /// Tag of the transaction's block.
    pub block: BlockTag,
    /// Output as of the block before the transaction's block.
    pub before: RawValue,
    /// Output as of the transaction's block.
    pub after: RawValue,
}

/// Evaluates at `block` and at its parent.
///
/// Callers must have rejected the genesis block already.
pub(crate) async fn evaluate_around<E>(
    evaluator: &E,
    block: BlockTag,
    parent: BlockTag,
    mode: EvaluationMode,
) -> Result<EvaluationPair, ChangeError>
where
    E: Evaluator + ?Sized,
{
    let eval = |tag: BlockTag| async move {
        evaluator
            .evaluate(tag)
            .await
            .map_err(ChangeError::Evaluator)
    };

    let (after, before) = match mode {
        EvaluationMode::Sequential => {
            let after = eval(block).await?;
            let before = eval(parent).await?;
            (after, before)
        }
        EvaluationMode::Concurrent => futures::try_join!(eval(block), eval(parent))?,
    };

    debug!(%block, %before, %after, ?mode, "evaluated around block");
    Ok(EvaluationPair {
        block,
        before,
        after,
    })
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;

    use super::*;
    use crate::MockEvaluator;

    #[tokio::test]
    async fn test_sequential_evaluates_after_then_before() {
        let mut seq = Sequence::new();
        let mut evaluator = MockEvaluator::new();
        evaluator
            .expect_evaluate()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|tag| tag.to_string() == "0x64")
            .returning(|_| Ok(RawValue::from("0x0f")));
        evaluator
            .expect_evaluate()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|tag| tag.to_string() == "0x63")
            .returning(|_| Ok(RawValue::from("0x05")));

        let pair = evaluate_around(
            &evaluator,
            BlockTag::new(100),
            BlockTag::new(99),
            EvaluationMode::Sequential,
        )
        .await
        .unwrap();

        assert_eq!(pair.after, RawValue::from("0x0f"));
        assert_eq!(pair.before, RawValue::from("0x05"));
        assert_eq!(pair.block, BlockTag::new(100));
    }

    #[tokio::test]
    async fn test_concurrent_matches_heights() {
        let evaluator = |tag: BlockTag| async move { Ok::<_, eyre::Report>(tag.number() * 2) };

        let pair = evaluate_around(
            &evaluator,
            BlockTag::new(10),
            BlockTag::new(9),
            EvaluationMode::Concurrent,
        )
        .await
        .unwrap();

        assert_eq!(pair.after, RawValue::from(20u64));
        assert_eq!(pair.before, RawValue::from(18u64));
    }

    #[tokio::test]
    async fn test_sequential_stops_at_first_failure() {
        let mut evaluator = MockEvaluator::new();
        evaluator
            .expect_evaluate()
            .times(1)
            .returning(|_| Err(eyre::eyre!("execution reverted")));

        let err = evaluate_around(
            &evaluator,
            BlockTag::new(100),
            BlockTag::new(99),
            EvaluationMode::Sequential,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ChangeError::Evaluator(_)));
        assert_eq!(err.to_string(), "execution reverted");
    }
}
