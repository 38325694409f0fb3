use num_bigint::BigInt;

use crate::{BigIntParser, ChangeError, EvaluationPair};

/// Converts both outputs and returns `after - before`.
pub(crate) fn compute_change<B>(parser: &B, pair: &EvaluationPair) -> Result<BigInt, ChangeError>
where
    B: BigIntParser + ?Sized,
{
    let after = parser.parse(&pair.after)?;
    let before = parser.parse(&pair.before)?;

    Ok(after - before)
}
