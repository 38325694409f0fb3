use num_bigint::BigInt;

use crate::{AssertionFailure, RawValue};

/// Applies an assertion's negation to a condition.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Assert {
    negated: bool,
}

impl Assert {
    pub(crate) fn new(negated: bool) -> Self {
        Self { negated }
    }

    /// Fails with `message` if the condition is false, or with `negated_message` if it is
    /// true and the assertion is negated.
    pub(crate) fn check(
        &self,
        condition: bool,
        message: impl FnOnce() -> String,
        negated_message: impl FnOnce() -> String,
    ) -> Result<(), String> {
        match (self.negated, condition) {
            (false, false) => Err(message()),
            (true, true) => Err(negated_message()),
            _ => Ok(()),
        }
    }
}

/// Compares the measured change against the converted `expected`.
///
/// Messages quote `shown` as the caller wrote it, so `"0x0a"` stays `0x0a`.
pub(crate) fn check_fn_change(
    negated: bool,
    shown: &RawValue,
    expected: BigInt,
    actual: BigInt,
) -> Result<(), AssertionFailure> {
    Assert::new(negated)
        .check(
            actual == expected,
            || {
                format!(
                    "Expected the function return to change by {shown}, but it changed by \
                     {actual}"
                )
            },
            || format!("Expected the function return NOT to change by {shown}, but it did"),
        )
        .map_err(|message| AssertionFailure {
            expected,
            actual,
            negated,
            message,
        })
}
