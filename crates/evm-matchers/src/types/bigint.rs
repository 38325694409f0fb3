//! Integer conversion for evaluator outputs and expected changes.
//!
//! Evaluators may answer with hex (`0x…`) or decimal text, or with an already-typed
//! integer. Everything is normalised into an unbounded [`BigInt`], so EVM words of any
//! width and their differences are exact.

use std::fmt;

use alloy_primitives::{I256, U256};
use num_bigint::BigInt;
use thiserror::Error;

/// An evaluator output or expected change before conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// Hex (`0x`, `0o`, `0b` prefixed) or decimal encoding.
    Text(String),
    /// Value that is already a [`BigInt`].
    Integer(BigInt),
}

impl RawValue {
    /// Converts this value with the standard parser.
    pub fn to_bigint(&self) -> Result<BigInt, ParseBigIntError> {
        StandardParser.parse(self)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{value}"),
        }
    }
}

impl From<BigInt> for RawValue {
    fn from(value: BigInt) -> Self {
        Self::Integer(value)
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Typed integers go through their decimal rendering so a single parser covers every
/// source width.
macro_rules! impl_raw_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for RawValue {
                fn from(value: $ty) -> Self {
                    Self::Text(value.to_string())
                }
            }
        )*
    };
}

impl_raw_from_display!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, U256, I256);

/// Errors raised while converting a [`RawValue`] into a [`BigInt`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBigIntError {
    /// A radix prefix or sign was given without any digits after it.
    #[error("cannot convert {0:?} to a big integer: missing digits")]
    MissingDigits(String),

    /// A character is not a digit of the detected radix.
    #[error("cannot convert {input:?} to a big integer: invalid digit {digit:?}")]
    InvalidDigit { input: String, digit: char },
}

/// Capability that turns raw evaluator outputs into integers.
pub trait BigIntParser: fmt::Debug + Send + Sync {
    /// Parses a single raw value.
    fn parse(&self, value: &RawValue) -> Result<BigInt, ParseBigIntError>;
}

/// Parser accepting the same literal forms as an EVM JSON-RPC quantity or a decimal string.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardParser;

impl BigIntParser for StandardParser {
    fn parse(&self, value: &RawValue) -> Result<BigInt, ParseBigIntError> {
        match value {
            RawValue::Integer(value) => Ok(value.clone()),
            RawValue::Text(text) => parse_bigint(text),
        }
    }
}

/// Parses a hex- or decimal-encoded integer of any width.
///
/// Surrounding whitespace is ignored and a blank string is zero. A leading `+` or `-` may
/// precede any radix prefix, so `-0x05` is minus five.
pub fn parse_bigint(input: &str) -> Result<BigInt, ParseBigIntError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(BigInt::default());
    }

    let (negative, body) = if let Some(rest) = trimmed.strip_prefix('-') {
        (true, rest)
    } else {
        (false, trimmed.strip_prefix('+').unwrap_or(trimmed))
    };

    let (radix, digits) = match body.get(..2) {
        Some("0x" | "0X") => (16, &body[2..]),
        Some("0o" | "0O") => (8, &body[2..]),
        Some("0b" | "0B") => (2, &body[2..]),
        _ => (10, body),
    };

    if digits.is_empty() {
        return Err(ParseBigIntError::MissingDigits(input.to_owned()));
    }
    if let Some(digit) = digits.chars().find(|c| !c.is_digit(radix)) {
        return Err(ParseBigIntError::InvalidDigit {
            input: input.to_owned(),
            digit,
        });
    }

    let magnitude = BigInt::parse_bytes(digits.as_bytes(), radix)
        .ok_or_else(|| ParseBigIntError::MissingDigits(input.to_owned()))?;

    Ok(if negative { -magnitude } else { magnitude })
}
