//! Schema Values
//!
//! Decoding of the string-encoded `condition_value` and `reward_value` parameters.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors decoding a schema parameter string.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    /// The value is not a decimal amount.
    #[error("invalid amount {value:?}")]
    InvalidAmount {
        /// The rejected input
        value: String,

        /// Underlying decimal parse error
        #[source]
        source: rust_decimal::Error,
    },

    /// A price range is missing its `|` separator.
    #[error("malformed price range {value:?}, expected LOW|HIGH")]
    MalformedRange {
        /// The rejected input
        value: String,
    },

    /// Product reward JSON does not match the expected shape.
    #[error("invalid product reward {value:?}: {message}")]
    InvalidProducts {
        /// The rejected input
        value: String,

        /// Decoder message
        message: String,
    },
}

/// Parse a single decimal amount (e.g. `"5000"` or `"12.50"`).
///
/// # Errors
///
/// Returns [`ParseError::InvalidAmount`] if `value` is not a decimal number.
pub fn parse_amount(value: &str) -> Result<Decimal, ParseError> {
    Decimal::from_str(value).map_err(|source| ParseError::InvalidAmount {
        value: value.to_string(),
        source,
    })
}

/// Parse a `LOW|HIGH` price range.
///
/// Only the first `|` separates the bounds, so `"1|2|3"` fails on the high bound.
///
/// # Errors
///
/// Returns [`ParseError::MalformedRange`] if there is no separator, or
/// [`ParseError::InvalidAmount`] if either bound is not a decimal number.
pub fn parse_range(value: &str) -> Result<(Decimal, Decimal), ParseError> {
    let (low, high) = value
        .split_once('|')
        .ok_or_else(|| ParseError::MalformedRange {
            value: value.to_string(),
        })?;

    Ok((parse_amount(low)?, parse_amount(high)?))
}
