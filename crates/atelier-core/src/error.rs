//! # Error Types — Core Validation Failures
//!
//! Errors raised by the foundational types. Domain lifecycles define their
//! own error enums; this crate only reports construction-time validation
//! failures with full context.

use thiserror::Error;

/// Errors from constructing or converting core types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Monetary amount string is not a valid decimal.
    #[error("invalid monetary amount: {0:?}")]
    InvalidAmount(String),

    /// Monetary amount has more fractional digits than minor units allow.
    #[error("amount {0:?} exceeds minor-unit precision (2 decimal places)")]
    AmountPrecision(String),

    /// Currency code is not a 3-letter uppercase ISO 4217 code.
    #[error("invalid currency code: {0:?}")]
    InvalidCurrency(String),

    /// Timestamp string could not be parsed or is not UTC.
    #[error("invalid timestamp {input:?}: {reason}")]
    InvalidTimestamp {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Role string is not one of the known roles.
    #[error("unknown role: {0:?}")]
    InvalidRole(String),
}
