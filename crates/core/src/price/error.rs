//! Price engine error types.
//!
//! Comparisons and rounding never fail; only combining prices (addition,
//! subtraction, summing, charge merging), splitting and decoding can.
//! Scaling operations that return a plain `Price` degrade to zero instead.

use thiserror::Error;

use super::price::Price;

/// Errors that can occur during price arithmetic.
#[derive(Debug, Error)]
pub enum PriceError {
    /// Neither operand is zero-valued and the currencies differ.
    #[error("Cannot calculate prices in different currencies: {expected} and {got}")]
    CurrencyMismatch {
        /// Currency of the left-hand operand.
        expected: String,
        /// Currency of the right-hand operand.
        got: String,
    },

    /// Summing requires at least one price.
    #[error("No price given")]
    EmptyInput,

    /// A price can only be split into one or more parts.
    #[error("Split count must be higher than zero, got {count}")]
    InvalidSplitCount {
        /// The rejected count.
        count: usize,
    },

    /// Charges of different types cannot be added.
    #[error("Charge type mismatch: {expected} and {got}")]
    ChargeTypeMismatch {
        /// Type of the left-hand charge.
        expected: String,
        /// Type of the right-hand charge.
        got: String,
    },

    /// The result of adding or subtracting leaves the decimal range.
    #[error("Result of {operation} is out of range in {currency}")]
    ArithmeticOverflow {
        /// The operation that overflowed.
        operation: &'static str,
        /// Currency of the result.
        currency: String,
    },

    /// The amount cannot be expressed in minor units.
    #[error("Amount {0} is out of range for minor unit arithmetic")]
    AmountOutOfRange(String),

    /// Encoding or decoding failed.
    #[error("Codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

impl PriceError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            Self::EmptyInput => "EMPTY_INPUT",
            Self::InvalidSplitCount { .. } => "INVALID_SPLIT_COUNT",
            Self::ChargeTypeMismatch { .. } => "CHARGE_TYPE_MISMATCH",
            Self::ArithmeticOverflow { .. } => "ARITHMETIC_OVERFLOW",
            Self::AmountOutOfRange(_) => "AMOUNT_OUT_OF_RANGE",
            Self::Codec(_) => "CODEC_ERROR",
        }
    }

    /// Returns true if the error was caused by an invalid caller argument.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::InvalidSplitCount { .. })
    }

    /// The degraded value a failed combination stands for.
    ///
    /// A currency mismatch yields the zero price of the left-hand currency,
    /// an overflow the zero price of the result currency.
    #[must_use]
    pub fn fallback_price(&self) -> Option<Price> {
        match self {
            Self::CurrencyMismatch { expected, .. } => Some(Price::zero(expected)),
            Self::ArithmeticOverflow { currency, .. } => Some(Price::zero(currency)),
            _ => None,
        }
    }
}

impl From<PriceError> for pricing_shared::AppError {
    fn from(err: PriceError) -> Self {
        match err {
            PriceError::CurrencyMismatch { .. } | PriceError::ChargeTypeMismatch { .. } => {
                Self::BusinessRule(err.to_string())
            }
            PriceError::EmptyInput
            | PriceError::InvalidSplitCount { .. }
            | PriceError::ArithmeticOverflow { .. }
            | PriceError::AmountOutOfRange(_) => Self::Validation(err.to_string()),
            PriceError::Codec(_) => Self::Internal(err.to_string()),
        }
    }
}
