//! # Error Types
//!
//! Errors raised while constructing shared primitives.

use thiserror::Error;

/// Errors raised when parsing an identifier from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input is not valid hex.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded bytes have the wrong length.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Errors raised by fungible asset arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// Operands carry different currencies.
    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: String, right: String },

    /// Addition overflowed the raw amount.
    #[error("Asset overflow in {ticker}")]
    Overflow { ticker: String },

    /// Subtraction went below zero.
    #[error("Asset underflow in {ticker}: {minuend} - {subtrahend}")]
    Underflow {
        ticker: String,
        minuend: u128,
        subtrahend: u128,
    },
}
