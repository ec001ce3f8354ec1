use shared_types::Address;
use thiserror::Error;

/// Errors raised by world-state reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("Insufficient balance at {address:?}: required {required} {ticker}, available {available}")]
    InsufficientBalance {
        address: Address,
        ticker: String,
        required: u128,
        available: u128,
    },

    #[error("Balance overflow at {address:?} in {ticker}")]
    BalanceOverflow { address: Address, ticker: String },

    #[error("Failed to decode state at {address:?}: {reason}")]
    Decode { address: Address, reason: String },

    #[error("Failed to encode state for {address:?}: {reason}")]
    Encode { address: Address, reason: String },
}
