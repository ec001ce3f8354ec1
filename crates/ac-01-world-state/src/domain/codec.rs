//! Typed value encoding for state records.
//!
//! Every record is `bincode` encoded with the default (fixed-int,
//! little-endian) configuration so the bytes are identical on every node.

use super::errors::StateError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::Address;

/// Encodes a record destined for `address`.
///
/// # Errors
/// Returns [`StateError::Encode`] if serialization fails.
pub fn encode<T: Serialize>(address: Address, value: &T) -> Result<Vec<u8>, StateError> {
    bincode::serialize(value).map_err(|e| StateError::Encode {
        address,
        reason: e.to_string(),
    })
}

/// Decodes a record read from `address`.
///
/// # Errors
/// Returns [`StateError::Decode`] if the bytes are not a valid `T`.
pub fn decode<T: DeserializeOwned>(address: Address, bytes: &[u8]) -> Result<T, StateError> {
    bincode::deserialize(bytes).map_err(|e| StateError::Decode {
        address,
        reason: e.to_string(),
    })
}
