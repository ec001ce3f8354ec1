//! # World State
//!
//! Immutable, addressed key/value ledger with copy-on-write forks.
//!
//! ## Fork Semantics
//!
//! ```text
//!   s0 ──set(a, x)──→ s1 ──set(b, y)──→ s2
//!    │
//!    └──set(a, z)──→ s1'      (s0, s1, s1' and s2 all stay valid)
//! ```
//!
//! Write methods take `self` by value and return the successor. Callers that
//! need the predecessor keep a clone; clones share storage through `Arc` until
//! one side writes, at which point only that side copies.

use super::address::keccak256;
use super::codec;
use super::errors::StateError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Currency, Hash};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Key in the single state mapping.
///
/// Records and fungible balances share one ordered keyspace so that there is
/// exactly one versioned mapping to hash, fork and compare.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StateKey {
    /// A serialized record stored at an address.
    Record(Address),
    /// A fungible balance held by an address.
    Balance(Address, Currency),
}

/// The world state an action executes against.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldState {
    entries: Arc<BTreeMap<StateKey, Vec<u8>>>,
    version: u64,
}

impl WorldState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of writes applied since genesis.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of keys present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no key is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw record bytes at `address`.
    #[must_use]
    pub fn get_state(&self, address: &Address) -> Option<&[u8]> {
        self.entries
            .get(&StateKey::Record(*address))
            .map(Vec::as_slice)
    }

    /// Writes raw record bytes, returning the successor state.
    #[must_use]
    pub fn set_state(self, address: Address, value: Vec<u8>) -> Self {
        self.write(StateKey::Record(address), value)
    }

    /// Decodes the record at `address`.
    ///
    /// # Errors
    /// Returns [`StateError::Decode`] if the stored bytes are not a valid `T`.
    pub fn get_typed<T: DeserializeOwned>(
        &self,
        address: &Address,
    ) -> Result<Option<T>, StateError> {
        self.get_state(address)
            .map(|bytes| codec::decode(*address, bytes))
            .transpose()
    }

    /// Encodes and writes a record, returning the successor state.
    ///
    /// # Errors
    /// Returns [`StateError::Encode`] if serialization fails.
    pub fn set_typed<T: Serialize>(self, address: Address, value: &T) -> Result<Self, StateError> {
        let bytes = codec::encode(address, value)?;
        Ok(self.set_state(address, bytes))
    }

    /// Commitment over every entry in key order.
    ///
    /// Two states with the same entries have the same root regardless of the
    /// order in which the writes happened.
    #[must_use]
    pub fn state_root(&self) -> Hash {
        let mut preimage = Vec::new();
        for (key, value) in self.entries.iter() {
            // Keys are plain data; encoding cannot fail.
            let key_bytes = bincode::serialize(key).unwrap_or_default();
            preimage.extend_from_slice(&(key_bytes.len() as u64).to_be_bytes());
            preimage.extend_from_slice(&key_bytes);
            preimage.extend_from_slice(&(value.len() as u64).to_be_bytes());
            preimage.extend_from_slice(value);
        }
        keccak256(&preimage)
    }

    pub(crate) fn get_raw(&self, key: &StateKey) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub(crate) fn write(mut self, key: StateKey, value: Vec<u8>) -> Self {
        Arc::make_mut(&mut self.entries).insert(key, value);
        self.version += 1;
        self
    }

    pub(crate) fn delete(mut self, key: &StateKey) -> Self {
        if self.entries.contains_key(key) {
            Arc::make_mut(&mut self.entries).remove(key);
            self.version += 1;
        }
        self
    }
}
