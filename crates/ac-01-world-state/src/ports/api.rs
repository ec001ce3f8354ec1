use crate::domain::{codec, StateError, WorldState};
use serde::de::DeserializeOwned;
use shared_types::{Address, Currency, FungibleAssetValue};

/// Read access to world state.
///
/// Domain code reads through this trait so that any state implementation
/// (the in-memory [`WorldState`], a trie-backed view, a test double) can be
/// plugged in. Writes stay on the concrete state type because they return a
/// successor value.
pub trait StateAccess {
    /// Raw record bytes at `address`.
    fn get_state(&self, address: &Address) -> Option<&[u8]>;

    /// Balance of `address` in `currency`.
    fn get_balance(&self, address: &Address, currency: &Currency) -> FungibleAssetValue;

    /// Decodes the record at `address`.
    ///
    /// # Errors
    /// Returns [`StateError::Decode`] on malformed bytes.
    fn get_typed<T: DeserializeOwned>(&self, address: &Address) -> Result<Option<T>, StateError>
    where
        Self: Sized,
    {
        self.get_state(address)
            .map(|bytes| codec::decode(*address, bytes))
            .transpose()
    }

    /// Returns true if a record exists at `address`.
    fn contains(&self, address: &Address) -> bool {
        self.get_state(address).is_some()
    }
}

impl StateAccess for WorldState {
    fn get_state(&self, address: &Address) -> Option<&[u8]> {
        WorldState::get_state(self, address)
    }

    fn get_balance(&self, address: &Address, currency: &Currency) -> FungibleAssetValue {
        WorldState::get_balance(self, address, currency)
    }
}
