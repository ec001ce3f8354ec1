//! # Fungible Ledger
//!
//! Balance operations on [`WorldState`]. Balances live in the same mapping as
//! records under [`StateKey::Balance`]; a zero balance is stored as an absent
//! key so the state root does not depend on how a balance reached zero.

use super::errors::StateError;
use super::world_state::{StateKey, WorldState};
use shared_types::{Address, Currency, FungibleAssetValue};
use tracing::trace;

impl WorldState {
    /// Balance of `address` in `currency` (zero if never credited).
    #[must_use]
    pub fn get_balance(&self, address: &Address, currency: &Currency) -> FungibleAssetValue {
        let raw = self
            .get_raw(&StateKey::Balance(*address, currency.clone()))
            .and_then(|bytes| <[u8; 16]>::try_from(bytes).ok())
            .map_or(0, u128::from_be_bytes);
        currency.raw(raw)
    }

    /// Credits `amount` to `address`.
    ///
    /// # Errors
    /// Returns [`StateError::BalanceOverflow`] if the balance would overflow.
    pub fn mint_asset(
        self,
        address: Address,
        amount: &FungibleAssetValue,
    ) -> Result<Self, StateError> {
        let current = self.get_balance(&address, &amount.currency).raw;
        let next = current
            .checked_add(amount.raw)
            .ok_or_else(|| StateError::BalanceOverflow {
                address,
                ticker: amount.currency.ticker.clone(),
            })?;
        trace!(%address, %amount, "mint");
        Ok(self.put_balance(address, &amount.currency, next))
    }

    /// Debits `amount` from `address`.
    ///
    /// # Errors
    /// Returns [`StateError::InsufficientBalance`] if the balance is too low.
    pub fn burn_asset(
        self,
        address: Address,
        amount: &FungibleAssetValue,
    ) -> Result<Self, StateError> {
        let current = self.get_balance(&address, &amount.currency).raw;
        let next = current
            .checked_sub(amount.raw)
            .ok_or_else(|| StateError::InsufficientBalance {
                address,
                ticker: amount.currency.ticker.clone(),
                required: amount.raw,
                available: current,
            })?;
        trace!(%address, %amount, "burn");
        Ok(self.put_balance(address, &amount.currency, next))
    }

    /// Moves `amount` from `sender` to `recipient`.
    ///
    /// # Errors
    /// Returns [`StateError::InsufficientBalance`] if `sender` cannot cover
    /// the amount, or [`StateError::BalanceOverflow`] on the credit side.
    pub fn transfer_asset(
        self,
        sender: Address,
        recipient: Address,
        amount: &FungibleAssetValue,
    ) -> Result<Self, StateError> {
        if amount.is_zero() {
            return Ok(self);
        }
        self.burn_asset(sender, amount)?.mint_asset(recipient, amount)
    }

    fn put_balance(self, address: Address, currency: &Currency, raw: u128) -> Self {
        let key = StateKey::Balance(address, currency.clone());
        if raw == 0 {
            self.delete(&key)
        } else {
            self.write(key, raw.to_be_bytes().to_vec())
        }
    }
}
