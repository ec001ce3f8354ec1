//! # Currency
//!
//! Fungible currency definitions and amounts.
//!
//! Amounts are stored as raw integers in the currency's minor unit. A currency
//! with `decimal_places = 2` represents `1.50` as raw `150`.

use crate::errors::AssetError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fungible currency definition.
///
/// Currencies are injected as configuration; there is no global registry.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Currency {
    /// Ticker symbol (e.g. "NCG", "CRYSTAL").
    pub ticker: String,
    /// Number of minor-unit decimal places.
    pub decimal_places: u8,
}

impl Currency {
    /// Creates a currency definition.
    #[must_use]
    pub fn new(ticker: impl Into<String>, decimal_places: u8) -> Self {
        Self {
            ticker: ticker.into(),
            decimal_places,
        }
    }

    /// Amount from raw minor units.
    #[must_use]
    pub fn raw(&self, raw: u128) -> FungibleAssetValue {
        FungibleAssetValue::new(self.clone(), raw)
    }

    /// Amount from whole major units.
    #[must_use]
    pub fn major(&self, units: u128) -> FungibleAssetValue {
        self.raw(units.saturating_mul(self.unit()))
    }

    /// Zero amount in this currency.
    #[must_use]
    pub fn zero(&self) -> FungibleAssetValue {
        self.raw(0)
    }

    /// Raw value of one major unit.
    #[must_use]
    pub fn unit(&self) -> u128 {
        10u128.saturating_pow(u32::from(self.decimal_places))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ticker)
    }
}

/// An amount of a specific currency.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FungibleAssetValue {
    /// Currency of the amount.
    pub currency: Currency,
    /// Amount in minor units.
    pub raw: u128,
}

impl FungibleAssetValue {
    /// Creates an amount.
    #[must_use]
    pub fn new(currency: Currency, raw: u128) -> Self {
        Self { currency, raw }
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.raw == 0
    }

    /// Checked addition of two amounts of the same currency.
    ///
    /// # Errors
    /// Currency mismatch or overflow.
    pub fn checked_add(&self, other: &Self) -> Result<Self, AssetError> {
        self.ensure_same_currency(other)?;
        let raw = self
            .raw
            .checked_add(other.raw)
            .ok_or_else(|| AssetError::Overflow {
                ticker: self.currency.ticker.clone(),
            })?;
        Ok(Self::new(self.currency.clone(), raw))
    }

    /// Checked subtraction of two amounts of the same currency.
    ///
    /// # Errors
    /// Currency mismatch or underflow.
    pub fn checked_sub(&self, other: &Self) -> Result<Self, AssetError> {
        self.ensure_same_currency(other)?;
        let raw = self
            .raw
            .checked_sub(other.raw)
            .ok_or_else(|| AssetError::Underflow {
                ticker: self.currency.ticker.clone(),
                minuend: self.raw,
                subtrahend: other.raw,
            })?;
        Ok(Self::new(self.currency.clone(), raw))
    }

    fn ensure_same_currency(&self, other: &Self) -> Result<(), AssetError> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(AssetError::CurrencyMismatch {
                left: self.currency.ticker.clone(),
                right: other.currency.ticker.clone(),
            })
        }
    }
}

impl fmt::Display for FungibleAssetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.currency.unit();
        let whole = self.raw / unit;
        if self.currency.decimal_places == 0 {
            return write!(f, "{whole} {}", self.currency.ticker);
        }
        let frac = self.raw % unit;
        write!(
            f,
            "{whole}.{frac:0width$} {}",
            self.currency.ticker,
            width = usize::from(self.currency.decimal_places)
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================
