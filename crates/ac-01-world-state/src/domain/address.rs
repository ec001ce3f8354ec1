//! # Derived Addresses
//!
//! Records are addressed by hashing a parent address with a list of salts:
//!
//! ```text
//! derived = keccak256(parent || for each salt: tag(1) || len(4, BE) || bytes)[12..32]
//! ```
//!
//! The tag byte keeps `"1"` and `1u32` from colliding.

use sha3::{Digest, Keccak256};
use shared_types::{Address, Hash};

/// A value that can be mixed into a derived address.
pub trait AddressSalt {
    /// Type tag distinguishing salt kinds with identical bytes.
    fn tag(&self) -> u8;

    /// Canonical byte encoding of the salt.
    fn salt_bytes(&self) -> Vec<u8>;
}

impl AddressSalt for &str {
    fn tag(&self) -> u8 {
        0x01
    }

    fn salt_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl AddressSalt for u32 {
    fn tag(&self) -> u8 {
        0x02
    }

    fn salt_bytes(&self) -> Vec<u8> {
        self.to_be_bytes().to_vec()
    }
}

impl AddressSalt for u64 {
    fn tag(&self) -> u8 {
        0x03
    }

    fn salt_bytes(&self) -> Vec<u8> {
        self.to_be_bytes().to_vec()
    }
}

impl AddressSalt for Address {
    fn tag(&self) -> u8 {
        0x04
    }

    fn salt_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

/// Builder for derived addresses.
///
/// ```ignore
/// let info = AddressDeriver::new(avatar)
///     .salt("arena_info")
///     .salt(championship_id)
///     .salt(round)
///     .finish();
/// ```
#[derive(Clone, Debug)]
pub struct AddressDeriver {
    preimage: Vec<u8>,
}

impl AddressDeriver {
    /// Starts a derivation from `parent`.
    #[must_use]
    pub fn new(parent: Address) -> Self {
        let mut preimage = Vec::with_capacity(64);
        preimage.extend_from_slice(parent.as_bytes());
        Self { preimage }
    }

    /// Appends a salt.
    #[must_use]
    pub fn salt(mut self, salt: impl AddressSalt) -> Self {
        let bytes = salt.salt_bytes();
        let len = u32::try_from(bytes.len()).unwrap_or(u32::MAX);
        self.preimage.push(salt.tag());
        self.preimage.extend_from_slice(&len.to_be_bytes());
        self.preimage.extend_from_slice(&bytes);
        self
    }

    /// Hashes the preimage and takes the last 20 bytes.
    #[must_use]
    pub fn finish(self) -> Address {
        let hash = Keccak256::digest(&self.preimage);
        let mut addr = [0u8; 20];
        addr.copy_from_slice(&hash[12..32]);
        Address::new(addr)
    }
}

/// Single-salt shorthand for [`AddressDeriver`].
#[must_use]
pub fn derive_address(parent: Address, salt: impl AddressSalt) -> Address {
    AddressDeriver::new(parent).salt(salt).finish()
}

/// Keccak-256 of arbitrary bytes.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    Hash::new(Keccak256::digest(data).into())
}
