//! # AC-01 World State - Copy-on-Write State Subsystem
//!
//! **Subsystem ID:** 1
//!
//! ## Purpose
//!
//! Provides the addressed, immutable key/value ledger every action executes
//! against, together with the per-action execution context and the
//! deterministic random source used by the arena.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Fork semantics: a write never alters the receiver's previous value | `domain/world_state.rs` - `WorldState::set_state()` |
//! | INVARIANT-2 | Balances never go negative | `domain/ledger.rs` - `WorldState::burn_asset()` |
//! | INVARIANT-3 | Derived addresses are a pure function of parent and salts | `domain/address.rs` - `AddressDeriver::finish()` |
//! | INVARIANT-4 | Forked random streams never share draws with their parent | `domain/random.rs` - `RandomSource::fork()` |
//!
//! ## Usage Example
//!
//! ```ignore
//! use ac_01_world_state::prelude::*;
//!
//! let state = WorldState::new();
//! let next = state.clone().set_typed(address, &record)?;
//!
//! // `state` is still the pre-write value.
//! assert!(state.get_state(&address).is_none());
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod domain;
pub mod ports;

pub use domain::*;
pub use ports::*;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::domain::address::{AddressDeriver, AddressSalt};
    pub use crate::domain::context::ActionContext;
    pub use crate::domain::errors::StateError;
    pub use crate::domain::random::RandomSource;
    pub use crate::domain::world_state::{StateKey, WorldState};
    pub use crate::ports::api::StateAccess;
    pub use crate::ports::transition::StateTransition;

    pub use shared_types::{Address, BlockIndex, Currency, FungibleAssetValue, Hash};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 1;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "World State";
