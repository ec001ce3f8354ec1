//! # Domain Layer (Inner Hexagon)
//!
//! Pure state-transition primitives. NO I/O, NO async, NO global state.

pub mod address;
pub mod codec;
pub mod context;
pub mod errors;
pub mod ledger;
pub mod random;
pub mod world_state;

pub use address::*;
pub use context::*;
pub use errors::*;
pub use random::*;
pub use world_state::*;
