//! # Shared Types Crate
//!
//! Primitive types shared by the world-state and arena subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: addresses, hashes and asset values are defined
//!   once here and re-exported by the subsystems.
//! - **Value Semantics**: every type is `Copy` or cheaply clonable and carries
//!   no interior mutability.
//! - **Deterministic Encoding**: all types derive `serde` so that the binary
//!   encoding is identical on every validating node.

pub mod currency;
pub mod entities;
pub mod errors;

pub use currency::*;
pub use entities::*;
pub use errors::*;
