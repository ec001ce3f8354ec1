//! # Domain Layer (Inner Hexagon)
//!
//! Pure arena rules. NO I/O, NO async, NO global state. Every function takes
//! records by value or reference and returns successors; the service threads
//! them through the world state.

pub mod addresses;
pub mod combat;
pub mod config;
pub mod entities;
pub mod invariants;
pub mod rating;
pub mod rewards;
pub mod sheets;
pub mod tickets;
pub mod value_objects;

pub use config::*;
pub use entities::*;
pub use rating::*;
pub use rewards::*;
pub use sheets::*;
pub use tickets::*;
pub use value_objects::*;
