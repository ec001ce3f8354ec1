//! # Ports Layer
//!
//! - **Driving Port**: `StateTransition` (implemented by action executors)
//! - **Driven Port**: `StateAccess` (read side of the world state)

pub mod api;
pub mod transition;

pub use api::*;
pub use transition::*;
