//! # Ports Layer (Middle Hexagon)
//!
//! - **Driving Port (Inbound)**: `ArenaApi`
//! - **Driven Port (Outbound)**: `SheetProvider`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
