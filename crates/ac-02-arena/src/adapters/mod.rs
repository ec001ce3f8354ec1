//! # Adapters Layer (Outer Hexagon)
//!
//! Concrete implementations of the arena's driven ports.

pub mod table_sheets;

pub use table_sheets::*;
