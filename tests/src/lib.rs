//! # Arena-Chain Test Suite
//!
//! Unified test crate for flows that cross subsystem boundaries: actions
//! executed by Subsystem 2 against the world state of Subsystem 1.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/
//! │   └── arena_benchmarks.rs   # Combat and action throughput
//! └── src/integration/
//!     ├── fixtures.rs           # Sheets, avatars, funded agents
//!     ├── flows.rs              # Join and battle choreography
//!     └── economy.rs            # Tickets, caps, cooldown, score floor
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ac-tests
//!
//! # With logs
//! RUST_LOG=ac_02_arena=debug cargo test -p ac-tests -- --nocapture
//!
//! # Benchmarks
//! cargo bench -p ac-tests
//! ```

#![allow(dead_code)]

pub mod integration;
