//! Cross-subsystem integration tests.

pub mod fixtures;

mod economy;
mod flows;
