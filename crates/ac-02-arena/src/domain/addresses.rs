//! # Arena Addresses
//!
//! Every arena record lives at an address derived from its owner and the
//! `(championship, round)` pair.

use ac_01_world_state::AddressDeriver;
use shared_types::Address;

/// Parent of round-wide records (participant list, fee pool).
pub const ARENA_ROOT: Address = Address::new([
    0xA7, 0xE4, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x01,
]);

fn round_scoped(parent: Address, label: &str, championship_id: u32, round: u32) -> Address {
    AddressDeriver::new(parent)
        .salt(label)
        .salt(championship_id)
        .salt(round)
        .finish()
}

/// Ticket record of `avatar`.
#[must_use]
pub fn arena_information_address(avatar: Address, championship_id: u32, round: u32) -> Address {
    round_scoped(avatar, "arena_info", championship_id, round)
}

/// Score record of `avatar`.
#[must_use]
pub fn arena_score_address(avatar: Address, championship_id: u32, round: u32) -> Address {
    round_scoped(avatar, "arena_score", championship_id, round)
}

/// Public participant record of `avatar`.
#[must_use]
pub fn arena_participant_address(avatar: Address, championship_id: u32, round: u32) -> Address {
    round_scoped(avatar, "arena_participant", championship_id, round)
}

/// Registration list of a round.
#[must_use]
pub fn arena_participants_address(championship_id: u32, round: u32) -> Address {
    round_scoped(ARENA_ROOT, "arena_participants", championship_id, round)
}

/// Account receiving ticket payments and entrance fees of a round.
#[must_use]
pub fn arena_pool_address(championship_id: u32, round: u32) -> Address {
    round_scoped(ARENA_ROOT, "arena_pool", championship_id, round)
}

/// Interval purchase counter under a ticket record.
#[must_use]
pub fn purchased_count_during_interval_address(information: Address) -> Address {
    AddressDeriver::new(information)
        .salt("purchased_count_during_interval")
        .finish()
}
