//! # Domain Entities
//!
//! Records stored in world state by the arena, and the round schedule rows
//! read from the arena sheet.

use super::combat::snapshot::CombatSnapshot;
use super::value_objects::{
    ArenaType, CostumeCategory, EquipmentCategory, ItemId, Score, StatModifier, Uuid,
};
use serde::{Deserialize, Serialize};
use shared_types::{Address, BlockIndex};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// ROUND SCHEDULE
// =============================================================================

/// One step of a ticket price curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceStep {
    /// Season purchased count from which this price applies.
    pub from_count: u32,
    /// Price per ticket in raw gold units.
    pub price: u128,
}

/// Ticket price as a step function of the season purchased count.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketPriceSchedule {
    /// Steps ordered by `from_count`.
    pub steps: Vec<PriceStep>,
}

impl TicketPriceSchedule {
    /// Same price for every purchase.
    #[must_use]
    pub fn flat(price: u128) -> Self {
        Self {
            steps: vec![PriceStep {
                from_count: 0,
                price,
            }],
        }
    }

    /// `base + increment * count` for the first `steps` purchases, flat afterwards.
    #[must_use]
    pub fn linear(base: u128, increment: u128, steps: u32) -> Self {
        let steps = (0..steps.max(1))
            .map(|count| PriceStep {
                from_count: count,
                price: base.saturating_add(increment.saturating_mul(u128::from(count))),
            })
            .collect();
        Self { steps }
    }

    /// Price of the ticket bought when `purchased_count` tickets were already
    /// bought this season. `None` if no step covers the count.
    #[must_use]
    pub fn price(&self, purchased_count: u32) -> Option<u128> {
        self.steps
            .iter()
            .rev()
            .find(|step| step.from_count <= purchased_count)
            .map(|step| step.price)
    }

    /// Total price of `count` tickets bought one after another.
    #[must_use]
    pub fn total(&self, purchased_count: u32, count: u32) -> Option<u128> {
        (0..count).try_fold(0u128, |acc, offset| {
            let price = self.price(purchased_count.checked_add(offset)?)?;
            acc.checked_add(price)
        })
    }

    /// Starts at count 0, strictly ordered, prices never decrease.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        match self.steps.first() {
            Some(first) if first.from_count == 0 => self.steps.windows(2).all(|pair| {
                pair[0].from_count < pair[1].from_count && pair[0].price <= pair[1].price
            }),
            _ => false,
        }
    }
}

/// A scheduled arena round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaRound {
    pub championship_id: u32,
    pub round: u32,
    pub arena_type: ArenaType,
    /// First block of the round (inclusive).
    pub start_block_index: BlockIndex,
    /// Last block of the round (inclusive).
    pub end_block_index: BlockIndex,
    /// Medals of this championship needed to join.
    pub required_medal_count: u32,
    /// Entrance fee in raw crystal units.
    pub entrance_fee: u128,
    pub ticket_price: TicketPriceSchedule,
    /// Season purchase cap.
    pub max_purchase_count: u32,
    /// Purchase cap per reset interval.
    pub max_purchase_count_during_interval: u32,
    /// Medal item granted per win in ranked rounds.
    pub medal_id: u32,
}

impl ArenaRound {
    /// Returns true if `block_index` lies inside the round window.
    #[must_use]
    pub fn is_the_round_opened(&self, block_index: BlockIndex) -> bool {
        (self.start_block_index..=self.end_block_index).contains(&block_index)
    }

    /// Structural validation of the row.
    ///
    /// # Errors
    /// Returns a human readable reason when the row is malformed.
    pub fn validate(&self) -> Result<(), String> {
        if self.start_block_index > self.end_block_index {
            return Err(format!(
                "start {} after end {}",
                self.start_block_index, self.end_block_index
            ));
        }
        if !self.ticket_price.is_well_formed() {
            return Err("ticket price schedule is empty or decreasing".into());
        }
        if self.max_purchase_count_during_interval > self.max_purchase_count {
            return Err(format!(
                "interval cap {} exceeds season cap {}",
                self.max_purchase_count_during_interval, self.max_purchase_count
            ));
        }
        if self.arena_type.is_ranked() && self.medal_id == 0 {
            return Err("ranked round without medal".into());
        }
        Ok(())
    }
}

// =============================================================================
// REGISTRATION
// =============================================================================

/// Avatars registered for a round, in join order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaParticipants {
    pub championship_id: u32,
    pub round: u32,
    pub avatar_addresses: Vec<Address>,
}

impl ArenaParticipants {
    /// Empty registration list.
    #[must_use]
    pub fn new(championship_id: u32, round: u32) -> Self {
        Self {
            championship_id,
            round,
            avatar_addresses: Vec::new(),
        }
    }

    /// Returns true if `avatar` joined.
    #[must_use]
    pub fn contains(&self, avatar: &Address) -> bool {
        self.avatar_addresses.contains(avatar)
    }

    /// Registers `avatar`; returns false if it was already registered.
    pub fn add(&mut self, avatar: Address) -> bool {
        if self.contains(&avatar) {
            return false;
        }
        self.avatar_addresses.push(avatar);
        true
    }

    /// Number of registered avatars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.avatar_addresses.len()
    }

    /// Returns true if nobody joined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.avatar_addresses.is_empty()
    }
}

/// Public record of a registered avatar, read by opponents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaParticipant {
    pub avatar_address: Address,
    pub agent_address: Address,
    pub name: String,
    pub level: u32,
    pub portrait_id: u32,
    pub score: Score,
    pub win: u32,
    pub lose: u32,
    /// Combat stats as of the last join or battle.
    pub snapshot: CombatSnapshot,
    pub synced_block_index: BlockIndex,
}

/// Score record of an avatar in a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaScore {
    pub avatar_address: Address,
    pub score: Score,
}

impl ArenaScore {
    /// Creates a score record.
    #[must_use]
    pub fn new(avatar_address: Address, score: Score) -> Self {
        Self {
            avatar_address,
            score,
        }
    }
}

/// Ticket bookkeeping of an avatar in a round.
///
/// The interval purchase count is kept at a sub-address so that resetting it
/// never rewrites the season counters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaInformation {
    pub avatar_address: Address,
    pub championship_id: u32,
    pub round: u32,
    /// Free tickets left in the current interval.
    pub ticket: u32,
    /// Interval index the free pool was last refilled for.
    pub ticket_reset_count: u64,
    /// Tickets bought this season.
    pub purchased_ticket_count: u32,
    pub win: u32,
    pub lose: u32,
    pub last_purchase_block_index: Option<BlockIndex>,
}

impl ArenaInformation {
    /// Fresh record holding `tickets` free tickets.
    #[must_use]
    pub fn new(avatar_address: Address, championship_id: u32, round: u32, tickets: u32) -> Self {
        Self {
            avatar_address,
            championship_id,
            round,
            ticket: tickets,
            ticket_reset_count: 0,
            purchased_ticket_count: 0,
            win: 0,
            lose: 0,
            last_purchase_block_index: None,
        }
    }
}

// =============================================================================
// AVATAR
// =============================================================================

/// A piece of equipment in an inventory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub item_id: ItemId,
    pub sheet_id: u32,
    pub category: EquipmentCategory,
    pub stat: StatModifier,
    /// Block from which the item can be used.
    pub required_block_index: BlockIndex,
    pub level: u32,
}

/// A costume in an inventory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Costume {
    pub item_id: ItemId,
    pub sheet_id: u32,
    pub category: CostumeCategory,
    pub stat: Option<StatModifier>,
}

/// Items owned by an avatar.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub equipments: BTreeMap<ItemId, Equipment>,
    pub costumes: BTreeMap<ItemId, Costume>,
    /// Material sheet id to count.
    pub materials: BTreeMap<u32, u64>,
}

impl Inventory {
    /// Adds `count` of material `id`.
    pub fn add_material(&mut self, id: u32, count: u64) {
        if count == 0 {
            return;
        }
        let entry = self.materials.entry(id).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    /// Count of material `id`.
    #[must_use]
    pub fn material_count(&self, id: u32) -> u64 {
        self.materials.get(&id).copied().unwrap_or(0)
    }
}

/// Mail recording an arena reward.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaRewardMail {
    pub id: Uuid,
    pub block_index: BlockIndex,
    pub championship_id: u32,
    pub round: u32,
    /// Item id to count, medals included.
    pub items: BTreeMap<u32, u64>,
}

/// Mail box with bounded capacity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailBox {
    pub mails: Vec<ArenaRewardMail>,
}

impl MailBox {
    /// Appends `mail`, dropping the oldest entries beyond `capacity`.
    pub fn push_trimmed(&mut self, mail: ArenaRewardMail, capacity: usize) {
        self.mails.push(mail);
        if self.mails.len() > capacity {
            let excess = self.mails.len() - capacity;
            self.mails.drain(..excess);
        }
    }

    /// Number of mails.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mails.len()
    }

    /// Returns true if there are no mails.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mails.is_empty()
    }
}

/// Avatar record, owned by an agent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarState {
    pub address: Address,
    pub agent_address: Address,
    pub name: String,
    pub level: u32,
    pub portrait_id: u32,
    /// Highest cleared adventure stage.
    pub cleared_stage: u32,
    pub inventory: Inventory,
    /// Rune id to rune level.
    pub runes: BTreeMap<u32, u32>,
    pub unlocked_rune_slots: BTreeSet<u32>,
    pub mail_box: MailBox,
}

impl AvatarState {
    /// New avatar with an empty inventory and rune slot 0 unlocked.
    #[must_use]
    pub fn new(
        address: Address,
        agent_address: Address,
        name: impl Into<String>,
        level: u32,
    ) -> Self {
        Self {
            address,
            agent_address,
            name: name.into(),
            level,
            portrait_id: 0,
            cleared_stage: 0,
            inventory: Inventory::default(),
            runes: BTreeMap::new(),
            unlocked_rune_slots: BTreeSet::from([0]),
            mail_box: MailBox::default(),
        }
    }
}
