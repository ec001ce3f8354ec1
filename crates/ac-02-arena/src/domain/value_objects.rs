//! # Value Objects
//!
//! Immutable arena primitives defined by their value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

pub use uuid::Uuid;

/// Non-fungible item identifier (equipment, costume).
pub type ItemId = Uuid;

/// Arena score (rating).
pub type Score = i64;

// =============================================================================
// ARENA TYPE
// =============================================================================

/// Kind of arena round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ArenaType {
    /// Unranked filler between seasons. No medals, no fairness window.
    OffSeason,
    /// Ranked season round. Grants medals.
    Season,
    /// Championship round. Ranked, may require medals to join.
    Championship,
}

impl ArenaType {
    /// Returns true for medal-granting, fairness-checked rounds.
    #[must_use]
    pub fn is_ranked(self) -> bool {
        !matches!(self, Self::OffSeason)
    }
}

impl fmt::Display for ArenaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OffSeason => "off-season",
            Self::Season => "season",
            Self::Championship => "championship",
        };
        f.write_str(name)
    }
}

// =============================================================================
// RULE VERSION
// =============================================================================

/// Rule-set tag carried by every arena action.
///
/// Historical action variants differ only in small details; one rule engine
/// branches on this tag instead of keeping forked code paths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleVersion {
    /// Medal id computed from championship id and round.
    Legacy,
    /// Medal id read from the round row.
    #[default]
    Current,
}

impl RuleVersion {
    /// Base of the computed medal id range used by [`RuleVersion::Legacy`].
    pub const LEGACY_MEDAL_BASE: u32 = 700_000;

    /// Medal item id for a round under this rule version.
    #[must_use]
    pub fn medal_id(self, championship_id: u32, round: u32, row_medal_id: u32) -> u32 {
        match self {
            Self::Legacy => Self::LEGACY_MEDAL_BASE
                .saturating_add(championship_id.saturating_mul(100))
                .saturating_add(round),
            Self::Current => row_medal_id,
        }
    }
}

// =============================================================================
// ITEM CATEGORIES
// =============================================================================

/// Equipment slot category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EquipmentCategory {
    Weapon,
    Armor,
    Belt,
    Necklace,
    Ring,
    Aura,
}

impl EquipmentCategory {
    /// Number of slots this category occupies at most.
    #[must_use]
    pub fn max_equipped(self) -> usize {
        match self {
            Self::Ring => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for EquipmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Costume slot category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CostumeCategory {
    FullCostume,
    HairCostume,
    EarCostume,
    EyeCostume,
    TailCostume,
    Title,
}

impl fmt::Display for CostumeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// =============================================================================
// STATS
// =============================================================================

/// Stat kinds a modifier can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatType {
    Hp,
    Atk,
    Def,
    Spd,
    Hit,
    /// Critical chance in permille.
    Cri,
}

/// A flat stat bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatModifier {
    pub stat: StatType,
    pub value: u64,
}

impl StatModifier {
    /// Creates a modifier.
    #[must_use]
    pub const fn new(stat: StatType, value: u64) -> Self {
        Self { stat, value }
    }
}

/// Combat stats. Integer-only for cross-platform determinism.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub hp: u64,
    pub atk: u64,
    pub def: u64,
    pub spd: u64,
    pub hit: u64,
    /// Critical chance in permille.
    pub cri: u64,
}

impl Stats {
    /// Applies a flat modifier.
    #[must_use]
    pub fn with_modifier(mut self, modifier: StatModifier) -> Self {
        let slot = match modifier.stat {
            StatType::Hp => &mut self.hp,
            StatType::Atk => &mut self.atk,
            StatType::Def => &mut self.def,
            StatType::Spd => &mut self.spd,
            StatType::Hit => &mut self.hit,
            StatType::Cri => &mut self.cri,
        };
        *slot = slot.saturating_add(modifier.value);
        self
    }

    /// Multiplies every stat by `factor`.
    #[must_use]
    pub fn scaled(self, factor: u64) -> Self {
        Self {
            hp: self.hp.saturating_mul(factor),
            atk: self.atk.saturating_mul(factor),
            def: self.def.saturating_mul(factor),
            spd: self.spd.saturating_mul(factor),
            hit: self.hit.saturating_mul(factor),
            cri: self.cri.saturating_mul(factor),
        }
    }
}

impl Add for Stats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            hp: self.hp.saturating_add(rhs.hp),
            atk: self.atk.saturating_add(rhs.atk),
            def: self.def.saturating_add(rhs.def),
            spd: self.spd.saturating_add(rhs.spd),
            hit: self.hit.saturating_add(rhs.hit),
            cri: self.cri.saturating_add(rhs.cri),
        }
    }
}

// =============================================================================
// RUNE SLOT INFO
// =============================================================================

/// A rune placed into a rune slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuneSlotInfo {
    pub slot_index: u32,
    pub rune_id: u32,
}

impl RuneSlotInfo {
    /// Creates a rune slot assignment.
    #[must_use]
    pub const fn new(slot_index: u32, rune_id: u32) -> Self {
        Self {
            slot_index,
            rune_id,
        }
    }
}
