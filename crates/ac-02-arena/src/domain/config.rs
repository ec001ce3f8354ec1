//! # Configuration
//!
//! Game-wide constants injected into the arena service. Nothing here is global:
//! every executor owns its own [`ArenaConfig`].

use super::value_objects::{ArenaType, EquipmentCategory, Score};
use serde::{Deserialize, Serialize};
use shared_types::{BlockIndex, Currency};

/// Structural limits for action payloads.
pub mod limits {
    /// Maximum equipment ids per payload.
    pub const MAX_EQUIPMENTS: usize = 8;
    /// Maximum costume ids per payload.
    pub const MAX_COSTUMES: usize = 6;
    /// Maximum rune slot assignments per payload.
    pub const MAX_RUNE_INFOS: usize = 8;
    /// Maximum encoded payload size in bytes.
    pub const MAX_PAYLOAD_BYTES: usize = 4096;
}

/// Score window allowed between attacker and defender in a ranked round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreWindow {
    /// Lowest allowed `enemy - my`.
    pub min_difference: Score,
    /// Highest allowed `enemy - my`.
    pub max_difference: Score,
}

impl ScoreWindow {
    /// Returns true if `difference` lies inside the window (inclusive).
    #[must_use]
    pub fn contains(&self, difference: Score) -> bool {
        (self.min_difference..=self.max_difference).contains(&difference)
    }
}

/// Game rules that are not part of any sheet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Blocks per ticket-reset interval.
    pub daily_arena_interval: BlockIndex,
    /// Free tickets granted on join and on each interval reset.
    pub arena_ticket_max: u32,
    /// Maximum tickets consumed by one battle action.
    pub max_play_count: u32,
    /// Tickets purchasable in one action during ranked rounds.
    pub ranked_purchase_per_call: u32,
    /// Tickets purchasable in one action during off-season rounds.
    pub off_season_purchase_per_call: u32,
    /// Blocks that must pass between two ticket purchases.
    pub purchase_cooldown_blocks: u64,
    /// Lowest score an avatar can fall to.
    pub score_floor: Score,
    /// Score assigned on join.
    pub default_score: Score,
    /// Fairness window for season rounds.
    pub season_score_window: ScoreWindow,
    /// Fairness window for championship rounds.
    pub championship_score_window: ScoreWindow,
    /// Stage an avatar must have cleared to enter the arena.
    pub required_cleared_stage: u32,
    /// Mails kept per avatar, oldest dropped first.
    pub mail_box_capacity: usize,
    /// Turn cap per simulation; reaching it counts as a loss.
    pub max_turns: u32,
    /// Character sheet row used for player avatars.
    pub player_character_id: u32,
    /// Avatar level required per equipment slot, in slot order.
    pub equipment_slot_levels: Vec<(EquipmentCategory, u32)>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            daily_arena_interval: 7200,
            arena_ticket_max: 8,
            max_play_count: 16,
            ranked_purchase_per_call: 1,
            off_season_purchase_per_call: 8,
            purchase_cooldown_blocks: 4,
            score_floor: 1000,
            default_score: 1000,
            season_score_window: ScoreWindow {
                min_difference: -100,
                max_difference: 100,
            },
            championship_score_window: ScoreWindow {
                min_difference: -100,
                max_difference: 100,
            },
            required_cleared_stage: 25,
            mail_box_capacity: 30,
            max_turns: 200,
            player_character_id: 100_010,
            equipment_slot_levels: vec![
                (EquipmentCategory::Weapon, 1),
                (EquipmentCategory::Armor, 3),
                (EquipmentCategory::Belt, 5),
                (EquipmentCategory::Necklace, 8),
                (EquipmentCategory::Ring, 13),
                (EquipmentCategory::Ring, 46),
                (EquipmentCategory::Aura, 1),
            ],
        }
    }
}

impl GameConfig {
    /// Fairness window for `arena_type`; `None` for off-season rounds.
    #[must_use]
    pub fn score_window(&self, arena_type: ArenaType) -> Option<ScoreWindow> {
        match arena_type {
            ArenaType::OffSeason => None,
            ArenaType::Season => Some(self.season_score_window),
            ArenaType::Championship => Some(self.championship_score_window),
        }
    }

    /// Tickets purchasable in a single action.
    #[must_use]
    pub fn purchase_per_call(&self, arena_type: ArenaType) -> u32 {
        if arena_type.is_ranked() {
            self.ranked_purchase_per_call
        } else {
            self.off_season_purchase_per_call
        }
    }

    /// Levels at which each slot of `category` unlocks, ascending.
    #[must_use]
    pub fn slot_unlock_levels(&self, category: EquipmentCategory) -> Vec<u32> {
        let mut levels: Vec<u32> = self
            .equipment_slot_levels
            .iter()
            .filter(|(slot, _)| *slot == category)
            .map(|(_, level)| *level)
            .collect();
        levels.sort_unstable();
        levels
    }
}

/// Everything the arena executor needs besides sheets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Game rules.
    pub game: GameConfig,
    /// Currency tickets are bought with.
    pub gold: Currency,
    /// Currency entrance fees are paid in.
    pub crystal: Currency,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            gold: Currency::new("NCG", 2),
            crystal: Currency::new("CRYSTAL", 18),
        }
    }
}
