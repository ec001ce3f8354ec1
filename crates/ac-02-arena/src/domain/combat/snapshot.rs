//! Combat snapshots: the frozen stats a combatant fights with.

use super::loadout::Loadout;
use crate::domain::sheets::CharacterRow;
use crate::domain::value_objects::Stats;
use serde::{Deserialize, Serialize};

/// Stats of a combatant at a point in time.
///
/// Defenders fight with the snapshot stored in their participant record, so
/// their loadout changes only take effect after they act themselves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatSnapshot {
    pub character_id: u32,
    pub level: u32,
    pub stats: Stats,
}

impl CombatSnapshot {
    /// Character stats at `level` plus every loadout bonus.
    #[must_use]
    pub fn build(character: &CharacterRow, level: u32, loadout: &Loadout) -> Self {
        let stats = loadout
            .modifiers()
            .into_iter()
            .fold(character.stats_at(level), Stats::with_modifier);
        Self {
            character_id: character.id,
            level,
            stats,
        }
    }
}
