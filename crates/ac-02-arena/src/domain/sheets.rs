//! # Table Sheets
//!
//! Read-only configuration tables. A sheet is an ordered map from row key to
//! row; lookups that must succeed go through [`Sheet::try_get_value`], which
//! turns a miss into [`ArenaError::SheetRowNotFound`].

use super::entities::ArenaRound;
use super::value_objects::{Score, StatType, Stats};
use crate::errors::ArenaError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::Debug;

// =============================================================================
// SHEET
// =============================================================================

/// A row of a sheet.
pub trait SheetRow {
    /// Row key type.
    type Key: Ord + Clone + Debug;

    /// Sheet name used in errors.
    const SHEET_NAME: &'static str;

    /// Key of this row.
    fn key(&self) -> Self::Key;
}

/// Rows of one sheet keyed by [`SheetRow::key`]. Later rows replace earlier
/// rows with the same key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sheet<R: SheetRow> {
    rows: BTreeMap<R::Key, R>,
}

impl<R: SheetRow> Default for Sheet<R> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

impl<R: SheetRow> Sheet<R> {
    /// Builds a sheet from rows.
    pub fn from_rows(rows: impl IntoIterator<Item = R>) -> Self {
        Self {
            rows: rows.into_iter().map(|row| (row.key(), row)).collect(),
        }
    }

    /// Row for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &R::Key) -> Option<&R> {
        self.rows.get(key)
    }

    /// Row for `key`.
    ///
    /// # Errors
    /// [`ArenaError::SheetRowNotFound`] when the key is absent.
    pub fn try_get_value(&self, key: &R::Key) -> Result<&R, ArenaError> {
        self.rows.get(key).ok_or_else(|| ArenaError::SheetRowNotFound {
            sheet: R::SHEET_NAME,
            key: format!("{key:?}"),
        })
    }

    /// Rows in key order.
    pub fn values(&self) -> impl Iterator<Item = &R> {
        self.rows.values()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the sheet has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<R: SheetRow + Serialize> Serialize for Sheet<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows.values())
    }
}

impl<'de, R: SheetRow + Deserialize<'de>> Deserialize<'de> for Sheet<R> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<R>::deserialize(deserializer).map(Self::from_rows)
    }
}

// =============================================================================
// ROWS
// =============================================================================

/// Rounds of one championship.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaRow {
    pub championship_id: u32,
    pub rounds: Vec<ArenaRound>,
}

impl ArenaRow {
    /// Round `round` of this championship.
    #[must_use]
    pub fn round(&self, round: u32) -> Option<&ArenaRound> {
        self.rounds.iter().find(|r| r.round == round)
    }
}

impl SheetRow for ArenaRow {
    type Key = u32;
    const SHEET_NAME: &'static str = "ArenaSheet";

    fn key(&self) -> u32 {
        self.championship_id
    }
}

/// Score deltas for a band of `enemy - my` score differences.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingBandRow {
    pub id: u32,
    /// Lowest difference covered (inclusive).
    pub min_difference: Score,
    /// Highest difference covered (inclusive).
    pub max_difference: Score,
    pub win_delta: Score,
    pub lose_delta: Score,
    /// Enemy delta when the attacker wins.
    pub enemy_delta_on_win: Score,
}

impl RatingBandRow {
    /// Returns true if `difference` falls in this band.
    #[must_use]
    pub fn covers(&self, difference: Score) -> bool {
        (self.min_difference..=self.max_difference).contains(&difference)
    }
}

impl SheetRow for RatingBandRow {
    type Key = u32;
    const SHEET_NAME: &'static str = "ArenaScoreSheet";

    fn key(&self) -> u32 {
        self.id
    }
}

/// Reward budget per win for scores from `min_score` upwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardCountRow {
    pub id: u32,
    pub min_score: Score,
    pub reward_count: u32,
}

impl SheetRow for RewardCountRow {
    type Key = u32;
    const SHEET_NAME: &'static str = "WeeklyArenaRewardSheet";

    fn key(&self) -> u32 {
        self.id
    }
}

/// Weighted entry of the arena reward table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaRewardRow {
    pub id: u32,
    /// Material sheet id granted.
    pub item_id: u32,
    pub weight: u32,
    /// Minimum count per draw.
    pub min: u32,
    /// Maximum count per draw.
    pub max: u32,
    /// Avatar level needed for this entry.
    pub required_level: u32,
}

impl SheetRow for ArenaRewardRow {
    type Key = u32;
    const SHEET_NAME: &'static str = "ArenaRewardSheet";

    fn key(&self) -> u32 {
        self.id
    }
}

/// A material item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialItemRow {
    pub id: u32,
    pub name: String,
    pub grade: u32,
}

impl SheetRow for MaterialItemRow {
    type Key = u32;
    const SHEET_NAME: &'static str = "MaterialItemSheet";

    fn key(&self) -> u32 {
        self.id
    }
}

/// Stat granted by a rune, scaled by rune level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuneRow {
    pub id: u32,
    pub stat: StatType,
    pub value_per_level: u64,
}

impl SheetRow for RuneRow {
    type Key = u32;
    const SHEET_NAME: &'static str = "RuneSheet";

    fn key(&self) -> u32 {
        self.id
    }
}

/// Base stats of a character and their growth per level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRow {
    pub id: u32,
    pub base: Stats,
    pub growth: Stats,
}

impl CharacterRow {
    /// Stats at `level` (level 1 is the base).
    #[must_use]
    pub fn stats_at(&self, level: u32) -> Stats {
        self.base + self.growth.scaled(u64::from(level.saturating_sub(1)))
    }
}

impl SheetRow for CharacterRow {
    type Key = u32;
    const SHEET_NAME: &'static str = "CharacterSheet";

    fn key(&self) -> u32 {
        self.id
    }
}
