//! In-memory [`SheetProvider`] loaded from JSON fixtures.
//!
//! The JSON document is an object with one row list per sheet:
//!
//! ```json
//! { "arena": [...], "rating_bands": [...], "reward_counts": [...],
//!   "rewards": [...], "materials": [...], "runes": [...], "characters": [...] }
//! ```

use crate::domain::sheets::{
    ArenaRewardRow, ArenaRow, CharacterRow, MaterialItemRow, RatingBandRow, RewardCountRow,
    RuneRow, Sheet,
};
use crate::errors::ArenaError;
use crate::ports::outbound::SheetProvider;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors while loading sheets.
#[derive(Debug, Error)]
pub enum SheetLoadError {
    /// Malformed JSON.
    #[error("sheet json: {0}")]
    Json(#[from] serde_json::Error),

    /// Sheets parsed but contradict each other.
    #[error("inconsistent sheets: {0}")]
    Inconsistent(ArenaError),
}

/// Every arena sheet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSheets {
    /// Round schedule per championship.
    pub arena: Sheet<ArenaRow>,
    /// Score deltas by score gap.
    pub rating_bands: Sheet<RatingBandRow>,
    /// Rewards per win by pre-match score.
    pub reward_counts: Sheet<RewardCountRow>,
    /// Weighted reward table.
    pub rewards: Sheet<ArenaRewardRow>,
    pub materials: Sheet<MaterialItemRow>,
    pub runes: Sheet<RuneRow>,
    pub characters: Sheet<CharacterRow>,
}

impl TableSheets {
    /// Parses and validates a JSON document.
    ///
    /// # Errors
    /// [`SheetLoadError::Json`] on malformed input,
    /// [`SheetLoadError::Inconsistent`] when [`TableSheets::validate`] fails.
    pub fn from_json(json: &str) -> Result<Self, SheetLoadError> {
        let sheets: Self = serde_json::from_str(json)?;
        sheets.validate().map_err(SheetLoadError::Inconsistent)?;
        debug!(
            championships = sheets.arena.len(),
            bands = sheets.rating_bands.len(),
            rewards = sheets.rewards.len(),
            "table sheets loaded"
        );
        Ok(sheets)
    }

    /// Serializes to the JSON layout accepted by [`TableSheets::from_json`].
    ///
    /// # Errors
    /// [`SheetLoadError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, SheetLoadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Cross-row consistency.
    ///
    /// Round rows are not checked here; a malformed round is reported as
    /// `InvalidSeason` when an action touches it.
    ///
    /// # Errors
    /// [`ArenaError::SheetRowColumn`] describing the first inconsistency.
    pub fn validate(&self) -> Result<(), ArenaError> {
        let bands: Vec<&RatingBandRow> = self.rating_bands.values().collect();
        for (i, band) in bands.iter().enumerate() {
            if band.min_difference > band.max_difference {
                return Err(column("ArenaScoreSheet", format!("band {} is empty", band.id)));
            }
            if let Some(other) = bands[i + 1..].iter().find(|other| {
                other.min_difference <= band.max_difference
                    && band.min_difference <= other.max_difference
            }) {
                return Err(column(
                    "ArenaScoreSheet",
                    format!("bands {} and {} overlap", band.id, other.id),
                ));
            }
        }

        let mut counts: Vec<&RewardCountRow> = self.reward_counts.values().collect();
        counts.sort_by_key(|row| (row.min_score, row.id));
        if counts.windows(2).any(|pair| pair[0].reward_count > pair[1].reward_count) {
            return Err(column(
                "WeeklyArenaRewardSheet",
                "reward count decreases with score".into(),
            ));
        }

        for row in self.rewards.values() {
            if row.min > row.max {
                return Err(column("ArenaRewardSheet", format!("row {} has min > max", row.id)));
            }
            if self.materials.get(&row.item_id).is_none() {
                return Err(column(
                    "ArenaRewardSheet",
                    format!("row {} rewards unknown material {}", row.id, row.item_id),
                ));
            }
        }

        Ok(())
    }
}

fn column(sheet: &'static str, reason: String) -> ArenaError {
    ArenaError::SheetRowColumn { sheet, reason }
}

impl SheetProvider for TableSheets {
    fn arena(&self) -> &Sheet<ArenaRow> {
        &self.arena
    }

    fn rating_bands(&self) -> &Sheet<RatingBandRow> {
        &self.rating_bands
    }

    fn reward_counts(&self) -> &Sheet<RewardCountRow> {
        &self.reward_counts
    }

    fn rewards(&self) -> &Sheet<ArenaRewardRow> {
        &self.rewards
    }

    fn materials(&self) -> &Sheet<MaterialItemRow> {
        &self.materials
    }

    fn runes(&self) -> &Sheet<RuneRow> {
        &self.runes
    }

    fn characters(&self) -> &Sheet<CharacterRow> {
        &self.characters
    }
}
