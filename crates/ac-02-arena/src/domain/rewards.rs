//! # Reward Distribution
//!
//! Per win the attacker receives:
//!
//! - one medal of the round in ranked rounds;
//! - materials drawn from the weighted reward table, restricted to rows the
//!   avatar's level qualifies for, until the per-win budget
//!   `reward_count(pre-match score)` is spent.
//!
//! Win `i` draws from `root.fork(streams::REWARD, i)`.

use super::combat::streams;
use super::entities::ArenaRound;
use super::sheets::{ArenaRewardRow, MaterialItemRow, RewardCountRow, Sheet};
use super::value_objects::{RuleVersion, Score};
use crate::errors::ArenaError;
use ac_01_world_state::RandomSource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Items granted by one battle action.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardManifest {
    /// Medal item id, set in ranked rounds.
    pub medal_id: Option<u32>,
    pub medal_count: u64,
    /// Material id to count.
    pub materials: BTreeMap<u32, u64>,
}

impl RewardManifest {
    /// Total materials, medals excluded.
    #[must_use]
    pub fn total_materials(&self) -> u64 {
        self.materials.values().sum()
    }

    /// Materials and medals as one item map.
    #[must_use]
    pub fn items(&self) -> BTreeMap<u32, u64> {
        let mut items = self.materials.clone();
        if let Some(medal_id) = self.medal_id {
            if self.medal_count > 0 {
                *items.entry(medal_id).or_insert(0) += self.medal_count;
            }
        }
        items
    }

    /// Returns true if nothing was granted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.medal_count == 0 && self.materials.is_empty()
    }
}

/// Draws rewards from the reward sheets.
#[derive(Clone, Copy, Debug)]
pub struct RewardDistributor<'a> {
    rewards: &'a Sheet<ArenaRewardRow>,
    reward_counts: &'a Sheet<RewardCountRow>,
    materials: &'a Sheet<MaterialItemRow>,
}

impl<'a> RewardDistributor<'a> {
    /// Creates a distributor over the given sheets.
    #[must_use]
    pub fn new(
        rewards: &'a Sheet<ArenaRewardRow>,
        reward_counts: &'a Sheet<RewardCountRow>,
        materials: &'a Sheet<MaterialItemRow>,
    ) -> Self {
        Self {
            rewards,
            reward_counts,
            materials,
        }
    }

    /// Material budget per win for `score`: the row with the highest
    /// `min_score` not above `score`, or 0 below every row.
    #[must_use]
    pub fn reward_count(&self, score: Score) -> u32 {
        self.reward_counts
            .values()
            .filter(|row| row.min_score <= score)
            .max_by_key(|row| (row.min_score, row.id))
            .map_or(0, |row| row.reward_count)
    }

    /// Medal id of `round` under `version`, checked against the material
    /// sheet. `None` for off-season rounds.
    ///
    /// # Errors
    /// [`ArenaError::MedalIdNotFound`] if the medal is not a known material.
    pub fn medal_id(
        &self,
        round: &ArenaRound,
        version: RuleVersion,
    ) -> Result<Option<u32>, ArenaError> {
        if !round.arena_type.is_ranked() {
            return Ok(None);
        }
        let medal_id = version.medal_id(round.championship_id, round.round, round.medal_id);
        if self.materials.get(&medal_id).is_none() {
            return Err(ArenaError::MedalIdNotFound(medal_id));
        }
        Ok(Some(medal_id))
    }

    /// Rewards for `wins` wins.
    ///
    /// # Errors
    /// [`ArenaError::MedalIdNotFound`] in ranked rounds with an unknown medal.
    pub fn distribute(
        &self,
        round: &ArenaRound,
        version: RuleVersion,
        avatar_level: u32,
        pre_match_score: Score,
        wins: u32,
        root: &RandomSource,
    ) -> Result<RewardManifest, ArenaError> {
        let mut manifest = RewardManifest::default();
        if wins == 0 {
            return Ok(manifest);
        }

        if let Some(medal_id) = self.medal_id(round, version)? {
            manifest.medal_id = Some(medal_id);
            manifest.medal_count = u64::from(wins);
        }

        let candidates: Vec<&ArenaRewardRow> = self
            .rewards
            .values()
            .filter(|row| row.weight > 0 && row.required_level <= avatar_level)
            .collect();
        let total_weight: u64 = candidates.iter().map(|row| u64::from(row.weight)).sum();
        let budget = self.reward_count(pre_match_score);
        if candidates.is_empty() || budget == 0 {
            return Ok(manifest);
        }

        for win in 0..wins {
            let mut rng = root.fork(streams::REWARD, u64::from(win));
            let mut remaining = budget;
            while remaining > 0 {
                let row = pick_weighted(&candidates, total_weight, &mut rng);
                let drawn = rng.next_inclusive(u64::from(row.min), u64::from(row.max));
                let count = u32::try_from(drawn).unwrap_or(u32::MAX).clamp(1, remaining);
                *manifest.materials.entry(row.item_id).or_insert(0) += u64::from(count);
                remaining -= count;
            }
        }

        Ok(manifest)
    }
}

fn pick_weighted<'r>(
    candidates: &[&'r ArenaRewardRow],
    total_weight: u64,
    rng: &mut RandomSource,
) -> &'r ArenaRewardRow {
    let mut target = rng.next_below(total_weight);
    for &row in candidates {
        let weight = u64::from(row.weight);
        if target < weight {
            return row;
        }
        target -= weight;
    }
    candidates[candidates.len() - 1]
}
