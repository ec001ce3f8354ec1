//! # Rating Engine
//!
//! Banded score deltas. Bands are keyed on `enemy - my` and come from the
//! rating sheet; there is no continuous formula.

use super::config::GameConfig;
use super::sheets::{RatingBandRow, Sheet};
use super::value_objects::{ArenaType, Score};
use crate::errors::ArenaError;

/// Score changes for one match between two scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreDeltas {
    /// Attacker delta per win.
    pub my_win: Score,
    /// Attacker delta per loss.
    pub my_lose: Score,
    /// Defender delta per attacker win.
    pub enemy_on_my_win: Score,
}

/// Scores after a battle action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreUpdate {
    /// Attacker score the deltas were picked for.
    pub my_before: Score,
    /// Attacker score after every ticket, floored.
    pub my_after: Score,
    /// Defender score the deltas were picked for.
    pub enemy_before: Score,
    /// Defender score after the attacker's wins, floored.
    pub enemy_after: Score,
}

/// Rating rules over a band sheet.
#[derive(Clone, Copy, Debug)]
pub struct RatingEngine<'a> {
    config: &'a GameConfig,
    bands: &'a Sheet<RatingBandRow>,
}

impl<'a> RatingEngine<'a> {
    /// Creates an engine.
    #[must_use]
    pub fn new(config: &'a GameConfig, bands: &'a Sheet<RatingBandRow>) -> Self {
        Self { config, bands }
    }

    /// Ranked rounds only allow opponents inside the configured window.
    ///
    /// # Errors
    /// [`ArenaError::ValidateScoreDifference`] when the gap is outside it.
    pub fn validate_score_difference(
        &self,
        arena_type: ArenaType,
        my_score: Score,
        enemy_score: Score,
    ) -> Result<(), ArenaError> {
        let Some(window) = self.config.score_window(arena_type) else {
            return Ok(());
        };
        if window.contains(enemy_score.saturating_sub(my_score)) {
            Ok(())
        } else {
            Err(ArenaError::ValidateScoreDifference {
                arena_type,
                my_score,
                enemy_score,
            })
        }
    }

    /// Deltas for a match of `my_score` against `enemy_score`.
    ///
    /// The lowest-id band covering the gap wins.
    ///
    /// # Errors
    /// [`ArenaError::SheetRowColumn`] when no band covers the gap.
    pub fn score_deltas(
        &self,
        my_score: Score,
        enemy_score: Score,
    ) -> Result<ScoreDeltas, ArenaError> {
        let difference = enemy_score.saturating_sub(my_score);
        self.bands
            .values()
            .find(|band| band.covers(difference))
            .map(|band| ScoreDeltas {
                my_win: band.win_delta,
                my_lose: band.lose_delta,
                enemy_on_my_win: band.enemy_delta_on_win,
            })
            .ok_or_else(|| ArenaError::SheetRowColumn {
                sheet: "ArenaScoreSheet",
                reason: format!("no band covers score difference {difference}"),
            })
    }

    /// `max(before + wins * win + losses * lose, floor)`.
    #[must_use]
    pub fn apply_outcome(
        &self,
        before: Score,
        wins: u32,
        losses: u32,
        deltas: ScoreDeltas,
    ) -> Score {
        let gained = deltas.my_win.saturating_mul(Score::from(wins));
        let lost = deltas.my_lose.saturating_mul(Score::from(losses));
        self.floor(before.saturating_add(gained).saturating_add(lost))
    }

    /// Defender score after the attacker won `wins` times. Losses of the
    /// attacker never move the defender.
    #[must_use]
    pub fn apply_enemy_outcome(&self, before: Score, wins: u32, deltas: ScoreDeltas) -> Score {
        let delta = deltas.enemy_on_my_win.saturating_mul(Score::from(wins));
        self.floor(before.saturating_add(delta))
    }

    /// Computes both sides at once.
    ///
    /// # Errors
    /// See [`RatingEngine::score_deltas`].
    pub fn settle(
        &self,
        my_score: Score,
        enemy_score: Score,
        wins: u32,
        losses: u32,
    ) -> Result<ScoreUpdate, ArenaError> {
        let deltas = self.score_deltas(my_score, enemy_score)?;
        Ok(ScoreUpdate {
            my_before: my_score,
            my_after: self.apply_outcome(my_score, wins, losses, deltas),
            enemy_before: enemy_score,
            enemy_after: self.apply_enemy_outcome(enemy_score, wins, deltas),
        })
    }

    fn floor(&self, score: Score) -> Score {
        score.max(self.config.score_floor)
    }
}
