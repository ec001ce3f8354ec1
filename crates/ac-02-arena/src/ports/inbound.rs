//! # Driving Ports (API - Inbound)
//!
//! The arena's public API. Block execution calls these with the action
//! context of the enclosing transaction.

use crate::domain::combat::CombatOutcome;
use crate::errors::ArenaError;
use crate::events::{BattleArenaPayload, JoinArenaPayload};
use ac_01_world_state::{ActionContext, WorldState};

/// Result of a successfully executed arena action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// Successor state.
    pub state: WorldState,
    /// Battle details; `None` for joins and rehearsals.
    pub battle: Option<CombatOutcome>,
}

/// Arena actions.
pub trait ArenaApi {
    /// Registers the avatar for a round.
    ///
    /// # Errors
    /// The first failing validation step.
    fn join_arena(
        &self,
        payload: &JoinArenaPayload,
        context: &ActionContext,
    ) -> Result<ExecutionOutcome, ArenaError>;

    /// Fights a registered opponent.
    ///
    /// # Errors
    /// The first failing validation step.
    fn battle_arena(
        &self,
        payload: &BattleArenaPayload,
        context: &ActionContext,
    ) -> Result<ExecutionOutcome, ArenaError>;
}
