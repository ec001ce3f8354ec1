//! # Action Payloads
//!
//! Wire form of arena actions. Payloads are `bincode` encoded inside the
//! enclosing transaction and decoded plus structurally validated before
//! execution. Identity never comes from the payload: the agent is always the
//! transaction signer carried by the action context.

use crate::domain::config::limits;
use crate::domain::value_objects::{ItemId, RuleVersion, RuneSlotInfo};
use crate::errors::ArenaError;
use serde::{Deserialize, Serialize};
use shared_types::Address;

// =============================================================================
// PAYLOADS
// =============================================================================

/// Registers an avatar for a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinArenaPayload {
    pub avatar_address: Address,
    pub championship_id: u32,
    pub round: u32,
    pub costumes: Vec<ItemId>,
    pub equipments: Vec<ItemId>,
    pub rune_infos: Vec<RuneSlotInfo>,
    #[serde(default)]
    pub version: RuleVersion,
}

/// Fights a registered opponent `ticket` times.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleArenaPayload {
    pub avatar_address: Address,
    pub enemy_avatar_address: Address,
    pub championship_id: u32,
    pub round: u32,
    pub ticket: u32,
    pub costumes: Vec<ItemId>,
    pub equipments: Vec<ItemId>,
    pub rune_infos: Vec<RuneSlotInfo>,
    #[serde(default)]
    pub version: RuleVersion,
}

/// Every arena action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaAction {
    JoinArena(JoinArenaPayload),
    BattleArena(BattleArenaPayload),
}

impl ArenaAction {
    /// Acting avatar.
    #[must_use]
    pub fn avatar_address(&self) -> Address {
        match self {
            Self::JoinArena(payload) => payload.avatar_address,
            Self::BattleArena(payload) => payload.avatar_address,
        }
    }

    /// Action name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::JoinArena(_) => "join_arena",
            Self::BattleArena(_) => "battle_arena",
        }
    }

    /// Encodes the action.
    ///
    /// # Errors
    /// [`ArenaError::InvalidPayload`] if encoding fails.
    pub fn encode(&self) -> Result<Vec<u8>, ArenaError> {
        bincode::serialize(self).map_err(|e| ArenaError::InvalidPayload(e.to_string()))
    }

    /// Decodes and structurally validates an action.
    ///
    /// # Errors
    /// [`ArenaError::InvalidPayload`] on oversized, malformed or structurally
    /// invalid input.
    pub fn decode(bytes: &[u8]) -> Result<Self, ArenaError> {
        if bytes.len() > limits::MAX_PAYLOAD_BYTES {
            return Err(ArenaError::InvalidPayload(format!(
                "payload of {} bytes exceeds {}",
                bytes.len(),
                limits::MAX_PAYLOAD_BYTES
            )));
        }
        let action: Self =
            bincode::deserialize(bytes).map_err(|e| ArenaError::InvalidPayload(e.to_string()))?;
        action.validate_structure()?;
        Ok(action)
    }

    /// Bounds list lengths. Ticket counts are checked against the play
    /// count limit during execution.
    ///
    /// # Errors
    /// [`ArenaError::InvalidPayload`] naming the offending field.
    pub fn validate_structure(&self) -> Result<(), ArenaError> {
        let (equipments, costumes, rune_infos) = match self {
            Self::JoinArena(p) => (&p.equipments, &p.costumes, &p.rune_infos),
            Self::BattleArena(p) => (&p.equipments, &p.costumes, &p.rune_infos),
        };
        check_len("equipments", equipments.len(), limits::MAX_EQUIPMENTS)?;
        check_len("costumes", costumes.len(), limits::MAX_COSTUMES)?;
        check_len("rune_infos", rune_infos.len(), limits::MAX_RUNE_INFOS)
    }
}

fn check_len(field: &str, len: usize, max: usize) -> Result<(), ArenaError> {
    if len > max {
        return Err(ArenaError::InvalidPayload(format!(
            "{field} has {len} entries, max {max}"
        )));
    }
    Ok(())
}
