//! # Action Context
//!
//! Everything an action may observe besides its own payload.

use super::random::RandomSource;
use super::world_state::WorldState;
use shared_types::{Address, BlockIndex};

/// Execution context for a single action.
///
/// Contains:
/// - the state the action executes against
/// - the signer (agent) of the enclosing transaction
/// - the block index the action is evaluated in
/// - a deterministic random source seeded from commitment data
/// - the rehearsal flag for dry validation
#[derive(Clone, Debug)]
pub struct ActionContext {
    /// State before this action.
    pub previous_state: WorldState,
    /// Agent address that signed the transaction.
    pub signer: Address,
    /// Index of the block being evaluated.
    pub block_index: BlockIndex,
    /// Root random source for this action.
    pub random: RandomSource,
    /// Dry run: validate and estimate cost without running simulations.
    pub rehearsal: bool,
}

impl ActionContext {
    /// Creates a context for normal evaluation.
    #[must_use]
    pub fn new(
        previous_state: WorldState,
        signer: Address,
        block_index: BlockIndex,
        random: RandomSource,
    ) -> Self {
        Self {
            previous_state,
            signer,
            block_index,
            random,
            rehearsal: false,
        }
    }

    /// Same context in rehearsal mode.
    #[must_use]
    pub fn into_rehearsal(mut self) -> Self {
        self.rehearsal = true;
        self
    }
}
