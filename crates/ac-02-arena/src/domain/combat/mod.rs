//! # Combat Resolution
//!
//! One simulation per ticket. Simulation `i` draws from
//! `root.fork(streams::COMBAT, i)`, so battles are independent of each other
//! and of how many draws any other consumer took from the root.

pub mod loadout;
pub mod simulator;
pub mod snapshot;

pub use loadout::{validate_loadout, EquippedRune, Loadout, LoadoutRequest};
pub use simulator::{BattleLog, BattleResult, CombatSimulator, Side, TurnEvent};
pub use snapshot::CombatSnapshot;

use super::rewards::RewardManifest;
use ac_01_world_state::RandomSource;
use serde::{Deserialize, Serialize};

/// Fork domains of the action random source.
pub mod streams {
    /// Per-ticket combat streams.
    pub const COMBAT: u64 = 0x01;
    /// Per-win reward streams.
    pub const REWARD: u64 = 0x02;
    /// Mail identifiers.
    pub const MAIL: u64 = 0x03;
}

/// Everything a battle action produced besides state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatOutcome {
    pub wins: u32,
    pub losses: u32,
    pub logs: Vec<BattleLog>,
    pub rewards: RewardManifest,
}

/// Runs the per-ticket simulations.
#[derive(Clone, Copy, Debug)]
pub struct CombatResolver {
    simulator: CombatSimulator,
}

impl CombatResolver {
    /// Resolver capped at `max_turns` turns per simulation.
    #[must_use]
    pub fn new(max_turns: u32) -> Self {
        Self {
            simulator: CombatSimulator::new(max_turns),
        }
    }

    /// Plays `tickets` battles.
    #[must_use]
    pub fn resolve(
        &self,
        attacker: &CombatSnapshot,
        defender: &CombatSnapshot,
        root: &RandomSource,
        tickets: u32,
    ) -> Vec<BattleLog> {
        (0..tickets)
            .map(|index| {
                let mut rng = root.fork(streams::COMBAT, u64::from(index));
                self.simulator.simulate(attacker, defender, &mut rng, index)
            })
            .collect()
    }
}
