//! # Combat Simulator
//!
//! Speed-ordered, turn-based duel between two snapshots.
//!
//! Each turn the faster side acts first (the attacker on ties), then the
//! other side if it is still standing. An action draws a hit roll and, on a
//! hit, a critical roll from the battle's random stream:
//!
//! ```text
//! hit_permille = clamp(750 + 2 * (hit - target.spd), 250, 1000)
//! damage       = max(atk - target.def / 2, 1)   (x3/2 on critical)
//! ```
//!
//! Integer arithmetic only. Reaching the turn cap counts as a loss for the
//! attacker.

use super::snapshot::CombatSnapshot;
use ac_01_world_state::RandomSource;
use serde::{Deserialize, Serialize};

const BASE_HIT_PERMILLE: i64 = 750;
const MIN_HIT_PERMILLE: i64 = 250;
const MAX_HIT_PERMILLE: i64 = 1000;

/// Combatant side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Attacker,
    Defender,
}

impl Side {
    fn opponent(self) -> Self {
        match self {
            Self::Attacker => Self::Defender,
            Self::Defender => Self::Attacker,
        }
    }
}

/// Something that happened during a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// `actor` hit its opponent.
    Attack {
        turn: u32,
        actor: Side,
        damage: u64,
        critical: bool,
        /// Target HP after the hit.
        target_hp: u64,
    },
    /// `actor` missed.
    Miss { turn: u32, actor: Side },
    /// `side` was knocked out.
    Dead { turn: u32, side: Side },
}

/// Outcome of one simulation from the attacker's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleResult {
    Win,
    Lose,
}

/// Full record of one simulation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleLog {
    /// Ticket index this simulation was played for.
    pub index: u32,
    pub result: BattleResult,
    /// Turns played.
    pub turns: u32,
    pub events: Vec<TurnEvent>,
}

impl BattleLog {
    /// Returns true if the attacker won.
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.result == BattleResult::Win
    }
}

#[derive(Clone, Copy)]
struct Fighter<'a> {
    snapshot: &'a CombatSnapshot,
    hp: u64,
}

/// Runs simulations with a fixed turn cap.
#[derive(Clone, Copy, Debug)]
pub struct CombatSimulator {
    max_turns: u32,
}

impl CombatSimulator {
    /// Creates a simulator capped at `max_turns` turns.
    #[must_use]
    pub fn new(max_turns: u32) -> Self {
        Self { max_turns }
    }

    /// Plays one battle drawing from `rng`.
    pub fn simulate(
        &self,
        attacker: &CombatSnapshot,
        defender: &CombatSnapshot,
        rng: &mut RandomSource,
        index: u32,
    ) -> BattleLog {
        let mut fighters = [
            Fighter {
                snapshot: attacker,
                hp: attacker.stats.hp.max(1),
            },
            Fighter {
                snapshot: defender,
                hp: defender.stats.hp.max(1),
            },
        ];
        let order = if attacker.stats.spd >= defender.stats.spd {
            [Side::Attacker, Side::Defender]
        } else {
            [Side::Defender, Side::Attacker]
        };

        let mut events = Vec::new();
        for turn in 1..=self.max_turns {
            for actor in order {
                let target = actor.opponent();
                let (attacker_stats, defender_stats) = (
                    fighters[slot(actor)].snapshot.stats,
                    fighters[slot(target)].snapshot.stats,
                );

                if !rng.chance_permille(hit_permille(attacker_stats.hit, defender_stats.spd)) {
                    events.push(TurnEvent::Miss { turn, actor });
                    continue;
                }
                let critical = rng.chance_permille(crit_permille(attacker_stats.cri));
                let damage = damage(attacker_stats.atk, defender_stats.def, critical);

                let target_fighter = &mut fighters[slot(target)];
                target_fighter.hp = target_fighter.hp.saturating_sub(damage);
                events.push(TurnEvent::Attack {
                    turn,
                    actor,
                    damage,
                    critical,
                    target_hp: target_fighter.hp,
                });

                if target_fighter.hp == 0 {
                    events.push(TurnEvent::Dead { turn, side: target });
                    let result = if target == Side::Defender {
                        BattleResult::Win
                    } else {
                        BattleResult::Lose
                    };
                    return BattleLog {
                        index,
                        result,
                        turns: turn,
                        events,
                    };
                }
            }
        }

        BattleLog {
            index,
            result: BattleResult::Lose,
            turns: self.max_turns,
            events,
        }
    }
}

fn slot(side: Side) -> usize {
    match side {
        Side::Attacker => 0,
        Side::Defender => 1,
    }
}

fn to_signed(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn hit_permille(hit: u64, target_spd: u64) -> u32 {
    let gap = to_signed(hit).saturating_sub(to_signed(target_spd));
    let permille = BASE_HIT_PERMILLE
        .saturating_add(gap.saturating_mul(2))
        .clamp(MIN_HIT_PERMILLE, MAX_HIT_PERMILLE);
    u32::try_from(permille).unwrap_or(1000)
}

fn crit_permille(cri: u64) -> u32 {
    u32::try_from(cri.min(1000)).unwrap_or(1000)
}

fn damage(atk: u64, def: u64, critical: bool) -> u64 {
    let base = atk.saturating_sub(def / 2).max(1);
    if critical {
        base.saturating_mul(3) / 2
    } else {
        base
    }
}
