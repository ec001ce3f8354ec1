//! # Domain Invariants
//!
//! Properties every committed arena transition must satisfy. The executor
//! checks them in debug builds after each battle; tests check them directly.

use super::combat::CombatOutcome;
use super::config::GameConfig;
use super::entities::{ArenaInformation, ArenaRound};
use super::value_objects::Score;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// INVARIANT-1: Free tickets never exceed the per-interval allotment.
#[must_use]
pub fn check_ticket_invariant(information: &ArenaInformation, config: &GameConfig) -> bool {
    information.ticket <= config.arena_ticket_max
}

/// INVARIANT-2: Purchases stay within the season and interval caps.
#[must_use]
pub fn check_purchase_cap_invariant(
    information: &ArenaInformation,
    purchased_during_interval: u32,
    round: &ArenaRound,
) -> bool {
    information.purchased_ticket_count <= round.max_purchase_count
        && purchased_during_interval <= round.max_purchase_count_during_interval
}

/// INVARIANT-3: Scores never fall below the floor.
#[must_use]
pub fn check_score_floor_invariant(score: Score, config: &GameConfig) -> bool {
    score >= config.score_floor
}

/// INVARIANT-4: One simulation per ticket, rewards within budget.
#[must_use]
pub fn check_outcome_invariant(outcome: &CombatOutcome, tickets: u32, reward_count: u32) -> bool {
    let played = u64::from(outcome.wins) + u64::from(outcome.losses);
    played == u64::from(tickets)
        && outcome.logs.len() as u64 == played
        && outcome.rewards.total_materials() <= u64::from(reward_count) * u64::from(tickets)
}

/// Inputs of [`check_all_invariants`].
#[derive(Clone, Copy, Debug)]
pub struct InvariantInputs<'a> {
    pub information: &'a ArenaInformation,
    pub purchased_during_interval: u32,
    pub round: &'a ArenaRound,
    pub my_score: Score,
    pub enemy_score: Score,
    pub outcome: Option<&'a CombatOutcome>,
    pub tickets: u32,
    pub reward_count: u32,
}

/// Check all invariants at once.
#[must_use]
pub fn check_all_invariants(
    inputs: &InvariantInputs<'_>,
    config: &GameConfig,
) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_ticket_invariant(inputs.information, config) {
        violations.push(InvariantViolation::TicketOverflow {
            ticket: inputs.information.ticket,
            max: config.arena_ticket_max,
        });
    }

    if !check_purchase_cap_invariant(
        inputs.information,
        inputs.purchased_during_interval,
        inputs.round,
    ) {
        violations.push(InvariantViolation::PurchaseCapExceeded {
            season: inputs.information.purchased_ticket_count,
            interval: inputs.purchased_during_interval,
        });
    }

    for score in [inputs.my_score, inputs.enemy_score] {
        if !check_score_floor_invariant(score, config) {
            violations.push(InvariantViolation::ScoreBelowFloor {
                score,
                floor: config.score_floor,
            });
        }
    }

    if let Some(outcome) = inputs.outcome {
        if !check_outcome_invariant(outcome, inputs.tickets, inputs.reward_count) {
            violations.push(InvariantViolation::OutcomeMismatch {
                tickets: inputs.tickets,
                wins: outcome.wins,
                losses: outcome.losses,
            });
        }
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    TicketOverflow { ticket: u32, max: u32 },
    PurchaseCapExceeded { season: u32, interval: u32 },
    ScoreBelowFloor { score: Score, floor: Score },
    OutcomeMismatch { tickets: u32, wins: u32, losses: u32 },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TicketOverflow { ticket, max } => write!(f, "ticket {ticket} > max {max}"),
            Self::PurchaseCapExceeded { season, interval } => {
                write!(f, "purchase cap exceeded: season {season}, interval {interval}")
            }
            Self::ScoreBelowFloor { score, floor } => write!(f, "score {score} < floor {floor}"),
            Self::OutcomeMismatch {
                tickets,
                wins,
                losses,
            } => write!(f, "{wins} wins + {losses} losses != {tickets} tickets"),
        }
    }
}
