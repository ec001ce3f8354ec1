//! # AC-02 Arena - Ranked Battle Subsystem
//!
//! **Subsystem ID:** 2
//!
//! ## Purpose
//!
//! Executes the arena actions of the game: registering avatars for a round
//! and resolving ticketed battles between them. Combines a ticket economy,
//! a banded rating engine, deterministic combat and reward distribution on
//! top of the copy-on-write world state of Subsystem 1.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Free tickets never exceed the interval allotment and never go negative | `domain/tickets.rs` - `TicketLedger::use_tickets()` |
//! | INVARIANT-2 | Purchases stay within season and interval caps | `domain/tickets.rs` - `TicketLedger::use_tickets()` |
//! | INVARIANT-3 | Scores never fall below the floor, for attacker and defender | `domain/rating.rs` - `RatingEngine::apply_outcome()` |
//! | INVARIANT-4 | Combat is a pure function of snapshots and the seeded stream | `domain/combat/mod.rs` - `CombatResolver::resolve()` |
//! | INVARIANT-5 | Rejected actions leave no trace in state | `service.rs` - `ArenaService::battle_arena()` |
//!
//! ## Outbound Dependencies
//!
//! | Subsystem | Trait | Purpose |
//! |-----------|-------|---------|
//! | 1 (World State) | `StateAccess` | Record and balance reads in every validation step |
//! | 1 (World State) | `StateTransition` | Implemented by `ArenaService` over `ActionContext` |
//! | Sheets | `SheetProvider` | Round schedule, rating bands, reward tables |
//!
//! ## Usage Example
//!
//! ```ignore
//! use ac_02_arena::prelude::*;
//!
//! let sheets = TableSheets::from_json(&fixture)?;
//! let service = ArenaService::new(ArenaConfig::default(), sheets);
//!
//! let context = ActionContext::new(state, agent, block_index, RandomSource::new(seed));
//! let outcome = service.execute(&ArenaAction::BattleArena(payload), &context)?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        ArenaInformation, ArenaParticipant, ArenaParticipants, ArenaRewardMail, ArenaRound,
        ArenaScore, AvatarState, Costume, Equipment, Inventory, MailBox, PriceStep,
        TicketPriceSchedule,
    };

    // Value objects
    pub use crate::domain::value_objects::{
        ArenaType, CostumeCategory, EquipmentCategory, ItemId, RuleVersion, RuneSlotInfo, Score,
        StatModifier, StatType, Stats, Uuid,
    };

    // Domain services
    pub use crate::domain::addresses::{
        arena_information_address, arena_participant_address, arena_participants_address,
        arena_pool_address, arena_score_address, purchased_count_during_interval_address,
        ARENA_ROOT,
    };
    pub use crate::domain::combat::{
        streams, BattleLog, BattleResult, CombatOutcome, CombatResolver, CombatSimulator,
        CombatSnapshot, Loadout, Side, TurnEvent,
    };
    pub use crate::domain::config::{ArenaConfig, GameConfig, ScoreWindow};
    pub use crate::domain::rating::{RatingEngine, ScoreDeltas, ScoreUpdate};
    pub use crate::domain::rewards::{RewardDistributor, RewardManifest};
    pub use crate::domain::sheets::{
        ArenaRewardRow, ArenaRow, CharacterRow, MaterialItemRow, RatingBandRow, RewardCountRow,
        RuneRow, Sheet, SheetRow,
    };
    pub use crate::domain::tickets::{TicketLedger, TicketUsage};

    // Errors
    pub use crate::errors::{ArenaError, ErrorStage};

    // Ports
    pub use crate::ports::inbound::{ArenaApi, ExecutionOutcome};
    pub use crate::ports::outbound::SheetProvider;

    // Adapters
    pub use crate::adapters::{SheetLoadError, TableSheets};

    // Events
    pub use crate::events::{ArenaAction, BattleArenaPayload, JoinArenaPayload};

    // Service
    pub use crate::service::ArenaService;

    // World state
    pub use ac_01_world_state::prelude::*;
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 2;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Arena";
