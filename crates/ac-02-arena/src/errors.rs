//! # Error Types
//!
//! Every arena validation failure, one variant per error kind.
//!
//! All errors are terminal and non-retryable: when one is returned the caller
//! discards the attempted transition. Identical `(state, action)` inputs always
//! yield the identical variant, so every validating node agrees on rejection.

use crate::domain::value_objects::{ArenaType, CostumeCategory, EquipmentCategory, ItemId, Score};
use ac_01_world_state::StateError;
use shared_types::{Address, BlockIndex};
use thiserror::Error;

// =============================================================================
// ERROR STAGE
// =============================================================================

/// Validation stage an error belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorStage {
    /// Payload decoding and structural checks.
    Payload,
    /// Address validity and registration.
    Address,
    /// Required state and sheet/config existence.
    State,
    /// Round window.
    Window,
    /// Ticket economy and balances.
    Economy,
    /// Rating fairness and progression gates.
    Fairness,
    /// Equipment, costume and rune loadout.
    Loadout,
}

// =============================================================================
// ARENA ERRORS
// =============================================================================

/// Errors returned by arena action execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArenaError {
    // --- Payload -------------------------------------------------------------
    /// Payload could not be decoded or failed structural checks.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    // --- Address -------------------------------------------------------------
    /// Self battle or malformed address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Avatar not registered for the round.
    #[error("{address:?} is not a participant of championship {championship_id} round {round}")]
    AddressNotFoundInArenaParticipants {
        address: Address,
        championship_id: u32,
        round: u32,
    },

    // --- State / config ------------------------------------------------------
    /// Required state record missing or not owned by the signer.
    #[error("failed to load state at {address:?}: {reason}")]
    FailedLoadState { address: Address, reason: String },

    /// Sheet row lookup failed.
    #[error("{sheet} row not found: {key}")]
    SheetRowNotFound { sheet: &'static str, key: String },

    /// Sheet row present but a column is missing or inconsistent.
    #[error("{sheet} column error: {reason}")]
    SheetRowColumn { sheet: &'static str, reason: String },

    /// Ticket record missing for a registered avatar.
    #[error("arena information not found at {0:?}")]
    ArenaInformationNotFound(Address),

    /// Score record missing for a registered avatar.
    #[error("arena score not found at {0:?}")]
    ArenaScoreNotFound(Address),

    /// Nobody has joined the round.
    #[error("arena participants not found for championship {championship_id} round {round}")]
    ArenaParticipantsNotFound { championship_id: u32, round: u32 },

    /// Medal item of a ranked round is not a known material.
    #[error("medal id {0} not found in material sheet")]
    MedalIdNotFound(u32),

    // --- Window --------------------------------------------------------------
    /// Block index outside the round window.
    #[error("championship {championship_id} round {round} is closed at block {block_index} (open {start}..={end})")]
    ThisArenaIsClosed {
        championship_id: u32,
        round: u32,
        block_index: BlockIndex,
        start: BlockIndex,
        end: BlockIndex,
    },

    /// Championship row has no such round.
    #[error("round {round} not found in championship {championship_id}")]
    RoundNotFound { championship_id: u32, round: u32 },

    /// Round row is malformed.
    #[error("invalid season for championship {championship_id} round {round}: {reason}")]
    InvalidSeason {
        championship_id: u32,
        round: u32,
        reason: String,
    },

    // --- Economy -------------------------------------------------------------
    /// Requested ticket count outside `1..=max`.
    #[error("requested {requested} tickets, allowed 1..={max}")]
    ExceedPlayCount { requested: u32, max: u32 },

    /// Season purchase cap reached.
    #[error("ticket purchase limit: purchased {purchased} + {requested} > {max}")]
    ExceedTicketPurchaseLimit { purchased: u32, requested: u32, max: u32 },

    /// Interval purchase cap reached.
    #[error("ticket purchase limit during interval: purchased {purchased} + {requested} > {max}")]
    ExceedTicketPurchaseLimitDuringInterval { purchased: u32, requested: u32, max: u32 },

    /// Too many tickets bought in a single action.
    #[error("cannot purchase {requested} tickets in one action (max {max})")]
    TicketPurchaseLimitExceed { requested: u32, max: u32 },

    /// Purchase attempted before the cooldown elapsed.
    #[error("cooldown: last purchase at {last}, now {current}, cooldown {cooldown} blocks")]
    CoolDownBlock {
        last: BlockIndex,
        current: BlockIndex,
        cooldown: u64,
    },

    /// Balance cannot cover a payment.
    #[error("insufficient balance at {address:?}: required {required} {ticker}, available {available}")]
    InsufficientBalance {
        address: Address,
        ticker: String,
        required: u128,
        available: u128,
    },

    // --- Fairness / progression ----------------------------------------------
    /// Rating gap outside the allowed window.
    #[error("score difference out of range in {arena_type} round: my {my_score}, enemy {enemy_score}")]
    ValidateScoreDifference {
        arena_type: ArenaType,
        my_score: Score,
        enemy_score: Score,
    },

    /// Avatar has not cleared enough stages to enter the arena.
    #[error("cleared stage {cleared} < required {required}")]
    NotEnoughClearedStageLevel { required: u32, cleared: u32 },

    /// Avatar does not hold enough season medals to join.
    #[error("medals {owned} < required {required}")]
    NotEnoughMedal { required: u32, owned: u32 },

    // --- Loadout -------------------------------------------------------------
    /// Same item twice, or more items than a category has slots.
    #[error("duplicate equipment {item_id} in {category}")]
    DuplicateEquipment {
        item_id: ItemId,
        category: EquipmentCategory,
    },

    /// Two costumes of one category.
    #[error("duplicate costume category {0}")]
    DuplicateCostume(CostumeCategory),

    /// Item not in the avatar's inventory.
    #[error("item {0} does not exist in inventory")]
    ItemDoesNotExist(ItemId),

    /// Same rune in two slots.
    #[error("duplicated rune id {0}")]
    DuplicatedRuneId(u32),

    /// Two runes in one slot.
    #[error("duplicated rune slot index {0}")]
    DuplicatedRuneSlotIndex(u32),

    /// Rune not owned or unknown.
    #[error("rune {0} not found")]
    RuneNotFound(u32),

    /// Item still locked.
    #[error("item {item_id} locked until block {required} (now {current})")]
    RequiredBlockIndex {
        item_id: ItemId,
        required: BlockIndex,
        current: BlockIndex,
    },

    /// Equipment or rune slot not unlocked yet.
    #[error("slot {slot} locked: requires {requirement}")]
    EquipmentSlotUnlock { slot: String, requirement: String },

    // --- Infrastructure ------------------------------------------------------
    /// World-state failure other than balances and decoding.
    #[error("state error: {0}")]
    State(StateError),
}

impl ArenaError {
    /// Validation stage this error belongs to.
    #[must_use]
    pub fn stage(&self) -> ErrorStage {
        match self {
            Self::InvalidPayload(_) => ErrorStage::Payload,
            Self::InvalidAddress(_) | Self::AddressNotFoundInArenaParticipants { .. } => {
                ErrorStage::Address
            }
            Self::FailedLoadState { .. }
            | Self::SheetRowNotFound { .. }
            | Self::SheetRowColumn { .. }
            | Self::ArenaInformationNotFound(_)
            | Self::ArenaScoreNotFound(_)
            | Self::ArenaParticipantsNotFound { .. }
            | Self::MedalIdNotFound(_)
            | Self::State(_) => ErrorStage::State,
            Self::ThisArenaIsClosed { .. }
            | Self::RoundNotFound { .. }
            | Self::InvalidSeason { .. } => ErrorStage::Window,
            Self::ExceedPlayCount { .. }
            | Self::ExceedTicketPurchaseLimit { .. }
            | Self::ExceedTicketPurchaseLimitDuringInterval { .. }
            | Self::TicketPurchaseLimitExceed { .. }
            | Self::CoolDownBlock { .. }
            | Self::InsufficientBalance { .. } => ErrorStage::Economy,
            Self::ValidateScoreDifference { .. }
            | Self::NotEnoughClearedStageLevel { .. }
            | Self::NotEnoughMedal { .. } => ErrorStage::Fairness,
            Self::DuplicateEquipment { .. }
            | Self::DuplicateCostume(_)
            | Self::ItemDoesNotExist(_)
            | Self::DuplicatedRuneId(_)
            | Self::DuplicatedRuneSlotIndex(_)
            | Self::RuneNotFound(_)
            | Self::RequiredBlockIndex { .. }
            | Self::EquipmentSlotUnlock { .. } => ErrorStage::Loadout,
        }
    }

    /// Stable kind name, used in logs and compatibility assertions.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidPayload(_) => "InvalidPayload",
            Self::InvalidAddress(_) => "InvalidAddress",
            Self::AddressNotFoundInArenaParticipants { .. } => "AddressNotFoundInArenaParticipants",
            Self::FailedLoadState { .. } => "FailedLoadState",
            Self::SheetRowNotFound { .. } => "SheetRowNotFound",
            Self::SheetRowColumn { .. } => "SheetRowColumn",
            Self::ArenaInformationNotFound(_) => "ArenaInformationNotFound",
            Self::ArenaScoreNotFound(_) => "ArenaScoreNotFound",
            Self::ArenaParticipantsNotFound { .. } => "ArenaParticipantsNotFound",
            Self::MedalIdNotFound(_) => "MedalIdNotFound",
            Self::ThisArenaIsClosed { .. } => "ThisArenaIsClosed",
            Self::RoundNotFound { .. } => "RoundNotFound",
            Self::InvalidSeason { .. } => "InvalidSeason",
            Self::ExceedPlayCount { .. } => "ExceedPlayCount",
            Self::ExceedTicketPurchaseLimit { .. } => "ExceedTicketPurchaseLimit",
            Self::ExceedTicketPurchaseLimitDuringInterval { .. } => {
                "ExceedTicketPurchaseLimitDuringInterval"
            }
            Self::TicketPurchaseLimitExceed { .. } => "TicketPurchaseLimitExceed",
            Self::CoolDownBlock { .. } => "CoolDownBlock",
            Self::InsufficientBalance { .. } => "InsufficientBalance",
            Self::ValidateScoreDifference { .. } => "ValidateScoreDifference",
            Self::NotEnoughClearedStageLevel { .. } => "NotEnoughClearedStageLevel",
            Self::NotEnoughMedal { .. } => "NotEnoughMedal",
            Self::DuplicateEquipment { .. } => "DuplicateEquipment",
            Self::DuplicateCostume(_) => "DuplicateCostume",
            Self::ItemDoesNotExist(_) => "ItemDoesNotExist",
            Self::DuplicatedRuneId(_) => "DuplicatedRuneId",
            Self::DuplicatedRuneSlotIndex(_) => "DuplicatedRuneSlotIndex",
            Self::RuneNotFound(_) => "RuneNotFound",
            Self::RequiredBlockIndex { .. } => "RequiredBlockIndex",
            Self::EquipmentSlotUnlock { .. } => "EquipmentSlotUnlock",
            Self::State(_) => "State",
        }
    }
}

impl From<StateError> for ArenaError {
    fn from(err: StateError) -> Self {
        match err {
            StateError::InsufficientBalance {
                address,
                ticker,
                required,
                available,
            } => Self::InsufficientBalance {
                address,
                ticker,
                required,
                available,
            },
            StateError::Decode { address, reason } => Self::FailedLoadState { address, reason },
            other => Self::State(other),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
