//! # Arena Service
//!
//! Executes arena actions against an [`ActionContext`].
//!
//! ## Battle Validation Order
//!
//! | Step | Check | Errors |
//! |------|-------|--------|
//! | 1 | Address validity | `InvalidAddress` |
//! | 2 | Required state | `FailedLoadState`, `NotEnoughClearedStageLevel` |
//! | 3 | Sheets | `SheetRowNotFound` |
//! | 4 | Round window | `RoundNotFound`, `InvalidSeason`, `ThisArenaIsClosed` |
//! | 5 | Registration | `ArenaParticipantsNotFound` .. `FailedLoadState` |
//! | 6 | Rating gap | `ValidateScoreDifference`, `SheetRowColumn` |
//! | 7 | Ticket economy | `ExceedPlayCount` .. `InsufficientBalance` |
//! | 8 | Loadout | `ItemDoesNotExist` .. `RuneNotFound` |
//! | 9 | Combat and rewards | `MedalIdNotFound` |
//! | 10 | Commit | |
//!
//! Rehearsals stop after step 8 and commit only the ticket economy.
//!
//! ## Atomicity
//!
//! Reads go through [`StateAccess`]. Every write goes to a local successor of
//! `context.previous_state`, returned only on success, so a rejected action
//! leaves no trace.

use crate::domain::addresses::{
    arena_information_address, arena_participant_address, arena_participants_address,
    arena_pool_address, arena_score_address, purchased_count_during_interval_address,
};
use crate::domain::combat::{
    streams, validate_loadout, CombatOutcome, CombatResolver, CombatSnapshot, LoadoutRequest,
};
use crate::domain::config::ArenaConfig;
use crate::domain::entities::{
    ArenaInformation, ArenaParticipant, ArenaParticipants, ArenaRewardMail, ArenaRound, ArenaScore,
    AvatarState,
};
use crate::domain::invariants::{check_all_invariants, InvariantInputs};
use crate::domain::rating::{RatingEngine, ScoreUpdate};
use crate::domain::rewards::RewardDistributor;
use crate::domain::sheets::{ArenaRow, CharacterRow};
use crate::domain::tickets::{TicketLedger, TicketUsage};
use crate::domain::value_objects::{RuleVersion, Uuid};
use crate::errors::ArenaError;
use crate::events::{ArenaAction, BattleArenaPayload, JoinArenaPayload};
use crate::ports::inbound::{ArenaApi, ExecutionOutcome};
use crate::ports::outbound::SheetProvider;

use ac_01_world_state::{ActionContext, StateAccess, StateTransition, WorldState};
use shared_types::{Address, BlockIndex, Currency};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument, warn};

/// The arena action executor.
#[derive(Clone, Debug)]
pub struct ArenaService<P: SheetProvider> {
    config: ArenaConfig,
    sheets: P,
}

/// Sheet rows an action runs against.
struct RoundSheets<'s> {
    row: &'s ArenaRow,
    character: &'s CharacterRow,
    round: &'s ArenaRound,
}

/// Records a battle reads at registration, before anything is simulated.
struct BattleRecords {
    my_score: ArenaScore,
    enemy_score: ArenaScore,
    information: ArenaInformation,
    purchased_during_interval: u32,
    my_participant: ArenaParticipant,
    enemy_participant: ArenaParticipant,
}

/// Record addresses of one battle.
struct BattleAddresses {
    my_score: Address,
    enemy_score: Address,
    information: Address,
    interval: Address,
    my_participant: Address,
    enemy_participant: Address,
    pool: Address,
}

impl BattleAddresses {
    fn new(me: Address, enemy: Address, championship_id: u32, round: u32) -> Self {
        let information = arena_information_address(me, championship_id, round);
        Self {
            my_score: arena_score_address(me, championship_id, round),
            enemy_score: arena_score_address(enemy, championship_id, round),
            information,
            interval: purchased_count_during_interval_address(information),
            my_participant: arena_participant_address(me, championship_id, round),
            enemy_participant: arena_participant_address(enemy, championship_id, round),
            pool: arena_pool_address(championship_id, round),
        }
    }
}

impl<P: SheetProvider> ArenaService<P> {
    /// Creates a service over `sheets`.
    pub fn new(config: ArenaConfig, sheets: P) -> Self {
        Self { config, sheets }
    }

    /// Service configuration.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Sheet provider.
    pub fn sheets(&self) -> &P {
        &self.sheets
    }

    /// Decodes an encoded action and executes it.
    ///
    /// # Errors
    /// [`ArenaError::InvalidPayload`] for undecodable input, otherwise as
    /// [`StateTransition::execute`].
    pub fn execute_encoded(
        &self,
        bytes: &[u8],
        context: &ActionContext,
    ) -> Result<ExecutionOutcome, ArenaError> {
        let action = ArenaAction::decode(bytes)?;
        self.execute(&action, context)
    }

    // =========================================================================
    // SHARED VALIDATION STEPS
    // =========================================================================

    fn load_avatar<S: StateAccess>(
        &self,
        state: &S,
        avatar_address: Address,
        signer: Address,
    ) -> Result<AvatarState, ArenaError> {
        let avatar: AvatarState =
            state
                .get_typed(&avatar_address)?
                .ok_or_else(|| ArenaError::FailedLoadState {
                    address: avatar_address,
                    reason: "avatar state not found".into(),
                })?;
        if avatar.agent_address != signer {
            return Err(ArenaError::FailedLoadState {
                address: avatar_address,
                reason: format!("avatar is not owned by {signer}"),
            });
        }
        let required = self.config.game.required_cleared_stage;
        if avatar.cleared_stage < required {
            return Err(ArenaError::NotEnoughClearedStageLevel {
                required,
                cleared: avatar.cleared_stage,
            });
        }
        Ok(avatar)
    }

    /// Steps 3 and 4: championship row, character row, open round.
    fn load_round(
        &self,
        championship_id: u32,
        round: u32,
        block_index: BlockIndex,
    ) -> Result<RoundSheets<'_>, ArenaError> {
        let row = self.sheets.arena().try_get_value(&championship_id)?;
        let character = self
            .sheets
            .characters()
            .try_get_value(&self.config.game.player_character_id)?;

        let arena_round = row.round(round).ok_or(ArenaError::RoundNotFound {
            championship_id,
            round,
        })?;
        arena_round
            .validate()
            .map_err(|reason| ArenaError::InvalidSeason {
                championship_id,
                round,
                reason,
            })?;
        if !arena_round.is_the_round_opened(block_index) {
            return Err(ArenaError::ThisArenaIsClosed {
                championship_id,
                round,
                block_index,
                start: arena_round.start_block_index,
                end: arena_round.end_block_index,
            });
        }
        Ok(RoundSheets {
            row,
            character,
            round: arena_round,
        })
    }

    fn load_participant<S: StateAccess>(
        state: &S,
        address: Address,
    ) -> Result<ArenaParticipant, ArenaError> {
        state
            .get_typed(&address)?
            .ok_or_else(|| ArenaError::FailedLoadState {
                address,
                reason: "participant record not found".into(),
            })
    }

    /// Step 5: both avatars registered, every record they battle with present.
    fn load_records<S: StateAccess>(
        state: &S,
        payload: &BattleArenaPayload,
        addresses: &BattleAddresses,
    ) -> Result<BattleRecords, ArenaError> {
        let (championship_id, round) = (payload.championship_id, payload.round);
        let participants: ArenaParticipants = state
            .get_typed(&arena_participants_address(championship_id, round))?
            .ok_or(ArenaError::ArenaParticipantsNotFound {
                championship_id,
                round,
            })?;
        for address in [payload.avatar_address, payload.enemy_avatar_address] {
            if !participants.contains(&address) {
                return Err(ArenaError::AddressNotFoundInArenaParticipants {
                    address,
                    championship_id,
                    round,
                });
            }
        }

        let my_score: ArenaScore = state
            .get_typed(&addresses.my_score)?
            .ok_or(ArenaError::ArenaScoreNotFound(addresses.my_score))?;
        let enemy_score: ArenaScore = state
            .get_typed(&addresses.enemy_score)?
            .ok_or(ArenaError::ArenaScoreNotFound(addresses.enemy_score))?;
        let information: ArenaInformation = state
            .get_typed(&addresses.information)?
            .ok_or(ArenaError::ArenaInformationNotFound(addresses.information))?;
        let purchased_during_interval = state.get_typed(&addresses.interval)?.unwrap_or(0);

        Ok(BattleRecords {
            my_score,
            enemy_score,
            information,
            purchased_during_interval,
            my_participant: Self::load_participant(state, addresses.my_participant)?,
            enemy_participant: Self::load_participant(state, addresses.enemy_participant)?,
        })
    }

    /// Step 6: rating gap inside the window and covered by a band.
    fn check_fairness(
        &self,
        round: &ArenaRound,
        records: &BattleRecords,
    ) -> Result<(), ArenaError> {
        let rating = RatingEngine::new(&self.config.game, self.sheets.rating_bands());
        let (mine, theirs) = (records.my_score.score, records.enemy_score.score);
        rating.validate_score_difference(round.arena_type, mine, theirs)?;
        rating.score_deltas(mine, theirs)?;
        Ok(())
    }

    /// Step 7: free tickets first, then priced purchases the agent can pay.
    fn settle_tickets<S: StateAccess>(
        &self,
        state: &S,
        records: &BattleRecords,
        round: &ArenaRound,
        context: &ActionContext,
        ticket: u32,
    ) -> Result<TicketUsage, ArenaError> {
        let usage = TicketLedger::new(&self.config.game).use_tickets(
            records.information.clone(),
            records.purchased_during_interval,
            round,
            context.block_index,
            ticket,
        )?;
        if usage.cost > 0 {
            Self::require_balance(state, context.signer, &self.config.gold, usage.cost)?;
        }
        Ok(usage)
    }

    /// Writes the ticket economy of a battle: payment, info record and the
    /// interval purchase counter.
    fn commit_economy(
        &self,
        state: WorldState,
        context: &ActionContext,
        addresses: &BattleAddresses,
        usage: &TicketUsage,
        information: &ArenaInformation,
    ) -> Result<WorldState, ArenaError> {
        Ok(state
            .transfer_asset(context.signer, addresses.pool, &self.config.gold.raw(usage.cost))?
            .set_typed(addresses.information, information)?
            .set_typed(addresses.interval, &usage.purchased_during_interval)?)
    }

    /// Step 9: one simulation per ticket, rewards for the wins, new scores.
    fn fight(
        &self,
        payload: &BattleArenaPayload,
        context: &ActionContext,
        sheets: &RoundSheets<'_>,
        records: &BattleRecords,
        my_snapshot: &CombatSnapshot,
        avatar_level: u32,
    ) -> Result<(CombatOutcome, ScoreUpdate), ArenaError> {
        let resolver = CombatResolver::new(self.config.game.max_turns);
        let logs = resolver.resolve(
            my_snapshot,
            &records.enemy_participant.snapshot,
            &context.random,
            payload.ticket,
        );
        let wins =
            u32::try_from(logs.iter().filter(|log| log.is_win()).count()).unwrap_or(u32::MAX);
        let losses = payload.ticket - wins;

        let rewards = RewardDistributor::new(
            self.sheets.rewards(),
            self.sheets.reward_counts(),
            self.sheets.materials(),
        )
        .distribute(
            sheets.round,
            payload.version,
            avatar_level,
            records.my_score.score,
            wins,
            &context.random,
        )?;

        let scores = RatingEngine::new(&self.config.game, self.sheets.rating_bands()).settle(
            records.my_score.score,
            records.enemy_score.score,
            wins,
            losses,
        )?;

        Ok((
            CombatOutcome {
                wins,
                losses,
                logs,
                rewards,
            },
            scores,
        ))
    }

    /// Medals of every ranked round of the championship held by `avatar`.
    fn owned_medals(row: &ArenaRow, avatar: &AvatarState, version: RuleVersion) -> u64 {
        row.rounds
            .iter()
            .filter(|r| r.arena_type.is_ranked())
            .map(|r| version.medal_id(r.championship_id, r.round, r.medal_id))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|medal_id| avatar.inventory.material_count(medal_id))
            .sum()
    }

    fn require_balance<S: StateAccess>(
        state: &S,
        address: Address,
        currency: &Currency,
        required: u128,
    ) -> Result<(), ArenaError> {
        let available = state.get_balance(&address, currency).raw;
        if available < required {
            return Err(ArenaError::InsufficientBalance {
                address,
                ticker: currency.ticker.clone(),
                required,
                available,
            });
        }
        Ok(())
    }

    fn mail_id(context: &ActionContext) -> Uuid {
        let mut rng = context.random.fork(streams::MAIL, 0);
        let high = u128::from(rng.next_u64());
        let low = u128::from(rng.next_u64());
        Uuid::from_u128((high << 64) | low)
    }
}

// =============================================================================
// ARENA API
// =============================================================================

impl<P: SheetProvider> ArenaApi for ArenaService<P> {
    #[instrument(
        skip(self, payload, context),
        fields(
            avatar = %payload.avatar_address,
            championship = payload.championship_id,
            round = payload.round,
            block = context.block_index,
        )
    )]
    fn join_arena(
        &self,
        payload: &JoinArenaPayload,
        context: &ActionContext,
    ) -> Result<ExecutionOutcome, ArenaError> {
        let game = &self.config.game;
        let state = &context.previous_state;
        let avatar_address = payload.avatar_address;
        let (championship_id, round_id) = (payload.championship_id, payload.round);

        // 1. address
        if avatar_address.is_zero() {
            return Err(ArenaError::InvalidAddress("zero avatar address".into()));
        }

        // 2. required state
        let avatar = self.load_avatar(state, avatar_address, context.signer)?;

        // 3-4. sheets and round window
        let sheets = self.load_round(championship_id, round_id, context.block_index)?;
        let round = sheets.round;

        // 5. medals
        if round.required_medal_count > 0 {
            let owned = Self::owned_medals(sheets.row, &avatar, payload.version);
            if owned < u64::from(round.required_medal_count) {
                return Err(ArenaError::NotEnoughMedal {
                    required: round.required_medal_count,
                    owned: u32::try_from(owned).unwrap_or(u32::MAX),
                });
            }
        }

        let participants_address = arena_participants_address(championship_id, round_id);
        let mut participants: ArenaParticipants = state
            .get_typed(&participants_address)?
            .unwrap_or_else(|| ArenaParticipants::new(championship_id, round_id));
        let rejoin = participants.contains(&avatar_address);

        // 6. entrance fee
        let pool = arena_pool_address(championship_id, round_id);
        if !rejoin && round.entrance_fee > 0 {
            Self::require_balance(state, context.signer, &self.config.crystal, round.entrance_fee)?;
        }

        // 7. loadout
        let loadout = validate_loadout(
            &avatar,
            LoadoutRequest {
                equipments: &payload.equipments,
                costumes: &payload.costumes,
                rune_infos: &payload.rune_infos,
            },
            game,
            self.sheets.runes(),
            context.block_index,
        )?;
        let snapshot = CombatSnapshot::build(sheets.character, avatar.level, &loadout);

        // 8. commit
        let participant_address =
            arena_participant_address(avatar_address, championship_id, round_id);
        let mut next = state.clone();

        let participant = if rejoin {
            let mut existing = Self::load_participant(state, participant_address)?;
            existing.name.clone_from(&avatar.name);
            existing.level = avatar.level;
            existing.portrait_id = avatar.portrait_id;
            existing.snapshot = snapshot;
            existing.synced_block_index = context.block_index;
            debug!("already joined, refreshed participant record");
            existing
        } else {
            let information =
                TicketLedger::new(game).join(avatar_address, round, context.block_index);
            next = next
                .transfer_asset(
                    context.signer,
                    pool,
                    &self.config.crystal.raw(round.entrance_fee),
                )?
                .set_typed(
                    arena_information_address(avatar_address, championship_id, round_id),
                    &information,
                )?
                .set_typed(
                    arena_score_address(avatar_address, championship_id, round_id),
                    &ArenaScore::new(avatar_address, game.default_score),
                )?;
            participants.add(avatar_address);
            next = next.set_typed(participants_address, &participants)?;
            ArenaParticipant {
                avatar_address,
                agent_address: context.signer,
                name: avatar.name.clone(),
                level: avatar.level,
                portrait_id: avatar.portrait_id,
                score: game.default_score,
                win: 0,
                lose: 0,
                snapshot,
                synced_block_index: context.block_index,
            }
        };
        next = next.set_typed(participant_address, &participant)?;

        info!(
            rejoin,
            participants = participants.len(),
            fee = if rejoin { 0 } else { round.entrance_fee },
            "joined arena"
        );

        Ok(ExecutionOutcome {
            state: next,
            battle: None,
        })
    }

    #[instrument(
        skip(self, payload, context),
        fields(
            avatar = %payload.avatar_address,
            enemy = %payload.enemy_avatar_address,
            championship = payload.championship_id,
            round = payload.round,
            ticket = payload.ticket,
            block = context.block_index,
        )
    )]
    fn battle_arena(
        &self,
        payload: &BattleArenaPayload,
        context: &ActionContext,
    ) -> Result<ExecutionOutcome, ArenaError> {
        let state = &context.previous_state;
        let (me, enemy) = (payload.avatar_address, payload.enemy_avatar_address);

        // 1. address
        if me == enemy {
            return Err(ArenaError::InvalidAddress(format!("{me} cannot battle itself")));
        }
        if me.is_zero() || enemy.is_zero() {
            return Err(ArenaError::InvalidAddress("zero avatar address".into()));
        }

        // 2. required state
        let mut avatar = self.load_avatar(state, me, context.signer)?;

        // 3-4. sheets and round window
        let sheets = self.load_round(payload.championship_id, payload.round, context.block_index)?;

        // 5. registration
        let addresses = BattleAddresses::new(me, enemy, payload.championship_id, payload.round);
        let mut records = Self::load_records(state, payload, &addresses)?;

        // 6. rating gap
        self.check_fairness(sheets.round, &records)?;

        // 7. ticket economy
        let usage = self.settle_tickets(state, &records, sheets.round, context, payload.ticket)?;

        // 8. loadout
        let loadout = validate_loadout(
            &avatar,
            LoadoutRequest {
                equipments: &payload.equipments,
                costumes: &payload.costumes,
                rune_infos: &payload.rune_infos,
            },
            &self.config.game,
            self.sheets.runes(),
            context.block_index,
        )?;
        let my_snapshot = CombatSnapshot::build(sheets.character, avatar.level, &loadout);

        if context.rehearsal {
            let information = &usage.information;
            let next =
                self.commit_economy(state.clone(), context, &addresses, &usage, information)?;
            debug!(cost = usage.cost, "rehearsal: ticket economy committed");
            return Ok(ExecutionOutcome {
                state: next,
                battle: None,
            });
        }

        // 9. combat and rewards
        let (outcome, scores) =
            self.fight(payload, context, &sheets, &records, &my_snapshot, avatar.level)?;

        // 10. commit
        let information = TicketLedger::new(&self.config.game).record_results(
            usage.information.clone(),
            outcome.wins,
            outcome.losses,
        );
        debug_assert!(check_all_invariants(
            &InvariantInputs {
                information: &information,
                purchased_during_interval: usage.purchased_during_interval,
                round: sheets.round,
                my_score: scores.my_after,
                enemy_score: scores.enemy_after,
                outcome: Some(&outcome),
                tickets: payload.ticket,
                reward_count: RewardDistributor::new(
                    self.sheets.rewards(),
                    self.sheets.reward_counts(),
                    self.sheets.materials(),
                )
                .reward_count(scores.my_before),
            },
            &self.config.game,
        )
        .is_valid());

        let mine = &mut records.my_participant;
        mine.score = scores.my_after;
        mine.win = mine.win.saturating_add(outcome.wins);
        mine.lose = mine.lose.saturating_add(outcome.losses);
        mine.level = avatar.level;
        mine.snapshot = my_snapshot;
        mine.synced_block_index = context.block_index;
        records.enemy_participant.score = scores.enemy_after;

        let items = outcome.rewards.items();
        if !items.is_empty() {
            for (id, count) in &items {
                avatar.inventory.add_material(*id, *count);
            }
            avatar.mail_box.push_trimmed(
                ArenaRewardMail {
                    id: Self::mail_id(context),
                    block_index: context.block_index,
                    championship_id: payload.championship_id,
                    round: payload.round,
                    items,
                },
                self.config.game.mail_box_capacity,
            );
        }

        let next = self
            .commit_economy(state.clone(), context, &addresses, &usage, &information)?
            .set_typed(addresses.my_score, &ArenaScore::new(me, scores.my_after))?
            .set_typed(addresses.enemy_score, &ArenaScore::new(enemy, scores.enemy_after))?
            .set_typed(addresses.my_participant, &records.my_participant)?
            .set_typed(addresses.enemy_participant, &records.enemy_participant)?
            .set_typed(me, &avatar)?;

        info!(
            wins = outcome.wins,
            losses = outcome.losses,
            played = usage.played(),
            purchased = usage.purchased,
            cost = usage.cost,
            score_before = scores.my_before,
            score_after = scores.my_after,
            enemy_score_after = scores.enemy_after,
            "arena battle resolved"
        );

        Ok(ExecutionOutcome {
            state: next,
            battle: Some(outcome),
        })
    }
}

// =============================================================================
// STATE TRANSITION
// =============================================================================

impl<P: SheetProvider> StateTransition<ArenaAction> for ArenaService<P> {
    type Output = ExecutionOutcome;
    type Error = ArenaError;

    fn execute(
        &self,
        action: &ArenaAction,
        context: &ActionContext,
    ) -> Result<ExecutionOutcome, ArenaError> {
        action.validate_structure()?;
        let result = match action {
            ArenaAction::JoinArena(payload) => self.join_arena(payload, context),
            ArenaAction::BattleArena(payload) => self.battle_arena(payload, context),
        };
        result.inspect_err(|err| {
            warn!(
                action = action.name(),
                avatar = %action.avatar_address(),
                kind = err.kind(),
                stage = ?err.stage(),
                "arena action rejected"
            );
        })
    }
}
