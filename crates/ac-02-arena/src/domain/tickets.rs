//! # Ticket Ledger
//!
//! Per (avatar, round) ticket state machine:
//!
//! ```text
//! NotJoined --join--> Active(ticket = max, purchased = 0)
//! Active --use_tickets(n)--> Active(ticket -= min(ticket, n), purchased += shortfall)
//! Active --interval elapses--> Active(ticket = max, interval purchases = 0)
//! ```
//!
//! The season purchased count survives interval resets. All functions are
//! pure: they take a record and return its successor. Balance checks and the
//! payment itself happen in the executor, which owns the world state.

use super::config::GameConfig;
use super::entities::{ArenaInformation, ArenaRound};
use crate::errors::ArenaError;
use shared_types::{Address, BlockIndex};
use tracing::debug;

/// Result of consuming tickets for one battle action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TicketUsage {
    /// Successor ticket record.
    pub information: ArenaInformation,
    /// Successor interval purchase count.
    pub purchased_during_interval: u32,
    /// Tickets taken from the free pool.
    pub used_free: u32,
    /// Tickets bought.
    pub purchased: u32,
    /// Price of the bought tickets in raw gold units.
    pub cost: u128,
}

impl TicketUsage {
    /// Total tickets played.
    #[must_use]
    pub fn played(&self) -> u32 {
        self.used_free + self.purchased
    }
}

/// Ticket rules bound to a game configuration.
#[derive(Clone, Copy, Debug)]
pub struct TicketLedger<'a> {
    config: &'a GameConfig,
}

impl<'a> TicketLedger<'a> {
    /// Creates a ledger for `config`.
    #[must_use]
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    /// Fresh ticket record granting the full free allotment.
    #[must_use]
    pub fn join(
        &self,
        avatar: Address,
        round: &ArenaRound,
        block_index: BlockIndex,
    ) -> ArenaInformation {
        let mut information = ArenaInformation::new(
            avatar,
            round.championship_id,
            round.round,
            self.config.arena_ticket_max,
        );
        information.ticket_reset_count = self.current_reset_count(round, block_index);
        information
    }

    /// Interval index of `block_index` inside the round.
    #[must_use]
    pub fn current_reset_count(&self, round: &ArenaRound, block_index: BlockIndex) -> u64 {
        if self.config.daily_arena_interval == 0 {
            return 0;
        }
        block_index.saturating_sub(round.start_block_index) / self.config.daily_arena_interval
    }

    /// Refills the free pool and clears the interval counter when a new
    /// interval started since the last refill.
    #[must_use]
    pub fn refresh(
        &self,
        mut information: ArenaInformation,
        purchased_during_interval: u32,
        round: &ArenaRound,
        block_index: BlockIndex,
    ) -> (ArenaInformation, u32) {
        let reset_count = self.current_reset_count(round, block_index);
        if reset_count > information.ticket_reset_count {
            debug!(
                avatar = %information.avatar_address,
                from = information.ticket_reset_count,
                to = reset_count,
                "ticket interval reset"
            );
            information.ticket = self.config.arena_ticket_max;
            information.ticket_reset_count = reset_count;
            return (information, 0);
        }
        (information, purchased_during_interval)
    }

    /// Consumes `requested` tickets, buying any shortfall.
    ///
    /// The record is refreshed for `block_index` first.
    ///
    /// # Errors
    /// In check order: [`ArenaError::ExceedPlayCount`],
    /// [`ArenaError::TicketPurchaseLimitExceed`],
    /// [`ArenaError::ExceedTicketPurchaseLimit`],
    /// [`ArenaError::ExceedTicketPurchaseLimitDuringInterval`],
    /// [`ArenaError::CoolDownBlock`]; a price curve that does not cover the
    /// purchase yields [`ArenaError::SheetRowColumn`].
    pub fn use_tickets(
        &self,
        information: ArenaInformation,
        purchased_during_interval: u32,
        round: &ArenaRound,
        block_index: BlockIndex,
        requested: u32,
    ) -> Result<TicketUsage, ArenaError> {
        if requested == 0 || requested > self.config.max_play_count {
            return Err(ArenaError::ExceedPlayCount {
                requested,
                max: self.config.max_play_count,
            });
        }

        let (mut information, mut interval) =
            self.refresh(information, purchased_during_interval, round, block_index);

        let used_free = information.ticket.min(requested);
        let shortfall = requested - used_free;
        let mut cost = 0;

        if shortfall > 0 {
            let per_call = self.config.purchase_per_call(round.arena_type);
            if shortfall > per_call {
                return Err(ArenaError::TicketPurchaseLimitExceed {
                    requested: shortfall,
                    max: per_call,
                });
            }

            let season_total = information.purchased_ticket_count.saturating_add(shortfall);
            if season_total > round.max_purchase_count {
                return Err(ArenaError::ExceedTicketPurchaseLimit {
                    purchased: information.purchased_ticket_count,
                    requested: shortfall,
                    max: round.max_purchase_count,
                });
            }

            let interval_total = interval.saturating_add(shortfall);
            if interval_total > round.max_purchase_count_during_interval {
                return Err(ArenaError::ExceedTicketPurchaseLimitDuringInterval {
                    purchased: interval,
                    requested: shortfall,
                    max: round.max_purchase_count_during_interval,
                });
            }

            if let Some(last) = information.last_purchase_block_index {
                if block_index.saturating_sub(last) < self.config.purchase_cooldown_blocks {
                    return Err(ArenaError::CoolDownBlock {
                        last,
                        current: block_index,
                        cooldown: self.config.purchase_cooldown_blocks,
                    });
                }
            }

            cost = round
                .ticket_price
                .total(information.purchased_ticket_count, shortfall)
                .ok_or_else(|| ArenaError::SheetRowColumn {
                    sheet: "ArenaSheet",
                    reason: format!(
                        "no ticket price for purchase {} of championship {} round {}",
                        information.purchased_ticket_count, round.championship_id, round.round
                    ),
                })?;

            information.purchased_ticket_count = season_total;
            information.last_purchase_block_index = Some(block_index);
            interval = interval_total;
        }

        information.ticket -= used_free;

        debug!(
            avatar = %information.avatar_address,
            requested,
            used_free,
            purchased = shortfall,
            cost,
            remaining = information.ticket,
            "tickets used"
        );

        Ok(TicketUsage {
            information,
            purchased_during_interval: interval,
            used_free,
            purchased: shortfall,
            cost,
        })
    }

    /// Adds battle results to the record.
    #[must_use]
    pub fn record_results(
        &self,
        mut information: ArenaInformation,
        wins: u32,
        losses: u32,
    ) -> ArenaInformation {
        information.win = information.win.saturating_add(wins);
        information.lose = information.lose.saturating_add(losses);
        information
    }
}
