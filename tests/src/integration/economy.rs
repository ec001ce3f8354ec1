//! # Ticket Economy and Rating Flows
//!
//! Free ticket refills, paid purchases against season and interval caps,
//! the purchase cooldown, the score floor and loadout rejection.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use ac_02_arena::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const INTERVAL: BlockIndex = 7_200;

    fn season_world() -> ArenaWorld {
        let mut world = ArenaWorld::new();
        world.join(ALICE, SEASON, START);
        world.join(BOB, SEASON, START);
        world
    }

    /// Buys one ticket at `block_index` with levelled scores.
    fn buy_one(world: &mut ArenaWorld, block_index: BlockIndex) -> Result<(), ArenaError> {
        world.level_scores(ALICE, BOB, SEASON);
        let action = battle_action(ALICE, BOB, SEASON, 1);
        let outcome = world.execute(ALICE.agent, block_index, &action)?;
        world.state = outcome.state;
        Ok(())
    }

    /// Defender no level 50 attacker can scratch.
    fn monster() -> CombatSnapshot {
        CombatSnapshot {
            character_id: 100_010,
            level: 50,
            stats: Stats {
                hp: 1_000_000_000,
                atk: 100_000,
                def: 0,
                spd: 1,
                hit: 1_000,
                cri: 0,
            },
        }
    }

    // =========================================================================
    // FREE TICKETS
    // =========================================================================

    #[test]
    fn test_ticket_conservation_across_intervals() {
        let mut world = ArenaWorld::new();
        world.join(ALICE, OFF_SEASON, OFF_SEASON_START);
        world.join(BOB, OFF_SEASON, OFF_SEASON_START);
        let pool = arena_pool_address(1, OFF_SEASON);

        world.apply(ALICE.agent, OFF_SEASON_START + 5, &battle_action(ALICE, BOB, OFF_SEASON, 3));
        assert_eq!(world.information(ALICE, OFF_SEASON).ticket, 5);

        world.apply(ALICE.agent, OFF_SEASON_START + 6, &battle_action(ALICE, BOB, OFF_SEASON, 5));
        let information = world.information(ALICE, OFF_SEASON);
        assert_eq!(information.ticket, 0);
        assert_eq!(information.purchased_ticket_count, 0);
        assert_eq!(world.balance(ALICE.agent), 100_000);

        world.apply(ALICE.agent, OFF_SEASON_START + 10, &battle_action(ALICE, BOB, OFF_SEASON, 2));
        let information = world.information(ALICE, OFF_SEASON);
        assert_eq!(information.ticket, 0);
        assert_eq!(information.purchased_ticket_count, 2);
        assert_eq!(world.purchased_during_interval(ALICE, OFF_SEASON), 2);
        assert_eq!(world.balance(ALICE.agent), 100_000 - 100);
        assert_eq!(world.balance(pool), 100);

        world.apply(
            ALICE.agent,
            OFF_SEASON_START + INTERVAL,
            &battle_action(ALICE, BOB, OFF_SEASON, 1),
        );
        let information = world.information(ALICE, OFF_SEASON);
        assert_eq!(information.ticket, 7);
        assert_eq!(information.ticket_reset_count, 1);
        assert_eq!(information.purchased_ticket_count, 2);
        assert_eq!(world.purchased_during_interval(ALICE, OFF_SEASON), 0);
        assert_eq!(information.win + information.lose, 3 + 5 + 2 + 1);
    }

    #[test]
    fn test_free_tickets_spent_before_purchase() {
        let mut world = season_world();
        let mut information = world.information(ALICE, SEASON);
        information.ticket = 2;
        world.state = world
            .state
            .clone()
            .set_typed(arena_information_address(ALICE.avatar, 1, SEASON), &information)
            .unwrap();

        world.apply(ALICE.agent, START + 5, &battle_action(ALICE, BOB, SEASON, 3));
        let information = world.information(ALICE, SEASON);
        assert_eq!(information.ticket, 0);
        assert_eq!(information.purchased_ticket_count, 1);
        assert_eq!(world.balance(ALICE.agent), 100_000 - 100);
    }

    #[test]
    fn test_play_count_bounds() {
        let world = season_world();
        let err = world
            .execute(ALICE.agent, START + 5, &battle_action(ALICE, BOB, SEASON, 17))
            .unwrap_err();
        assert_eq!(err, ArenaError::ExceedPlayCount { requested: 17, max: 16 });

        let err = world
            .execute(ALICE.agent, START + 5, &battle_action(ALICE, BOB, SEASON, 0))
            .unwrap_err();
        assert_eq!(err, ArenaError::ExceedPlayCount { requested: 0, max: 16 });
        assert_eq!(err.stage(), ErrorStage::Economy);
    }

    // =========================================================================
    // PURCHASE CAPS
    // =========================================================================

    #[test]
    fn test_season_and_interval_caps() {
        let mut world = season_world();
        world.drain_free_tickets(ALICE, SEASON);

        for block in [START + 10, START + 20, START + 30] {
            buy_one(&mut world, block).unwrap();
        }
        assert_eq!(world.purchased_during_interval(ALICE, SEASON), 3);
        assert_eq!(
            buy_one(&mut world, START + 40).unwrap_err(),
            ArenaError::ExceedTicketPurchaseLimitDuringInterval {
                purchased: 3,
                requested: 1,
                max: 3,
            }
        );

        // next interval: burn the refill, then keep buying
        world.level_scores(ALICE, BOB, SEASON);
        world.apply(ALICE.agent, START + INTERVAL + 5, &battle_action(ALICE, BOB, SEASON, 8));
        assert_eq!(world.purchased_during_interval(ALICE, SEASON), 0);
        for block in [START + INTERVAL + 10, START + INTERVAL + 20] {
            buy_one(&mut world, block).unwrap();
        }
        assert_eq!(
            buy_one(&mut world, START + INTERVAL + 30).unwrap_err(),
            ArenaError::ExceedTicketPurchaseLimit {
                purchased: 5,
                requested: 1,
                max: 5,
            }
        );

        let information = world.information(ALICE, SEASON);
        assert_eq!(information.purchased_ticket_count, 5);
        let spent = 100 + 110 + 120 + 130 + 140;
        assert_eq!(world.balance(ALICE.agent), 100_000 - spent);
        assert_eq!(world.balance(arena_pool_address(1, SEASON)), spent);
    }

    #[test]
    fn test_per_call_cap_in_season() {
        let mut world = season_world();
        world.drain_free_tickets(ALICE, SEASON);
        let err = world
            .execute(ALICE.agent, START + 5, &battle_action(ALICE, BOB, SEASON, 2))
            .unwrap_err();
        assert_eq!(err, ArenaError::TicketPurchaseLimitExceed { requested: 2, max: 1 });
    }

    #[test]
    fn test_purchase_cooldown() {
        let mut world = season_world();
        world.drain_free_tickets(ALICE, SEASON);
        buy_one(&mut world, START + 10).unwrap();

        for block in [START + 11, START + 13] {
            assert_eq!(
                buy_one(&mut world, block).unwrap_err(),
                ArenaError::CoolDownBlock {
                    last: START + 10,
                    current: block,
                    cooldown: 4,
                }
            );
        }
        buy_one(&mut world, START + 14).unwrap();
        assert_eq!(world.information(ALICE, SEASON).last_purchase_block_index, Some(START + 14));
    }

    #[test]
    fn test_purchase_without_gold() {
        let mut world = season_world();
        world.join(CAROL, SEASON, START);
        world.drain_free_tickets(CAROL, SEASON);

        let err = world
            .execute(CAROL.agent, START + 5, &battle_action(CAROL, BOB, SEASON, 1))
            .unwrap_err();
        assert_eq!(
            err,
            ArenaError::InsufficientBalance {
                address: CAROL.agent,
                ticker: "NCG".into(),
                required: 100,
                available: 0,
            }
        );
    }

    // =========================================================================
    // SCORE FLOOR
    // =========================================================================

    #[test]
    fn test_attacker_score_never_below_floor() {
        let mut world = season_world();
        world.put_snapshot(BOB, SEASON, monster());
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let start: Score = rng.gen_range(1_000..=1_100);
            let tickets: u32 = rng.gen_range(1..=8);
            world.set_score(ALICE, SEASON, start);

            let outcome = world
                .execute(ALICE.agent, START + 5, &battle_action(ALICE, BOB, SEASON, tickets))
                .unwrap();
            let battle = outcome.battle.expect("battle outcome");
            assert_eq!(battle.losses, tickets);

            let lose_delta = if start > 1_000 { -25 } else { -15 };
            let score: ArenaScore = outcome
                .state
                .get_typed(&arena_score_address(ALICE.avatar, 1, SEASON))
                .unwrap()
                .unwrap();
            assert_eq!(score.score, (start + lose_delta * Score::from(tickets)).max(1_000));
        }
    }

    #[test]
    fn test_defender_score_never_below_floor() {
        let mut world = season_world();
        let mut avatar = world.avatar(ALICE);
        avatar.level = 10_000;
        world.put_avatar(&avatar);
        world.set_score(BOB, SEASON, 1_005);

        let outcome = world.apply(ALICE.agent, START + 5, &battle_action(ALICE, BOB, SEASON, 3));
        assert_eq!(outcome.battle.expect("battle outcome").wins, 3);
        assert_eq!(world.score(BOB, SEASON), 1_000);
        assert_eq!(world.score(ALICE, SEASON), 1_075);
    }

    // =========================================================================
    // LOADOUT
    // =========================================================================

    #[test]
    fn test_duplicate_runes_rejected() {
        let mut world = ArenaWorld::new();

        let mut action = join_action(ALICE, SEASON);
        if let ArenaAction::JoinArena(payload) = &mut action {
            payload.rune_infos = vec![RuneSlotInfo::new(0, 30_001), RuneSlotInfo::new(1, 30_001)];
        }
        assert_eq!(
            world.execute(ALICE.agent, START, &action).unwrap_err(),
            ArenaError::DuplicatedRuneId(30_001)
        );

        if let ArenaAction::JoinArena(payload) = &mut action {
            payload.rune_infos = vec![RuneSlotInfo::new(0, 30_001), RuneSlotInfo::new(0, 10_002)];
        }
        assert_eq!(
            world.execute(ALICE.agent, START, &action).unwrap_err(),
            ArenaError::DuplicatedRuneSlotIndex(0)
        );
        assert!(world.participants(SEASON).is_empty());

        world.join(ALICE, SEASON, START);
        world.join(BOB, SEASON, START);
        let mut payload = battle_payload(ALICE, BOB, SEASON, 1);
        payload.rune_infos = vec![RuneSlotInfo::new(1, 10_002), RuneSlotInfo::new(0, 10_002)];
        assert_eq!(
            world
                .execute(ALICE.agent, START + 5, &ArenaAction::BattleArena(payload))
                .unwrap_err(),
            ArenaError::DuplicatedRuneId(10_002)
        );
    }
}
