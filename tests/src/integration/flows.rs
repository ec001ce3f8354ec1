//! # Join and Battle Flows
//!
//! Actions of Subsystem 2 executed end to end against the world state of
//! Subsystem 1: registration, ticketed battles, rewards and determinism.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use ac_02_arena::prelude::*;
    use std::collections::BTreeSet;

    fn season_world() -> ArenaWorld {
        let mut world = ArenaWorld::new();
        world.join(ALICE, SEASON, START);
        world.join(BOB, SEASON, START);
        world
    }

    /// Level that wins every battle against a level 50 defender.
    fn make_champion(world: &mut ArenaWorld, player: Player) {
        let mut avatar = world.avatar(player);
        avatar.level = 10_000;
        world.put_avatar(&avatar);
    }

    // =========================================================================
    // REGISTRATION
    // =========================================================================

    #[test]
    fn test_join_registers_participant() {
        let world = season_world();
        let config = &world.service.config().game;

        assert_eq!(world.participants(SEASON).avatar_addresses, vec![ALICE.avatar, BOB.avatar]);
        assert_eq!(world.information(ALICE, SEASON).ticket, config.arena_ticket_max);
        assert_eq!(world.score(ALICE, SEASON), config.default_score);

        let participant = world.participant(ALICE, SEASON);
        assert_eq!(participant.agent_address, ALICE.agent);
        assert_eq!(participant.name, "alice");
        assert_eq!(participant.synced_block_index, START);
        assert_eq!(participant.snapshot.level, 50);
    }

    #[test]
    fn test_rejoin_is_idempotent() {
        let mut world = season_world();
        world.apply(ALICE.agent, START + 5, &battle_action(ALICE, BOB, SEASON, 2));

        let information = world.information(ALICE, SEASON);
        let score = world.score(ALICE, SEASON);
        let participants = world.participants(SEASON);

        world.join(ALICE, SEASON, START + 50);

        assert_eq!(world.information(ALICE, SEASON), information);
        assert_eq!(world.score(ALICE, SEASON), score);
        assert_eq!(world.participants(SEASON), participants);
        assert_eq!(world.participant(ALICE, SEASON).synced_block_index, START + 50);
    }

    #[test]
    fn test_rejoin_refreshes_loadout_snapshot() {
        let mut world = season_world();
        let before = world.participant(ALICE, SEASON).snapshot;

        let mut action = join_action(ALICE, SEASON);
        if let ArenaAction::JoinArena(payload) = &mut action {
            payload.rune_infos = vec![RuneSlotInfo::new(0, 30_001)];
        }
        world.apply(ALICE.agent, START + 1, &action);

        let after = world.participant(ALICE, SEASON).snapshot;
        assert_eq!(after.stats.atk, before.stats.atk + 2);
    }

    #[test]
    fn test_battle_requires_registration() {
        let mut world = ArenaWorld::new();
        world.join(BOB, SEASON, START);

        let err = world
            .execute(ALICE.agent, START + 5, &battle_action(ALICE, BOB, SEASON, 1))
            .unwrap_err();
        assert_eq!(
            err,
            ArenaError::AddressNotFoundInArenaParticipants {
                address: ALICE.avatar,
                championship_id: 1,
                round: SEASON,
            }
        );

        world.join(ALICE, SEASON, START + 1);
        let err = world
            .execute(ALICE.agent, START + 5, &battle_action(ALICE, CAROL, SEASON, 1))
            .unwrap_err();
        assert_eq!(
            err,
            ArenaError::AddressNotFoundInArenaParticipants {
                address: CAROL.avatar,
                championship_id: 1,
                round: SEASON,
            }
        );
    }

    #[test]
    fn test_battle_signed_by_stranger() {
        let world = season_world();
        let err = world
            .execute(BOB.agent, START + 5, &battle_action(ALICE, BOB, SEASON, 1))
            .unwrap_err();
        assert_eq!(err.kind(), "FailedLoadState");
        assert_eq!(err.stage(), ErrorStage::State);
    }

    #[test]
    fn test_missing_score_record() {
        let joined = season_world();
        let mut world = ArenaWorld::new();
        world.join(BOB, SEASON, START);
        world.copy_records(
            &joined.state,
            &[
                arena_participants_address(1, SEASON),
                arena_participant_address(ALICE.avatar, 1, SEASON),
                arena_information_address(ALICE.avatar, 1, SEASON),
            ],
        );
        let root = world.state.state_root();

        let err = world
            .execute(ALICE.agent, START + 5, &battle_action(ALICE, BOB, SEASON, 1))
            .unwrap_err();
        assert_eq!(
            err,
            ArenaError::ArenaScoreNotFound(arena_score_address(ALICE.avatar, 1, SEASON))
        );
        assert_eq!(err.stage(), ErrorStage::State);
        assert_eq!(world.state.state_root(), root);
    }

    #[test]
    fn test_missing_information_record() {
        let joined = season_world();
        let mut world = ArenaWorld::new();
        world.join(BOB, SEASON, START);
        world.copy_records(
            &joined.state,
            &[
                arena_participants_address(1, SEASON),
                arena_participant_address(ALICE.avatar, 1, SEASON),
                arena_score_address(ALICE.avatar, 1, SEASON),
            ],
        );
        let root = world.state.state_root();

        let err = world
            .execute(ALICE.agent, START + 5, &battle_action(ALICE, BOB, SEASON, 1))
            .unwrap_err();
        assert_eq!(
            err,
            ArenaError::ArenaInformationNotFound(arena_information_address(ALICE.avatar, 1, SEASON))
        );
        assert_eq!(world.state.state_root(), root);
    }

    #[test]
    fn test_missing_attacker_participant_fails_before_tickets() {
        let mut joined = ArenaWorld::new();
        joined.join(CAROL, SEASON, START);
        joined.join(BOB, SEASON, START);
        joined.drain_free_tickets(CAROL, SEASON);

        let mut world = ArenaWorld::new();
        world.join(BOB, SEASON, START);
        world.copy_records(
            &joined.state,
            &[
                arena_participants_address(1, SEASON),
                arena_score_address(CAROL.avatar, 1, SEASON),
                arena_information_address(CAROL.avatar, 1, SEASON),
            ],
        );

        // Carol cannot pay for a ticket either; the missing record wins.
        let err = world
            .execute(CAROL.agent, START + 5, &battle_action(CAROL, BOB, SEASON, 1))
            .unwrap_err();
        assert_eq!(
            err,
            ArenaError::FailedLoadState {
                address: arena_participant_address(CAROL.avatar, 1, SEASON),
                reason: "participant record not found".into(),
            }
        );
    }

    #[test]
    fn test_malformed_round_is_invalid_season() {
        let mut world = season_world();
        let mut sheets = world.service.sheets().clone();
        let mut row = sheets.arena.try_get_value(&1).unwrap().clone();
        row.rounds[0].end_block_index = 50;
        sheets.arena = Sheet::from_rows([row]);
        world = world.with_sheets(sheets);
        let root = world.state.state_root();

        let err = world
            .execute(CAROL.agent, START, &join_action(CAROL, SEASON))
            .unwrap_err();
        assert_eq!(err.kind(), "InvalidSeason");
        assert_eq!(err.stage(), ErrorStage::Window);

        let err = world
            .execute(ALICE.agent, START + 5, &battle_action(ALICE, BOB, SEASON, 1))
            .unwrap_err();
        assert_eq!(err.kind(), "InvalidSeason");
        assert_eq!(world.state.state_root(), root);
    }

    // =========================================================================
    // VALIDATION ORDER
    // =========================================================================

    #[test]
    fn test_closed_window_reported_before_registration() {
        let world = ArenaWorld::new();
        let err = world
            .execute(ALICE.agent, SEASON_END + 1, &battle_action(ALICE, BOB, SEASON, 1))
            .unwrap_err();
        assert_eq!(err.kind(), "ThisArenaIsClosed");
    }

    #[test]
    fn test_rating_gap_reported_before_ticket_economy() {
        let mut world = ArenaWorld::new();
        world.join(CAROL, SEASON, START);
        world.join(BOB, SEASON, START);
        world.drain_free_tickets(CAROL, SEASON);
        world.set_score(BOB, SEASON, 1_500);

        let err = world
            .execute(CAROL.agent, START + 5, &battle_action(CAROL, BOB, SEASON, 1))
            .unwrap_err();
        assert_eq!(
            err,
            ArenaError::ValidateScoreDifference {
                arena_type: ArenaType::Season,
                my_score: 1_000,
                enemy_score: 1_500,
            }
        );
    }

    #[test]
    fn test_ticket_economy_reported_before_loadout() {
        let mut world = ArenaWorld::new();
        world.join(CAROL, SEASON, START);
        world.join(BOB, SEASON, START);
        world.drain_free_tickets(CAROL, SEASON);

        let mut payload = battle_payload(CAROL, BOB, SEASON, 1);
        payload.rune_infos = vec![RuneSlotInfo::new(0, 30_001), RuneSlotInfo::new(1, 30_001)];
        let err = world
            .execute(CAROL.agent, START + 5, &ArenaAction::BattleArena(payload.clone()))
            .unwrap_err();
        assert_eq!(err.kind(), "InsufficientBalance");

        let mut information = world.information(CAROL, SEASON);
        information.ticket = 1;
        world.state = world
            .state
            .clone()
            .set_typed(arena_information_address(CAROL.avatar, 1, SEASON), &information)
            .unwrap();
        let err = world
            .execute(CAROL.agent, START + 5, &ArenaAction::BattleArena(payload))
            .unwrap_err();
        assert_eq!(err, ArenaError::DuplicatedRuneId(30_001));
    }

    // =========================================================================
    // BATTLE
    // =========================================================================

    #[test]
    fn test_single_ticket_battle() {
        let mut world = season_world();
        let bob_gold = world.balance(BOB.agent);
        let bob_information = world.information(BOB, SEASON);

        let outcome = world.apply(ALICE.agent, START + 5, &battle_action(ALICE, BOB, SEASON, 1));
        let battle = outcome.battle.expect("battle outcome");

        let information = world.information(ALICE, SEASON);
        assert_eq!(information.ticket, 7);
        assert_eq!(information.win + information.lose, 1);
        assert_eq!(battle.wins + battle.losses, 1);

        let delta = if battle.wins == 1 { 25 } else { -15 };
        assert_eq!(world.score(ALICE, SEASON), (1_000 + delta).max(1_000));
        assert_eq!(world.participant(ALICE, SEASON).score, world.score(ALICE, SEASON));

        assert_eq!(world.balance(BOB.agent), bob_gold);
        assert_eq!(world.information(BOB, SEASON), bob_information);
    }

    #[test]
    fn test_rewards_reach_inventory_and_mail() {
        let mut world = season_world();
        make_champion(&mut world, ALICE);

        let outcome = world.apply(ALICE.agent, START + 5, &battle_action(ALICE, BOB, SEASON, 2));
        let battle = outcome.battle.expect("battle outcome");
        assert_eq!(battle.wins, 2);
        assert_eq!(battle.rewards.medal_id, Some(MEDAL));
        assert_eq!(battle.rewards.medal_count, 2);
        assert_eq!(battle.rewards.total_materials(), 2);

        let avatar = world.avatar(ALICE);
        assert_eq!(avatar.inventory.material_count(MEDAL), 2);
        assert_eq!(
            avatar.inventory.material_count(HOURGLASS) + avatar.inventory.material_count(AP_POTION),
            2
        );
        assert_eq!(avatar.mail_box.len(), 1);
        assert_eq!(avatar.mail_box.mails[0].items, battle.rewards.items());

        assert_eq!(world.score(ALICE, SEASON), 1_050);
        assert_eq!(world.score(BOB, SEASON), 1_000);
        assert_eq!(world.participant(BOB, SEASON).score, 1_000);
    }

    #[test]
    fn test_off_season_grants_no_medal() {
        let mut world = ArenaWorld::new();
        world.join(ALICE, OFF_SEASON, OFF_SEASON_START);
        world.join(BOB, OFF_SEASON, OFF_SEASON_START);
        make_champion(&mut world, ALICE);

        let outcome = world.apply(
            ALICE.agent,
            OFF_SEASON_START + 5,
            &battle_action(ALICE, BOB, OFF_SEASON, 1),
        );
        let battle = outcome.battle.expect("battle outcome");
        assert_eq!(battle.wins, 1);
        assert_eq!(battle.rewards.medal_id, None);
        assert_eq!(world.avatar(ALICE).inventory.material_count(MEDAL), 0);
    }

    #[test]
    fn test_closed_round_rejects_battle() {
        let world = season_world();
        let err = world
            .execute(ALICE.agent, SEASON_END + 1, &battle_action(ALICE, BOB, SEASON, 1))
            .unwrap_err();
        assert_eq!(err.kind(), "ThisArenaIsClosed");
        assert_eq!(err.stage(), ErrorStage::Window);
    }

    #[test]
    fn test_rejected_battle_leaves_state_untouched() {
        let mut world = season_world();
        world.set_score(BOB, SEASON, 1_500);
        let root = world.state.state_root();

        let err = world
            .execute(ALICE.agent, START + 5, &battle_action(ALICE, BOB, SEASON, 1))
            .unwrap_err();
        assert_eq!(err.stage(), ErrorStage::Fairness);
        assert_eq!(world.state.state_root(), root);
    }

    #[test]
    fn test_rehearsal_commits_ticket_economy_only() {
        let mut world = season_world();
        world.drain_free_tickets(ALICE, SEASON);
        let context = world.context(ALICE.agent, START + 5, SEED).into_rehearsal();

        let outcome = world
            .service
            .execute(&battle_action(ALICE, BOB, SEASON, 1), &context)
            .unwrap();
        assert!(outcome.battle.is_none());
        world.state = outcome.state;

        let information = world.information(ALICE, SEASON);
        assert_eq!(information.purchased_ticket_count, 1);
        assert_eq!((information.win, information.lose), (0, 0));
        assert_eq!(world.balance(arena_pool_address(1, SEASON)), 100);
        assert_eq!(world.score(ALICE, SEASON), 1_000);
        assert_eq!(world.avatar(ALICE).mail_box.len(), 0);
    }

    // =========================================================================
    // DETERMINISM
    // =========================================================================

    #[test]
    fn test_same_seed_same_outcome() {
        let world = season_world();
        let action = battle_action(ALICE, BOB, SEASON, 5);

        let first = world.execute_seeded(ALICE.agent, START + 5, &action, 42).unwrap();
        let second = world.execute_seeded(ALICE.agent, START + 5, &action, 42).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.state.state_root(), second.state.state_root());
    }

    #[test]
    fn test_seeds_drive_combat() {
        let world = season_world();
        let action = battle_action(ALICE, BOB, SEASON, 5);

        let distinct: BTreeSet<String> = (0..16)
            .map(|seed| {
                let outcome = world.execute_seeded(ALICE.agent, START + 5, &action, seed).unwrap();
                format!("{:?}", outcome.battle.expect("battle outcome").logs)
            })
            .collect();
        assert!(distinct.len() > 1);
    }

    #[test]
    fn test_encoded_action_matches_typed_action() {
        let world = season_world();
        let action = battle_action(ALICE, BOB, SEASON, 3);
        let context = world.context(ALICE.agent, START + 5, SEED);

        let typed = world.service.execute(&action, &context).unwrap();
        let encoded = world
            .service
            .execute_encoded(&action.encode().unwrap(), &context)
            .unwrap();
        assert_eq!(typed, encoded);
    }
}
