//! Shared world for integration flows and benchmarks.
//!
//! Championship 1 has a ranked season round (round 1) followed by an
//! off-season round (round 2). Three players exist; Alice and Bob are funded.

use ac_01_world_state::{ActionContext, RandomSource, StateTransition, WorldState};
use ac_02_arena::prelude::*;
use shared_types::{Address, BlockIndex, Currency};
use tracing_subscriber::EnvFilter;

// =============================================================================
// CONSTANTS
// =============================================================================

/// First block of the season round.
pub const START: BlockIndex = 100;
/// Last block of the season round.
pub const SEASON_END: BlockIndex = 20_000;
/// First block of the off-season round.
pub const OFF_SEASON_START: BlockIndex = 20_001;
/// Seed used unless a test picks its own.
pub const SEED: u64 = 3;

pub const SEASON: u32 = 1;
pub const OFF_SEASON: u32 = 2;
pub const MEDAL: u32 = 700_101;
pub const HOURGLASS: u32 = 303_000;
pub const AP_POTION: u32 = 303_100;

pub const SHEETS_JSON: &str = r#"{
    "arena": [
        {
            "championship_id": 1,
            "rounds": [
                {
                    "championship_id": 1, "round": 1, "arena_type": "Season",
                    "start_block_index": 100, "end_block_index": 20000,
                    "required_medal_count": 0, "entrance_fee": 0,
                    "ticket_price": { "steps": [
                        { "from_count": 0, "price": 100 },
                        { "from_count": 1, "price": 110 },
                        { "from_count": 2, "price": 120 },
                        { "from_count": 3, "price": 130 },
                        { "from_count": 4, "price": 140 }
                    ] },
                    "max_purchase_count": 5,
                    "max_purchase_count_during_interval": 3,
                    "medal_id": 700101
                },
                {
                    "championship_id": 1, "round": 2, "arena_type": "OffSeason",
                    "start_block_index": 20001, "end_block_index": 40000,
                    "required_medal_count": 0, "entrance_fee": 0,
                    "ticket_price": { "steps": [ { "from_count": 0, "price": 50 } ] },
                    "max_purchase_count": 40,
                    "max_purchase_count_during_interval": 20,
                    "medal_id": 0
                }
            ]
        }
    ],
    "rating_bands": [
        { "id": 1, "min_difference": -1000000000, "max_difference": -1,
          "win_delta": 15, "lose_delta": -25, "enemy_delta_on_win": -10 },
        { "id": 2, "min_difference": 0, "max_difference": 1000000000,
          "win_delta": 25, "lose_delta": -15, "enemy_delta_on_win": -20 }
    ],
    "reward_counts": [
        { "id": 1, "min_score": 0, "reward_count": 1 },
        { "id": 2, "min_score": 1400, "reward_count": 2 }
    ],
    "rewards": [
        { "id": 1, "item_id": 303000, "weight": 10, "min": 1, "max": 2, "required_level": 1 },
        { "id": 2, "item_id": 303100, "weight": 5, "min": 1, "max": 1, "required_level": 1 }
    ],
    "materials": [
        { "id": 303000, "name": "hourglass", "grade": 1 },
        { "id": 303100, "name": "ap potion", "grade": 2 },
        { "id": 700101, "name": "season 1 medal", "grade": 3 }
    ],
    "runes": [
        { "id": 10002, "stat": "Hp", "value_per_level": 10 },
        { "id": 30001, "stat": "Atk", "value_per_level": 2 }
    ],
    "characters": [
        {
            "id": 100010,
            "base": { "hp": 300, "atk": 30, "def": 10, "spd": 10, "hit": 10, "cri": 50 },
            "growth": { "hp": 10, "atk": 1, "def": 0, "spd": 0, "hit": 0, "cri": 0 }
        }
    ]
}"#;

// =============================================================================
// PLAYERS
// =============================================================================

/// A signing agent and the avatar it owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    pub agent: Address,
    pub avatar: Address,
}

pub const ALICE: Player = Player {
    agent: Address::new([0xA0; 20]),
    avatar: Address::new([0xA1; 20]),
};

pub const BOB: Player = Player {
    agent: Address::new([0xB0; 20]),
    avatar: Address::new([0xB1; 20]),
};

/// Unfunded.
pub const CAROL: Player = Player {
    agent: Address::new([0xC0; 20]),
    avatar: Address::new([0xC1; 20]),
};

/// Installs a test subscriber honouring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Level 50 avatar past the arena stage gate, owning both sheet runes.
pub fn avatar_of(player: Player, name: &str) -> AvatarState {
    let mut avatar = AvatarState::new(player.avatar, player.agent, name, 50);
    avatar.cleared_stage = 30;
    avatar.runes.insert(10_002, 1);
    avatar.runes.insert(30_001, 1);
    avatar.unlocked_rune_slots.insert(1);
    avatar
}

pub fn join_action(player: Player, round: u32) -> ArenaAction {
    ArenaAction::JoinArena(JoinArenaPayload {
        avatar_address: player.avatar,
        championship_id: 1,
        round,
        costumes: Vec::new(),
        equipments: Vec::new(),
        rune_infos: Vec::new(),
        version: RuleVersion::Current,
    })
}

pub fn battle_payload(
    attacker: Player,
    defender: Player,
    round: u32,
    ticket: u32,
) -> BattleArenaPayload {
    BattleArenaPayload {
        avatar_address: attacker.avatar,
        enemy_avatar_address: defender.avatar,
        championship_id: 1,
        round,
        ticket,
        costumes: Vec::new(),
        equipments: Vec::new(),
        rune_infos: Vec::new(),
        version: RuleVersion::Current,
    }
}

pub fn battle_action(attacker: Player, defender: Player, round: u32, ticket: u32) -> ArenaAction {
    ArenaAction::BattleArena(battle_payload(attacker, defender, round, ticket))
}

// =============================================================================
// WORLD
// =============================================================================

/// A service plus the latest committed state.
pub struct ArenaWorld {
    pub service: ArenaService<TableSheets>,
    pub state: WorldState,
}

impl Default for ArenaWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl ArenaWorld {
    /// Loads [`SHEETS_JSON`] and seeds the three players.
    pub fn new() -> Self {
        init_tracing();
        let sheets = TableSheets::from_json(SHEETS_JSON).expect("fixture sheets load");
        let service = ArenaService::new(ArenaConfig::default(), sheets);
        let gold = service.config().gold.clone();
        let state = WorldState::new()
            .set_typed(ALICE.avatar, &avatar_of(ALICE, "alice"))
            .and_then(|s| s.set_typed(BOB.avatar, &avatar_of(BOB, "bob")))
            .and_then(|s| s.set_typed(CAROL.avatar, &avatar_of(CAROL, "carol")))
            .and_then(|s| s.mint_asset(ALICE.agent, &gold.raw(100_000)))
            .and_then(|s| s.mint_asset(BOB.agent, &gold.raw(5_000)))
            .expect("fixture state");
        Self { service, state }
    }

    /// Same players and state under different sheets.
    pub fn with_sheets(self, sheets: TableSheets) -> Self {
        let config = self.service.config().clone();
        Self {
            service: ArenaService::new(config, sheets),
            state: self.state,
        }
    }

    /// Copies raw records from another state, leaving balances alone.
    pub fn copy_records(&mut self, from: &WorldState, addresses: &[Address]) {
        for address in addresses {
            let bytes = from.get_state(address).expect("record present").to_vec();
            self.state = self.state.clone().set_state(*address, bytes);
        }
    }

    pub fn gold(&self) -> &Currency {
        &self.service.config().gold
    }

    pub fn context(&self, signer: Address, block_index: BlockIndex, seed: u64) -> ActionContext {
        ActionContext::new(self.state.clone(), signer, block_index, RandomSource::new(seed))
    }

    /// Executes against the current state without committing.
    pub fn execute(
        &self,
        signer: Address,
        block_index: BlockIndex,
        action: &ArenaAction,
    ) -> Result<ExecutionOutcome, ArenaError> {
        self.execute_seeded(signer, block_index, action, SEED)
    }

    pub fn execute_seeded(
        &self,
        signer: Address,
        block_index: BlockIndex,
        action: &ArenaAction,
        seed: u64,
    ) -> Result<ExecutionOutcome, ArenaError> {
        self.service
            .execute(action, &self.context(signer, block_index, seed))
    }

    /// Executes and commits. Panics if the action is rejected.
    pub fn apply(
        &mut self,
        signer: Address,
        block_index: BlockIndex,
        action: &ArenaAction,
    ) -> ExecutionOutcome {
        let outcome = self
            .execute(signer, block_index, action)
            .unwrap_or_else(|err| panic!("{} rejected: {err}", action.name()));
        self.state = outcome.state.clone();
        outcome
    }

    pub fn join(&mut self, player: Player, round: u32, block_index: BlockIndex) {
        self.apply(player.agent, block_index, &join_action(player, round));
    }

    pub fn information(&self, player: Player, round: u32) -> ArenaInformation {
        self.state
            .get_typed(&arena_information_address(player.avatar, 1, round))
            .expect("decodable information")
            .expect("information present")
    }

    pub fn participant(&self, player: Player, round: u32) -> ArenaParticipant {
        self.state
            .get_typed(&arena_participant_address(player.avatar, 1, round))
            .expect("decodable participant")
            .expect("participant present")
    }

    pub fn participants(&self, round: u32) -> ArenaParticipants {
        self.state
            .get_typed(&arena_participants_address(1, round))
            .expect("decodable participants")
            .unwrap_or_else(|| ArenaParticipants::new(1, round))
    }

    pub fn score(&self, player: Player, round: u32) -> Score {
        self.state
            .get_typed::<ArenaScore>(&arena_score_address(player.avatar, 1, round))
            .expect("decodable score")
            .expect("score present")
            .score
    }

    pub fn set_score(&mut self, player: Player, round: u32, score: Score) {
        self.state = self
            .state
            .clone()
            .set_typed(
                arena_score_address(player.avatar, 1, round),
                &ArenaScore::new(player.avatar, score),
            )
            .expect("score written");
    }

    /// Both players back to the default score so the fairness window passes.
    pub fn level_scores(&mut self, a: Player, b: Player, round: u32) {
        let default = self.service.config().game.default_score;
        self.set_score(a, round, default);
        self.set_score(b, round, default);
    }

    pub fn drain_free_tickets(&mut self, player: Player, round: u32) {
        let mut information = self.information(player, round);
        information.ticket = 0;
        self.state = self
            .state
            .clone()
            .set_typed(arena_information_address(player.avatar, 1, round), &information)
            .expect("information written");
    }

    pub fn purchased_during_interval(&self, player: Player, round: u32) -> u32 {
        let information = arena_information_address(player.avatar, 1, round);
        self.state
            .get_typed(&purchased_count_during_interval_address(information))
            .expect("decodable counter")
            .unwrap_or(0)
    }

    pub fn avatar(&self, player: Player) -> AvatarState {
        self.state
            .get_typed(&player.avatar)
            .expect("decodable avatar")
            .expect("avatar present")
    }

    pub fn put_avatar(&mut self, avatar: &AvatarState) {
        self.state = self
            .state
            .clone()
            .set_typed(avatar.address, avatar)
            .expect("avatar written");
    }

    /// Replaces the stored combat snapshot of a joined player.
    pub fn put_snapshot(&mut self, player: Player, round: u32, snapshot: CombatSnapshot) {
        let mut participant = self.participant(player, round);
        participant.snapshot = snapshot;
        self.state = self
            .state
            .clone()
            .set_typed(arena_participant_address(player.avatar, 1, round), &participant)
            .expect("participant written");
    }

    /// Gold balance in raw units.
    pub fn balance(&self, address: Address) -> u128 {
        self.state.get_balance(&address, self.gold()).raw
    }
}
