use std::collections::BTreeSet;

use gravity_wells_core::{
    wells, CargoState, Command, Facing, GamePhase, GameState, GameStatus, MissionKind, Player,
    PlayerId, Position, Station, StationId, WellId,
};
use gravity_wells_system_missions::{
    check_destroy_missions, deal_missions, evaluate_victory, process_cargo,
    CARGO_MISSIONS_PER_PLAYER, MISSIONS_TO_WIN,
};
use gravity_wells_system_ship_factory::create_initial_ship_state;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn seats(count: u32) -> Vec<PlayerId> {
    (0..count).map(PlayerId::new).collect()
}

fn seated_state(count: u32, seed: u64) -> GameState {
    let ids = seats(count);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let dealt = deal_missions(&ids, &wells::planet_ids(), &mut rng).expect("enough seats");

    let players = dealt
        .hands
        .into_iter()
        .map(|hand| Player {
            id: hand.player,
            name: format!("pilot {}", hand.player.get()),
            ship: create_initial_ship_state(
                Position::new(wells::BLACK_HOLE, 4, hand.player.get()),
                Facing::Prograde,
                None,
            )
            .expect("default loadout is valid"),
            missions: hand.missions,
            cargo: hand.cargo,
            completed_mission_count: 0,
            has_submitted_loadout: true,
            has_deployed: true,
            deployment_sector: Some(hand.player.get()),
        })
        .collect();

    GameState {
        turn: 1,
        active_player_index: 0,
        players,
        turn_log: Vec::new(),
        missiles: Vec::new(),
        stations: wells::planet_ids()
            .into_iter()
            .enumerate()
            .map(|(index, planet)| Station {
                id: StationId::new(u32::try_from(index).expect("few planets")),
                planet,
                position: Position::new(planet, wells::STATION_RING, 0),
            })
            .collect(),
        phase: GamePhase::Active,
        winner_id: None,
        status: GameStatus::InProgress,
        human_player_id: Some(PlayerId::new(0)),
        next_missile_id: 0,
    }
}

fn station_of(state: &GameState, planet: WellId) -> Position {
    state
        .stations
        .iter()
        .find(|station| station.planet == planet)
        .expect("every planet has a station")
        .position
}

proptest! {
    #[test]
    fn destroy_targets_form_a_permutation_without_fixed_points(
        count in 2u32..8,
        seed in any::<u64>(),
    ) {
        let ids = seats(count);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let dealt = deal_missions(&ids, &wells::planet_ids(), &mut rng)
            .expect("enough seats and planets");

        let mut targets = BTreeSet::new();
        for hand in &dealt.hands {
            let destroy: Vec<PlayerId> = hand
                .missions
                .iter()
                .filter_map(|mission| match mission.kind {
                    MissionKind::DestroyShip { target } => Some(target),
                    MissionKind::DeliverCargo { .. } => None,
                })
                .collect();
            prop_assert_eq!(destroy.len(), 1);
            prop_assert_ne!(destroy[0], hand.player);
            prop_assert!(targets.insert(destroy[0]));

            prop_assert_eq!(hand.cargo.len(), CARGO_MISSIONS_PER_PLAYER);
            for cargo in &hand.cargo {
                prop_assert_ne!(cargo.pickup, cargo.delivery);
            }
        }
        prop_assert_eq!(targets, ids.into_iter().collect::<BTreeSet<_>>());
    }
}

#[test]
fn dealing_is_reproducible_from_the_seed() {
    let ids = seats(4);
    let first = deal_missions(
        &ids,
        &wells::planet_ids(),
        &mut ChaCha8Rng::seed_from_u64(99),
    )
    .expect("enough seats");
    let second = deal_missions(
        &ids,
        &wells::planet_ids(),
        &mut ChaCha8Rng::seed_from_u64(99),
    )
    .expect("enough seats");

    assert_eq!(first, second);
}

#[test]
fn destroyed_target_credits_the_hunter() {
    let mut state = seated_state(3, 7);
    let hunter = state.players[0].id;
    let destroy = state.players[0].missions[0].clone();
    let MissionKind::DestroyShip { target } = destroy.kind else {
        panic!("the destroy mission is dealt first");
    };
    state
        .player_mut(target)
        .expect("target is seated")
        .ship
        .hit_points = 0;

    let mut commands = Vec::new();
    check_destroy_missions(&state, &mut commands);

    assert_eq!(
        commands,
        vec![Command::CompleteMission {
            player: hunter,
            mission: destroy.id,
        }]
    );
}

#[test]
fn completed_destroy_missions_are_not_credited_again() {
    let mut state = seated_state(3, 7);
    for player in &mut state.players {
        player.ship.hit_points = 0;
        player.missions[0].is_complete = true;
    }

    let mut commands = Vec::new();
    check_destroy_missions(&state, &mut commands);

    assert!(commands.is_empty());
}

#[test]
fn cargo_is_picked_up_at_its_pickup_station() {
    let mut state = seated_state(2, 11);
    let cargo = state.players[0].cargo[0].clone();
    state.players[0].ship.position = station_of(&state, cargo.pickup);

    let mut commands = Vec::new();
    process_cargo(&state.players[0], &state.stations, &mut commands);

    assert!(commands.contains(&Command::LoadCargo {
        player: state.players[0].id,
        cargo: cargo.id,
        planet: cargo.pickup,
    }));
}

#[test]
fn delivered_cargo_completes_its_mission() {
    let mut state = seated_state(2, 11);
    let cargo = state.players[0].cargo[0].clone();
    state.players[0].cargo[0].state = CargoState::Aboard;
    state.players[0].ship.position = station_of(&state, cargo.delivery);
    let player = state.players[0].id;

    let mut commands = Vec::new();
    process_cargo(&state.players[0], &state.stations, &mut commands);

    let delivered = commands
        .iter()
        .position(|command| {
            *command
                == Command::DeliverCargo {
                    player,
                    cargo: cargo.id,
                    planet: cargo.delivery,
                }
        })
        .expect("cargo is unloaded");
    assert_eq!(
        commands.get(delivered + 1),
        Some(&Command::CompleteMission {
            player,
            mission: cargo.mission,
        })
    );
}

#[test]
fn ships_away_from_stations_leave_cargo_untouched() {
    let state = seated_state(2, 3);

    let mut commands = Vec::new();
    process_cargo(&state.players[1], &state.stations, &mut commands);

    assert!(commands.is_empty());
}

#[test]
fn victory_is_relative_to_the_human_seat() {
    let mut state = seated_state(2, 5);
    state.players[1].completed_mission_count = MISSIONS_TO_WIN;

    let mut commands = Vec::new();
    evaluate_victory(&state, &mut commands);
    assert_eq!(
        commands,
        vec![Command::DeclareWinner {
            winner: PlayerId::new(1),
            status: GameStatus::Defeat,
        }]
    );

    state.phase = GamePhase::Ended;
    commands.clear();
    evaluate_victory(&state, &mut commands);
    assert!(commands.is_empty(), "the game only ends once");

    let mut solo = seated_state(2, 5);
    solo.human_player_id = None;
    solo.players[0].completed_mission_count = MISSIONS_TO_WIN;
    commands.clear();
    evaluate_victory(&solo, &mut commands);
    assert_eq!(
        commands,
        vec![Command::DeclareWinner {
            winner: PlayerId::new(0),
            status: GameStatus::Victory,
        }]
    );
}

#[test]
fn too_few_seats_cannot_be_dealt() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    assert!(deal_missions(&seats(1), &wells::planet_ids(), &mut rng).is_err());
}
