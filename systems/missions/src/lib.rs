#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Mission dealing, mission progress and victory evaluation.
//!
//! Each player receives one destroy mission and two cargo missions. Destroy
//! targets are assigned by shuffling the seats and linking each seat to the
//! next one, which yields a single cycle so nobody is ever asked to destroy
//! themselves.
//!
//! Progress checks read the game state and queue [`Command`] values for the
//! world to apply; they never mark missions or cargo themselves.

use std::collections::BTreeSet;

use gravity_wells_core::{
    Cargo, CargoId, CargoState, Command, GamePhase, GameState, GameStatus, Mission, MissionId,
    MissionKind, Player, PlayerId, SetupError, Station, WellId,
};
use rand::{seq::SliceRandom, Rng};

/// Completed missions required to win.
pub const MISSIONS_TO_WIN: u32 = 3;
/// Cargo missions dealt to every player.
pub const CARGO_MISSIONS_PER_PLAYER: usize = 2;
/// Fewest seats that can be dealt destroy missions.
pub const MIN_PLAYERS: usize = 2;
/// Fewest planets that can host cargo missions.
pub const MIN_PLANETS: usize = 2;

/// Missions and cargo dealt to one player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissionHand {
    /// Player receiving the hand.
    pub player: PlayerId,
    /// Missions dealt, destroy mission first.
    pub missions: Vec<Mission>,
    /// Containers backing the cargo missions.
    pub cargo: Vec<Cargo>,
}

/// Result of dealing missions, one hand per seat in seat order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DealtMissions {
    /// Hands in the order the seats were provided.
    pub hands: Vec<MissionHand>,
}

impl DealtMissions {
    /// Returns the hand dealt to `player`.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> Option<&MissionHand> {
        self.hands.iter().find(|hand| hand.player == player)
    }
}

/// Deals destroy and cargo missions to every seat.
pub fn deal_missions<R: Rng + ?Sized>(
    players: &[PlayerId],
    planets: &[WellId],
    rng: &mut R,
) -> Result<DealtMissions, SetupError> {
    let mut seen = BTreeSet::new();
    for &player in players {
        if !seen.insert(player) {
            return Err(SetupError::DuplicatePlayer { player });
        }
    }
    if players.len() < MIN_PLAYERS {
        return Err(SetupError::NotEnoughPlayers {
            required: MIN_PLAYERS,
            actual: players.len(),
        });
    }

    let planets: Vec<WellId> = planets
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if planets.len() < MIN_PLANETS {
        return Err(SetupError::NotEnoughPlanets {
            required: MIN_PLANETS,
            actual: planets.len(),
        });
    }

    let mut order = players.to_vec();
    order.shuffle(rng);
    let targets: Vec<(PlayerId, PlayerId)> = order
        .iter()
        .enumerate()
        .map(|(index, &hunter)| (hunter, order[(index + 1) % order.len()]))
        .collect();

    let mut next_mission = 0_u32;
    let mut next_cargo = 0_u32;
    let mut hands = Vec::with_capacity(players.len());
    for &player in players {
        let mut missions = Vec::with_capacity(1 + CARGO_MISSIONS_PER_PLAYER);
        let mut cargo = Vec::with_capacity(CARGO_MISSIONS_PER_PLAYER);

        if let Some(&(_, target)) = targets.iter().find(|(hunter, _)| *hunter == player) {
            missions.push(Mission {
                id: MissionId::new(next_mission),
                kind: MissionKind::DestroyShip { target },
                is_complete: false,
            });
            next_mission += 1;
        }

        for _ in 0..CARGO_MISSIONS_PER_PLAYER {
            let mut route = planets.choose_multiple(rng, 2).copied();
            let (Some(pickup), Some(delivery)) = (route.next(), route.next()) else {
                continue;
            };
            let mission = MissionId::new(next_mission);
            let container = CargoId::new(next_cargo);
            next_mission += 1;
            next_cargo += 1;

            missions.push(Mission {
                id: mission,
                kind: MissionKind::DeliverCargo {
                    cargo: container,
                    pickup,
                    delivery,
                },
                is_complete: false,
            });
            cargo.push(Cargo {
                id: container,
                mission,
                pickup,
                delivery,
                state: CargoState::AwaitingPickup,
            });
        }

        hands.push(MissionHand {
            player,
            missions,
            cargo,
        });
    }

    Ok(DealtMissions { hands })
}

/// Queues credit for destroy missions whose target ship has no hull left.
pub fn check_destroy_missions(state: &GameState, out: &mut Vec<Command>) {
    let destroyed: BTreeSet<PlayerId> = state
        .players
        .iter()
        .filter(|player| player.ship.is_destroyed())
        .map(|player| player.id)
        .collect();

    for player in &state.players {
        for mission in player.missions.iter().filter(|mission| !mission.is_complete) {
            if let MissionKind::DestroyShip { target } = mission.kind {
                if destroyed.contains(&target) {
                    out.push(Command::CompleteMission {
                        player: player.id,
                        mission: mission.id,
                    });
                }
            }
        }
    }
}

/// Queues loading and unloading of the player's cargo at the station the ship
/// occupies.
pub fn process_cargo(player: &Player, stations: &[Station], out: &mut Vec<Command>) {
    let position = player.ship.position;
    let Some(planet) = stations
        .iter()
        .find(|station| station.position == position)
        .map(|station| station.planet)
    else {
        return;
    };

    for cargo in &player.cargo {
        match cargo.state {
            CargoState::AwaitingPickup if cargo.pickup == planet => {
                out.push(Command::LoadCargo {
                    player: player.id,
                    cargo: cargo.id,
                    planet,
                });
            }
            CargoState::Aboard if cargo.delivery == planet => {
                out.push(Command::DeliverCargo {
                    player: player.id,
                    cargo: cargo.id,
                    planet,
                });
                let open = player
                    .missions
                    .iter()
                    .any(|mission| mission.id == cargo.mission && !mission.is_complete);
                if open {
                    out.push(Command::CompleteMission {
                        player: player.id,
                        mission: cargo.mission,
                    });
                }
            }
            _ => {}
        }
    }
}

/// Queues the end of the game once the first seat reaches the mission
/// threshold.
pub fn evaluate_victory(state: &GameState, out: &mut Vec<Command>) {
    if state.phase == GamePhase::Ended {
        return;
    }
    let Some(winner) = state
        .players
        .iter()
        .find(|player| player.completed_mission_count >= MISSIONS_TO_WIN)
        .map(|player| player.id)
    else {
        return;
    };

    let status = match state.human_player_id {
        Some(human) if human != winner => GameStatus::Defeat,
        _ => GameStatus::Victory,
    };
    out.push(Command::DeclareWinner { winner, status });
}
