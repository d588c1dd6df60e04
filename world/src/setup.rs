//! Match creation and the loadout and deployment phases.

use gravity_wells_core::{
    wells, Facing, GamePhase, GameState, GameStatus, Loadout, Player, PlayerId, Position,
    SetupError, Station, StationId,
};
use gravity_wells_system_missions::deal_missions;
use gravity_wells_system_ship_factory::{create_initial_ship_state, validate_loadout};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::DEPLOYMENT_RING;

/// Player taking part in a new match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seat {
    /// Identifier of the player.
    pub id: PlayerId,
    /// Display name of the player.
    pub name: String,
}

impl Seat {
    /// Creates a new seat.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Creates a match in the loadout phase.
///
/// Every seat starts with a default-loadout ship parked on the deployment
/// ring, missions are dealt from a ChaCha stream seeded with `seed`, and one
/// station is placed on each planet.
pub fn create_game(
    seats: &[Seat],
    human: Option<PlayerId>,
    seed: u64,
) -> Result<GameState, SetupError> {
    let ids: Vec<PlayerId> = seats.iter().map(|seat| seat.id).collect();
    if let Some(human) = human {
        if !ids.contains(&human) {
            return Err(SetupError::UnknownPlayer { player: human });
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let dealt = deal_missions(&ids, &wells::planet_ids(), &mut rng)?;

    let mut players = Vec::with_capacity(seats.len());
    for (seat, hand) in seats.iter().zip(dealt.hands) {
        let ship = create_initial_ship_state(deployment_position(0), Facing::Prograde, None)?;
        players.push(Player {
            id: seat.id,
            name: seat.name.clone(),
            ship,
            missions: hand.missions,
            cargo: hand.cargo,
            completed_mission_count: 0,
            has_submitted_loadout: false,
            has_deployed: false,
            deployment_sector: None,
        });
    }

    let stations = wells::planets()
        .zip(0_u32..)
        .map(|(planet, index)| Station {
            id: StationId::new(index),
            planet: planet.id,
            position: Position::new(planet.id, wells::STATION_RING, 0),
        })
        .collect();

    info!(players = players.len(), seed, "created game");
    Ok(GameState {
        turn: 0,
        active_player_index: 0,
        players,
        turn_log: Vec::new(),
        missiles: Vec::new(),
        stations,
        phase: GamePhase::Loadout,
        winner_id: None,
        status: GameStatus::InProgress,
        human_player_id: human,
        next_missile_id: 0,
    })
}

/// Locks in a player's loadout and rebuilds their ship from it.
///
/// Once every player has submitted, the match moves to deployment.
pub fn submit_loadout(
    state: &GameState,
    player: PlayerId,
    loadout: &Loadout,
) -> Result<GameState, SetupError> {
    expect_phase(state, GamePhase::Loadout)?;
    validate_loadout(loadout)?;

    let mut next = state.clone();
    let seat = next
        .player_mut(player)
        .ok_or(SetupError::UnknownPlayer { player })?;
    if seat.has_submitted_loadout {
        return Err(SetupError::LoadoutAlreadySubmitted { player });
    }
    seat.ship = create_initial_ship_state(seat.ship.position, seat.ship.facing, Some(loadout))?;
    seat.has_submitted_loadout = true;
    debug!(%player, "loadout submitted");

    if next.players.iter().all(|seat| seat.has_submitted_loadout) {
        next.phase = GamePhase::Deployment;
        info!("every loadout submitted; deployment begins");
    }
    Ok(next)
}

/// Places a player's ship on the deployment ring at `sector`.
pub fn deploy_ship(
    state: &GameState,
    player: PlayerId,
    sector: u32,
) -> Result<GameState, SetupError> {
    expect_phase(state, GamePhase::Deployment)?;
    let sectors = wells::ring(wells::BLACK_HOLE, DEPLOYMENT_RING).map_or(0, |ring| ring.sectors);
    if sector >= sectors {
        return Err(SetupError::InvalidSector { sector, sectors });
    }

    let mut next = state.clone();
    let seat = next
        .player_mut(player)
        .ok_or(SetupError::UnknownPlayer { player })?;
    if seat.has_deployed {
        return Err(SetupError::AlreadyDeployed { player });
    }
    seat.ship.position = deployment_position(sector);
    seat.deployment_sector = Some(sector);
    seat.has_deployed = true;
    debug!(%player, sector, "ship deployed");
    Ok(next)
}

/// Starts play once every ship has been deployed.
pub fn transition_to_active_phase(state: &GameState) -> Result<GameState, SetupError> {
    expect_phase(state, GamePhase::Deployment)?;
    if let Some(waiting) = state.players.iter().find(|player| !player.has_deployed) {
        return Err(SetupError::NotDeployed { player: waiting.id });
    }

    let mut next = state.clone();
    next.phase = GamePhase::Active;
    next.turn = 1;
    next.active_player_index = 0;
    info!(players = next.players.len(), "play begins");
    Ok(next)
}

/// Coordinate on the deployment ring for a sector.
#[must_use]
pub fn deployment_position(sector: u32) -> Position {
    Position::new(wells::BLACK_HOLE, DEPLOYMENT_RING, sector)
}

fn expect_phase(state: &GameState, expected: GamePhase) -> Result<(), SetupError> {
    if state.phase == expected {
        Ok(())
    } else {
        Err(SetupError::WrongPhase {
            expected,
            actual: state.phase,
        })
    }
}
