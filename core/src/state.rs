use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    Action, CargoId, LogEntry, MissileId, MissionId, PlayerId, Position, ShipState, StationId,
    WellId,
};

/// Lifecycle phases of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Players are gathering; owned by the session layer.
    Lobby,
    /// The session layer is configuring the match.
    Setup,
    /// Players choose the subsystems mounted on their ships.
    Loadout,
    /// Players place their ships on the deployment ring.
    Deployment,
    /// Turns are being played.
    Active,
    /// A winner has been declared.
    Ended,
}

impl GamePhase {
    /// Reports whether missions are evaluated in this phase.
    #[must_use]
    pub const fn bears_missions(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lobby => "lobby",
            Self::Setup => "setup",
            Self::Loadout => "loadout",
            Self::Deployment => "deployment",
            Self::Active => "active",
            Self::Ended => "ended",
        };
        f.write_str(name)
    }
}

/// Outcome of the match from the perspective of the human seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// No winner yet.
    InProgress,
    /// The human seat (or, without one, any player) won.
    Victory,
    /// Another player won.
    Defeat,
}

/// Homing projectile in flight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Missile {
    /// Identifier of the missile.
    pub id: MissileId,
    /// Player who launched the missile.
    pub owner: PlayerId,
    /// Player whose ship the missile homes on.
    pub target: PlayerId,
    /// Current coordinate of the missile.
    pub position: Position,
    /// Round the missile was launched in.
    pub turn_fired: u32,
    /// Number of tracking steps the missile has survived.
    pub turns_alive: u32,
    /// Skips the next orbital drift; set when launched after the owner moved.
    pub skip_orbital_this_turn: bool,
}

/// Objective held by a player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    /// Identifier of the mission.
    pub id: MissionId,
    /// What must be done to complete the mission.
    pub kind: MissionKind,
    /// Set once the mission has been credited.
    pub is_complete: bool,
}

/// Kinds of missions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionKind {
    /// Destroy the target player's ship.
    DestroyShip {
        /// Player whose ship must be destroyed.
        target: PlayerId,
    },
    /// Carry a cargo container between two planets.
    DeliverCargo {
        /// Container to carry.
        cargo: CargoId,
        /// Planet whose station holds the container.
        pickup: WellId,
        /// Planet whose station receives the container.
        delivery: WellId,
    },
}

/// Container owned by a player (not the ship) so it survives respawns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cargo {
    /// Identifier of the container.
    pub id: CargoId,
    /// Mission the container belongs to.
    pub mission: MissionId,
    /// Planet whose station holds the container.
    pub pickup: WellId,
    /// Planet whose station receives the container.
    pub delivery: WellId,
    /// Where the container currently is.
    pub state: CargoState,
}

/// Progress of a cargo container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CargoState {
    /// Waiting at the pickup station.
    AwaitingPickup,
    /// Carried by the owning player.
    Aboard,
    /// Handed over at the delivery station.
    Delivered,
}

/// Trade station orbiting a planet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    /// Identifier of the station.
    pub id: StationId,
    /// Planet the station belongs to.
    pub planet: WellId,
    /// Current coordinate of the station.
    pub position: Position,
}

/// A seat in the match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Identifier of the player.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// The player's ship; kept even while destroyed.
    pub ship: ShipState,
    /// Missions dealt to the player.
    pub missions: Vec<Mission>,
    /// Cargo containers owned by the player.
    pub cargo: Vec<Cargo>,
    /// Number of missions credited so far.
    pub completed_mission_count: u32,
    /// Set once the player locked in a loadout.
    pub has_submitted_loadout: bool,
    /// Set once the player placed their ship.
    pub has_deployed: bool,
    /// Sector chosen at deployment; respawns reuse it.
    pub deployment_sector: Option<u32>,
}

/// Complete mutable state of a match; the unit of snapshot and commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Round counter; advances when play wraps back to the first seat.
    pub turn: u32,
    /// Index into `players` of the seat whose turn it is.
    pub active_player_index: usize,
    /// Every seat, in turn order.
    pub players: Vec<Player>,
    /// Append-only record of everything that happened.
    pub turn_log: Vec<LogEntry>,
    /// Missiles currently in flight.
    pub missiles: Vec<Missile>,
    /// Trade stations.
    pub stations: Vec<Station>,
    /// Current lifecycle phase.
    pub phase: GamePhase,
    /// Winner, once declared.
    pub winner_id: Option<PlayerId>,
    /// Outcome relative to the human seat.
    pub status: GameStatus,
    /// Seat controlled by the local human, if any.
    pub human_player_id: Option<PlayerId>,
    /// Identifier handed to the next launched missile.
    pub next_missile_id: u32,
}

impl GameState {
    /// Returns the player whose turn it is.
    #[must_use]
    pub fn active_player(&self) -> Option<&Player> {
        self.players.get(self.active_player_index)
    }

    /// Looks up a player by identifier.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    /// Looks up a player mutably by identifier.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|player| player.id == id)
    }

    /// Position of a player within the seat order.
    #[must_use]
    pub fn player_index(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|player| player.id == id)
    }

    /// Reserves the identifier for a newly launched missile.
    pub fn allocate_missile_id(&mut self) -> MissileId {
        let id = MissileId::new(self.next_missile_id);
        self.next_missile_id = self.next_missile_id.saturating_add(1);
        id
    }
}

/// Decision-making contract for computer-controlled seats.
pub trait Bot {
    /// Chooses the actions `player` submits for the current turn.
    fn decide(&mut self, state: &GameState, player: PlayerId) -> Vec<Action>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{wells, Facing, Loadout, Reactor, Subsystem, SubsystemType};
    use serde::de::DeserializeOwned;

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    fn ship() -> ShipState {
        ShipState {
            position: Position::new(wells::BLACK_HOLE, 4, 3),
            facing: Facing::Prograde,
            reaction_mass: 10,
            max_reaction_mass: 10,
            hit_points: 10,
            max_hit_points: 10,
            subsystems: vec![
                Subsystem::new(SubsystemType::Engines),
                Subsystem::new(SubsystemType::Missiles),
            ],
            reactor: Reactor::new(10),
            heat: 2,
            dissipation_capacity: 5,
            transfer_state: None,
            loadout: Loadout::default(),
            critical_chance: 10,
        }
    }

    fn state() -> GameState {
        let player = Player {
            id: PlayerId::new(0),
            name: "vega".to_owned(),
            ship: ship(),
            missions: vec![Mission {
                id: MissionId::new(0),
                kind: MissionKind::DeliverCargo {
                    cargo: CargoId::new(0),
                    pickup: wells::ALPHA,
                    delivery: wells::BETA,
                },
                is_complete: false,
            }],
            cargo: vec![Cargo {
                id: CargoId::new(0),
                mission: MissionId::new(0),
                pickup: wells::ALPHA,
                delivery: wells::BETA,
                state: CargoState::Aboard,
            }],
            completed_mission_count: 1,
            has_submitted_loadout: true,
            has_deployed: true,
            deployment_sector: Some(3),
        };

        GameState {
            turn: 4,
            active_player_index: 0,
            players: vec![player],
            turn_log: Vec::new(),
            missiles: vec![Missile {
                id: MissileId::new(7),
                owner: PlayerId::new(0),
                target: PlayerId::new(1),
                position: Position::new(wells::BLACK_HOLE, 4, 5),
                turn_fired: 3,
                turns_alive: 1,
                skip_orbital_this_turn: false,
            }],
            stations: vec![Station {
                id: StationId::new(0),
                planet: wells::ALPHA,
                position: Position::new(wells::ALPHA, wells::STATION_RING, 0),
            }],
            phase: GamePhase::Active,
            winner_id: None,
            status: GameStatus::InProgress,
            human_player_id: Some(PlayerId::new(0)),
            next_missile_id: 8,
        }
    }

    #[test]
    fn game_state_round_trips_through_bincode() {
        assert_round_trip(&state());
    }

    #[test]
    fn missile_ids_are_handed_out_monotonically() {
        let mut state = state();
        assert_eq!(state.allocate_missile_id(), MissileId::new(8));
        assert_eq!(state.allocate_missile_id(), MissileId::new(9));
        assert_eq!(state.next_missile_id, 10);
    }

    #[test]
    fn players_resolve_by_identifier() {
        let state = state();
        assert_eq!(state.player_index(PlayerId::new(0)), Some(0));
        assert!(state.player(PlayerId::new(5)).is_none());
        assert_eq!(
            state.active_player().map(|player| player.id),
            Some(PlayerId::new(0))
        );
    }

    #[test]
    fn phases_render_lowercase_names() {
        assert_eq!(GamePhase::Deployment.to_string(), "deployment");
        assert!(GamePhase::Active.bears_missions());
        assert!(!GamePhase::Loadout.bears_missions());
    }
}
