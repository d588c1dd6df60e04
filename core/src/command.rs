use serde::{Deserialize, Serialize};

use crate::{CargoId, GameStatus, MissileId, MissionId, PlayerId, Position, WellId};

/// Mutation requested by a rules system after reading the game state.
///
/// Systems never change the [`GameState`](crate::GameState) they inspect.
/// They push commands in resolution order and the world applies them one at a
/// time, so later commands observe the effects of earlier ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Moves a missile that is still homing on its target.
    TrackMissile {
        /// Missile that moved.
        missile: MissileId,
        /// Position after this turn's drift and homing steps.
        position: Position,
    },
    /// Detonates a missile that reached its target's position.
    DetonateMissile {
        /// Missile that detonates.
        missile: MissileId,
        /// Player whose ship is struck.
        target: PlayerId,
    },
    /// Removes a missile whose target left the well or was destroyed.
    LoseMissile {
        /// Missile removed.
        missile: MissileId,
        /// Player the missile was chasing.
        target: PlayerId,
    },
    /// Removes a missile whose owner or target no longer exists.
    OrphanMissile {
        /// Missile removed.
        missile: MissileId,
    },
    /// Removes a missile that ran out of time.
    ExpireMissile {
        /// Missile removed.
        missile: MissileId,
    },
    /// Loads a container at its pickup station.
    LoadCargo {
        /// Owner of the container.
        player: PlayerId,
        /// Container loaded.
        cargo: CargoId,
        /// Planet whose station was visited.
        planet: WellId,
    },
    /// Unloads a container at its delivery station.
    DeliverCargo {
        /// Owner of the container.
        player: PlayerId,
        /// Container delivered.
        cargo: CargoId,
        /// Planet whose station was visited.
        planet: WellId,
    },
    /// Credits a mission to its holder.
    CompleteMission {
        /// Player credited.
        player: PlayerId,
        /// Mission completed.
        mission: MissionId,
    },
    /// Ends the game with a winner.
    DeclareWinner {
        /// Player who reached the mission threshold.
        winner: PlayerId,
        /// Result from the human seat's perspective.
        status: GameStatus,
    },
}
