use serde::{Deserialize, Serialize};

use crate::PlayerId;

/// Entry appended to the game's turn log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Round during which the entry was recorded.
    pub turn: u32,
    /// Player the entry concerns.
    pub player: PlayerId,
    /// Category of the entry.
    pub kind: LogKind,
    /// Human-readable description.
    pub message: String,
}

impl LogEntry {
    /// Creates a new log entry.
    #[must_use]
    pub fn new(turn: u32, player: PlayerId, kind: LogKind, message: impl Into<String>) -> Self {
        Self {
            turn,
            player,
            kind,
            message: message.into(),
        }
    }
}

/// Categories of turn log entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogKind {
    /// A destroyed ship was rebuilt.
    Respawn,
    /// Energy was routed into a subsystem.
    Allocate,
    /// Energy was returned to the reactor.
    Deallocate,
    /// The ship changed facing.
    Rotate,
    /// The ship drifted along its ring.
    Coast,
    /// The ship burned to another ring.
    Burn,
    /// The ship jumped to another well.
    WellTransfer,
    /// A beam or kinetic weapon was fired.
    Fire,
    /// A missile was launched.
    MissileLaunched,
    /// A missile reached its target.
    MissileHit,
    /// A missile ran out of time.
    MissileExpired,
    /// A missile lost track of its target or was orphaned.
    MissileLost,
    /// Excess heat damaged the hull.
    HeatDamage,
    /// Cargo was collected from a station.
    CargoPickedUp,
    /// Cargo was delivered to a station.
    CargoDelivered,
    /// A mission was completed.
    MissionComplete,
    /// A player won the game.
    Victory,
}
