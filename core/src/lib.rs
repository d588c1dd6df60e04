#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Gravity Wells rules engine.
//!
//! This crate defines the data surface that connects the session layer, the
//! authoritative turn orchestrator, and the rules systems. Clients submit
//! [`Action`] batches describing what the active player wants to do, and the
//! world resolves those batches against a snapshot of the [`GameState`].
//! Ship-level rules act on the [`ShipState`] value the world lends them.
//! Systems that look across the whole match read the state immutably and
//! respond exclusively with [`Command`] batches, which only the world applies.
//! Every type that forms part of the game state is serialisable so that
//! external stores can persist it as an opaque blob.

use std::fmt;

use serde::{Deserialize, Serialize};

mod action;
mod command;
mod dice;
mod error;
mod log;
mod ship;
mod state;
pub mod wells;

pub use action::{Action, ActionKind, ActionTier, BurnIntensity};
pub use command::Command;
pub use dice::{DiceRoller, FixedRoll, SeededDice, D10_SIDES};
pub use error::{ActionError, LoadoutError, SetupError, SlotGroup, TurnRejection};
pub use log::{LogEntry, LogKind};
pub use ship::{
    Loadout, Reactor, ShipState, SlotClass, Subsystem, SubsystemType, TransferState,
    FORWARD_SLOT_COUNT, SIDE_SLOT_COUNT,
};
pub use state::{
    Bot, Cargo, CargoState, GamePhase, GameState, GameStatus, Missile, Mission, MissionKind,
    Player, Station,
};

/// Unique identifier assigned to a player seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Creates a new player identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.0)
    }
}

/// Unique identifier assigned to an in-flight missile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MissileId(u32);

impl MissileId {
    /// Creates a new missile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a mission when missions are dealt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MissionId(u32);

impl MissionId {
    /// Creates a new mission identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a cargo container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CargoId(u32);

impl CargoId {
    /// Creates a new cargo identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a trade station.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StationId(u32);

impl StationId {
    /// Creates a new station identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of a gravity well (the black hole or one of the planets).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WellId(u32);

impl WellId {
    /// Creates a new well identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for WellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match wells::well(*self) {
            Some(well) => f.write_str(well.name),
            None => write!(f, "well {}", self.0),
        }
    }
}

/// Location of a ship, missile, or station within a gravity well.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Gravity well that anchors the coordinate frame.
    pub well: WellId,
    /// One-based ring index, counted outward from the well's centre.
    pub ring: u32,
    /// Zero-based sector index within the ring.
    pub sector: u32,
}

impl Position {
    /// Creates a new position from its components.
    #[must_use]
    pub const fn new(well: WellId, ring: u32, sector: u32) -> Self {
        Self { well, ring, sector }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ring {} sector {}", self.well, self.ring, self.sector)
    }
}

/// Orientation of a ship relative to its orbital motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Nose points along the direction of orbital travel.
    Prograde,
    /// Nose points against the direction of orbital travel.
    Retrograde,
}

impl Facing {
    /// Returns the opposite orientation.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Prograde => Self::Retrograde,
            Self::Retrograde => Self::Prograde,
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prograde => f.write_str("prograde"),
            Self::Retrograde => f.write_str("retrograde"),
        }
    }
}
