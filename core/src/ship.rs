use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Facing, Position};

/// Number of forward-facing slots on every hull.
pub const FORWARD_SLOT_COUNT: usize = 2;
/// Number of side-mounted slots on every hull.
pub const SIDE_SLOT_COUNT: usize = 4;

/// Mounting class that decides which slots a subsystem may occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotClass {
    /// Built into every hull; never placed by the player.
    Fixed,
    /// Only fits forward slots.
    Forward,
    /// Only fits side slots.
    Side,
    /// Fits forward or side slots.
    Either,
}

/// Kinds of subsystems that can be installed on a ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubsystemType {
    /// Main drive used for burns and well transfers.
    Engines,
    /// Attitude thrusters used to change facing.
    Rotation,
    /// Collector that harvests reaction mass while coasting.
    Scoop,
    /// Short-range energy weapon.
    Laser,
    /// Long-range kinetic weapon fired along the facing.
    Railgun,
    /// Launcher for homing missiles.
    Missiles,
    /// Energy barrier that absorbs incoming damage.
    Shields,
    /// Targeting suite that improves critical chance.
    SensorArray,
    /// Passive heat radiator.
    Radiator,
    /// Passive reaction mass reserve.
    FuelTank,
}

impl SubsystemType {
    /// Every subsystem kind in declaration order.
    pub const ALL: [SubsystemType; 10] = [
        Self::Engines,
        Self::Rotation,
        Self::Scoop,
        Self::Laser,
        Self::Railgun,
        Self::Missiles,
        Self::Shields,
        Self::SensorArray,
        Self::Radiator,
        Self::FuelTank,
    ];

    /// Slot class governing where the subsystem can be mounted.
    #[must_use]
    pub const fn slot_class(self) -> SlotClass {
        match self {
            Self::Engines | Self::Rotation => SlotClass::Fixed,
            Self::Scoop | Self::Railgun => SlotClass::Forward,
            Self::Missiles | Self::SensorArray | Self::Radiator => SlotClass::Side,
            Self::Laser | Self::Shields | Self::FuelTank => SlotClass::Either,
        }
    }

    /// Largest amount of energy the subsystem can hold.
    ///
    /// Passive subsystems report zero and cannot be powered.
    #[must_use]
    pub const fn max_energy(self) -> u32 {
        match self {
            Self::Engines => 3,
            Self::Rotation | Self::SensorArray => 1,
            Self::Scoop | Self::Missiles => 2,
            Self::Laser | Self::Railgun | Self::Shields => 4,
            Self::Radiator | Self::FuelTank => 0,
        }
    }

    /// Reports whether the subsystem is a weapon that can be fired.
    #[must_use]
    pub const fn is_weapon(self) -> bool {
        matches!(self, Self::Laser | Self::Railgun | Self::Missiles)
    }

    /// Starting ammunition for subsystems that consume it.
    #[must_use]
    pub const fn starting_ammo(self) -> Option<u32> {
        match self {
            Self::Missiles => Some(4),
            _ => None,
        }
    }

    /// Canonical snake-case name of the subsystem.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Engines => "engines",
            Self::Rotation => "rotation",
            Self::Scoop => "scoop",
            Self::Laser => "laser",
            Self::Railgun => "railgun",
            Self::Missiles => "missiles",
            Self::Shields => "shields",
            Self::SensorArray => "sensor_array",
            Self::Radiator => "radiator",
            Self::FuelTank => "fuel_tank",
        }
    }
}

impl fmt::Display for SubsystemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Installed instance of a subsystem.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsystem {
    /// Kind of the subsystem; metadata only, subsystems are addressed by index.
    pub kind: SubsystemType,
    /// Reactor energy currently routed into the subsystem.
    pub allocated_energy: u32,
    /// Derived flag: `allocated_energy > 0`.
    pub is_powered: bool,
    /// Set once the subsystem has been used during the owner's current turn.
    pub used_this_turn: bool,
    /// Set by critical hits; broken subsystems cannot be powered again.
    pub is_broken: bool,
    /// Remaining ammunition for launchers.
    pub ammo: Option<u32>,
}

impl Subsystem {
    /// Creates an unpowered, intact subsystem of the provided kind.
    #[must_use]
    pub fn new(kind: SubsystemType) -> Self {
        Self {
            kind,
            allocated_energy: 0,
            is_powered: false,
            used_this_turn: false,
            is_broken: false,
            ammo: kind.starting_ammo(),
        }
    }

    /// Reports whether the subsystem is powered and intact.
    #[must_use]
    pub fn is_operational(&self) -> bool {
        self.is_powered && !self.is_broken
    }
}

/// Energy source shared by every subsystem on a ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reactor {
    /// Total energy produced by the reactor.
    pub total_capacity: u32,
    /// Energy not currently routed into any subsystem.
    pub available_energy: u32,
}

impl Reactor {
    /// Creates a reactor with every unit of energy available.
    #[must_use]
    pub const fn new(total_capacity: u32) -> Self {
        Self {
            total_capacity,
            available_energy: total_capacity,
        }
    }
}

/// Record of a ring transfer completed during the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferState {
    /// Ring the ship departed from.
    pub from_ring: u32,
    /// Ring the ship arrived at.
    pub to_ring: u32,
    /// Reaction mass spent on the transfer.
    pub reaction_mass_spent: u32,
}

/// Player-selected subsystems mounted in the configurable slots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    /// Subsystems mounted in the forward slots.
    pub forward: Vec<SubsystemType>,
    /// Subsystems mounted in the side slots.
    pub side: Vec<SubsystemType>,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            forward: vec![SubsystemType::Railgun, SubsystemType::Scoop],
            side: vec![
                SubsystemType::Laser,
                SubsystemType::Shields,
                SubsystemType::Missiles,
                SubsystemType::Radiator,
            ],
        }
    }
}

impl Loadout {
    /// Iterates over every configurable subsystem, forward slots first.
    pub fn iter(&self) -> impl Iterator<Item = SubsystemType> + '_ {
        self.forward.iter().chain(self.side.iter()).copied()
    }
}

/// Complete mutable state of a single ship.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipState {
    /// Current coordinate of the ship.
    pub position: Position,
    /// Current orientation of the ship.
    pub facing: Facing,
    /// Propellant available for burns and well transfers.
    pub reaction_mass: u32,
    /// Upper bound for `reaction_mass`.
    pub max_reaction_mass: u32,
    /// Remaining hull integrity; the ship is destroyed at zero.
    pub hit_points: u32,
    /// Hull integrity of a fresh ship.
    pub max_hit_points: u32,
    /// Installed subsystems, addressed by index.
    pub subsystems: Vec<Subsystem>,
    /// Energy source shared by the subsystems.
    pub reactor: Reactor,
    /// Heat accumulated since the last evaluation.
    pub heat: u32,
    /// Heat the hull sheds per evaluation before radiators are counted.
    pub dissipation_capacity: u32,
    /// Ring transfer completed during the current turn, if any.
    pub transfer_state: Option<TransferState>,
    /// Loadout the ship was built from; reused on respawn.
    pub loadout: Loadout,
    /// Base critical chance in percentage points.
    pub critical_chance: u32,
}

impl ShipState {
    /// Reports whether the hull has been reduced to zero.
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.hit_points == 0
    }

    /// Returns the subsystem at the provided index.
    #[must_use]
    pub fn subsystem(&self, index: usize) -> Option<&Subsystem> {
        self.subsystems.get(index)
    }

    /// Returns mutable access to the subsystem at the provided index.
    pub fn subsystem_mut(&mut self, index: usize) -> Option<&mut Subsystem> {
        self.subsystems.get_mut(index)
    }

    /// Index of the first subsystem of the provided kind.
    ///
    /// Only meaningful when the kind is unique on the ship or when any
    /// instance will do; otherwise address subsystems by index.
    #[must_use]
    pub fn find_subsystem(&self, kind: SubsystemType) -> Option<usize> {
        self.subsystems
            .iter()
            .position(|subsystem| subsystem.kind == kind)
    }

    /// Iterates over every installed subsystem of the provided kind.
    pub fn subsystems_of(&self, kind: SubsystemType) -> impl Iterator<Item = &Subsystem> + '_ {
        self.subsystems
            .iter()
            .filter(move |subsystem| subsystem.kind == kind)
    }

    /// Sum of the energy routed into every subsystem.
    #[must_use]
    pub fn allocated_energy(&self) -> u32 {
        self.subsystems
            .iter()
            .map(|subsystem| subsystem.allocated_energy)
            .sum()
    }

    /// Checks the reactor conservation invariant.
    #[must_use]
    pub fn energy_is_conserved(&self) -> bool {
        self.allocated_energy() + self.reactor.available_energy == self.reactor.total_capacity
    }

    /// Clears the per-turn bookkeeping at the start of the owner's turn.
    pub fn begin_turn(&mut self) {
        for subsystem in &mut self.subsystems {
            subsystem.used_this_turn = false;
        }
        self.transfer_state = None;
    }
}
