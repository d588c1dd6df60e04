use serde::{Deserialize, Serialize};

use crate::{Facing, PlayerId, SubsystemType, WellId};

/// Player-submitted request executed during that player's turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Player submitting the action; must be the active player.
    pub player: PlayerId,
    /// What the player wants to do.
    pub kind: ActionKind,
}

impl Action {
    /// Creates a new action for the provided player.
    #[must_use]
    pub const fn new(player: PlayerId, kind: ActionKind) -> Self {
        Self { player, kind }
    }
}

/// Every kind of action a player may submit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    /// Routes reactor energy into a subsystem.
    AllocateEnergy {
        /// Index of the subsystem receiving energy.
        subsystem: usize,
        /// Units of energy to move out of the reactor.
        amount: u32,
    },
    /// Returns energy from a subsystem to the reactor.
    DeallocateEnergy {
        /// Index of the subsystem releasing energy.
        subsystem: usize,
        /// Units of energy to release; clamped to what the subsystem holds.
        amount: u32,
    },
    /// Turns the ship to the requested orientation.
    Rotate {
        /// Orientation after the rotation.
        facing: Facing,
        /// Ordering key within the rotation tier.
        sequence: u32,
    },
    /// Drifts along the current ring without burning.
    Coast {
        /// Ordering key within the movement tier.
        sequence: u32,
    },
    /// Drifts, then burns to change rings.
    Burn {
        /// Strength of the burn.
        intensity: BurnIntensity,
        /// Ordering key within the movement tier.
        sequence: u32,
    },
    /// Fires a weapon at another ship.
    FireWeapon {
        /// Index of the weapon subsystem.
        weapon: usize,
        /// Player whose ship is targeted.
        target: PlayerId,
        /// Subsystem the attacker declares for a critical hit.
        critical_target: SubsystemType,
        /// Ordering key within the combat tier.
        sequence: u32,
    },
    /// Jumps to another gravity well through a transfer point.
    WellTransfer {
        /// Well the ship should arrive in.
        destination: WellId,
        /// Ordering key within the combat tier.
        sequence: u32,
    },
    /// Places the ship on the deployment ring; only valid while deploying.
    Deploy {
        /// Sector on the deployment ring.
        sector: u32,
    },
}

impl ActionKind {
    /// Priority tier that decides execution order within a turn.
    #[must_use]
    pub const fn tier(&self) -> ActionTier {
        match self {
            Self::AllocateEnergy { .. } => ActionTier::Allocation,
            Self::DeallocateEnergy { .. } => ActionTier::Deallocation,
            Self::Rotate { .. } => ActionTier::Rotation,
            Self::Coast { .. } | Self::Burn { .. } => ActionTier::Movement,
            Self::FireWeapon { .. } | Self::WellTransfer { .. } => ActionTier::Tactical,
            Self::Deploy { .. } => ActionTier::Deployment,
        }
    }

    /// Client-provided ordering key; zero for actions that do not carry one.
    #[must_use]
    pub const fn sequence(&self) -> u32 {
        match self {
            Self::Rotate { sequence, .. }
            | Self::Coast { sequence }
            | Self::Burn { sequence, .. }
            | Self::FireWeapon { sequence, .. }
            | Self::WellTransfer { sequence, .. } => *sequence,
            Self::AllocateEnergy { .. }
            | Self::DeallocateEnergy { .. }
            | Self::Deploy { .. } => 0,
        }
    }

    /// Short name used in the turn log.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::AllocateEnergy { .. } => "allocate",
            Self::DeallocateEnergy { .. } => "deallocate",
            Self::Rotate { .. } => "rotate",
            Self::Coast { .. } => "coast",
            Self::Burn { .. } => "burn",
            Self::FireWeapon { .. } => "fire",
            Self::WellTransfer { .. } => "well_transfer",
            Self::Deploy { .. } => "deploy",
        }
    }
}

/// Execution tiers in the order they are resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionTier {
    /// Deployment happens before the first turn and never inside one.
    Deployment,
    /// Energy allocation.
    Allocation,
    /// Energy deallocation.
    Deallocation,
    /// Facing changes.
    Rotation,
    /// Coasting and burns.
    Movement,
    /// Weapon fire and well transfers.
    Tactical,
}

/// Strength of a ring-changing burn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BurnIntensity {
    /// Moves one ring.
    Soft,
    /// Moves two rings.
    Medium,
    /// Moves three rings.
    Hard,
}

impl BurnIntensity {
    /// Number of rings crossed by the burn.
    #[must_use]
    pub const fn ring_delta(self) -> u32 {
        match self {
            Self::Soft => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }

    /// Reaction mass consumed by the burn.
    #[must_use]
    pub const fn reaction_mass_cost(self) -> u32 {
        match self {
            Self::Soft => 1,
            Self::Medium => 3,
            Self::Hard => 5,
        }
    }
}
