use std::fmt;

use thiserror::Error;

use crate::{Facing, GamePhase, PlayerId, SubsystemType, WellId};

/// Reasons an individual action fails validation.
///
/// Any of these aborts the enclosing turn; the messages are shown to players.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The action was submitted outside the active phase.
    #[error("actions can only be executed during the active phase (current phase: {phase})")]
    InvalidPhase {
        /// Phase the game was in.
        phase: GamePhase,
    },
    /// The action belongs to a player who is not currently active.
    #[error("it is not {player}'s turn")]
    NotActivePlayer {
        /// Player who submitted the action.
        player: PlayerId,
    },
    /// The referenced player does not exist.
    #[error("{player} is not seated in this game")]
    UnknownPlayer {
        /// Identifier that failed to resolve.
        player: PlayerId,
    },
    /// The referenced subsystem index does not exist.
    #[error("subsystem {index} does not exist")]
    UnknownSubsystem {
        /// Index that failed to resolve.
        index: usize,
    },
    /// The subsystem was disabled by a critical hit.
    #[error("{kind} is broken")]
    SubsystemBroken {
        /// Kind of the broken subsystem.
        kind: SubsystemType,
    },
    /// The subsystem has no energy routed into it.
    #[error("{kind} is not powered")]
    SubsystemUnpowered {
        /// Kind of the unpowered subsystem.
        kind: SubsystemType,
    },
    /// The reactor cannot cover the requested allocation.
    #[error("not enough reactor energy: requested {requested}, available {available}")]
    InsufficientEnergy {
        /// Energy requested.
        requested: u32,
        /// Energy left in the reactor.
        available: u32,
    },
    /// The allocation would exceed the subsystem's energy ceiling.
    #[error("{kind} cannot hold more than {max} energy")]
    ExceedsSubsystemCapacity {
        /// Kind of the subsystem.
        kind: SubsystemType,
        /// Ceiling for the subsystem kind.
        max: u32,
    },
    /// The subsystem was already used during this turn.
    #[error("{kind} has already been used this turn")]
    AlreadyUsed {
        /// Kind of the subsystem.
        kind: SubsystemType,
    },
    /// The ship lacks a subsystem of the required kind.
    #[error("ship has no {kind}")]
    MissingSubsystem {
        /// Kind that was required.
        kind: SubsystemType,
    },
    /// A movement action was already executed this turn.
    #[error("ship has already moved this turn")]
    AlreadyMoved,
    /// A rotation was already executed this turn.
    #[error("ship has already rotated this turn")]
    AlreadyRotated,
    /// The ship already faces the requested direction.
    #[error("ship is already facing {facing}")]
    AlreadyFacing {
        /// Current orientation.
        facing: Facing,
    },
    /// Not enough propellant for the manoeuvre.
    #[error("not enough reaction mass: requires {required}, available {available}")]
    InsufficientReactionMass {
        /// Reaction mass required.
        required: u32,
        /// Reaction mass on board.
        available: u32,
    },
    /// The burn would leave the well's ring range.
    #[error("burn to ring {ring} would leave the rings of {well}")]
    RingOutOfRange {
        /// Well the ship is in.
        well: WellId,
        /// Ring the burn would have reached.
        ring: u32,
    },
    /// The ship is not on the outermost ring of its well.
    #[error("not on outermost ring")]
    NotOnOutermostRing,
    /// The ship is not positioned at the transfer point for the destination.
    #[error("not at a transfer point")]
    NotAtTransferPoint,
    /// The engines are below the level required for a well transfer.
    #[error("requires engines at level {required}")]
    EnginesBelowLevel {
        /// Minimum engine energy.
        required: u32,
    },
    /// Well transfers can only be made while facing prograde.
    #[error("must be facing prograde")]
    NotFacingPrograde,
    /// No transfer route links the two wells.
    #[error("no transfer route from {from} to {to}")]
    NoTransferRoute {
        /// Current well.
        from: WellId,
        /// Requested destination.
        to: WellId,
    },
    /// The subsystem addressed by a fire action is not a weapon.
    #[error("{kind} is not a weapon")]
    NotAWeapon {
        /// Kind of the addressed subsystem.
        kind: SubsystemType,
    },
    /// The weapon does not hold enough energy to fire.
    #[error("{kind} requires at least {required} energy to fire")]
    WeaponNotCharged {
        /// Kind of the weapon.
        kind: SubsystemType,
        /// Minimum energy to fire.
        required: u32,
    },
    /// The launcher has no missiles left.
    #[error("no ammunition remaining")]
    OutOfAmmo,
    /// The target is outside the weapon's reach.
    #[error("{target} is out of range of the {weapon}")]
    TargetOutOfRange {
        /// Kind of the weapon.
        weapon: SubsystemType,
        /// Targeted player.
        target: PlayerId,
    },
    /// Ships cannot target themselves.
    #[error("cannot target own ship")]
    SelfTarget,
    /// The target ship has already been destroyed.
    #[error("{target}'s ship is already destroyed")]
    TargetDestroyed {
        /// Targeted player.
        target: PlayerId,
    },
    /// A deploy action was submitted inside a turn.
    #[error("ships can only be deployed during the deployment phase")]
    DeployOutsideDeployment,
}

/// Reasons a submitted loadout is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LoadoutError {
    /// Too many subsystems were assigned to the forward slots.
    #[error("loadout has {count} forward subsystems but only {max} forward slots")]
    TooManyForward {
        /// Subsystems assigned.
        count: usize,
        /// Slots available.
        max: usize,
    },
    /// Too many subsystems were assigned to the side slots.
    #[error("loadout has {count} side subsystems but only {max} side slots")]
    TooManySide {
        /// Subsystems assigned.
        count: usize,
        /// Slots available.
        max: usize,
    },
    /// A subsystem was placed in a slot its class does not allow.
    #[error("{kind} cannot be mounted in a {slot} slot")]
    WrongSlot {
        /// Kind that was misplaced.
        kind: SubsystemType,
        /// Slot group it was placed in.
        slot: SlotGroup,
    },
    /// A built-in subsystem was placed in a configurable slot.
    #[error("{kind} is built into every hull and cannot be mounted")]
    FixedSubsystem {
        /// Kind that was misplaced.
        kind: SubsystemType,
    },
}

/// Configurable slot groups named in loadout errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotGroup {
    /// Forward slots.
    Forward,
    /// Side slots.
    Side,
}

impl fmt::Display for SlotGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => f.write_str("forward"),
            Self::Side => f.write_str("side"),
        }
    }
}

/// Reasons a setup operation (missions, loadouts, deployment, phase changes) fails.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    /// The operation is not allowed in the current phase.
    #[error("operation requires the {expected} phase (current phase: {actual})")]
    WrongPhase {
        /// Phase the operation requires.
        expected: GamePhase,
        /// Phase the game was in.
        actual: GamePhase,
    },
    /// The referenced player does not exist.
    #[error("{player} is not seated in this game")]
    UnknownPlayer {
        /// Identifier that failed to resolve.
        player: PlayerId,
    },
    /// Not enough players to deal destroy missions.
    #[error("at least {required} players are required, got {actual}")]
    NotEnoughPlayers {
        /// Minimum seat count.
        required: usize,
        /// Seats provided.
        actual: usize,
    },
    /// Not enough planets to deal cargo missions.
    #[error("at least {required} planets are required, got {actual}")]
    NotEnoughPlanets {
        /// Minimum planet count.
        required: usize,
        /// Planets provided.
        actual: usize,
    },
    /// The same player identifier was seated twice.
    #[error("{player} is seated more than once")]
    DuplicatePlayer {
        /// Duplicated identifier.
        player: PlayerId,
    },
    /// The player already submitted a loadout.
    #[error("{player} has already submitted a loadout")]
    LoadoutAlreadySubmitted {
        /// Player who resubmitted.
        player: PlayerId,
    },
    /// The loadout failed validation.
    #[error("invalid loadout: {0}")]
    InvalidLoadout(#[from] LoadoutError),
    /// The player already deployed their ship.
    #[error("{player} has already deployed")]
    AlreadyDeployed {
        /// Player who redeployed.
        player: PlayerId,
    },
    /// The deployment sector does not exist on the deployment ring.
    #[error("sector {sector} is not on the deployment ring ({sectors} sectors)")]
    InvalidSector {
        /// Requested sector.
        sector: u32,
        /// Sectors on the deployment ring.
        sectors: u32,
    },
    /// Some players have not deployed yet.
    #[error("{player} has not deployed yet")]
    NotDeployed {
        /// First player still waiting to deploy.
        player: PlayerId,
    },
}

/// Error returned when a turn is rejected; the input state is left untouched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("turn rejected: {}", describe(.errors))]
pub struct TurnRejection {
    /// Validation failures that caused the rejection.
    pub errors: Vec<ActionError>,
}

impl TurnRejection {
    /// Wraps a single validation failure.
    #[must_use]
    pub fn single(error: ActionError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

fn describe(errors: &[ActionError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_transfer_errors_carry_player_facing_text() {
        assert_eq!(
            ActionError::NotOnOutermostRing.to_string(),
            "not on outermost ring"
        );
        assert_eq!(
            ActionError::EnginesBelowLevel { required: 3 }.to_string(),
            "requires engines at level 3"
        );
        assert_eq!(
            ActionError::NotFacingPrograde.to_string(),
            "must be facing prograde"
        );
    }

    #[test]
    fn rejection_joins_every_reason() {
        let rejection = TurnRejection {
            errors: vec![ActionError::AlreadyMoved, ActionError::SelfTarget],
        };
        assert_eq!(
            rejection.to_string(),
            "turn rejected: ship has already moved this turn; cannot target own ship"
        );
    }
}
