#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Orbital mechanics: drift, coasting, burns, rotation and well transfers.
//!
//! Ships only drift while executing their own coast or burn. Every manoeuvre
//! validates completely before it touches the ship, so a rejected manoeuvre
//! leaves the ship exactly as it was.

use gravity_wells_core::{
    wells, ActionError, BurnIntensity, Facing, Position, ShipState, SubsystemType, TransferState,
    WellId,
};
use gravity_wells_system_heat::record_use;

/// Engine energy required to leave a well.
pub const WELL_TRANSFER_ENGINE_LEVEL: u32 = 3;
/// Reaction mass spent by a well transfer.
pub const WELL_TRANSFER_REACTION_MASS: u32 = 2;

/// Coordinates before and after a manoeuvre.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovementReport {
    /// Position before the manoeuvre.
    pub from: Position,
    /// Position after the manoeuvre.
    pub to: Position,
    /// Reaction mass consumed.
    pub reaction_mass_spent: u32,
    /// Reaction mass collected by the scoop.
    pub reaction_mass_harvested: u32,
}

/// Advances a position along its ring by the ring's velocity.
///
/// Positions on rings that do not exist are returned unchanged.
#[must_use]
pub fn orbital_drift(position: Position) -> Position {
    match wells::ring(position.well, position.ring) {
        Some(ring) if ring.sectors > 0 => Position {
            sector: (position.sector + ring.velocity) % ring.sectors,
            ..position
        },
        _ => position,
    }
}

/// Maps a sector onto a ring with a different sector count, preserving angle.
#[must_use]
pub fn map_sector(sector: u32, from_sectors: u32, to_sectors: u32) -> u32 {
    if from_sectors == 0 || to_sectors == 0 {
        return 0;
    }
    let mapped = u64::from(sector) * u64::from(to_sectors) / u64::from(from_sectors);
    u32::try_from(mapped).unwrap_or(0) % to_sectors
}

/// Signed shortest distance from `from` to `to` on a ring of `sectors` sectors.
///
/// Positive values point along the orbital direction. Ties resolve forward.
#[must_use]
pub fn sector_distance(from: u32, to: u32, sectors: u32) -> i64 {
    if sectors == 0 {
        return 0;
    }
    let sectors = i64::from(sectors);
    let forward = (i64::from(to) - i64::from(from)).rem_euclid(sectors);
    if forward * 2 > sectors {
        forward - sectors
    } else {
        forward
    }
}

/// Turns the ship to `facing` using its rotation thrusters.
pub fn rotate(ship: &mut ShipState, facing: Facing) -> Result<(), ActionError> {
    let thrusters = operational_subsystem(ship, SubsystemType::Rotation)?;
    if ship.facing == facing {
        return Err(ActionError::AlreadyFacing { facing });
    }

    ship.facing = facing;
    let _ = record_use(ship, thrusters);
    Ok(())
}

/// Drifts along the current ring, harvesting reaction mass with a powered scoop.
pub fn coast(ship: &mut ShipState) -> Result<MovementReport, ActionError> {
    let from = ship.position;
    ship.position = orbital_drift(from);

    let scoop = ship.subsystems.iter().position(|subsystem| {
        subsystem.kind == SubsystemType::Scoop
            && subsystem.is_operational()
            && !subsystem.used_this_turn
    });
    let mut harvested = 0;
    if let Some(index) = scoop {
        let yield_ = ship.subsystems[index].allocated_energy;
        harvested = yield_.min(ship.max_reaction_mass.saturating_sub(ship.reaction_mass));
        ship.reaction_mass += harvested;
        let _ = record_use(ship, index);
    }

    Ok(MovementReport {
        from,
        to: ship.position,
        reaction_mass_spent: 0,
        reaction_mass_harvested: harvested,
    })
}

/// Drifts, then burns to a higher (prograde) or lower (retrograde) ring.
pub fn burn(ship: &mut ShipState, intensity: BurnIntensity) -> Result<MovementReport, ActionError> {
    let engines = operational_subsystem(ship, SubsystemType::Engines)?;
    let cost = intensity.reaction_mass_cost();
    if ship.reaction_mass < cost {
        return Err(ActionError::InsufficientReactionMass {
            required: cost,
            available: ship.reaction_mass,
        });
    }

    let from = ship.position;
    let delta = intensity.ring_delta();
    let target_ring = match ship.facing {
        Facing::Prograde => from.ring.checked_add(delta),
        Facing::Retrograde => from.ring.checked_sub(delta),
    }
    .unwrap_or(0);
    let out_of_range = || ActionError::RingOutOfRange {
        well: from.well,
        ring: target_ring,
    };
    let origin_ring = wells::ring(from.well, from.ring).ok_or_else(out_of_range)?;
    let destination_ring = wells::ring(from.well, target_ring).ok_or_else(out_of_range)?;

    let drifted = orbital_drift(from);
    ship.position = Position {
        ring: target_ring,
        sector: map_sector(
            drifted.sector,
            origin_ring.sectors,
            destination_ring.sectors,
        ),
        ..drifted
    };
    ship.reaction_mass -= cost;
    ship.transfer_state = Some(TransferState {
        from_ring: from.ring,
        to_ring: target_ring,
        reaction_mass_spent: cost,
    });
    let _ = record_use(ship, engines);

    Ok(MovementReport {
        from,
        to: ship.position,
        reaction_mass_spent: cost,
        reaction_mass_harvested: 0,
    })
}

/// Jumps from a transfer point to its pair in the `destination` well.
///
/// Facing is preserved across the jump.
pub fn well_transfer(
    ship: &mut ShipState,
    destination: WellId,
) -> Result<MovementReport, ActionError> {
    let from = ship.position;
    let point = wells::transfer_point(from.well, destination).ok_or(
        ActionError::NoTransferRoute {
            from: from.well,
            to: destination,
        },
    )?;

    let outermost = wells::well(from.well).map_or(0, wells::GravityWell::outermost_ring);
    if from.ring != outermost {
        return Err(ActionError::NotOnOutermostRing);
    }
    if from != point.from {
        return Err(ActionError::NotAtTransferPoint);
    }

    let engines = ship
        .find_subsystem(SubsystemType::Engines)
        .ok_or(ActionError::MissingSubsystem {
            kind: SubsystemType::Engines,
        })?;
    let engine = &ship.subsystems[engines];
    if engine.is_broken {
        return Err(ActionError::SubsystemBroken {
            kind: SubsystemType::Engines,
        });
    }
    if engine.allocated_energy < WELL_TRANSFER_ENGINE_LEVEL {
        return Err(ActionError::EnginesBelowLevel {
            required: WELL_TRANSFER_ENGINE_LEVEL,
        });
    }
    if engine.used_this_turn {
        return Err(ActionError::AlreadyUsed {
            kind: SubsystemType::Engines,
        });
    }
    if ship.facing != Facing::Prograde {
        return Err(ActionError::NotFacingPrograde);
    }
    if ship.reaction_mass < WELL_TRANSFER_REACTION_MASS {
        return Err(ActionError::InsufficientReactionMass {
            required: WELL_TRANSFER_REACTION_MASS,
            available: ship.reaction_mass,
        });
    }

    ship.position = point.to;
    ship.reaction_mass -= WELL_TRANSFER_REACTION_MASS;
    let _ = record_use(ship, engines);

    Ok(MovementReport {
        from,
        to: ship.position,
        reaction_mass_spent: WELL_TRANSFER_REACTION_MASS,
        reaction_mass_harvested: 0,
    })
}

fn operational_subsystem(ship: &ShipState, kind: SubsystemType) -> Result<usize, ActionError> {
    let index = ship
        .find_subsystem(kind)
        .ok_or(ActionError::MissingSubsystem { kind })?;
    let subsystem = &ship.subsystems[index];
    if subsystem.is_broken {
        return Err(ActionError::SubsystemBroken { kind });
    }
    if !subsystem.is_powered {
        return Err(ActionError::SubsystemUnpowered { kind });
    }
    if subsystem.used_this_turn {
        return Err(ActionError::AlreadyUsed { kind });
    }
    Ok(index)
}
