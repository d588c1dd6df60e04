#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Routes reactor energy between a ship's reactor and its subsystems.
//!
//! Every operation preserves the conservation invariant: the energy held by
//! the subsystems plus the reactor's available energy always equals the
//! reactor's total capacity. Failed operations leave the ship untouched.

use gravity_wells_core::{ActionError, ShipState};

/// Moves `amount` units of energy from the reactor into a subsystem.
///
/// Allocation is incremental: energy already routed into the subsystem stays
/// there. Broken subsystems cannot be powered, the reactor must cover the
/// whole request and the subsystem's ceiling must not be exceeded.
pub fn allocate(ship: &mut ShipState, index: usize, amount: u32) -> Result<(), ActionError> {
    let available = ship.reactor.available_energy;
    let subsystem = ship
        .subsystem_mut(index)
        .ok_or(ActionError::UnknownSubsystem { index })?;

    if subsystem.is_broken {
        return Err(ActionError::SubsystemBroken {
            kind: subsystem.kind,
        });
    }
    if amount > available {
        return Err(ActionError::InsufficientEnergy {
            requested: amount,
            available,
        });
    }
    let max = subsystem.kind.max_energy();
    if subsystem.allocated_energy.saturating_add(amount) > max {
        return Err(ActionError::ExceedsSubsystemCapacity {
            kind: subsystem.kind,
            max,
        });
    }

    subsystem.allocated_energy += amount;
    subsystem.is_powered = subsystem.allocated_energy > 0;
    ship.reactor.available_energy = available - amount;
    Ok(())
}

/// Returns up to `amount` units of energy from a subsystem to the reactor.
///
/// Deallocation never fails for a valid index; the released amount is clamped
/// to what the subsystem holds and is returned to the caller.
pub fn deallocate(ship: &mut ShipState, index: usize, amount: u32) -> Result<u32, ActionError> {
    let subsystem = ship
        .subsystem_mut(index)
        .ok_or(ActionError::UnknownSubsystem { index })?;

    let released = amount.min(subsystem.allocated_energy);
    subsystem.allocated_energy -= released;
    subsystem.is_powered = subsystem.allocated_energy > 0;

    let reactor = &mut ship.reactor;
    reactor.available_energy = reactor
        .available_energy
        .saturating_add(released)
        .min(reactor.total_capacity);
    Ok(released)
}

/// Returns every unit held by a subsystem to the reactor.
///
/// Unknown indices release nothing.
pub fn release_all(ship: &mut ShipState, index: usize) -> u32 {
    let held = ship
        .subsystem(index)
        .map_or(0, |subsystem| subsystem.allocated_energy);
    deallocate(ship, index, held).unwrap_or(0)
}
