#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tracks thermal load and converts excess heat into hull damage.
//!
//! Heat accumulates from subsystem use, shield absorption and critical
//! breaks. It is evaluated once per player per turn, at the moment play passes
//! to them: heat above the ship's dissipation damages the hull directly and
//! the ledger is then cleared.

use gravity_wells_core::{ShipState, SubsystemType};

/// Extra dissipation granted by each intact radiator.
pub const RADIATOR_DISSIPATION: u32 = 3;

/// Outcome of a heat evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeatReport {
    /// Heat held before the evaluation.
    pub heat: u32,
    /// Dissipation applied during the evaluation.
    pub dissipation: u32,
    /// Hull damage dealt by the excess heat.
    pub damage: u32,
}

impl HeatReport {
    /// Reports whether the evaluation damaged the hull.
    #[must_use]
    pub const fn caused_damage(&self) -> bool {
        self.damage > 0
    }
}

/// Marks a subsystem as used and adds heat equal to its allocated energy.
///
/// A subsystem generates heat at most once per turn; repeated calls and
/// unknown indices return zero.
pub fn record_use(ship: &mut ShipState, index: usize) -> u32 {
    let Some(subsystem) = ship.subsystem_mut(index) else {
        return 0;
    };
    if subsystem.used_this_turn {
        return 0;
    }

    subsystem.used_this_turn = true;
    let generated = subsystem.allocated_energy;
    add_heat(ship, generated);
    generated
}

/// Adds heat to the ship's ledger.
pub fn add_heat(ship: &mut ShipState, amount: u32) {
    ship.heat = ship.heat.saturating_add(amount);
}

/// Dissipation of the hull plus every radiator that is not broken.
#[must_use]
pub fn effective_dissipation(ship: &ShipState) -> u32 {
    let radiators = ship
        .subsystems_of(SubsystemType::Radiator)
        .filter(|radiator| !radiator.is_broken)
        .count();
    ship.dissipation_capacity
        .saturating_add(RADIATOR_DISSIPATION.saturating_mul(u32::try_from(radiators).unwrap_or(0)))
}

/// Applies excess heat to the hull, bypassing shields, and clears the ledger.
///
/// The reset is unconditional, so evaluating twice in a row never deals
/// damage the second time.
pub fn evaluate(ship: &mut ShipState) -> HeatReport {
    let heat = ship.heat;
    let dissipation = effective_dissipation(ship);
    let damage = heat.saturating_sub(dissipation);

    ship.hit_points = ship.hit_points.saturating_sub(damage);
    ship.heat = 0;

    HeatReport {
        heat,
        dissipation,
        damage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gravity_wells_core::{wells, Facing, Position};
    use gravity_wells_system_ship_factory::create_initial_ship_state;

    fn ship() -> ShipState {
        create_initial_ship_state(Position::new(wells::BLACK_HOLE, 4, 0), Facing::Prograde, None)
            .expect("default loadout is valid")
    }

    #[test]
    fn heat_within_dissipation_is_harmless() {
        let mut ship = ship();
        let radiator = ship
            .find_subsystem(SubsystemType::Radiator)
            .expect("default loadout mounts a radiator");
        ship.subsystems[radiator].is_broken = true;
        ship.heat = 5;

        let report = evaluate(&mut ship);

        assert!(!report.caused_damage());
        assert_eq!(ship.hit_points, ship.max_hit_points);
        assert_eq!(ship.heat, 0);
    }

    #[test]
    fn record_use_counts_once_per_turn() {
        let mut ship = ship();
        ship.subsystems[0].allocated_energy = 3;
        ship.subsystems[0].is_powered = true;

        assert_eq!(record_use(&mut ship, 0), 3);
        assert_eq!(record_use(&mut ship, 0), 0);
        assert_eq!(record_use(&mut ship, 42), 0);
        assert_eq!(ship.heat, 3);
    }
}
