#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Builds fresh ships from player loadouts.
//!
//! Every hull carries engines and rotation thrusters at fixed indices `0` and
//! `1`, followed by the forward slots and then the side slots in the order the
//! loadout lists them. Subsystem indices are therefore stable for the lifetime
//! of a ship and across respawns.

use gravity_wells_core::{
    Facing, Loadout, LoadoutError, Position, Reactor, ShipState, SlotClass, SlotGroup, Subsystem,
    SubsystemType, FORWARD_SLOT_COUNT, SIDE_SLOT_COUNT,
};

/// Hull integrity of a fresh ship.
pub const BASE_HIT_POINTS: u32 = 10;
/// Reactor output of a fresh ship.
pub const BASE_REACTOR_CAPACITY: u32 = 10;
/// Reaction mass carried without fuel tanks.
pub const BASE_REACTION_MASS: u32 = 10;
/// Extra reaction mass carried per fuel tank.
pub const FUEL_TANK_CAPACITY: u32 = 5;
/// Heat shed per evaluation before radiators are counted.
pub const BASE_DISSIPATION: u32 = 5;
/// Base critical chance in percentage points.
pub const BASE_CRITICAL_CHANCE: u32 = 10;

/// Index of the engines on every hull.
pub const ENGINES_INDEX: usize = 0;
/// Index of the rotation thrusters on every hull.
pub const ROTATION_INDEX: usize = 1;

/// Checks slot counts and slot classes of a loadout.
///
/// Slots may be left empty; built-in subsystems cannot be mounted.
pub fn validate_loadout(loadout: &Loadout) -> Result<(), LoadoutError> {
    if loadout.forward.len() > FORWARD_SLOT_COUNT {
        return Err(LoadoutError::TooManyForward {
            count: loadout.forward.len(),
            max: FORWARD_SLOT_COUNT,
        });
    }
    if loadout.side.len() > SIDE_SLOT_COUNT {
        return Err(LoadoutError::TooManySide {
            count: loadout.side.len(),
            max: SIDE_SLOT_COUNT,
        });
    }

    for &kind in &loadout.forward {
        check_slot(kind, SlotGroup::Forward)?;
    }
    for &kind in &loadout.side {
        check_slot(kind, SlotGroup::Side)?;
    }

    Ok(())
}

fn check_slot(kind: SubsystemType, slot: SlotGroup) -> Result<(), LoadoutError> {
    let fits = match (kind.slot_class(), slot) {
        (SlotClass::Fixed, _) => return Err(LoadoutError::FixedSubsystem { kind }),
        (SlotClass::Either, _) => true,
        (SlotClass::Forward, group) => group == SlotGroup::Forward,
        (SlotClass::Side, group) => group == SlotGroup::Side,
    };

    if fits {
        Ok(())
    } else {
        Err(LoadoutError::WrongSlot { kind, slot })
    }
}

/// Creates a fresh ship, using the default loadout unless overrides are given.
pub fn create_initial_ship_state(
    position: Position,
    facing: Facing,
    overrides: Option<&Loadout>,
) -> Result<ShipState, LoadoutError> {
    let loadout = match overrides {
        Some(loadout) => {
            validate_loadout(loadout)?;
            loadout.clone()
        }
        None => Loadout::default(),
    };

    Ok(build_ship(position, facing, loadout))
}

/// Rebuilds a destroyed ship at `position` with the loadout it was built from.
///
/// The previous hull is discarded entirely: energy, heat, damage, broken
/// subsystems and spent ammunition all reset.
#[must_use]
pub fn respawn(ship: &ShipState, position: Position) -> ShipState {
    build_ship(position, Facing::Prograde, ship.loadout.clone())
}

fn build_ship(position: Position, facing: Facing, loadout: Loadout) -> ShipState {
    let mut subsystems = Vec::with_capacity(2 + FORWARD_SLOT_COUNT + SIDE_SLOT_COUNT);
    subsystems.push(Subsystem::new(SubsystemType::Engines));
    subsystems.push(Subsystem::new(SubsystemType::Rotation));
    subsystems.extend(loadout.iter().map(Subsystem::new));

    let fuel_tanks = loadout
        .iter()
        .filter(|kind| *kind == SubsystemType::FuelTank)
        .count();
    let max_reaction_mass =
        BASE_REACTION_MASS + FUEL_TANK_CAPACITY * u32::try_from(fuel_tanks).unwrap_or(0);

    ShipState {
        position,
        facing,
        reaction_mass: max_reaction_mass,
        max_reaction_mass,
        hit_points: BASE_HIT_POINTS,
        max_hit_points: BASE_HIT_POINTS,
        subsystems,
        reactor: Reactor::new(BASE_REACTOR_CAPACITY),
        heat: 0,
        dissipation_capacity: BASE_DISSIPATION,
        transfer_state: None,
        loadout,
        critical_chance: BASE_CRITICAL_CHANCE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gravity_wells_core::wells;

    fn origin() -> Position {
        Position::new(wells::BLACK_HOLE, 4, 0)
    }

    #[test]
    fn fixed_subsystems_lead_the_index_order() {
        let ship = create_initial_ship_state(origin(), Facing::Prograde, None)
            .expect("default loadout is valid");

        assert_eq!(ship.subsystems[ENGINES_INDEX].kind, SubsystemType::Engines);
        assert_eq!(ship.subsystems[ROTATION_INDEX].kind, SubsystemType::Rotation);
        assert_eq!(ship.subsystems[2].kind, SubsystemType::Railgun);
        assert_eq!(ship.subsystems.len(), 2 + FORWARD_SLOT_COUNT + SIDE_SLOT_COUNT);
    }

    #[test]
    fn fuel_tanks_extend_reaction_mass() {
        let loadout = Loadout {
            forward: vec![SubsystemType::FuelTank],
            side: vec![SubsystemType::FuelTank, SubsystemType::Radiator],
        };
        let ship = create_initial_ship_state(origin(), Facing::Prograde, Some(&loadout))
            .expect("fuel tanks fit either slot");

        assert_eq!(ship.max_reaction_mass, BASE_REACTION_MASS + 2 * FUEL_TANK_CAPACITY);
        assert_eq!(ship.reaction_mass, ship.max_reaction_mass);
    }

    #[test]
    fn slot_classes_are_enforced() {
        let misplaced = Loadout {
            forward: vec![SubsystemType::Missiles],
            side: Vec::new(),
        };
        assert_eq!(
            validate_loadout(&misplaced),
            Err(LoadoutError::WrongSlot {
                kind: SubsystemType::Missiles,
                slot: SlotGroup::Forward,
            })
        );

        let fixed = Loadout {
            forward: Vec::new(),
            side: vec![SubsystemType::Engines],
        };
        assert_eq!(
            validate_loadout(&fixed),
            Err(LoadoutError::FixedSubsystem {
                kind: SubsystemType::Engines
            })
        );
    }
}
