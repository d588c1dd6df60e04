use gravity_wells_core::{wells, ActionError, Facing, Position, SubsystemType};
use gravity_wells_system_energy::{allocate, deallocate};
use gravity_wells_system_ship_factory::create_initial_ship_state;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Step {
    Allocate(usize, u32),
    Deallocate(usize, u32),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0usize..9, 0u32..6).prop_map(|(index, amount)| Step::Allocate(index, amount)),
        (0usize..9, 0u32..6).prop_map(|(index, amount)| Step::Deallocate(index, amount)),
    ]
}

proptest! {
    #[test]
    fn energy_is_conserved_for_any_sequence(steps in prop::collection::vec(step(), 0..64)) {
        let mut ship = create_initial_ship_state(
            Position::new(wells::BLACK_HOLE, 4, 0),
            Facing::Prograde,
            None,
        )
        .expect("default loadout is valid");

        for step in steps {
            let before = ship.clone();
            let outcome = match step {
                Step::Allocate(index, amount) => allocate(&mut ship, index, amount).map(|()| 0),
                Step::Deallocate(index, amount) => deallocate(&mut ship, index, amount),
            };
            if outcome.is_err() {
                prop_assert_eq!(&ship, &before);
            }

            prop_assert!(ship.energy_is_conserved());
            prop_assert!(ship.allocated_energy() <= ship.reactor.total_capacity);
            for subsystem in &ship.subsystems {
                prop_assert!(subsystem.allocated_energy <= subsystem.kind.max_energy());
                prop_assert_eq!(subsystem.is_powered, subsystem.allocated_energy > 0);
            }
        }
    }
}

#[test]
fn broken_subsystems_cannot_be_powered() {
    let mut ship = create_initial_ship_state(
        Position::new(wells::BLACK_HOLE, 4, 0),
        Facing::Prograde,
        None,
    )
    .expect("default loadout is valid");
    let laser = ship
        .find_subsystem(SubsystemType::Laser)
        .expect("default loadout mounts a laser");
    ship.subsystems[laser].is_broken = true;

    assert_eq!(
        allocate(&mut ship, laser, 1),
        Err(ActionError::SubsystemBroken {
            kind: SubsystemType::Laser,
        }),
    );
    assert_eq!(ship.reactor.available_energy, ship.reactor.total_capacity);
}

#[test]
fn reactor_limits_total_allocation() {
    let mut ship = create_initial_ship_state(
        Position::new(wells::BLACK_HOLE, 4, 0),
        Facing::Prograde,
        None,
    )
    .expect("default loadout is valid");
    let railgun = ship
        .find_subsystem(SubsystemType::Railgun)
        .expect("default loadout mounts a railgun");
    let laser = ship
        .find_subsystem(SubsystemType::Laser)
        .expect("default loadout mounts a laser");
    let shields = ship
        .find_subsystem(SubsystemType::Shields)
        .expect("default loadout mounts shields");

    allocate(&mut ship, railgun, 4).expect("railgun charges");
    allocate(&mut ship, laser, 4).expect("laser charges");

    assert_eq!(
        allocate(&mut ship, shields, 3),
        Err(ActionError::InsufficientEnergy {
            requested: 3,
            available: 2,
        }),
    );
}
