use gravity_wells_core::{
    wells, Facing, Loadout, LoadoutError, Position, SubsystemType, FORWARD_SLOT_COUNT,
};
use gravity_wells_system_ship_factory::{
    create_initial_ship_state, respawn, validate_loadout, BASE_HIT_POINTS, BASE_REACTOR_CAPACITY,
};

#[test]
fn fresh_ships_start_cold_and_fully_charged() {
    let position = Position::new(wells::BLACK_HOLE, 4, 12);
    let ship = create_initial_ship_state(position, Facing::Retrograde, None)
        .expect("default loadout is valid");

    assert_eq!(ship.position, position);
    assert_eq!(ship.facing, Facing::Retrograde);
    assert_eq!(ship.hit_points, BASE_HIT_POINTS);
    assert_eq!(ship.reactor.available_energy, BASE_REACTOR_CAPACITY);
    assert_eq!(ship.heat, 0);
    assert!(ship.energy_is_conserved());
    assert!(ship.subsystems.iter().all(|subsystem| !subsystem.is_powered));
}

#[test]
fn overfull_loadouts_are_rejected() {
    let loadout = Loadout {
        forward: vec![
            SubsystemType::Laser,
            SubsystemType::Laser,
            SubsystemType::Shields,
        ],
        side: Vec::new(),
    };

    let result = create_initial_ship_state(
        Position::new(wells::BLACK_HOLE, 4, 0),
        Facing::Prograde,
        Some(&loadout),
    );

    assert_eq!(
        result,
        Err(LoadoutError::TooManyForward {
            count: 3,
            max: FORWARD_SLOT_COUNT,
        }),
        "three forward subsystems cannot fit two slots",
    );
}

#[test]
fn respawn_restores_a_pristine_hull_with_the_same_loadout() {
    let loadout = Loadout {
        forward: vec![SubsystemType::Laser, SubsystemType::Scoop],
        side: vec![SubsystemType::Shields, SubsystemType::SensorArray],
    };
    validate_loadout(&loadout).expect("loadout is valid");

    let mut wreck = create_initial_ship_state(
        Position::new(wells::ALPHA, 2, 5),
        Facing::Retrograde,
        Some(&loadout),
    )
    .expect("loadout is valid");
    wreck.hit_points = 0;
    wreck.heat = 9;
    wreck.subsystems[2].is_broken = true;

    let anchor = Position::new(wells::BLACK_HOLE, 4, 7);
    let rebuilt = respawn(&wreck, anchor);

    assert_eq!(rebuilt.position, anchor);
    assert_eq!(rebuilt.loadout, loadout);
    assert_eq!(rebuilt.hit_points, BASE_HIT_POINTS);
    assert_eq!(rebuilt.heat, 0);
    assert!(rebuilt.subsystems.iter().all(|subsystem| !subsystem.is_broken));
    assert_eq!(
        rebuilt
            .subsystems
            .iter()
            .map(|subsystem| subsystem.kind)
            .collect::<Vec<_>>(),
        wreck
            .subsystems
            .iter()
            .map(|subsystem| subsystem.kind)
            .collect::<Vec<_>>(),
    );
}
