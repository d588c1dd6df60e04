#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Homing missile tracking.
//!
//! Missiles advance during their owner's turn only. Each one drifts with its
//! ring, then homes on its target with a small per-turn fuel budget: ring
//! changes first, then sector steps along the shorter way round. A missile
//! that shares its target's exact position detonates.
//!
//! Tracking reads the game state and answers with [`Command`] values; the
//! world removes, moves and detonates missiles when it applies them.

use gravity_wells_core::{
    wells, Command, DiceRoller, GameState, Missile, MissileId, PlayerId, Position, ShipState,
    SubsystemType,
};
use gravity_wells_system_combat::{resolve_attack, HitResult, MISSILE_DAMAGE};
use gravity_wells_system_movement::{map_sector, orbital_drift, sector_distance};

/// Homing steps a missile can take per turn.
pub const MISSILE_FUEL_PER_TURN: u32 = 3;
/// Turns a missile survives before it burns out.
pub const MISSILE_LIFETIME: u32 = 3;
/// Subsystem a missile impact tries to break on a critical.
pub const MISSILE_CRITICAL_TARGET: SubsystemType = SubsystemType::Shields;

/// Queues one command per missile owned by `owner`, in identifier order.
pub fn advance_missiles(state: &GameState, owner: PlayerId, out: &mut Vec<Command>) {
    let mut owned: Vec<&Missile> = state
        .missiles
        .iter()
        .filter(|missile| missile.owner == owner)
        .collect();
    owned.sort_unstable_by_key(|missile| missile.id);

    out.reserve(owned.len());
    for missile in owned {
        out.push(track(state, missile));
    }
}

fn track(state: &GameState, missile: &Missile) -> Command {
    let id = missile.id;
    let target = state.player(missile.target);
    let (Some(_), Some(target)) = (state.player(missile.owner), target) else {
        return Command::OrphanMissile { missile: id };
    };

    let goal = target.ship.position;
    if goal.well != missile.position.well || target.ship.is_destroyed() {
        return Command::LoseMissile {
            missile: id,
            target: missile.target,
        };
    }

    let mut position = if missile.skip_orbital_this_turn {
        missile.position
    } else {
        orbital_drift(missile.position)
    };
    let mut fuel = MISSILE_FUEL_PER_TURN;
    while fuel > 0 && position != goal {
        position = step_toward(position, goal);
        fuel -= 1;
    }

    if position == goal {
        Command::DetonateMissile {
            missile: id,
            target: missile.target,
        }
    } else if missile.turns_alive + 1 >= MISSILE_LIFETIME {
        Command::ExpireMissile { missile: id }
    } else {
        Command::TrackMissile {
            missile: id,
            position,
        }
    }
}

/// Applies a missile impact to `defender`, rolling with the owner's crit odds.
pub fn detonate<D: DiceRoller + ?Sized>(
    defender: &mut ShipState,
    owner: &ShipState,
    dice: &mut D,
) -> HitResult {
    resolve_attack(
        defender,
        MISSILE_DAMAGE,
        MISSILE_CRITICAL_TARGET,
        Some(owner),
        dice,
    )
}

/// Advances a missile that keeps homing after this turn's steps.
pub fn retrack(missile: &mut Missile, position: Position) {
    missile.position = position;
    missile.skip_orbital_this_turn = false;
    missile.turns_alive += 1;
}

/// Moves one homing step from `from` toward `goal` within the same well.
#[must_use]
pub fn step_toward(from: Position, goal: Position) -> Position {
    let Some(current) = wells::ring(from.well, from.ring) else {
        return from;
    };

    if from.ring != goal.ring {
        let ring = if goal.ring > from.ring {
            from.ring + 1
        } else {
            from.ring - 1
        };
        return match wells::ring(from.well, ring) {
            Some(next) => Position {
                ring,
                sector: map_sector(from.sector, current.sectors, next.sectors),
                ..from
            },
            None => from,
        };
    }

    let sectors = current.sectors;
    let sector = match sector_distance(from.sector, goal.sector, sectors) {
        0 => from.sector,
        distance if distance > 0 => (from.sector + 1) % sectors,
        _ => (from.sector + sectors - 1) % sectors,
    };
    Position { sector, ..from }
}

/// Creates a missile at the launcher's position.
#[must_use]
pub fn launch(
    id: MissileId,
    owner: PlayerId,
    target: PlayerId,
    position: Position,
    turn: u32,
    owner_moved: bool,
) -> Missile {
    Missile {
        id,
        owner,
        target,
        position,
        turn_fired: turn,
        turns_alive: 0,
        skip_orbital_this_turn: owner_moved,
    }
}
