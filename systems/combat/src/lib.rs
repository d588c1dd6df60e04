#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Weapon validation and damage resolution.
//!
//! A shot is rolled on a d10 supplied by the caller. Shields soak damage
//! before the hull, turning it into heat. Critical hits break a subsystem the
//! attacker names, but only when some damage got through to the hull.

use gravity_wells_core::{
    wells, ActionError, DiceRoller, Facing, PlayerId, ShipState, SubsystemType,
};
use gravity_wells_system_energy::{deallocate, release_all};
use gravity_wells_system_heat::{add_heat, record_use};
use gravity_wells_system_movement::sector_distance;

/// Critical chance used when no attacker is known.
pub const DEFAULT_CRITICAL_CHANCE: u32 = 10;
/// Critical chance added by each powered, intact sensor array.
pub const SENSOR_ARRAY_BONUS: u32 = 20;
/// Lowest roll that can ever be critical; a natural 1 always misses.
pub const MIN_CRITICAL_THRESHOLD: u8 = 2;
/// Highest critical threshold; above every face, so no roll can be critical.
pub const MAX_CRITICAL_THRESHOLD: u8 = 11;

/// Maximum sector separation for laser fire.
pub const LASER_RANGE: i64 = 3;
/// Energy a railgun needs to fire.
pub const RAILGUN_CHARGE: u32 = 4;
/// Damage dealt by a railgun slug.
pub const RAILGUN_DAMAGE: u32 = 4;
/// Maximum sectors ahead a railgun slug travels.
pub const RAILGUN_RANGE: u32 = 6;
/// Energy a missile launcher needs to fire.
pub const MISSILE_LAUNCH_CHARGE: u32 = 2;
/// Damage dealt by a missile on impact.
pub const MISSILE_DAMAGE: u32 = 3;

/// How a single roll resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    /// The shot missed.
    Miss,
    /// The shot hit.
    Hit,
    /// The shot hit and may break the declared subsystem.
    Critical,
}

/// Full account of a resolved attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HitResult {
    /// How the roll resolved.
    pub outcome: HitOutcome,
    /// Face shown by the die.
    pub roll: u8,
    /// Damage soaked by shields and converted to heat.
    pub damage_to_heat: u32,
    /// Damage applied to the hull.
    pub damage_to_hull: u32,
    /// Subsystem kind broken by a critical, if any.
    pub critical_broken: Option<SubsystemType>,
    /// Set when the defender's hull reached zero.
    pub destroyed: bool,
}

/// Validated shot ready to be discharged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FireSolution {
    /// Index of the firing weapon.
    pub weapon: usize,
    /// Kind of the firing weapon.
    pub kind: SubsystemType,
    /// Damage the shot carries; missiles deliver theirs on impact.
    pub damage: u32,
}

impl FireSolution {
    /// Reports whether the shot launches a missile instead of hitting directly.
    #[must_use]
    pub fn launches_missile(&self) -> bool {
        self.kind == SubsystemType::Missiles
    }
}

/// Critical chance of the attacker, including sensor array bonuses.
#[must_use]
pub fn effective_critical_chance(attacker: Option<&ShipState>) -> u32 {
    let Some(attacker) = attacker else {
        return DEFAULT_CRITICAL_CHANCE;
    };
    let sensors = attacker
        .subsystems_of(SubsystemType::SensorArray)
        .filter(|sensor| sensor.is_operational())
        .count();
    attacker
        .critical_chance
        .saturating_add(SENSOR_ARRAY_BONUS.saturating_mul(u32::try_from(sensors).unwrap_or(0)))
}

/// Lowest roll that counts as a critical for the provided chance.
#[must_use]
pub fn critical_threshold(chance: u32) -> u8 {
    let tenths = chance.saturating_add(5) / 10;
    let threshold = 11_u32.saturating_sub(tenths);
    let clamped = threshold.clamp(
        u32::from(MIN_CRITICAL_THRESHOLD),
        u32::from(MAX_CRITICAL_THRESHOLD),
    );
    u8::try_from(clamped).unwrap_or(MAX_CRITICAL_THRESHOLD)
}

/// Classifies a roll against a critical threshold.
#[must_use]
pub const fn classify_roll(roll: u8, threshold: u8) -> HitOutcome {
    if roll <= 1 {
        HitOutcome::Miss
    } else if roll >= threshold {
        HitOutcome::Critical
    } else {
        HitOutcome::Hit
    }
}

/// Applies `damage` to the defender for an already rolled die.
pub fn apply_damage_with_shields(
    defender: &mut ShipState,
    damage: u32,
    critical_target: SubsystemType,
    roll: u8,
    attacker: Option<&ShipState>,
) -> HitResult {
    let outcome = classify_roll(roll, critical_threshold(effective_critical_chance(attacker)));
    let mut result = HitResult {
        outcome,
        roll,
        damage_to_heat: 0,
        damage_to_hull: 0,
        critical_broken: None,
        destroyed: defender.is_destroyed(),
    };
    if outcome == HitOutcome::Miss {
        return result;
    }

    let mut remaining = damage;
    for index in 0..defender.subsystems.len() {
        if remaining == 0 {
            break;
        }
        let shield = &defender.subsystems[index];
        if shield.kind != SubsystemType::Shields || !shield.is_operational() {
            continue;
        }
        let absorbed = deallocate(defender, index, remaining).unwrap_or(0);
        remaining -= absorbed;
        result.damage_to_heat += absorbed;
    }
    add_heat(defender, result.damage_to_heat);

    defender.hit_points = defender.hit_points.saturating_sub(remaining);
    result.damage_to_hull = remaining;

    if outcome == HitOutcome::Critical && result.damage_to_hull > 0 {
        result.critical_broken = break_subsystem(defender, critical_target);
    }

    result.destroyed = defender.is_destroyed();
    result
}

/// Rolls the die and applies the attack.
pub fn resolve_attack<D: DiceRoller + ?Sized>(
    defender: &mut ShipState,
    damage: u32,
    critical_target: SubsystemType,
    attacker: Option<&ShipState>,
    dice: &mut D,
) -> HitResult {
    let roll = dice.roll_d10();
    apply_damage_with_shields(defender, damage, critical_target, roll, attacker)
}

fn break_subsystem(ship: &mut ShipState, kind: SubsystemType) -> Option<SubsystemType> {
    let index = ship
        .subsystems
        .iter()
        .position(|subsystem| subsystem.kind == kind && !subsystem.is_broken)?;
    let lost = release_all(ship, index);
    let subsystem = &mut ship.subsystems[index];
    subsystem.is_broken = true;
    subsystem.is_powered = false;
    add_heat(ship, lost);
    Some(kind)
}

/// Checks that `weapon` can fire at `target` and describes the shot.
pub fn validate_fire(
    attacker: &ShipState,
    weapon: usize,
    target_id: PlayerId,
    target: &ShipState,
) -> Result<FireSolution, ActionError> {
    let subsystem = attacker
        .subsystem(weapon)
        .ok_or(ActionError::UnknownSubsystem { index: weapon })?;
    let kind = subsystem.kind;
    if !kind.is_weapon() {
        return Err(ActionError::NotAWeapon { kind });
    }
    if subsystem.is_broken {
        return Err(ActionError::SubsystemBroken { kind });
    }
    if subsystem.used_this_turn {
        return Err(ActionError::AlreadyUsed { kind });
    }
    if target.is_destroyed() {
        return Err(ActionError::TargetDestroyed { target: target_id });
    }

    let energy = subsystem.allocated_energy;
    let out_of_range = ActionError::TargetOutOfRange {
        weapon: kind,
        target: target_id,
    };
    let from = attacker.position;
    let to = target.position;
    let same_ring = from.well == to.well && from.ring == to.ring;
    let sectors = wells::ring(from.well, from.ring).map_or(0, |ring| ring.sectors);

    let damage = match kind {
        SubsystemType::Laser => {
            if energy < 1 {
                return Err(ActionError::WeaponNotCharged { kind, required: 1 });
            }
            if !same_ring || sector_distance(from.sector, to.sector, sectors).abs() > LASER_RANGE {
                return Err(out_of_range);
            }
            energy
        }
        SubsystemType::Railgun => {
            if energy < RAILGUN_CHARGE {
                return Err(ActionError::WeaponNotCharged {
                    kind,
                    required: RAILGUN_CHARGE,
                });
            }
            if !same_ring || sectors == 0 {
                return Err(out_of_range);
            }
            let offset = i64::from(to.sector) - i64::from(from.sector);
            let ahead = match attacker.facing {
                Facing::Prograde => offset.rem_euclid(i64::from(sectors)),
                Facing::Retrograde => (-offset).rem_euclid(i64::from(sectors)),
            };
            if !(1..=i64::from(RAILGUN_RANGE)).contains(&ahead) {
                return Err(out_of_range);
            }
            RAILGUN_DAMAGE
        }
        SubsystemType::Missiles => {
            if energy < MISSILE_LAUNCH_CHARGE {
                return Err(ActionError::WeaponNotCharged {
                    kind,
                    required: MISSILE_LAUNCH_CHARGE,
                });
            }
            if subsystem.ammo.unwrap_or(0) == 0 {
                return Err(ActionError::OutOfAmmo);
            }
            if from.well != to.well {
                return Err(out_of_range);
            }
            MISSILE_DAMAGE
        }
        _ => return Err(ActionError::NotAWeapon { kind }),
    };

    Ok(FireSolution {
        weapon,
        kind,
        damage,
    })
}

/// Marks the weapon as used, generating its heat and spending ammunition.
pub fn discharge(attacker: &mut ShipState, solution: &FireSolution) -> u32 {
    let heat = record_use(attacker, solution.weapon);
    if let Some(ammo) = attacker
        .subsystem_mut(solution.weapon)
        .and_then(|subsystem| subsystem.ammo.as_mut())
    {
        *ammo = ammo.saturating_sub(1);
    }
    heat
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_follow_critical_chance() {
        assert_eq!(critical_threshold(10), 10);
        assert_eq!(critical_threshold(30), 8);
        assert_eq!(critical_threshold(0), MAX_CRITICAL_THRESHOLD);
        assert_eq!(critical_threshold(4), MAX_CRITICAL_THRESHOLD);
        assert_eq!(critical_threshold(250), MIN_CRITICAL_THRESHOLD);
        assert_eq!(classify_roll(10, critical_threshold(0)), HitOutcome::Hit);
    }

    #[test]
    fn natural_one_always_misses() {
        assert_eq!(classify_roll(1, 2), HitOutcome::Miss);
        assert_eq!(classify_roll(2, 2), HitOutcome::Critical);
        assert_eq!(classify_roll(9, 10), HitOutcome::Hit);
        assert_eq!(classify_roll(10, 10), HitOutcome::Critical);
    }

    #[test]
    fn missing_attacker_uses_default_chance() {
        assert_eq!(effective_critical_chance(None), DEFAULT_CRITICAL_CHANCE);
    }
}
