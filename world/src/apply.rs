use gravity_wells_core::{
    CargoId, CargoState, Command, DiceRoller, GamePhase, GameState, LogEntry, LogKind, Missile,
    MissileId, PlayerId,
};
use gravity_wells_system_combat::{HitOutcome, HitResult};
use gravity_wells_system_missiles::{detonate, retrack};
use tracing::{debug, info, warn};

/// Applies a system command to the match, appending its log entries.
///
/// Commands that refer to missiles, cargo or missions that no longer exist are
/// ignored, and a detonation against a ship that was destroyed earlier in the
/// same batch loses the missile instead.
pub fn apply<D: DiceRoller + ?Sized>(state: &mut GameState, command: Command, dice: &mut D) {
    debug!(?command, "applying command");
    match command {
        Command::TrackMissile { missile, position } => {
            if let Some(flight) = state.missiles.iter_mut().find(|flight| flight.id == missile) {
                retrack(flight, position);
            }
        }
        Command::DetonateMissile { missile, target } => {
            let Some(flight) = take_missile(state, missile) else {
                return;
            };
            let owner = state.player(flight.owner).map(|seat| seat.ship.clone());
            let target_destroyed = state.player(target).map(|seat| seat.ship.is_destroyed());
            let (Some(owner_ship), Some(target_destroyed)) = (owner, target_destroyed) else {
                orphan(state, &flight);
                return;
            };
            if target_destroyed {
                lose(state, &flight);
                return;
            }
            let Some(seat) = state.player_mut(target) else {
                return;
            };
            let result = detonate(&mut seat.ship, &owner_ship, dice);
            log(
                state,
                flight.owner,
                LogKind::MissileHit,
                format!(
                    "missile {} struck {target}: {}",
                    missile.get(),
                    describe_hit(&result)
                ),
            );
        }
        Command::LoseMissile { missile, .. } => {
            if let Some(flight) = take_missile(state, missile) {
                lose(state, &flight);
            }
        }
        Command::OrphanMissile { missile } => {
            if let Some(flight) = take_missile(state, missile) {
                orphan(state, &flight);
            }
        }
        Command::ExpireMissile { missile } => {
            if let Some(flight) = take_missile(state, missile) {
                log(
                    state,
                    flight.owner,
                    LogKind::MissileExpired,
                    format!("missile {} burned out", missile.get()),
                );
            }
        }
        Command::LoadCargo {
            player,
            cargo,
            planet,
        } => {
            if set_cargo_state(state, player, cargo, CargoState::Aboard) {
                log(
                    state,
                    player,
                    LogKind::CargoPickedUp,
                    format!("picked up cargo {} at {planet}", cargo.get()),
                );
            }
        }
        Command::DeliverCargo {
            player,
            cargo,
            planet,
        } => {
            if set_cargo_state(state, player, cargo, CargoState::Delivered) {
                log(
                    state,
                    player,
                    LogKind::CargoDelivered,
                    format!("delivered cargo {} to {planet}", cargo.get()),
                );
            }
        }
        Command::CompleteMission { player, mission } => {
            let Some(seat) = state.player_mut(player) else {
                return;
            };
            let Some(entry) = seat
                .missions
                .iter_mut()
                .find(|entry| entry.id == mission && !entry.is_complete)
            else {
                return;
            };
            entry.is_complete = true;
            seat.completed_mission_count += 1;
            log(
                state,
                player,
                LogKind::MissionComplete,
                format!("completed mission {}", mission.get()),
            );
        }
        Command::DeclareWinner { winner, status } => {
            if state.phase == GamePhase::Ended {
                return;
            }
            state.phase = GamePhase::Ended;
            state.winner_id = Some(winner);
            state.status = status;
            info!(%winner, ?status, "game over");
            log(
                state,
                winner,
                LogKind::Victory,
                format!("{winner} completed enough missions to win"),
            );
        }
    }
}

fn take_missile(state: &mut GameState, id: MissileId) -> Option<Missile> {
    let index = state.missiles.iter().position(|missile| missile.id == id)?;
    Some(state.missiles.remove(index))
}

fn lose(state: &mut GameState, flight: &Missile) {
    log(
        state,
        flight.owner,
        LogKind::MissileLost,
        format!("missile {} lost track of {}", flight.id.get(), flight.target),
    );
}

fn orphan(state: &mut GameState, flight: &Missile) {
    warn!(missile = flight.id.get(), "orphaned missile removed");
    log(
        state,
        flight.owner,
        LogKind::MissileLost,
        format!("missile {} lost its owner or target", flight.id.get()),
    );
}

fn set_cargo_state(
    state: &mut GameState,
    player: PlayerId,
    cargo: CargoId,
    next: CargoState,
) -> bool {
    let Some(container) = state
        .player_mut(player)
        .and_then(|seat| seat.cargo.iter_mut().find(|container| container.id == cargo))
    else {
        return false;
    };
    container.state = next;
    true
}

fn log(state: &mut GameState, player: PlayerId, kind: LogKind, message: String) {
    let entry = LogEntry::new(state.turn, player, kind, message);
    state.turn_log.push(entry);
}

pub(crate) fn describe_hit(result: &HitResult) -> String {
    let mut text = match result.outcome {
        HitOutcome::Miss => return format!("missed (rolled {})", result.roll),
        HitOutcome::Hit => format!("hit (rolled {})", result.roll),
        HitOutcome::Critical => format!("critical hit (rolled {})", result.roll),
    };
    text.push_str(&format!(
        ", {} absorbed by shields, {} to hull",
        result.damage_to_heat, result.damage_to_hull
    ));
    if let Some(broken) = result.critical_broken {
        text.push_str(&format!(", {broken} broken"));
    }
    if result.destroyed {
        text.push_str(", ship destroyed");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_game, Seat};
    use gravity_wells_core::{FixedRoll, GameStatus, MissionKind};
    use gravity_wells_system_missiles::launch;

    fn two_player_game() -> GameState {
        let seats = [
            Seat::new(PlayerId::new(0), "vega"),
            Seat::new(PlayerId::new(1), "rigel"),
        ];
        let mut state = create_game(&seats, None, 1).expect("two seats can be dealt");
        state.phase = GamePhase::Active;
        state.turn = 1;
        state
    }

    #[test]
    fn misses_are_described_by_their_roll() {
        let result = HitResult {
            outcome: HitOutcome::Miss,
            roll: 1,
            damage_to_heat: 0,
            damage_to_hull: 0,
            critical_broken: None,
            destroyed: false,
        };
        assert_eq!(describe_hit(&result), "missed (rolled 1)");
    }

    #[test]
    fn missions_are_credited_once() {
        let mut state = two_player_game();
        let player = state.players[0].id;
        let mission = state.players[0]
            .missions
            .iter()
            .find(|mission| matches!(mission.kind, MissionKind::DestroyShip { .. }))
            .expect("every hand has a destroy mission")
            .id;
        let command = Command::CompleteMission { player, mission };

        apply(&mut state, command, &mut FixedRoll::new(5));
        apply(&mut state, command, &mut FixedRoll::new(5));

        assert_eq!(state.players[0].completed_mission_count, 1);
        assert_eq!(state.turn_log.len(), 1);
        assert_eq!(state.turn_log[0].kind, LogKind::MissionComplete);
    }

    #[test]
    fn the_game_ends_only_once() {
        let mut state = two_player_game();
        let mut dice = FixedRoll::new(5);

        apply(
            &mut state,
            Command::DeclareWinner {
                winner: PlayerId::new(1),
                status: GameStatus::Defeat,
            },
            &mut dice,
        );
        apply(
            &mut state,
            Command::DeclareWinner {
                winner: PlayerId::new(0),
                status: GameStatus::Victory,
            },
            &mut dice,
        );

        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.winner_id, Some(PlayerId::new(1)));
        assert_eq!(state.status, GameStatus::Defeat);
    }

    #[test]
    fn unknown_missiles_are_ignored() {
        let mut state = two_player_game();
        let before = state.clone();

        apply(
            &mut state,
            Command::ExpireMissile {
                missile: MissileId::new(7),
            },
            &mut FixedRoll::new(5),
        );

        assert_eq!(state, before);
    }

    #[test]
    fn detonations_against_wrecks_lose_the_missile() {
        let mut state = two_player_game();
        let id = state.allocate_missile_id();
        let position = state.players[1].ship.position;
        state.missiles.push(launch(
            id,
            PlayerId::new(0),
            PlayerId::new(1),
            position,
            state.turn,
            false,
        ));
        state.players[1].ship.hit_points = 0;

        apply(
            &mut state,
            Command::DetonateMissile {
                missile: id,
                target: PlayerId::new(1),
            },
            &mut FixedRoll::new(5),
        );

        assert!(state.missiles.is_empty());
        assert_eq!(state.players[1].ship.hit_points, 0);
        assert_eq!(state.turn_log.len(), 1);
        assert_eq!(state.turn_log[0].kind, LogKind::MissileLost);
    }
}
