//! Turn orchestration.
//!
//! A turn runs against a private clone of the incoming state. Actions are
//! dispatched in tier order, then missiles, missions, the active-player
//! pointer, heat and victory are resolved. The first invalid action discards
//! the clone, so a rejected turn can never leave partial effects behind.

use gravity_wells_core::{
    Action, ActionError, ActionKind, Command, DiceRoller, GamePhase, GameState, LogEntry, LogKind,
    PlayerId, ShipState, SubsystemType, TurnRejection,
};
use gravity_wells_system_combat::{discharge, resolve_attack, validate_fire};
use gravity_wells_system_energy::{allocate, deallocate};
use gravity_wells_system_heat::{evaluate, HeatReport};
use gravity_wells_system_missiles::{advance_missiles, launch};
use gravity_wells_system_missions::{check_destroy_missions, evaluate_victory, process_cargo};
use gravity_wells_system_movement::{burn, coast, orbital_drift, rotate, well_transfer};
use gravity_wells_system_ship_factory::respawn;
use tracing::{debug, info, warn};

use crate::{
    apply::{apply, describe_hit},
    setup::deployment_position,
};

/// Outcome of a committed turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    /// State after the turn; replaces the caller's state.
    pub state: GameState,
    /// Player who acted.
    pub player: PlayerId,
    /// Log entries appended during the turn.
    pub log: Vec<LogEntry>,
    /// Heat evaluation for the player who now has the move.
    pub heat: Option<HeatReport>,
    /// Winner declared at the end of the turn, if any.
    pub winner: Option<PlayerId>,
}

/// Resolves the active player's turn.
///
/// `state` is only read; on success the report carries the next state, on
/// failure every validation error found is returned and nothing changes.
pub fn execute_turn<D: DiceRoller + ?Sized>(
    state: &GameState,
    actions: &[Action],
    dice: &mut D,
) -> Result<TurnReport, TurnRejection> {
    if state.phase != GamePhase::Active {
        return Err(reject(ActionError::InvalidPhase { phase: state.phase }));
    }
    let actor = state.active_player_index;
    let Some(player) = state.active_player().map(|player| player.id) else {
        return Err(reject(ActionError::UnknownPlayer {
            player: PlayerId::new(u32::try_from(actor).unwrap_or(u32::MAX)),
        }));
    };

    let foreign: Vec<ActionError> = actions
        .iter()
        .filter(|action| action.player != player)
        .map(|action| ActionError::NotActivePlayer {
            player: action.player,
        })
        .collect();
    if !foreign.is_empty() {
        let rejection = TurnRejection { errors: foreign };
        warn!(%player, %rejection, "turn rejected");
        return Err(rejection);
    }

    let mut next = state.clone();
    let log_start = next.turn_log.len();
    let mut turn = Turn {
        state: &mut next,
        actor,
        player,
        moved: false,
        rotated: false,
    };

    turn.respawn_if_destroyed();
    turn.ship_mut().begin_turn();

    let mut ordered: Vec<&Action> = actions.iter().collect();
    ordered.sort_by_key(|action| (action.kind.tier(), action.kind.sequence()));
    for action in ordered {
        debug!(%player, action = action.kind.label(), "dispatching action");
        if let Err(error) = turn.dispatch(action.kind, dice) {
            let rejection = TurnRejection::single(error);
            warn!(%player, %rejection, "turn rejected");
            return Err(rejection);
        }
    }

    turn.advance_missiles(dice);
    turn.evaluate_missions(dice);
    let Turn { state: next_ref, .. } = turn;
    advance_active_player(next_ref);
    let heat = evaluate_incoming_heat(next_ref, dice);
    let winner = declare_winner(next_ref, dice);

    info!(
        %player,
        turn = next.turn,
        entries = next.turn_log.len() - log_start,
        "turn committed"
    );
    let log = next.turn_log[log_start..].to_vec();
    Ok(TurnReport {
        state: next,
        player,
        log,
        heat,
        winner,
    })
}

fn reject(error: ActionError) -> TurnRejection {
    let rejection = TurnRejection::single(error);
    warn!(%rejection, "turn rejected");
    rejection
}

struct Turn<'a> {
    state: &'a mut GameState,
    actor: usize,
    player: PlayerId,
    moved: bool,
    rotated: bool,
}

impl Turn<'_> {
    fn ship_mut(&mut self) -> &mut ShipState {
        &mut self.state.players[self.actor].ship
    }

    fn log(&mut self, kind: LogKind, message: impl Into<String>) {
        let entry = LogEntry::new(self.state.turn, self.player, kind, message);
        self.state.turn_log.push(entry);
    }

    fn respawn_if_destroyed(&mut self) {
        let seat = &mut self.state.players[self.actor];
        if !seat.ship.is_destroyed() {
            return;
        }
        let anchor = deployment_position(seat.deployment_sector.unwrap_or(0));
        seat.ship = respawn(&seat.ship, anchor);
        info!(player = %self.player, %anchor, "ship respawned");
        self.log(LogKind::Respawn, format!("ship respawned at {anchor}"));
    }

    fn dispatch<D: DiceRoller + ?Sized>(
        &mut self,
        action: ActionKind,
        dice: &mut D,
    ) -> Result<(), ActionError> {
        match action {
            ActionKind::AllocateEnergy { subsystem, amount } => {
                allocate(self.ship_mut(), subsystem, amount)?;
                let kind = self.subsystem_kind(subsystem);
                self.log(
                    LogKind::Allocate,
                    format!("allocated {amount} energy to {kind}"),
                );
            }
            ActionKind::DeallocateEnergy { subsystem, amount } => {
                let released = deallocate(self.ship_mut(), subsystem, amount)?;
                let kind = self.subsystem_kind(subsystem);
                self.log(
                    LogKind::Deallocate,
                    format!("released {released} energy from {kind}"),
                );
            }
            ActionKind::Rotate { facing, .. } => {
                if self.rotated {
                    return Err(ActionError::AlreadyRotated);
                }
                rotate(self.ship_mut(), facing)?;
                self.rotated = true;
                self.log(LogKind::Rotate, format!("rotated to {facing}"));
            }
            ActionKind::Coast { .. } => {
                self.claim_movement()?;
                let report = coast(self.ship_mut())?;
                let message = if report.reaction_mass_harvested > 0 {
                    format!(
                        "coasted to {}, scooping {} reaction mass",
                        report.to, report.reaction_mass_harvested
                    )
                } else {
                    format!("coasted to {}", report.to)
                };
                self.log(LogKind::Coast, message);
            }
            ActionKind::Burn { intensity, .. } => {
                self.claim_movement()?;
                let report = burn(self.ship_mut(), intensity)?;
                self.log(
                    LogKind::Burn,
                    format!(
                        "burned from {} to {} using {} reaction mass",
                        report.from, report.to, report.reaction_mass_spent
                    ),
                );
            }
            ActionKind::WellTransfer { destination, .. } => {
                self.claim_movement()?;
                let report = well_transfer(self.ship_mut(), destination)?;
                self.log(
                    LogKind::WellTransfer,
                    format!("transferred from {} to {}", report.from, report.to),
                );
            }
            ActionKind::FireWeapon {
                weapon,
                target,
                critical_target,
                ..
            } => self.fire(weapon, target, critical_target, dice)?,
            ActionKind::Deploy { .. } => return Err(ActionError::DeployOutsideDeployment),
        }
        Ok(())
    }

    fn claim_movement(&mut self) -> Result<(), ActionError> {
        if self.moved {
            return Err(ActionError::AlreadyMoved);
        }
        self.moved = true;
        Ok(())
    }

    fn subsystem_kind(&self, index: usize) -> String {
        self.state.players[self.actor]
            .ship
            .subsystem(index)
            .map_or_else(|| format!("subsystem {index}"), |subsystem| subsystem.kind.to_string())
    }

    fn fire<D: DiceRoller + ?Sized>(
        &mut self,
        weapon: usize,
        target: PlayerId,
        critical_target: SubsystemType,
        dice: &mut D,
    ) -> Result<(), ActionError> {
        if target == self.player {
            return Err(ActionError::SelfTarget);
        }
        let defender = self
            .state
            .player_index(target)
            .ok_or(ActionError::UnknownPlayer { player: target })?;

        let solution = validate_fire(
            &self.state.players[self.actor].ship,
            weapon,
            target,
            &self.state.players[defender].ship,
        )?;
        let _ = discharge(self.ship_mut(), &solution);

        if solution.launches_missile() {
            let id = self.state.allocate_missile_id();
            let position = self.state.players[self.actor].ship.position;
            let missile = launch(id, self.player, target, position, self.state.turn, self.moved);
            self.state.missiles.push(missile);
            self.log(
                LogKind::MissileLaunched,
                format!("launched missile {} at {target}", id.get()),
            );
            return Ok(());
        }

        let attacker = self.state.players[self.actor].ship.clone();
        let result = resolve_attack(
            &mut self.state.players[defender].ship,
            solution.damage,
            critical_target,
            Some(&attacker),
            dice,
        );
        debug!(player = %self.player, %target, roll = result.roll, "weapon fired");
        self.log(
            LogKind::Fire,
            format!("fired {} at {target}: {}", solution.kind, describe_hit(&result)),
        );
        Ok(())
    }

    fn advance_missiles<D: DiceRoller + ?Sized>(&mut self, dice: &mut D) {
        let mut commands = Vec::new();
        advance_missiles(self.state, self.player, &mut commands);
        apply_all(self.state, commands, dice);
    }

    fn evaluate_missions<D: DiceRoller + ?Sized>(&mut self, dice: &mut D) {
        if !self.state.phase.bears_missions() {
            return;
        }
        let mut commands = Vec::new();
        check_destroy_missions(self.state, &mut commands);
        process_cargo(
            &self.state.players[self.actor],
            &self.state.stations,
            &mut commands,
        );
        apply_all(self.state, commands, dice);
    }
}

fn apply_all<D: DiceRoller + ?Sized>(state: &mut GameState, commands: Vec<Command>, dice: &mut D) {
    for command in commands {
        apply(state, command, dice);
    }
}

fn advance_active_player(state: &mut GameState) {
    let seats = state.players.len().max(1);
    state.active_player_index = (state.active_player_index + 1) % seats;
    if state.active_player_index == 0 {
        state.turn += 1;
        for station in &mut state.stations {
            station.position = orbital_drift(station.position);
        }
    }
}

fn evaluate_incoming_heat<D: DiceRoller + ?Sized>(
    state: &mut GameState,
    dice: &mut D,
) -> Option<HeatReport> {
    let turn = state.turn;
    let seat = state.players.get_mut(state.active_player_index)?;
    let player = seat.id;
    let report = evaluate(&mut seat.ship);
    if report.caused_damage() {
        debug!(%player, damage = report.damage, "heat damage");
        state.turn_log.push(LogEntry::new(
            turn,
            player,
            LogKind::HeatDamage,
            format!(
                "{} heat against {} dissipation dealt {} hull damage",
                report.heat, report.dissipation, report.damage
            ),
        ));
        if state.phase.bears_missions() {
            let mut commands = Vec::new();
            check_destroy_missions(state, &mut commands);
            apply_all(state, commands, dice);
        }
    }
    Some(report)
}

fn declare_winner<D: DiceRoller + ?Sized>(state: &mut GameState, dice: &mut D) -> Option<PlayerId> {
    let mut commands = Vec::new();
    evaluate_victory(state, &mut commands);
    let winner = commands.iter().find_map(|command| match command {
        Command::DeclareWinner { winner, .. } => Some(*winner),
        _ => None,
    });
    apply_all(state, commands, dice);
    winner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_game, Seat};
    use gravity_wells_core::{wells, Position};

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
    fn stations_drift_when_the_round_wraps() {
        let mut state = two_player_game();
        state.active_player_index = 1;
        let before = state.stations[0].position;

        advance_active_player(&mut state);

        assert_eq!(state.active_player_index, 0);
        assert_eq!(state.turn, 2);
        assert_eq!(
            state.stations[0].position,
            Position::new(before.well, wells::STATION_RING, before.sector + 1)
        );
    }
}
