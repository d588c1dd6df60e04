//! Scripted opponent used to drive simulated matches.

use gravity_wells_core::{Action, ActionKind, Bot, GameState, PlayerId, ShipState, SubsystemType};
use gravity_wells_system_combat::validate_fire;
use gravity_wells_system_energy::allocate;
use gravity_wells_system_heat::effective_dissipation;

/// Bot that keeps its weapons charged and shoots whatever it can reach.
///
/// Plans are rehearsed on a private copy of the ship using the same rules the
/// turn orchestrator applies, so the submitted batch is valid unless another
/// seat changed the board in between. Shots are only taken while the heat they
/// generate stays within the ship's dissipation.
#[derive(Debug)]
pub(crate) struct DuelBot {
    critical_target: SubsystemType,
}

impl DuelBot {
    /// Creates a bot that declares `critical_target` on every shot.
    #[must_use]
    pub(crate) const fn new(critical_target: SubsystemType) -> Self {
        Self { critical_target }
    }
}

impl Bot for DuelBot {
    fn decide(&mut self, state: &GameState, player: PlayerId) -> Vec<Action> {
        let Some(seat) = state.player(player) else {
            return Vec::new();
        };
        if seat.ship.is_destroyed() {
            return Vec::new();
        }

        let mut ship = seat.ship.clone();
        ship.begin_turn();
        let mut kinds = Vec::new();
        let mut heat_budget = effective_dissipation(&ship).saturating_sub(ship.heat);
        let mut fired = 0;

        let weapons: Vec<usize> = ship
            .subsystems
            .iter()
            .enumerate()
            .filter(|(_, subsystem)| subsystem.kind.is_weapon() && !subsystem.is_broken)
            .map(|(index, _)| index)
            .collect();
        for weapon in weapons {
            top_up(&mut ship, weapon, &mut kinds);
            let charge = ship
                .subsystem(weapon)
                .map_or(0, |subsystem| subsystem.allocated_energy);
            if charge == 0 || charge > heat_budget {
                continue;
            }

            let target = state
                .players
                .iter()
                .filter(|other| other.id != player && !other.ship.is_destroyed())
                .find(|other| validate_fire(&ship, weapon, other.id, &other.ship).is_ok());
            if let Some(target) = target {
                kinds.push(ActionKind::FireWeapon {
                    weapon,
                    target: target.id,
                    critical_target: self.critical_target,
                    sequence: fired,
                });
                heat_budget -= charge;
                fired += 1;
            }
        }

        if fired == 0 {
            if ship.reaction_mass < ship.max_reaction_mass {
                if let Some(scoop) = ship.find_subsystem(SubsystemType::Scoop) {
                    top_up(&mut ship, scoop, &mut kinds);
                }
            }
            kinds.push(ActionKind::Coast { sequence: 0 });
        }
        if let Some(shields) = ship.find_subsystem(SubsystemType::Shields) {
            top_up(&mut ship, shields, &mut kinds);
        }

        kinds
            .into_iter()
            .map(|kind| Action::new(player, kind))
            .collect()
    }
}

fn top_up(ship: &mut ShipState, index: usize, kinds: &mut Vec<ActionKind>) {
    let Some(subsystem) = ship.subsystem(index) else {
        return;
    };
    if subsystem.is_broken {
        return;
    }
    let wanted = subsystem
        .kind
        .max_energy()
        .saturating_sub(subsystem.allocated_energy)
        .min(ship.reactor.available_energy);
    if wanted > 0 && allocate(ship, index, wanted).is_ok() {
        kinds.push(ActionKind::AllocateEnergy {
            subsystem: index,
            amount: wanted,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gravity_wells_core::{wells, FixedRoll, GamePhase, Position};
    use gravity_wells_world::{create_game, execute_turn, transition_to_active_phase, Seat};

    fn duel(sectors: [u32; 2]) -> GameState {
        let seats = [
            Seat::new(PlayerId::new(0), "vega"),
            Seat::new(PlayerId::new(1), "rigel"),
        ];
        let mut state = create_game(&seats, None, 2).expect("two seats can be dealt");
        state.phase = GamePhase::Deployment;
        for (seat, sector) in state.players.iter_mut().zip(sectors) {
            seat.ship.position = Position::new(wells::BLACK_HOLE, 4, sector);
            seat.has_deployed = true;
            seat.deployment_sector = Some(sector);
        }
        transition_to_active_phase(&state).expect("every ship deployed")
    }

    #[test]
    fn bot_fires_on_targets_in_reach() {
        let state = duel([0, 2]);
        let mut bot = DuelBot::new(SubsystemType::Shields);

        let actions = bot.decide(&state, PlayerId::new(0));

        assert!(actions
            .iter()
            .any(|action| matches!(action.kind, ActionKind::FireWeapon { .. })));
        let report = execute_turn(&state, &actions, &mut FixedRoll::new(5))
            .expect("rehearsed plans are valid");
        assert!(report.state.players[1].ship.hit_points < 10);
        assert!(report.state.players[0].ship.heat <= 8);
    }

    #[test]
    fn bot_coasts_when_nothing_is_in_reach() {
        let mut state = duel([0, 12]);
        state.players[0].ship.position = Position::new(wells::ALPHA, 1, 0);
        let mut bot = DuelBot::new(SubsystemType::Shields);

        let actions = bot.decide(&state, PlayerId::new(0));

        assert!(actions
            .iter()
            .any(|action| matches!(action.kind, ActionKind::Coast { .. })));
        assert!(execute_turn(&state, &actions, &mut FixedRoll::new(5)).is_ok());
    }

    #[test]
    fn destroyed_ships_submit_nothing() {
        let mut state = duel([0, 2]);
        state.players[0].ship.hit_points = 0;

        assert!(DuelBot::new(SubsystemType::Engines)
            .decide(&state, PlayerId::new(0))
            .is_empty());
    }
}
