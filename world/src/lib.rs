#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative match state management for Gravity Wells.
//!
//! The world owns the lifecycle of a match: seats are dealt missions and given
//! ships, loadouts are locked in, ships are deployed, and from then on every
//! turn is resolved by [`execute_turn`] against an immutable snapshot of the
//! [`GameState`]. Rules themselves live in the system crates; this crate
//! sequences them and is the only place where the [`Command`] values they
//! queue are applied, through [`apply`].
//!
//! [`GameState`]: gravity_wells_core::GameState
//! [`Command`]: gravity_wells_core::Command

mod apply;
mod setup;
mod turn;

pub use apply::apply;
pub use setup::{
    create_game, deploy_ship, deployment_position, submit_loadout, transition_to_active_phase,
    Seat,
};
pub use turn::{execute_turn, TurnReport};

/// Black hole ring that ships deploy and respawn on.
pub const DEPLOYMENT_RING: u32 = 4;

/// Query functions that provide read-only access to a match.
pub mod query {
    use gravity_wells_core::{
        GamePhase, GameState, LogEntry, Missile, PlayerId, ShipState, Station,
    };

    /// Ship flown by `player`.
    #[must_use]
    pub fn ship(state: &GameState, player: PlayerId) -> Option<&ShipState> {
        state.player(player).map(|seat| &seat.ship)
    }

    /// Identifier of the player whose turn it is.
    #[must_use]
    pub fn active_player(state: &GameState) -> Option<PlayerId> {
        state.active_player().map(|seat| seat.id)
    }

    /// Missiles in flight towards `player`, in launch order.
    pub fn missiles_targeting(
        state: &GameState,
        player: PlayerId,
    ) -> impl Iterator<Item = &Missile> + '_ {
        state
            .missiles
            .iter()
            .filter(move |missile| missile.target == player)
    }

    /// Trade stations at their current positions.
    #[must_use]
    pub fn stations(state: &GameState) -> &[Station] {
        &state.stations
    }

    /// Log entries recorded during `turn` or later.
    pub fn log_since(state: &GameState, turn: u32) -> impl Iterator<Item = &LogEntry> + '_ {
        state
            .turn_log
            .iter()
            .filter(move |entry| entry.turn >= turn)
    }

    /// Completed mission counts, best first; ties keep seat order.
    #[must_use]
    pub fn standings(state: &GameState) -> Vec<(PlayerId, u32)> {
        let mut standings: Vec<(PlayerId, u32)> = state
            .players
            .iter()
            .map(|seat| (seat.id, seat.completed_mission_count))
            .collect();
        standings.sort_by(|left, right| right.1.cmp(&left.1));
        standings
    }

    /// Reports whether the match has finished.
    #[must_use]
    pub fn is_over(state: &GameState) -> bool {
        state.phase == GamePhase::Ended
    }
}
