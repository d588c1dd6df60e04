#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that simulates Gravity Wells matches between bots.

mod bot;
mod config;
mod snapshot;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gravity_wells_core::{
    wells, Bot, DiceRoller, FixedRoll, GameState, PlayerId, SeededDice, SubsystemType,
};
use gravity_wells_world::{
    create_game, deploy_ship, execute_turn, query, submit_loadout, transition_to_active_phase,
    Seat, DEPLOYMENT_RING,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{bot::DuelBot, config::MatchConfig};

/// Simulates a Gravity Wells match between scripted pilots.
#[derive(Debug, Parser)]
#[command(name = "gravity-wells")]
#[command(about = "Turn-based space combat rules engine", long_about = None)]
#[command(version)]
struct Cli {
    /// Match description in TOML; built-in two-seat duel when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the seed from the match description.
    #[arg(long)]
    seed: Option<u64>,

    /// Overrides the round limit from the match description.
    #[arg(long)]
    rounds: Option<u32>,

    /// Makes every die roll show this face.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    fixed_roll: Option<u8>,

    /// Continues a match from a snapshot string instead of starting a new one.
    #[arg(long)]
    resume: Option<String>,

    /// Prints a snapshot string of the final state.
    #[arg(long)]
    print_snapshot: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => MatchConfig::load(path)?,
        None => MatchConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(rounds) = cli.rounds {
        config.rounds = rounds;
    }
    if cli.fixed_roll.is_some() {
        config.fixed_roll = cli.fixed_roll;
    }

    let mut state = match &cli.resume {
        Some(encoded) => snapshot::decode(encoded).context("failed to resume match")?,
        None => start_match(&config)?,
    };

    let mut dice: Box<dyn DiceRoller> = match config.fixed_roll {
        Some(face) => Box::new(FixedRoll::new(face)),
        None => Box::new(SeededDice::new(config.seed)),
    };
    state = play(state, &config, dice.as_mut());

    for (player, completed) in query::standings(&state) {
        println!("{player}: {completed} missions completed");
    }
    match state.winner_id {
        Some(winner) => println!("{winner} wins ({:?})", state.status),
        None => println!("no winner after round {}", state.turn),
    }
    if cli.print_snapshot {
        println!("{}", snapshot::encode(&state)?);
    }
    Ok(())
}

fn start_match(config: &MatchConfig) -> Result<GameState> {
    let seats: Vec<Seat> = config
        .seats
        .iter()
        .zip(0_u32..)
        .map(|(seat, id)| Seat::new(PlayerId::new(id), seat.name.clone()))
        .collect();
    let human = config.human.map(PlayerId::new);
    let mut state = create_game(&seats, human, config.seed).context("failed to create match")?;

    for (seat, seat_config) in seats.iter().zip(&config.seats) {
        let loadout = seat_config.loadout.clone().unwrap_or_default();
        state = submit_loadout(&state, seat.id, &loadout)
            .with_context(|| format!("{} submitted an invalid loadout", seat.name))?;
    }

    let sectors = wells::ring(wells::BLACK_HOLE, DEPLOYMENT_RING).map_or(1, |ring| ring.sectors);
    let spacing = sectors / u32::try_from(seats.len()).unwrap_or(u32::MAX).max(1);
    for ((seat, seat_config), index) in seats.iter().zip(&config.seats).zip(0_u32..) {
        let sector = seat_config.sector.unwrap_or(index * spacing);
        state = deploy_ship(&state, seat.id, sector)
            .with_context(|| format!("{} could not deploy", seat.name))?;
    }

    transition_to_active_phase(&state).context("failed to start play")
}

fn play(mut state: GameState, config: &MatchConfig, dice: &mut dyn DiceRoller) -> GameState {
    let mut bots: Vec<DuelBot> = state
        .players
        .iter()
        .map(|_| DuelBot::new(SubsystemType::Shields))
        .collect();
    let last_round = state.turn.saturating_add(config.rounds);

    while !query::is_over(&state) && state.turn < last_round {
        let index = state.active_player_index;
        let Some(player) = query::active_player(&state) else {
            break;
        };
        let Some(bot) = bots.get_mut(index) else {
            break;
        };

        let actions = bot.decide(&state, player);
        let report = match execute_turn(&state, &actions, &mut *dice) {
            Ok(report) => report,
            Err(rejection) => {
                warn!(%player, %rejection, "plan rejected; passing instead");
                match execute_turn(&state, &[], &mut *dice) {
                    Ok(report) => report,
                    Err(rejection) => {
                        warn!(%player, %rejection, "cannot pass; stopping");
                        break;
                    }
                }
            }
        };

        for entry in &report.log {
            println!("[round {}] {}: {}", entry.turn, entry.player, entry.message);
        }
        state = report.state;
    }

    info!(round = state.turn, "simulation finished");
    state
}
