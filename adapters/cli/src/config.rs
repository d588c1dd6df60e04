//! Match configuration loaded from TOML.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use gravity_wells_core::Loadout;
use serde::Deserialize;

/// Rounds played when neither the file nor the command line sets a limit.
pub(crate) const DEFAULT_ROUNDS: u32 = 12;

/// Description of a match to simulate.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct MatchConfig {
    /// Seed for mission dealing and the combat die.
    pub(crate) seed: u64,
    /// Upper bound on full rounds before the simulation stops.
    pub(crate) rounds: u32,
    /// Seat whose perspective decides victory or defeat.
    pub(crate) human: Option<u32>,
    /// Every die roll shows this face when set.
    pub(crate) fixed_roll: Option<u8>,
    /// Seats in turn order.
    pub(crate) seats: Vec<SeatConfig>,
}

/// One seat of a configured match.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SeatConfig {
    /// Display name of the pilot.
    pub(crate) name: String,
    /// Deployment sector; spread evenly around the ring when omitted.
    pub(crate) sector: Option<u32>,
    /// Subsystems to mount; the default loadout when omitted.
    pub(crate) loadout: Option<Loadout>,
}

impl SeatConfig {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            sector: None,
            loadout: None,
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            rounds: DEFAULT_ROUNDS,
            human: None,
            fixed_roll: None,
            seats: vec![SeatConfig::named("vega"), SeatConfig::named("rigel")],
        }
    }
}

impl MatchConfig {
    /// Reads a match description from disk.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read match config at {}", path.display()))?;
        Self::parse(&contents)
    }

    fn parse(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).context("failed to parse match config toml contents")?;
        if config.seats.is_empty() {
            bail!("match config must seat at least one pilot");
        }
        if let Some(face) = config.fixed_roll {
            if !(1..=10).contains(&face) {
                bail!("fixed roll {face} is not a face of a ten-sided die");
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gravity_wells_core::SubsystemType;

    #[test]
    fn empty_file_uses_defaults() {
        let config = MatchConfig::parse("").expect("empty config is valid");

        assert_eq!(config, MatchConfig::default());
        assert_eq!(config.seats.len(), 2);
    }

    #[test]
    fn seats_and_loadouts_are_read() {
        let config = MatchConfig::parse(
            r#"
            seed = 42
            rounds = 5
            human = 1

            [[seats]]
            name = "vega"
            sector = 3

            [[seats]]
            name = "rigel"
            loadout = { forward = ["Laser"], side = ["Shields", "Radiator"] }
            "#,
        )
        .expect("config is valid");

        assert_eq!(config.seed, 42);
        assert_eq!(config.rounds, 5);
        assert_eq!(config.human, Some(1));
        assert_eq!(config.seats[0].sector, Some(3));
        assert_eq!(
            config.seats[1].loadout,
            Some(Loadout {
                forward: vec![SubsystemType::Laser],
                side: vec![SubsystemType::Shields, SubsystemType::Radiator],
            })
        );
    }

    #[test]
    fn impossible_die_faces_are_rejected() {
        let error = MatchConfig::parse("fixed_roll = 12").expect_err("no twelfth face");

        assert!(error.to_string().contains("fixed roll 12"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(MatchConfig::parse("players = 4").is_err());
    }
}
