//! The `labyrinth` subcommand.

use anyhow::Result;
use clap::Args;
use minotaur_core::SimulationConfig;
use minotaur_party::Labyrinth;

/// Arguments for the labyrinth command
#[derive(Args)]
pub struct LabyrinthArgs {
    /// Number of guests, including the leader
    #[clap(long)]
    pub guests: Option<usize>,

    /// Seed for the Minotaur's picks
    #[clap(long)]
    pub seed: Option<u64>,

    /// Microseconds the Minotaur waits between picks
    #[clap(long)]
    pub dwell_us: Option<u64>,
}

/// Apply the flags to `config` and build the game.
pub fn build(args: &LabyrinthArgs, mut config: SimulationConfig) -> Result<Labyrinth> {
    if let Some(guests) = args.guests {
        config.guest_count = guests;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(dwell_us) = args.dwell_us {
        config.labyrinth.selection_dwell_us = dwell_us;
    }

    Ok(Labyrinth::new(config)?)
}
