//! The `showroom` subcommand.

use anyhow::Result;
use clap::{Args, ValueEnum};
use minotaur_core::{AdmissionStrategy, SimulationConfig};
use minotaur_party::Showroom;

/// How guests get through the door
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Admission {
    /// Walk in whenever the sign reads AVAILABLE
    Sign,
    /// Line up and walk in from the head of the line
    Queue,
}

impl From<Admission> for AdmissionStrategy {
    fn from(admission: Admission) -> Self {
        match admission {
            Admission::Sign => AdmissionStrategy::Sign,
            Admission::Queue => AdmissionStrategy::Queue,
        }
    }
}

/// Arguments for the showroom command
#[derive(Args)]
pub struct ShowroomArgs {
    /// Number of guests
    #[clap(long)]
    pub guests: Option<usize>,

    /// Seed for each guest's hold time
    #[clap(long)]
    pub seed: Option<u64>,

    /// Shortest time with the vase, in milliseconds
    #[clap(long)]
    pub min_hold_ms: Option<u64>,

    /// Longest time with the vase, in milliseconds
    #[clap(long)]
    pub max_hold_ms: Option<u64>,

    /// Admission discipline at the door
    #[clap(long, value_enum)]
    pub admission: Option<Admission>,
}

/// Apply the flags to `config` and build the game.
pub fn build(args: &ShowroomArgs, mut config: SimulationConfig) -> Result<Showroom> {
    if let Some(guests) = args.guests {
        config.guest_count = guests;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(min_hold_ms) = args.min_hold_ms {
        config.showroom.min_hold_ms = min_hold_ms;
    }
    if let Some(max_hold_ms) = args.max_hold_ms {
        config.showroom.max_hold_ms = max_hold_ms;
    }
    if let Some(admission) = args.admission {
        config.showroom.admission = admission.into();
    }

    Ok(Showroom::new(config)?)
}
