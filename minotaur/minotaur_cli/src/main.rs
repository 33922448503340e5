use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use minotaur_core::{LogLevel, Simulation, SimulationConfig};
use tracing_subscriber::filter::LevelFilter;

mod commands;

use commands::labyrinth::LabyrinthArgs;
use commands::showroom::ShowroomArgs;

/// Minotaur party simulations
///
/// Runs one of the two party games with a thread per guest and prints a
/// summary once every guest has been accounted for.
#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// TOML file with simulation settings; flags override its values
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Log verbosity (trace, debug, info, warn, error)
    #[clap(long, global = true, default_value = "info")]
    log_level: LogLevel,

    /// Print the report as JSON instead of text
    #[clap(long, global = true)]
    json: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count every guest with a single cupcake
    Labyrinth(LabyrinthArgs),

    /// Let every guest see the crystal vase, one at a time
    Showroom(ShowroomArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level)?;

    let config = match &cli.config {
        Some(path) => SimulationConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    match &cli.command {
        Commands::Labyrinth(args) => {
            let simulation = commands::labyrinth::build(args, config)?;
            run(simulation, cli.json)
        }
        Commands::Showroom(args) => {
            let simulation = commands::showroom::build(args, config)?;
            run(simulation, cli.json)
        }
    }
}

/// Route library logs to stderr so stdout only carries the report.
fn init_logging(level: LogLevel) -> Result<()> {
    let filter = tracing_filter(level)?;

    let initialized = tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_writer(std::io::stderr)
        .with_thread_names(true)
        .try_init();

    if initialized.is_ok() {
        log::set_max_level(level.to_level_filter());
    }

    Ok(())
}

/// The subscriber filter matching the `log` filter for `level`.
fn tracing_filter(level: LogLevel) -> Result<LevelFilter> {
    let filter = level.to_level_filter().as_str().parse()?;
    Ok(filter)
}

fn run<S: Simulation>(mut simulation: S, json: bool) -> Result<()> {
    let kind = simulation.kind();
    log::debug!(
        "Starting {} with {} guests",
        kind,
        simulation.guest_count()
    );

    let report = simulation
        .run()
        .with_context(|| format!("{} run failed", kind))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }

    Ok(())
}
