//! Terminal host for The Phantom of Eagle Hill and its ski race.

mod commands;
mod glyphs;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "EAGLEHILL_LOG";

#[derive(Parser)]
#[command(
    name = "eaglehill",
    about = "The Phantom of Eagle Hill: a mystery adventure with a ski race",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine activity to stderr at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the mystery adventure
    Play {
        /// Directory holding the save file
        #[arg(short, long, default_value = ".eaglehill")]
        save_dir: PathBuf,

        /// Load the world from a JSON file instead of the built-in one
        #[arg(short, long)]
        world: Option<PathBuf>,
    },

    /// Delete the saved adventure progress
    Reset {
        /// Directory holding the save file
        #[arg(short, long, default_value = ".eaglehill")]
        save_dir: PathBuf,
    },

    /// Show the adventure world
    World {
        /// Load the world from a JSON file instead of the built-in one
        #[arg(short, long)]
        world: Option<PathBuf>,

        /// Print the world configuration as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a headless ski race and print the result
    Ski {
        /// Course seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Stop after this many ticks (60 per second)
        #[arg(short, long, default_value = "36000")]
        max_ticks: u64,

        /// Steer around obstacles instead of skiing straight
        #[arg(short, long)]
        autopilot: bool,

        /// Tuck for speed
        #[arg(short, long)]
        tuck: bool,

        /// Print the race event log
        #[arg(short, long)]
        events: bool,
    },

    /// Print a generated ski course
    Course {
        /// Course seed
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Play { save_dir, world } => commands::play::run(&save_dir, world.as_deref()),
        Commands::Reset { save_dir } => commands::reset::run(&save_dir),
        Commands::World { world, json } => commands::world::run(world.as_deref(), json),
        Commands::Ski {
            seed,
            max_ticks,
            autopilot,
            tuck,
            events,
        } => commands::ski::run(seed, max_ticks, autopilot, tuck, events),
        Commands::Course { seed } => commands::course::run(seed),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
