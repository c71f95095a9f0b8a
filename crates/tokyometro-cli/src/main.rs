use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use tokyometro_lib::load_network;

mod commands;
mod output;

use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Tokyo Metro route planning utilities")]
struct Cli {
    /// Path to the network artifact.
    #[arg(long, default_value = "datasets/tokyometro.json")]
    network: PathBuf,

    /// Path to the node-code to station-name table.
    #[arg(long, default_value = "datasets/stations.json")]
    stations: PathBuf,

    /// Path to the line-letter to line-name table. Built-in Tokyo line
    /// names are used when omitted.
    #[arg(long)]
    lines: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute an itinerary between two stations.
    Route {
        /// Starting station name (e.g. 'Wakoshi'), or 'random'.
        #[arg(long)]
        from: String,
        /// Destination station name (e.g. 'Nishi-magome'), or 'random'.
        #[arg(long)]
        to: String,
        /// Include stations-passed counts in the narration.
        #[arg(short, long)]
        verbose: bool,
    },
    /// Plan a grand tour visiting every station once.
    Tour {
        /// Include stations-passed counts in the narration.
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let network = load_network(&cli.network, &cli.stations, cli.lines.as_deref())
        .with_context(|| format!("failed to load network from {}", cli.network.display()))?;

    match cli.command {
        Command::Route { from, to, verbose } => {
            commands::route::handle_route(&network, cli.format, &from, &to, verbose)
        }
        Command::Tour { verbose } => commands::tour::handle_tour(&network, cli.format, verbose),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
