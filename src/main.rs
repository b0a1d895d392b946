use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use metro_router::routing::{HopCountFinder, Metric, PathFinder, WeightedFinder};
use metro_router::{loader, ui};

#[derive(Parser)]
#[command(about = "Shortest-path queries over a metro network")]
struct Args {
    /// Stations file (code,name,line|line,lat,lon per line)
    #[arg(long, default_value = "data/stations.csv")]
    stations: PathBuf,

    /// Connections file (from,to,distance,time[,transfer[,fare]] per line)
    #[arg(long, default_value = "data/connections.csv")]
    connections: PathBuf,

    /// Without a subcommand, starts the interactive menu
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List every station in the network
    Stations,
    /// Find a single route and exit
    Route {
        /// Source station code
        source: String,
        /// Destination station code
        destination: String,
        #[arg(long, value_enum, default_value_t = Criterion::Time)]
        by: Criterion,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Criterion {
    Stops,
    Distance,
    Time,
}

impl Criterion {
    fn finder(self) -> Box<dyn PathFinder> {
        match self {
            Criterion::Stops => Box::new(HopCountFinder),
            Criterion::Distance => Box::new(WeightedFinder::new(Metric::Distance)),
            Criterion::Time => Box::new(WeightedFinder::new(Metric::Time)),
        }
    }

    fn description(self) -> &'static str {
        match self {
            Criterion::Stops => "minimum stops",
            Criterion::Distance => "shortest distance",
            Criterion::Time => "minimum time",
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let (directory, graph) = loader::load_network(&args.stations, &args.connections)?;

    match args.command {
        Some(Command::Stations) => ui::print_stations(&directory),
        Some(Command::Route {
            source,
            destination,
            by,
        }) => ui::run_route(
            &directory,
            &graph,
            &source,
            &destination,
            by.finder().as_ref(),
            by.description(),
        )?,
        None => ui::run_menu(&directory, &graph)?,
    }

    Ok(())
}
