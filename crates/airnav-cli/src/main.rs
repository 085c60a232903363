mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use airnav_cli::output::OutputFormat;
use airnav_cli::source::{load_network, LoadedNetwork, SourceArgs};
use airnav_lib::path::DEFAULT_MAX_ITERATIONS;
use airnav_lib::RouteAlgorithm;

use commands::query::{handle_airport, handle_neighbours, handle_reachable, handle_summary};
use commands::route::{handle_route, RouteCommandArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Airspace and navigation graph utilities")]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    /// Output format for command results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the lowest-cost route between two nodes.
    Route {
        /// Starting node name or key.
        #[arg(long = "from")]
        from: String,
        /// Destination node name or key.
        #[arg(long = "to")]
        to: String,
        /// Search algorithm: dijkstra or a-star. Defaults to dijkstra for
        /// airspaces and a-star for planar graphs.
        #[arg(long)]
        algorithm: Option<RouteAlgorithm>,
        /// Maximum number of nodes A* may expand.
        #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
        max_iterations: usize,
        /// Print only the node names along the route.
        #[arg(long)]
        compact: bool,
    },
    /// List every node reachable from a node.
    Reachable {
        /// Origin node name or key.
        #[arg(long = "from")]
        from: String,
    },
    /// List the direct neighbours of a node.
    Neighbours {
        /// Node name or key.
        #[arg(long)]
        node: String,
    },
    /// Show an airport's SID and STAR points.
    Airport {
        /// Airport code, e.g. LEBL.
        #[arg(long)]
        name: String,
    },
    /// Show node, segment and airport counts.
    Summary,
}

/// Run a generic handler against whichever network flavour was loaded.
macro_rules! with_network {
    ($loaded:expr, $network:ident => $body:expr) => {
        match $loaded {
            LoadedNetwork::AirSpace(ref $network) => $body,
            LoadedNetwork::Graph(ref $network) => $body,
        }
    };
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let loaded = load_network(&cli.source).context("failed to load navigation data")?;
    let format = cli.format;

    match cli.command {
        Command::Route {
            from,
            to,
            algorithm,
            max_iterations,
            compact,
        } => {
            let args = RouteCommandArgs {
                from,
                to,
                algorithm,
                max_iterations,
                compact,
            };
            with_network!(loaded, network => handle_route(network, &args, format))
        }
        Command::Reachable { from } => {
            with_network!(loaded, network => handle_reachable(network, &from, format))
        }
        Command::Neighbours { node } => {
            with_network!(loaded, network => handle_neighbours(network, &node, format))
        }
        Command::Airport { name } => {
            with_network!(loaded, network => handle_airport(network, &name, format))
        }
        Command::Summary => with_network!(loaded, network => handle_summary(network, format)),
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
