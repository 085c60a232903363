//! Route command handler for computing paths between two nodes.

use anyhow::{Context, Result};

use airnav_lib::{
    plan_route, Network, RenderMode, RouteAlgorithm, RouteRequest, RouteSummary, SearchOptions,
    Space,
};
use airnav_cli::output::{print_json, OutputFormat};

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting node name or key.
    pub from: String,
    /// Destination node name or key.
    pub to: String,
    /// Algorithm override; the network's default when absent.
    pub algorithm: Option<RouteAlgorithm>,
    /// A* expansion ceiling.
    pub max_iterations: usize,
    /// Print only the node names joined by arrows.
    pub compact: bool,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest {
            start: self.from.clone(),
            goal: self.to.clone(),
            algorithm: self.algorithm,
            options: SearchOptions {
                max_iterations: self.max_iterations,
            },
        }
    }
}

/// Handle the route subcommand.
pub fn handle_route<S: Space>(
    network: &Network<S>,
    args: &RouteCommandArgs,
    format: OutputFormat,
) -> Result<()> {
    let plan = plan_route(network, &args.to_request())
        .with_context(|| format!("failed to plan a route from {} to {}", args.from, args.to))?;
    let summary = RouteSummary::from_plan(network, &plan)?;

    match format {
        OutputFormat::Json => print_json(&summary)?,
        OutputFormat::Text => {
            let mode = if args.compact {
                RenderMode::Compact
            } else {
                RenderMode::PlainText
            };
            print!("{}", summary.render(mode));
        }
    }
    Ok(())
}
