//! Handlers for the read-only lookups: reachability, neighbours, airports and
//! the network summary.

use anyhow::{anyhow, Context, Result};

use airnav_cli::output::{print_json, AirportView, NeighbourView, OutputFormat};
use airnav_lib::{reachable_from, Network, NetworkSummary, ReachabilitySummary, Space};

pub fn handle_reachable<S: Space>(
    network: &Network<S>,
    from: &str,
    format: OutputFormat,
) -> Result<()> {
    let origin = network
        .resolve(from)
        .with_context(|| format!("cannot compute reachability from {from}"))?;
    let reachable = reachable_from(network, &origin.key);
    let summary = ReachabilitySummary::from_set(network, origin, &reachable);

    match format {
        OutputFormat::Json => print_json(&summary),
        OutputFormat::Text => {
            print!("{}", summary.render_plain());
            Ok(())
        }
    }
}

pub fn handle_neighbours<S: Space>(
    network: &Network<S>,
    node: &str,
    format: OutputFormat,
) -> Result<()> {
    let key = network
        .resolve(node)
        .with_context(|| format!("cannot list neighbours of {node}"))?
        .key
        .clone();
    let view = NeighbourView::collect(network, &key)
        .ok_or_else(|| anyhow!("node {key} disappeared from the network"))?;

    match format {
        OutputFormat::Json => print_json(&view),
        OutputFormat::Text => {
            print!("{}", view.render_plain());
            Ok(())
        }
    }
}

pub fn handle_airport<S: Space>(
    network: &Network<S>,
    name: &str,
    format: OutputFormat,
) -> Result<()> {
    let airport = network
        .airport(name)
        .ok_or_else(|| anyhow!("unknown airport: {name}"))?;
    let view = AirportView::from_airport(network, airport);

    match format {
        OutputFormat::Json => print_json(&view),
        OutputFormat::Text => {
            print!("{}", view.render_plain());
            Ok(())
        }
    }
}

pub fn handle_summary<S: Space>(network: &Network<S>, format: OutputFormat) -> Result<()> {
    let summary = NetworkSummary::from_network(network);
    match format {
        OutputFormat::Json => print_json(&summary),
        OutputFormat::Text => {
            print!("{}", summary.render_plain());
            Ok(())
        }
    }
}
