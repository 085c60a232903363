//! Where the CLI reads its navigation network from.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use airnav_lib::{
    load_graph_from_path, resolve_data_dir, AirSpace, AirSpaceFiles, Graph, DEFAULT_REGION,
};

/// Data-source flags shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Directory holding the airspace files (defaults to `AIRNAV_DATA_DIR`,
    /// then the platform data directory).
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Region prefix of the airspace files, e.g. `Cat`, `Esp` or `Eur`.
    #[arg(long, default_value = DEFAULT_REGION)]
    pub region: String,

    /// Navigation points file, overriding `<region>_nav.txt`.
    #[arg(long)]
    pub points: Option<PathBuf>,

    /// Segments file, overriding `<region>_seg.txt`.
    #[arg(long)]
    pub segments: Option<PathBuf>,

    /// Airports file, overriding `<region>_aer.txt`.
    #[arg(long)]
    pub airports: Option<PathBuf>,

    /// Load a planar graph dump instead of an airspace.
    #[arg(long, conflicts_with_all = ["points", "segments", "airports"])]
    pub graph: Option<PathBuf>,
}

/// A loaded network of either flavour.
#[derive(Debug)]
pub enum LoadedNetwork {
    AirSpace(AirSpace),
    Graph(Graph),
}

/// The three airspace files to read, after applying per-file overrides.
///
/// The data directory is only resolved when at least one file is not given
/// explicitly.
pub fn airspace_files(args: &SourceArgs) -> Result<AirSpaceFiles> {
    if let (Some(points), Some(segments), Some(airports)) =
        (&args.points, &args.segments, &args.airports)
    {
        return Ok(AirSpaceFiles::new(
            points.clone(),
            segments.clone(),
            airports.clone(),
        ));
    }

    let dir = resolve_data_dir(args.data_dir.as_deref())
        .context("failed to resolve the airnav data directory")?;
    let defaults = AirSpaceFiles::for_region(dir, &args.region);
    Ok(AirSpaceFiles {
        points: args.points.clone().unwrap_or(defaults.points),
        segments: args.segments.clone().unwrap_or(defaults.segments),
        airports: args.airports.clone().unwrap_or(defaults.airports),
    })
}

/// Load the network selected by the flags.
pub fn load_network(args: &SourceArgs) -> Result<LoadedNetwork> {
    if let Some(path) = &args.graph {
        let graph = load_graph_from_path(path)
            .with_context(|| format!("failed to load graph dump {}", path.display()))?;
        info!(
            nodes = graph.node_count(),
            segments = graph.segment_count(),
            "loaded graph dump"
        );
        return Ok(LoadedNetwork::Graph(graph));
    }

    let files = airspace_files(args)?;
    let mut airspace = AirSpace::default();
    let report = airspace
        .load_from_files(&files)
        .with_context(|| format!("failed to load the {} airspace", args.region))?;
    info!(
        airspace = airspace.name(),
        points = report.points.loaded,
        segments = report.segments.loaded,
        airports = report.airports.loaded,
        "loaded airspace"
    );
    Ok(LoadedNetwork::AirSpace(airspace))
}
