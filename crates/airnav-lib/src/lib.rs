//! Airnav library entry points.
//!
//! This crate loads navigation networks (planar graphs and aeronautical
//! airspaces), keeps them in an indexed store, and answers reachability and
//! shortest-path queries over them. Higher-level consumers such as the CLI
//! should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod airspace;
pub mod dataset;
pub mod dump;
pub mod error;
pub mod network;
pub mod output;
pub mod path;
pub mod reachability;
pub mod routing;
pub mod space;

pub use airspace::{load_airspace, FileReport, LoadReport};
pub use dataset::{resolve_data_dir, AirSpaceFiles, DEFAULT_REGION};
pub use dump::{load_graph, load_graph_from_path, save_graph, save_graph_to_path};
pub use error::{Error, Result};
pub use network::{AirSpace, Airport, Graph, Network, Node, Segment, SegmentInsert};
pub use output::{NetworkSummary, NodeRef, ReachabilitySummary, RenderMode, RouteSummary};
pub use path::{find_route_a_star, find_route_dijkstra, Route, SearchOptions};
pub use reachability::{is_reachable, reachable_from};
pub use routing::{
    find_shortest_path, plan_route, select_planner, RouteAlgorithm, RoutePlan, RoutePlanner,
    RouteRequest,
};
pub use space::{Aeronautical, GeoPosition, Planar, PlanarPosition, Space};
