//! Route planning over a [`Network`].
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported search algorithms (Dijkstra, A*)
//! - [`RouteRequest`] - High-level request naming endpoints as text
//! - [`RoutePlan`] - Planned route result
//! - [`plan_route`] - Main entry point for computing routes
//! - [`find_shortest_path`] - Key-level lookup using the space's default algorithm
//!
//! # Example
//!
//! ```ignore
//! use airnav_lib::{load_airspace, plan_route, AirSpaceFiles, RouteRequest};
//!
//! let airspace = load_airspace(&AirSpaceFiles::for_region("data", "Cat"))?;
//! let plan = plan_route(&airspace, &RouteRequest::new("GODOX", "LOBAR"))?;
//! println!("{} hops, {:.1} km", plan.hop_count(), plan.cost);
//! ```

mod planner;

pub use planner::{select_planner, AStarPlanner, DijkstraPlanner, RoutePlanner};

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::network::Network;
use crate::path::{Route, SearchOptions};
use crate::space::Space;

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Dijkstra's algorithm (weighted graph).
    Dijkstra,
    /// A* search (heuristic guided).
    #[serde(rename = "a-star")]
    AStar,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::AStar => "a-star",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(RouteAlgorithm::Dijkstra),
            "a-star" | "a_star" | "astar" | "a*" => Ok(RouteAlgorithm::AStar),
            _ => Err(Error::UnknownAlgorithm {
                name: value.to_string(),
            }),
        }
    }
}

/// High-level route planning request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    /// Start node, by name or key.
    pub start: String,
    /// Goal node, by name or key.
    pub goal: String,
    /// Algorithm to run; `None` picks the space's default.
    pub algorithm: Option<RouteAlgorithm>,
    pub options: SearchOptions,
}

impl RouteRequest {
    pub fn new(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            algorithm: None,
            options: SearchOptions::default(),
        }
    }

    pub fn with_algorithm(mut self, algorithm: RouteAlgorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.options.max_iterations = max_iterations;
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan<K> {
    pub algorithm: RouteAlgorithm,
    pub start: K,
    pub goal: K,
    pub steps: Vec<K>,
    pub cost: f64,
}

impl<K> RoutePlan<K> {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Lowest-cost route between two keys using the space's default algorithm.
pub fn find_shortest_path<S: Space>(
    network: &Network<S>,
    start: &S::Key,
    goal: &S::Key,
) -> Option<Route<S::Key>> {
    select_planner::<S>(S::DEFAULT_ALGORITHM, SearchOptions::default())
        .find_path(network, start, goal)
}

/// Compute a route for a request naming its endpoints as text.
///
/// Endpoints resolve by exact node name first, then by key. Unknown endpoints
/// produce [`Error::UnknownNode`] with suggestions; an unreachable goal (or an
/// exhausted search) produces [`Error::RouteNotFound`].
pub fn plan_route<S: Space>(
    network: &Network<S>,
    request: &RouteRequest,
) -> Result<RoutePlan<S::Key>> {
    let start = network.resolve(&request.start)?.key.clone();
    let goal = network.resolve(&request.goal)?.key.clone();

    let algorithm = request.algorithm.unwrap_or(S::DEFAULT_ALGORITHM);
    let planner = select_planner::<S>(algorithm, request.options);
    debug!(%algorithm, %start, %goal, "planning route");

    let route = planner
        .find_path(network, &start, &goal)
        .ok_or_else(|| Error::RouteNotFound {
            start: request.start.clone(),
            goal: request.goal.clone(),
        })?;

    Ok(RoutePlan {
        algorithm,
        start,
        goal,
        steps: route.steps,
        cost: route.cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_parses_common_spellings() {
        assert_eq!(
            "dijkstra".parse::<RouteAlgorithm>().unwrap(),
            RouteAlgorithm::Dijkstra
        );
        assert_eq!(
            "A-Star".parse::<RouteAlgorithm>().unwrap(),
            RouteAlgorithm::AStar
        );
        assert_eq!(
            "astar".parse::<RouteAlgorithm>().unwrap(),
            RouteAlgorithm::AStar
        );
        assert!("bfs".parse::<RouteAlgorithm>().is_err());
    }

    #[test]
    fn algorithm_display_round_trips() {
        for algorithm in [RouteAlgorithm::Dijkstra, RouteAlgorithm::AStar] {
            assert_eq!(
                algorithm.to_string().parse::<RouteAlgorithm>().unwrap(),
                algorithm
            );
        }
    }

    #[test]
    fn route_plan_hop_count() {
        let plan = RoutePlan {
            algorithm: RouteAlgorithm::Dijkstra,
            start: 1,
            goal: 3,
            steps: vec![1, 2, 3],
            cost: 12.5,
        };
        assert_eq!(plan.hop_count(), 2);
    }

    #[test]
    fn request_builders_override_defaults() {
        let request = RouteRequest::new("A", "B")
            .with_algorithm(RouteAlgorithm::AStar)
            .with_max_iterations(5);
        assert_eq!(request.algorithm, Some(RouteAlgorithm::AStar));
        assert_eq!(request.options.max_iterations, 5);
    }
}
