//! Route planning strategies implementing the Strategy pattern.
//!
//! This module provides the `RoutePlanner` trait and implementations for the
//! two search algorithms (Dijkstra, A*). Both run over the same adjacency, so
//! `plan_route` only has to pick one.

use crate::network::Network;
use crate::path::{find_route_a_star, find_route_dijkstra, Route, SearchOptions};
use crate::space::Space;

use super::RouteAlgorithm;

/// Trait for route planning strategies.
pub trait RoutePlanner<S: Space>: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Execute the pathfinding algorithm on the given network.
    ///
    /// Returns `Some(route)` if a route is found, `None` otherwise.
    fn find_path(
        &self,
        network: &Network<S>,
        start: &S::Key,
        goal: &S::Key,
    ) -> Option<Route<S::Key>>;

    /// Whether this planner relies on node positions to guide the search.
    fn uses_heuristic(&self) -> bool {
        false
    }
}

/// Dijkstra's algorithm planner for weighted graph traversal.
#[derive(Debug, Clone, Default)]
pub struct DijkstraPlanner;

impl<S: Space> RoutePlanner<S> for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(
        &self,
        network: &Network<S>,
        start: &S::Key,
        goal: &S::Key,
    ) -> Option<Route<S::Key>> {
        find_route_dijkstra(network, start, goal)
    }
}

/// A* planner guided by straight-line distance to the goal.
#[derive(Debug, Clone, Default)]
pub struct AStarPlanner {
    options: SearchOptions,
}

impl AStarPlanner {
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }
}

impl<S: Space> RoutePlanner<S> for AStarPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn find_path(
        &self,
        network: &Network<S>,
        start: &S::Key,
        goal: &S::Key,
    ) -> Option<Route<S::Key>> {
        find_route_a_star(network, start, goal, &self.options)
    }

    fn uses_heuristic(&self) -> bool {
        true
    }
}

/// Select the planner for an algorithm.
pub fn select_planner<S: Space>(
    algorithm: RouteAlgorithm,
    options: SearchOptions,
) -> Box<dyn RoutePlanner<S>> {
    match algorithm {
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner),
        RouteAlgorithm::AStar => Box::new(AStarPlanner::new(options)),
    }
}
