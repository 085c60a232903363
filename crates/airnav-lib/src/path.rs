use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::network::Network;
use crate::reachability::is_reachable_index;
use crate::space::Space;

/// Default cap on A* node expansions.
pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;

/// Tunables for heuristic search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of nodes A* may expand before giving up. Reaching it is
    /// reported as "no path".
    pub max_iterations: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Ordered node keys from start to goal plus the summed segment cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route<K> {
    pub steps: Vec<K>,
    pub cost: f64,
}

impl<K: PartialEq> Route<K> {
    /// Number of segments travelled.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<&K> {
        self.steps.first()
    }

    pub fn goal(&self) -> Option<&K> {
        self.steps.last()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.steps.contains(key)
    }

    /// Cost accumulated from the start of the route up to `key`.
    ///
    /// Returns `None` when `key` is not on the route or a leg has no segment
    /// in `network`.
    pub fn cost_to<S>(&self, network: &Network<S>, key: &K) -> Option<f64>
    where
        S: Space<Key = K>,
    {
        let position = self.steps.iter().position(|step| step == key)?;
        self.steps[..=position]
            .windows(2)
            .try_fold(0.0, |total, pair| {
                network
                    .edge_cost(&pair[0], &pair[1])
                    .map(|cost| total + cost)
            })
    }
}

/// Run Dijkstra's algorithm between two nodes.
///
/// Returns `None` when either key is unknown, when `start == goal`, or when
/// the goal cannot be reached.
pub fn find_route_dijkstra<S: Space>(
    network: &Network<S>,
    start: &S::Key,
    goal: &S::Key,
) -> Option<Route<S::Key>> {
    let (start, goal) = endpoints(network, start, goal)?;

    let count = network.node_count();
    let mut distances = vec![f64::INFINITY; count];
    let mut parents: Vec<Option<usize>> = vec![None; count];
    let mut finalized = vec![false; count];
    let mut queue = BinaryHeap::new();

    distances[start] = 0.0;
    queue.push(QueueEntry::new(start, 0.0));

    let mut expanded = 0usize;
    while let Some(entry) = queue.pop() {
        let current = entry.node;
        if finalized[current] || entry.cost.0 > distances[current] {
            continue;
        }
        finalized[current] = true;

        if current == goal {
            debug!(expanded, "dijkstra reached goal");
            return Some(build_route(network, &parents, start, goal, distances[goal]));
        }
        expanded += 1;

        for (next, cost) in network.links(current) {
            if finalized[next] {
                continue;
            }
            let next_cost = distances[current] + cost;
            if next_cost < distances[next] {
                distances[next] = next_cost;
                parents[next] = Some(current);
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    debug!(expanded, "dijkstra exhausted the frontier");
    None
}

/// Run A* search using the space's straight-line distance as the heuristic.
///
/// The heuristic is dropped when some segment costs less than the straight
/// line between its endpoints (see [`Network::has_shortcuts`]).
///
/// Nodes are finalised once expanded (closed set). Hitting
/// [`SearchOptions::max_iterations`] yields `None` and logs a warning, since a
/// consistent heuristic on a finite graph always terminates first.
pub fn find_route_a_star<S: Space>(
    network: &Network<S>,
    start: &S::Key,
    goal: &S::Key,
    options: &SearchOptions,
) -> Option<Route<S::Key>> {
    let (start, goal) = endpoints(network, start, goal)?;

    if !is_reachable_index(network, start, goal) {
        debug!("goal is outside the start component; skipping a-star");
        return None;
    }

    let guided = !network.has_shortcuts();
    if !guided {
        warn!(
            "segment costs undercut straight-line distances; a-star runs without its heuristic"
        );
    }

    let count = network.node_count();
    let goal_position = network.node_at(goal).position;
    let heuristic = |idx: usize| {
        if guided {
            S::distance(&network.node_at(idx).position, &goal_position)
        } else {
            0.0
        }
    };

    let mut g_score = vec![f64::INFINITY; count];
    let mut parents: Vec<Option<usize>> = vec![None; count];
    let mut closed = vec![false; count];
    let mut queue = BinaryHeap::new();

    g_score[start] = 0.0;
    queue.push(AStarEntry::new(start, 0.0, heuristic(start)));

    let mut iterations = 0usize;
    while let Some(entry) = queue.pop() {
        let current = entry.node;
        if closed[current] || entry.cost.0 > g_score[current] {
            continue;
        }

        if current == goal {
            debug!(iterations, "a-star reached goal");
            return Some(build_route(network, &parents, start, goal, g_score[goal]));
        }

        iterations += 1;
        if iterations > options.max_iterations {
            warn!(
                max_iterations = options.max_iterations,
                start = %network.node_at(start).key,
                goal = %network.node_at(goal).key,
                "a-star hit the iteration ceiling before reaching a reachable goal"
            );
            return None;
        }
        closed[current] = true;

        for (next, cost) in network.links(current) {
            if closed[next] {
                continue;
            }
            let tentative_g = g_score[current] + cost;
            if tentative_g < g_score[next] {
                g_score[next] = tentative_g;
                parents[next] = Some(current);
                queue.push(AStarEntry::new(next, tentative_g, heuristic(next)));
            }
        }
    }

    None
}

/// Resolve both keys and reject the cases that can never produce a route.
fn endpoints<S: Space>(
    network: &Network<S>,
    start: &S::Key,
    goal: &S::Key,
) -> Option<(usize, usize)> {
    let start_idx = network.index_of(start)?;
    let goal_idx = network.index_of(goal)?;
    if start_idx == goal_idx {
        return None;
    }
    if network.degree(start_idx) == 0 || network.degree(goal_idx) == 0 {
        debug!(start = %start, goal = %goal, "endpoint has no segments");
        return None;
    }
    Some((start_idx, goal_idx))
}

fn build_route<S: Space>(
    network: &Network<S>,
    parents: &[Option<usize>],
    start: usize,
    goal: usize,
    cost: f64,
) -> Route<S::Key> {
    let steps = reconstruct_path(parents, start, goal)
        .into_iter()
        .map(|idx| network.node_at(idx).key.clone())
        .collect();
    Route { steps, cost }
}

fn reconstruct_path(parents: &[Option<usize>], start: usize, goal: usize) -> Vec<usize> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents[node];
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: usize,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: usize, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost; equal
        // costs pop in node insertion order.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct AStarEntry {
    node: usize,
    cost: FloatOrd,
    estimate: FloatOrd,
}

impl AStarEntry {
    fn new(node: usize, cost: f64, heuristic: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
        }
    }
}

impl Ord for AStarEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for AStarEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
