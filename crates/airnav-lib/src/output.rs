use std::collections::BTreeSet;
use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::network::{Network, Node};
use crate::routing::{RouteAlgorithm, RoutePlan};
use crate::space::Space;

/// Presentation style for turning a summary into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// One line per step with leg and cumulative costs.
    PlainText,
    /// A single `A -> B -> C` line.
    Compact,
}

/// Node identity as shown to users.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NodeRef<K> {
    pub key: K,
    pub name: String,
}

impl<S: Space> From<&Node<S>> for NodeRef<S::Key> {
    fn from(node: &Node<S>) -> Self {
        Self {
            key: node.key.clone(),
            name: node.name.clone(),
        }
    }
}

/// Step taken during traversal of a planned route.
#[derive(Debug, Clone, Serialize)]
#[serde(bound(serialize = ""))]
pub struct RouteStep<S: Space> {
    pub index: usize,
    pub key: S::Key,
    pub name: String,
    pub position: S::Position,
    /// Cost of the segment arriving at this step; zero for the first step.
    pub leg_cost: f64,
    pub cumulative_cost: f64,
}

/// Structured representation of a planned route that callers can serialise.
#[derive(Debug, Clone, Serialize)]
#[serde(bound(serialize = ""))]
pub struct RouteSummary<S: Space> {
    pub network: String,
    pub algorithm: RouteAlgorithm,
    pub hops: usize,
    pub cost: f64,
    pub start: NodeRef<S::Key>,
    pub goal: NodeRef<S::Key>,
    pub steps: Vec<RouteStep<S>>,
}

impl<S: Space> RouteSummary<S> {
    /// Convert a [`RoutePlan`] into a summary with names, positions and per-leg costs.
    pub fn from_plan(network: &Network<S>, plan: &RoutePlan<S::Key>) -> Result<Self> {
        if plan.steps.is_empty() {
            return Err(Error::EmptyRoutePlan);
        }

        let mut steps: Vec<RouteStep<S>> = Vec::with_capacity(plan.steps.len());
        let mut cumulative_cost = 0.0;
        for (index, key) in plan.steps.iter().enumerate() {
            let node = network.node(key).ok_or_else(|| Error::unknown_node(key))?;
            let leg_cost = match steps.last() {
                Some(previous) => {
                    network
                        .edge_cost(&previous.key, key)
                        .ok_or_else(|| Error::RouteNotFound {
                            start: previous.key.to_string(),
                            goal: key.to_string(),
                        })?
                }
                None => 0.0,
            };
            cumulative_cost += leg_cost;
            steps.push(RouteStep {
                index,
                key: key.clone(),
                name: node.name.clone(),
                position: node.position,
                leg_cost,
                cumulative_cost,
            });
        }

        let endpoint = |step: &RouteStep<S>| NodeRef {
            key: step.key.clone(),
            name: step.name.clone(),
        };
        let start = endpoint(&steps[0]);
        let goal = endpoint(&steps[steps.len() - 1]);

        Ok(Self {
            network: network.name().to_string(),
            algorithm: plan.algorithm,
            hops: plan.hop_count(),
            cost: plan.cost,
            start,
            goal,
            steps,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RenderMode) -> String {
        match mode {
            RenderMode::PlainText => self.render_plain(),
            RenderMode::Compact => self.render_compact(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, cost {:.3}, algorithm: {})",
            self.start.name, self.goal.name, self.hops, self.cost, self.algorithm
        );
        for step in &self.steps {
            let _ = writeln!(
                buffer,
                "{:>3}: {} ({}) {}  leg {:.3}  total {:.3}",
                step.index,
                step.name,
                step.key,
                step.position,
                step.leg_cost,
                step.cumulative_cost
            );
        }
        buffer
    }

    fn render_compact(&self) -> String {
        let joined = self
            .steps
            .iter()
            .map(|step| step.name.as_str())
            .collect::<Vec<_>>()
            .join(" -> ");
        format!("{joined}\n")
    }
}

/// Nodes reachable from an origin, ordered by key.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReachabilitySummary<K> {
    pub origin: NodeRef<K>,
    pub count: usize,
    pub nodes: Vec<NodeRef<K>>,
}

impl<K: Clone + std::fmt::Display> ReachabilitySummary<K> {
    /// Build from the result of [`reachable_from`](crate::reachable_from).
    pub fn from_set<S>(network: &Network<S>, origin: &Node<S>, reachable: &BTreeSet<K>) -> Self
    where
        S: Space<Key = K>,
    {
        let nodes: Vec<NodeRef<K>> = reachable
            .iter()
            .filter_map(|key| network.node(key))
            .map(NodeRef::from)
            .collect();
        Self {
            origin: NodeRef::from(origin),
            count: nodes.len(),
            nodes,
        }
    }

    pub fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Reachable from {} ({}): {} nodes",
            self.origin.name, self.origin.key, self.count
        );
        for node in &self.nodes {
            let _ = writeln!(buffer, "  {} ({})", node.name, node.key);
        }
        buffer
    }
}

/// Size overview of a loaded network.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NetworkSummary {
    pub name: String,
    pub kind: &'static str,
    pub nodes: usize,
    pub segments: usize,
    pub airports: usize,
}

impl NetworkSummary {
    pub fn from_network<S: Space>(network: &Network<S>) -> Self {
        Self {
            name: network.name().to_string(),
            kind: S::LABEL,
            nodes: network.node_count(),
            segments: network.segment_count(),
            airports: network.airport_count(),
        }
    }

    pub fn render_plain(&self) -> String {
        let name = if self.name.is_empty() {
            "<unnamed>"
        } else {
            &self.name
        };
        format!(
            "{name} ({}): {} nodes, {} segments, {} airports\n",
            self.kind, self.nodes, self.segments, self.airports
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::AirSpace;

    fn airspace() -> AirSpace {
        let mut airspace = AirSpace::new("Catalunya");
        airspace
            .add_node(Node::nav_point(1, "GODOX", 41.0, 2.0))
            .unwrap();
        airspace
            .add_node(Node::nav_point(2, "LOBAR", 41.1, 2.1))
            .unwrap();
        airspace
            .add_node(Node::nav_point(3, "SLL", 41.2, 2.2))
            .unwrap();
        airspace.add_segment(&1, &2, 10.0).unwrap();
        airspace.add_segment(&2, &3, 2.5).unwrap();
        airspace
    }

    fn plan(steps: Vec<i64>, cost: f64) -> RoutePlan<i64> {
        RoutePlan {
            algorithm: RouteAlgorithm::Dijkstra,
            start: steps[0],
            goal: steps[steps.len() - 1],
            steps,
            cost,
        }
    }

    #[test]
    fn summary_tracks_leg_and_cumulative_costs() {
        let airspace = airspace();
        let summary = RouteSummary::from_plan(&airspace, &plan(vec![1, 2, 3], 12.5)).unwrap();
        assert_eq!(summary.hops, 2);
        assert_eq!(summary.start.name, "GODOX");
        assert_eq!(summary.goal.name, "SLL");
        let legs: Vec<f64> = summary.steps.iter().map(|s| s.leg_cost).collect();
        assert_eq!(legs, vec![0.0, 10.0, 2.5]);
        assert_eq!(summary.steps[2].cumulative_cost, 12.5);
    }

    #[test]
    fn empty_plan_is_rejected() {
        let airspace = airspace();
        let empty = RoutePlan {
            algorithm: RouteAlgorithm::Dijkstra,
            start: 1,
            goal: 1,
            steps: Vec::new(),
            cost: 0.0,
        };
        assert!(matches!(
            RouteSummary::from_plan(&airspace, &empty),
            Err(Error::EmptyRoutePlan)
        ));
    }

    #[test]
    fn compact_render_joins_names() {
        let airspace = airspace();
        let summary = RouteSummary::from_plan(&airspace, &plan(vec![3, 2, 1], 12.5)).unwrap();
        assert_eq!(summary.render(RenderMode::Compact), "SLL -> LOBAR -> GODOX\n");
        let plain = summary.render(RenderMode::PlainText);
        assert!(plain.starts_with("Route: SLL -> GODOX (2 hops, cost 12.500, algorithm: dijkstra)"));
    }

    #[test]
    fn reachability_summary_is_ordered_by_key() {
        let airspace = airspace();
        let origin = airspace.node(&3).unwrap();
        let reachable: BTreeSet<i64> = [3, 1, 2].into_iter().collect();
        let summary = ReachabilitySummary::from_set(&airspace, origin, &reachable);
        assert_eq!(summary.count, 3);
        let keys: Vec<i64> = summary.nodes.iter().map(|n| n.key).collect();
        assert_eq!(keys, vec![1, 2, 3]);
    }

    #[test]
    fn network_summary_counts() {
        let summary = NetworkSummary::from_network(&airspace());
        assert_eq!(
            summary.render_plain(),
            "Catalunya (aeronautical): 3 nodes, 2 segments, 0 airports\n"
        );
    }
}
