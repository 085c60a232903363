//! Output formatting for command results.

use std::fmt::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use airnav_lib::{Airport, Network, NodeRef, Space};

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Print any serialisable value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// A neighbouring node and the cost of the segment leading to it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NeighbourEntry<K> {
    pub key: K,
    pub name: String,
    pub cost: f64,
}

/// Direct neighbours of a node.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NeighbourView<K> {
    pub node: NodeRef<K>,
    pub neighbours: Vec<NeighbourEntry<K>>,
}

impl<K: Clone + std::fmt::Display> NeighbourView<K> {
    pub fn collect<S: Space<Key = K>>(network: &Network<S>, key: &K) -> Option<Self> {
        let node = network.node(key)?;
        let neighbours = network
            .neighbours(key)
            .into_iter()
            .filter_map(|next| {
                let neighbour = network.node(next)?;
                Some(NeighbourEntry {
                    key: next.clone(),
                    name: neighbour.name.clone(),
                    cost: network.edge_cost(key, next)?,
                })
            })
            .collect();
        Some(Self {
            node: NodeRef::from(node),
            neighbours,
        })
    }

    pub fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Neighbours of {} ({}): {}",
            self.node.name,
            self.node.key,
            self.neighbours.len()
        );
        for entry in &self.neighbours {
            let _ = writeln!(
                buffer,
                "  {} ({})  cost {:.3}",
                entry.name, entry.key, entry.cost
            );
        }
        buffer
    }
}

/// An airport with its SID/STAR points resolved to names.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AirportView<K> {
    pub name: String,
    pub location: Option<NodeRef<K>>,
    pub sids: Vec<NodeRef<K>>,
    pub stars: Vec<NodeRef<K>>,
}

impl<K: Clone + std::fmt::Display> AirportView<K> {
    pub fn from_airport<S: Space<Key = K>>(network: &Network<S>, airport: &Airport<K>) -> Self {
        let resolve = |keys: &[K]| -> Vec<NodeRef<K>> {
            keys.iter()
                .filter_map(|key| network.node(key))
                .map(NodeRef::from)
                .collect()
        };
        Self {
            name: airport.name.clone(),
            location: network.airport_location(&airport.name).map(NodeRef::from),
            sids: resolve(&airport.sids),
            stars: resolve(&airport.stars),
        }
    }

    pub fn render_plain(&self) -> String {
        let list = |nodes: &[NodeRef<K>]| {
            nodes
                .iter()
                .map(|node| format!("{} ({})", node.name, node.key))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let mut buffer = String::new();
        let _ = writeln!(buffer, "Airport {}", self.name);
        if let Some(location) = &self.location {
            let _ = writeln!(buffer, "  location: {} ({})", location.name, location.key);
        }
        let _ = writeln!(buffer, "  SIDs: {}", list(&self.sids));
        let _ = writeln!(buffer, "  STARs: {}", list(&self.stars));
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airnav_lib::{AirSpace, Node};

    fn airspace() -> AirSpace {
        let mut airspace = AirSpace::new("test");
        airspace
            .add_node(Node::nav_point(1, "GODOX", 41.0, 2.0))
            .unwrap();
        airspace
            .add_node(Node::nav_point(2, "LOBAR", 41.5, 1.8))
            .unwrap();
        airspace.add_segment(&1, &2, 43.8).unwrap();
        let mut lebl = Airport::new("LEBL");
        lebl.add_sid(1);
        lebl.add_star(2);
        airspace.add_airport(lebl).unwrap();
        airspace
    }

    #[test]
    fn neighbour_view_lists_costs() {
        let airspace = airspace();
        let view = NeighbourView::collect(&airspace, &1).expect("GODOX exists");
        assert_eq!(view.neighbours.len(), 1);
        assert_eq!(view.neighbours[0].name, "LOBAR");
        assert_eq!(
            view.render_plain(),
            "Neighbours of GODOX (1): 1\n  LOBAR (2)  cost 43.800\n"
        );
        assert!(NeighbourView::collect(&airspace, &99).is_none());
    }

    #[test]
    fn airport_view_resolves_points() {
        let airspace = airspace();
        let view = AirportView::from_airport(&airspace, airspace.airport("LEBL").unwrap());
        assert_eq!(view.location.as_ref().map(|n| n.key), Some(1));
        assert_eq!(
            view.render_plain(),
            "Airport LEBL\n  location: GODOX (1)\n  SIDs: GODOX (1)\n  STARs: LOBAR (2)\n"
        );
    }
}
