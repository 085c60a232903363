use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use tracing::debug;

use crate::error::{Error, Result};
use crate::space::{Aeronautical, GeoPosition, Planar, PlanarPosition, Space};

/// Minimum Jaro-Winkler similarity for a node name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Relative slack allowed before a segment counts as cheaper than the straight line.
const SHORTCUT_TOLERANCE: f64 = 1e-9;

/// Number of suggestions attached to [`Error::UnknownNode`] by [`Network::resolve`].
const MAX_SUGGESTIONS: usize = 3;

/// A vertex of the navigation graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<S: Space> {
    pub key: S::Key,
    pub name: String,
    pub position: S::Position,
}

impl<S: Space> Node<S> {
    pub fn new(key: S::Key, name: impl Into<String>, position: S::Position) -> Self {
        Self {
            key,
            name: name.into(),
            position,
        }
    }

    /// Straight-line distance to another node under the space's metric.
    pub fn distance_to(&self, other: &Self) -> f64 {
        S::distance(&self.position, &other.position)
    }
}

impl Node<Planar> {
    /// Planar node whose key is its name.
    pub fn planar(name: impl Into<String>, x: f64, y: f64) -> Self {
        let name = name.into();
        Self {
            key: name.clone(),
            name,
            position: PlanarPosition::new(x, y),
        }
    }
}

impl Node<Aeronautical> {
    /// Navigation point identified by its number.
    pub fn nav_point(number: i64, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            key: number,
            name: name.into(),
            position: GeoPosition::new(latitude, longitude),
        }
    }
}

impl<S: Space> fmt::Display for Node<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.position)
    }
}

/// Weighted edge between two node keys. Traversable in both directions.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment<S: Space> {
    pub name: String,
    pub origin: S::Key,
    pub destination: S::Key,
    pub cost: f64,
}

impl<S: Space> Segment<S> {
    /// Whether this segment joins `a` and `b`, in either direction.
    pub fn connects(&self, a: &S::Key, b: &S::Key) -> bool {
        (&self.origin == a && &self.destination == b)
            || (&self.origin == b && &self.destination == a)
    }

    /// Whether `key` is one of the segment's endpoints.
    pub fn touches(&self, key: &S::Key) -> bool {
        &self.origin == key || &self.destination == key
    }
}

impl<S: Space> fmt::Display for Segment<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Segment {}: {} -> {}, Distance: {:.3}",
            self.name, self.origin, self.destination, self.cost
        )
    }
}

/// Airport with its departure (SID) and arrival (STAR) entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Airport<K> {
    pub name: String,
    pub sids: Vec<K>,
    pub stars: Vec<K>,
}

impl<K> Airport<K> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sids: Vec::new(),
            stars: Vec::new(),
        }
    }

    pub fn add_sid(&mut self, key: K) {
        self.sids.push(key);
    }

    pub fn add_star(&mut self, key: K) {
        self.stars.push(key);
    }
}

/// Outcome of a successful segment insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentInsert {
    /// The segment was new and is now part of the graph.
    Inserted,
    /// A segment with the same name or endpoint pair already existed; nothing changed.
    AlreadyPresent,
}

impl SegmentInsert {
    pub fn is_inserted(self) -> bool {
        self == SegmentInsert::Inserted
    }
}

/// Entry in a node's adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Link {
    node: usize,
    segment: usize,
}

/// Graph store: nodes, segments, airports and the adjacency derived from them.
///
/// Nodes live in an arena in insertion order and are addressed internally by
/// index; segments refer to their endpoints by key. Adjacency is materialised
/// per node and kept symmetric, so every segment is traversable both ways.
#[derive(Debug, Clone)]
pub struct Network<S: Space> {
    name: String,
    nodes: Vec<Node<S>>,
    index: HashMap<S::Key, usize>,
    segments: Vec<Segment<S>>,
    segment_names: HashMap<String, usize>,
    segment_pairs: HashMap<(usize, usize), usize>,
    adjacency: Vec<Vec<Link>>,
    airports: BTreeMap<String, Airport<S::Key>>,
    /// Number of segments cheaper than the straight line between their endpoints.
    shortcuts: usize,
}

impl<S: Space> Default for Network<S> {
    fn default() -> Self {
        Self {
            name: String::new(),
            nodes: Vec::new(),
            index: HashMap::new(),
            segments: Vec::new(),
            segment_names: HashMap::new(),
            segment_pairs: HashMap::new(),
            adjacency: Vec::new(),
            airports: BTreeMap::new(),
            shortcuts: 0,
        }
    }
}

/// Generic planar graph.
pub type Graph = Network<Planar>;

/// Aeronautical airspace.
pub type AirSpace = Network<Aeronautical>;

impl<S: Space> Network<S> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[Node<S>] {
        &self.nodes
    }

    /// Segments in insertion order.
    pub fn segments(&self) -> &[Segment<S>] {
        &self.segments
    }

    /// Airports ordered by name.
    pub fn airports(&self) -> impl Iterator<Item = &Airport<S::Key>> {
        self.airports.values()
    }

    pub fn contains(&self, key: &S::Key) -> bool {
        self.index.contains_key(key)
    }

    /// Lookup a node by key.
    pub fn node(&self, key: &S::Key) -> Option<&Node<S>> {
        self.index.get(key).map(|&idx| &self.nodes[idx])
    }

    /// Lookup the first node, in insertion order, whose name matches exactly.
    pub fn node_by_name(&self, name: &str) -> Option<&Node<S>> {
        self.nodes.iter().find(|node| node.name == name)
    }

    /// Add a node. Fails without mutating the graph when the key is taken.
    pub fn add_node(&mut self, node: Node<S>) -> Result<()> {
        if self.index.contains_key(&node.key) {
            return Err(Error::DuplicateNode {
                key: node.key.to_string(),
            });
        }
        let idx = self.nodes.len();
        self.index.insert(node.key.clone(), idx);
        self.nodes.push(node);
        self.adjacency.push(Vec::new());
        Ok(())
    }

    /// Connect two existing nodes with an explicit cost.
    ///
    /// The segment is named `origin-destination`. Re-adding a connection that
    /// already exists (in either direction) succeeds without changing anything.
    pub fn add_segment(
        &mut self,
        origin: &S::Key,
        destination: &S::Key,
        cost: f64,
    ) -> Result<SegmentInsert> {
        let name = format!("{origin}-{destination}");
        self.insert_segment(name, origin, destination, Some(cost))
    }

    /// Connect two existing nodes under a given segment name. The cost is the
    /// straight-line distance between the endpoints.
    pub fn add_named_segment(
        &mut self,
        name: impl Into<String>,
        origin: &S::Key,
        destination: &S::Key,
    ) -> Result<SegmentInsert> {
        self.insert_segment(name.into(), origin, destination, None)
    }

    fn insert_segment(
        &mut self,
        name: String,
        origin: &S::Key,
        destination: &S::Key,
        cost: Option<f64>,
    ) -> Result<SegmentInsert> {
        let from = self
            .index_of(origin)
            .ok_or_else(|| Error::unknown_node(origin))?;
        let to = self
            .index_of(destination)
            .ok_or_else(|| Error::unknown_node(destination))?;

        if self.segment_names.contains_key(&name)
            || self.segment_pairs.contains_key(&pair_key(from, to))
        {
            return Ok(SegmentInsert::AlreadyPresent);
        }

        let cost = cost.unwrap_or_else(|| self.nodes[from].distance_to(&self.nodes[to]));
        if self.is_shortcut(from, to, cost) {
            self.shortcuts += 1;
        }
        let segment_idx = self.segments.len();
        self.segments.push(Segment {
            name: name.clone(),
            origin: origin.clone(),
            destination: destination.clone(),
            cost,
        });
        self.segment_names.insert(name, segment_idx);
        self.link(from, to, segment_idx);
        Ok(SegmentInsert::Inserted)
    }

    fn link(&mut self, from: usize, to: usize, segment: usize) {
        self.segment_pairs.insert(pair_key(from, to), segment);
        self.adjacency[from].push(Link { node: to, segment });
        if from != to {
            self.adjacency[to].push(Link {
                node: from,
                segment,
            });
        }
    }

    /// Remove a node together with every segment, neighbour entry and airport
    /// reference that points at it.
    pub fn remove_node(&mut self, key: &S::Key) -> Result<Node<S>> {
        let idx = self.index_of(key).ok_or_else(|| Error::unknown_node(key))?;
        let removed = self.nodes.remove(idx);

        let before = self.segments.len();
        self.segments.retain(|segment| !segment.touches(key));
        let purged_segments = before - self.segments.len();

        for airport in self.airports.values_mut() {
            airport.sids.retain(|sid| sid != key);
            airport.stars.retain(|star| star != key);
        }

        self.rebuild_indices();
        debug!(
            node = %removed.key,
            purged_segments,
            "removed node from {} graph",
            S::LABEL
        );
        Ok(removed)
    }

    fn rebuild_indices(&mut self) {
        self.index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.key.clone(), idx))
            .collect();
        self.segment_names.clear();
        self.segment_pairs.clear();
        self.adjacency = vec![Vec::new(); self.nodes.len()];
        self.shortcuts = 0;

        for segment_idx in 0..self.segments.len() {
            let segment = &self.segments[segment_idx];
            let (Some(&from), Some(&to)) = (
                self.index.get(&segment.origin),
                self.index.get(&segment.destination),
            ) else {
                continue;
            };
            let (cost, name) = (segment.cost, segment.name.clone());
            if self.is_shortcut(from, to, cost) {
                self.shortcuts += 1;
            }
            self.segment_names.insert(name, segment_idx);
            self.link(from, to, segment_idx);
        }
    }

    /// Whether `cost` undercuts the straight-line distance between two nodes.
    fn is_shortcut(&self, from: usize, to: usize, cost: f64) -> bool {
        let straight = self.nodes[from].distance_to(&self.nodes[to]);
        cost < straight - SHORTCUT_TOLERANCE * straight.max(1.0)
    }

    /// Whether some segment costs less than the straight line between its
    /// endpoints. The distance heuristic is not admissible on such a network.
    pub fn has_shortcuts(&self) -> bool {
        self.shortcuts > 0
    }

    /// Keys of every node sharing a segment with `key`, in either direction.
    /// Unknown keys have no neighbours.
    pub fn neighbours(&self, key: &S::Key) -> Vec<&S::Key> {
        self.index_of(key)
            .map(|idx| {
                self.adjacency[idx]
                    .iter()
                    .map(|link| &self.nodes[link.node].key)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Segment joining `a` and `b` in either direction.
    pub fn segment_between(&self, a: &S::Key, b: &S::Key) -> Option<&Segment<S>> {
        let from = self.index_of(a)?;
        let to = self.index_of(b)?;
        self.segment_pairs
            .get(&pair_key(from, to))
            .map(|&idx| &self.segments[idx])
    }

    /// Cost of the segment joining `a` and `b`, if they are adjacent.
    pub fn edge_cost(&self, a: &S::Key, b: &S::Key) -> Option<f64> {
        self.segment_between(a, b).map(|segment| segment.cost)
    }

    /// Register an airport. Fails without mutating the graph when the code is taken.
    pub fn add_airport(&mut self, airport: Airport<S::Key>) -> Result<()> {
        if self.airports.contains_key(&airport.name) {
            return Err(Error::DuplicateAirport { name: airport.name });
        }
        self.airports.insert(airport.name.clone(), airport);
        Ok(())
    }

    /// Lookup an airport by its exact, case-sensitive code.
    pub fn airport(&self, name: &str) -> Option<&Airport<S::Key>> {
        self.airports.get(name)
    }

    /// The node standing in for an airport's location: its first SID point.
    pub fn airport_location(&self, name: &str) -> Option<&Node<S>> {
        self.airport(name)
            .and_then(|airport| airport.sids.first())
            .and_then(|key| self.node(key))
    }

    /// Node nearest to `position`. The earliest inserted node wins ties.
    pub fn closest_node(&self, position: &S::Position) -> Option<&Node<S>> {
        let mut best: Option<(&Node<S>, f64)> = None;
        for node in &self.nodes {
            let distance = S::distance(&node.position, position);
            match best {
                Some((_, current)) if distance >= current => {}
                _ => best = Some((node, distance)),
            }
        }
        best.map(|(node, _)| node)
    }

    /// Resolve user input to a node: an exact name first, then a key.
    ///
    /// Unknown input yields [`Error::UnknownNode`] with a few similarly named
    /// nodes as suggestions.
    pub fn resolve(&self, query: &str) -> Result<&Node<S>> {
        if let Some(node) = self.node_by_name(query) {
            return Ok(node);
        }
        if let Some(node) = query
            .parse::<S::Key>()
            .ok()
            .and_then(|key| self.node(&key))
        {
            return Ok(node);
        }
        Err(Error::UnknownNode {
            name: query.to_string(),
            suggestions: self.fuzzy_node_matches(query, MAX_SUGGESTIONS),
        })
    }

    /// Node names most similar to `query`, best first.
    pub fn fuzzy_node_matches(&self, query: &str, limit: usize) -> Vec<String> {
        let mut scored: Vec<(f64, &str)> = self
            .nodes
            .iter()
            .map(|node| (strsim::jaro_winkler(query, &node.name), node.name.as_str()))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(b.1))
        });

        let mut names: Vec<String> = Vec::new();
        for (_, name) in scored {
            if names.len() == limit {
                break;
            }
            if !names.iter().any(|existing| existing == name) {
                names.push(name.to_string());
            }
        }
        names
    }

    pub(crate) fn index_of(&self, key: &S::Key) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub(crate) fn node_at(&self, idx: usize) -> &Node<S> {
        &self.nodes[idx]
    }

    pub(crate) fn degree(&self, idx: usize) -> usize {
        self.adjacency[idx].len()
    }

    /// Neighbour indices of the node at `idx` with the cost of the joining segment.
    pub(crate) fn links(&self, idx: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.adjacency[idx]
            .iter()
            .map(|link| (link.node, self.segments[link.segment].cost))
    }
}

fn pair_key(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
