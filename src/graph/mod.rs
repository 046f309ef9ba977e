mod path;

pub use path::PathResult;

use crate::errors::{Result, RouteError};
use crate::geometry::Point;


/// Radius the demo draws nodes with, also the default hit-test radius
pub const NODE_RADIUS: f64 = 20.0;

/// Whether a query from a node to itself is answered
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SameNodePolicy {
    /// `shortest_path(s, s)` is the zero-length path `[s]`
    #[default]
    Allow,
    /// `shortest_path(s, s)` is unreachable
    Reject,
}

/// One half of an undirected edge, stored in the adjacency of its other endpoint
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub to: usize,
    pub weight: f64, // seconds
}

/// Undirected weighted graph over a fixed set of nodes `0..node_count`
///
/// Parallel edges are kept as-is; the search relaxes each of them and
/// [`Graph::edge_weight`] reports the cheapest one.
#[derive(Clone, Debug)]
pub struct Graph {
    adjacency: Vec<Vec<Edge>>,
    positions: Vec<Option<Point>>,
    same_node: SameNodePolicy,
}

impl Graph {

    /// Graph with `node_count` nodes and no edges
    pub fn new(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
            positions: vec![None; node_count],
            same_node: SameNodePolicy::default(),
        }
    }

    /// Build a graph from an edge list, failing on the first invalid edge
    pub fn from_edges(node_count: usize, edges: &[(usize, usize, f64)]) -> Result<Self> {
        let mut graph = Self::new(node_count);
        graph.add_edges(edges)?;
        Ok(graph)
    }

    pub fn with_same_node_policy(mut self, policy: SameNodePolicy) -> Self {
        self.same_node = policy;
        self
    }

    pub fn same_node_policy(&self) -> SameNodePolicy {
        self.same_node
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Add an undirected edge to both endpoints
    pub fn add_edge(&mut self, from: usize, to: usize, weight: f64) -> Result<()> {
        self.validate_edge(from, to, weight)?;
        self.insert_edge(from, to, weight);
        Ok(())
    }

    /// Add several edges at once. Every edge is validated before any is inserted,
    /// so a failure leaves the graph untouched
    pub fn add_edges(&mut self, edges: &[(usize, usize, f64)]) -> Result<()> {
        for &(from, to, weight) in edges {
            self.validate_edge(from, to, weight)?;
        }
        for &(from, to, weight) in edges {
            self.insert_edge(from, to, weight);
        }
        Ok(())
    }

    /// Neighbors of `node` with the weight of the connecting edge
    pub fn neighbors(&self, node: usize) -> &[Edge] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Weight of the cheapest direct edge between `from` and `to`,
    /// `f64::INFINITY` when they are not adjacent
    pub fn edge_weight(&self, from: usize, to: usize) -> f64 {
        self.neighbors(from)
            .iter()
            .filter(|edge| edge.to == to)
            .map(|edge| edge.weight)
            .fold(f64::INFINITY, f64::min)
    }

    /// Every undirected edge once, as `(u, v, weight)` with `u < v`
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(from, edges)| {
            edges
                .iter()
                .filter(move |edge| from < edge.to)
                .map(move |edge| (from, edge.to, edge.weight))
        })
    }

    pub fn set_position(&mut self, node: usize, position: Point) -> Result<()> {
        self.check_node(node)?;
        self.positions[node] = Some(position);
        Ok(())
    }

    pub fn position(&self, node: usize) -> Option<Point> {
        self.positions.get(node).copied().flatten()
    }

    /// Nearest node whose display position lies within `radius` of `point`
    pub fn node_at(&self, point: &Point, radius: f64) -> Option<usize> {
        self.positions
            .iter()
            .enumerate()
            .filter_map(|(node, position)| position.map(|p| (node, p.distance_to(point))))
            .filter(|&(_, distance)| distance <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(node, _)| node)
    }

    pub(crate) fn check_node(&self, node: usize) -> Result<()> {
        if node < self.node_count() {
            Ok(())
        } else {
            Err(RouteError::InvalidNode { node, node_count: self.node_count() })
        }
    }

    fn validate_edge(&self, from: usize, to: usize, weight: f64) -> Result<()> {
        let invalid = |reason: &str| RouteError::InvalidEdge { from, to, reason: reason.to_string() };

        if from >= self.node_count() || to >= self.node_count() {
            return Err(invalid("endpoint out of range"));
        }
        if from == to {
            return Err(invalid("self-loops are not supported"));
        }
        if !weight.is_finite() {
            return Err(invalid("weight must be finite"));
        }
        if weight < 0.0 {
            return Err(invalid("weight must be non-negative"));
        }
        Ok(())
    }

    fn insert_edge(&mut self, from: usize, to: usize, weight: f64) {
        self.adjacency[from].push(Edge { to, weight });
        self.adjacency[to].push(Edge { to: from, weight });
    }
}
