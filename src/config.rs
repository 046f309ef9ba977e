//! Static configuration of the demo: the graph to plan on and the
//! timing and pricing of route playback.

use crate::errors::{Result, RouteError};
use crate::geometry::Point;
use crate::graph::{Graph, SameNodePolicy};

use std::path::Path;
use serde::{Deserialize, Serialize};


#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    pub graph: GraphConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    pub nodes: usize,
    /// Display position per node, either empty or one per node
    #[serde(default)]
    pub positions: Vec<Point>,
    pub edges: Vec<EdgeConfig>,
    /// Answer queries whose origin and destination are the same node
    #[serde(default)]
    pub allow_same_node: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeConfig {
    pub from: usize,
    pub to: usize,
    /// Travel time in seconds
    pub weight: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Price per second of travel
    pub rate_per_second: f64,
    pub tick_interval_secs: f64,
    /// How long a finished route stays on display before resetting
    pub hold_secs: f64,
    pub default_source: Option<usize>,
    pub default_target: Option<usize>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            rate_per_second: 0.5,
            tick_interval_secs: 0.1,
            hold_secs: 3.0,
            default_source: None,
            default_target: None,
        }
    }
}

impl DemoConfig {

    /// The six-node graph the demo page ships with
    pub fn builtin() -> Self {
        let edges = [(0, 1, 10.0), (0, 2, 15.0), (1, 3, 12.0), (2, 4, 10.0), (3, 5, 20.0), (4, 5, 18.0)]
            .into_iter()
            .map(|(from, to, weight)| EdgeConfig { from, to, weight })
            .collect();

        let positions = [(50.0, 50.0), (200.0, 50.0), (50.0, 200.0), (200.0, 200.0), (50.0, 350.0), (200.0, 350.0)]
            .into_iter()
            .map(|(x, y)| Point::new(x, y))
            .collect();

        Self {
            graph: GraphConfig {
                nodes: 6,
                positions,
                edges,
                allow_same_node: false,
            },
            planner: PlannerConfig {
                default_source: Some(0),
                default_target: Some(5),
                ..PlannerConfig::default()
            },
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        self.graph.validate()?;
        self.planner.validate(self.graph.nodes)
    }
}

impl GraphConfig {

    fn validate(&self) -> Result<()> {
        if !self.positions.is_empty() && self.positions.len() != self.nodes {
            return Err(RouteError::InvalidConfig(format!(
                "{} positions given for {} nodes",
                self.positions.len(),
                self.nodes
            )));
        }
        Ok(())
    }
}

impl PlannerConfig {

    pub(crate) fn validate(&self, node_count: usize) -> Result<()> {
        if !self.rate_per_second.is_finite() || self.rate_per_second < 0.0 {
            return Err(RouteError::InvalidConfig("rate_per_second must be finite and non-negative".to_string()));
        }
        if !self.tick_interval_secs.is_finite() || self.tick_interval_secs <= 0.0 {
            return Err(RouteError::InvalidConfig("tick_interval_secs must be positive".to_string()));
        }
        if !self.hold_secs.is_finite() || self.hold_secs < 0.0 {
            return Err(RouteError::InvalidConfig("hold_secs must be finite and non-negative".to_string()));
        }
        for node in [self.default_source, self.default_target].into_iter().flatten() {
            if node >= node_count {
                return Err(RouteError::InvalidNode { node, node_count });
            }
        }
        Ok(())
    }
}

impl Graph {

    /// Build the graph a config describes. Nothing is built if any edge is invalid
    pub fn from_config(config: &GraphConfig) -> Result<Self> {
        config.validate()?;

        let edges: Vec<_> = config.edges.iter().map(|e| (e.from, e.to, e.weight)).collect();
        let policy = if config.allow_same_node { SameNodePolicy::Allow } else { SameNodePolicy::Reject };

        let mut graph = Graph::from_edges(config.nodes, &edges)?.with_same_node_policy(policy);
        for (node, position) in config.positions.iter().enumerate() {
            graph.set_position(node, *position)?;
        }
        Ok(graph)
    }
}
