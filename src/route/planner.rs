use crate::config::{DemoConfig, PlannerConfig};
use crate::errors::{Result, RouteError};
use crate::graph::{Graph, PathResult, SameNodePolicy};
use super::clock::{AnimationClock, ClockEvent};
use super::session::{Phase, RouteSession, RouteSummary, StartOutcome};

use std::fmt;
use log::{info, warn};


/// Why a route request was turned down. These are expected user-facing outcomes
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    MissingSelection,
    SameNode,
    NoPath,
    InvalidPath(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::MissingSelection => write!(f, "Please select both origin and destination"),
            Rejection::SameNode => write!(f, "Origin and destination must be different"),
            Rejection::NoPath => write!(f, "No path found between selected nodes"),
            Rejection::InvalidPath(reason) => write!(f, "Route cannot be travelled: {reason}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RouteOutcome {
    Started(RouteSummary),
    /// A route is still animating or on display, the request was ignored
    Busy,
    Rejected(Rejection),
}

/// Everything one demo page needs: the graph, the user's selection and
/// the route currently being played back.
#[derive(Clone, Debug)]
pub struct RoutePlanner {
    graph: Graph,
    config: PlannerConfig,
    source: Option<usize>,
    target: Option<usize>,
    session: RouteSession,
    clock: AnimationClock,
    route: Option<PathResult>,
}

impl RoutePlanner {

    /// Fails with `InvalidConfig` for bad timing or pricing, and `InvalidNode`
    /// when a default selection is outside the graph
    pub fn new(graph: Graph, config: PlannerConfig) -> Result<Self> {
        config.validate(graph.node_count())?;

        let mut planner = Self {
            clock: AnimationClock::new(config.tick_interval_secs, config.hold_secs)?,
            graph,
            source: None,
            target: None,
            session: RouteSession::new(),
            route: None,
            config,
        };
        if let Some(node) = planner.config.default_source {
            planner.select_source(node)?;
        }
        if let Some(node) = planner.config.default_target {
            planner.select_target(node)?;
        }
        Ok(planner)
    }

    pub fn from_config(config: &DemoConfig) -> Result<Self> {
        config.validate()?;
        Self::new(Graph::from_config(&config.graph)?, config.planner.clone())
    }

    pub fn select_source(&mut self, node: usize) -> Result<()> {
        self.graph.check_node(node)?;
        self.source = Some(node);
        Ok(())
    }

    pub fn select_target(&mut self, node: usize) -> Result<()> {
        self.graph.check_node(node)?;
        self.target = Some(node);
        Ok(())
    }

    pub fn selection(&self) -> (Option<usize>, Option<usize>) {
        (self.source, self.target)
    }

    /// A route is animating or still held on display
    pub fn is_busy(&self) -> bool {
        self.session.phase() != Phase::Idle
    }

    /// Plan a route between the selected nodes and start playing it back
    pub fn request_route(&mut self) -> Result<RouteOutcome> {
        let (Some(source), Some(target)) = (self.source, self.target) else {
            return Ok(self.reject(Rejection::MissingSelection));
        };
        if source == target && self.graph.same_node_policy() == SameNodePolicy::Reject {
            return Ok(self.reject(Rejection::SameNode));
        }
        if self.is_busy() {
            return Ok(RouteOutcome::Busy);
        }

        let result = self.graph.shortest_path(source, target)?;
        if !result.is_reachable() {
            return Ok(self.reject(Rejection::NoPath));
        }

        let graph = &self.graph;
        let started = self.session.start(&result.path, |a, b| graph.edge_weight(a, b), self.config.rate_per_second);
        match started {
            Ok(StartOutcome::Started) => {}
            Ok(StartOutcome::Busy) => return Ok(RouteOutcome::Busy),
            Err(RouteError::InvalidPath(reason)) => return Ok(self.reject(Rejection::InvalidPath(reason))),
            Err(e) => return Err(e),
        }

        self.clock.reset();
        let Some(summary) = self.session.summary() else {
            return Err(RouteError::InvalidPath("session did not start".to_string()));
        };
        info!(
            "route {source} -> {target} via {:?}: {}s, cost {}",
            summary.path, summary.total_time, summary.formatted_cost()
        );
        self.route = Some(result);

        Ok(RouteOutcome::Started(summary))
    }

    /// Feed `wall_delta` seconds of host time to the playback clock
    pub fn advance(&mut self, wall_delta: f64) -> ClockEvent {
        let event = self.clock.advance(&mut self.session, wall_delta);
        if event == ClockEvent::Reset {
            self.route = None;
        }
        event
    }

    /// Drop the current route immediately
    pub fn reset(&mut self) {
        self.session.reset();
        self.clock.reset();
        self.route = None;
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn session(&self) -> &RouteSession {
        &self.session
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Route being animated or held, for highlighting
    pub fn current_route(&self) -> Option<&PathResult> {
        self.route.as_ref()
    }

    fn reject(&self, rejection: Rejection) -> RouteOutcome {
        warn!("route request rejected: {rejection}");
        RouteOutcome::Rejected(rejection)
    }
}
