//! Route planning for a small weighted graph demo.
//!
//! Build a [`Graph`], ask it for the cheapest route with
//! [`Graph::shortest_path`], and play the route back over simulated time with a
//! [`RouteSession`]. [`RoutePlanner`] ties these together with the user's
//! selection and an [`AnimationClock`] the host drives with elapsed wall time.

pub mod errors;
pub mod config;
pub mod geometry;
pub mod graph;
pub mod route;
mod collections;
mod graph_algos;

pub use collections::PriorityQueue;
pub use config::{DemoConfig, EdgeConfig, GraphConfig, PlannerConfig};
pub use errors::{Result, RouteError};
pub use geometry::Point;
pub use graph::{Edge, Graph, PathResult, SameNodePolicy, NODE_RADIUS};
pub use route::{
    AnimationClock, ClockEvent, Phase, Progress, Rejection, RouteOutcome, RoutePlanner,
    RouteSession, RouteSummary, StartOutcome,
};
