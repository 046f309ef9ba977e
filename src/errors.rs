use thiserror::Error;

pub type Result<T> = std::result::Result<T, RouteError>;

/// Errors raised by graph construction, queries and route sessions.
/// An unreachable target is not an error, see [`crate::PathResult::unreachable`].
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("node {node} is out of range for a graph of {node_count} nodes")]
    InvalidNode { node: usize, node_count: usize },

    #[error("invalid edge {from} -> {to}: {reason}")]
    InvalidEdge {
        from: usize,
        to: usize,
        reason: String,
    },

    // Dequeue on an empty priority queue - callers check is_empty() first
    #[error("dequeue called on an empty priority queue")]
    EmptyQueue,

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
