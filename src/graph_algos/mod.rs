mod dijkstra;
mod shortest_path;

use shortest_path::shortest_path;

use crate::collections::FxIndexMap;

/// Parent index of the start node in a [`GraphNodeMap`]
pub(crate) const NO_PARENT: usize = usize::MAX;

/// Type alias for the node map built by the search
/// N: Node - space on a graph
/// C: Cost of reaching the node from the start
/// The tuple contains (parent_index, cost) where:
/// - parent_index is the index of the parent node in the map
/// - cost is the total cost to reach this node from the start
pub(crate) type GraphNodeMap<N, C> = FxIndexMap<N, (usize, C)>;
