use crate::errors::{Result, RouteError};
use super::{GraphNodeMap, NO_PARENT};

/// Construct the shortest path from the goal node back to the start node
/// Returns the ordered path as a vector of nodes from start to goal
/// node_map: GraphNodeMap<N, C> - map of nodes with their parent index and cost
/// goal_index: usize - index of the goal node in the node_map
pub(crate) fn shortest_path<N, C>(node_map: &GraphNodeMap<N, C>, goal_index: usize) -> Result<Vec<N>>
where
    N: Clone,
{

    let mut path = Vec::new();
    let mut current_index = goal_index;

    // Trace back from goal to start
    while current_index != NO_PARENT {
        // A walk longer than the map means the parent links form a cycle
        if path.len() >= node_map.len() {
            return Err(RouteError::InvalidPath("parent links do not lead back to the start".to_string()));
        }

        let Some((node, &(parent_index, _))) = node_map.get_index(current_index) else {
            return Err(RouteError::InvalidPath(format!("node index {current_index} is not in the search map")));
        };
        path.push(node.clone());
        current_index = parent_index;
    }

    // The path is in reverse order, so reverse it
    path.reverse();

    Ok(path)
}
