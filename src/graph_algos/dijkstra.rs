use crate::errors::Result;
use crate::collections::{FxIndexMap, PriorityQueue};
use crate::graph::{Graph, PathResult, SameNodePolicy};
use super::{shortest_path, GraphNodeMap, NO_PARENT};

use std::{hash::Hash, fmt::Debug};
use num_traits::Zero;
use indexmap::map::Entry::{Occupied, Vacant};
use log::debug;


impl Graph {

    /// Cheapest route from `source` to `target` using Dijkstra's Algorithm
    /// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
    ///
    /// Returns [`PathResult::unreachable`] when no route exists, or when
    /// `source == target` and the graph rejects same-node queries.
    pub fn shortest_path(&self, source: usize, target: usize) -> Result<PathResult> {
        self.check_node(source)?;
        self.check_node(target)?;

        if source == target && self.same_node_policy() == SameNodePolicy::Reject {
            return Ok(PathResult::unreachable());
        }

        let node_map = build_dijkstra_graph(source, |node: &usize| self.neighbor_costs(*node))?;

        let Some(goal_index) = node_map.get_index_of(&target) else {
            debug!("no route from {source} to {target}, {} nodes explored", node_map.len());
            return Ok(PathResult::unreachable());
        };

        let path = shortest_path(&node_map, goal_index)?;
        let distance = node_map
            .get_index(goal_index)
            .map_or(f64::INFINITY, |(_, &(_, cost))| cost);
        debug!("route {source} -> {target}: {path:?} costs {distance}");

        Ok(PathResult { path, distance })
    }

    /// Cost of the cheapest route from `source` to every node,
    /// `f64::INFINITY` for nodes that cannot be reached
    pub fn distances_from(&self, source: usize) -> Result<Vec<f64>> {
        self.check_node(source)?;

        let node_map = build_dijkstra_graph(source, |node: &usize| self.neighbor_costs(*node))?;

        let mut distances = vec![f64::INFINITY; self.node_count()];
        for (&node, &(_, cost)) in node_map.iter() {
            distances[node] = cost;
        }
        Ok(distances)
    }

    fn neighbor_costs(&self, node: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.neighbors(node).iter().map(|edge| (edge.to, edge.weight))
    }
}


/// Traverses the graph using Dijkstra's algorithm until no node is left to expand
/// Returns a map of every reachable node with its parent index and smallest cost
pub(crate) fn build_dijkstra_graph<N, C, IT, NN>(start: N, neighbors: NN) -> Result<GraphNodeMap<N, C>>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + PartialOrd + Copy + Debug,
    {

    // Nodes to visit, keyed by their index in nodes_map
    // Priority is the cost from the starting node
    let mut nodes_to_visit: PriorityQueue<usize, C> = PriorityQueue::new();

    // Best known (parent_index, cost) per node
    // for the start node, parent_index is NO_PARENT
    let mut nodes_map: GraphNodeMap<N, C> = FxIndexMap::default();

    let start_index = nodes_map.insert_full(start, (NO_PARENT, Zero::zero())).0;
    nodes_to_visit.enqueue(start_index, Zero::zero());

    let mut expanded = 0usize;
    while !nodes_to_visit.is_empty() {
        let (index, cost) = nodes_to_visit.dequeue()?;

        // fetch current best cost for node
        let Some((node, &(_, c))) = nodes_map.get_index(index) else {
            continue;
        };

        // Stale entry - a cheaper path to this node was committed after it was queued
        if cost > c {
            continue;
        }
        expanded += 1;

        let node = node.clone();
        for (neighbor, edge_cost) in neighbors(&node) {

            let new_cost = c + edge_cost;

            let neighbor_index = match nodes_map.entry(neighbor) {
                Vacant(e) => {
                    let neighbor_index = e.index();
                    e.insert((index, new_cost));
                    neighbor_index
                }
                Occupied(mut e) => {
                    if new_cost < e.get().1 {
                        e.insert((index, new_cost));
                        e.index()
                    } else {
                        continue;
                    }
                }
            };

            nodes_to_visit.enqueue(neighbor_index, new_cost);
        }
    }

    debug!("dijkstra expanded {expanded} entries, reached {} nodes", nodes_map.len());
    Ok(nodes_map)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RouteError;
    use std::collections::HashMap;

    fn scenario_graph() -> Graph {
        Graph::from_edges(6, &[
            (0, 1, 5.0), (0, 2, 10.0), (1, 2, 3.0),
            (1, 3, 7.0), (2, 3, 8.0), (2, 4, 12.0),
            (3, 4, 6.0), (3, 5, 9.0), (4, 5, 4.0),
        ]).unwrap()
    }

    #[test]
    fn test_build_dijkstra_graph_directed() {
        // Diamond-shaped graph: A -> B -> D and A -> C -> D
        let graph: HashMap<&str, Vec<(&str, u32)>> = HashMap::from([
            ("A", vec![("B", 1), ("C", 3)]),
            ("B", vec![("D", 5)]),
            ("C", vec![("D", 1)]),
            ("D", vec![]),
        ]);

        let result = build_dijkstra_graph("A", |node: &&str| graph[node].clone()).unwrap();

        let costs: HashMap<_, _> = result.iter().map(|(node, (_, cost))| (*node, *cost)).collect();
        assert_eq!(costs["A"], 0);
        assert_eq!(costs["B"], 1);
        assert_eq!(costs["C"], 3);
        assert_eq!(costs["D"], 4); // A->C->D
    }

    #[test]
    fn test_globally_cheapest_route_wins() {
        let graph = scenario_graph();
        let result = graph.shortest_path(0, 5).unwrap();

        assert_eq!(result.path, vec![0, 1, 3, 5]);
        assert_eq!(result.distance, 21.0);
    }

    #[test]
    fn test_greedy_trap_is_avoided() {
        // Always taking the cheapest edge from 0 walks 0-1-0-1... forever
        let graph = Graph::from_edges(4, &[(0, 1, 1.0), (0, 2, 4.0), (2, 3, 1.0), (1, 3, 10.0)]).unwrap();
        let result = graph.shortest_path(0, 3).unwrap();

        assert_eq!(result.path, vec![0, 2, 3]);
        assert_eq!(result.distance, 5.0);
    }

    #[test]
    fn test_disconnected_is_unreachable() {
        let graph = Graph::from_edges(4, &[(0, 1, 2.0), (2, 3, 2.0)]).unwrap();
        let result = graph.shortest_path(0, 3).unwrap();
        assert_eq!(result, PathResult::unreachable());
    }

    #[test]
    fn test_out_of_range_nodes() {
        let graph = scenario_graph();
        assert!(matches!(graph.shortest_path(6, 0), Err(RouteError::InvalidNode { node: 6, .. })));
        assert!(matches!(graph.shortest_path(0, 42), Err(RouteError::InvalidNode { node: 42, .. })));
        assert!(matches!(graph.distances_from(6), Err(RouteError::InvalidNode { .. })));
    }

    #[test]
    fn test_same_node_policy() {
        let graph = scenario_graph();
        let result = graph.shortest_path(2, 2).unwrap();
        assert_eq!(result.path, vec![2]);
        assert_eq!(result.distance, 0.0);

        let graph = graph.with_same_node_policy(SameNodePolicy::Reject);
        assert_eq!(graph.shortest_path(2, 2).unwrap(), PathResult::unreachable());
        assert_eq!(graph.shortest_path(2, 3).unwrap().distance, 8.0);
    }

    #[test]
    fn test_parallel_edges_use_cheapest() {
        let graph = Graph::from_edges(3, &[(0, 1, 9.0), (0, 1, 2.0), (1, 2, 1.0)]).unwrap();
        let result = graph.shortest_path(0, 2).unwrap();
        assert_eq!(result.path, vec![0, 1, 2]);
        assert_eq!(result.distance, 3.0);
    }

    #[test]
    fn test_distances_from() {
        // Node 6 has no edges
        let edges: Vec<_> = scenario_graph().edges().collect();
        let graph = Graph::from_edges(7, &edges).unwrap();

        let distances = graph.distances_from(0).unwrap();
        assert_eq!(distances, vec![0.0, 5.0, 8.0, 12.0, 18.0, 21.0, f64::INFINITY]);
    }

    #[test]
    fn test_repeated_queries_are_stable() {
        // Two equal-cost routes 0-1-3 and 0-2-3
        let graph = Graph::from_edges(4, &[(0, 1, 1.0), (0, 2, 1.0), (1, 3, 1.0), (2, 3, 1.0)]).unwrap();
        let first = graph.shortest_path(0, 3).unwrap();
        for _ in 0..10 {
            assert_eq!(graph.shortest_path(0, 3).unwrap(), first);
        }
        assert_eq!(first.distance, 2.0);
    }
}
