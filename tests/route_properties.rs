use approx::assert_relative_eq;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rstest::rstest;

use routeplan::{
    DemoConfig, Graph, PathResult, Phase, PriorityQueue, RouteError, RouteSession, StartOutcome,
};


const SCENARIO_EDGES: [(usize, usize, f64); 9] = [
    (0, 1, 5.0), (0, 2, 10.0), (1, 2, 3.0),
    (1, 3, 7.0), (2, 3, 8.0), (2, 4, 12.0),
    (3, 4, 6.0), (3, 5, 9.0), (4, 5, 4.0),
];

fn scenario_graph() -> Graph {
    Graph::from_edges(6, &SCENARIO_EDGES).unwrap()
}

/// Sparse random graph, often disconnected
fn random_graph(rng: &mut StdRng, node_count: usize) -> Graph {
    let mut graph = Graph::new(node_count);
    let edge_count = rng.random_range(0..node_count * 2);
    for _ in 0..edge_count {
        let from = rng.random_range(0..node_count);
        let to = rng.random_range(0..node_count);
        if from == to {
            continue;
        }
        let weight = rng.random_range(0..20) as f64 + if rng.random_bool(0.5) { 0.5 } else { 0.0 };
        graph.add_edge(from, to, weight).unwrap();
    }
    graph
}

fn assert_valid_route(graph: &Graph, result: &PathResult, source: usize, target: usize) {
    assert_eq!(result.source(), Some(source));
    assert_eq!(result.target(), Some(target));

    let mut seen = vec![false; graph.node_count()];
    for &node in &result.path {
        assert!(!seen[node], "node {node} visited twice in {:?}", result.path);
        seen[node] = true;
    }

    // Same summation order as the search, so the totals match exactly
    let total: f64 = result.path.windows(2).map(|pair| graph.edge_weight(pair[0], pair[1])).sum();
    assert_eq!(total, result.distance);
}


#[rstest]
#[case(0, 5, vec![0, 1, 3, 5], 21.0)]
#[case(5, 0, vec![5, 3, 1, 0], 21.0)]
#[case(0, 2, vec![0, 1, 2], 8.0)]
#[case(2, 5, vec![2, 4, 5], 16.0)]
#[case(0, 4, vec![0, 1, 3, 4], 18.0)]
fn scenario_routes(#[case] source: usize, #[case] target: usize, #[case] path: Vec<usize>, #[case] distance: f64) {
    let graph = scenario_graph();
    let result = graph.shortest_path(source, target).unwrap();

    assert_eq!(result.path, path);
    assert_eq!(result.distance, distance);
    assert_valid_route(&graph, &result, source, target);
}

#[test]
fn random_graphs_give_valid_shortest_routes() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..200 {
        let node_count = rng.random_range(2..9);
        let graph = random_graph(&mut rng, node_count);

        for source in 0..node_count {
            let distances = graph.distances_from(source).unwrap();

            for target in 0..node_count {
                let result = graph.shortest_path(source, target).unwrap();

                if result.is_reachable() {
                    assert_valid_route(&graph, &result, source, target);
                    assert_eq!(result.distance, distances[target]);
                } else {
                    assert_eq!(result, PathResult::unreachable());
                    assert!(distances[target].is_infinite());
                }

                // Symmetric in an undirected graph
                let reverse = graph.shortest_path(target, source).unwrap();
                assert_eq!(result.distance, reverse.distance);

                // Stable for repeated queries
                assert_eq!(graph.shortest_path(source, target).unwrap(), result);
            }
        }
    }
}

#[test]
fn routes_are_never_worse_than_any_single_edge() {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..100 {
        let graph = random_graph(&mut rng, 7);
        for (u, v, w) in graph.edges() {
            assert!(graph.shortest_path(u, v).unwrap().distance <= w);
        }
    }
}

#[test]
fn priority_queue_drains_in_order() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut queue = PriorityQueue::new();

    for element in 0..500 {
        queue.enqueue(element, rng.random_range(0..50) as f64);
    }

    let mut last = (f64::NEG_INFINITY, -1);
    while !queue.is_empty() {
        let (element, priority) = queue.dequeue().unwrap();
        assert!(priority >= last.0);
        if priority == last.0 {
            // Equal priorities keep insertion order
            assert!(element > last.1);
        }
        last = (priority, element);
    }

    assert!(matches!(queue.dequeue(), Err(RouteError::EmptyQueue)));
}

#[rstest]
#[case(0.5, 0.1)]
#[case(1.25, 0.25)]
#[case(0.0, 1.0)]
fn session_completes_with_expected_cost(#[case] rate: f64, #[case] step: f64) {
    let graph = scenario_graph();
    let route = graph.shortest_path(0, 5).unwrap();

    let mut session = RouteSession::new();
    let outcome = session.start(&route.path, |a, b| graph.edge_weight(a, b), rate).unwrap();
    assert_eq!(outcome, StartOutcome::Started);

    let steps = (route.distance / step).ceil() as usize;
    let mut progress = session.progress();
    for _ in 0..steps {
        progress = session.tick(step);
    }

    assert_eq!(progress.phase, Phase::Completed);
    assert_eq!(progress.fraction_complete, 1.0);
    assert_eq!(progress.percent(), 100);

    let summary = session.summary().unwrap();
    assert_relative_eq!(summary.total_cost, route.distance * rate);
    assert_eq!(summary.formatted_cost(), format!("{:.2}", 21.0 * rate));
}

#[test]
fn demo_graph_routes() {
    let graph = Graph::from_config(&DemoConfig::builtin().graph).unwrap();

    let result = graph.shortest_path(0, 5).unwrap();
    assert_eq!(result.path, vec![0, 1, 3, 5]);
    assert_eq!(result.distance, 42.0);

    // Same-node queries are rejected by the demo
    assert_eq!(graph.shortest_path(4, 4).unwrap(), PathResult::unreachable());
}
