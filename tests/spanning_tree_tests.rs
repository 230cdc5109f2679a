//! Tests for the minimum spanning tree algorithms
//!
//! Kruskal and Prim are checked against a brute-force search over every
//! subset of `V - 1` edges on small graphs.

use rust_graph_routes::spanning::total_weight;
use rust_graph_routes::{DisjointSet, Graph, SpanningEdge};

/// Builds an undirected graph by inserting both directions of every edge
fn undirected(n: u32, edges: &[(u32, u32, f64)]) -> Graph<u32> {
    let mut graph = Graph::new();
    for v in 0..n {
        graph.add_vertex(v);
    }
    for &(a, b, w) in edges {
        graph.add_edge(&a, &b, w);
        graph.add_edge(&b, &a, w);
    }
    graph
}

/// True if the edges form a forest over vertices `0..n`
fn is_acyclic(n: u32, edges: &[SpanningEdge<u32>]) -> bool {
    let mut sets = DisjointSet::new(n as usize);
    edges
        .iter()
        .all(|e| sets.union(e.origin as usize, e.dest as usize))
}

/// Minimum weight over every acyclic choice of `n - 1` edges
fn brute_force_minimum(n: u32, edges: &[(u32, u32, f64)]) -> Option<f64> {
    let m = edges.len();
    let mut best: Option<f64> = None;
    for mask in 0u32..(1 << m) {
        if mask.count_ones() != n - 1 {
            continue;
        }
        let mut sets = DisjointSet::new(n as usize);
        let mut weight = 0.0;
        let mut ok = true;
        for (i, &(a, b, w)) in edges.iter().enumerate() {
            if mask & (1 << i) != 0 {
                if !sets.union(a as usize, b as usize) {
                    ok = false;
                    break;
                }
                weight += w;
            }
        }
        if ok && best.is_none_or(|b| weight < b) {
            best = Some(weight);
        }
    }
    best
}

fn small_graphs() -> Vec<(u32, Vec<(u32, u32, f64)>)> {
    vec![
        (
            4,
            vec![
                (0, 1, 1.0),
                (1, 2, 2.0),
                (2, 3, 1.0),
                (3, 0, 4.0),
                (0, 2, 3.0),
                (1, 3, 5.0),
            ],
        ),
        (
            5,
            vec![
                (0, 1, 7.0),
                (0, 3, 5.0),
                (1, 2, 8.0),
                (1, 3, 9.0),
                (1, 4, 7.0),
                (2, 4, 5.0),
                (3, 4, 15.0),
                (3, 2, 6.0),
            ],
        ),
        (
            5,
            vec![
                (0, 1, 2.0),
                (1, 2, 2.0),
                (2, 3, 2.0),
                (3, 4, 2.0),
                (4, 0, 2.0),
                (0, 2, 1.0),
                (1, 3, 3.0),
            ],
        ),
    ]
}

#[test]
fn test_kruskal_matches_brute_force() {
    for (n, edges) in small_graphs() {
        let graph = undirected(n, &edges);
        let tree = graph.calculate_kruskal();

        assert_eq!(tree.len() as u32, n - 1);
        assert!(is_acyclic(n, &tree));
        assert_eq!(Some(total_weight(&tree)), brute_force_minimum(n, &edges));
    }
}

#[test]
fn test_prim_matches_brute_force() {
    for (n, edges) in small_graphs() {
        let graph = undirected(n, &edges);
        let tree = graph.calculate_prim_from(&0);

        assert_eq!(tree.len() as u32, n - 1);
        assert!(is_acyclic(n, &tree));
        assert_eq!(Some(total_weight(&tree)), brute_force_minimum(n, &edges));
    }
}

#[test]
fn test_prim_edges_are_graph_edges() {
    let (n, edges) = small_graphs().remove(1);
    let graph = undirected(n, &edges);
    for edge in graph.calculate_prim() {
        assert_eq!(graph.get_weight(&edge.origin, &edge.dest), edge.weight);
    }
}

#[test]
fn test_kruskal_spanning_forest() {
    // two components: {0, 1, 2} and {3, 4}
    let graph = undirected(5, &[(0, 1, 3.0), (1, 2, 1.0), (0, 2, 2.0), (3, 4, 6.0)]);
    let forest = graph.calculate_kruskal();
    assert_eq!(forest.len(), 3);
    assert!(is_acyclic(5, &forest));
    assert_eq!(total_weight(&forest), 9.0);
}

#[test]
fn test_kruskal_skips_unreachable_processed_edges() {
    let mut graph = undirected(3, &[(0, 1, 1.0)]);
    // 1 -> 2 has no edge, so this route weighs +∞
    graph.add_processed_edge(&0, &2, &[0, 1, 2]);
    let forest = graph.calculate_kruskal();
    assert_eq!(forest.len(), 1);
}

#[test]
fn test_single_vertex_tree_is_empty() {
    let graph = undirected(1, &[]);
    assert!(graph.calculate_prim().is_empty());
    assert!(graph.calculate_kruskal().is_empty());
}
