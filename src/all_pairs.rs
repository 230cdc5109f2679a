//! All-pairs shortest paths (Floyd–Warshall)
//!
//! Every call assigns each vertex a dense index `0..V` and fills two flat
//! `V × V` tables: `dist[i][j]`, the shortest distance from `i` to `j`, and
//! `pred[i][j]`, the index of the vertex preceding `j` on that path.
//!
//! # Time Complexity
//!
//! O(V³) time, O(V²) space. The tables are rebuilt on every call.

use crate::graph::{Graph, Identity};
use crate::vertex::VertexId;
use rustc_hash::FxHashMap;
use tracing::debug;

/// Dense distance and predecessor matrices over one snapshot of a graph
#[derive(Debug, Clone)]
pub struct AllPairs {
    ids: Vec<VertexId>,
    index: FxHashMap<VertexId, usize>,
    dist: Vec<f64>,
    pred: Vec<Option<usize>>,
}

impl AllPairs {
    /// Runs Floyd–Warshall over the current state of `graph`
    pub fn compute<T: Identity>(graph: &Graph<T>) -> Self {
        let ids: Vec<VertexId> = graph.vertex_ids().collect();
        let index: FxHashMap<VertexId, usize> =
            ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        let n = ids.len();

        let mut dist = vec![f64::INFINITY; n * n];
        let mut pred = vec![None; n * n];
        for i in 0..n {
            dist[i * n + i] = 0.0;
        }

        for (i, &id) in ids.iter().enumerate() {
            let Some(vertex) = graph.vertex_by_id(id) else {
                continue;
            };
            for edge in vertex.out_edges() {
                let Some(&j) = index.get(&edge.dest()) else {
                    continue;
                };
                // distance(v, v) stays 0 regardless of self-loops
                if i != j {
                    dist[i * n + j] = edge.weight();
                    pred[i * n + j] = Some(i);
                }
            }
        }

        for k in 0..n {
            for i in 0..n {
                let via = dist[i * n + k];
                if via == f64::INFINITY {
                    continue;
                }
                for j in 0..n {
                    let tail = dist[k * n + j];
                    if tail == f64::INFINITY {
                        continue;
                    }
                    if via + tail < dist[i * n + j] {
                        dist[i * n + j] = via + tail;
                        pred[i * n + j] = pred[k * n + j];
                    }
                }
            }
        }

        AllPairs {
            ids,
            index,
            dist,
            pred,
        }
    }

    /// Number of vertices covered by the matrices
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Dense index assigned to `id` for this computation
    pub fn index_of(&self, id: VertexId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn vertex_at(&self, index: usize) -> Option<VertexId> {
        self.ids.get(index).copied()
    }

    /// Shortest distance between two dense indices, +∞ if out of range or unreachable
    pub fn weight_at(&self, i: usize, j: usize) -> f64 {
        let n = self.len();
        if i >= n || j >= n {
            return f64::INFINITY;
        }
        self.dist[i * n + j]
    }

    /// Predecessor of `j` on the shortest path from `i`
    pub fn predecessor_at(&self, i: usize, j: usize) -> Option<usize> {
        let n = self.len();
        if i >= n || j >= n {
            return None;
        }
        self.pred[i * n + j]
    }

    /// Shortest distance between two vertices, +∞ if unknown or unreachable
    pub fn distance(&self, origin: VertexId, dest: VertexId) -> f64 {
        match (self.index_of(origin), self.index_of(dest)) {
            (Some(i), Some(j)) => self.weight_at(i, j),
            _ => f64::INFINITY,
        }
    }

    /// Vertices along the shortest path, empty if unknown or unreachable
    pub fn path(&self, origin: VertexId, dest: VertexId) -> Vec<VertexId> {
        let (Some(i), Some(j)) = (self.index_of(origin), self.index_of(dest)) else {
            return Vec::new();
        };
        if self.weight_at(i, j) == f64::INFINITY {
            return Vec::new();
        }

        let mut path = Vec::new();
        let mut current = Some(j);
        while let Some(at) = current {
            if path.len() > self.len() {
                break;
            }
            path.push(self.ids[at]);
            current = if at == i { None } else { self.predecessor_at(i, at) };
        }
        path.reverse();
        path
    }
}

impl<T: Identity> Graph<T> {
    /// Computes all-pairs shortest paths and keeps the matrices on the graph
    /// until the next mutation.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn floyd_warshall_shortest_path(&mut self) {
        let matrices = AllPairs::compute(self);
        debug!(size = matrices.len(), "all-pairs matrices rebuilt");
        self.all_pairs = Some(matrices);
    }

    /// The matrices of the last all-pairs run, if still valid
    pub fn all_pairs(&self) -> Option<&AllPairs> {
        self.all_pairs.as_ref()
    }

    /// Shortest distance from the last all-pairs run, +∞ if unknown
    pub fn floyd_warshall_weight(&self, origin: &T, dest: &T) -> f64 {
        match (
            self.all_pairs.as_ref(),
            self.find_vertex(origin),
            self.find_vertex(dest),
        ) {
            (Some(matrices), Some(o), Some(d)) => matrices.distance(o, d),
            _ => f64::INFINITY,
        }
    }

    /// Identities along the shortest path from the last all-pairs run
    pub fn get_floyd_warshall_path(&self, origin: &T, dest: &T) -> Vec<T> {
        match (
            self.all_pairs.as_ref(),
            self.find_vertex(origin),
            self.find_vertex(dest),
        ) {
            (Some(matrices), Some(o), Some(d)) => self.identities(&matrices.path(o, d)),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Graph<char> {
        let mut graph = Graph::new();
        for v in ['A', 'B', 'C', 'D'] {
            graph.add_vertex(v);
        }
        graph.add_edge(&'A', &'B', 1.0);
        graph.add_edge(&'B', &'C', 2.0);
        graph.add_edge(&'A', &'C', 5.0);
        graph.add_edge(&'A', &'D', 10.0);
        graph.add_edge(&'C', &'D', 1.0);
        graph
    }

    #[test]
    fn test_floyd_warshall_distances() {
        let mut graph = sample();
        graph.floyd_warshall_shortest_path();
        assert_eq!(graph.floyd_warshall_weight(&'A', &'D'), 4.0);
        assert_eq!(graph.floyd_warshall_weight(&'B', &'D'), 3.0);
        assert_eq!(graph.floyd_warshall_weight(&'D', &'A'), f64::INFINITY);
        assert_eq!(graph.floyd_warshall_weight(&'C', &'C'), 0.0);
    }

    #[test]
    fn test_floyd_warshall_path() {
        let mut graph = sample();
        graph.floyd_warshall_shortest_path();
        assert_eq!(
            graph.get_floyd_warshall_path(&'A', &'D'),
            vec!['A', 'B', 'C', 'D']
        );
        assert_eq!(graph.get_floyd_warshall_path(&'B', &'B'), vec!['B']);
        assert!(graph.get_floyd_warshall_path(&'D', &'A').is_empty());
        assert!(graph.get_floyd_warshall_path(&'A', &'Z').is_empty());
    }

    #[test]
    fn test_self_loop_does_not_change_diagonal() {
        let mut graph = sample();
        graph.add_edge(&'A', &'A', 3.0);
        graph.floyd_warshall_shortest_path();
        assert_eq!(graph.floyd_warshall_weight(&'A', &'A'), 0.0);
    }

    #[test]
    fn test_dense_indices_cover_every_vertex() {
        let mut graph = sample();
        graph.remove_vertex(&'B');
        let matrices = AllPairs::compute(&graph);
        assert_eq!(matrices.len(), 3);
        let mut seen: Vec<usize> = graph
            .vertex_set()
            .iter()
            .filter_map(|v| matrices.index_of(v.id()))
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2]);
        assert_eq!(matrices.weight_at(7, 0), f64::INFINITY);
    }

    #[test]
    fn test_mutation_drops_matrices() {
        let mut graph = sample();
        graph.floyd_warshall_shortest_path();
        assert!(graph.all_pairs().is_some());
        graph.remove_edge(&'C', &'D');
        assert!(graph.all_pairs().is_none());
        assert_eq!(graph.floyd_warshall_weight(&'A', &'D'), f64::INFINITY);
    }
}
