//! Single-source shortest paths: Dijkstra, unit-weight BFS and Bellman-Ford
//!
//! # Design
//!
//! Each run owns its scratch state: a [`ShortestPathTree`] maps every vertex
//! handle to its best-known distance, predecessor and visited flag. Nothing is
//! written into the graph itself, so runs never observe each other.
//!
//! Dijkstra is generic over any [`DecreaseKeyHeap`]. Heap handles are kept in
//! a side table for the vertices currently queued, so a relaxed vertex is
//! either pushed (first time reached) or moved up with `decrease_key`.
//!
//! The free functions here work on handles and leave the graph untouched.
//! The `Graph` methods resolve identities, run them, and cache the resulting
//! tree for [`Graph::get_path`].
//!
//! # Example
//!
//! ```rust
//! use rust_graph_routes::Graph;
//!
//! let mut graph = Graph::new();
//! for v in ['A', 'B', 'C', 'D'] {
//!     graph.add_vertex(v);
//! }
//! graph.add_edge(&'A', &'B', 1.0);
//! graph.add_edge(&'B', &'C', 2.0);
//! graph.add_edge(&'A', &'C', 5.0);
//! graph.add_edge(&'A', &'D', 10.0);
//! graph.add_edge(&'C', &'D', 1.0);
//!
//! graph.dijkstra_shortest_path(&'A').unwrap();
//! assert_eq!(graph.get_path(&'A', &'D'), vec!['A', 'B', 'C', 'D']);
//! assert_eq!(graph.distance(&'D'), 4.0);
//! ```

use crate::error::{GraphError, Result};
use crate::graph::{Graph, Identity};
use crate::indexed_binary::IndexedBinaryHeap;
use crate::traits::{DecreaseKeyHeap, Heap};
use crate::vertex::{Vertex, VertexId};
use ordered_float::OrderedFloat;
use slotmap::SecondaryMap;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Priority type used by the weighted searches
pub type Distance = OrderedFloat<f64>;

/// Per-vertex state of one algorithm run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scratch {
    /// Best known distance from the root, +∞ if unreached
    pub distance: f64,
    /// Previous vertex on the best known path
    pub predecessor: Option<VertexId>,
    /// Whether the vertex has been extracted from the queue
    pub visited: bool,
}

impl Default for Scratch {
    fn default() -> Self {
        Scratch {
            distance: f64::INFINITY,
            predecessor: None,
            visited: false,
        }
    }
}

/// Result of a single-source run: a predecessor tree rooted at `root`
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    root: VertexId,
    scratch: SecondaryMap<VertexId, Scratch>,
    negative_cycle: bool,
}

impl ShortestPathTree {
    /// Resets every vertex to unreached and puts the root at distance 0
    fn init_single_source<T: Identity>(graph: &Graph<T>, root: VertexId) -> Self {
        let mut scratch = SecondaryMap::with_capacity(graph.num_vertices());
        for id in graph.vertex_ids() {
            scratch.insert(id, Scratch::default());
        }
        if let Some(entry) = scratch.get_mut(root) {
            entry.distance = 0.0;
        }
        ShortestPathTree {
            root,
            scratch,
            negative_cycle: false,
        }
    }

    /// Updates `w` if going through `v` with `weight` is shorter.
    /// Returns true if `w` was relaxed.
    fn relax(&mut self, v: VertexId, w: VertexId, weight: f64) -> bool {
        let candidate = self.distance(v) + weight;
        match self.scratch.get_mut(w) {
            Some(entry) if candidate < entry.distance => {
                entry.distance = candidate;
                entry.predecessor = Some(v);
                true
            }
            _ => false,
        }
    }

    pub fn root(&self) -> VertexId {
        self.root
    }

    /// Distance from the root, +∞ if unreached or unknown
    pub fn distance(&self, id: VertexId) -> f64 {
        self.scratch.get(id).map_or(f64::INFINITY, |s| s.distance)
    }

    pub fn predecessor(&self, id: VertexId) -> Option<VertexId> {
        self.scratch.get(id).and_then(|s| s.predecessor)
    }

    pub fn is_visited(&self, id: VertexId) -> bool {
        self.scratch.get(id).is_some_and(|s| s.visited)
    }

    pub fn is_reachable(&self, id: VertexId) -> bool {
        self.distance(id) < f64::INFINITY
    }

    pub fn scratch(&self, id: VertexId) -> Option<&Scratch> {
        self.scratch.get(id)
    }

    /// True if Bellman-Ford found a negative cycle during this run
    pub fn has_negative_cycle(&self) -> bool {
        self.negative_cycle
    }

    /// Walks predecessors back from `dest` to the root.
    ///
    /// Empty if `dest` is unknown or unreached. The walk is bounded by the
    /// vertex count so a corrupted tree (negative cycle) cannot loop.
    pub fn path_to(&self, dest: VertexId) -> Vec<VertexId> {
        if !self.is_reachable(dest) {
            return Vec::new();
        }
        let mut path = Vec::new();
        let mut current = Some(dest);
        while let Some(id) = current {
            if path.len() > self.scratch.len() {
                break;
            }
            path.push(id);
            current = self.predecessor(id);
        }
        path.reverse();
        path
    }
}

fn out_edges<T: Identity>(
    graph: &Graph<T>,
    id: VertexId,
) -> impl Iterator<Item = (VertexId, f64)> + '_ {
    graph
        .vertex_by_id(id)
        .into_iter()
        .flat_map(|vertex| vertex.out_edges())
        .map(|edge| (edge.dest(), edge.weight()))
}

/// Runs Dijkstra's algorithm from `origin` using heap `H`.
///
/// Requires non-negative weights. Every vertex reachable from `origin` ends
/// up with its shortest distance and a predecessor on a shortest path.
///
/// Each vertex is extracted at most once, so the run terminates on any
/// graph. With negative weights the distances may not be shortest.
pub fn dijkstra<T, H>(graph: &Graph<T>, origin: VertexId) -> ShortestPathTree
where
    T: Identity,
    H: DecreaseKeyHeap<VertexId, Distance>,
{
    let mut tree = ShortestPathTree::init_single_source(graph, origin);
    if !graph.vertices.contains_key(origin) {
        return tree;
    }

    let mut heap = H::new();
    let mut handles: SecondaryMap<VertexId, H::Handle> = SecondaryMap::new();
    handles.insert(origin, heap.push_with_handle(OrderedFloat(0.0), origin));

    while let Some((_, v)) = heap.pop() {
        handles.remove(v);
        if let Some(entry) = tree.scratch.get_mut(v) {
            entry.visited = true;
        }

        for (w, weight) in out_edges(graph, v) {
            // Extracted vertices are final; each vertex leaves the queue once
            if tree.is_visited(w) || !tree.relax(v, w, weight) {
                continue;
            }
            let priority = OrderedFloat(tree.distance(w));
            match handles.get(w) {
                Some(handle) => {
                    let _ = heap.decrease_key(handle, priority);
                }
                None => {
                    handles.insert(w, heap.push_with_handle(priority, w));
                }
            }
        }
    }

    tree
}

/// Breadth-first search with every edge counted as length 1
pub fn unweighted<T: Identity>(graph: &Graph<T>, origin: VertexId) -> ShortestPathTree {
    let mut tree = ShortestPathTree::init_single_source(graph, origin);
    if !graph.vertices.contains_key(origin) {
        return tree;
    }

    let mut queue = VecDeque::from([origin]);
    while let Some(v) = queue.pop_front() {
        if let Some(entry) = tree.scratch.get_mut(v) {
            entry.visited = true;
        }
        for (w, _) in out_edges(graph, v) {
            if tree.relax(v, w, 1.0) {
                queue.push_back(w);
            }
        }
    }

    tree
}

/// Bellman-Ford: |V| - 1 relaxation passes over every edge, then one
/// detection pass. A negative cycle is flagged on the returned tree, whose
/// distances are then unreliable.
pub fn bellman_ford<T: Identity>(graph: &Graph<T>, origin: VertexId) -> ShortestPathTree {
    let mut tree = ShortestPathTree::init_single_source(graph, origin);
    if !graph.vertices.contains_key(origin) {
        return tree;
    }

    let edges: Vec<(VertexId, VertexId, f64)> = graph
        .vertex_ids()
        .flat_map(|v| out_edges(graph, v).map(move |(w, weight)| (v, w, weight)))
        .collect();

    for _ in 1..graph.num_vertices() {
        let mut changed = false;
        for &(v, w, weight) in &edges {
            if tree.is_reachable(v) {
                changed |= tree.relax(v, w, weight);
            }
        }
        if !changed {
            break;
        }
    }

    let still_relaxable = edges
        .iter()
        .any(|&(v, w, weight)| tree.is_reachable(v) && tree.distance(v) + weight < tree.distance(w));
    tree.negative_cycle = still_relaxable;
    tree
}

impl<T: Identity> Graph<T> {
    fn resolve_origin(&self, origin: &T) -> Result<VertexId> {
        self.find_vertex(origin)
            .ok_or_else(|| GraphError::not_found(origin))
    }

    fn store_run(&mut self, tree: ShortestPathTree) {
        debug!(
            reached = tree.scratch.values().filter(|s| s.distance < f64::INFINITY).count(),
            vertices = self.num_vertices(),
            "single-source run complete"
        );
        self.last_run = Some(tree);
    }

    /// Dijkstra from `origin` with the default [`IndexedBinaryHeap`]
    pub fn dijkstra_shortest_path(&mut self, origin: &T) -> Result<()> {
        self.dijkstra_shortest_path_with::<IndexedBinaryHeap<VertexId, Distance>>(origin)
    }

    /// Dijkstra from `origin` with a caller-chosen heap
    #[tracing::instrument(level = "debug", skip_all, fields(origin = ?origin))]
    pub fn dijkstra_shortest_path_with<H>(&mut self, origin: &T) -> Result<()>
    where
        H: DecreaseKeyHeap<VertexId, Distance>,
    {
        let root = self.resolve_origin(origin)?;
        let tree = dijkstra::<T, H>(self, root);
        self.store_run(tree);
        Ok(())
    }

    /// Unit-weight breadth-first shortest paths from `origin`
    #[tracing::instrument(level = "debug", skip_all, fields(origin = ?origin))]
    pub fn unweighted_shortest_path(&mut self, origin: &T) -> Result<()> {
        let root = self.resolve_origin(origin)?;
        let tree = unweighted(self, root);
        self.store_run(tree);
        Ok(())
    }

    /// Bellman-Ford from `origin`.
    ///
    /// # Errors
    /// `VertexNotFound` if `origin` is missing. `NegativeCycle` if a negative
    /// cycle is reachable; the run is still stored, but its distances and
    /// paths must not be trusted.
    #[tracing::instrument(level = "debug", skip_all, fields(origin = ?origin))]
    pub fn bellman_ford_shortest_path(&mut self, origin: &T) -> Result<()> {
        let root = self.resolve_origin(origin)?;
        let tree = bellman_ford(self, root);
        let negative_cycle = tree.has_negative_cycle();
        self.store_run(tree);
        if negative_cycle {
            warn!(origin = ?origin, "negative-weight cycle detected");
            return Err(GraphError::NegativeCycle);
        }
        Ok(())
    }

    /// The tree of the last single-source run, if still valid
    pub fn last_run(&self) -> Option<&ShortestPathTree> {
        self.last_run.as_ref()
    }

    /// Tree of the last run, provided it was rooted at `origin`
    fn run_from(&self, origin: &T) -> Option<&ShortestPathTree> {
        let root = self.find_vertex(origin)?;
        self.last_run.as_ref().filter(|tree| tree.root() == root)
    }

    /// Distance of `dest` in the last single-source run, +∞ if unknown
    pub fn distance(&self, dest: &T) -> f64 {
        match (self.last_run.as_ref(), self.find_vertex(dest)) {
            (Some(tree), Some(id)) => tree.distance(id),
            _ => f64::INFINITY,
        }
    }

    /// Identities along the shortest path from `origin` to `dest`.
    ///
    /// Reads the last single-source run. `origin` is checked against that
    /// run's root: if the last run started anywhere else, or there is no
    /// cached run, the path is empty rather than a path from another root.
    /// The path is also empty if `dest` is missing or unreached. Nothing is
    /// recomputed.
    pub fn get_path(&self, origin: &T, dest: &T) -> Vec<T> {
        self.path_ids(origin, dest)
            .map(|ids| self.identities(&ids))
            .unwrap_or_default()
    }

    /// Like [`Graph::get_path`], returning the vertices themselves. Empty
    /// unless the last run was rooted at `origin`.
    pub fn get_path_v(&self, origin: &T, dest: &T) -> Vec<&Vertex<T>> {
        self.path_ids(origin, dest)
            .map(|ids| ids.into_iter().filter_map(|id| self.vertex_by_id(id)).collect())
            .unwrap_or_default()
    }

    fn path_ids(&self, origin: &T, dest: &T) -> Option<Vec<VertexId>> {
        let tree = self.run_from(origin)?;
        let dest = self.find_vertex(dest)?;
        Some(tree.path_to(dest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Graph<u32> {
        let mut graph = Graph::new();
        for v in 0..4 {
            graph.add_vertex(v);
        }
        graph.add_edge(&0, &1, 10.0);
        graph.add_edge(&0, &2, 1.0);
        graph.add_edge(&2, &1, 5.0);
        graph.add_edge(&1, &3, 1.0);
        graph
    }

    #[test]
    fn test_decrease_key_finds_optimal() {
        let mut graph = chain();
        graph.dijkstra_shortest_path(&0).unwrap();
        // 0 -> 2 -> 1 -> 3 with cost 7, not 0 -> 1 -> 3 with cost 11
        assert_eq!(graph.get_path(&0, &3), vec![0, 2, 1, 3]);
        assert_eq!(graph.distance(&3), 7.0);
    }

    #[test]
    fn test_missing_origin_is_an_error() {
        let mut graph = chain();
        assert_eq!(
            graph.dijkstra_shortest_path(&42),
            Err(GraphError::VertexNotFound("42".to_string()))
        );
        assert!(graph.last_run().is_none());
    }

    #[test]
    fn test_origin_path_is_just_origin() {
        let mut graph = chain();
        graph.unweighted_shortest_path(&0).unwrap();
        assert_eq!(graph.get_path(&0, &0), vec![0]);
        assert_eq!(graph.distance(&0), 0.0);
    }

    #[test]
    fn test_path_requires_matching_root() {
        let mut graph = chain();
        graph.dijkstra_shortest_path(&2).unwrap();
        assert!(graph.get_path(&0, &3).is_empty());
        assert_eq!(graph.get_path(&2, &3), vec![2, 1, 3]);
    }

    #[test]
    fn test_unreached_vertex_has_empty_path() {
        let mut graph = chain();
        graph.dijkstra_shortest_path(&3).unwrap();
        assert!(graph.get_path(&3, &0).is_empty());
        assert_eq!(graph.distance(&0), f64::INFINITY);
    }

    #[test]
    fn test_mutation_drops_cached_run() {
        let mut graph = chain();
        graph.dijkstra_shortest_path(&0).unwrap();
        graph.add_vertex(9);
        assert!(graph.last_run().is_none());
        assert!(graph.get_path(&0, &3).is_empty());
    }

    #[test]
    fn test_visited_marks_extracted_vertices() {
        let graph = chain();
        let root = graph.find_vertex(&1).unwrap();
        let tree = dijkstra::<_, IndexedBinaryHeap<_, _>>(&graph, root);
        assert!(tree.is_visited(root));
        assert!(tree.is_visited(graph.find_vertex(&3).unwrap()));
        assert!(!tree.is_visited(graph.find_vertex(&0).unwrap()));
    }

    #[test]
    fn test_dijkstra_terminates_on_negative_cycle() {
        let mut graph = Graph::new();
        graph.add_vertex(0);
        graph.add_vertex(1);
        graph.add_edge(&0, &1, 1.0);
        graph.add_edge(&1, &0, -2.0);

        graph.dijkstra_shortest_path(&0).unwrap();
        assert_eq!(graph.distance(&0), 0.0);
        assert_eq!(graph.distance(&1), 1.0);
        assert_eq!(graph.get_path(&0, &1), vec![0, 1]);
    }

    #[test]
    fn test_dijkstra_extracts_each_vertex_once() {
        // 1 -> 2 -> 1 weighs -4 and sits behind the origin
        let mut graph = Graph::new();
        for v in 0..3 {
            graph.add_vertex(v);
        }
        graph.add_edge(&0, &1, 1.0);
        graph.add_edge(&1, &2, 1.0);
        graph.add_edge(&2, &1, -5.0);

        let root = graph.find_vertex(&0).unwrap();
        let tree = dijkstra::<_, IndexedBinaryHeap<_, _>>(&graph, root);
        assert_eq!(tree.distance(graph.find_vertex(&1).unwrap()), 1.0);
        assert_eq!(tree.distance(graph.find_vertex(&2).unwrap()), 2.0);
        assert!(graph.vertex_ids().all(|id| tree.is_visited(id)));
    }

    #[test]
    fn test_get_path_v_requires_matching_root() {
        let mut graph = chain();
        graph.dijkstra_shortest_path(&2).unwrap();
        assert!(graph.get_path_v(&0, &3).is_empty());
        assert_eq!(graph.get_path_v(&2, &3).len(), 3);
    }

    #[test]
    fn test_bellman_ford_negative_edge() {
        let mut graph = chain();
        graph.add_edge(&2, &3, -4.0);
        graph.bellman_ford_shortest_path(&0).unwrap();
        assert_eq!(graph.distance(&3), -3.0);
        assert_eq!(graph.get_path(&0, &3), vec![0, 2, 3]);
    }

    #[test]
    fn test_bellman_ford_reports_negative_cycle() {
        let mut graph = chain();
        graph.add_edge(&3, &2, -10.0);
        assert_eq!(
            graph.bellman_ford_shortest_path(&0),
            Err(GraphError::NegativeCycle)
        );
        assert!(graph.last_run().is_some_and(ShortestPathTree::has_negative_cycle));
    }
}
