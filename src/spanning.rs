//! Minimum spanning trees: Prim and Kruskal
//!
//! Prim grows a tree from one root along outgoing edges, keyed by the weight
//! of the cheapest edge connecting each vertex to the tree, and uses the same
//! decrease-key discipline as Dijkstra. Kruskal treats every edge as
//! undirected, sorts them by weight and joins components with a
//! [`DisjointSet`], yielding a spanning forest on disconnected graphs.
//!
//! Edges with a non-finite weight (processed edges with a missing hop) never
//! join a tree.
//!
//! # Example
//!
//! ```rust
//! use rust_graph_routes::Graph;
//! use rust_graph_routes::spanning::total_weight;
//!
//! let mut graph = Graph::new();
//! for v in 1..=3 {
//!     graph.add_vertex(v);
//! }
//! graph.add_edge(&1, &2, 4.0);
//! graph.add_edge(&2, &3, 1.0);
//! graph.add_edge(&1, &3, 2.0);
//!
//! let tree = graph.calculate_kruskal();
//! assert_eq!(tree.len(), 2);
//! assert_eq!(total_weight(&tree), 3.0);
//! ```

use crate::graph::{Graph, Identity};
use crate::indexed_binary::IndexedBinaryHeap;
use crate::single_source::{Distance, Scratch};
use crate::traits::{DecreaseKeyHeap, Heap};
use crate::vertex::VertexId;
use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;
use slotmap::SecondaryMap;
use tracing::debug;

/// One edge of a spanning tree: `origin` is the parent side
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningEdge<T> {
    pub origin: T,
    pub dest: T,
    pub weight: f64,
}

/// Sum of the edge weights of a tree or forest
pub fn total_weight<T>(edges: &[SpanningEdge<T>]) -> f64 {
    edges.iter().fold(0.0, |total, edge| total + edge.weight)
}

/// Union-find over dense indices, with path halving and union by rank
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    /// `n` singleton sets `0..n`
    pub fn new(n: usize) -> Self {
        DisjointSet {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// Representative of the set containing `x`
    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merges the sets of `a` and `b`. Returns false if they were already one set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }
}

/// Prim's algorithm from `root` using heap `H`.
///
/// Returns `(parent, child, weight)` triples in the order the children were
/// extracted, covering the part of the graph reachable from `root`.
pub fn prim<T, H>(graph: &Graph<T>, root: VertexId) -> Vec<(VertexId, VertexId, f64)>
where
    T: Identity,
    H: DecreaseKeyHeap<VertexId, Distance>,
{
    let mut keys: SecondaryMap<VertexId, Scratch> = SecondaryMap::new();
    for id in graph.vertex_ids() {
        keys.insert(id, Scratch::default());
    }
    let Some(entry) = keys.get_mut(root) else {
        return Vec::new();
    };
    entry.distance = 0.0;

    let mut heap = H::new();
    let mut handles: SecondaryMap<VertexId, H::Handle> = SecondaryMap::new();
    handles.insert(root, heap.push_with_handle(OrderedFloat(0.0), root));

    let mut tree = Vec::new();
    while let Some((_, v)) = heap.pop() {
        handles.remove(v);
        let Some(entry) = keys.get_mut(v) else {
            continue;
        };
        entry.visited = true;
        if let Some(parent) = entry.predecessor {
            tree.push((parent, v, entry.distance));
        }

        let Some(vertex) = graph.vertex_by_id(v) else {
            continue;
        };
        for edge in vertex.out_edges() {
            let w = edge.dest();
            let Some(key) = keys.get_mut(w) else {
                continue;
            };
            if key.visited || edge.weight() >= key.distance {
                continue;
            }
            key.distance = edge.weight();
            key.predecessor = Some(v);

            let priority = OrderedFloat(key.distance);
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

/// Kruskal's algorithm over every edge of the graph, treated as undirected
pub fn kruskal<T: Identity>(graph: &Graph<T>) -> Vec<(VertexId, VertexId, f64)> {
    let ids: Vec<VertexId> = graph.vertex_ids().collect();
    let index: FxHashMap<VertexId, usize> =
        ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();

    let mut edges: Vec<(usize, usize, f64)> = graph
        .vertex_set()
        .into_iter()
        .flat_map(|vertex| vertex.out_edges())
        .filter(|edge| edge.weight().is_finite())
        .filter_map(|edge| {
            let i = *index.get(&edge.origin())?;
            let j = *index.get(&edge.dest())?;
            Some((i, j, edge.weight()))
        })
        .collect();
    edges.sort_by(|a, b| a.2.total_cmp(&b.2));

    let target = ids.len().saturating_sub(1);
    let mut sets = DisjointSet::new(ids.len());
    let mut tree = Vec::with_capacity(target);
    for (i, j, weight) in edges {
        if tree.len() == target {
            break;
        }
        if sets.union(i, j) {
            tree.push((ids[i], ids[j], weight));
        }
    }

    tree
}

impl<T: Identity> Graph<T> {
    fn to_spanning_edges(&self, tree: Vec<(VertexId, VertexId, f64)>) -> Vec<SpanningEdge<T>> {
        tree.into_iter()
            .filter_map(|(origin, dest, weight)| {
                Some(SpanningEdge {
                    origin: self.identity(origin)?.clone(),
                    dest: self.identity(dest)?.clone(),
                    weight,
                })
            })
            .collect()
    }

    /// Prim's minimum spanning tree from an arbitrary root (the first vertex
    /// in arena order). Empty for an empty graph.
    pub fn calculate_prim(&self) -> Vec<SpanningEdge<T>> {
        match self.vertex_ids().next() {
            Some(root) => self.prim_from_id(root),
            None => Vec::new(),
        }
    }

    /// Prim's minimum spanning tree of the component reachable from `root`.
    /// Empty if `root` is missing.
    pub fn calculate_prim_from(&self, root: &T) -> Vec<SpanningEdge<T>> {
        match self.find_vertex(root) {
            Some(root) => self.prim_from_id(root),
            None => {
                debug!(root = ?root, "prim root missing");
                Vec::new()
            }
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn prim_from_id(&self, root: VertexId) -> Vec<SpanningEdge<T>> {
        let tree = prim::<T, IndexedBinaryHeap<VertexId, Distance>>(self, root);
        debug!(edges = tree.len(), "prim tree built");
        self.to_spanning_edges(tree)
    }

    /// Kruskal's minimum spanning forest
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn calculate_kruskal(&self) -> Vec<SpanningEdge<T>> {
        let tree = kruskal(self);
        debug!(edges = tree.len(), vertices = self.num_vertices(), "kruskal forest built");
        self.to_spanning_edges(tree)
    }
}
