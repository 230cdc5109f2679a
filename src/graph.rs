//! The graph: vertex arena, identity map and CRUD operations
//!
//! # Design
//!
//! Vertices are stored in a [`SlotMap`] and addressed by [`VertexId`] handles;
//! a separate hash map (FxHash) resolves caller identities to handles. Edges
//! reference their endpoints by handle only, and carry no reverse index, so
//! removing a vertex sweeps every remaining vertex for edges that target it.
//!
//! The graph also caches the result of the last single-source run and the
//! last all-pairs computation. Any structural mutation drops both caches.
//!
//! # Example
//!
//! ```rust
//! use rust_graph_routes::Graph;
//!
//! let mut graph = Graph::new();
//! graph.add_vertex('A');
//! graph.add_vertex('B');
//! graph.add_edge(&'A', &'B', 2.5);
//!
//! assert_eq!(graph.get_weight(&'A', &'B'), 2.5);
//! assert_eq!(graph.get_weight(&'B', &'A'), f64::INFINITY);
//! assert_eq!(graph.get_weight(&'A', &'A'), 0.0);
//! ```

use crate::all_pairs::AllPairs;
use crate::edge::{Edge, EdgeId};
use crate::error::{GraphError, Result};
use crate::single_source::ShortestPathTree;
use crate::vertex::{Point, Vertex, VertexId};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::debug;

/// Bound collecting what a vertex identity must support
pub trait Identity: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Identity for T {}

/// An in-memory directed, weighted graph keyed by vertex identity `T`
#[derive(Debug, Clone)]
pub struct Graph<T: Identity> {
    pub(crate) vertices: SlotMap<VertexId, Vertex<T>>,
    index: FxHashMap<T, VertexId>,
    next_edge_id: u64,
    pub(crate) last_run: Option<ShortestPathTree>,
    pub(crate) all_pairs: Option<AllPairs>,
}

impl<T: Identity> Graph<T> {
    /// Creates an empty graph
    pub fn new() -> Self {
        Graph {
            vertices: SlotMap::with_key(),
            index: FxHashMap::default(),
            next_edge_id: 0,
            last_run: None,
            all_pairs: None,
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_edges(&self) -> usize {
        self.vertices.values().map(Vertex::out_degree).sum()
    }

    pub fn contains_vertex(&self, identity: &T) -> bool {
        self.index.contains_key(identity)
    }

    /// Resolves an identity to its arena handle
    pub fn find_vertex(&self, identity: &T) -> Option<VertexId> {
        self.index.get(identity).copied()
    }

    pub fn vertex(&self, identity: &T) -> Option<&Vertex<T>> {
        self.find_vertex(identity)
            .and_then(|id| self.vertices.get(id))
    }

    pub fn vertex_by_id(&self, id: VertexId) -> Option<&Vertex<T>> {
        self.vertices.get(id)
    }

    /// Identity of the vertex behind a handle
    pub fn identity(&self, id: VertexId) -> Option<&T> {
        self.vertices.get(id).map(Vertex::info)
    }

    /// All vertices, in arena order
    pub fn vertex_set(&self) -> Vec<&Vertex<T>> {
        self.vertices.values().collect()
    }

    pub(crate) fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys()
    }

    /// Adds an unpositioned vertex. Returns false if the identity is taken.
    pub fn add_vertex(&mut self, identity: T) -> bool {
        self.insert_vertex(identity, None)
    }

    /// Adds a vertex at `(x, y)`. Returns false if the identity is taken.
    pub fn add_vertex_at(&mut self, identity: T, x: f64, y: f64) -> bool {
        self.insert_vertex(identity, Some(Point::new(x, y)))
    }

    fn insert_vertex(&mut self, identity: T, position: Option<Point>) -> bool {
        if self.index.contains_key(&identity) {
            debug!(identity = ?identity, "vertex already present");
            return false;
        }
        let key = identity.clone();
        let id = self
            .vertices
            .insert_with_key(|id| Vertex::new(id, identity, position));
        self.index.insert(key, id);
        self.invalidate();
        true
    }

    /// Removes a vertex and every edge that ends at it or routes through it
    pub fn remove_vertex(&mut self, identity: &T) -> bool {
        let Some(id) = self.index.remove(identity) else {
            debug!(identity = ?identity, "cannot remove missing vertex");
            return false;
        };
        self.vertices.remove(id);

        let purged: usize = self
            .vertices
            .values_mut()
            .map(|vertex| vertex.retain_edges(|edge| !edge.touches(id)))
            .sum();
        debug!(identity = ?identity, purged, "vertex removed");

        self.invalidate();
        true
    }

    fn next_edge_id(&mut self) -> EdgeId {
        let id = EdgeId(self.next_edge_id);
        self.next_edge_id += 1;
        id
    }

    fn endpoints(&self, origin: &T, dest: &T) -> Option<(VertexId, VertexId)> {
        match (self.find_vertex(origin), self.find_vertex(dest)) {
            (Some(o), Some(d)) => Some((o, d)),
            _ => {
                debug!(origin = ?origin, dest = ?dest, "edge endpoint missing");
                None
            }
        }
    }

    fn insert_edge(&mut self, edge: Edge) {
        let origin = edge.origin();
        if let Some(vertex) = self.vertices.get_mut(origin) {
            if vertex.add_edge(edge) {
                self.invalidate();
            }
        }
    }

    /// Adds an edge with an explicit weight.
    ///
    /// Returns false if either endpoint is missing. An existing edge between
    /// the same pair is kept as is.
    pub fn add_edge(&mut self, origin: &T, dest: &T, weight: f64) -> bool {
        let Some((o, d)) = self.endpoints(origin, dest) else {
            return false;
        };
        let id = self.next_edge_id();
        self.insert_edge(Edge::new(id, o, d, weight));
        true
    }

    /// Adds an edge weighted by the Euclidean distance between the endpoints.
    ///
    /// Returns false if either endpoint is missing or has no position.
    pub fn add_euclidean_edge(&mut self, origin: &T, dest: &T) -> bool {
        let Some((o, d)) = self.endpoints(origin, dest) else {
            return false;
        };
        let (Some(from), Some(to)) = (self.vertices[o].position(), self.vertices[d].position())
        else {
            debug!(origin = ?origin, dest = ?dest, "euclidean edge needs positioned endpoints");
            return false;
        };
        let id = self.next_edge_id();
        self.insert_edge(Edge::new(id, o, d, from.distance_to(&to)));
        true
    }

    /// Adds an edge standing for the multi-hop route `path`.
    ///
    /// The weight is the sum of the edge weights between consecutive entries
    /// of `path`; a missing hop makes it +∞. Returns false if an endpoint or
    /// any vertex of `path` is missing.
    pub fn add_processed_edge(&mut self, origin: &T, dest: &T, path: &[T]) -> bool {
        let Some((o, d)) = self.endpoints(origin, dest) else {
            return false;
        };
        let Some(route) = path
            .iter()
            .map(|hop| self.find_vertex(hop))
            .collect::<Option<Vec<_>>>()
        else {
            debug!(origin = ?origin, dest = ?dest, "processed route names a missing vertex");
            return false;
        };

        let weight = route
            .windows(2)
            .map(|hop| self.vertices[hop[0]].edge_weight(hop[1]))
            .fold(0.0, |total, w| total + w);
        let id = self.next_edge_id();
        self.insert_edge(Edge::processed(id, o, d, weight, route));
        true
    }

    /// Removes the edge `origin → dest`. Returns false if it did not exist.
    pub fn remove_edge(&mut self, origin: &T, dest: &T) -> bool {
        let Some((o, d)) = self.endpoints(origin, dest) else {
            return false;
        };
        let removed = self.vertices[o].remove_edge(d);
        if removed {
            self.invalidate();
        }
        removed
    }

    /// Weight of the edge `origin → dest`.
    ///
    /// 0 when both name the same vertex; +∞ when either vertex is missing or
    /// there is no edge. Use [`Graph::try_weight`] to tell those apart.
    pub fn get_weight(&self, origin: &T, dest: &T) -> f64 {
        self.try_weight(origin, dest).unwrap_or(f64::INFINITY)
    }

    /// Like [`Graph::get_weight`], but reports why there is no weight
    pub fn try_weight(&self, origin: &T, dest: &T) -> Result<f64> {
        let o = self
            .find_vertex(origin)
            .ok_or_else(|| GraphError::not_found(origin))?;
        let d = self
            .find_vertex(dest)
            .ok_or_else(|| GraphError::not_found(dest))?;
        if o == d {
            return Ok(0.0);
        }
        self.vertices[o]
            .edge(d)
            .map(Edge::weight)
            .ok_or_else(|| GraphError::NoEdge {
                origin: format!("{origin:?}"),
                dest: format!("{dest:?}"),
            })
    }

    /// Snapshot of the outgoing edges of `identity`, empty if missing
    pub fn edges_from(&self, identity: &T) -> Vec<Edge> {
        self.vertex(identity).map(Vertex::edges).unwrap_or_default()
    }

    /// Route recorded on the edge `origin → dest`, empty if none
    pub fn get_processed_edge(&self, origin: &T, dest: &T) -> Vec<T> {
        let Some((o, d)) = self.endpoints(origin, dest) else {
            return Vec::new();
        };
        self.vertices[o]
            .processed_edge(d)
            .iter()
            .filter_map(|&hop| self.identity(hop).cloned())
            .collect()
    }

    /// Maps a run's handle sequence back to identities
    pub(crate) fn identities(&self, ids: &[VertexId]) -> Vec<T> {
        ids.iter()
            .filter_map(|&id| self.identity(id).cloned())
            .collect()
    }

    fn invalidate(&mut self) {
        self.last_run = None;
        self.all_pairs = None;
    }
}

impl<T: Identity> Default for Graph<T> {
    fn default() -> Self {
        Self::new()
    }
}
