//! Vertices and their outgoing edge sets
//!
//! Vertices live in the graph's arena and are addressed by [`VertexId`]
//! handles. Each vertex owns its outgoing edges in a map keyed by
//! destination, so there is at most one edge per ordered pair.

use crate::edge::Edge;
use rustc_hash::FxHashMap;
use slotmap::new_key_type;

new_key_type! {
    /// Stable arena handle of a vertex within one graph
    pub struct VertexId;
}

/// A 2-D position
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance between two points
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A graph vertex: identity, optional position and outgoing edges
#[derive(Debug, Clone)]
pub struct Vertex<T> {
    id: VertexId,
    info: T,
    position: Option<Point>,
    edges: FxHashMap<VertexId, Edge>,
}

impl<T> Vertex<T> {
    pub(crate) fn new(id: VertexId, info: T, position: Option<Point>) -> Self {
        Vertex {
            id,
            info,
            position,
            edges: FxHashMap::default(),
        }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }

    pub fn info(&self) -> &T {
        &self.info
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn has_position(&self) -> bool {
        self.position.is_some()
    }

    /// X coordinate, 0 when unpositioned
    pub fn x(&self) -> f64 {
        self.position.map_or(0.0, |p| p.x)
    }

    /// Y coordinate, 0 when unpositioned
    pub fn y(&self) -> f64 {
        self.position.map_or(0.0, |p| p.y)
    }

    /// Inserts an outgoing edge.
    ///
    /// Returns false and leaves the existing edge untouched if this vertex
    /// already has an edge to the same destination.
    pub(crate) fn add_edge(&mut self, edge: Edge) -> bool {
        debug_assert_eq!(edge.origin(), self.id);
        match self.edges.entry(edge.dest()) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(edge);
                true
            }
        }
    }

    pub(crate) fn remove_edge(&mut self, dest: VertexId) -> bool {
        self.edges.remove(&dest).is_some()
    }

    /// Drops every edge for which `keep` returns false, returning how many were dropped
    pub(crate) fn retain_edges(&mut self, mut keep: impl FnMut(&Edge) -> bool) -> usize {
        let before = self.edges.len();
        self.edges.retain(|_, edge| keep(edge));
        before - self.edges.len()
    }

    /// Weight of the edge to `dest`: 0 for itself, +∞ if there is no edge
    pub fn edge_weight(&self, dest: VertexId) -> f64 {
        if dest == self.id {
            return 0.0;
        }
        self.edges.get(&dest).map_or(f64::INFINITY, Edge::weight)
    }

    pub fn edge(&self, dest: VertexId) -> Option<&Edge> {
        self.edges.get(&dest)
    }

    /// Snapshot of the outgoing edges, in no particular order
    pub fn edges(&self) -> Vec<Edge> {
        self.edges.values().cloned().collect()
    }

    pub(crate) fn out_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn out_degree(&self) -> usize {
        self.edges.len()
    }

    /// Route recorded on the edge to `dest`, empty if none
    pub fn processed_edge(&self, dest: VertexId) -> &[VertexId] {
        self.edges
            .get(&dest)
            .map(Edge::processed_path)
            .unwrap_or(&[])
    }
}
