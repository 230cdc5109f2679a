//! Directed, weighted edges

use crate::vertex::VertexId;
use std::fmt;

/// Diagnostic edge identifier, unique and increasing within one graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub(crate) u64);

impl EdgeId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// An outgoing edge of a vertex
///
/// Identity is the `(origin, dest)` pair; the weight is payload. A processed
/// edge additionally records the multi-hop route it stands for, and its weight
/// is the sum of the hop weights along that route.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    id: EdgeId,
    origin: VertexId,
    dest: VertexId,
    weight: f64,
    processed_path: Vec<VertexId>,
}

impl Edge {
    pub(crate) fn new(id: EdgeId, origin: VertexId, dest: VertexId, weight: f64) -> Self {
        Edge {
            id,
            origin,
            dest,
            weight,
            processed_path: Vec::new(),
        }
    }

    pub(crate) fn processed(
        id: EdgeId,
        origin: VertexId,
        dest: VertexId,
        weight: f64,
        path: Vec<VertexId>,
    ) -> Self {
        Edge {
            id,
            origin,
            dest,
            weight,
            processed_path: path,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn origin(&self) -> VertexId {
        self.origin
    }

    pub fn dest(&self) -> VertexId {
        self.dest
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Intermediate route collapsed into this edge, empty for plain edges
    pub fn processed_path(&self) -> &[VertexId] {
        &self.processed_path
    }

    pub fn is_processed(&self) -> bool {
        !self.processed_path.is_empty()
    }

    /// True if the edge ends at `vertex` or its recorded route passes through it
    pub(crate) fn touches(&self, vertex: VertexId) -> bool {
        self.dest == vertex || self.processed_path.contains(&vertex)
    }
}
