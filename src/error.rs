//! Error types for graph operations
//!
//! CRUD operations report failure through sentinels (`false`, `f64::INFINITY`,
//! empty vectors). The algorithm entry points and the disambiguating accessors
//! return [`GraphError`] instead.

use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("vertex not found: {0}")]
    VertexNotFound(String),

    #[error("no edge from {origin} to {dest}")]
    NoEdge { origin: String, dest: String },

    /// Bellman-Ford found an edge that was still relaxable after |V| - 1 passes.
    /// Distances and paths of that run are not meaningful.
    #[error("negative-weight cycle reachable from the source")]
    NegativeCycle,
}

impl GraphError {
    pub(crate) fn not_found<T: std::fmt::Debug>(identity: &T) -> Self {
        GraphError::VertexNotFound(format!("{identity:?}"))
    }
}

/// Result type alias for graph operations
pub type Result<T> = std::result::Result<T, GraphError>;
