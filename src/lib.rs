//! In-memory directed graphs with shortest-path and spanning-tree algorithms
//!
//! This crate provides a generic directed, weighted graph keyed by caller
//! identities, together with the classic algorithms that run on it. The
//! weighted searches are driven by a priority queue with efficient
//! `decrease_key` support.
//!
//! # Features
//!
//! - **Graph CRUD**: vertices with optional positions, explicit, Euclidean and
//!   processed (multi-hop) edges, removal that never leaves dangling edges
//! - **Dijkstra**: O((V + E) log V) with any [`DecreaseKeyHeap`]
//! - **Unweighted BFS**: shortest paths counting hops
//! - **Bellman-Ford**: negative weights, with negative-cycle detection
//! - **Floyd–Warshall**: dense all-pairs distance and predecessor matrices
//! - **Prim / Kruskal**: minimum spanning trees and forests
//!
//! # Example
//!
//! ```rust
//! use rust_graph_routes::Graph;
//!
//! let mut graph = Graph::new();
//! graph.add_vertex("depot");
//! graph.add_vertex("north");
//! graph.add_vertex("south");
//! graph.add_edge(&"depot", &"north", 3.0);
//! graph.add_edge(&"north", &"south", 1.0);
//! graph.add_edge(&"depot", &"south", 5.0);
//!
//! graph.dijkstra_shortest_path(&"depot").unwrap();
//! assert_eq!(graph.get_path(&"depot", &"south"), vec!["depot", "north", "south"]);
//! assert_eq!(graph.distance(&"south"), 4.0);
//! ```

pub mod all_pairs;
pub mod edge;
pub mod error;
pub mod graph;
pub mod indexed_binary;
pub mod single_source;
pub mod spanning;
pub mod traits;
pub mod vertex;

// Re-export the main types for convenience
pub use all_pairs::AllPairs;
pub use edge::{Edge, EdgeId};
pub use error::{GraphError, Result};
pub use graph::{Graph, Identity};
pub use indexed_binary::IndexedBinaryHeap;
pub use single_source::{Distance, Scratch, ShortestPathTree};
pub use spanning::{DisjointSet, SpanningEdge};
pub use traits::{DecreaseKeyHeap, Handle, Heap, HeapError};
pub use vertex::{Point, Vertex, VertexId};
