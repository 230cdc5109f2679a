//! Common traits for the priority queues driving the graph algorithms
//!
//! This module provides a two-tier trait hierarchy:
//!
//! - [`Heap`]: Base trait for min-heaps storing `(priority, item)` pairs
//! - [`DecreaseKeyHeap`]: Extended trait adding `decrease_key` and handle-based operations
//!
//! Dijkstra's algorithm and Prim's algorithm are written against
//! [`DecreaseKeyHeap`], so any heap implementing it can be plugged in.

use thiserror::Error;

/// Error type for heap operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The new priority is not less than the current priority
    #[error("new priority is not less than current priority")]
    PriorityNotDecreased,
    /// The handle is no longer valid (element was removed)
    #[error("handle is no longer valid (element was removed)")]
    InvalidHandle,
}

/// A handle to an element in the heap, used for decrease_key operations
///
/// Item-keyed heaps such as [`IndexedBinaryHeap`](crate::indexed_binary::IndexedBinaryHeap)
/// use the item itself as its handle, so any cloneable, comparable type qualifies.
pub trait Handle: Clone + Eq {}

impl<T: Clone + Eq> Handle for T {}

/// Base trait for heap/priority queue data structures
///
/// Unlike `BinaryHeap` which stores values directly (using `Ord`), these heaps
/// store (priority, item) pairs to separate the ordering key from the data.
/// They are min-heaps: `pop` returns the smallest priority first.
///
/// # Example
///
/// ```rust
/// use rust_graph_routes::Heap;
/// use rust_graph_routes::indexed_binary::IndexedBinaryHeap;
///
/// let mut heap = IndexedBinaryHeap::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<T, P: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    fn push(&mut self, priority: P, item: T);

    /// Returns the minimum priority and associated item without removing it
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the minimum priority and associated item
    fn pop(&mut self) -> Option<(P, T)>;

    /// Merges another heap into this one, consuming the other heap
    fn merge(&mut self, other: Self);
}

/// Extended heap trait with `decrease_key` support
///
/// - `push_with_handle` returns a handle that can be used with `decrease_key`
/// - `decrease_key` moves an element towards the root after its priority dropped
///
/// # Example
///
/// ```rust
/// use rust_graph_routes::{DecreaseKeyHeap, Heap};
/// use rust_graph_routes::indexed_binary::IndexedBinaryHeap;
///
/// let mut heap = IndexedBinaryHeap::new();
/// let handle = heap.push_with_handle(10, "item");
/// heap.push(7, "other");
/// heap.decrease_key(&handle, 5).unwrap();
/// assert_eq!(heap.peek(), Some((&5, &"item")));
/// ```
pub trait DecreaseKeyHeap<T, P: Ord>: Heap<T, P> {
    /// The handle type for this heap, used to reference elements for decrease_key
    type Handle: Handle;

    /// Inserts an element with the given priority, returning a handle
    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle;

    /// Decreases the priority of an element identified by the handle
    ///
    /// # Errors
    /// Returns `HeapError::InvalidHandle` if the element is no longer in the heap,
    /// and `HeapError::PriorityNotDecreased` if `new_priority` is not smaller
    /// than the current priority.
    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError>;
}
