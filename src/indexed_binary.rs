//! Indexed binary heap with `decrease_key` support
//!
//! A binary min-heap that keeps an item→position map up to date on every swap,
//! so an element can be found and moved towards the root without a linear search.
//! Items double as their own handles: they must be unique within the heap.
//!
//! # Time Complexity
//!
//! | Operation      | Complexity |
//! |----------------|------------|
//! | `push`         | O(log n)   |
//! | `pop`          | O(log n)   |
//! | `decrease_key` | O(log n)   |
//! | `peek`         | O(1)       |
//! | `contains`     | O(1)       |
//! | `merge`        | O(m log n) |
//!
//! # Example
//!
//! ```rust
//! use rust_graph_routes::{DecreaseKeyHeap, Heap};
//! use rust_graph_routes::indexed_binary::IndexedBinaryHeap;
//!
//! let mut heap = IndexedBinaryHeap::new();
//! heap.push(3, 'c');
//! heap.push(1, 'a');
//! let b = heap.push_with_handle(9, 'b');
//! heap.decrease_key(&b, 2).unwrap();
//!
//! assert_eq!(heap.pop(), Some((1, 'a')));
//! assert_eq!(heap.pop(), Some((2, 'b')));
//! assert_eq!(heap.pop(), Some((3, 'c')));
//! assert_eq!(heap.pop(), None);
//! ```

use crate::traits::{DecreaseKeyHeap, Heap, HeapError};
use rustc_hash::FxHashMap;
use std::hash::Hash;

/// A binary min-heap addressable by item
#[derive(Debug, Clone)]
pub struct IndexedBinaryHeap<T, P>
where
    T: Clone + Eq + Hash,
    P: Ord,
{
    /// The heap data stored as a vector of (priority, item) pairs
    data: Vec<(P, T)>,
    /// Current slot of every queued item in `data`
    positions: FxHashMap<T, usize>,
}

impl<T, P> IndexedBinaryHeap<T, P>
where
    T: Clone + Eq + Hash,
    P: Ord,
{
    /// Returns true if `item` is currently queued
    pub fn contains(&self, item: &T) -> bool {
        self.positions.contains_key(item)
    }

    /// Returns the current priority of `item`, if queued
    pub fn priority(&self, item: &T) -> Option<&P> {
        self.positions.get(item).map(|&index| &self.data[index].0)
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
        self.positions.insert(self.data[a].1.clone(), a);
        self.positions.insert(self.data[b].1.clone(), b);
    }

    /// Move element at index up to maintain heap property
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.data[index].0 < self.data[parent].0 {
                self.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Move element at index down to maintain heap property
    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < len && self.data[left].0 < self.data[smallest].0 {
                smallest = left;
            }
            if right < len && self.data[right].0 < self.data[smallest].0 {
                smallest = right;
            }

            if smallest != index {
                self.swap(index, smallest);
                index = smallest;
            } else {
                break;
            }
        }
    }
}

impl<T, P> Heap<T, P> for IndexedBinaryHeap<T, P>
where
    T: Clone + Eq + Hash,
    P: Ord,
{
    fn new() -> Self {
        Self {
            data: Vec::new(),
            positions: FxHashMap::default(),
        }
    }

    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    /// Inserts `item`, or re-prioritises it if it is already queued
    fn push(&mut self, priority: P, item: T) {
        if let Some(&index) = self.positions.get(&item) {
            self.data[index].0 = priority;
            self.sift_up(index);
            if let Some(&index) = self.positions.get(&item) {
                self.sift_down(index);
            }
            return;
        }

        let index = self.data.len();
        self.positions.insert(item.clone(), index);
        self.data.push((priority, item));
        self.sift_up(index);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        self.data.first().map(|(p, t)| (p, t))
    }

    fn pop(&mut self) -> Option<(P, T)> {
        if self.data.is_empty() {
            return None;
        }

        let last_idx = self.data.len() - 1;
        self.swap(0, last_idx);
        let result = self.data.pop();
        if let Some((_, item)) = &result {
            self.positions.remove(item);
        }

        if !self.data.is_empty() {
            self.sift_down(0);
        }

        result
    }

    fn merge(&mut self, other: Self) {
        for (priority, item) in other.data {
            self.push(priority, item);
        }
    }
}

impl<T, P> DecreaseKeyHeap<T, P> for IndexedBinaryHeap<T, P>
where
    T: Clone + Eq + Hash,
    P: Ord,
{
    type Handle = T;

    fn push_with_handle(&mut self, priority: P, item: T) -> T {
        let handle = item.clone();
        self.push(priority, item);
        handle
    }

    fn decrease_key(&mut self, handle: &T, new_priority: P) -> Result<(), HeapError> {
        let index = *self.positions.get(handle).ok_or(HeapError::InvalidHandle)?;
        if new_priority >= self.data[index].0 {
            return Err(HeapError::PriorityNotDecreased);
        }
        self.data[index].0 = new_priority;
        self.sift_up(index);
        Ok(())
    }
}

impl<T, P> Default for IndexedBinaryHeap<T, P>
where
    T: Clone + Eq + Hash,
    P: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}
