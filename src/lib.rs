//! Mergeable min-heap family with value-keyed decrease-key
//!
//! This crate provides three priority-queue implementations intended as the
//! ordering engine behind graph shortest-path computation:
//!
//! - **Binary heap**: array-backed; O(log n) insert, extract-minimum, and
//!   decrease-key
//! - **Binomial heap**: mergeable forest of binomial trees; O(log n)
//!   everything, union by binary-counter carrying
//! - **Fibonacci heap**: O(1) amortized insert, decrease-key, and merge;
//!   O(log n) amortized extract-minimum
//!
//! All three share the [`MinHeap`] contract: entries are `(key, value)`
//! pairs where the key is a totally ordered numeric priority and the value
//! is a unique identity. Operations address entries by value: each heap
//! keeps a value-to-node map, so `decrease_key` needs no handle from the
//! caller and duplicate insertion is rejected rather than silently
//! overwritten. The mergeable variants additionally implement [`Mergeable`],
//! a consuming union that invalidates both operands by ownership.
//!
//! The heaps are single-threaded; embedders that share a heap across threads
//! must serialize access themselves.
//!
//! # Example
//!
//! ```rust
//! use mergeable_heaps::{FibonacciHeap, MinHeap};
//!
//! let mut heap = FibonacciHeap::new();
//! heap.insert(5, "item1").unwrap();
//! heap.insert(3, "item2").unwrap();
//! heap.decrease_key(&"item1", 1).unwrap();
//! assert_eq!(heap.minimum(), Ok((&1, &"item1")));
//! ```
//!
//! A generic Dijkstra solver in [`shortest_path`] consumes any of the three;
//! the heap choice changes the complexity, never the results.

pub mod binary;
pub mod binomial;
pub mod error;
pub mod fibonacci;
pub mod shortest_path;
pub mod traits;

pub use binary::BinaryHeap;
pub use binomial::BinomialHeap;
pub use error::HeapError;
pub use fibonacci::FibonacciHeap;
pub use traits::{Key, Mergeable, MinHeap, Value, Weight};
