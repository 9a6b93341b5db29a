//! Common traits for the heap family
//!
//! This module provides the uniform contract shared by all heap variants:
//!
//! - [`MinHeap`]: the full operation set (insert, minimum, extract-minimum,
//!   decrease-key, delete), keyed by the caller's unique value
//! - [`Mergeable`]: consuming heap-union for the variants that support it
//!
//! Unlike handle-based designs, these heaps identify elements by the value
//! supplied at insert time. Each heap keeps its own value-to-node map, which
//! is what makes duplicate insertion detectable and `decrease_key` O(log n)
//! or better without the caller holding on to anything.

use std::hash::Hash;
use std::ops::Add;

use ordered_float::OrderedFloat;

use crate::error::HeapError;

/// Marker trait for heap keys.
///
/// Keys are totally ordered numeric values. The trait is implemented for the
/// primitive integer types and for [`OrderedFloat`] floats (plain `f32`/`f64`
/// are not `Ord`). There is no comparator injection; ordering is the type's
/// natural order, min-heap convention.
pub trait Key: Copy + Ord {}

macro_rules! impl_key_for_numeric {
    ($($t:ty),* $(,)?) => {
        $(impl Key for $t {})*
    };
}

impl_key_for_numeric!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Key for OrderedFloat<f32> {}
impl Key for OrderedFloat<f64> {}

/// Marker trait for heap values.
///
/// Values are unique identities: at most one live entry per value exists in a
/// heap at any time. Hashing and equality drive the value-to-node lookup;
/// `Clone` is needed because the value appears both in its node and in the
/// lookup map.
pub trait Value: Eq + Hash + Clone {}

impl<V: Eq + Hash + Clone> Value for V {}

/// Edge-weight trait for the shortest-path consumer.
///
/// `Default` supplies the zero distance for the source vertex.
pub trait Weight: Key + Add<Output = Self> + Default {}

impl<W> Weight for W where W: Key + Add<Output = Self> + Default {}

/// Min-heap contract implemented by every variant in this crate.
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::{BinaryHeap, MinHeap};
///
/// let mut heap = BinaryHeap::new();
/// heap.insert(3, "three").unwrap();
/// heap.insert(1, "one").unwrap();
/// heap.insert(2, "two").unwrap();
///
/// assert_eq!(heap.minimum(), Ok((&1, &"one")));
/// assert_eq!(heap.extract_minimum(), Ok((1, "one")));
/// assert_eq!(heap.extract_minimum(), Ok((2, "two")));
/// ```
pub trait MinHeap<K: Key, V: Value> {
    /// Creates a new empty heap.
    fn new() -> Self;

    /// Returns true if the heap holds no entries.
    fn is_empty(&self) -> bool;

    /// Returns the number of live entries.
    fn len(&self) -> usize;

    /// Inserts `value` with priority `key`.
    ///
    /// # Errors
    /// [`HeapError::DuplicateValue`] if `value` is already present; the heap
    /// is left untouched.
    fn insert(&mut self, key: K, value: V) -> Result<(), HeapError>;

    /// Returns the minimum entry without removing it.
    ///
    /// # Errors
    /// [`HeapError::Empty`] if the heap has no entries.
    fn minimum(&self) -> Result<(&K, &V), HeapError>;

    /// Removes and returns the minimum entry.
    ///
    /// The order among entries with equal keys is unspecified.
    ///
    /// # Errors
    /// [`HeapError::Empty`] if the heap has no entries.
    fn extract_minimum(&mut self) -> Result<(K, V), HeapError>;

    /// Lowers the key of `value` to `new_key`.
    ///
    /// The policy is decrease-only: `new_key` must be strictly smaller than
    /// the current key, an equal key is rejected.
    ///
    /// # Errors
    /// [`HeapError::UnknownValue`] if `value` is not in the heap;
    /// [`HeapError::KeyNotDecreased`] if `new_key` is not strictly smaller.
    fn decrease_key(&mut self, value: &V, new_key: K) -> Result<(), HeapError>;

    /// Removes `value` regardless of its position, returning its entry.
    ///
    /// Equivalent to decreasing the key below every other key and then
    /// extracting the minimum.
    ///
    /// # Errors
    /// [`HeapError::Empty`] on an empty heap, [`HeapError::UnknownValue`] if
    /// `value` is not tracked.
    fn delete(&mut self, value: &V) -> Result<(K, V), HeapError>;
}

/// Consuming heap-union, for the mergeable variants.
///
/// Both operands are consumed; ownership enforces that neither handle can be
/// used after the union, which is what "destructive merge" means here.
pub trait Mergeable<K: Key, V: Value>: MinHeap<K, V> + Sized {
    /// Unions two heaps with disjoint value sets into one.
    ///
    /// # Errors
    /// [`HeapError::DuplicateValue`] if the value sets intersect. The check
    /// runs before any node moves, so a failed union never leaves a
    /// half-merged structure behind.
    fn merge(self, other: Self) -> Result<Self, HeapError>;
}
