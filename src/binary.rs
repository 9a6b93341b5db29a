//! Array-backed binary min-heap with value-keyed decrease-key.
//!
//! The classic dense-array heap, extended with a value-to-index map so that
//! `decrease_key` and `delete` can find an entry in O(1) and repair the heap
//! in O(log n). Every swap performed by a sift updates both swapped entries'
//! map slots in the same step; the map is never repaired in a separate pass.

use rustc_hash::FxHashMap;

use crate::error::HeapError;
use crate::traits::{Key, MinHeap, Value};

struct Entry<K, V> {
    key: K,
    value: V,
}

/// Binary min-heap over a dense `Vec`, 0-indexed.
///
/// Invariant: for every non-root index `i`,
/// `entries[i].key >= entries[(i - 1) / 2].key`, and `slots[entries[i].value]
/// == i` for every live entry.
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::{BinaryHeap, MinHeap};
///
/// let mut heap = BinaryHeap::new();
/// heap.insert(10, "a").unwrap();
/// heap.insert(20, "b").unwrap();
/// heap.decrease_key(&"b", 5).unwrap();
/// assert_eq!(heap.extract_minimum(), Ok((5, "b")));
/// ```
pub struct BinaryHeap<K: Key, V: Value> {
    entries: Vec<Entry<K, V>>,
    slots: FxHashMap<V, usize>,
}

impl<K: Key, V: Value> MinHeap<K, V> for BinaryHeap<K, V> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            slots: FxHashMap::default(),
        }
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    /// Appends the entry and sifts it up. O(log n).
    fn insert(&mut self, key: K, value: V) -> Result<(), HeapError> {
        if self.slots.contains_key(&value) {
            return Err(HeapError::DuplicateValue);
        }

        let index = self.entries.len();
        self.slots.insert(value.clone(), index);
        self.entries.push(Entry { key, value });
        self.sift_up(index);
        Ok(())
    }

    fn minimum(&self) -> Result<(&K, &V), HeapError> {
        self.entries
            .first()
            .map(|entry| (&entry.key, &entry.value))
            .ok_or(HeapError::Empty)
    }

    /// Moves the last entry to the root and sifts it down. O(log n).
    fn extract_minimum(&mut self) -> Result<(K, V), HeapError> {
        if self.entries.is_empty() {
            return Err(HeapError::Empty);
        }
        Ok(self.pop_root())
    }

    /// Looks the value up in the slot map, lowers its key, sifts up. O(log n).
    fn decrease_key(&mut self, value: &V, new_key: K) -> Result<(), HeapError> {
        let &index = self.slots.get(value).ok_or(HeapError::UnknownValue)?;
        if new_key >= self.entries[index].key {
            return Err(HeapError::KeyNotDecreased);
        }
        self.entries[index].key = new_key;
        self.sift_up(index);
        Ok(())
    }

    /// Promotes the entry to the root along its ancestor path (the swaps an
    /// unconditional sift-up performs), then removes the root. O(log n).
    fn delete(&mut self, value: &V) -> Result<(K, V), HeapError> {
        if self.entries.is_empty() {
            return Err(HeapError::Empty);
        }
        let &index = self.slots.get(value).ok_or(HeapError::UnknownValue)?;

        let mut current = index;
        while current > 0 {
            let parent = (current - 1) / 2;
            self.swap_entries(current, parent);
            current = parent;
        }
        Ok(self.pop_root())
    }
}

impl<K: Key, V: Value> BinaryHeap<K, V> {
    /// Removes and returns the root entry, restoring heap order below it.
    fn pop_root(&mut self) -> (K, V) {
        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let entry = self.entries.pop().expect("checked non-empty");
        self.slots.remove(&entry.value);

        if let Some(moved) = self.entries.first() {
            *self.slots.get_mut(&moved.value).expect("moved entry is tracked") = 0;
            self.sift_down(0);
        }
        (entry.key, entry.value)
    }

    /// Swaps two entries and their slot-map positions as one step.
    fn swap_entries(&mut self, a: usize, b: usize) {
        self.entries.swap(a, b);
        *self.slots.get_mut(&self.entries[a].value).expect("entry is tracked") = a;
        *self.slots.get_mut(&self.entries[b].value).expect("entry is tracked") = b;
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.entries[index].key < self.entries[parent].key {
                self.swap_entries(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < len && self.entries[left].key < self.entries[smallest].key {
                smallest = left;
            }
            if right < len && self.entries[right].key < self.entries[smallest].key {
                smallest = right;
            }

            if smallest == index {
                break;
            }
            self.swap_entries(index, smallest);
            index = smallest;
        }
    }
}

impl<K: Key, V: Value> Default for BinaryHeap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Walks the array and the slot map, asserting heap order and that every
    /// entry's recorded index matches its position.
    fn check_invariants(heap: &BinaryHeap<i32, &'static str>) {
        for index in 1..heap.entries.len() {
            let parent = (index - 1) / 2;
            assert!(
                heap.entries[index].key >= heap.entries[parent].key,
                "heap order violated at index {index}"
            );
        }
        assert_eq!(heap.slots.len(), heap.entries.len());
        for (index, entry) in heap.entries.iter().enumerate() {
            assert_eq!(heap.slots.get(&entry.value), Some(&index));
        }
    }

    #[test]
    fn sorted_extraction() {
        let mut heap = BinaryHeap::new();
        for (key, value) in [(5, "e"), (3, "c"), (8, "h"), (1, "a"), (4, "d")] {
            heap.insert(key, value).unwrap();
            check_invariants(&heap);
        }

        assert_eq!(heap.len(), 5);
        assert_eq!(heap.extract_minimum(), Ok((1, "a")));
        assert_eq!(heap.extract_minimum(), Ok((3, "c")));
        assert_eq!(heap.extract_minimum(), Ok((4, "d")));
        assert_eq!(heap.extract_minimum(), Ok((5, "e")));
        assert_eq!(heap.extract_minimum(), Ok((8, "h")));
        assert_eq!(heap.extract_minimum(), Err(HeapError::Empty));
    }

    #[test]
    fn empty_heap_errors() {
        let mut heap: BinaryHeap<i32, &str> = BinaryHeap::new();
        assert_eq!(heap.minimum(), Err(HeapError::Empty));
        assert_eq!(heap.extract_minimum(), Err(HeapError::Empty));
        assert_eq!(heap.delete(&"x"), Err(HeapError::Empty));
    }

    #[test]
    fn duplicate_value_rejected_without_mutation() {
        let mut heap = BinaryHeap::new();
        heap.insert(10, "a").unwrap();
        assert_eq!(heap.insert(99, "a"), Err(HeapError::DuplicateValue));
        assert_eq!(heap.len(), 1);
        assert_eq!(heap.minimum(), Ok((&10, &"a")));
    }

    #[test]
    fn decrease_key_reorders() {
        let mut heap = BinaryHeap::new();
        heap.insert(10, "a").unwrap();
        heap.insert(20, "b").unwrap();
        heap.insert(30, "c").unwrap();

        heap.decrease_key(&"c", 5).unwrap();
        check_invariants(&heap);
        assert_eq!(heap.extract_minimum(), Ok((5, "c")));
    }

    #[test]
    fn decrease_key_is_strictly_decreasing() {
        let mut heap = BinaryHeap::new();
        heap.insert(10, "a").unwrap();
        assert_eq!(heap.decrease_key(&"a", 10), Err(HeapError::KeyNotDecreased));
        assert_eq!(heap.decrease_key(&"a", 11), Err(HeapError::KeyNotDecreased));
        assert_eq!(heap.decrease_key(&"missing", 1), Err(HeapError::UnknownValue));
        assert_eq!(heap.minimum(), Ok((&10, &"a")));
    }

    #[test]
    fn delete_interior_entry() {
        let mut heap = BinaryHeap::new();
        for (key, value) in [(1, "a"), (2, "b"), (3, "c"), (4, "d"), (5, "e")] {
            heap.insert(key, value).unwrap();
        }

        assert_eq!(heap.delete(&"c"), Ok((3, "c")));
        check_invariants(&heap);
        assert_eq!(heap.delete(&"c"), Err(HeapError::UnknownValue));
        assert_eq!(heap.len(), 4);

        assert_eq!(heap.extract_minimum(), Ok((1, "a")));
        assert_eq!(heap.extract_minimum(), Ok((2, "b")));
        assert_eq!(heap.extract_minimum(), Ok((4, "d")));
        assert_eq!(heap.extract_minimum(), Ok((5, "e")));
    }

    #[test]
    fn reinsert_after_extract() {
        let mut heap = BinaryHeap::new();
        heap.insert(7, "a").unwrap();
        assert_eq!(heap.extract_minimum(), Ok((7, "a")));
        // The identity is free again once extracted.
        heap.insert(2, "a").unwrap();
        assert_eq!(heap.minimum(), Ok((&2, &"a")));
    }

    #[test]
    fn slot_map_tracks_interleaved_operations() {
        let mut heap = BinaryHeap::new();
        for (key, value) in [(50, "a"), (40, "b"), (30, "c"), (20, "d"), (10, "e")] {
            heap.insert(key, value).unwrap();
        }
        heap.decrease_key(&"a", 5).unwrap();
        check_invariants(&heap);
        assert_eq!(heap.extract_minimum(), Ok((5, "a")));
        heap.decrease_key(&"b", 1).unwrap();
        check_invariants(&heap);
        heap.delete(&"d").unwrap();
        check_invariants(&heap);
        assert_eq!(heap.extract_minimum(), Ok((1, "b")));
        assert_eq!(heap.extract_minimum(), Ok((10, "e")));
        assert_eq!(heap.extract_minimum(), Ok((30, "c")));
        assert!(heap.is_empty());
    }
}
