//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a collection of heap-ordered trees whose roots form a
//! circular doubly linked ring, with:
//! - O(1) amortized insert, decrease-key, and merge
//! - O(log n) amortized extract-minimum
//!
//! Structure is maintained lazily: insert and merge are pure ring splices,
//! and all the consolidation work is deferred to `extract_minimum`, which
//! repeatedly links equal-degree roots through a degree table until every
//! root degree is unique. `decrease_key` cuts a violating node into the root
//! ring; the `mark` bit records that a non-root node has lost a child since
//! it last became a child, and cascading cuts along marked ancestors are what
//! bound the amortized cost (a node loses at most one child before being cut
//! itself, which yields the Fibonacci degree bound: a degree-k node has at
//! least F(k+2) descendants, so the maximum degree is O(log n)).
//!
//! Nodes live in a [`slotmap`] arena. The sibling ring uses plain `left`/
//! `right` handles; a detached node is its own one-element ring, so splices
//! never need a null case.

use smallvec::SmallVec;

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::error::HeapError;
use crate::traits::{Key, Mergeable, MinHeap, Value};

new_key_type! {
    struct FibKey;
}

struct Node<K, V> {
    key: K,
    value: V,
    parent: Option<FibKey>,
    /// One child; the rest are reached through its sibling ring.
    child: Option<FibKey>,
    left: FibKey,
    right: FibKey,
    degree: usize,
    /// True only for non-root nodes that have lost a child since last
    /// becoming a child themselves.
    mark: bool,
}

/// Fibonacci min-heap.
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::{FibonacciHeap, MinHeap};
///
/// let mut heap = FibonacciHeap::new();
/// heap.insert(10, "a").unwrap();
/// heap.insert(20, "b").unwrap();
/// heap.insert(30, "c").unwrap();
/// heap.decrease_key(&"c", 5).unwrap();
/// assert_eq!(heap.extract_minimum(), Ok((5, "c")));
/// ```
pub struct FibonacciHeap<K: Key, V: Value> {
    arena: SlotMap<FibKey, Node<K, V>>,
    /// Minimum-key root; entry point into the root ring. `None` iff empty.
    min: Option<FibKey>,
    slots: FxHashMap<V, FibKey>,
}

impl<K: Key, V: Value> MinHeap<K, V> for FibonacciHeap<K, V> {
    fn new() -> Self {
        Self {
            arena: SlotMap::with_key(),
            min: None,
            slots: FxHashMap::default(),
        }
    }

    fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    fn len(&self) -> usize {
        self.arena.len()
    }

    /// Splices a singleton into the root ring next to `min`. O(1).
    fn insert(&mut self, key: K, value: V) -> Result<(), HeapError> {
        if self.slots.contains_key(&value) {
            return Err(HeapError::DuplicateValue);
        }

        let node = self.arena.insert_with_key(|k| Node {
            key,
            value: value.clone(),
            parent: None,
            child: None,
            left: k,
            right: k,
            degree: 0,
            mark: false,
        });
        self.slots.insert(value, node);

        match self.min {
            Some(min) => {
                Self::ring_insert(&mut self.arena, min, node);
                if self.arena[node].key < self.arena[min].key {
                    self.min = Some(node);
                }
            }
            None => self.min = Some(node),
        }
        Ok(())
    }

    fn minimum(&self) -> Result<(&K, &V), HeapError> {
        let min = self.min.ok_or(HeapError::Empty)?;
        let node = &self.arena[min];
        Ok((&node.key, &node.value))
    }

    /// Detaches `min`, splices its children into the root ring, and
    /// consolidates. O(log n) amortized; the unamortized cost is proportional
    /// to the root count plus the extracted node's degree.
    fn extract_minimum(&mut self) -> Result<(K, V), HeapError> {
        let min = self.min.ok_or(HeapError::Empty)?;
        Ok(self.remove_root(min))
    }

    /// Sets the key and, if heap order against the parent is now violated,
    /// cuts the node into the root ring and cascades along marked ancestors.
    /// O(1) amortized.
    fn decrease_key(&mut self, value: &V, new_key: K) -> Result<(), HeapError> {
        let &node = self.slots.get(value).ok_or(HeapError::UnknownValue)?;
        if new_key >= self.arena[node].key {
            return Err(HeapError::KeyNotDecreased);
        }
        self.arena[node].key = new_key;

        if let Some(parent) = self.arena[node].parent {
            if self.arena[node].key < self.arena[parent].key {
                self.cut(node, parent);
                self.cascading_cut(parent);
            }
        }

        let min = self.min.expect("heap holds at least the decreased node");
        if self.arena[node].key < self.arena[min].key {
            self.min = Some(node);
        }
        Ok(())
    }

    /// Promotes the node to the root ring with an unconditional cut (the
    /// decrease-to-negative-infinity trick, without the sentinel), then
    /// removes it through the extract machinery.
    fn delete(&mut self, value: &V) -> Result<(K, V), HeapError> {
        if self.min.is_none() {
            return Err(HeapError::Empty);
        }
        let &node = self.slots.get(value).ok_or(HeapError::UnknownValue)?;

        if let Some(parent) = self.arena[node].parent {
            self.cut(node, parent);
            self.cascading_cut(parent);
        }
        Ok(self.remove_root(node))
    }
}

impl<K: Key, V: Value> Mergeable<K, V> for FibonacciHeap<K, V> {
    /// Destructive union: verifies value-set disjointness, migrates `other`'s
    /// nodes into the surviving arena, splices the two root rings, and keeps
    /// the smaller of the two minimums.
    fn merge(mut self, other: Self) -> Result<Self, HeapError> {
        let (small, large) = if self.slots.len() <= other.slots.len() {
            (&self.slots, &other.slots)
        } else {
            (&other.slots, &self.slots)
        };
        if small.keys().any(|value| large.contains_key(value)) {
            return Err(HeapError::DuplicateValue);
        }

        let other_min = self.absorb(other);
        match (self.min, other_min) {
            (Some(a), Some(b)) => {
                Self::ring_concat(&mut self.arena, a, b);
                if self.arena[b].key < self.arena[a].key {
                    self.min = Some(b);
                }
            }
            (None, Some(b)) => self.min = Some(b),
            _ => {}
        }
        Ok(self)
    }
}

impl<K: Key, V: Value> FibonacciHeap<K, V> {
    /// Moves every node of `other` into this heap's arena, rewriting links
    /// and slot-map entries to the new handles. Returns `other`'s remapped
    /// minimum.
    fn absorb(&mut self, other: Self) -> Option<FibKey> {
        let mut remap: FxHashMap<FibKey, FibKey> =
            FxHashMap::with_capacity_and_hasher(other.arena.len(), Default::default());

        for (old, node) in other.arena {
            let new = self.arena.insert(node);
            remap.insert(old, new);
        }
        for &new in remap.values() {
            let node = &mut self.arena[new];
            node.parent = node.parent.map(|k| remap[&k]);
            node.child = node.child.map(|k| remap[&k]);
            node.left = remap[&node.left];
            node.right = remap[&node.right];
        }
        for (value, old) in other.slots {
            self.slots.insert(value, remap[&old]);
        }
        other.min.map(|m| remap[&m])
    }

    /// Splices `node` (a one-element ring) into the ring right of `at`.
    fn ring_insert(arena: &mut SlotMap<FibKey, Node<K, V>>, at: FibKey, node: FibKey) {
        debug_assert_eq!(arena[node].left, node);
        let after = arena[at].right;
        arena[node].left = at;
        arena[node].right = after;
        arena[at].right = node;
        arena[after].left = node;
    }

    /// Unlinks `node` from its ring, leaving it as its own one-element ring.
    /// Both directions are severed before the node is relinked anywhere else.
    fn ring_remove(arena: &mut SlotMap<FibKey, Node<K, V>>, node: FibKey) {
        let left = arena[node].left;
        let right = arena[node].right;
        arena[left].right = right;
        arena[right].left = left;
        arena[node].left = node;
        arena[node].right = node;
    }

    /// Splices two rings together. O(1) pointer surgery.
    fn ring_concat(arena: &mut SlotMap<FibKey, Node<K, V>>, a: FibKey, b: FibKey) {
        let a_right = arena[a].right;
        let b_left = arena[b].left;
        arena[a].right = b;
        arena[b].left = a;
        arena[b_left].right = a_right;
        arena[a_right].left = b_left;
    }

    /// Detaches a root from the ring, splices its children (parents and marks
    /// cleared) into the root ring, consolidates the remainder, and frees the
    /// node. `node` must be a root.
    fn remove_root(&mut self, node: FibKey) -> (K, V) {
        debug_assert!(self.arena[node].parent.is_none());

        if let Some(child) = self.arena[node].child.take() {
            let mut current = child;
            loop {
                self.arena[current].parent = None;
                self.arena[current].mark = false;
                current = self.arena[current].right;
                if current == child {
                    break;
                }
            }
            Self::ring_concat(&mut self.arena, node, child);
        }

        let right = self.arena[node].right;
        Self::ring_remove(&mut self.arena, node);
        let freed = self.arena.remove(node).expect("root is live");
        self.slots.remove(&freed.value);

        if right == node {
            // The ring held only this node.
            self.min = None;
        } else {
            self.min = Some(right);
            self.consolidate();
        }
        (freed.key, freed.value)
    }

    /// Repeatedly links equal-degree roots through a degree table until every
    /// degree in the root ring is unique, then rescans for the minimum. Only
    /// the roots present when the pass starts are scanned; links performed
    /// during the pass do not re-enter the scan.
    fn consolidate(&mut self) {
        let start = self.min.expect("consolidate runs on a non-empty ring");

        let mut roots: SmallVec<[FibKey; 16]> = SmallVec::new();
        let mut current = start;
        loop {
            roots.push(current);
            current = self.arena[current].right;
            if current == start {
                break;
            }
        }

        // Degrees are bounded by log_phi(n); log2(n) + 2 slots is enough.
        let capacity = (self.arena.len() as f64).log2() as usize + 2;
        let mut degrees: SmallVec<[Option<FibKey>; 16]> = SmallVec::new();
        degrees.resize(capacity, None);

        for root in roots {
            let mut x = root;
            loop {
                let d = self.arena[x].degree;
                if d >= degrees.len() {
                    degrees.resize(d + 1, None);
                }
                match degrees[d].take() {
                    Some(mut y) => {
                        if self.arena[y].key < self.arena[x].key {
                            std::mem::swap(&mut x, &mut y);
                        }
                        self.link(y, x);
                    }
                    None => {
                        degrees[d] = Some(x);
                        break;
                    }
                }
            }
        }

        self.min = None;
        for root in degrees.into_iter().flatten() {
            match self.min {
                Some(min) if self.arena[root].key >= self.arena[min].key => {}
                _ => self.min = Some(root),
            }
        }
    }

    /// Removes root `child` from the root ring and hangs it under root
    /// `parent`, whose degree must equal `child`'s.
    fn link(&mut self, child: FibKey, parent: FibKey) {
        debug_assert_eq!(self.arena[child].degree, self.arena[parent].degree);

        Self::ring_remove(&mut self.arena, child);
        self.arena[child].parent = Some(parent);
        self.arena[child].mark = false;

        match self.arena[parent].child {
            Some(first) => Self::ring_insert(&mut self.arena, first, child),
            None => self.arena[parent].child = Some(child),
        }
        self.arena[parent].degree += 1;
    }

    /// Detaches `node` from `parent`, clears its mark, and splices it into
    /// the root ring.
    fn cut(&mut self, node: FibKey, parent: FibKey) {
        let right = self.arena[node].right;
        Self::ring_remove(&mut self.arena, node);

        let parent_node = &mut self.arena[parent];
        parent_node.degree -= 1;
        if parent_node.child == Some(node) {
            parent_node.child = if right == node { None } else { Some(right) };
        }

        self.arena[node].parent = None;
        self.arena[node].mark = false;

        let min = self.min.expect("a node with a parent implies a root exists");
        Self::ring_insert(&mut self.arena, min, node);
    }

    /// Walks up from a node that just lost a child: marked ancestors are cut
    /// too; the first unmarked non-root ancestor is marked and the walk stops.
    fn cascading_cut(&mut self, mut node: FibKey) {
        while let Some(parent) = self.arena[node].parent {
            if !self.arena[node].mark {
                self.arena[node].mark = true;
                break;
            }
            self.cut(node, parent);
            node = parent;
        }
    }
}

impl<K: Key, V: Value> Default for FibonacciHeap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
