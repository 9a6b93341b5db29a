//! Binomial Heap implementation
//!
//! A binomial heap is a forest of heap-ordered binomial trees with:
//! - O(log n) insert and extract-minimum
//! - O(log n) decrease-key (bubble up, no cutting)
//! - heap-union by binary-counter-style carrying
//!
//! # Algorithm Overview
//!
//! The root list is a singly linked list in strictly increasing degree
//! order with at most one root per degree, the "binary counter" invariant:
//! the multiset of root degrees is exactly the set bits of the element
//! count. Union is the classic two-phase algorithm: splice the two root
//! lists into one list sorted by degree, then walk it left to right linking
//! adjacent equal-degree roots like carry propagation in binary addition.
//!
//! A tree rooted at a degree-k node has exactly 2^k nodes, so there are at
//! most log2(n) + 1 roots and every operation that walks the root list is
//! O(log n).
//!
//! Nodes live in a [`slotmap`] arena; `parent`/`child`/`sibling` are
//! optional arena handles rather than pointers, which keeps all the link
//! surgery in safe code while splices stay O(1).

use std::mem;

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::error::HeapError;
use crate::traits::{Key, Mergeable, MinHeap, Value};

new_key_type! {
    struct BinomialKey;
}

/// Arena node. Children hang off `child` and chain through `sibling` in
/// decreasing degree order; roots chain through `sibling` in increasing
/// degree order.
struct Node<K, V> {
    key: K,
    value: V,
    parent: Option<BinomialKey>,
    child: Option<BinomialKey>,
    sibling: Option<BinomialKey>,
    degree: usize,
}

/// Binomial min-heap.
///
/// There is no cached minimum pointer: `minimum` and `extract_minimum` scan
/// the root list, which is O(log n) by the binary-counter invariant.
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::{BinomialHeap, Mergeable, MinHeap};
///
/// let mut a = BinomialHeap::new();
/// a.insert(5, "e").unwrap();
/// a.insert(1, "a").unwrap();
///
/// let mut b = BinomialHeap::new();
/// b.insert(3, "c").unwrap();
///
/// let mut merged = a.merge(b).unwrap();
/// assert_eq!(merged.extract_minimum(), Ok((1, "a")));
/// assert_eq!(merged.extract_minimum(), Ok((3, "c")));
/// ```
pub struct BinomialHeap<K: Key, V: Value> {
    arena: SlotMap<BinomialKey, Node<K, V>>,
    /// First root, lowest degree. `None` iff the heap is empty.
    head: Option<BinomialKey>,
    slots: FxHashMap<V, BinomialKey>,
}

impl<K: Key, V: Value> MinHeap<K, V> for BinomialHeap<K, V> {
    fn new() -> Self {
        Self {
            arena: SlotMap::with_key(),
            head: None,
            slots: FxHashMap::default(),
        }
    }

    fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    fn len(&self) -> usize {
        self.arena.len()
    }

    /// Builds a single-node tree and unions it into the root list. O(log n)
    /// worst case when the carry chain runs all the way up.
    fn insert(&mut self, key: K, value: V) -> Result<(), HeapError> {
        if self.slots.contains_key(&value) {
            return Err(HeapError::DuplicateValue);
        }

        let node = self.arena.insert(Node {
            key,
            value: value.clone(),
            parent: None,
            child: None,
            sibling: None,
            degree: 0,
        });
        self.slots.insert(value, node);
        self.head = Self::union_roots(&mut self.arena, self.head, Some(node));
        Ok(())
    }

    /// Linear scan of the root list. O(log n).
    fn minimum(&self) -> Result<(&K, &V), HeapError> {
        let (_, min) = self.find_min_root().ok_or(HeapError::Empty)?;
        let node = &self.arena[min];
        Ok((&node.key, &node.value))
    }

    /// Scans the root list for the minimum root, removes it, and unions its
    /// reversed child chain back in. O(log n).
    fn extract_minimum(&mut self) -> Result<(K, V), HeapError> {
        let (prev, min) = self.find_min_root().ok_or(HeapError::Empty)?;
        Ok(self.remove_root(min, prev))
    }

    /// Bubbles the entry up by swapping `(key, value)` payloads with the
    /// parent while heap order is violated; the tree shape never changes.
    /// Each swap updates both values' slot-map entries. O(log n).
    fn decrease_key(&mut self, value: &V, new_key: K) -> Result<(), HeapError> {
        let &node = self.slots.get(value).ok_or(HeapError::UnknownValue)?;
        if new_key >= self.arena[node].key {
            return Err(HeapError::KeyNotDecreased);
        }
        self.arena[node].key = new_key;

        let mut current = node;
        while let Some(parent) = self.arena[current].parent {
            if self.arena[current].key >= self.arena[parent].key {
                break;
            }
            self.swap_payloads(current, parent);
            current = parent;
        }
        Ok(())
    }

    /// Bubbles the entry unconditionally to the root of its tree (the
    /// decrease-to-negative-infinity trick, without the sentinel), then
    /// removes that root exactly like `extract_minimum` removes the minimum.
    fn delete(&mut self, value: &V) -> Result<(K, V), HeapError> {
        if self.head.is_none() {
            return Err(HeapError::Empty);
        }
        let &node = self.slots.get(value).ok_or(HeapError::UnknownValue)?;

        let mut current = node;
        while let Some(parent) = self.arena[current].parent {
            self.swap_payloads(current, parent);
            current = parent;
        }

        let prev = self.find_root_before(current);
        Ok(self.remove_root(current, prev))
    }
}

impl<K: Key, V: Value> Mergeable<K, V> for BinomialHeap<K, V> {
    /// Destructive union. Verifies value-set disjointness up front, migrates
    /// `other`'s nodes into the surviving arena, then unions the root lists
    /// with carry propagation.
    fn merge(mut self, other: Self) -> Result<Self, HeapError> {
        let (small, large) = if self.slots.len() <= other.slots.len() {
            (&self.slots, &other.slots)
        } else {
            (&other.slots, &self.slots)
        };
        if small.keys().any(|value| large.contains_key(value)) {
            return Err(HeapError::DuplicateValue);
        }

        let other_head = self.absorb(other);
        self.head = Self::union_roots(&mut self.arena, self.head, other_head);
        Ok(self)
    }
}

impl<K: Key, V: Value> BinomialHeap<K, V> {
    /// Moves every node of `other` into this heap's arena, rewriting all
    /// links and slot-map entries to the new handles. Returns `other`'s
    /// remapped head.
    fn absorb(&mut self, other: Self) -> Option<BinomialKey> {
        let mut remap: FxHashMap<BinomialKey, BinomialKey> =
            FxHashMap::with_capacity_and_hasher(other.arena.len(), Default::default());

        for (old, node) in other.arena {
            let new = self.arena.insert(node);
            remap.insert(old, new);
        }
        for &new in remap.values() {
            let node = &mut self.arena[new];
            node.parent = node.parent.map(|k| remap[&k]);
            node.child = node.child.map(|k| remap[&k]);
            node.sibling = node.sibling.map(|k| remap[&k]);
        }
        for (value, old) in other.slots {
            self.slots.insert(value, remap[&old]);
        }
        other.head.map(|h| remap[&h])
    }

    /// Phase 1 of union: splices two degree-sorted root lists into one list
    /// in non-decreasing degree order, merge-sort style.
    fn splice_root_lists(
        arena: &mut SlotMap<BinomialKey, Node<K, V>>,
        mut a: Option<BinomialKey>,
        mut b: Option<BinomialKey>,
    ) -> Option<BinomialKey> {
        let mut head = None;
        let mut tail: Option<BinomialKey> = None;

        while let (Some(x), Some(y)) = (a, b) {
            let next = if arena[x].degree <= arena[y].degree {
                a = arena[x].sibling;
                x
            } else {
                b = arena[y].sibling;
                y
            };
            arena[next].sibling = None;
            match tail {
                Some(t) => arena[t].sibling = Some(next),
                None => head = Some(next),
            }
            tail = Some(next);
        }

        let rest = a.or(b);
        match tail {
            Some(t) => arena[t].sibling = rest,
            None => head = rest,
        }
        head
    }

    /// Phase 2 of union: walks the spliced list left to right combining
    /// adjacent equal-degree roots, exactly like carry propagation. Skips
    /// ahead when three consecutive roots share a degree (the first stays, the
    /// latter two will combine on the next step). Post-condition: at most one
    /// root per degree, strictly increasing along the list.
    fn union_roots(
        arena: &mut SlotMap<BinomialKey, Node<K, V>>,
        a: Option<BinomialKey>,
        b: Option<BinomialKey>,
    ) -> Option<BinomialKey> {
        let mut head = Self::splice_root_lists(arena, a, b);
        let mut prev: Option<BinomialKey> = None;
        let mut current = head?;

        while let Some(next) = arena[current].sibling {
            let after = arena[next].sibling;
            let degrees_differ = arena[current].degree != arena[next].degree;
            let triple = after.is_some_and(|n| arena[n].degree == arena[current].degree);

            if degrees_differ || triple {
                prev = Some(current);
                current = next;
            } else if arena[current].key <= arena[next].key {
                // Equal keys link the later root below the earlier one.
                arena[current].sibling = after;
                Self::link(arena, current, next);
            } else {
                match prev {
                    Some(p) => arena[p].sibling = Some(next),
                    None => head = Some(next),
                }
                Self::link(arena, next, current);
                current = next;
            }
        }
        head
    }

    /// Makes `child` the new leftmost child of `parent`. Both must be roots
    /// of equal degree; the result has degree + 1. O(1).
    fn link(arena: &mut SlotMap<BinomialKey, Node<K, V>>, parent: BinomialKey, child: BinomialKey) {
        debug_assert_eq!(arena[parent].degree, arena[child].degree);
        arena[child].parent = Some(parent);
        arena[child].sibling = arena[parent].child;
        arena[parent].child = Some(child);
        arena[parent].degree += 1;
    }

    /// Returns the minimum-key root and its predecessor in the root list.
    fn find_min_root(&self) -> Option<(Option<BinomialKey>, BinomialKey)> {
        let head = self.head?;
        let mut best = (None, head);
        let mut prev = head;
        let mut current = self.arena[head].sibling;

        while let Some(root) = current {
            if self.arena[root].key < self.arena[best.1].key {
                best = (Some(prev), root);
            }
            prev = root;
            current = self.arena[root].sibling;
        }
        Some(best)
    }

    /// Returns the root-list predecessor of `root`, or `None` if it is the head.
    fn find_root_before(&self, root: BinomialKey) -> Option<BinomialKey> {
        let mut prev = None;
        let mut current = self.head;
        while let Some(r) = current {
            if r == root {
                return prev;
            }
            prev = Some(r);
            current = self.arena[r].sibling;
        }
        unreachable!("node bubbled to its tree root must appear in the root list")
    }

    /// Unlinks `root` from the root list, turns its child chain (reversed,
    /// parents cleared) into a fresh root list, and unions it back into the
    /// remainder. Frees the node and returns its payload.
    fn remove_root(&mut self, root: BinomialKey, prev: Option<BinomialKey>) -> (K, V) {
        let after = self.arena[root].sibling.take();
        match prev {
            Some(p) => self.arena[p].sibling = after,
            None => self.head = after,
        }

        // Children are chained in decreasing degree; reversing them yields a
        // valid increasing-degree root list.
        let mut reversed = None;
        let mut child = self.arena[root].child.take();
        while let Some(c) = child {
            let next = self.arena[c].sibling;
            self.arena[c].sibling = reversed;
            self.arena[c].parent = None;
            reversed = Some(c);
            child = next;
        }
        self.head = Self::union_roots(&mut self.arena, self.head, reversed);

        let node = self.arena.remove(root).expect("root is live");
        self.slots.remove(&node.value);
        (node.key, node.value)
    }

    /// Swaps the `(key, value)` payloads of two nodes and their slot-map
    /// entries in the same step.
    fn swap_payloads(&mut self, a: BinomialKey, b: BinomialKey) {
        let [node_a, node_b] = self
            .arena
            .get_disjoint_mut([a, b])
            .expect("payload swap operates on two distinct live nodes");
        mem::swap(&mut node_a.key, &mut node_b.key);
        mem::swap(&mut node_a.value, &mut node_b.value);

        *self.slots.get_mut(&self.arena[a].value).expect("value is tracked") = a;
        *self.slots.get_mut(&self.arena[b].value).expect("value is tracked") = b;
    }
}

impl<K: Key, V: Value> Default for BinomialHeap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
