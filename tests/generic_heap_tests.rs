//! Generic behavior tests for all heap implementations
//!
//! Each test is written once against the `MinHeap` (and `Mergeable`) traits
//! and instantiated for every variant, including the cross-implementation
//! contract: the same operation sequence must yield the same extraction
//! sequence from all three heaps.

use mergeable_heaps::binary::BinaryHeap;
use mergeable_heaps::binomial::BinomialHeap;
use mergeable_heaps::fibonacci::FibonacciHeap;
use mergeable_heaps::{HeapError, Mergeable, MinHeap};

fn test_empty_heap<H: MinHeap<i32, String>>() {
    let mut heap = H::new();
    assert!(heap.is_empty());
    assert_eq!(heap.len(), 0);
    assert_eq!(heap.minimum().unwrap_err(), HeapError::Empty);
    assert_eq!(heap.extract_minimum().unwrap_err(), HeapError::Empty);
    assert_eq!(heap.delete(&"anything".to_string()).unwrap_err(), HeapError::Empty);
}

fn test_sorted_extraction<H: MinHeap<i32, &'static str>>() {
    let mut heap = H::new();
    for (key, value) in [(5, "e"), (3, "c"), (8, "h"), (1, "a"), (4, "d")] {
        heap.insert(key, value).unwrap();
    }
    assert_eq!(heap.len(), 5);

    let mut keys = Vec::new();
    let mut values = Vec::new();
    while let Ok((key, value)) = heap.extract_minimum() {
        keys.push(key);
        values.push(value);
    }
    assert_eq!(keys, vec![1, 3, 4, 5, 8]);
    assert_eq!(values, vec!["a", "c", "d", "e", "h"]);
    assert!(heap.is_empty());
}

fn test_size_conservation<H: MinHeap<i32, i32>>() {
    let mut heap = H::new();
    for i in 0..50 {
        heap.insert(i * 7 % 50, i).unwrap();
    }
    assert_eq!(heap.len(), 50);
    for extracted in 1..=20 {
        heap.extract_minimum().unwrap();
        assert_eq!(heap.len(), 50 - extracted);
    }
    assert_eq!(heap.len(), 30);
}

fn test_decrease_key_reordering<H: MinHeap<i32, &'static str>>() {
    let mut heap = H::new();
    heap.insert(10, "a").unwrap();
    heap.insert(20, "b").unwrap();
    heap.insert(30, "c").unwrap();

    heap.decrease_key(&"c", 5).unwrap();
    assert_eq!(heap.extract_minimum().unwrap(), (5, "c"));
}

fn test_strict_decrease_policy<H: MinHeap<i32, &'static str>>() {
    let mut heap = H::new();
    heap.insert(10, "a").unwrap();

    // Equal keys are rejected, not treated as a no-op decrease.
    assert_eq!(heap.decrease_key(&"a", 10).unwrap_err(), HeapError::KeyNotDecreased);
    assert_eq!(heap.decrease_key(&"a", 15).unwrap_err(), HeapError::KeyNotDecreased);
    assert_eq!(heap.decrease_key(&"b", 1).unwrap_err(), HeapError::UnknownValue);
    assert_eq!(heap.minimum().unwrap(), (&10, &"a"));
}

fn test_duplicate_rejection<H: MinHeap<i32, &'static str>>() {
    let mut heap = H::new();
    heap.insert(10, "a").unwrap();
    assert_eq!(heap.insert(5, "a").unwrap_err(), HeapError::DuplicateValue);
    assert_eq!(heap.len(), 1);
    // The original entry is untouched.
    assert_eq!(heap.extract_minimum().unwrap(), (10, "a"));
}

fn test_delete<H: MinHeap<i32, i32>>() {
    let mut heap = H::new();
    for i in 0..10 {
        heap.insert(i, i).unwrap();
    }

    assert_eq!(heap.delete(&4).unwrap(), (4, 4));
    assert_eq!(heap.delete(&0).unwrap(), (0, 0));
    assert_eq!(heap.delete(&9).unwrap(), (9, 9));
    assert_eq!(heap.delete(&4).unwrap_err(), HeapError::UnknownValue);
    assert_eq!(heap.len(), 7);

    let keys: Vec<i32> = std::iter::from_fn(|| heap.extract_minimum().ok())
        .map(|(k, _)| k)
        .collect();
    assert_eq!(keys, vec![1, 2, 3, 5, 6, 7, 8]);
}

fn test_reinsert_after_removal<H: MinHeap<i32, &'static str>>() {
    let mut heap = H::new();
    heap.insert(5, "a").unwrap();
    heap.extract_minimum().unwrap();
    heap.insert(3, "a").unwrap();
    heap.delete(&"a").unwrap();
    heap.insert(1, "a").unwrap();
    assert_eq!(heap.minimum().unwrap(), (&1, &"a"));
}

fn test_merge_disjointness<H: MinHeap<i32, i32> + Mergeable<i32, i32>>() {
    let mut a = H::new();
    for i in 0..5 {
        a.insert(10 + i, i).unwrap();
    }
    let mut b = H::new();
    for i in 5..12 {
        b.insert(i, i).unwrap();
    }

    let merged = a.merge(b).unwrap();
    assert_eq!(merged.len(), 12);
    // Minimum of the union is the smaller of the two original minimums.
    assert_eq!(merged.minimum().unwrap(), (&5, &5));

    let mut c = H::new();
    c.insert(1, 100).unwrap();
    let mut d = H::new();
    d.insert(2, 100).unwrap();
    assert_eq!(c.merge(d).err(), Some(HeapError::DuplicateValue));
}

/// Drives a fixed insert/decrease-key/extract script and returns the
/// extracted values.
fn run_script<H: MinHeap<i32, u32>>() -> Vec<u32> {
    let mut heap = H::new();
    let mut out = Vec::new();

    for (key, value) in [(40, 1u32), (10, 2), (70, 3), (25, 4), (55, 5), (90, 6)] {
        heap.insert(key, value).unwrap();
    }
    out.push(heap.extract_minimum().unwrap().1);

    heap.decrease_key(&6, 5).unwrap();
    heap.decrease_key(&3, 30).unwrap();
    out.push(heap.extract_minimum().unwrap().1);

    heap.insert(15, 7).unwrap();
    heap.insert(60, 8).unwrap();
    heap.delete(&5).unwrap();
    heap.decrease_key(&8, 20).unwrap();

    while let Ok((_, value)) = heap.extract_minimum() {
        out.push(value);
    }
    out
}

#[test]
fn cross_implementation_equivalence() {
    let binary = run_script::<BinaryHeap<i32, u32>>();
    let binomial = run_script::<BinomialHeap<i32, u32>>();
    let fibonacci = run_script::<FibonacciHeap<i32, u32>>();

    assert_eq!(binary, vec![2, 6, 7, 8, 4, 3, 1]);
    assert_eq!(binary, binomial);
    assert_eq!(binary, fibonacci);
}

macro_rules! heap_tests {
    ($module:ident, $heap:ident) => {
        mod $module {
            use super::*;

            #[test]
            fn empty_heap() {
                test_empty_heap::<$heap<i32, String>>();
            }

            #[test]
            fn sorted_extraction() {
                test_sorted_extraction::<$heap<i32, &'static str>>();
            }

            #[test]
            fn size_conservation() {
                test_size_conservation::<$heap<i32, i32>>();
            }

            #[test]
            fn decrease_key_reordering() {
                test_decrease_key_reordering::<$heap<i32, &'static str>>();
            }

            #[test]
            fn strict_decrease_policy() {
                test_strict_decrease_policy::<$heap<i32, &'static str>>();
            }

            #[test]
            fn duplicate_rejection() {
                test_duplicate_rejection::<$heap<i32, &'static str>>();
            }

            #[test]
            fn delete() {
                test_delete::<$heap<i32, i32>>();
            }

            #[test]
            fn reinsert_after_removal() {
                test_reinsert_after_removal::<$heap<i32, &'static str>>();
            }
        }
    };
}

heap_tests!(binary, BinaryHeap);
heap_tests!(binomial, BinomialHeap);
heap_tests!(fibonacci, FibonacciHeap);

mod mergeable {
    use super::*;

    #[test]
    fn binomial_merge_disjointness() {
        test_merge_disjointness::<BinomialHeap<i32, i32>>();
    }

    #[test]
    fn fibonacci_merge_disjointness() {
        test_merge_disjointness::<FibonacciHeap<i32, i32>>();
    }
}
