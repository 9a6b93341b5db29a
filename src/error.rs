//! Error type shared by all heap variants.

use thiserror::Error;

/// Error type for heap operations.
///
/// Every mutating operation either fully completes or fails with one of
/// these before any change is observable; nothing is retried internally.
///
/// Non-numeric keys have no runtime variant: the [`Key`](crate::Key)
/// bound is only implemented for numeric types, so supplying one is a
/// compile-time error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// `minimum`, `extract_minimum`, or `delete` called on an empty heap.
    #[error("heap is empty")]
    Empty,
    /// Insert (or merge of overlapping heaps) with a value already tracked.
    #[error("value is already present in the heap")]
    DuplicateValue,
    /// `decrease_key` called with a key not strictly smaller than the current one.
    #[error("new key is not smaller than the current key")]
    KeyNotDecreased,
    /// `decrease_key` or `delete` referencing a value not in the heap.
    #[error("value is not present in the heap")]
    UnknownValue,
}
