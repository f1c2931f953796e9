//! Error type for heap operations

use std::fmt;

/// Error type for heap operations.
///
/// The underlying algorithm treats all of these as contract violations; the
/// registry entry points check for them explicitly instead of leaving the
/// behavior undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// `top` or `pop` was called on an empty heap.
    EmptyHeap,
    /// The new key compares greater than the element's current key.
    KeyNotDecreased,
    /// The handle names a hollow node (already deleted, or superseded by an
    /// earlier decrease-key that returned a replacement handle).
    StaleHandle,
    /// The handle belongs to a heap outside the target heap's meld component.
    CrossHeapHandle,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::EmptyHeap => write!(f, "heap is empty"),
            HeapError::KeyNotDecreased => {
                write!(f, "new key compares greater than the current key")
            }
            HeapError::StaleHandle => {
                write!(f, "handle is stale (element was removed or superseded)")
            }
            HeapError::CrossHeapHandle => {
                write!(f, "handle belongs to a different heap")
            }
        }
    }
}

impl std::error::Error for HeapError {}
