//! Meldable, addressable hollow heaps for Rust
//!
//! This crate provides a [hollow heap](https://arxiv.org/abs/1510.06535), a
//! priority queue with Fibonacci-heap-class amortized bounds but no cascading
//! cuts, together with a union-find overlay that keeps heap ids usable after
//! any sequence of melds.
//!
//! # Features
//!
//! - **O(1) worst-case** insert, decrease-key, and meld; **O(log n)
//!   amortized** delete and delete-min
//! - **Arena-index nodes**: handles are stable integers, hollow tombstones are
//!   flagged in place instead of freed, so there is no per-node lifetime
//!   management and no use-after-free hazard
//! - **Id resolution across melds**: a [`HeapRegistry`] resolves any heap id
//!   through a disjoint-set overlay to the instance that currently owns its
//!   elements, so callers never track merge history
//! - **Checked entry points**: the registry surfaces [`HeapError`] for
//!   empty-heap access, non-decreasing keys, stale handles, and cross-heap
//!   handles
//!
//! # Example
//!
//! ```rust
//! use hollow_forest::HeapRegistry;
//!
//! let mut forest: HeapRegistry<i32, &str> = HeapRegistry::new();
//! let a = forest.new_heap();
//! let h = forest.push(a, 5, "five");
//! forest.push(a, 3, "three");
//!
//! assert_eq!(forest.top(a), Ok((&3, &"three")));
//!
//! // A non-root decrease-key moves the item to a new node; the returned
//! // handle supersedes the old one.
//! let h = forest.decrease_key(a, h, 1).unwrap();
//! assert_eq!(forest.pop(a), Ok((1, "five")));
//! assert_eq!(forest.pop(a), Ok((3, "three")));
//! # let _ = h;
//! ```
//!
//! # Concurrency
//!
//! Everything here is single-threaded and synchronous. The arena and registry
//! are shared mutable state; wrap the registry in external synchronization if
//! it must cross threads. Memory is never returned to the allocator: hollow
//! nodes are abandoned in the arena, whose growth is bounded by the operation
//! count.

pub mod arena;
pub mod error;
pub mod hollow;
pub mod registry;
pub mod union_find;

pub use arena::{Node, NodeArena, NodeHandle};
pub use error::HeapError;
pub use hollow::HollowHeap;
pub use registry::{HeapId, HeapRegistry};
pub use union_find::UnionFind;
