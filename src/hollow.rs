//! Hollow Heap implementation
//!
//! A hollow heap is a simple data structure with the same amortized efficiency
//! as the classical Fibonacci heap, but without cascading cuts. Instead of
//! restructuring eagerly, deleted and superseded nodes are left in place as
//! "hollow" tombstones and reclaimed lazily by the next root deletion.
//!
//! # Time Complexity
//!
//! | Operation      | Complexity           |
//! |----------------|----------------------|
//! | `push`         | O(1) worst-case      |
//! | `pop`          | O(log n) amortized   |
//! | `peek`         | O(1) worst-case      |
//! | `decrease_key` | O(1) worst-case      |
//! | `delete`       | O(log n) amortized   |
//! | `meld`         | O(1) worst-case      |
//!
//! # Key Innovation
//!
//! 1. **Lazy deletion for decrease-key**: instead of cutting nodes, a new node
//!    with the lower key is created, the item moves to it, and the old node
//!    stays behind as a hollow placeholder preserving the tree shape the
//!    amortized analysis relies on.
//!
//! 2. **DAG structure**: a node hollowed by decrease-key has two parents, its
//!    original structural parent and the replacement node (`second_parent`).
//!    The delete sweep uses the `second_parent` identity to decide which of
//!    the two links is being dismantled.
//!
//! Nodes live in a [`NodeArena`] and are addressed by index, so hollow nodes
//! are safe to leave in place: the handle stays valid, the record is just
//! flagged.
//!
//! # References
//!
//! - Hansen, T.D., Kaplan, H., Tarjan, R.E., Zwick, U. (2015). "Hollow Heaps."
//!   *ICALP 2015*. [arXiv:1510.06535](https://arxiv.org/abs/1510.06535)
//! - Hansen, T.D., Kaplan, H., Tarjan, R.E., Zwick, U. (2017). "Hollow Heaps."
//!   *ACM Transactions on Algorithms*, 13(3), 42.

use crate::arena::{Node, NodeArena, NodeHandle};
use crate::registry::HeapId;
use smallvec::SmallVec;

/// Inline capacity of the rank-bucket scratch array. Ranks are bounded by
/// O(log n), so this covers heaps well past a million live nodes without
/// spilling to an allocation.
const INLINE_BUCKETS: usize = 24;

/// A single hollow heap instance.
///
/// The instance holds only structure (root handle, counters, and a scratch
/// array for the delete sweep); the nodes themselves live in a [`NodeArena`]
/// passed into every operation, so many heaps can share one arena and be
/// melded in O(1).
///
/// Operations here are the raw algorithm and state their preconditions as
/// debug assertions. For checked, error-returning entry points use
/// [`HeapRegistry`](crate::HeapRegistry), which also resolves heap ids across
/// melds.
///
/// # Example
///
/// ```rust
/// use hollow_forest::{HollowHeap, NodeArena};
///
/// let mut arena: NodeArena<i32, &str> = NodeArena::new();
/// let mut heap = HollowHeap::new();
///
/// heap.push(&mut arena, 3, "three");
/// let h = heap.push(&mut arena, 5, "five");
/// let _h = heap.decrease_key(&mut arena, h, 1);
/// assert_eq!(heap.peek(&arena), Some((&1, &"five")));
/// assert_eq!(heap.pop(&mut arena), Some((1, "five")));
/// ```
#[derive(Debug)]
pub struct HollowHeap {
    /// Id stamped onto nodes this heap allocates.
    id: HeapId,
    /// Root of the forest (None if empty). Never hollow between operations.
    root: Option<NodeHandle>,
    /// Rank-bucket scratch for the delete sweep. All entries are `None`
    /// outside a sweep; the array only grows.
    buckets: SmallVec<[Option<NodeHandle>; INLINE_BUCKETS]>,
    /// Live (non-hollow) nodes.
    live: usize,
    /// Live nodes plus hollow nodes not yet swept.
    total: usize,
}

impl HollowHeap {
    /// Creates an empty standalone heap.
    pub fn new() -> Self {
        Self::with_id(HeapId::FIRST)
    }

    pub(crate) fn with_id(id: HeapId) -> Self {
        Self {
            id,
            root: None,
            buckets: SmallVec::new(),
            live: 0,
            total: 0,
        }
    }

    /// The id stamped onto nodes allocated by this heap.
    pub fn id(&self) -> HeapId {
        self.id
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of live items.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Live items plus hollow nodes awaiting reclamation. The gap between
    /// this and [`len`](Self::len) is the deferred sweep work.
    pub fn node_count(&self) -> usize {
        self.total
    }

    /// Inserts an item, returning its handle. O(1) worst case.
    pub fn push<K: Ord, V>(
        &mut self,
        arena: &mut NodeArena<K, V>,
        key: K,
        value: V,
    ) -> NodeHandle {
        let node = arena.alloc(Node::new(key, Some(value), 0, self.id));
        self.root = Some(match self.root.take() {
            None => node,
            Some(root) => Self::link(arena, root, node),
        });
        self.live += 1;
        self.total += 1;
        node
    }

    /// Minimum key and item, or `None` if the heap is empty.
    pub fn peek<'a, K: Ord, V>(&self, arena: &'a NodeArena<K, V>) -> Option<(&'a K, &'a V)> {
        self.root.map(|root| {
            let node = &arena[root];
            let item = node.item.as_ref().expect("root is never hollow");
            (&node.key, item)
        })
    }

    /// Removes and returns the minimum. O(log n) amortized.
    pub fn pop<K: Ord + Clone, V>(&mut self, arena: &mut NodeArena<K, V>) -> Option<(K, V)> {
        let root = self.root?;
        let key = arena[root].key.clone();
        let item = arena[root].item.take().expect("root is never hollow");
        self.delete(arena, root);
        Some((key, item))
    }

    /// Melds `other` into this heap in O(1); `other` is left empty.
    ///
    /// Both heaps must allocate from the same arena. This does not touch any
    /// union-find overlay; id resolution across melds is the
    /// [`HeapRegistry`](crate::HeapRegistry)'s job.
    pub fn meld<K: Ord, V>(&mut self, arena: &mut NodeArena<K, V>, other: &mut HollowHeap) {
        let forest = other.take_forest();
        self.absorb(arena, forest);
    }

    /// Deletes the node at `handle`, returning the new root (or `None` if the
    /// heap became empty).
    ///
    /// Precondition (debug-checked): `handle` is live in this heap. Deleting
    /// a non-root is O(1); the node is merely flagged hollow and reclaimed by
    /// a later root deletion. Deleting the root runs the reclamation sweep.
    pub fn delete<K: Ord, V>(
        &mut self,
        arena: &mut NodeArena<K, V>,
        handle: NodeHandle,
    ) -> Option<NodeHandle> {
        debug_assert!(!arena[handle].is_hollow(), "delete of a hollow node");
        arena[handle].make_hollow();
        self.live -= 1;

        let root = self.root.expect("a live handle implies a non-empty heap");
        if !arena[root].is_hollow() {
            // Cleanup is deferred until this node's subtree is swept.
            return Some(root);
        }
        self.rebuild(arena, root)
    }

    /// Decreases the key of the node at `handle`, returning the handle that
    /// now identifies the item. O(1) worst case.
    ///
    /// Preconditions (debug-checked): `handle` is live in this heap and
    /// `new_key` does not compare greater than the current key.
    ///
    /// For a non-root node the item moves to a freshly allocated node and the
    /// returned handle differs from `handle`, which becomes stale.
    pub fn decrease_key<K: Ord, V>(
        &mut self,
        arena: &mut NodeArena<K, V>,
        handle: NodeHandle,
        new_key: K,
    ) -> NodeHandle {
        debug_assert!(!arena[handle].is_hollow(), "decrease_key of a hollow node");
        debug_assert!(new_key <= arena[handle].key, "key would increase");

        let root = self.root.expect("a live handle implies a non-empty heap");
        if handle == root {
            arena[handle].key = new_key;
            return handle;
        }

        // The rank discount uses the true prior rank, read before the node is
        // flagged hollow.
        let old_rank = arena[handle].rank;
        let item = arena[handle].item.take();
        arena[handle].make_hollow();

        let replacement = arena.alloc(Node::new(new_key, item, (old_rank - 2).max(0), self.id));
        // The old node keeps its place under its structural parent and also
        // becomes a child of the replacement; its `next` still threads through
        // the original sibling list.
        arena[replacement].child = Some(handle);
        arena[handle].second_parent = Some(replacement);
        self.total += 1;

        self.root = Some(Self::link(arena, replacement, root));
        replacement
    }

    /// Hands over this heap's forest and counters, leaving it empty.
    pub(crate) fn take_forest(&mut self) -> (Option<NodeHandle>, usize, usize) {
        let root = self.root.take();
        let live = std::mem::take(&mut self.live);
        let total = std::mem::take(&mut self.total);
        (root, live, total)
    }

    /// Links another heap's forest into this one.
    pub(crate) fn absorb<K: Ord, V>(
        &mut self,
        arena: &mut NodeArena<K, V>,
        (other_root, live, total): (Option<NodeHandle>, usize, usize),
    ) {
        self.root = match (self.root.take(), other_root) {
            (None, root) | (root, None) => root,
            (Some(a), Some(b)) => Some(Self::link(arena, a, b)),
        };
        self.live += live;
        self.total += total;
    }

    /// Reclamation sweep after the root went hollow.
    ///
    /// Hollow roots form a worklist threaded through their `next` pointers.
    /// Each live child met along the way goes through binomial-style carry
    /// linking in the rank buckets; each hollow child is either queued,
    /// dropped, or cut over to its second parent, depending on which of its
    /// parents is being dismantled.
    fn rebuild<K: Ord, V>(
        &mut self,
        arena: &mut NodeArena<K, V>,
        hollow_root: NodeHandle,
    ) -> Option<NodeHandle> {
        debug_assert!(arena[hollow_root].next.is_none(), "a root has no siblings");
        let mut hollow = Some(hollow_root);
        self.root = None;
        let mut max_rank = 0usize;

        while let Some(x) = hollow {
            hollow = arena[x].next;
            let mut w = arena[x].child.take();
            self.total -= 1;

            while let Some(u) = w {
                w = arena[u].next;
                if arena[u].is_hollow() {
                    match arena[u].second_parent {
                        None => {
                            // Hollowed by an earlier delete: its own children
                            // are dismantled next.
                            arena[u].next = hollow;
                            hollow = Some(u);
                        }
                        Some(second) if second == x => {
                            // x is u's second parent, which makes u the last
                            // child of x; u's remaining `next` links belong to
                            // its still-intact first parent, so the scan must
                            // stop here. u stays reachable through that first
                            // parent alone.
                            arena[u].second_parent = None;
                            w = None;
                        }
                        Some(_) => {
                            // The first parent is the one being dismantled;
                            // u survives as the last child of its second
                            // parent.
                            arena[u].next = None;
                            arena[u].second_parent = None;
                        }
                    }
                } else {
                    // Ranked link: carry through occupied buckets, gaining one
                    // rank per link, until a free bucket is found.
                    arena[u].next = None;
                    let mut u = u;
                    loop {
                        let rank = arena[u].rank as usize;
                        self.reserve_buckets(rank);
                        match self.buckets[rank].take() {
                            Some(occupant) => u = Self::ranked_link(arena, u, occupant),
                            None => {
                                self.buckets[rank] = Some(u);
                                max_rank = max_rank.max(rank);
                                break;
                            }
                        }
                    }
                }
            }
        }

        // Fold the survivors into a single tree, in increasing rank order.
        let mut new_root = None;
        for bucket in self.buckets.iter_mut().take(max_rank + 1) {
            if let Some(tree) = bucket.take() {
                new_root = Some(match new_root {
                    None => tree,
                    Some(root) => Self::link(arena, root, tree),
                });
            }
        }
        self.root = new_root;
        new_root
    }

    /// Grows the bucket array so `rank` is addressable. Doubling keeps the
    /// growth amortized against the links that raised the rank.
    fn reserve_buckets(&mut self, rank: usize) {
        if rank >= self.buckets.len() {
            let target = (self.buckets.len() * 2).max(rank + 1).max(4);
            self.buckets.resize(target, None);
        }
    }

    /// Comparator tournament; the loser becomes the head of the winner's
    /// child list. Equal keys go to `b`, so repeated equal-key linking is
    /// reproducible.
    fn link<K: Ord, V>(arena: &mut NodeArena<K, V>, a: NodeHandle, b: NodeHandle) -> NodeHandle {
        if arena[a].key < arena[b].key {
            Self::add_child(arena, a, b);
            a
        } else {
            Self::add_child(arena, b, a);
            b
        }
    }

    /// Link during the sweep's carry pass: the winner's rank increases by one.
    fn ranked_link<K: Ord, V>(
        arena: &mut NodeArena<K, V>,
        a: NodeHandle,
        b: NodeHandle,
    ) -> NodeHandle {
        debug_assert_eq!(arena[a].rank, arena[b].rank);
        let winner = Self::link(arena, a, b);
        arena[winner].rank += 1;
        winner
    }

    fn add_child<K, V>(arena: &mut NodeArena<K, V>, parent: NodeHandle, child: NodeHandle) {
        arena[child].next = arena[parent].child;
        arena[parent].child = Some(child);
    }
}

impl Default for HollowHeap {
    fn default() -> Self {
        Self::new()
    }
}
