//! Append-only node arena
//!
//! All heap nodes live in a single [`NodeArena`] addressed by [`NodeHandle`],
//! an integer index. Slots are never freed or reused: a deleted or superseded
//! node is flagged *hollow* in place, so an outstanding handle stays valid for
//! the lifetime of the arena even after the node it names has logically left
//! the heap. Each insert or non-root decrease-key allocates at most one node,
//! so the arena grows no faster than the operation count.

use crate::registry::HeapId;

/// Rank value marking a node as hollow. Live nodes have non-negative rank.
pub(crate) const HOLLOW_RANK: i32 = -1;

/// Handle to a node in a [`NodeArena`].
///
/// Handles are plain indices: cheap to copy, stable across every heap
/// operation including melds. A handle is only meaningful with the arena
/// (or [`HeapRegistry`](crate::HeapRegistry)) that issued it; indexing a
/// different arena with it is a logic error.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeHandle(u32);

impl NodeHandle {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A heap node record.
///
/// Forms a singly linked child/sibling structure. A node hollowed by a
/// decrease-key additionally carries a `second_parent` back-reference to the
/// replacement node, turning the forest into a DAG until the next delete
/// sweep untangles it. Both parent references are plain indices with a
/// precedence rule applied during the sweep, not ownership.
#[derive(Debug)]
pub struct Node<K, V> {
    /// Ordering key. Stale (never compared) once the node is hollow.
    pub(crate) key: K,
    /// Payload; taken out when the node goes hollow.
    pub(crate) item: Option<V>,
    /// Non-negative for live nodes, [`HOLLOW_RANK`] once hollow.
    pub(crate) rank: i32,
    /// First child.
    pub(crate) child: Option<NodeHandle>,
    /// Next sibling; reused as the worklist pointer during a delete sweep.
    pub(crate) next: Option<NodeHandle>,
    /// Replacement node, set only when hollowed by decrease-key.
    pub(crate) second_parent: Option<NodeHandle>,
    /// Heap that allocated this node, for the cross-heap handle check.
    pub(crate) owner: HeapId,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, item: Option<V>, rank: i32, owner: HeapId) -> Self {
        Node {
            key,
            item,
            rank,
            child: None,
            next: None,
            second_parent: None,
            owner,
        }
    }

    /// Returns true if this node has been deleted or superseded.
    #[inline]
    pub fn is_hollow(&self) -> bool {
        self.rank < 0
    }

    /// The node's key. For a hollow node this is the key it held when last
    /// live; it takes no part in any comparison.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The node's payload, `None` once the node is hollow.
    #[inline]
    pub fn value(&self) -> Option<&V> {
        self.item.as_ref()
    }

    /// Flags the node hollow and drops its payload. The slot itself stays in
    /// the arena; a later delete sweep forgets it structurally.
    pub(crate) fn make_hollow(&mut self) {
        self.rank = HOLLOW_RANK;
        self.item = None;
    }
}

/// Append-only storage for heap nodes.
///
/// The arena is owned by a top-level context (normally a
/// [`HeapRegistry`](crate::HeapRegistry)) and passed into heap operations, so
/// independent heap/arena pairs can coexist without sharing state.
#[derive(Debug)]
pub struct NodeArena<K, V> {
    nodes: Vec<Node<K, V>>,
}

impl<K, V> NodeArena<K, V> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Total number of allocated slots, live and hollow alike.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends a node and returns its permanent handle.
    pub(crate) fn alloc(&mut self, node: Node<K, V>) -> NodeHandle {
        assert!(
            self.nodes.len() < u32::MAX as usize,
            "node arena exhausted u32 handle space"
        );
        let handle = NodeHandle(self.nodes.len() as u32);
        self.nodes.push(node);
        handle
    }
}

impl<K, V> Default for NodeArena<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> std::ops::Index<NodeHandle> for NodeArena<K, V> {
    type Output = Node<K, V>;

    #[inline]
    fn index(&self, handle: NodeHandle) -> &Node<K, V> {
        &self.nodes[handle.index()]
    }
}

impl<K, V> std::ops::IndexMut<NodeHandle> for NodeArena<K, V> {
    #[inline]
    fn index_mut(&mut self, handle: NodeHandle) -> &mut Node<K, V> {
        &mut self.nodes[handle.index()]
    }
}
