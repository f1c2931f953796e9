//! Heap registry and handle dispatch
//!
//! A [`HeapRegistry`] owns a shared [`NodeArena`], a collection of
//! [`HollowHeap`] instances indexed by [`HeapId`], and a [`UnionFind`]
//! overlay with one leaf per instance. Melding two heaps unites their
//! overlay leaves and links their forests; every handle-based entry point
//! resolves the given id through the overlay first, so a caller may keep
//! using an id from before any number of melds.
//!
//! Unlike the raw [`HollowHeap`] operations, the registry entry points check
//! their contracts and return [`HeapError`] instead of leaving precondition
//! violations undefined: empty-heap access, non-decreasing keys, stale
//! handles, and handles from a different meld component are all rejected
//! before anything is mutated.

use crate::arena::{NodeArena, NodeHandle};
use crate::error::HeapError;
use crate::hollow::HollowHeap;
use crate::union_find::UnionFind;

/// Identifier of a heap created by [`HeapRegistry::new_heap`].
///
/// Ids stay usable after melds: operations resolve them to the surviving
/// instance through the registry's union-find overlay. An id is only
/// meaningful with the registry that issued it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct HeapId(u32);

impl HeapId {
    /// Id of the first heap in a registry; also used by standalone
    /// [`HollowHeap`]s created outside any registry.
    pub(crate) const FIRST: HeapId = HeapId(0);

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A process-wide collection of meldable hollow heaps sharing one arena.
///
/// # Example
///
/// ```rust
/// use hollow_forest::HeapRegistry;
///
/// let mut forest: HeapRegistry<i32, &str> = HeapRegistry::new();
/// let a = forest.new_heap();
/// let b = forest.new_heap();
///
/// forest.push(a, 3, "three");
/// let five = forest.push(b, 5, "five");
/// forest.meld(a, b);
///
/// // Either original id now reaches the melded heap.
/// assert_eq!(forest.top(b), Ok((&3, &"three")));
/// let five = forest.decrease_key(a, five, 1).unwrap();
/// assert_eq!(forest.pop(a), Ok((1, "five")));
/// # let _ = five;
/// ```
#[derive(Debug)]
pub struct HeapRegistry<K: Ord, V> {
    arena: NodeArena<K, V>,
    heaps: Vec<HollowHeap>,
    overlay: UnionFind,
}

impl<K: Ord, V> HeapRegistry<K, V> {
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            heaps: Vec::new(),
            overlay: UnionFind::new(),
        }
    }

    /// Creates an empty heap and its union-find leaf.
    pub fn new_heap(&mut self) -> HeapId {
        let id = HeapId(self.heaps.len() as u32);
        self.heaps.push(HollowHeap::with_id(id));
        let leaf = self.overlay.push();
        debug_assert_eq!(leaf, id.index());
        id
    }

    /// Number of heap ids ever created (melds do not reduce it).
    pub fn heap_count(&self) -> usize {
        self.heaps.len()
    }

    /// Resolves `id` to the representative of its meld component, the id of
    /// the instance that currently owns its elements.
    pub fn resolve(&mut self, id: HeapId) -> HeapId {
        HeapId(self.overlay.find(id.index()) as u32)
    }

    /// Inserts an item, returning its handle. O(1).
    pub fn push(&mut self, id: HeapId, key: K, value: V) -> NodeHandle {
        let owner = self.resolve(id);
        self.heaps[owner.index()].push(&mut self.arena, key, value)
    }

    /// Minimum key and item of the heap `id` resolves to.
    pub fn top(&mut self, id: HeapId) -> Result<(&K, &V), HeapError> {
        let owner = self.resolve(id);
        self.heaps[owner.index()]
            .peek(&self.arena)
            .ok_or(HeapError::EmptyHeap)
    }

    /// Removes and returns the minimum. O(log n) amortized.
    pub fn pop(&mut self, id: HeapId) -> Result<(K, V), HeapError>
    where
        K: Clone,
    {
        let owner = self.resolve(id);
        self.heaps[owner.index()]
            .pop(&mut self.arena)
            .ok_or(HeapError::EmptyHeap)
    }

    /// Melds the two heaps and returns the surviving representative id.
    ///
    /// The overlay leaves are united (larger component wins), the loser's
    /// forest is linked into the winner in O(1), and the loser instance is
    /// left permanently empty. Melding a component with itself is a no-op.
    pub fn meld(&mut self, a: HeapId, b: HeapId) -> HeapId {
        let root_a = self.resolve(a);
        let root_b = self.resolve(b);
        if root_a == root_b {
            return root_a;
        }
        let winner = HeapId(self.overlay.union(root_a.index(), root_b.index()) as u32);
        let loser = if winner == root_a { root_b } else { root_a };
        let forest = self.heaps[loser.index()].take_forest();
        self.heaps[winner.index()].absorb(&mut self.arena, forest);
        winner
    }

    /// Decreases the key of the item at `handle`, returning the handle that
    /// now identifies it (a new one whenever the item was not at the root).
    ///
    /// # Errors
    ///
    /// [`HeapError::CrossHeapHandle`] if `handle` belongs to a different meld
    /// component, [`HeapError::StaleHandle`] if the node is hollow, and
    /// [`HeapError::KeyNotDecreased`] if `new_key` compares greater than the
    /// current key. An equal key is accepted.
    pub fn decrease_key(
        &mut self,
        id: HeapId,
        handle: NodeHandle,
        new_key: K,
    ) -> Result<NodeHandle, HeapError> {
        let owner = self.resolve(id);
        self.check_handle(owner, handle)?;
        if new_key > *self.arena[handle].key() {
            return Err(HeapError::KeyNotDecreased);
        }
        Ok(self.heaps[owner.index()].decrease_key(&mut self.arena, handle, new_key))
    }

    /// Deletes the item at `handle`, returning the new root handle (or `None`
    /// if the heap became empty). Deleting a non-root is O(1); the node is
    /// reclaimed lazily by a later root deletion.
    ///
    /// # Errors
    ///
    /// [`HeapError::CrossHeapHandle`] if `handle` belongs to a different meld
    /// component, [`HeapError::StaleHandle`] if it was already deleted or
    /// superseded.
    pub fn delete(
        &mut self,
        id: HeapId,
        handle: NodeHandle,
    ) -> Result<Option<NodeHandle>, HeapError> {
        let owner = self.resolve(id);
        self.check_handle(owner, handle)?;
        Ok(self.heaps[owner.index()].delete(&mut self.arena, handle))
    }

    /// Number of live items in the heap `id` resolves to.
    pub fn len(&mut self, id: HeapId) -> usize {
        let owner = self.resolve(id);
        self.heaps[owner.index()].len()
    }

    pub fn is_empty(&mut self, id: HeapId) -> bool {
        let owner = self.resolve(id);
        self.heaps[owner.index()].is_empty()
    }

    /// Live items plus hollow nodes awaiting reclamation in the heap `id`
    /// resolves to.
    pub fn node_count(&mut self, id: HeapId) -> usize {
        let owner = self.resolve(id);
        self.heaps[owner.index()].node_count()
    }

    /// Total arena slots ever allocated across all heaps.
    pub fn arena_len(&self) -> usize {
        self.arena.len()
    }

    fn check_handle(&mut self, owner: HeapId, handle: NodeHandle) -> Result<(), HeapError> {
        let stamped = self.arena[handle].owner;
        if self.overlay.find(stamped.index()) != owner.index() {
            return Err(HeapError::CrossHeapHandle);
        }
        if self.arena[handle].is_hollow() {
            return Err(HeapError::StaleHandle);
        }
        Ok(())
    }
}

impl<K: Ord, V> Default for HeapRegistry<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_heap_resolves_to_itself() {
        let mut forest: HeapRegistry<i32, ()> = HeapRegistry::new();
        let a = forest.new_heap();
        let b = forest.new_heap();
        assert_eq!(forest.heap_count(), 2);
        assert_eq!(forest.resolve(a), a);
        assert_eq!(forest.resolve(b), b);
        assert!(forest.is_empty(a));
        assert_eq!(forest.len(a), 0);
    }

    #[test]
    fn test_meld_routes_stale_ids() {
        let mut forest: HeapRegistry<i32, ()> = HeapRegistry::new();
        let a = forest.new_heap();
        let b = forest.new_heap();

        forest.push(a, 10, ());
        forest.push(b, 20, ());

        let survivor = forest.meld(a, b);
        assert_eq!(forest.resolve(a), survivor);
        assert_eq!(forest.resolve(b), survivor);
        assert_eq!(forest.len(a), 2);
        assert_eq!(forest.len(b), 2);

        // Pushing through either old id lands in the surviving heap.
        forest.push(b, 5, ());
        assert_eq!(forest.len(a), 3);
        assert_eq!(forest.top(a), Ok((&5, &())));
    }

    #[test]
    fn test_meld_with_self_is_noop() {
        let mut forest: HeapRegistry<i32, ()> = HeapRegistry::new();
        let a = forest.new_heap();
        forest.push(a, 1, ());
        assert_eq!(forest.meld(a, a), a);
        assert_eq!(forest.len(a), 1);
    }

    #[test]
    fn test_empty_heap_errors() {
        let mut forest: HeapRegistry<i32, ()> = HeapRegistry::new();
        let a = forest.new_heap();
        assert_eq!(forest.top(a), Err(HeapError::EmptyHeap));
        assert_eq!(forest.pop(a), Err(HeapError::EmptyHeap));
    }

    #[test]
    fn test_key_not_decreased() {
        let mut forest: HeapRegistry<i32, ()> = HeapRegistry::new();
        let a = forest.new_heap();
        let h = forest.push(a, 5, ());

        assert_eq!(forest.decrease_key(a, h, 6), Err(HeapError::KeyNotDecreased));
        // An equal key is within contract.
        assert_eq!(forest.decrease_key(a, h, 5), Ok(h));
        assert_eq!(forest.top(a), Ok((&5, &())));
    }

    #[test]
    fn test_stale_handle_after_decrease_key() {
        let mut forest: HeapRegistry<i32, ()> = HeapRegistry::new();
        let a = forest.new_heap();
        forest.push(a, 1, ());
        let h = forest.push(a, 10, ());

        let h2 = forest.decrease_key(a, h, 4).unwrap();
        assert_ne!(h, h2);
        assert_eq!(forest.decrease_key(a, h, 2), Err(HeapError::StaleHandle));
        assert_eq!(forest.delete(a, h), Err(HeapError::StaleHandle));
        // The replacement handle works.
        assert_eq!(forest.decrease_key(a, h2, 2).map(|_| ()), Ok(()));
    }

    #[test]
    fn test_cross_heap_handle_rejected_until_meld() {
        let mut forest: HeapRegistry<i32, ()> = HeapRegistry::new();
        let a = forest.new_heap();
        let b = forest.new_heap();

        let ha = forest.push(a, 3, ());
        forest.push(b, 7, ());

        assert_eq!(forest.decrease_key(b, ha, 1), Err(HeapError::CrossHeapHandle));
        assert_eq!(forest.delete(b, ha), Err(HeapError::CrossHeapHandle));

        // After melding, the components coincide and the handle is accepted.
        forest.meld(a, b);
        assert_eq!(forest.decrease_key(b, ha, 1).map(|_| ()), Ok(()));
        assert_eq!(forest.top(a), Ok((&1, &())));
    }

    #[test]
    fn test_delete_returns_new_root() {
        let mut forest: HeapRegistry<i32, ()> = HeapRegistry::new();
        let a = forest.new_heap();
        let h1 = forest.push(a, 1, ());
        let h2 = forest.push(a, 2, ());

        // Deleting a non-root reports the unchanged root.
        assert_eq!(forest.delete(a, h2), Ok(Some(h1)));
        // Deleting the last live node empties the heap.
        assert_eq!(forest.delete(a, h1), Ok(None));
        assert!(forest.is_empty(a));
    }
}
