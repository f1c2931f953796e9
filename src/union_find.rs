//! Union-find overlay for heap id resolution
//!
//! One disjoint-set leaf is registered per heap instance; melding two heaps
//! unites their leaves. A caller holding a heap id from before any number of
//! melds can then resolve it to the single surviving instance in near-O(1)
//! amortized time, without tracking merge history itself.
//!
//! Union is by set size; `find` compresses with iterative path halving (each
//! visited element is pointed at its grandparent), which reaches the
//! inverse-Ackermann amortized bound without recursion or a second pass.

/// A disjoint-set forest over dense `usize` ids.
#[derive(Debug, Clone, Default)]
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<u32>,
}

impl UnionFind {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a forest of `n` singleton sets.
    pub fn with_len(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    /// Number of elements ever registered.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Appends a new singleton set and returns its id.
    pub fn push(&mut self) -> usize {
        let id = self.parent.len();
        self.parent.push(id);
        self.size.push(1);
        id
    }

    /// Returns the representative of the set containing `x`, compressing the
    /// path by halving as it goes.
    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            let grandparent = self.parent[self.parent[x]];
            self.parent[x] = grandparent;
            x = grandparent;
        }
        x
    }

    /// Merges the sets containing `a` and `b` and returns the representative
    /// of the merged set.
    ///
    /// The larger set's root wins; on equal sizes the smaller id wins, so the
    /// representative is deterministic for any merge history.
    pub fn union(&mut self, a: usize, b: usize) -> usize {
        let mut root_a = self.find(a);
        let mut root_b = self.find(b);
        if root_a == root_b {
            return root_a;
        }
        if self.size[root_a] < self.size[root_b]
            || (self.size[root_a] == self.size[root_b] && root_b < root_a)
        {
            std::mem::swap(&mut root_a, &mut root_b);
        }
        self.parent[root_b] = root_a;
        self.size[root_a] += self.size[root_b];
        root_a
    }

    /// True if `a` and `b` are in the same set.
    pub fn same(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Size of the set containing `x`.
    pub fn set_size(&mut self, x: usize) -> usize {
        let root = self.find(x);
        self.size[root] as usize
    }

    /// Number of parent hops from `x` to its root, without compressing.
    /// Diagnostic only; used to observe compression effectiveness in tests.
    pub fn path_len(&self, mut x: usize) -> usize {
        let mut hops = 0;
        while self.parent[x] != x {
            x = self.parent[x];
            hops += 1;
        }
        hops
    }
}
