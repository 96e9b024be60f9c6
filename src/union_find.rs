use crate::NodeId;

/// A disjoint-set forest over the dense ids `0..n` with union by rank and
/// full path compression.
#[derive(Clone, Debug)]
pub struct UnionFind {
    parent: Vec<NodeId>,
    rank: Vec<u32>,
}

impl UnionFind {
    /// Creates `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the root of the set containing `x`, pointing every node on the
    /// way directly at it.
    pub fn find(&mut self, x: NodeId) -> NodeId {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merges the sets containing `x` and `y`.  Returns false if they were
    /// already the same set.
    pub fn union(&mut self, x: NodeId, y: NodeId) -> bool {
        let (mut rx, mut ry) = (self.find(x), self.find(y));
        if rx == ry {
            return false;
        }
        if self.rank[rx] < self.rank[ry] {
            std::mem::swap(&mut rx, &mut ry);
        }
        self.parent[ry] = rx;
        if self.rank[rx] == self.rank[ry] {
            self.rank[rx] += 1;
        }
        true
    }

    /// Returns true if `x` and `y` are in the same set.
    pub fn connected(&mut self, x: NodeId, y: NodeId) -> bool {
        self.find(x) == self.find(y)
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn test_singletons() {
        let mut sets = UnionFind::new(3);
        assert_eq!(sets.len(), 3);
        for i in 0..3 {
            assert_eq!(sets.find(i), i);
        }
        assert!(!sets.connected(0, 1));
    }

    #[test]
    fn test_union_reports_merges() {
        let mut sets = UnionFind::new(4);
        assert!(sets.union(0, 1));
        assert!(sets.union(2, 3));
        assert!(!sets.union(1, 0));
        assert!(sets.union(1, 3));
        assert!(!sets.union(0, 2));
        assert!(sets.connected(0, 3));
    }

    #[test]
    fn test_path_compression() {
        let mut sets = UnionFind::new(5);
        sets.union(0, 1);
        sets.union(2, 3);
        sets.union(0, 2);
        sets.union(4, 0);
        let root = sets.find(3);
        assert!((0..5).all(|i| sets.parent[i] == root || i == root));
    }

    #[quickcheck]
    fn prop_find_terminates_at_self_parented_root(pairs: Vec<(u8, u8)>) -> bool {
        let n = 16;
        let mut sets = UnionFind::new(n);
        for (a, b) in pairs {
            sets.union(a as usize % n, b as usize % n);
        }
        (0..n).all(|i| {
            let root = sets.find(i);
            sets.parent[root] == root
        })
    }
}
