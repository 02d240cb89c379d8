//! Disjoint-set forest over outcome identities.
//!
//! Used to partition a universe into the atoms of a sigma-algebra: two
//! outcomes are merged whenever no event tells them apart.
//!
//! # Algorithm
//!
//! **Path halving** during `find` and **union by size** during `union`
//! give amortized O(α(n)) per operation, α being the inverse Ackermann
//! function.
//!
//! Reference: Tarjan & van Leeuwen (1984), "Worst-Case Analysis of Set
//! Union Algorithms", *JACM* 31(2).

/// Disjoint-set forest over `0..n`.
///
/// # Examples
/// ```
/// use u_probspace::collections::UnionFind;
///
/// let mut uf = UnionFind::new(4);
/// uf.union(0, 3);
/// assert!(uf.connected(0, 3));
/// assert!(!uf.connected(0, 1));
/// assert_eq!(uf.component_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
    components: usize,
}

impl UnionFind {
    /// `n` singleton sets `{0}, {1}, ..., {n-1}`.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            components: n,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// `true` if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Representative of the set holding `x`.
    ///
    /// # Panics
    /// Panics if `x >= len()`.
    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            let grandparent = self.parent[self.parent[x]];
            self.parent[x] = grandparent;
            x = grandparent;
        }
        x
    }

    /// Merges the sets holding `x` and `y`; the smaller tree goes under
    /// the larger root.
    ///
    /// Returns `false` if they were already one set.
    ///
    /// # Panics
    /// Panics if `x >= len()` or `y >= len()`.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let (mut big, mut small) = (self.find(x), self.find(y));
        if big == small {
            return false;
        }
        if self.size[big] < self.size[small] {
            std::mem::swap(&mut big, &mut small);
        }
        self.parent[small] = big;
        self.size[big] += self.size[small];
        self.components -= 1;
        true
    }

    /// `true` if `x` and `y` are in the same set.
    pub fn connected(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    /// Number of disjoint sets.
    pub fn component_count(&self) -> usize {
        self.components
    }

    /// Size of the set holding `x`.
    pub fn component_size(&mut self, x: usize) -> usize {
        let root = self.find(x);
        self.size[root]
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn component_sizes_sum_to_n(
            n in 1_usize..20,
            ops in proptest::collection::vec((0_usize..20, 0_usize..20), 0..40),
        ) {
            let mut uf = UnionFind::new(n);
            let mut expected = n;
            for &(x, y) in ops.iter().filter(|(x, y)| *x < n && *y < n) {
                if uf.union(x, y) {
                    expected -= 1;
                }
            }
            prop_assert_eq!(uf.component_count(), expected);
            let roots: Vec<usize> = (0..n).filter(|&i| uf.find(i) == i).collect();
            let total: usize = roots.iter().map(|&r| uf.component_size(r)).sum();
            prop_assert_eq!(total, n);
        }
    }
}
