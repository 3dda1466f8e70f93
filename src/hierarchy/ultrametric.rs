//! Cophenetic distances of a merge history.
//!
//! The cophenetic distance between two points is the merge distance at which
//! they first share a cluster (the height of their lowest common ancestor in
//! the dendrogram). For single linkage it is the subdominant ultrametric of
//! the input distances:
//!
//! ```text
//! u(x, y) = min over paths x = v₀ … vₖ = y of max d(vᵢ, vᵢ₊₁)
//! ```
//!
//! and it satisfies the strong triangle inequality
//! `u(x, z) <= max(u(x, y), u(y, z))`.

use super::history::MergeHistory;
use crate::distance::DistanceOracle;

/// Condensed cophenetic distances for one history.
///
/// Pairs the history never joins (partial runs) are `f64::INFINITY`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cophenetic {
    n: usize,
    condensed: Vec<f64>,
}

impl Cophenetic {
    /// Compute from `history` in O(n²).
    pub fn from_history(history: &MergeHistory) -> Self {
        let n = history.n_points();
        let mut condensed = vec![f64::INFINITY; n * n.saturating_sub(1) / 2];
        let mut members: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();

        for r in history {
            let retired = std::mem::take(&mut members[r.cluster_b]);
            for &p in &members[r.cluster_a] {
                for &q in &retired {
                    condensed[condensed_index(n, p, q)] = r.distance;
                }
            }
            members[r.cluster_a].extend(retired);
        }

        Self { n, condensed }
    }

    /// Number of points.
    pub fn n_points(&self) -> usize {
        self.n
    }

    /// Condensed upper triangle, row-major.
    pub fn condensed(&self) -> &[f64] {
        &self.condensed
    }

    /// Cophenetic distance between points `i` and `j` (0 on the diagonal).
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if i == j {
            0.0
        } else {
            self.condensed[condensed_index(self.n, i, j)]
        }
    }

    /// Whether every triple satisfies the ultrametric inequality (O(n³)).
    pub fn is_ultrametric(&self) -> bool {
        let n = self.n;
        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    if self.get(i, k) > self.get(i, j).max(self.get(j, k)) {
                        return false;
                    }
                }
            }
        }
        true
    }
}

impl DistanceOracle for Cophenetic {
    fn distance(&self, i: usize, j: usize) -> f64 {
        self.get(i, j)
    }

    fn len(&self) -> Option<usize> {
        Some(self.n)
    }
}

/// Cophenetic distances of `history`.
pub fn cophenetic(history: &MergeHistory) -> Cophenetic {
    Cophenetic::from_history(history)
}

#[inline]
fn condensed_index(n: usize, a: usize, b: usize) -> usize {
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    lo * n - lo * (lo + 1) / 2 + (hi - lo - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lca_heights() {
        let mut h = MergeHistory::with_capacity(4);
        h.push(0, 1, 1.0, 2);
        h.push(2, 3, 2.0, 2);
        h.push(0, 2, 8.0, 4);
        let c = cophenetic(&h);
        assert_eq!(c.get(0, 1), 1.0);
        assert_eq!(c.get(3, 2), 2.0);
        assert_eq!(c.get(1, 3), 8.0);
        assert_eq!(c.get(2, 2), 0.0);
        assert!(c.is_ultrametric());
        assert_eq!(DistanceOracle::len(&c), Some(4));
    }

    #[test]
    fn test_partial_history_leaves_infinity() {
        let mut h = MergeHistory::with_capacity(3);
        h.push(0, 2, 0.5, 2);
        let c = cophenetic(&h);
        assert_eq!(c.get(0, 2), 0.5);
        assert_eq!(c.get(0, 1), f64::INFINITY);
        assert_eq!(c.condensed().len(), 3);
    }
}
