//! Condensed inter-cluster distance matrix with in-place single-linkage updates.
//!
//! Storage is the upper triangle in row-major order (length `n(n-1)/2`),
//! the same layout SciPy and kodama call a "condensed" matrix. Each of the `n`
//! slots starts as a singleton cluster; merging retires one slot and rewrites
//! one row/column of the surviving slot, so a merge costs O(n) and never
//! touches the rest of the table.

use crate::distance::DistanceOracle;
use crate::error::{Error, Result};

/// Pairwise distances between the currently active clusters.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    n: usize,
    condensed: Vec<f64>,
    active: Vec<bool>,
    // Active slot ids in ascending order; drives the lexicographic scan.
    active_ids: Vec<usize>,
    sizes: Vec<usize>,
}

impl DistanceMatrix {
    /// Fill the matrix for `n` points, calling `oracle` once per unordered pair.
    ///
    /// Fails with [`Error::InvalidDistance`] on the first negative or
    /// non-finite value; no partially built matrix escapes.
    pub fn build<O>(n: usize, oracle: &O) -> Result<Self>
    where
        O: DistanceOracle + ?Sized,
    {
        let pairs = n * n.saturating_sub(1) / 2;
        let mut condensed = Vec::with_capacity(pairs);
        for i in 0..n.saturating_sub(1) {
            for j in (i + 1)..n {
                let value = oracle.distance(i, j);
                if !value.is_finite() || value < 0.0 {
                    return Err(Error::InvalidDistance { i, j, value });
                }
                condensed.push(value);
            }
        }
        tracing::debug!(n_points = n, pairs, "distance matrix built");

        Ok(Self {
            n,
            condensed,
            active: vec![true; n],
            active_ids: (0..n).collect(),
            sizes: vec![1; n],
        })
    }

    /// Number of original points (slots).
    pub fn n_points(&self) -> usize {
        self.n
    }

    /// Number of clusters still active.
    pub fn active_count(&self) -> usize {
        self.active_ids.len()
    }

    /// Whether slot `id` holds an active cluster.
    pub fn is_active(&self, id: usize) -> bool {
        self.active.get(id).copied().unwrap_or(false)
    }

    /// Active slot ids, ascending.
    pub fn active_ids(&self) -> &[usize] {
        &self.active_ids
    }

    /// Number of points in the cluster at slot `id`.
    pub fn cluster_size(&self, id: usize) -> Result<usize> {
        self.check_active(id)?;
        Ok(self.sizes[id])
    }

    /// Current distance between two distinct active clusters.
    pub fn distance(&self, a: usize, b: usize) -> Result<f64> {
        self.check_active(a)?;
        self.check_active(b)?;
        if a == b {
            return Err(Error::InvalidCluster { id: a });
        }
        Ok(self.condensed[self.index(a, b)])
    }

    /// Closest pair of active clusters as `(a, b, distance)` with `a < b`.
    ///
    /// Ties resolve to the lexicographically smallest `(a, b)`: the scan runs
    /// in that order and only a strictly smaller distance replaces the best.
    /// Returns `None` when fewer than two clusters are active.
    pub fn closest_pair(&self) -> Option<(usize, usize, f64)> {
        let mut best: Option<(usize, usize, f64)> = None;
        for (pos, &a) in self.active_ids.iter().enumerate() {
            let row = self.row_offset(a);
            for &b in &self.active_ids[pos + 1..] {
                let d = self.condensed[row + (b - a - 1)];
                if best.map_or(true, |(_, _, bd)| d < bd) {
                    best = Some((a, b, d));
                }
            }
        }
        best
    }

    /// Merge cluster `retire` into cluster `keep`.
    ///
    /// For every other active cluster `c`:
    /// `D(keep, c) = min(D(keep, c), D(retire, c))`. The `retire` slot is
    /// deactivated. Both ids are validated before anything is written.
    pub fn merge_update(&mut self, keep: usize, retire: usize) -> Result<()> {
        self.check_active(keep)?;
        self.check_active(retire)?;
        if keep == retire {
            return Err(Error::InvalidCluster { id: retire });
        }

        for &c in &self.active_ids {
            if c == keep || c == retire {
                continue;
            }
            let kc = self.index(keep, c);
            let rc = self.index(retire, c);
            if self.condensed[rc] < self.condensed[kc] {
                self.condensed[kc] = self.condensed[rc];
            }
        }

        self.active[retire] = false;
        if let Ok(pos) = self.active_ids.binary_search(&retire) {
            self.active_ids.remove(pos);
        }
        self.sizes[keep] += self.sizes[retire];
        Ok(())
    }

    fn check_active(&self, id: usize) -> Result<()> {
        if self.is_active(id) {
            Ok(())
        } else {
            Err(Error::InvalidCluster { id })
        }
    }

    /// Start of row `a` in the condensed layout.
    #[inline]
    fn row_offset(&self, a: usize) -> usize {
        a * self.n - a * (a + 1) / 2
    }

    #[inline]
    fn index(&self, a: usize, b: usize) -> usize {
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        self.row_offset(lo) + (hi - lo - 1)
    }
}
