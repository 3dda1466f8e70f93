//! Flat cluster assignments from a merge history.
//!
//! Cutting a history to `k` clusters means replaying its first `n - k`
//! merges. Labels are canonical: every point is labelled with the smallest
//! point index in its group, so two resolves of the same cut always agree
//! and `k = n` gives back the identity labelling.

use super::history::{MergeHistory, MergeRecord};
use super::union_find::UnionFind;
use crate::error::{Error, Result};

/// Replay `records` over `n_points` singletons and label each point.
pub(crate) fn replay<'a, I>(n_points: usize, records: I) -> Vec<usize>
where
    I: IntoIterator<Item = &'a MergeRecord>,
{
    let mut uf = UnionFind::new(n_points);
    for r in records {
        // Slot ids are member points, so a point-level union is exact.
        uf.union(r.cluster_a, r.cluster_b);
    }
    uf.min_labels()
}

/// Labels for the partition with exactly `n_clusters` groups.
///
/// Errors:
/// - [`Error::InvalidClusterCount`] if `n_clusters` is 0 or exceeds the point count
///   (except that an empty history resolves 0 clusters to an empty labelling).
/// - [`Error::InsufficientHistory`] if the history stops before reaching
///   `n_clusters` groups.
pub fn resolve(history: &MergeHistory, n_clusters: usize) -> Result<Vec<usize>> {
    let n = history.n_points();
    if n == 0 && n_clusters == 0 {
        return Ok(Vec::new());
    }
    if n_clusters == 0 || n_clusters > n {
        return Err(Error::InvalidClusterCount {
            requested: n_clusters,
            n_items: n,
        });
    }
    let min_clusters = history.min_clusters();
    if n_clusters < min_clusters {
        return Err(Error::InsufficientHistory {
            requested: n_clusters,
            min_clusters,
        });
    }

    let steps = n - n_clusters;
    tracing::trace!(n_points = n, n_clusters, steps, "resolving assignment");
    Ok(replay(n, history.records().iter().take(steps)))
}

/// Reusable resolver bound to one history.
#[derive(Debug, Clone, Copy)]
pub struct AssignmentResolver<'h> {
    history: &'h MergeHistory,
}

impl<'h> AssignmentResolver<'h> {
    /// Bind a resolver to `history`.
    pub fn new(history: &'h MergeHistory) -> Self {
        Self { history }
    }

    /// See [`resolve`].
    pub fn resolve(&self, n_clusters: usize) -> Result<Vec<usize>> {
        resolve(self.history, n_clusters)
    }

    /// Every reachable partition, finest first (`n` groups down to `min_clusters`).
    pub fn levels(&self) -> impl Iterator<Item = Vec<usize>> + 'h {
        let history = self.history;
        let n = history.n_points();
        (history.min_clusters()..=n)
            .rev()
            .filter(move |&k| k > 0)
            .map(move |k| replay(n, history.records().iter().take(n - k)))
    }

    /// Labels after the whole history.
    pub fn final_assignment(&self) -> Vec<usize> {
        self.history.final_assignment()
    }
}
