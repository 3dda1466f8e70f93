//! Merge history: the flat encoding of a single-linkage dendrogram.
//!
//! Each record names the two cluster slots that merged. A cluster's slot id
//! is always the smallest point it contains (the lower slot survives a merge),
//! so record ids double as representative points when replaying.

use super::resolve::replay;
use crate::error::{Error, Result};

/// A single merge step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergeRecord {
    /// Surviving cluster slot (the smaller id).
    pub cluster_a: usize,
    /// Retired cluster slot.
    pub cluster_b: usize,
    /// Inter-cluster distance at which the merge happened.
    pub distance: f64,
    /// Zero-based position in the history.
    pub step: usize,
    /// Number of points in the merged cluster.
    pub size: usize,
}

/// Ordered log of merges produced by one clustering run.
///
/// Deserialization goes through [`MergeHistory::from_records`], so a decoded
/// history satisfies the same invariants as one produced by a run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawMergeHistory"))]
pub struct MergeHistory {
    n_points: usize,
    records: Vec<MergeRecord>,
}

/// Wire shape of [`MergeHistory`] before validation.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawMergeHistory {
    n_points: usize,
    records: Vec<MergeRecord>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMergeHistory> for MergeHistory {
    type Error = Error;

    fn try_from(raw: RawMergeHistory) -> Result<Self> {
        Self::from_records(raw.n_points, raw.records)
    }
}

impl MergeHistory {
    /// Empty history for `n_points` singletons, sized for a full run.
    pub(crate) fn with_capacity(n_points: usize) -> Self {
        Self {
            n_points,
            records: Vec::with_capacity(n_points.saturating_sub(1)),
        }
    }

    pub(crate) fn push(&mut self, cluster_a: usize, cluster_b: usize, distance: f64, size: usize) {
        let step = self.records.len();
        self.records.push(MergeRecord {
            cluster_a,
            cluster_b,
            distance,
            step,
            size,
        });
    }

    /// Rebuild a history from records, checking that it can be replayed.
    ///
    /// Every record must merge two active slots `a < b` (retiring `b`), carry
    /// its position as `step`, report the combined size, and have a finite,
    /// non-negative distance.
    pub fn from_records(n_points: usize, records: Vec<MergeRecord>) -> Result<Self> {
        let mut active = vec![true; n_points];
        let mut sizes = vec![1usize; n_points];

        for (k, r) in records.iter().enumerate() {
            for id in [r.cluster_a, r.cluster_b] {
                if !active.get(id).copied().unwrap_or(false) {
                    return Err(Error::InvalidCluster { id });
                }
            }
            if r.cluster_a >= r.cluster_b {
                return Err(Error::InvalidParameter {
                    name: "records",
                    message: "cluster_a must be smaller than cluster_b",
                });
            }
            if r.step != k {
                return Err(Error::InvalidParameter {
                    name: "records",
                    message: "steps must be consecutive from 0",
                });
            }
            if !r.distance.is_finite() || r.distance < 0.0 {
                return Err(Error::InvalidDistance {
                    i: r.cluster_a,
                    j: r.cluster_b,
                    value: r.distance,
                });
            }
            let size = sizes[r.cluster_a] + sizes[r.cluster_b];
            if r.size != size {
                return Err(Error::InvalidParameter {
                    name: "records",
                    message: "size does not match the merged clusters",
                });
            }
            sizes[r.cluster_a] = size;
            active[r.cluster_b] = false;
        }

        Ok(Self { n_points, records })
    }

    /// Number of original points.
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Number of merges recorded.
    pub fn merge_count(&self) -> usize {
        self.records.len()
    }

    /// Whether no merge was recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The merge at step `k`.
    pub fn merge_at(&self, k: usize) -> Option<&MergeRecord> {
        self.records.get(k)
    }

    /// All records in step order.
    pub fn records(&self) -> &[MergeRecord] {
        &self.records
    }

    /// Iterate over records in step order.
    pub fn iter(&self) -> impl Iterator<Item = &MergeRecord> {
        self.records.iter()
    }

    /// Merge distances in step order.
    pub fn distances(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.distance).collect()
    }

    /// Merged `(a, b)` slot pairs in step order.
    pub fn cluster_pairs(&self) -> Vec<(usize, usize)> {
        self.records
            .iter()
            .map(|r| (r.cluster_a, r.cluster_b))
            .collect()
    }

    /// Fewest clusters reachable by replaying the whole history.
    pub fn min_clusters(&self) -> usize {
        self.n_points - self.records.len()
    }

    /// Point labels after replaying every recorded merge.
    pub fn final_assignment(&self) -> Vec<usize> {
        replay(self.n_points, self.records.iter())
    }

    /// Point labels after replaying only merges at distance `<= threshold`.
    pub fn cut_at_distance(&self, threshold: f64) -> Vec<usize> {
        replay(
            self.n_points,
            self.records.iter().filter(|r| r.distance <= threshold),
        )
    }
}

impl<'a> IntoIterator for &'a MergeHistory {
    type Item = &'a MergeRecord;
    type IntoIter = std::slice::Iter<'a, MergeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
