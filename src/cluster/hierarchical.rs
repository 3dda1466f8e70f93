//! Single-linkage agglomerative clustering.
//!
//! Bottom-up: start with every point as its own cluster and repeatedly merge
//! the two closest clusters. Under single linkage the distance between two
//! clusters is the smallest distance between any of their members:
//!
//! ```text
//! D(A, B) = min { d(x, y) : x ∈ A, y ∈ B }
//! ```
//!
//! After merging `A` and `B` into `M`, distances to every other cluster `C`
//! follow the Lance–Williams rule for single linkage:
//!
//! ```text
//! D(M, C) = min(D(A, C), D(B, C))
//! ```
//!
//! so only one row of the distance matrix changes per merge.
//!
//! # Determinism
//!
//! The closest pair is found by a full scan in lexicographic `(a, b)` order,
//! keeping the first minimum. Equal distances therefore always resolve to the
//! smallest pair, and two runs over the same oracle yield identical
//! histories. A heap would be faster to query but would not preserve this
//! order without extra bookkeeping.
//!
//! # Cost
//!
//! - Matrix fill: `n(n-1)/2` oracle calls.
//! - Per merge: O(A²) scan over the `A` active clusters, O(A) update.
//! - Space: O(n²) for the condensed matrix.

use super::matrix::DistanceMatrix;
use super::traits::Clustering;
use crate::distance::{Canberra, DistanceOracle, Metric};
use crate::error::{Error, Result};
use crate::hierarchy::{resolve, MergeHistory};

/// Merge scheduler for single-linkage clustering over a distance oracle.
#[derive(Debug, Clone)]
pub struct SingleLinkage<O> {
    n_points: usize,
    oracle: O,
    max_merges: usize,
}

impl<O: DistanceOracle> SingleLinkage<O> {
    /// Cluster `n_points` points, performing at most `max_merges` merges.
    ///
    /// Fails with [`Error::InsufficientData`] for fewer than two points and
    /// [`Error::InvalidMergeCount`] unless `1 <= max_merges <= n_points - 1`.
    /// An oracle that knows its size must cover exactly `n_points` points
    /// ([`Error::DimensionMismatch`] otherwise).
    /// No distance is computed until [`run`](Self::run).
    pub fn new(n_points: usize, oracle: O, max_merges: usize) -> Result<Self> {
        check_merges(n_points, max_merges)?;
        check_oracle_len(n_points, &oracle)?;
        Ok(Self {
            n_points,
            oracle,
            max_merges,
        })
    }

    /// Merge all the way down to one cluster.
    ///
    /// Accepts any point count: 0 or 1 points yield an empty history.
    /// The oracle size is checked as in [`new`](Self::new).
    pub fn exhaustive(n_points: usize, oracle: O) -> Result<Self> {
        check_oracle_len(n_points, &oracle)?;
        Ok(Self::bounded(n_points, oracle, n_points.saturating_sub(1)))
    }

    pub(crate) fn bounded(n_points: usize, oracle: O, max_merges: usize) -> Self {
        Self {
            n_points,
            oracle,
            max_merges,
        }
    }

    /// Number of points.
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Merge bound.
    pub fn max_merges(&self) -> usize {
        self.max_merges
    }

    /// Change the merge bound (same rules as [`new`](Self::new)).
    pub fn set_max_merges(&mut self, max_merges: usize) -> Result<()> {
        check_merges(self.n_points, max_merges)?;
        self.max_merges = max_merges;
        Ok(())
    }

    /// The distance source.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Run the greedy merge loop and return the merge history.
    ///
    /// Stops after `max_merges` merges or when one cluster remains.
    pub fn run(&self) -> Result<MergeHistory> {
        let mut matrix = DistanceMatrix::build(self.n_points, &self.oracle)?;
        let mut history = MergeHistory::with_capacity(self.n_points);

        while history.merge_count() < self.max_merges {
            let Some((a, b, distance)) = matrix.closest_pair() else {
                break;
            };
            let size = matrix.cluster_size(a)? + matrix.cluster_size(b)?;
            matrix.merge_update(a, b)?;

            tracing::trace!(
                step = history.merge_count(),
                cluster_a = a,
                cluster_b = b,
                distance,
                size,
                "merged clusters"
            );
            history.push(a, b, distance, size);
        }

        tracing::debug!(
            n_points = self.n_points,
            merges = history.merge_count(),
            clusters = matrix.active_count(),
            last_distance = ?history.distances().last(),
            "single-linkage run complete"
        );
        Ok(history)
    }
}

fn check_merges(n_points: usize, max_merges: usize) -> Result<()> {
    if n_points < 2 {
        return Err(Error::InsufficientData { n_points });
    }
    let max = n_points - 1;
    if max_merges == 0 || max_merges > max {
        return Err(Error::InvalidMergeCount {
            requested: max_merges,
            max,
        });
    }
    Ok(())
}

fn check_oracle_len<O: DistanceOracle>(n_points: usize, oracle: &O) -> Result<()> {
    match oracle.len() {
        Some(found) if found != n_points => Err(Error::DimensionMismatch {
            expected: n_points,
            found,
        }),
        _ => Ok(()),
    }
}

/// Single-linkage clustering of feature vectors into a fixed number of groups.
#[derive(Debug, Clone)]
pub struct HierarchicalClustering<M = Canberra> {
    /// Number of clusters to produce.
    n_clusters: usize,
    metric: M,
}

impl HierarchicalClustering<Canberra> {
    /// Create a clusterer using the Canberra distance.
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            metric: Canberra,
        }
    }
}

impl<M: Metric> HierarchicalClustering<M> {
    /// Use a different point metric.
    pub fn with_metric<N: Metric>(self, metric: N) -> HierarchicalClustering<N> {
        HierarchicalClustering {
            n_clusters: self.n_clusters,
            metric,
        }
    }

    /// The point metric.
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Fit and return the merge history, stopped at `n_clusters` groups.
    pub fn fit_history(&self, data: &[Vec<f64>]) -> Result<MergeHistory> {
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }

        let n = data.len();
        if self.n_clusters == 0 || self.n_clusters > n {
            return Err(Error::InvalidClusterCount {
                requested: self.n_clusters,
                n_items: n,
            });
        }
        let d = data[0].len();
        if let Some(p) = data.iter().find(|p| p.len() != d) {
            return Err(Error::DimensionMismatch {
                expected: d,
                found: p.len(),
            });
        }

        let oracle = |i: usize, j: usize| self.metric.distance(&data[i], &data[j]);
        SingleLinkage::bounded(n, oracle, n - self.n_clusters).run()
    }
}

impl<M: Metric> Clustering for HierarchicalClustering<M> {
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>> {
        let history = self.fit_history(data)?;
        resolve(&history, self.n_clusters)
    }

    fn n_clusters(&self) -> usize {
        self.n_clusters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::FeatureDistance;
    use crate::kernel::{KernelDistance, SigmoidKernel};

    fn table_oracle(table: Vec<Vec<f64>>) -> impl Fn(usize, usize) -> f64 {
        move |i, j| table[i][j]
    }

    #[test]
    fn test_construction_checks() {
        let oracle = |_: usize, _: usize| 1.0;
        assert_eq!(
            SingleLinkage::new(1, oracle, 1).err(),
            Some(Error::InsufficientData { n_points: 1 })
        );
        assert_eq!(
            SingleLinkage::new(4, oracle, 0).err(),
            Some(Error::InvalidMergeCount {
                requested: 0,
                max: 3
            })
        );
        assert_eq!(
            SingleLinkage::new(4, oracle, 4).err(),
            Some(Error::InvalidMergeCount {
                requested: 4,
                max: 3
            })
        );

        let Ok(mut sl) = SingleLinkage::new(4, oracle, 2) else {
            panic!("valid configuration rejected");
        };
        assert_eq!(sl.max_merges(), 2);
        assert!(sl.set_max_merges(5).is_err());
        assert_eq!(sl.max_merges(), 2);
        sl.set_max_merges(3).unwrap();
        assert_eq!(sl.run().unwrap().merge_count(), 3);
    }

    #[test]
    fn test_construction_does_not_call_oracle() {
        let oracle = |_: usize, _: usize| -> f64 { panic!("oracle called") };
        let sl = SingleLinkage::new(3, oracle, 2).ok();
        assert_eq!(sl.map(|s| s.n_points()), Some(3));
    }

    #[test]
    fn test_four_point_scenario() {
        let oracle = table_oracle(vec![
            vec![0.0, 1.0, 9.0, 9.0],
            vec![1.0, 0.0, 8.0, 8.0],
            vec![9.0, 8.0, 0.0, 1.0],
            vec![9.0, 8.0, 1.0, 0.0],
        ]);
        let history = SingleLinkage::new(4, oracle, 3).ok().unwrap().run().unwrap();

        assert_eq!(history.cluster_pairs(), vec![(0, 1), (2, 3), (0, 2)]);
        assert_eq!(history.distances(), vec![1.0, 1.0, 8.0]);
        let sizes: Vec<_> = history.iter().map(|r| r.size).collect();
        assert_eq!(sizes, vec![2, 2, 4]);
        assert_eq!(resolve(&history, 2).unwrap(), vec![0, 0, 2, 2]);
    }

    #[test]
    fn test_merge_bound_respected() {
        let oracle = |i: usize, j: usize| (i as f64 - j as f64).abs();
        let history = SingleLinkage::new(6, oracle, 2).ok().unwrap().run().unwrap();
        assert_eq!(history.merge_count(), 2);
        assert_eq!(history.min_clusters(), 4);
    }

    #[test]
    fn test_exhaustive_trivial_sizes() {
        let oracle = |_: usize, _: usize| 1.0;
        let run = |n: usize| SingleLinkage::exhaustive(n, oracle).and_then(|sl| sl.run());
        let h0 = run(0).unwrap();
        assert!(h0.is_empty());
        let h1 = run(1).unwrap();
        assert!(h1.is_empty());
        assert_eq!(h1.final_assignment(), vec![0]);
        let h2 = run(2).unwrap();
        assert_eq!(h2.cluster_pairs(), vec![(0, 1)]);
    }

    #[test]
    fn test_invalid_distance_aborts() {
        let oracle = |i: usize, j: usize| if i + j == 3 { f64::NAN } else { 1.0 };
        let err = SingleLinkage::exhaustive(4, oracle)
            .and_then(|sl| sl.run())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDistance { i: 0, j: 3, .. }));
    }

    #[test]
    fn test_oracle_size_must_match() {
        let two = FeatureDistance::new(vec![vec![1.0], vec![2.0]], Canberra).unwrap();
        assert_eq!(
            SingleLinkage::new(4, two.clone(), 3).err(),
            Some(Error::DimensionMismatch {
                expected: 4,
                found: 2
            })
        );
        assert!(matches!(
            SingleLinkage::exhaustive(3, two.clone()),
            Err(Error::DimensionMismatch {
                expected: 3,
                found: 2
            })
        ));
        let history = SingleLinkage::exhaustive(2, two).unwrap().run().unwrap();
        assert_eq!(history.cluster_pairs(), vec![(0, 1)]);
    }

    #[test]
    fn test_hierarchical_basic() {
        let data = vec![
            vec![1.0, 1.0],
            vec![1.1, 1.0],
            vec![-5.0, 4.0],
            vec![-5.2, 4.1],
        ];

        let hc = HierarchicalClustering::new(2);
        let labels = hc.fit_predict(&data).unwrap();

        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[2], labels[3]);
        assert_ne!(labels[0], labels[2]);
        assert_eq!(hc.n_clusters(), 2);
    }

    #[test]
    fn test_hierarchical_with_kernel_metric() {
        let data = vec![
            vec![0.1, 0.0],
            vec![0.12, 0.01],
            vec![0.9, 0.8],
            vec![0.91, 0.82],
        ];
        let metric = KernelDistance::new(SigmoidKernel::new(0.5, 0.0).unwrap());
        let labels = HierarchicalClustering::new(2)
            .with_metric(metric)
            .fit_predict(&data)
            .unwrap();
        assert_eq!(labels, vec![0, 0, 2, 2]);
    }

    #[test]
    fn test_hierarchical_input_errors() {
        let hc = HierarchicalClustering::new(2);
        assert_eq!(hc.fit_predict(&[]).unwrap_err(), Error::EmptyInput);
        assert!(matches!(
            hc.fit_predict(&[vec![1.0]]),
            Err(Error::InvalidClusterCount { .. })
        ));
        assert!(matches!(
            hc.fit_predict(&[vec![1.0], vec![1.0, 2.0]]),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_fit_history_stops_at_target() {
        let data: Vec<Vec<f64>> = (1..=5).map(|i| vec![i as f64]).collect();
        let h = HierarchicalClustering::new(3).fit_history(&data).unwrap();
        assert_eq!(h.merge_count(), 2);
        let all = HierarchicalClustering::new(5).fit_history(&data).unwrap();
        assert!(all.is_empty());
    }
}
