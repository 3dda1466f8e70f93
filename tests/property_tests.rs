use proptest::prelude::*;
use strand::cluster::{DistanceMatrix, SingleLinkage};
use strand::hierarchy::{cophenetic, resolve, MergeHistory};
use strand::Precomputed;

/// Square table from a condensed upper triangle.
fn square(n: usize, condensed: &[u8]) -> Vec<Vec<f64>> {
    let mut rows = vec![vec![0.0; n]; n];
    let mut k = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            let d = f64::from(condensed[k]);
            rows[i][j] = d;
            rows[j][i] = d;
            k += 1;
        }
    }
    rows
}

/// Small integer distances so ties are common.
fn table() -> impl Strategy<Value = Vec<Vec<f64>>> {
    (1usize..12).prop_flat_map(|n| {
        prop::collection::vec(0u8..6, n * (n - 1) / 2).prop_map(move |c| square(n, &c))
    })
}

fn run(rows: &[Vec<f64>]) -> MergeHistory {
    let oracle = |i: usize, j: usize| rows[i][j];
    SingleLinkage::exhaustive(rows.len(), oracle)
        .and_then(|sl| sl.run())
        .unwrap()
}

proptest! {
    #[test]
    fn prop_every_cut_is_a_partition(rows in table()) {
        let n = rows.len();
        let history = run(&rows);
        prop_assert_eq!(history.merge_count(), n - 1);

        for k in 0..=history.merge_count() {
            let labels = resolve(&history, n - k).unwrap();
            prop_assert_eq!(labels.len(), n);

            let mut groups = labels.clone();
            groups.sort_unstable();
            groups.dedup();
            prop_assert_eq!(groups.len(), n - k);

            for (i, &l) in labels.iter().enumerate() {
                // Canonical label: smallest member of the group.
                prop_assert!(l <= i);
                prop_assert_eq!(labels[l], l);
            }
        }
    }

    #[test]
    fn prop_merges_touch_only_active_clusters(rows in table()) {
        let n = rows.len();
        let history = run(&rows);
        let mut active = vec![true; n];
        for (step, r) in history.iter().enumerate() {
            prop_assert_eq!(r.step, step);
            prop_assert!(r.cluster_a < r.cluster_b);
            prop_assert!(active[r.cluster_a] && active[r.cluster_b]);
            active[r.cluster_b] = false;
        }
        prop_assert_eq!(active.iter().filter(|&&a| a).count(), n - history.merge_count());
    }

    #[test]
    fn prop_runs_are_deterministic(rows in table()) {
        let first = run(&rows);
        let second = run(&rows);
        prop_assert_eq!(&first, &second);

        let pre = Precomputed::from_square(&rows).unwrap();
        let third = SingleLinkage::exhaustive(rows.len(), pre).unwrap().run().unwrap();
        prop_assert_eq!(&first, &third);
    }

    #[test]
    fn prop_update_is_min_of_merged_rows(rows in table()) {
        let n = rows.len();
        let oracle = |i: usize, j: usize| rows[i][j];
        let mut m = DistanceMatrix::build(n, &oracle).unwrap();

        while let Some((a, b, d)) = m.closest_pair() {
            let others: Vec<usize> =
                m.active_ids().iter().copied().filter(|&c| c != a && c != b).collect();
            let before: Vec<(f64, f64)> = others
                .iter()
                .map(|&c| (m.distance(a, c).unwrap(), m.distance(b, c).unwrap()))
                .collect();
            prop_assert_eq!(m.distance(a, b).unwrap(), d);

            m.merge_update(a, b).unwrap();
            prop_assert!(!m.is_active(b));
            for (&c, &(da, db)) in others.iter().zip(&before) {
                prop_assert_eq!(m.distance(a, c).unwrap(), da.min(db));
            }
        }
        prop_assert_eq!(m.active_count(), n.min(1));
    }

    #[test]
    fn prop_merge_distance_is_min_member_distance(rows in table()) {
        let n = rows.len();
        let history = run(&rows);
        let mut previous = 0.0;
        for (k, r) in history.iter().enumerate() {
            let labels = resolve(&history, n - k).unwrap();
            let mut best = f64::INFINITY;
            for p in (0..n).filter(|&p| labels[p] == r.cluster_a) {
                for q in (0..n).filter(|&q| labels[q] == r.cluster_b) {
                    best = best.min(rows[p][q]);
                }
            }
            prop_assert_eq!(r.distance, best);
            // Single linkage never produces an inversion.
            prop_assert!(r.distance >= previous);
            previous = r.distance;
        }
    }

    #[test]
    fn prop_cophenetic_is_subdominant_ultrametric(rows in table()) {
        let n = rows.len();
        let history = run(&rows);
        let c = cophenetic(&history);
        prop_assert!(c.is_ultrametric());
        for i in 0..n {
            for j in (i + 1)..n {
                prop_assert!(c.get(i, j) <= rows[i][j]);
            }
        }

        // Re-clustering the ultrametric reproduces the merge heights.
        let again = SingleLinkage::exhaustive(n, c.clone()).unwrap().run().unwrap();
        prop_assert_eq!(again.distances(), history.distances());
    }

    #[test]
    fn prop_records_rebuild(rows in table(), cut in 0usize..12) {
        let history = run(&rows);
        let keep = cut.min(history.merge_count());
        let prefix = history.records()[..keep].to_vec();
        let rebuilt = MergeHistory::from_records(rows.len(), prefix).unwrap();
        prop_assert_eq!(rebuilt.final_assignment(), resolve(&history, rows.len() - keep).unwrap());
    }
}
