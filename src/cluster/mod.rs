//! Agglomerative single-linkage clustering.
//!
//! ## Pipeline
//!
//! ```text
//! DistanceOracle ──► DistanceMatrix ──► SingleLinkage::run ──► MergeHistory ──► resolve
//!  d(i, j)            n(n-1)/2 cells     closest pair, merge     ordered merges    labels
//! ```
//!
//! [`SingleLinkage`] works on anything that can answer "how far is point `i`
//! from point `j`". [`HierarchicalClustering`] is the convenience front end
//! for plain feature vectors and a [`Metric`](crate::distance::Metric).
//!
//! ## Single linkage
//!
//! | Property | Value |
//! |----------|-------|
//! | Cluster distance | min over member pairs |
//! | Update rule | `D(A∪B, C) = min(D(A,C), D(B,C))` |
//! | Typical shape | chains, elongated clusters |
//! | Equivalent to | cutting the minimum spanning tree |
//!
//! ## Usage
//!
//! ```rust
//! use strand::cluster::{Clustering, HierarchicalClustering, SingleLinkage};
//! use strand::hierarchy::resolve;
//!
//! let data = vec![
//!     vec![1.0, 1.0],
//!     vec![1.1, 1.0],
//!     vec![-5.0, 4.0],
//!     vec![-5.2, 4.1],
//! ];
//! let labels = HierarchicalClustering::new(2).fit_predict(&data).unwrap();
//! assert_eq!(labels, vec![0, 0, 2, 2]);
//!
//! // Any symmetric distance function works.
//! let history = SingleLinkage::exhaustive(4, |i: usize, j: usize| (i as f64 - j as f64).abs())
//!     .and_then(|sl| sl.run())
//!     .unwrap();
//! assert_eq!(history.merge_count(), 3);
//! assert_eq!(resolve(&history, 1).unwrap(), vec![0, 0, 0, 0]);
//! ```

mod hierarchical;
mod matrix;
mod traits;

pub use hierarchical::{HierarchicalClustering, SingleLinkage};
pub use matrix::DistanceMatrix;
pub use traits::Clustering;
