//! # strand
//!
//! Single-linkage agglomerative clustering over pluggable pairwise distances.
//!
//! - [`distance`]: the [`DistanceOracle`] capability plus Canberra distance and adapters.
//! - [`kernel`]: similarity kernels (sigmoid) and the distance they induce.
//! - [`cluster`]: the distance matrix and the greedy merge scheduler.
//! - [`hierarchy`]: merge histories, flat assignments, cophenetic distances.
//!
//! The library logs through `tracing` and installs no subscriber.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod distance;
/// Error types used across `strand`.
pub mod error;
pub mod hierarchy;
pub mod kernel;

pub use cluster::{Clustering, DistanceMatrix, HierarchicalClustering, SingleLinkage};
pub use distance::{canberra, Canberra, DistanceOracle, FeatureDistance, Metric, Precomputed};
pub use error::{Error, Result};
pub use hierarchy::{
    cophenetic, resolve, AssignmentResolver, Cophenetic, MergeHistory, MergeRecord,
};
pub use kernel::{sigmoid, Kernel, KernelDistance, SigmoidKernel};
