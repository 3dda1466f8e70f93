//! Similarity kernels and their use as distances.
//!
//! A kernel `k(a, b)` measures similarity: larger means closer. The
//! clustering core wants a distance, so [`KernelDistance`] converts a kernel
//! into the distance it induces in feature space:
//!
//! ```text
//! d(a, b)² = k(a, a) + k(b, b) - 2 k(a, b)
//! ```
//!
//! For positive semi-definite kernels the right-hand side is never negative.
//! Indefinite kernels (the sigmoid kernel is one for most parameter choices)
//! can produce small negative values; those are clamped to zero so the
//! result stays a valid input for [`crate::cluster::DistanceMatrix`].

mod sigmoid;

pub use sigmoid::{sigmoid, SigmoidKernel};

use crate::distance::Metric;

/// A similarity function over two equal-length feature vectors.
pub trait Kernel {
    /// Similarity between `a` and `b`.
    fn similarity(&self, a: &[f64], b: &[f64]) -> f64;
}

impl<K: Kernel + ?Sized> Kernel for &K {
    fn similarity(&self, a: &[f64], b: &[f64]) -> f64 {
        (**self).similarity(a, b)
    }
}

/// Kernel-induced feature-space distance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KernelDistance<K> {
    kernel: K,
}

impl<K: Kernel> KernelDistance<K> {
    /// Wrap `kernel`.
    pub fn new(kernel: K) -> Self {
        Self { kernel }
    }

    /// The wrapped kernel.
    pub fn kernel(&self) -> &K {
        &self.kernel
    }
}

impl<K: Kernel> Metric for KernelDistance<K> {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        let kaa = self.kernel.similarity(a, a);
        let kbb = self.kernel.similarity(b, b);
        let kab = self.kernel.similarity(a, b);
        (kaa + kbb - 2.0 * kab).max(0.0).sqrt()
    }
}

#[inline]
pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
