//! Pairwise distance sources.
//!
//! The clustering core consumes exactly one capability: the distance between
//! point `i` and point `j`. That capability is [`DistanceOracle`]. Everything
//! else in this module adapts concrete data into an oracle:
//!
//! | Source | Oracle |
//! |--------|--------|
//! | Feature vectors + [`Metric`] | [`FeatureDistance`] |
//! | Square distance table | [`Precomputed`] |
//! | Any `Fn(usize, usize) -> f64` | blanket impl |
//!
//! ## Contract
//!
//! An oracle must be symmetric, total over `0..n`, and pure: calling it in any
//! order returns the same values. Non-negativity and finiteness are checked by
//! the consumer ([`crate::cluster::DistanceMatrix::build`]), not here.

mod canberra;

pub use canberra::{canberra, Canberra};

use crate::error::{Error, Result};

#[cfg(feature = "ndarray")]
use ndarray::ArrayView2;

/// Distance between two indexed points.
pub trait DistanceOracle {
    /// Distance between point `i` and point `j`.
    fn distance(&self, i: usize, j: usize) -> f64;

    /// Number of points the oracle can answer for, when it knows.
    fn len(&self) -> Option<usize> {
        None
    }
}

impl<F> DistanceOracle for F
where
    F: Fn(usize, usize) -> f64,
{
    fn distance(&self, i: usize, j: usize) -> f64 {
        self(i, j)
    }
}

/// A distance function over two equal-length feature vectors.
///
/// Implementations may assume `a.len() == b.len()`; callers validate lengths.
pub trait Metric {
    /// Distance between `a` and `b`.
    fn distance(&self, a: &[f64], b: &[f64]) -> f64;
}

impl<M: Metric + ?Sized> Metric for &M {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        (**self).distance(a, b)
    }
}

/// Oracle over an owned set of feature vectors.
#[derive(Debug, Clone)]
pub struct FeatureDistance<M> {
    points: Vec<Vec<f64>>,
    metric: M,
}

impl<M: Metric> FeatureDistance<M> {
    /// Wrap `points` with `metric`.
    ///
    /// All points must share one dimensionality. An empty set is allowed.
    pub fn new(points: Vec<Vec<f64>>, metric: M) -> Result<Self> {
        if let Some(first) = points.first() {
            let d = first.len();
            if let Some(p) = points.iter().find(|p| p.len() != d) {
                return Err(Error::DimensionMismatch {
                    expected: d,
                    found: p.len(),
                });
            }
        }
        Ok(Self { points, metric })
    }

    /// Build from the rows of a 2-D array.
    #[cfg(feature = "ndarray")]
    pub fn from_rows(rows: ArrayView2<'_, f64>, metric: M) -> Result<Self> {
        let points = rows.outer_iter().map(|r| r.to_vec()).collect();
        Self::new(points, metric)
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether there are no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Dimensionality (0 when empty).
    pub fn dim(&self) -> usize {
        self.points.first().map_or(0, Vec::len)
    }

    /// The wrapped metric.
    pub fn metric(&self) -> &M {
        &self.metric
    }
}

impl<M: Metric> DistanceOracle for FeatureDistance<M> {
    #[inline]
    fn distance(&self, i: usize, j: usize) -> f64 {
        self.metric.distance(&self.points[i], &self.points[j])
    }

    fn len(&self) -> Option<usize> {
        Some(self.points.len())
    }
}

/// Oracle backed by an explicit square distance table.
#[derive(Debug, Clone)]
pub struct Precomputed {
    n: usize,
    // Row-major n*n.
    values: Vec<f64>,
}

impl Precomputed {
    /// Build from a square, symmetric table.
    pub fn from_square(rows: &[Vec<f64>]) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::EmptyInput);
        }
        let n = rows.len();
        if let Some(r) = rows.iter().find(|r| r.len() != n) {
            return Err(Error::DimensionMismatch {
                expected: n,
                found: r.len(),
            });
        }
        for i in 0..n {
            for j in (i + 1)..n {
                // Exact comparison: NaN entries fail here too.
                if rows[i][j] != rows[j][i] {
                    return Err(Error::InvalidParameter {
                        name: "rows",
                        message: "distance table must be symmetric",
                    });
                }
            }
        }
        Ok(Self {
            n,
            values: rows.iter().flatten().copied().collect(),
        })
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Whether the table is empty (never true for a constructed value).
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }
}

impl DistanceOracle for Precomputed {
    #[inline]
    fn distance(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }

    fn len(&self) -> Option<usize> {
        Some(self.n)
    }
}
