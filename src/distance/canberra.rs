//! Canberra distance.
//!
//! ```text
//! d(a, b) = Σᵢ |aᵢ - bᵢ| / (|aᵢ| + |bᵢ|)
//! ```
//!
//! A weighted L1 distance: each coordinate contributes at most 1, so the
//! total is bounded by the dimensionality. Coordinates where both values are
//! zero contribute nothing (the 0/0 term is skipped).

use super::Metric;
use crate::error::{Error, Result};

/// Canberra distance over real feature vectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Canberra;

impl Metric for Canberra {
    #[inline]
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b)
            .map(|(x, y)| {
                let denom = x.abs() + y.abs();
                if denom == 0.0 {
                    0.0
                } else {
                    (x - y).abs() / denom
                }
            })
            .sum()
    }
}

/// Checked Canberra distance.
pub fn canberra(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }
    Ok(Canberra.distance(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_value() {
        // |1-3|/4 + |2-2|/4 + |-1-1|/2 = 0.5 + 0 + 1
        let d = canberra(&[1.0, 2.0, -1.0], &[3.0, 2.0, 1.0]).unwrap();
        assert!((d - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_terms_skipped() {
        assert_eq!(canberra(&[0.0, 0.0], &[0.0, 0.0]).unwrap(), 0.0);
        assert_eq!(canberra(&[0.0, 5.0], &[0.0, -5.0]).unwrap(), 1.0);
    }

    #[test]
    fn test_bounded_by_dimension() {
        let d = canberra(&[1.0, -1.0, 4.0], &[-1.0, 1.0, -4.0]).unwrap();
        assert_eq!(d, 3.0);
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(
            canberra(&[1.0], &[1.0, 2.0]),
            Err(Error::DimensionMismatch {
                expected: 1,
                found: 2
            })
        );
    }
}
