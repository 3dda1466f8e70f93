//! Sigmoid (hyperbolic tangent) kernel: `k(a, b) = tanh(γ ⟨a, b⟩ + c₀)`.

use super::{dot, Kernel};
use crate::error::{Error, Result};

/// Sigmoid kernel with scale `gamma` and offset `coef0`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SigmoidKernel {
    gamma: f64,
    coef0: f64,
}

impl Default for SigmoidKernel {
    fn default() -> Self {
        Self {
            gamma: 1.0,
            coef0: 0.0,
        }
    }
}

impl SigmoidKernel {
    /// Create a sigmoid kernel. Both parameters must be finite.
    pub fn new(gamma: f64, coef0: f64) -> Result<Self> {
        Self::default().with_gamma(gamma)?.with_coef0(coef0)
    }

    /// Set the scale applied to the inner product.
    pub fn with_gamma(mut self, gamma: f64) -> Result<Self> {
        if !gamma.is_finite() {
            return Err(Error::InvalidParameter {
                name: "gamma",
                message: "must be finite",
            });
        }
        self.gamma = gamma;
        Ok(self)
    }

    /// Set the additive offset.
    pub fn with_coef0(mut self, coef0: f64) -> Result<Self> {
        if !coef0.is_finite() {
            return Err(Error::InvalidParameter {
                name: "coef0",
                message: "must be finite",
            });
        }
        self.coef0 = coef0;
        Ok(self)
    }

    /// Scale applied to the inner product.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Additive offset.
    pub fn coef0(&self) -> f64 {
        self.coef0
    }
}

impl Kernel for SigmoidKernel {
    #[inline]
    fn similarity(&self, a: &[f64], b: &[f64]) -> f64 {
        (self.gamma * dot(a, b) + self.coef0).tanh()
    }
}

/// Checked sigmoid kernel value.
pub fn sigmoid(a: &[f64], b: &[f64], gamma: f64, coef0: f64) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }
    Ok(SigmoidKernel::new(gamma, coef0)?.similarity(a, b))
}
