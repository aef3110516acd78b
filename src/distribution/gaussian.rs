//! Multivariate Gaussian density objects.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{ElegirError, Result};
use crate::primitives::{Matrix, Vector};

/// Full-covariance multivariate normal distribution.
///
/// # Model
///
/// ```text
/// p(x) = (2π)^(-M/2) · det(Σ)^(-1/2) · exp(-½ (x-μ)ᵗ Σ⁻¹ (x-μ))
/// ```
///
/// Both the covariance Σ and the precision Λ = Σ⁻¹ are stored, because the
/// conjugate update is naturally expressed on precisions while density
/// evaluation and inspection want covariances. The two representations are
/// a single value object: every constructor and mutator derives one from
/// the other, so they cannot drift apart.
///
/// # Example
///
/// ```
/// use elegir::distribution::Gaussian;
/// use elegir::primitives::{Matrix, Vector};
///
/// let standard = Gaussian::from_covariance(Vector::zeros(2), Matrix::eye(2)).unwrap();
/// let at_mean = standard.log_density(&Vector::zeros(2)).unwrap();
/// // -M/2 · ln(2π) for the standard normal at its mean
/// assert!((at_mean + (2.0 * std::f64::consts::PI).ln()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gaussian {
    mean: Vector<f64>,
    covariance: Matrix<f64>,
    precision: Matrix<f64>,
}

impl Gaussian {
    /// Creates a Gaussian from its mean and covariance matrix.
    ///
    /// The precision is derived immediately by Cholesky inversion.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the covariance is not square with the
    /// mean's dimension, or `NumericalInstability` if it is not positive
    /// definite.
    pub fn from_covariance(mean: Vector<f64>, covariance: Matrix<f64>) -> Result<Self> {
        check_square(&mean, &covariance, "covariance")?;
        let precision = covariance
            .cholesky_inverse()
            .map_err(|_| ElegirError::numerical("inversion of covariance matrix"))?;
        Ok(Self {
            mean,
            covariance,
            precision,
        })
    }

    /// Creates a Gaussian from its mean and precision (inverse covariance).
    ///
    /// The covariance is derived immediately by Cholesky inversion.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the precision is not square with the
    /// mean's dimension, or `NumericalInstability` if it is not positive
    /// definite.
    pub fn from_precision(mean: Vector<f64>, precision: Matrix<f64>) -> Result<Self> {
        check_square(&mean, &precision, "precision")?;
        let covariance = precision
            .cholesky_inverse()
            .map_err(|_| ElegirError::numerical("inversion of precision matrix"))?;
        Ok(Self {
            mean,
            covariance,
            precision,
        })
    }

    /// Replaces mean and precision in one step, recomputing the covariance.
    ///
    /// This is the conjugate-update mutator: `Λ_new = Λ_old + φᵗφ/σ²` lands
    /// here and the covariance can never silently diverge from it.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` or `NumericalInstability` as in
    /// [`Gaussian::from_precision`]; on error `self` is left unchanged.
    pub fn set_precision(&mut self, mean: Vector<f64>, precision: Matrix<f64>) -> Result<()> {
        *self = Self::from_precision(mean, precision)?;
        Ok(())
    }

    /// Dimension M of the distribution.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.mean.len()
    }

    /// Mean vector μ.
    #[must_use]
    pub fn mean(&self) -> &Vector<f64> {
        &self.mean
    }

    /// Covariance matrix Σ.
    #[must_use]
    pub fn covariance(&self) -> &Matrix<f64> {
        &self.covariance
    }

    /// Precision matrix Λ = Σ⁻¹.
    #[must_use]
    pub fn precision(&self) -> &Matrix<f64> {
        &self.precision
    }

    /// Log-density `ln p(x)`.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `x` has the wrong length, or
    /// `NumericalInstability` if the precision has lost positive
    /// definiteness to rounding.
    pub fn log_density(&self, x: &Vector<f64>) -> Result<f64> {
        if x.len() != self.dimension() {
            return Err(ElegirError::dimension_mismatch(
                format!("vector of length {}", self.dimension()),
                format!("length {}", x.len()),
            ));
        }
        let d = x
            .sub(&self.mean)
            .map_err(|e| ElegirError::Other(e.to_string()))?;
        let ld = self
            .precision
            .matvec(&d)
            .map_err(|e| ElegirError::Other(e.to_string()))?;
        let quad = d.dot(&ld);
        let log_det_precision = self
            .precision
            .log_det_spd()
            .map_err(|_| ElegirError::numerical("log-determinant of precision matrix"))?;
        let m = self.dimension() as f64;
        Ok(0.5 * (log_det_precision - m * (2.0 * PI).ln() - quad))
    }

    /// Density `p(x)`, as `exp(log_density)`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Gaussian::log_density`].
    pub fn density(&self, x: &Vector<f64>) -> Result<f64> {
        Ok(self.log_density(x)?.exp())
    }
}

/// Isotropic (diagonal with one shared factor) multivariate normal.
///
/// # Model
///
/// ```text
/// p(x) = Π_i N(x_i | μ_i, factor)
///      = (2π·factor)^(-M/2) · exp(-Σ_i (x_i-μ_i)² / (2·factor))
/// ```
///
/// This is the required shape for hypothesis weight priors (`σ_w²·I`) and
/// the form of the observation likelihood (`σ²·I_N`). For isotropic
/// covariance the product of M univariate densities equals the full
/// multivariate density with covariance `factor·I`; the O(M) product form
/// is what gets evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsotropicGaussian {
    mean: Vector<f64>,
    factor: f64,
}

impl IsotropicGaussian {
    /// Creates an isotropic Gaussian from a mean vector and the scalar
    /// variance factor of `factor · I`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the factor is not finite and
    /// positive, or the mean is empty. Non-finite mean entries are not
    /// rejected here; they surface as non-finite densities downstream.
    pub fn new(mean: Vector<f64>, factor: f64) -> Result<Self> {
        if mean.is_empty() {
            return Err(ElegirError::invalid_configuration(
                "isotropic Gaussian mean must be non-empty",
            ));
        }
        if !(factor.is_finite() && factor > 0.0) {
            return Err(ElegirError::invalid_configuration(format!(
                "variance factor must be finite and positive, got {factor}"
            )));
        }
        Ok(Self { mean, factor })
    }

    /// Dimension M of the distribution.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.mean.len()
    }

    /// Mean vector μ.
    #[must_use]
    pub fn mean(&self) -> &Vector<f64> {
        &self.mean
    }

    /// Scalar variance factor of `factor · I`.
    #[must_use]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Log-density `ln p(x)` via the diagonal product form.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `x` has the wrong length.
    pub fn log_density(&self, x: &Vector<f64>) -> Result<f64> {
        if x.len() != self.dimension() {
            return Err(ElegirError::dimension_mismatch(
                format!("vector of length {}", self.dimension()),
                format!("length {}", x.len()),
            ));
        }
        let sq_sum: f64 = x
            .iter()
            .zip(self.mean.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum();
        let m = self.dimension() as f64;
        Ok(-0.5 * (sq_sum / self.factor + m * (2.0 * PI * self.factor).ln()))
    }

    /// Density `p(x)`, as `exp(log_density)`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`IsotropicGaussian::log_density`].
    pub fn density(&self, x: &Vector<f64>) -> Result<f64> {
        Ok(self.log_density(x)?.exp())
    }

    /// Expands into a full [`Gaussian`] with covariance `factor · I`.
    ///
    /// Used to seed a weight posterior from a hypothesis prior; the inverse
    /// is formed directly as `I / factor` rather than through a solve.
    #[must_use]
    pub fn to_gaussian(&self) -> Gaussian {
        let m = self.dimension();
        Gaussian {
            mean: self.mean.clone(),
            covariance: Matrix::eye(m).mul_scalar(self.factor),
            precision: Matrix::eye(m).mul_scalar(1.0 / self.factor),
        }
    }
}

fn check_square(mean: &Vector<f64>, matrix: &Matrix<f64>, name: &str) -> Result<()> {
    let m = mean.len();
    if matrix.shape() != (m, m) {
        return Err(ElegirError::dimension_mismatch(
            format!("{m}x{m} {name} matrix"),
            format!("{}x{}", matrix.n_rows(), matrix.n_cols()),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "gaussian_tests.rs"]
mod tests;
