//! Candidate model hypotheses and their fixed, ordered collection.
//!
//! A hypothesis is one candidate generative model: a basis-function map
//! `x ↦ φ(x)` of fixed width M plus an isotropic Gaussian prior over the M
//! basis weights. The engine consumes hypotheses through this trait and
//! never produces or mutates them; concrete basis families (polynomial,
//! radial, ...) live with the caller.

use crate::distribution::IsotropicGaussian;
use crate::error::{ElegirError, Result};
use crate::primitives::{Matrix, Vector};

/// One candidate model: basis functions plus a weight prior.
///
/// Implementations must be pure: `design_row` called twice on the same
/// input returns the same row. `Send + Sync` because the engine evaluates
/// hypotheses from parallel per-hypothesis loops.
pub trait Hypothesis: Send + Sync {
    /// Number of basis functions M (the weight-vector dimension).
    fn dimension(&self) -> usize;

    /// Evaluates the basis functions on one input, producing the design
    /// row `[φ_0(x), ..., φ_{M-1}(x)]` of length [`Hypothesis::dimension`].
    fn design_row(&self, x: f64) -> Vector<f64>;

    /// Prior distribution over this hypothesis's weight vector, with
    /// covariance `factor · I`.
    fn weight_prior(&self) -> &IsotropicGaussian;

    /// Stacks [`Hypothesis::design_row`] over a sequence of inputs into an
    /// (n, M) design matrix.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if any produced row has a width other
    /// than [`Hypothesis::dimension`].
    fn design_matrix(&self, xs: &[f64]) -> Result<Matrix<f64>> {
        let m = self.dimension();
        let mut design = Matrix::zeros(0, m);
        for &x in xs {
            let row = self.design_row(x);
            design.push_row(&row).map_err(|_| {
                ElegirError::dimension_mismatch(
                    format!("design row of width {m}"),
                    format!("width {}", row.len()),
                )
            })?;
        }
        Ok(design)
    }
}

/// A fixed, ordered, non-empty set of competing hypotheses, each carrying a
/// prior probability mass.
///
/// The collection is immutable for the lifetime of any engine borrowing
/// it; a hypothesis has no identity beyond its index.
///
/// # Example
///
/// ```
/// use elegir::distribution::IsotropicGaussian;
/// use elegir::hypothesis::{Hypothesis, HypothesisCollection};
/// use elegir::primitives::Vector;
///
/// struct Constant {
///     prior: IsotropicGaussian,
/// }
///
/// impl Hypothesis for Constant {
///     fn dimension(&self) -> usize {
///         1
///     }
///     fn design_row(&self, _x: f64) -> Vector<f64> {
///         Vector::from_slice(&[1.0])
///     }
///     fn weight_prior(&self) -> &IsotropicGaussian {
///         &self.prior
///     }
/// }
///
/// let hyp = Constant {
///     prior: IsotropicGaussian::new(Vector::zeros(1), 1.0).unwrap(),
/// };
/// let collection = HypothesisCollection::with_uniform_prior(vec![Box::new(hyp)]).unwrap();
/// assert_eq!(collection.len(), 1);
/// assert!((collection.prior(0) - 1.0).abs() < 1e-12);
/// ```
pub struct HypothesisCollection {
    hypotheses: Vec<Box<dyn Hypothesis>>,
    prior: Vec<f64>,
}

impl std::fmt::Debug for HypothesisCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HypothesisCollection")
            .field("len", &self.hypotheses.len())
            .field("prior", &self.prior)
            .finish()
    }
}

impl HypothesisCollection {
    /// Creates a collection with explicit prior probability masses.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the collection is empty, the mass
    /// count doesn't match the hypothesis count, any mass is negative or
    /// non-finite, or the masses don't sum to 1 (tolerance 1e-9).
    pub fn new(hypotheses: Vec<Box<dyn Hypothesis>>, prior: Vec<f64>) -> Result<Self> {
        if hypotheses.is_empty() {
            return Err(ElegirError::invalid_configuration(
                "hypothesis collection must be non-empty",
            ));
        }
        if prior.len() != hypotheses.len() {
            return Err(ElegirError::invalid_configuration(format!(
                "{} prior masses for {} hypotheses",
                prior.len(),
                hypotheses.len()
            )));
        }
        if prior.iter().any(|&p| !p.is_finite() || p < 0.0) {
            return Err(ElegirError::invalid_configuration(
                "prior masses must be finite and non-negative",
            ));
        }
        let total: f64 = prior.iter().sum();
        if (total - 1.0).abs() > 1e-9 {
            return Err(ElegirError::invalid_configuration(format!(
                "prior masses must sum to 1, got {total}"
            )));
        }
        Ok(Self { hypotheses, prior })
    }

    /// Creates a collection assigning each hypothesis the same prior mass.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the collection is empty.
    pub fn with_uniform_prior(hypotheses: Vec<Box<dyn Hypothesis>>) -> Result<Self> {
        let n = hypotheses.len();
        if n == 0 {
            return Err(ElegirError::invalid_configuration(
                "hypothesis collection must be non-empty",
            ));
        }
        let mass = 1.0 / n as f64;
        Ok(Self {
            hypotheses,
            prior: vec![mass; n],
        })
    }

    /// Number of hypotheses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hypotheses.len()
    }

    /// Returns true if the collection holds no hypotheses. Construction
    /// forbids this; the method exists for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hypotheses.is_empty()
    }

    /// The hypothesis at index k.
    ///
    /// # Panics
    ///
    /// Panics if k is out of bounds.
    #[must_use]
    pub fn get(&self, k: usize) -> &dyn Hypothesis {
        self.hypotheses[k].as_ref()
    }

    /// Prior probability mass of hypothesis k.
    ///
    /// # Panics
    ///
    /// Panics if k is out of bounds.
    #[must_use]
    pub fn prior(&self, k: usize) -> f64 {
        self.prior[k]
    }

    /// Iterates over the hypotheses in index order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Hypothesis> {
        self.hypotheses.iter().map(Box::as_ref)
    }
}

#[cfg(test)]
#[path = "hypothesis_tests.rs"]
mod tests;
