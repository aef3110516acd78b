//! The incremental regression/selection engine.

use std::f64::consts::PI;

use rayon::prelude::*;

use crate::distribution::{Gaussian, IsotropicGaussian};
use crate::error::{ElegirError, Result};
use crate::hypothesis::HypothesisCollection;
use crate::primitives::{Matrix, Vector};

/// What to append to the probability history when every hypothesis's
/// evidence degenerates (all zero or non-finite).
///
/// Only [`ModelSelector::update_with_fallback`] consumes this; the plain
/// [`ModelSelector::update`] surfaces `DegenerateEvidence` and changes
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvidenceFallback {
    /// Repeat the most recent probability row.
    KeepPrevious,
    /// Substitute the uniform distribution over hypotheses.
    Uniform,
}

/// Per-hypothesis result of one update, computed before any state commits.
struct HypothesisStep {
    posterior: Gaussian,
    design: Matrix<f64>,
    log_evidence: f64,
}

/// Online Bayesian model selection for linear regression.
///
/// # Model
///
/// Each hypothesis k models targets as
///
/// ```text
/// t = φ_k(x)ᵗ·w + ε,   ε ~ N(0, σ²),   w ~ N(m_0, σ_w²·I)
/// ```
///
/// After each observation the engine holds, per hypothesis, the exact
/// conjugate posterior `p(w | data, H_k)` and the normalized posterior
/// probability `p(H_k | data)` derived from the marginal-likelihood
/// evidence over the full history.
///
/// The borrowed [`HypothesisCollection`] is read-only to the engine and
/// must outlive it; all mutable state (posteriors, observation history,
/// design accumulators, probability histories) is owned here.
///
/// Updates are transactional: on any error the engine is exactly as it
/// was before the call, so a failed observation can be dropped or retried
/// under caller control without corrupting the histories.
///
/// # Example
///
/// ```
/// use elegir::prelude::*;
///
/// struct Line {
///     prior: IsotropicGaussian,
/// }
///
/// impl Hypothesis for Line {
///     fn dimension(&self) -> usize {
///         2
///     }
///     fn design_row(&self, x: f64) -> Vector<f64> {
///         Vector::from_slice(&[1.0, x])
///     }
///     fn weight_prior(&self) -> &IsotropicGaussian {
///         &self.prior
///     }
/// }
///
/// let line = Line {
///     prior: IsotropicGaussian::new(Vector::zeros(2), 1.0).unwrap(),
/// };
/// let collection = HypothesisCollection::with_uniform_prior(vec![Box::new(line)]).unwrap();
/// let mut selector = ModelSelector::new(&collection, 1.0).unwrap();
///
/// selector.update(1.0, 2.0).unwrap();
/// assert_eq!(selector.n_observations(), 1);
/// let total: f64 = selector.probabilities().iter().sum();
/// assert!((total - 1.0).abs() < 1e-9);
/// ```
pub struct ModelSelector<'a> {
    hypotheses: &'a HypothesisCollection,
    sigma: f64,
    /// p(w | data, H_k), one per hypothesis.
    posteriors: Vec<Gaussian>,
    /// All past inputs, shared across hypotheses.
    x_hist: Vec<f64>,
    /// All past targets, shared across hypotheses.
    t_hist: Vec<f64>,
    /// Accumulated (N, M_k) design matrices; row count always equals
    /// the observation count.
    designs: Vec<Matrix<f64>>,
    /// Posterior means after each update, for inspection only.
    mean_hist: Vec<Vec<Vector<f64>>>,
    /// Posterior covariances after each update, for inspection only.
    cov_hist: Vec<Vec<Matrix<f64>>>,
    /// p(H_k | data) after each update, seeded with the prior masses.
    prob_hist: Vec<Vec<f64>>,
}

impl<'a> ModelSelector<'a> {
    /// Creates an engine over a hypothesis collection with observation-noise
    /// standard deviation `sigma`.
    ///
    /// Each weight posterior starts at its hypothesis's own prior and each
    /// probability history starts at the hypothesis's prior mass; no
    /// observations have been consumed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the collection is empty or `sigma`
    /// is not finite and positive.
    pub fn new(hypotheses: &'a HypothesisCollection, sigma: f64) -> Result<Self> {
        if hypotheses.is_empty() {
            return Err(ElegirError::invalid_configuration(
                "hypothesis collection must be non-empty",
            ));
        }
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(ElegirError::invalid_configuration(format!(
                "observation noise must be finite and positive, got {sigma}"
            )));
        }

        let n = hypotheses.len();
        let posteriors: Vec<Gaussian> = hypotheses
            .iter()
            .map(|h| h.weight_prior().to_gaussian())
            .collect();
        let designs: Vec<Matrix<f64>> = hypotheses
            .iter()
            .map(|h| Matrix::zeros(0, h.dimension()))
            .collect();
        let prob_hist: Vec<Vec<f64>> = (0..n).map(|k| vec![hypotheses.prior(k)]).collect();

        Ok(Self {
            hypotheses,
            sigma,
            posteriors,
            x_hist: Vec::new(),
            t_hist: Vec::new(),
            designs,
            mean_hist: vec![Vec::new(); n],
            cov_hist: vec![Vec::new(); n],
            prob_hist,
        })
    }

    /// Consumes one observation: refines every weight posterior, recomputes
    /// every model evidence over the full history, and appends the
    /// renormalized hypothesis probabilities.
    ///
    /// Observations must arrive one at a time in order; histories are
    /// append-only and the evidence is defined over the accumulated data.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` if a hypothesis produces a design row whose
    ///   width differs from its declared dimension.
    /// - `NumericalInstability` if a posterior precision or evidence matrix
    ///   loses positive definiteness.
    /// - `DegenerateEvidence` if every evidence is zero or non-finite.
    ///
    /// On any error the engine state is unchanged.
    pub fn update(&mut self, x: f64, t: f64) -> Result<()> {
        let targets = self.targets_with(t);
        let steps = self.prepare_steps(x, t, &targets)?;
        let probabilities = normalize_evidence(&steps)?;
        self.commit(x, t, steps, &probabilities);
        Ok(())
    }

    /// Like [`ModelSelector::update`], but recovers from `DegenerateEvidence`
    /// by appending the fallback probability row instead of failing.
    ///
    /// The weight posteriors and histories still advance by the new
    /// observation. All other errors propagate unchanged, leaving the
    /// engine untouched.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` and `NumericalInstability`, as in
    /// [`ModelSelector::update`].
    pub fn update_with_fallback(
        &mut self,
        x: f64,
        t: f64,
        fallback: EvidenceFallback,
    ) -> Result<()> {
        let targets = self.targets_with(t);
        let steps = self.prepare_steps(x, t, &targets)?;
        let probabilities = match normalize_evidence(&steps) {
            Ok(p) => p,
            Err(ElegirError::DegenerateEvidence { .. }) => match fallback {
                EvidenceFallback::KeepPrevious => self.probabilities(),
                EvidenceFallback::Uniform => {
                    vec![1.0 / self.hypotheses.len() as f64; self.hypotheses.len()]
                }
            },
            Err(e) => return Err(e),
        };
        self.commit(x, t, steps, &probabilities);
        Ok(())
    }

    /// Full target history including the incoming value.
    fn targets_with(&self, t: f64) -> Vector<f64> {
        let mut targets = self.t_hist.clone();
        targets.push(t);
        Vector::from_vec(targets)
    }

    /// Computes every hypothesis's step without touching engine state.
    /// The per-hypothesis work is data-independent across k.
    fn prepare_steps(&self, x: f64, t: f64, targets: &Vector<f64>) -> Result<Vec<HypothesisStep>> {
        (0..self.hypotheses.len())
            .into_par_iter()
            .map(|k| self.prepare_hypothesis(k, x, t, targets))
            .collect()
    }

    /// One hypothesis's conjugate posterior refinement and full-history
    /// evidence, computed into locals.
    fn prepare_hypothesis(
        &self,
        k: usize,
        x: f64,
        t: f64,
        targets: &Vector<f64>,
    ) -> Result<HypothesisStep> {
        let hyp = self.hypotheses.get(k);
        let m = hyp.dimension();
        let noise_precision = 1.0 / (self.sigma * self.sigma);

        let phi = hyp.design_row(x);
        if phi.len() != m {
            return Err(ElegirError::dimension_mismatch(
                format!("design row of width {m} from hypothesis {k}"),
                format!("width {}", phi.len()),
            ));
        }

        // Conjugate weight-posterior recursion:
        //   Λ_new = Λ_old + φᵗφ/σ²
        //   m_new = Λ_new⁻¹ (Λ_old·m_old + φᵗ·t/σ²)
        let current = &self.posteriors[k];
        let lambda_new = current
            .precision()
            .add(&phi.outer(&phi).mul_scalar(noise_precision))
            .map_err(ElegirError::from)?;
        let rhs = current
            .precision()
            .matvec(current.mean())
            .map_err(ElegirError::from)?
            .add(&phi.mul_scalar(t * noise_precision))
            .map_err(ElegirError::from)?;
        let mean_new = lambda_new
            .cholesky_solve(&rhs)
            .map_err(|_| ElegirError::numerical(format!("posterior precision of hypothesis {k}")))?;
        let posterior = Gaussian::from_precision(mean_new, lambda_new)?;

        // Evidence over the FULL accumulated history. The weight update
        // above is incremental, but the model-selection score is defined on
        // the complete design matrix and target history.
        let mut design = self.designs[k].clone();
        design.push_row(&phi).map_err(ElegirError::from)?;

        let prior = hyp.weight_prior();
        let a = design
            .transpose()
            .matmul(&design)
            .map_err(ElegirError::from)?
            .mul_scalar(noise_precision)
            .add(&Matrix::eye(m).mul_scalar(1.0 / prior.factor()))
            .map_err(ElegirError::from)?;

        // num1: likelihood of all targets under the fitted model's
        // predictions with isotropic observation noise.
        let y_hat = design.matvec(posterior.mean()).map_err(ElegirError::from)?;
        let noise = IsotropicGaussian::new(y_hat, self.sigma * self.sigma)?;
        let log_num1 = noise.log_density(targets)?;

        // num2: prior density of the MAP weight estimate.
        let log_num2 = prior.log_density(posterior.mean())?;

        // denom: sqrt(det(A/2π)) = exp(½(ln det A − M·ln 2π))
        let log_det_a = a
            .log_det_spd()
            .map_err(|_| ElegirError::numerical(format!("evidence matrix of hypothesis {k}")))?;
        let log_denom = 0.5 * (log_det_a - m as f64 * (2.0 * PI).ln());

        Ok(HypothesisStep {
            posterior,
            design,
            log_evidence: log_num1 + log_num2 - log_denom,
        })
    }

    /// Commits a fully computed update: histories grow by exactly one entry
    /// everywhere.
    fn commit(&mut self, x: f64, t: f64, steps: Vec<HypothesisStep>, probabilities: &[f64]) {
        self.x_hist.push(x);
        self.t_hist.push(t);
        for (k, step) in steps.into_iter().enumerate() {
            self.mean_hist[k].push(step.posterior.mean().clone());
            self.cov_hist[k].push(step.posterior.covariance().clone());
            self.designs[k] = step.design;
            self.posteriors[k] = step.posterior;
            self.prob_hist[k].push(probabilities[k]);
        }
    }

    /// Closed-form batch posterior for hypothesis k from the accumulated
    /// design matrix and target history:
    ///
    /// ```text
    /// S_N⁻¹ = S_0⁻¹ + ΦᵗΦ/σ²,   m_N = S_N (S_0⁻¹·m_0 + Φᵗ·t/σ²)
    /// ```
    ///
    /// A read-only diagnostic: the incremental recursion must agree with
    /// this to rounding, so it serves as a numerical-drift probe. With no
    /// observations it reproduces the prior.
    ///
    /// # Errors
    ///
    /// Returns `NumericalInstability` if the batch precision cannot be
    /// factorized.
    ///
    /// # Panics
    ///
    /// Panics if k is out of bounds.
    pub fn batch_posterior(&self, k: usize) -> Result<Gaussian> {
        let hyp = self.hypotheses.get(k);
        let prior = hyp.weight_prior();
        let m = hyp.dimension();
        let noise_precision = 1.0 / (self.sigma * self.sigma);
        let design = &self.designs[k];
        let targets = Vector::from_slice(&self.t_hist);

        let prior_precision = Matrix::eye(m).mul_scalar(1.0 / prior.factor());
        let lambda = prior_precision
            .add(
                &design
                    .transpose()
                    .matmul(design)
                    .map_err(ElegirError::from)?
                    .mul_scalar(noise_precision),
            )
            .map_err(ElegirError::from)?;
        let rhs = prior_precision
            .matvec(prior.mean())
            .map_err(ElegirError::from)?
            .add(
                &design
                    .transpose()
                    .matvec(&targets)
                    .map_err(ElegirError::from)?
                    .mul_scalar(noise_precision),
            )
            .map_err(ElegirError::from)?;
        let mean = lambda
            .cholesky_solve(&rhs)
            .map_err(|_| ElegirError::numerical(format!("batch precision of hypothesis {k}")))?;
        Gaussian::from_precision(mean, lambda)
    }

    /// Current weight posterior of hypothesis k.
    ///
    /// # Panics
    ///
    /// Panics if k is out of bounds.
    #[must_use]
    pub fn posterior(&self, k: usize) -> &Gaussian {
        &self.posteriors[k]
    }

    /// Current posterior mean of hypothesis k's weights.
    ///
    /// # Panics
    ///
    /// Panics if k is out of bounds.
    #[must_use]
    pub fn posterior_mean(&self, k: usize) -> &Vector<f64> {
        self.posteriors[k].mean()
    }

    /// Current posterior covariance of hypothesis k's weights.
    ///
    /// # Panics
    ///
    /// Panics if k is out of bounds.
    #[must_use]
    pub fn posterior_covariance(&self, k: usize) -> &Matrix<f64> {
        self.posteriors[k].covariance()
    }

    /// Current posterior probability of every hypothesis, in index order.
    #[must_use]
    pub fn probabilities(&self) -> Vec<f64> {
        self.prob_hist
            .iter()
            .map(|h| *h.last().expect("probability history is seeded at construction"))
            .collect()
    }

    /// Full probability history of hypothesis k, starting at its prior mass.
    ///
    /// # Panics
    ///
    /// Panics if k is out of bounds.
    #[must_use]
    pub fn probability_history(&self, k: usize) -> &[f64] {
        &self.prob_hist[k]
    }

    /// Posterior means of hypothesis k after each update.
    ///
    /// # Panics
    ///
    /// Panics if k is out of bounds.
    #[must_use]
    pub fn mean_history(&self, k: usize) -> &[Vector<f64>] {
        &self.mean_hist[k]
    }

    /// Posterior covariances of hypothesis k after each update.
    ///
    /// # Panics
    ///
    /// Panics if k is out of bounds.
    #[must_use]
    pub fn covariance_history(&self, k: usize) -> &[Matrix<f64>] {
        &self.cov_hist[k]
    }

    /// All inputs and targets consumed so far, in arrival order.
    #[must_use]
    pub fn observations(&self) -> (&[f64], &[f64]) {
        (&self.x_hist, &self.t_hist)
    }

    /// Accumulated (N, M_k) design matrix of hypothesis k.
    ///
    /// # Panics
    ///
    /// Panics if k is out of bounds.
    #[must_use]
    pub fn design_matrix(&self, k: usize) -> &Matrix<f64> {
        &self.designs[k]
    }

    /// Number of observations consumed.
    #[must_use]
    pub fn n_observations(&self) -> usize {
        self.x_hist.len()
    }

    /// Number of hypotheses under comparison.
    #[must_use]
    pub fn n_hypotheses(&self) -> usize {
        self.hypotheses.len()
    }

    /// Observation-noise standard deviation σ.
    #[must_use]
    pub fn noise_std(&self) -> f64 {
        self.sigma
    }
}

/// Normalizes log-evidences into probabilities by max-shifted
/// exponentiation. Algebraically this is `e_k / Σ_j e_j`; working from
/// logs keeps the ratio well-defined long after the raw products leave
/// f64 range.
fn normalize_evidence(steps: &[HypothesisStep]) -> Result<Vec<f64>> {
    if steps.iter().any(|s| s.log_evidence.is_nan()) {
        return Err(ElegirError::DegenerateEvidence { sum: f64::NAN });
    }
    let max = steps
        .iter()
        .map(|s| s.log_evidence)
        .fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        // All evidences underflowed to zero, or one overflowed.
        let sum = if max == f64::NEG_INFINITY {
            0.0
        } else {
            f64::INFINITY
        };
        return Err(ElegirError::DegenerateEvidence { sum });
    }
    let shifted: Vec<f64> = steps
        .iter()
        .map(|s| (s.log_evidence - max).exp())
        .collect();
    let sum: f64 = shifted.iter().sum();
    Ok(shifted.into_iter().map(|e| e / sum).collect())
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
