//! Elegir: online Bayesian model selection for linear regression.
//!
//! Given a fixed collection of competing basis-function hypotheses, elegir
//! incrementally maintains, as observations arrive one at a time:
//!
//! - the exact conjugate posterior over each hypothesis's weight vector, and
//! - the posterior probability that each hypothesis is the generative model,
//!   derived from marginal-likelihood evidence over the full history.
//!
//! Everything is closed-form under the Gaussian-noise, Gaussian-prior
//! assumption set; there is no optimization loop anywhere.
//!
//! # Quick Start
//!
//! ```
//! use elegir::prelude::*;
//!
//! // One candidate model: t = w₀ + w₁·x + noise
//! struct Line {
//!     prior: IsotropicGaussian,
//! }
//!
//! impl Hypothesis for Line {
//!     fn dimension(&self) -> usize {
//!         2
//!     }
//!     fn design_row(&self, x: f64) -> Vector<f64> {
//!         Vector::from_slice(&[1.0, x])
//!     }
//!     fn weight_prior(&self) -> &IsotropicGaussian {
//!         &self.prior
//!     }
//! }
//!
//! let line = Line {
//!     prior: IsotropicGaussian::new(Vector::zeros(2), 1.0).unwrap(),
//! };
//! let collection = HypothesisCollection::with_uniform_prior(vec![Box::new(line)]).unwrap();
//!
//! // Engine with observation-noise standard deviation σ = 0.5
//! let mut selector = ModelSelector::new(&collection, 0.5).unwrap();
//!
//! // Feed observations from t = 2x + 1
//! for (x, t) in [(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)] {
//!     selector.update(x, t).unwrap();
//! }
//!
//! let mean = selector.posterior_mean(0);
//! assert!((mean[0] - 1.0).abs() < 0.5); // intercept near 1
//! assert!((mean[1] - 2.0).abs() < 0.5); // slope near 2
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`distribution`]: Gaussian random variables (full and isotropic)
//! - [`hypothesis`]: The consumed hypothesis interface and its collection
//! - [`selection`]: The incremental regression/selection engine
//! - [`error`]: Error taxonomy

pub mod distribution;
pub mod error;
pub mod hypothesis;
pub mod prelude;
pub mod primitives;
pub mod selection;

pub use error::{ElegirError, Result};
