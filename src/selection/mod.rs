//! Online Bayesian model selection over competing regression hypotheses.
//!
//! The engine consumes one (input, target) pair at a time. Each update
//! refines every hypothesis's weight posterior by the conjugate Gaussian
//! recursion, recomputes every hypothesis's marginal-likelihood evidence
//! over the full accumulated history, and renormalizes the posterior
//! probabilities across hypotheses. Complexity is penalized through the
//! evidence denominator, so the probabilities implement Occam's razor:
//! a richer basis wins only if it buys enough extra fit.

mod selector;

pub use selector::{EvidenceFallback, ModelSelector};
