//! Gaussian random variables for conjugate regression.
//!
//! Two density objects cover everything the engine needs:
//! - [`Gaussian`]: full-covariance multivariate normal, used for the weight
//!   posterior. Covariance and precision live in one value object that stays
//!   consistent under mutation.
//! - [`IsotropicGaussian`]: mean plus scalar variance factor (`factor · I`),
//!   used for weight priors and the observation-noise likelihood.

mod gaussian;

pub use gaussian::{Gaussian, IsotropicGaussian};
