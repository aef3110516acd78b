//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use elegir::prelude::*;
//! ```

pub use crate::distribution::{Gaussian, IsotropicGaussian};
pub use crate::error::{ElegirError, Result};
pub use crate::hypothesis::{Hypothesis, HypothesisCollection};
pub use crate::primitives::{Matrix, Vector};
pub use crate::selection::{EvidenceFallback, ModelSelector};
