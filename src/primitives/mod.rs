//! Core compute primitives (Vector, Matrix).
//!
//! Dense row-major f64 kernels sized for the small, repeated linear-algebra
//! workloads of conjugate regression: rank-one precision updates, Cholesky
//! solves, and log-determinants of M×M posterior precision matrices.

mod matrix;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
