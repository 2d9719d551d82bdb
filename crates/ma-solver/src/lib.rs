//! Nonlinear root finder for square residual systems.
//!
//! This crate provides the "solve these N equations in N unknowns" capability
//! the model layer delegates to: a damped Newton iteration over a
//! finite-difference Jacobian, behind the [`RootFinder`] trait so callers
//! never commit to an algorithm.

pub mod error;
pub mod jacobian;
pub mod newton;
pub mod root;

pub use error::{SolverError, SolverResult};
pub use jacobian::finite_difference_jacobian;
pub use newton::{newton_solve, NewtonConfig, NewtonResult};
pub use root::{NewtonRootFinder, RootFinder};
