//! The opaque "root of a square system" seam.

use crate::error::SolverResult;
use crate::jacobian::finite_difference_jacobian;
use crate::newton::{newton_solve, NewtonConfig};
use nalgebra::DVector;

/// A nonlinear root finder for square systems.
///
/// Given a residual function over n unknowns and an initial guess of length
/// n, returns a vector at which the residual is (approximately) zero, or an
/// error describing why no such vector was found. Callers depend only on
/// this contract, not on the algorithm behind it.
pub trait RootFinder {
    fn find_root<F>(&self, residual: F, x0: DVector<f64>) -> SolverResult<DVector<f64>>
    where
        F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>;
}

/// Default root finder: damped Newton over a forward-difference Jacobian.
pub struct NewtonRootFinder {
    pub config: NewtonConfig,
    /// Relative perturbation for the finite-difference Jacobian.
    pub fd_epsilon: f64,
}

impl Default for NewtonRootFinder {
    fn default() -> Self {
        Self {
            config: NewtonConfig::default(),
            fd_epsilon: 1e-7,
        }
    }
}

impl RootFinder for NewtonRootFinder {
    fn find_root<F>(&self, residual: F, x0: DVector<f64>) -> SolverResult<DVector<f64>>
    where
        F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
    {
        let jacobian_fn = |x: &DVector<f64>| -> SolverResult<nalgebra::DMatrix<f64>> {
            finite_difference_jacobian(x, &residual, self.fd_epsilon)
        };
        let result = newton_solve(x0, &residual, jacobian_fn, &self.config)?;
        Ok(result.x)
    }
}
