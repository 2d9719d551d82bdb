//! Error types for solver operations.

use ma_core::CoreError;
use thiserror::Error;

/// Errors that can occur while driving the root finder.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error("Numeric error: {what}")]
    Numeric { what: String },

    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

pub type SolverResult<T> = Result<T, SolverError>;
