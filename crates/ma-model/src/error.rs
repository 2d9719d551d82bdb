//! Error types for model assembly and solving.

use ma_core::SpeciesId;
use ma_solver::SolverError;
use thiserror::Error;

/// Errors raised while validating or solving a model.
///
/// Configuration errors are raised at the point of detection; there is no
/// partial-result recovery. Solver failures propagate unchanged.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error(
        "Number of equations must equal the number of species \
         (reactions + constraints = {num_equations}, species = {num_species})"
    )]
    EquationCount {
        num_equations: usize,
        num_species: usize,
    },

    #[error(
        "Number of equilibrium constants must equal the number of reactions \
         (constants = {num_constants}, reactions = {num_reactions})"
    )]
    EqConstCount {
        num_constants: usize,
        num_reactions: usize,
    },

    #[error("Sweep constraints disagree on length (expected {expected}, found {found})")]
    SweepLengthMismatch { expected: usize, found: usize },

    #[error("Sweep index {index} out of range for {len} values")]
    SweepIndexOutOfRange { index: usize, len: usize },

    #[error("Reservoir constraint factor cannot be zero")]
    ZeroReservoirFactor,

    #[error("Species {species} is fixed by more than one reservoir constraint")]
    DuplicateReservoir { species: SpeciesId },

    #[error("Species index {index} out of range for a model with {num_species} species")]
    SpeciesOutOfRange { index: usize, num_species: usize },

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),
}

pub type ModelResult<T> = Result<T, ModelError>;
