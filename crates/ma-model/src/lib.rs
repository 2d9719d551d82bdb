//! ma-model: mass-action equilibrium modeling layer.
//!
//! Build an algebraic expression model over a fixed set of unknown species
//! concentrations, declare reactions (logarithmic mass-action equations) and
//! constraints (linear combinations of concentrations equated to a value,
//! possibly swept over a parameter range), and solve the resulting nonlinear
//! system for the equilibrium log-concentrations.
//!
//! # Example
//!
//! ```
//! use ma_model::{IntoLinComb, Model};
//!
//! // HA <=> H+ + A-  with mass balance and electroneutrality
//! let model = Model::new(3);
//! let species = model.species();
//! let (ha, a, h) = (species[0], species[1], species[2]);
//!
//! let reaction = ha >> h + a;
//! let ln_ka = (10.0_f64).powf(-4.75).ln();
//! let mass_balance = (ha + a).equals(0.1);
//! let electroneutrality = (h - a).equals(0.0);
//!
//! let solution = model
//!     .solve(&[reaction], &[ln_ka], &[mass_balance, electroneutrality])
//!     .unwrap();
//! let ln_c = solution.into_single().unwrap();
//! assert!((ln_c[0].exp() - 9.87e-2).abs() < 1e-3);
//! ```

pub mod constraint;
pub mod error;
pub mod model;
pub mod reaction;
pub mod species;

// Re-exports for ergonomics
pub use constraint::{Constraint, Reservoir, Target};
pub use error::{ModelError, ModelResult};
pub use model::{sweep_len, Model, Solution};
pub use reaction::Reaction;
pub use species::{IntoLinComb, LinComb, Species, Term};
