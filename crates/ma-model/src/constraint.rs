//! Algebraic constraints on species concentrations.

use crate::error::{ModelError, ModelResult};
use crate::species::{IntoLinComb, LinComb};
use core::fmt;
use ma_core::SpeciesId;
use nalgebra::DVector;

/// Target of a constraint: one value, or an ordered sequence of values for
/// a parameter sweep.
#[derive(Clone, Debug, PartialEq)]
pub enum Target {
    Value(f64),
    Sweep(Vec<f64>),
}

impl From<f64> for Target {
    fn from(value: f64) -> Self {
        Target::Value(value)
    }
}

impl From<Vec<f64>> for Target {
    fn from(values: Vec<f64>) -> Self {
        Target::Sweep(values)
    }
}

impl From<&[f64]> for Target {
    fn from(values: &[f64]) -> Self {
        Target::Sweep(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Target {
    fn from(values: [f64; N]) -> Self {
        Target::Sweep(values.to_vec())
    }
}

/// A reservoir: a single-species constraint that holds that species at a
/// fixed concentration instead of solving for it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reservoir {
    pub species: SpeciesId,
    factor: f64,
}

impl Reservoir {
    /// The fixed concentration `value / factor` (NOT log-domain).
    pub fn concentration(&self, value: f64) -> f64 {
        value / self.factor
    }
}

/// The algebraic equation `L == value` over a linear combination `L`.
///
/// Targets are immutable: a sweep constraint carries all its values, and
/// the model resolves the value for the current sweep index explicitly via
/// [`Constraint::value_at`]. Nothing is mutated between sweep iterations,
/// so iterations are independent.
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint {
    lincomb: LinComb,
    target: Target,
}

impl Constraint {
    pub fn new(lincomb: impl IntoLinComb, target: impl Into<Target>) -> Self {
        Self {
            lincomb: lincomb.into_lincomb(),
            target: target.into(),
        }
    }

    pub fn lincomb(&self) -> &LinComb {
        &self.lincomb
    }

    pub fn is_sweep(&self) -> bool {
        matches!(self.target, Target::Sweep(_))
    }

    /// Number of target values (1 for a plain constraint).
    pub fn num_values(&self) -> usize {
        match &self.target {
            Target::Value(_) => 1,
            Target::Sweep(values) => values.len(),
        }
    }

    /// Resolve the target value for sweep index `i`.
    ///
    /// A plain constraint has the same value at every index; a sweep
    /// constraint fails if `i` is out of range.
    pub fn value_at(&self, i: usize) -> ModelResult<f64> {
        match &self.target {
            Target::Value(value) => Ok(*value),
            Target::Sweep(values) => {
                values
                    .get(i)
                    .copied()
                    .ok_or(ModelError::SweepIndexOutOfRange {
                        index: i,
                        len: values.len(),
                    })
            }
        }
    }

    /// Detect whether this constraint is a reservoir.
    ///
    /// A constraint is a reservoir iff its linear combination has exactly
    /// one term; a zero factor on that term is a configuration error.
    pub fn reservoir(&self) -> ModelResult<Option<Reservoir>> {
        let [term] = self.lincomb.terms() else {
            return Ok(None);
        };
        if term.factor == 0.0 {
            return Err(ModelError::ZeroReservoirFactor);
        }
        Ok(Some(Reservoir {
            species: term.species,
            factor: term.factor,
        }))
    }

    /// Log-domain residual of `L == value`, zero exactly when the linear
    /// equation holds for `concentrations = exp(ln_concentrations)`.
    ///
    /// Terms are split by factor sign into positive and negative partial
    /// sums, and `value` is folded into whichever side keeps both logarithm
    /// arguments positive:
    ///
    /// - `value > 0`: `ln(val_pos) - ln(val_neg + value)`
    /// - otherwise:   `ln(val_pos - value) - ln(val_neg)`
    ///
    /// Both branches are algebraically the same equation; the split only
    /// avoids taking the logarithm of a non-positive quantity.
    pub fn residual(&self, ln_concentrations: &DVector<f64>, value: f64) -> f64 {
        let mut val_pos = 0.0;
        let mut val_neg = 0.0;
        for term in self.lincomb.terms() {
            let concentration = ln_concentrations[term.index()].exp();
            if term.factor > 0.0 {
                val_pos += term.factor * concentration;
            } else if term.factor < 0.0 {
                val_neg += -term.factor * concentration;
            }
        }
        if value > 0.0 {
            val_pos.ln() - (val_neg + value).ln()
        } else {
            (val_pos - value).ln() - val_neg.ln()
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            Target::Value(value) => write!(f, "{} == {:?}", self.lincomb, value),
            Target::Sweep(values) => write!(f, "{} == {:?}", self.lincomb, values),
        }
    }
}
