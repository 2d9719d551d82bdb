//! Equation assembly and solve orchestration.

use crate::constraint::{Constraint, Reservoir};
use crate::error::{ModelError, ModelResult};
use crate::reaction::Reaction;
use crate::species::Species;
use ma_core::SpeciesId;
use ma_solver::{NewtonRootFinder, RootFinder, SolverResult};
use nalgebra::DVector;
use tracing::debug;

/// Result of [`Model::solve`]: a single log-concentration vector, or one
/// vector per sweep index when any constraint sweeps.
#[derive(Clone, Debug, PartialEq)]
pub enum Solution {
    Single(DVector<f64>),
    Sweep(Vec<DVector<f64>>),
}

impl Solution {
    /// The lone result of a non-sweep solve.
    pub fn into_single(self) -> Option<DVector<f64>> {
        match self {
            Solution::Single(x) => Some(x),
            Solution::Sweep(_) => None,
        }
    }

    /// The per-index results of a sweep solve.
    pub fn into_sweep(self) -> Option<Vec<DVector<f64>>> {
        match self {
            Solution::Single(_) => None,
            Solution::Sweep(xs) => Some(xs),
        }
    }

    /// Iterate over result vectors (one for a single solve).
    pub fn iter(&self) -> impl Iterator<Item = &DVector<f64>> {
        match self {
            Solution::Single(x) => std::slice::from_ref(x).iter(),
            Solution::Sweep(xs) => xs.iter(),
        }
    }
}

/// Common sweep length across constraints.
///
/// Returns `None` if no constraint sweeps; non-sweep constraints are
/// length-1 and compatible with any sweep length. Fails if two sweep
/// constraints disagree.
pub fn sweep_len(constraints: &[Constraint]) -> ModelResult<Option<usize>> {
    let mut len = None;
    for constraint in constraints {
        if !constraint.is_sweep() {
            continue;
        }
        match len {
            None => len = Some(constraint.num_values()),
            Some(expected) if expected == constraint.num_values() => {}
            Some(expected) => {
                return Err(ModelError::SweepLengthMismatch {
                    expected,
                    found: constraint.num_values(),
                });
            }
        }
    }
    Ok(len)
}

/// A fixed set of unknown species concentrations.
///
/// The model owns its species for its whole lifetime; reactions and
/// constraints are transient values passed into [`Model::solve`].
#[derive(Clone, Debug)]
pub struct Model {
    num_species: usize,
}

/// Reservoir classification of one solve's constraints.
struct Classified {
    /// (constraint index, reservoir) in original constraint order.
    reservoirs: Vec<(usize, Reservoir)>,
    /// Non-reservoir constraint indices in original order.
    free_constraints: Vec<usize>,
    /// Species ids not fixed by any reservoir, ascending.
    free_ids: Vec<usize>,
}

impl Model {
    pub fn new(num_species: usize) -> Self {
        Self { num_species }
    }

    pub fn num_species(&self) -> usize {
        self.num_species
    }

    /// All species in id order, stable across the model's lifetime.
    pub fn species(&self) -> Vec<Species> {
        (0..self.num_species)
            .map(|i| Species::new(SpeciesId::from_index(i as u32)))
            .collect()
    }

    /// Solve the system of reactions and constraints for the equilibrium
    /// log-concentrations with the default Newton root finder.
    pub fn solve(
        &self,
        reactions: &[Reaction],
        ln_eqconsts: &[f64],
        constraints: &[Constraint],
    ) -> ModelResult<Solution> {
        self.solve_with(&NewtonRootFinder::default(), reactions, ln_eqconsts, constraints)
    }

    /// Solve with an explicit root finder.
    ///
    /// Validates equation counts, eliminates reservoir-fixed species from
    /// the unknown set, and solves once per sweep index (once if nothing
    /// sweeps). Each iteration assembles a square residual system over the
    /// free unknowns only: all reactions first, then the non-reservoir
    /// constraints, both in original order. Solver failures propagate
    /// unchanged; any failing iteration fails the whole solve.
    pub fn solve_with<R: RootFinder>(
        &self,
        root_finder: &R,
        reactions: &[Reaction],
        ln_eqconsts: &[f64],
        constraints: &[Constraint],
    ) -> ModelResult<Solution> {
        let num_equations = reactions.len() + constraints.len();
        if num_equations != self.num_species {
            return Err(ModelError::EquationCount {
                num_equations,
                num_species: self.num_species,
            });
        }
        if ln_eqconsts.len() != reactions.len() {
            return Err(ModelError::EqConstCount {
                num_constants: ln_eqconsts.len(),
                num_reactions: reactions.len(),
            });
        }
        self.check_species_bounds(reactions, constraints)?;

        let classified = self.classify(constraints)?;
        debug!(
            num_species = self.num_species,
            num_reactions = reactions.len(),
            num_reservoirs = classified.reservoirs.len(),
            num_free = classified.free_ids.len(),
            "classified constraints"
        );

        let sweep = sweep_len(constraints)?;
        let num_iterations = sweep.unwrap_or(1);
        let mut results = Vec::with_capacity(num_iterations);

        for sweep_idx in 0..num_iterations {
            let values: Vec<f64> = constraints
                .iter()
                .map(|c| c.value_at(sweep_idx))
                .collect::<ModelResult<_>>()?;

            let ln_c = self.solve_iteration(
                root_finder,
                reactions,
                ln_eqconsts,
                constraints,
                &classified,
                &values,
            )?;
            debug!(sweep_idx, "solved sweep iteration");
            results.push(ln_c);
        }

        match sweep {
            None => {
                let x = results.pop().expect("exactly one non-sweep iteration");
                Ok(Solution::Single(x))
            }
            Some(_) => Ok(Solution::Sweep(results)),
        }
    }

    /// Partition constraints into reservoirs and true equations, and the
    /// species into fixed and free. Preprocessing only; no state survives
    /// into the residual closure besides the returned index sets.
    fn classify(&self, constraints: &[Constraint]) -> ModelResult<Classified> {
        let mut reservoirs: Vec<(usize, Reservoir)> = Vec::new();
        let mut free_constraints = Vec::new();
        let mut fixed = vec![false; self.num_species];

        for (i, constraint) in constraints.iter().enumerate() {
            match constraint.reservoir()? {
                Some(reservoir) => {
                    let idx = reservoir.species.index() as usize;
                    if fixed[idx] {
                        return Err(ModelError::DuplicateReservoir {
                            species: reservoir.species,
                        });
                    }
                    fixed[idx] = true;
                    reservoirs.push((i, reservoir));
                }
                None => free_constraints.push(i),
            }
        }

        let free_ids = (0..self.num_species).filter(|&i| !fixed[i]).collect();
        Ok(Classified {
            reservoirs,
            free_constraints,
            free_ids,
        })
    }

    /// Solve one sweep iteration with the constraint targets already
    /// resolved to `values`.
    fn solve_iteration<R: RootFinder>(
        &self,
        root_finder: &R,
        reactions: &[Reaction],
        ln_eqconsts: &[f64],
        constraints: &[Constraint],
        classified: &Classified,
        values: &[f64],
    ) -> ModelResult<DVector<f64>> {
        // Full-length vector with reservoir slots pre-filled with their
        // fixed log-concentrations; free slots are scattered in below.
        let mut base = DVector::zeros(self.num_species);
        for (ci, reservoir) in &classified.reservoirs {
            base[reservoir.species.index() as usize] =
                reservoir.concentration(values[*ci]).ln();
        }

        let free_ids = &classified.free_ids;
        debug_assert_eq!(
            free_ids.len(),
            reactions.len() + classified.free_constraints.len()
        );

        let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            let mut ln_c = base.clone();
            for (k, &sid) in free_ids.iter().enumerate() {
                ln_c[sid] = x[k];
            }
            let mut r = DVector::zeros(free_ids.len());
            let mut row = 0;
            for (reaction, &ln_eqconst) in reactions.iter().zip(ln_eqconsts) {
                r[row] = reaction.residual(&ln_c, ln_eqconst);
                row += 1;
            }
            for &ci in &classified.free_constraints {
                r[row] = constraints[ci].residual(&ln_c, values[ci]);
                row += 1;
            }
            Ok(r)
        };

        let x = root_finder.find_root(residual, DVector::zeros(free_ids.len()))?;

        // Reinsert the reservoir log-values around the solved free unknowns.
        let mut ln_c = base;
        for (k, &sid) in free_ids.iter().enumerate() {
            ln_c[sid] = x[k];
        }
        Ok(ln_c)
    }

    /// Every term in every reaction and constraint must reference a species
    /// of this model.
    fn check_species_bounds(
        &self,
        reactions: &[Reaction],
        constraints: &[Constraint],
    ) -> ModelResult<()> {
        let lincombs = reactions
            .iter()
            .map(|r| r.delta())
            .chain(constraints.iter().map(|c| c.lincomb()));
        for lincomb in lincombs {
            for term in lincomb.terms() {
                if term.index() >= self.num_species {
                    return Err(ModelError::SpeciesOutOfRange {
                        index: term.index(),
                        num_species: self.num_species,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::IntoLinComb;

    #[test]
    fn species_list_is_stable_and_ordered() {
        for n in [0, 1, 2, 5] {
            let model = Model::new(n);
            let species = model.species();
            assert_eq!(species.len(), n);
            for (i, s) in species.iter().enumerate() {
                assert_eq!(s.index(), i);
            }
            assert_eq!(model.species(), species);
        }
    }

    #[test]
    fn equation_count_mismatch_is_rejected() {
        let model = Model::new(3);
        let s = model.species();
        let reaction = s[0] >> s[1] + s[2];
        let constraint = (s[0] + s[1]).equals(0.1);

        let err = model.solve(&[reaction], &[0.0], &[constraint]).unwrap_err();
        assert!(matches!(
            err,
            ModelError::EquationCount {
                num_equations: 2,
                num_species: 3
            }
        ));
    }

    #[test]
    fn eqconst_count_mismatch_is_rejected() {
        let model = Model::new(3);
        let s = model.species();
        let reaction = s[0] >> s[1] + s[2];
        let constraints = [(s[0] + s[1]).equals(0.1), (s[1] - s[2]).equals(0.0)];

        let err = model.solve(&[reaction], &[0.0, 1.0], &constraints).unwrap_err();
        assert!(matches!(
            err,
            ModelError::EqConstCount {
                num_constants: 2,
                num_reactions: 1
            }
        ));
    }

    #[test]
    fn foreign_species_is_rejected() {
        let big = Model::new(4);
        let small = Model::new(2);
        let s = big.species();
        let constraints = [s[0].equals(1.0), s[3].equals(1.0)];

        let err = small.solve(&[], &[], &constraints).unwrap_err();
        assert!(matches!(
            err,
            ModelError::SpeciesOutOfRange {
                index: 3,
                num_species: 2
            }
        ));
    }

    #[test]
    fn duplicate_reservoirs_are_rejected() {
        let model = Model::new(2);
        let s = model.species();
        let constraints = [s[0].equals(1.0), (2.0 * s[0]).equals(3.0)];

        let err = model.solve(&[], &[], &constraints).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateReservoir { .. }));
    }

    #[test]
    fn sweep_len_consensus() {
        let model = Model::new(3);
        let s = model.species();

        let no_sweep = [s[0].equals(1.0), (s[1] + s[2]).equals(0.5)];
        assert_eq!(sweep_len(&no_sweep).unwrap(), None);

        let agreeing = [
            s[0].equals(vec![1.0, 2.0, 3.0, 4.0, 5.0]),
            s[1].equals(0.5),
            s[2].equals(vec![0.1, 0.2, 0.3, 0.4, 0.5]),
        ];
        assert_eq!(sweep_len(&agreeing).unwrap(), Some(5));

        let disagreeing = [
            s[0].equals(vec![1.0, 2.0, 3.0, 4.0, 5.0]),
            s[1].equals(vec![0.1, 0.2, 0.3]),
        ];
        assert!(matches!(
            sweep_len(&disagreeing),
            Err(ModelError::SweepLengthMismatch {
                expected: 5,
                found: 3
            })
        ));
    }
}
