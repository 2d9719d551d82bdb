//! Expression algebra over unknown species concentrations.
//!
//! Three value types form the algebra: [`Species`] (one unknown), [`Term`]
//! (a species with a numeric factor), and [`LinComb`] (an ordered list of
//! terms). All operations are pure and return new values. Addition and
//! subtraction are syntactic concatenation: duplicate terms for the same
//! species are legal and are never merged, summing is deferred to
//! evaluation time.

use crate::constraint::{Constraint, Target};
use crate::reaction::Reaction;
use core::fmt;
use core::ops::{Add, Mul, Neg, Shr, Sub};
use ma_core::SpeciesId;

/// One unknown concentration, identified by a stable index in
/// `[0, num_species)`. Created only by [`crate::Model`]; immutable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Species {
    id: SpeciesId,
}

impl Species {
    pub(crate) fn new(id: SpeciesId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> SpeciesId {
        self.id
    }

    /// 0-based index into concentration vectors.
    pub fn index(&self) -> usize {
        self.id.index() as usize
    }
}

/// A species with a numeric pre-factor: `factor * species`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Term {
    pub species: SpeciesId,
    pub factor: f64,
}

impl Term {
    pub fn new(species: SpeciesId, factor: f64) -> Self {
        Self { species, factor }
    }

    /// 0-based index into concentration vectors.
    pub fn index(&self) -> usize {
        self.species.index() as usize
    }
}

/// An ordered linear combination of species: `Σ factor_i * species_i`.
///
/// Term order is insertion order, not canonical. The empty combination
/// ([`LinComb::nil`]) is the additive identity; it expresses reactions that
/// create species from no precursor (e.g. water autoprotolysis).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinComb {
    terms: Vec<Term>,
}

impl LinComb {
    /// The distinguished empty combination ("nothing").
    pub fn nil() -> Self {
        Self::default()
    }

    pub fn from_terms(terms: Vec<Term>) -> Self {
        Self { terms }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }
}

impl fmt::Display for LinComb {
    /// Signed-sum rendering: `{+|-}{factor}*species_{id} ` per term, in
    /// term order. The `{:?}` float format keeps the decimal point
    /// (`+1.0*species_2 `, not `+1*species_2 `).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for term in &self.terms {
            if term.factor > 0.0 {
                write!(f, "+")?;
            }
            write!(f, "{:?}*species_{} ", term.factor, term.species)?;
        }
        Ok(())
    }
}

/// Promotion into the canonical [`LinComb`] form, so downstream code
/// (constraints, reactions) only ever sees one shape.
///
/// Also carries the builder entry points of the algebra: [`equals`] for
/// constraints and [`reacts_to`] (or the `>>` operator) for reactions.
///
/// [`equals`]: IntoLinComb::equals
/// [`reacts_to`]: IntoLinComb::reacts_to
pub trait IntoLinComb: Sized {
    fn into_lincomb(self) -> LinComb;

    /// Build the constraint `self == target`. A scalar target yields a
    /// plain constraint, a sequence of scalars a sweep constraint.
    fn equals(self, target: impl Into<Target>) -> Constraint {
        Constraint::new(self, target)
    }

    /// Build the reaction `self >> products`.
    fn reacts_to(self, products: impl IntoLinComb) -> Reaction {
        Reaction::new(self, products)
    }
}

impl IntoLinComb for Species {
    fn into_lincomb(self) -> LinComb {
        LinComb::from_terms(vec![Term::new(self.id, 1.0)])
    }
}

impl IntoLinComb for Term {
    fn into_lincomb(self) -> LinComb {
        LinComb::from_terms(vec![self])
    }
}

impl IntoLinComb for LinComb {
    fn into_lincomb(self) -> LinComb {
        self
    }
}

// --- negation ---

impl Neg for Species {
    type Output = Term;
    fn neg(self) -> Term {
        Term::new(self.id, -1.0)
    }
}

impl Neg for Term {
    type Output = Term;
    fn neg(self) -> Term {
        Term::new(self.species, -self.factor)
    }
}

impl Neg for LinComb {
    type Output = LinComb;
    fn neg(self) -> LinComb {
        LinComb::from_terms(self.terms.into_iter().map(|t| -t).collect())
    }
}

// --- scalar multiplication (both `expr * f64` and `f64 * expr`) ---

impl Mul<f64> for Species {
    type Output = Term;
    fn mul(self, factor: f64) -> Term {
        Term::new(self.id, factor)
    }
}

impl Mul<Species> for f64 {
    type Output = Term;
    fn mul(self, species: Species) -> Term {
        species * self
    }
}

impl Mul<f64> for Term {
    type Output = Term;
    fn mul(self, factor: f64) -> Term {
        Term::new(self.species, self.factor * factor)
    }
}

impl Mul<Term> for f64 {
    type Output = Term;
    fn mul(self, term: Term) -> Term {
        term * self
    }
}

impl Mul<f64> for LinComb {
    type Output = LinComb;
    fn mul(self, factor: f64) -> LinComb {
        LinComb::from_terms(self.terms.into_iter().map(|t| t * factor).collect())
    }
}

impl Mul<LinComb> for f64 {
    type Output = LinComb;
    fn mul(self, lincomb: LinComb) -> LinComb {
        lincomb * self
    }
}

// --- addition, subtraction, reaction building ---
//
// Addition concatenates both sides' term lists; subtraction concatenates
// with the right side's factors sign-flipped. Any operand is first promoted
// to LinComb form.

fn concat(lhs: LinComb, rhs: LinComb) -> LinComb {
    let mut terms = lhs.terms;
    terms.extend(rhs.terms);
    LinComb::from_terms(terms)
}

macro_rules! impl_combine_ops {
    ($($ty:ty),*) => {
        $(
            impl<R: IntoLinComb> Add<R> for $ty {
                type Output = LinComb;
                fn add(self, rhs: R) -> LinComb {
                    concat(self.into_lincomb(), rhs.into_lincomb())
                }
            }

            impl<R: IntoLinComb> Sub<R> for $ty {
                type Output = LinComb;
                fn sub(self, rhs: R) -> LinComb {
                    concat(self.into_lincomb(), -rhs.into_lincomb())
                }
            }

            impl<R: IntoLinComb> Shr<R> for $ty {
                type Output = Reaction;
                fn shr(self, products: R) -> Reaction {
                    Reaction::new(self, products)
                }
            }
        )*
    };
}

impl_combine_ops!(Species, Term, LinComb);
