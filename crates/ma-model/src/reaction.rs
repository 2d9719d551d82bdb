//! Mass-action reactions.

use crate::species::{IntoLinComb, LinComb};
use core::fmt;
use nalgebra::DVector;

/// A chemical reaction `reactants >> products`.
///
/// The derived stoichiometric combination `delta = products - reactants`
/// encodes the mass-action law in log domain:
/// `Σ delta_i.factor * ln[c_i] == ln(K)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Reaction {
    reactants: LinComb,
    products: LinComb,
    delta: LinComb,
}

impl Reaction {
    pub fn new(reactants: impl IntoLinComb, products: impl IntoLinComb) -> Self {
        let reactants = reactants.into_lincomb();
        let products = products.into_lincomb();
        let delta = products.clone() - reactants.clone();
        Self {
            reactants,
            products,
            delta,
        }
    }

    pub fn reactants(&self) -> &LinComb {
        &self.reactants
    }

    pub fn products(&self) -> &LinComb {
        &self.products
    }

    /// Products minus reactants, term-wise.
    pub fn delta(&self) -> &LinComb {
        &self.delta
    }

    /// Log-domain mass-action residual: zero exactly when
    /// `Π [products]^stoich / Π [reactants]^stoich == K`.
    pub fn residual(&self, ln_concentrations: &DVector<f64>, ln_eqconst: f64) -> f64 {
        let weighted_sum: f64 = self
            .delta
            .terms()
            .iter()
            .map(|term| term.factor * ln_concentrations[term.index()])
            .sum();
        weighted_sum - ln_eqconst
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} >> {}", self.reactants, self.products)
    }
}
