//! Water autoprotolysis: H2O <=> H+ + OH-, with the water activity folded
//! into the equilibrium constant so the reaction creates ions from `nil`.

use ma_model::{IntoLinComb, LinComb, Model};

fn main() {
    let model = Model::new(2);
    let species = model.species();
    let (h, oh) = (species[0], species[1]);

    // Kw = [H+][OH-] = 1e-14 at room temperature
    let ln_kw = (1e-14_f64).ln();

    let reaction = LinComb::nil() >> h + oh;
    let electroneutrality = (h - oh).equals(0.0);

    let solution = model
        .solve(&[reaction], &[ln_kw], &[electroneutrality])
        .expect("solve failed");
    let ln_c = solution.into_single().expect("not a sweep");

    println!("Equilibrium concentrations:");
    println!("  H+:  {:.2e} mol/L", ln_c[0].exp());
    println!("  OH-: {:.2e} mol/L", ln_c[1].exp());
    println!("pH = {:.2}", -ln_c[0].exp().log10());
}
