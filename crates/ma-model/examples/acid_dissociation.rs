//! Equilibrium of a simple acid dissociation: HA <=> H+ + A-.

use ma_model::{IntoLinComb, Model};

fn main() {
    let model = Model::new(3);
    let species = model.species();
    let (ha, a, h) = (species[0], species[1], species[2]);

    // initial acid concentration and dissociation constant
    let c0_ha = 0.1; // [mol/L]
    let pka = 4.75;
    let ln_ka = (10.0_f64).powf(-pka).ln();

    // mass balance on the acid and electroneutrality ([H+] = [A-])
    let mass_balance = (ha + a).equals(c0_ha);
    let electroneutrality = (h - a).equals(0.0);

    let reaction = ha >> h + a;
    println!("reaction:   {reaction}");
    println!("constraint: {mass_balance}");
    println!("constraint: {electroneutrality}");

    let solution = model
        .solve(&[reaction], &[ln_ka], &[mass_balance, electroneutrality])
        .expect("solve failed");
    let ln_c = solution.into_single().expect("not a sweep");

    println!("Initial concentration of HA: {c0_ha:.2e} mol/L");
    println!("Equilibrium concentrations:");
    println!("  HA: {:.2e} mol/L", ln_c[0].exp());
    println!("  A-: {:.2e} mol/L", ln_c[1].exp());
    println!("  H+: {:.2e} mol/L", ln_c[2].exp());
}
