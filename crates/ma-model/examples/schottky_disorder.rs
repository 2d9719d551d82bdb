//! Schottky disorder in an M O2 crystal: vacancy pairs form from the
//! perfect lattice (a dummy species held at a fixed molar fraction of 1),
//! subject to charge neutrality between metal and oxygen vacancies.
//!
//! The dummy-species constraint is a reservoir, so only the two vacancy
//! concentrations are actually solved for. Sweeping the reaction constant
//! is left to the reader; here the formation energy is fixed.

use ma_model::{IntoLinComb, Model};

fn main() {
    let model = Model::new(3);
    let species = model.species();
    let (nil, vm, vo) = (species[0], species[1], species[2]);

    // molar fractions: particles per formula unit of crystal
    let constraint_nil = nil.equals(1.0);
    let electroneutrality = (2.0 * vo - 4.0 * vm).equals(0.0);

    let reaction = nil >> vm + 2.0 * vo;
    let ln_k = -25.0;

    let solution = model
        .solve(&[reaction], &[ln_k], &[constraint_nil, electroneutrality])
        .expect("solve failed");
    let ln_c = solution.into_single().expect("not a sweep");

    let c_vm = ln_c[1].exp();
    let c_vo = ln_c[2].exp();
    println!("Results:");
    println!("  [vm] = {:.2e} (i.e., {:.3}% of M sites)", c_vm, c_vm * 100.0);
    println!("  [vo] = {:.2e} (i.e., {:.3}% of O sites)", c_vo, 0.5 * c_vo * 100.0);
}
