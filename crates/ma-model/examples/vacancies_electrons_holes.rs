//! Defect chemistry of an acceptor-doped oxide: oxygen incorporation and
//! electron/hole pair formation, swept over the oxygen partial pressure.
//!
//! The oxygen constraint is a sweeping reservoir, so the model is solved
//! once per pressure with only the four defect concentrations as unknowns.

use ma_model::{IntoLinComb, LinComb, Model};

/// `n` logarithmically spaced values from `10^lo` to `10^hi`.
fn logspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let exponent = lo + (hi - lo) * i as f64 / (n - 1) as f64;
            10.0_f64.powf(exponent)
        })
        .collect()
}

fn main() {
    // species: oxygen gas, oxygen vacancies, oxygen ions, electrons, holes
    let model = Model::new(5);
    let species = model.species();
    let (o2, vo, ox, em, hp) = (species[0], species[1], species[2], species[3], species[4]);

    // acceptor-doping level
    let xdop = 0.05;

    // oxygen partial pressure variation, electroneutrality, oxygen site balance
    let p_o2 = logspace(-35.0, 0.0, 100);
    let cstr_o2 = o2.equals(p_o2);
    let cstr_en = (2.0 * vo + hp - em).equals(xdop);
    let cstr_ox = (ox + vo).equals(2.0);

    // incorporation of gaseous oxygen and electron/hole pair formation
    let rct_incorp = 0.5 * o2 + vo >> ox + 2.0 * hp;
    let rct_pair = LinComb::nil() >> em + hp;
    let ln_k_incorp = 5.0;
    let ln_k_pair = -20.0;

    let solution = model
        .solve(
            &[rct_incorp, rct_pair],
            &[ln_k_incorp, ln_k_pair],
            &[cstr_o2, cstr_en, cstr_ox],
        )
        .expect("solve failed");
    let results = solution.into_sweep().expect("oxygen pressure sweeps");

    println!("{:>12} {:>12} {:>12} {:>12}", "p(O2)", "[vo]", "[e']", "[h*]");
    for ln_c in results.iter().step_by(9) {
        println!(
            "{:>12.3e} {:>12.3e} {:>12.3e} {:>12.3e}",
            ln_c[0].exp(),
            ln_c[1].exp(),
            ln_c[3].exp(),
            ln_c[4].exp(),
        );
    }
}
