//! End-to-end equilibrium solves through the default Newton root finder.

use ma_model::{sweep_len, IntoLinComb, LinComb, Model, ModelError, Solution};
use nalgebra::DVector;

fn ln_ka(pka: f64) -> f64 {
    (10.0_f64).powf(-pka).ln()
}

#[test]
fn acid_dissociation() {
    // HA <=> H+ + A-  with mass balance and electroneutrality
    let model = Model::new(3);
    let s = model.species();
    let (ha, a, h) = (s[0], s[1], s[2]);

    let reaction = ha >> h + a;
    let c0_ha = 0.1;
    let mass_balance = (ha + a).equals(c0_ha);
    let electroneutrality = (h - a).equals(0.0);

    let solution = model
        .solve(&[reaction], &[ln_ka(4.75)], &[mass_balance, electroneutrality])
        .unwrap();
    let ln_c = solution.into_single().unwrap();
    let c: Vec<f64> = ln_c.iter().map(|x| x.exp()).collect();

    // known equilibrium for c0 = 0.1 mol/L, pKa = 4.75
    assert!((c[0] - 9.87e-2).abs() < 1e-3);
    assert!((c[1] - 1.32e-3).abs() < 1e-4);
    assert!((c[2] - 1.32e-3).abs() < 1e-4);

    // and the equations themselves hold
    assert!((c[0] + c[1] - c0_ha).abs() < 1e-9);
    assert!((c[2] - c[1]).abs() < 1e-9);
    assert!((c[2] * c[1] / c[0] - (10.0_f64).powf(-4.75)).abs() < 1e-9);
}

#[test]
fn water_autoprotolysis_from_nil() {
    // nil >> H+ + OH-  : creation from no precursor
    let model = Model::new(2);
    let s = model.species();
    let (h, oh) = (s[0], s[1]);

    let reaction = LinComb::nil() >> h + oh;
    let ln_kw = ln_ka(14.0);
    let electroneutrality = (h - oh).equals(0.0);

    let solution = model
        .solve(&[reaction], &[ln_kw], &[electroneutrality])
        .unwrap();
    let ln_c = solution.into_single().unwrap();

    // [H+] = [OH-] = 1e-7
    assert!((ln_c[0].exp() - 1e-7).abs() < 1e-10);
    assert!((ln_c[1].exp() - 1e-7).abs() < 1e-10);
}

#[test]
fn reservoir_constraint_fixes_a_species() {
    // Acid dissociation against a proton reservoir (pH buffered at 5).
    let model = Model::new(3);
    let s = model.species();
    let (ha, a, h) = (s[0], s[1], s[2]);

    let reaction = ha >> h + a;
    let c0_ha = 0.1;
    let h_fixed = 1e-5;
    let constraints = [(ha + a).equals(c0_ha), h.equals(h_fixed)];

    let solution = model.solve(&[reaction], &[ln_ka(4.75)], &constraints).unwrap();
    let ln_c = solution.into_single().unwrap();
    let c: Vec<f64> = ln_c.iter().map(|x| x.exp()).collect();

    // the reservoir species comes back at exactly its fixed concentration
    assert_eq!(ln_c[2], h_fixed.ln());
    // mass balance and mass-action law hold for the solved species
    assert!((c[0] + c[1] - c0_ha).abs() < 1e-9);
    assert!((c[2] * c[1] / c[0] - (10.0_f64).powf(-4.75)).abs() < 1e-9);
}

#[test]
fn reservoir_with_factor_scales_fixed_value() {
    // 2*s0 == 10.7 holds s0 at 5.35; the remaining equation ties s1 to s0.
    let model = Model::new(2);
    let s = model.species();

    let reaction = s[0] >> s[1];
    let ln_k = 0.4;
    let constraints = [(2.0 * s[0]).equals(10.7)];

    let solution = model.solve(&[reaction], &[ln_k], &constraints).unwrap();
    let ln_c = solution.into_single().unwrap();

    assert_eq!(ln_c[0], 5.35_f64.ln());
    // mass action: ln c1 - ln c0 = ln K
    assert!((ln_c[1] - ln_c[0] - ln_k).abs() < 1e-9);
}

#[test]
fn schottky_disorder_with_dummy_reservoir() {
    // nil >> vm + 2*vo with a dummy species held at 1.0 and
    // electroneutrality 2*vo - 4*vm == 0
    let model = Model::new(3);
    let s = model.species();
    let (nil, vm, vo) = (s[0], s[1], s[2]);

    let reaction = nil >> vm + 2.0 * vo;
    let ln_k = -25.0;
    let constraints = [nil.equals(1.0), (2.0 * vo - 4.0 * vm).equals(0.0)];

    let solution = model.solve(&[reaction], &[ln_k], &constraints).unwrap();
    let ln_c = solution.into_single().unwrap();
    let c: Vec<f64> = ln_c.iter().map(|x| x.exp()).collect();

    assert_eq!(ln_c[0], 0.0);
    // electroneutrality and mass action
    assert!((2.0 * c[2] - 4.0 * c[1]).abs() < 1e-12);
    assert!((ln_c[1] + 2.0 * ln_c[2] - ln_c[0] - ln_k).abs() < 1e-9);
}

#[test]
fn sweep_solves_once_per_value() {
    // Sweep the total acid concentration; every index must satisfy its own
    // mass balance and the shared mass-action law.
    let model = Model::new(3);
    let s = model.species();
    let (ha, a, h) = (s[0], s[1], s[2]);

    let c0_values = [0.05, 0.1, 0.2, 0.5];
    let reaction = ha >> h + a;
    let constraints = [(ha + a).equals(c0_values), (h - a).equals(0.0)];

    let solution = model.solve(&[reaction], &[ln_ka(4.75)], &constraints).unwrap();
    let results = solution.into_sweep().unwrap();
    assert_eq!(results.len(), c0_values.len());

    for (ln_c, &c0) in results.iter().zip(&c0_values) {
        let c: Vec<f64> = ln_c.iter().map(|x| x.exp()).collect();
        assert!((c[0] + c[1] - c0).abs() < 1e-9);
        assert!((c[2] - c[1]).abs() < 1e-9);
        assert!((c[2] * c[1] / c[0] - (10.0_f64).powf(-4.75)).abs() < 1e-9);
    }
}

#[test]
fn sweeping_reservoir_updates_fixed_value_per_index() {
    // The proton reservoir itself sweeps; the fixed log-value must track it.
    let model = Model::new(3);
    let s = model.species();
    let (ha, a, h) = (s[0], s[1], s[2]);

    let h_values = [1e-6, 1e-5, 1e-4];
    let reaction = ha >> h + a;
    let constraints = [(ha + a).equals(0.1), h.equals(h_values)];

    let solution = model.solve(&[reaction], &[ln_ka(4.75)], &constraints).unwrap();
    let results = solution.into_sweep().unwrap();
    assert_eq!(results.len(), 3);

    for (ln_c, &h_fixed) in results.iter().zip(&h_values) {
        assert_eq!(ln_c[2], h_fixed.ln());
        let c: Vec<f64> = ln_c.iter().map(|x| x.exp()).collect();
        assert!((c[0] + c[1] - 0.1).abs() < 1e-9);
        assert!((c[2] * c[1] / c[0] - (10.0_f64).powf(-4.75)).abs() < 1e-9);
    }
}

#[test]
fn mismatched_sweep_lengths_fail() {
    let model = Model::new(3);
    let s = model.species();
    let (ha, a, h) = (s[0], s[1], s[2]);

    let constraints = [
        (ha + a).equals(vec![0.1, 0.2, 0.3, 0.4, 0.5]),
        (h - a).equals(vec![0.0, 0.0, 0.0]),
    ];
    assert!(matches!(
        sweep_len(&constraints),
        Err(ModelError::SweepLengthMismatch {
            expected: 5,
            found: 3
        })
    ));

    let reaction = ha >> h + a;
    let err = model
        .solve(&[reaction], &[ln_ka(4.75)], &constraints)
        .unwrap_err();
    assert!(matches!(err, ModelError::SweepLengthMismatch { .. }));
}

#[test]
fn repeated_solves_are_identical() {
    let model = Model::new(3);
    let s = model.species();
    let (ha, a, h) = (s[0], s[1], s[2]);

    let reaction = ha >> h + a;
    let constraints = [(ha + a).equals(vec![0.05, 0.1]), (h - a).equals(0.0)];

    let first = model
        .solve(&[reaction.clone()], &[ln_ka(4.75)], &constraints)
        .unwrap();
    let second = model
        .solve(&[reaction], &[ln_ka(4.75)], &constraints)
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn solution_iter_covers_both_shapes() {
    let single = Solution::Single(DVector::zeros(2));
    assert_eq!(single.iter().count(), 1);

    let sweep = Solution::Sweep(vec![DVector::zeros(2), DVector::zeros(2)]);
    assert_eq!(sweep.iter().count(), 2);
    assert!(sweep.into_single().is_none());
}
