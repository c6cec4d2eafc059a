//! StableSwap Invariant Solver Property Tests
//!
//! These tests validate properties of `compute_d` / `compute_y` that must hold
//! for every realistic pool, regardless of specific balances.

use proptest::prelude::*;
use stableswap_amm::{
    compute_d, compute_y, BigInt, InvariantSolver, SolverConfig, DEFAULT_N_COINS,
};

fn big(value: u128) -> BigInt {
    BigInt::from(value)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::WARN)
        .try_init();
}

// Property test strategies
prop_compose! {
    fn amplification()
        (a in 1u128..5_000u128) -> BigInt {
        big(a)
    }
}

prop_compose! {
    fn balance()
        (value in 1_000u128..1_000_000_000_000_000_000_000_000u128) -> u128 {
        value
    }
}

prop_compose! {
    // Two-asset pool within a 1:2 ratio band
    fn near_peg_pool()
        (x in balance(), permille in 500u128..=2_000u128) -> (u128, u128) {
        (x, x * permille / 1_000)
    }
}

prop_compose! {
    // Two-asset pool skewed up to 1:10_000 in either direction
    fn skewed_pool()
        (x in 100u128..1_000_000_000_000_000_000_000_000u128,
         factor in 1u128..=10_000u128,
         grow in any::<bool>()) -> (u128, u128) {
        let y = if grow { x * factor } else { (x / factor).max(1) };
        (x, y)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_zero_pool_has_zero_invariant(a in 0u128..1_000_000u128, n in 2usize..8) {
        let zeros = vec![BigInt::from(0); n];
        prop_assert_eq!(compute_d(&big(a), &zeros).unwrap(), BigInt::from(0));
    }

    #[test]
    fn prop_invariant_ignores_balance_order(
        a in amplification(),
        values in prop::collection::vec(balance(), 2..6),
    ) {
        let forward: Vec<BigInt> = values.iter().copied().map(big).collect();
        let mut backward = forward.clone();
        backward.reverse();
        let mut rotated = forward.clone();
        rotated.rotate_left(1);

        let d = compute_d(&a, &forward).unwrap();
        prop_assert_eq!(&compute_d(&a, &backward).unwrap(), &d);
        prop_assert_eq!(&compute_d(&a, &rotated).unwrap(), &d);
    }

    #[test]
    fn prop_round_trip_recovers_balance((x, y) in near_peg_pool(), a in amplification()) {
        let d = compute_d(&a, &[big(x), big(y)]).unwrap();
        let recovered = compute_y(&a, &big(x), &d).unwrap();

        // Within tolerance, and never above the true balance
        prop_assert!(recovered <= big(y), "recovered {} > {}", recovered, y);
        prop_assert!(big(y) - &recovered <= big(1), "recovered {} vs {}", recovered, y);
    }

    #[test]
    fn prop_more_x_means_less_y(
        (x, y) in near_peg_pool(),
        a in amplification(),
        bump_pct in 1u128..=50u128,
    ) {
        let d = compute_d(&a, &[big(x), big(y)]).unwrap();
        let dx = (x * bump_pct / 100).max(1);

        let before = compute_y(&a, &big(x), &d).unwrap();
        let after = compute_y(&a, &big(x + dx), &d).unwrap();
        prop_assert!(after < before, "y did not fall: {} -> {}", before, after);
    }

    #[test]
    fn prop_balanced_pool_invariant_is_sum(b in 1u128..1_000_000_000_000_000_000_000_000u128, a in 0u128..100_000u128) {
        prop_assert_eq!(compute_d(&big(a), &[big(b), big(b)]).unwrap(), big(2 * b));
    }

    #[test]
    fn prop_imbalance_is_penalised(
        b in 1_000_000u128..1_000_000_000_000_000_000_000_000u128,
        a in amplification(),
        cut_pct in 1u128..=50u128,
    ) {
        let delta = (b * cut_pct / 100).max(1);
        let balanced = compute_d(&a, &[big(b), big(b)]).unwrap();
        let unbalanced = compute_d(&a, &[big(b), big(b - delta)]).unwrap();
        prop_assert!(unbalanced < balanced);
    }

    #[test]
    fn prop_invariant_never_exceeds_sum((x, y) in skewed_pool(), a in amplification()) {
        let d = compute_d(&a, &[big(x), big(y)]).unwrap();
        prop_assert!(d <= big(x) + big(y));
    }

    #[test]
    fn prop_converges_within_cap((x, y) in skewed_pool(), a in amplification()) {
        init_tracing();
        let solver = InvariantSolver::default();

        let d = solver.solve_d(&a, &[big(x), big(y)]).unwrap();
        prop_assert!(d.converged, "D did not converge for A={} x={} y={}", a, x, y);
        prop_assert!(d.iterations <= 20);

        let solved = solver.solve_y(&a, &big(x), &d.value, DEFAULT_N_COINS).unwrap();
        prop_assert!(solved.converged, "y did not converge for A={} x={} y={}", a, x, y);
        prop_assert!(solved.iterations <= 20);
    }

    #[test]
    fn prop_three_coin_y_converges_within_cap(
        d in 100u128..1_000_000u128,
        a in amplification(),
        permille in 1_000u128..=3_000u128,
    ) {
        init_tracing();
        let x = d * permille / 1_000;

        let solved = InvariantSolver::default().solve_y(&a, &big(x), &big(d), 3).unwrap();
        prop_assert!(solved.converged, "y did not converge for A={} x={} D={}", a, x, d);
        prop_assert!(solved.iterations <= 20);
    }

    #[test]
    fn prop_report_value_matches_plain_function((x, y) in skewed_pool(), a in amplification()) {
        let tight = InvariantSolver::new(SolverConfig { max_iterations: 2, tolerance: 1 });
        let default_report = InvariantSolver::default().solve_d(&a, &[big(x), big(y)]).unwrap();

        prop_assert_eq!(&default_report.value, &compute_d(&a, &[big(x), big(y)]).unwrap());

        // A tighter cap only ever stops earlier
        let capped = tight.solve_d(&a, &[big(x), big(y)]).unwrap();
        prop_assert!(capped.iterations <= 2);
        prop_assert!(capped.iterations <= default_report.iterations);
    }
}

#[test]
fn test_representative_round_trip() {
    let a = big(2000);
    let d = compute_d(&a, &[big(1_000_000), big(1_000_000)]).unwrap();
    assert_eq!(d, big(2_000_000));
    assert_eq!(compute_y(&a, &big(1_000_000), &d).unwrap(), big(1_000_000));
}

#[test]
fn test_imbalance_scenario() {
    let a = big(60);
    let balanced = compute_d(&a, &[big(100_000_000), big(100_000_000)]).unwrap();
    let unbalanced = compute_d(&a, &[big(100_000_000), big(99_000_000)]).unwrap();
    assert!(unbalanced < balanced);
}

#[test]
fn test_solver_is_shareable_across_threads() {
    let solver = InvariantSolver::default();
    let expected = compute_d(&big(60), &[big(100_000_000), big(99_000_000)]).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(move || {
                    solver
                        .solve_d(&big(60), &[big(100_000_000), big(99_000_000)])
                        .unwrap()
                        .value
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
