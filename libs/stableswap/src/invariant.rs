//! StableSwap invariant solver
//!
//! Newton iteration for the invariant `D` of a multi-asset pool and for the
//! balance `y` of one asset at fixed `D`. Every intermediate quotient is
//! truncated, matching the on-chain contract these quotes mirror.

use crate::error::{SolverError, SolverResult};
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use serde::{Deserialize, Serialize};
use stableswap_config::{SolverConfig, DEFAULT_N_COINS};
use tracing::{trace, warn};

/// Outcome of a Newton solve
///
/// `value` is exactly what [`compute_d`] / [`compute_y`] would return. When
/// `converged` is false the iteration cap was reached and `value` is the last
/// approximation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Convergence {
    pub value: BigInt,
    pub iterations: u32,
    pub converged: bool,
}

/// Invariant solver parameterised by iteration cap and tolerance
#[derive(Debug, Clone, Copy, Default)]
pub struct InvariantSolver {
    config: SolverConfig,
}

impl InvariantSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Compute the invariant `D` for `balances` under amplification `A`
    ///
    /// Solves `A·n^n·S + D = A·n^n·D + D^(n+1) / (n^n · Π x_i)` by iterating
    /// `D = D·(Ann·S + D_P·n) / (D·(Ann − 1) + D_P·(n + 1))` with
    /// `Ann = A·n` and `D_P = D^(n+1) / (n^n · Π x_i)` accumulated one
    /// truncating division per balance.
    ///
    /// # Arguments
    /// * `amplification` - Amplification coefficient `A` (non-negative)
    /// * `balances` - Pool balances in smallest-denomination units (non-negative)
    ///
    /// # Errors
    /// `InvalidCoinCount` for fewer than two balances, `DivisionByZero` when a
    /// balance is zero while the sum is not.
    pub fn solve_d(
        &self,
        amplification: &BigInt,
        balances: &[BigInt],
    ) -> SolverResult<Convergence> {
        if balances.len() < 2 {
            return Err(SolverError::InvalidCoinCount {
                n_coins: balances.len(),
            });
        }

        let n = BigInt::from(balances.len());
        let ann = amplification * &n;
        let s: BigInt = balances.iter().sum();

        if s.is_zero() {
            return Ok(Convergence {
                value: BigInt::zero(),
                iterations: 0,
                converged: true,
            });
        }

        // D_P truncates once per balance, so the visiting order leaks into the
        // last digit. A fixed order keeps D a function of the balance multiset.
        let mut ordered: Vec<&BigInt> = balances.iter().collect();
        ordered.sort();

        let tolerance = BigInt::from(self.config.tolerance);
        let mut d_prev = BigInt::zero();
        let mut d = s.clone();
        let mut iterations = 0;

        while iterations < self.config.max_iterations && (&d - &d_prev).abs() > tolerance {
            let mut d_p = d.clone();
            for balance in &ordered {
                d_p = quotient(&(&d_p * &d), &(*balance * &n), "D_P")?;
            }

            let numerator = &d * (&ann * &s + &d_p * &n);
            let denominator = &d * (&ann - BigInt::one()) + &d_p * (&n + BigInt::one());
            let next = quotient(&numerator, &denominator, "D")?;

            d_prev = std::mem::replace(&mut d, next);
            iterations += 1;
        }

        Ok(self.report("D", d, &d_prev, iterations, &tolerance))
    }

    /// Compute the balance `y` of the other asset that keeps the invariant at `d`
    ///
    /// The remaining balances are folded into `x`, reducing the invariant to
    /// `y² + b·y = c` with `b = x + D/Ann − D` and
    /// `c = D^(n+1) / (n^n · x · Ann)`, iterated as
    /// `y = (y² + c) / (n·y + b)`.
    ///
    /// # Arguments
    /// * `amplification` - Amplification coefficient `A`
    /// * `x` - New balance of the known asset, must be positive
    /// * `d` - Invariant to hold fixed, usually from [`InvariantSolver::solve_d`]
    /// * `n_coins` - Pool coin count (2 for pairwise pools)
    pub fn solve_y(
        &self,
        amplification: &BigInt,
        x: &BigInt,
        d: &BigInt,
        n_coins: u32,
    ) -> SolverResult<Convergence> {
        if n_coins < 2 {
            return Err(SolverError::InvalidCoinCount {
                n_coins: n_coins as usize,
            });
        }

        let n = BigInt::from(n_coins);
        let ann = amplification * &n;

        let b = x + quotient(d, &ann, "D / Ann")? - d;
        let c = quotient(&d.pow(n_coins + 1), &(n.pow(n_coins) * x * &ann), "c")?;

        let tolerance = BigInt::from(self.config.tolerance);
        let mut y_prev = BigInt::zero();
        let mut y = d.clone();
        let mut iterations = 0;

        while iterations < self.config.max_iterations && (&y - &y_prev).abs() > tolerance {
            let numerator = &y * &y + &c;
            let denominator = &n * &y + &b;
            let next = quotient(&numerator, &denominator, "y")?;

            y_prev = std::mem::replace(&mut y, next);
            iterations += 1;
        }

        Ok(self.report("y", y, &y_prev, iterations, &tolerance))
    }

    fn report(
        &self,
        quantity: &'static str,
        value: BigInt,
        previous: &BigInt,
        iterations: u32,
        tolerance: &BigInt,
    ) -> Convergence {
        let converged = (&value - previous).abs() <= *tolerance;

        if converged {
            trace!(quantity, iterations, "Newton iteration converged");
        } else {
            warn!(
                quantity,
                iterations,
                max_iterations = self.config.max_iterations,
                "Newton iteration hit the cap before converging, returning last approximation"
            );
        }

        Convergence {
            value,
            iterations,
            converged,
        }
    }
}

/// Truncating division that reports a zero divisor instead of panicking
fn quotient(numerator: &BigInt, denominator: &BigInt, context: &'static str) -> SolverResult<BigInt> {
    numerator
        .checked_div(denominator)
        .ok_or(SolverError::DivisionByZero { context })
}

/// Compute the StableSwap invariant `D` with the default solver
pub fn compute_d(amplification: &BigInt, balances: &[BigInt]) -> SolverResult<BigInt> {
    InvariantSolver::default()
        .solve_d(amplification, balances)
        .map(|solution| solution.value)
}

/// Compute `y` for a two-asset pool with the default solver
pub fn compute_y(amplification: &BigInt, x: &BigInt, d: &BigInt) -> SolverResult<BigInt> {
    compute_y_with_coins(amplification, x, d, DEFAULT_N_COINS)
}

/// Compute `y` for an `n_coins` pool with the default solver
pub fn compute_y_with_coins(
    amplification: &BigInt,
    x: &BigInt,
    d: &BigInt,
    n_coins: u32,
) -> SolverResult<BigInt> {
    InvariantSolver::default()
        .solve_y(amplification, x, d, n_coins)
        .map(|solution| solution.value)
}
