//! Error types for the StableSwap invariant solver
//!
//! The solver is deliberately permissive: the all-zero pool is handled and
//! hitting the iteration cap is reported through [`crate::Convergence`], not
//! here. What remains are arithmetic-domain failures that indicate an invalid
//! pool state upstream.

use thiserror::Error;

/// Errors surfaced by `compute_d` / `compute_y` and the solver methods
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// A divisor evaluated to zero (zero balance, zero `x`, zero amplification)
    #[error("Division by zero while computing {context}")]
    DivisionByZero { context: &'static str },

    /// Pools need at least two assets
    #[error("Invalid coin count {n_coins}: a pool needs at least 2 assets")]
    InvalidCoinCount { n_coins: usize },
}

/// Result alias for solver operations
pub type SolverResult<T> = Result<T, SolverError>;
