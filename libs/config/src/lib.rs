//! # StableSwap Solver Configuration
//!
//! Tuning parameters for the StableSwap invariant solver, together with the
//! defaults that mirror the on-chain contract's Newton iteration.
//!
//! ## Features
//!
//! - **Defaults**: iteration cap and convergence tolerance used by every
//!   solver entry point that is not handed an explicit configuration
//! - **Layered loading**: optional TOML file, then `STABLESWAP_*` environment
//!   variables
//!
//! ## Usage
//!
//! ```rust
//! use stableswap_config::{defaults, SolverConfig};
//!
//! let config = SolverConfig::default();
//! assert_eq!(config.max_iterations, defaults::DEFAULT_MAX_ITERATIONS);
//! assert_eq!(config.tolerance, defaults::DEFAULT_TOLERANCE);
//! ```

pub mod defaults;
pub mod solver_config;

pub use defaults::*;
pub use solver_config::{load_config, SolverConfig};
