//! Solver defaults
//!
//! These values reproduce the reference Newton iteration bit for bit. Changing
//! them changes quotes.

/// Maximum Newton iterations for both `D` and `y`
pub const DEFAULT_MAX_ITERATIONS: u32 = 20;

/// Absolute convergence tolerance, in smallest-denomination units
pub const DEFAULT_TOLERANCE: u64 = 1;

/// Coin count assumed by the single-asset solve when none is given
pub const DEFAULT_N_COINS: u32 = 2;

/// Environment variable prefix for overrides (`STABLESWAP_MAX_ITERATIONS`, ...)
pub const ENV_PREFIX: &str = "STABLESWAP";
