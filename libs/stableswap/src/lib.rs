//! # StableSwap AMM Library - Invariant Solver and Quote Mathematics
//!
//! ## Purpose
//!
//! Off-chain mirror of the StableSwap pricing kernel. Computes the pool
//! invariant `D` and the implied balance `y` of one asset on arbitrary-precision
//! integers with the same truncation, tolerance and iteration cap as the
//! deployed contract, so that swap quotes, liquidity ratios and APR inputs shown
//! to users match what settlement will do.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Pool balances and amplification fetched by the caller
//! - **Output Destinations**: Quote surfaces, liquidity-add/remove estimators
//! - **Precision**: `num_bigint::BigInt` throughout, smallest-denomination units
//! - **Determinism**: Pure functions, no shared state, bounded iteration count
//!
//! ## Architecture Role
//!
//! [`invariant`] is the kernel. [`swap_math`] and [`liquidity`] are the caller
//! side: they turn `D` and `y` into amounts.
//!
//! See [`architecture_diagram()`] for visual representation of the data flow.

pub mod error;
pub mod invariant;
pub mod liquidity;
pub mod pool_traits;
pub mod swap_math;

pub use error::{SolverError, SolverResult};
pub use invariant::{compute_d, compute_y, compute_y_with_coins, Convergence, InvariantSolver};
pub use liquidity::LiquidityMath;
pub use pool_traits::AmmPool;
pub use swap_math::{StableSwapMath, StableSwapPoolState};

/// Common types for StableSwap calculations
pub use num_bigint::BigInt;
pub use rust_decimal::Decimal;
pub use stableswap_config::{SolverConfig, DEFAULT_N_COINS};

/// Architecture diagram showing solver data flow and component relationships
#[cfg_attr(doc, aquamarine::aquamarine)]
/// ```mermaid
/// graph LR
///     subgraph Input["Pool State"]
///         A[Amplification]
///         B[Balances]
///         L[LP Supply]
///     end
///
///     subgraph Kernel["Invariant Solver"]
///         D[compute_d]
///         Y[compute_y]
///     end
///
///     subgraph Caller["Quote Layer"]
///         SW[Swap Quotes]
///         LQ[Liquidity Ratios]
///         VP[Virtual Price]
///     end
///
///     A --> D
///     B --> D
///     D --> Y
///     A --> Y
///
///     Y --> SW
///     D --> LQ
///     Y --> LQ
///     L --> LQ
///     D --> VP
///     L --> VP
///
///     style Input fill:#e1f5fe
///     style Kernel fill:#fff3e0
///     style Caller fill:#e8f5e9
/// ```
pub fn architecture_diagram() {
    // This function exists solely for documentation purposes
    // The diagram is rendered by aquamarine in rustdoc
}
