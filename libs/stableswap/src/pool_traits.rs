//! Pool trait definitions for a unified quote interface

use crate::{compute_d, BigInt, StableSwapMath, StableSwapPoolState};
use anyhow::Result;

/// Unified pool interface for quote calculations
pub trait AmmPool {
    /// Calculate output amount for given input
    fn get_amount_out(&self, amount_in: &BigInt) -> Result<BigInt>;

    /// Calculate required input for desired output
    fn get_amount_in(&self, amount_out: &BigInt) -> Result<BigInt>;

    /// Get current reserves
    fn get_liquidity(&self) -> (BigInt, BigInt);

    /// Get fee tier
    fn get_fee_bps(&self) -> u32;

    /// Get the pool invariant at current reserves
    fn get_invariant(&self) -> Result<BigInt>;
}

impl AmmPool for StableSwapPoolState {
    fn get_amount_out(&self, amount_in: &BigInt) -> Result<BigInt> {
        StableSwapMath::calculate_output_amount(
            amount_in,
            &self.reserve_in,
            &self.reserve_out,
            &self.amplification,
            self.fee_bps,
        )
    }

    fn get_amount_in(&self, amount_out: &BigInt) -> Result<BigInt> {
        StableSwapMath::calculate_input_amount(
            amount_out,
            &self.reserve_in,
            &self.reserve_out,
            &self.amplification,
            self.fee_bps,
        )
    }

    fn get_liquidity(&self) -> (BigInt, BigInt) {
        (self.reserve_in.clone(), self.reserve_out.clone())
    }

    fn get_fee_bps(&self) -> u32 {
        self.fee_bps
    }

    fn get_invariant(&self) -> Result<BigInt> {
        Ok(compute_d(
            &self.amplification,
            &[self.reserve_in.clone(), self.reserve_out.clone()],
        )?)
    }
}
