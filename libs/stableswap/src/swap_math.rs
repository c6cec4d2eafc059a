//! Two-asset StableSwap quote math
//!
//! Turns the solver's `y` into swap amounts: `amount_out = reserve_out − y − 1`.
//! `y` may land one unit under the true balance, so every quote withholds one
//! unit against the caller. Integer-exact, with the fee charged on the input side.

use crate::invariant::{compute_d, compute_y};
use anyhow::{anyhow, bail, Result};
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fee denominator: fees are expressed in basis points
pub const FEE_DENOMINATOR: u32 = 10_000;

/// Decimal places kept when reporting slippage percentages
const PERCENT_SCALE: u32 = 8;

/// Pool reserves, amplification and fee for a two-asset StableSwap pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StableSwapPoolState {
    pub amplification: BigInt,
    pub reserve_in: BigInt,
    pub reserve_out: BigInt,
    pub fee_bps: u32, // Fee in basis points (4 = 0.04%)
}

impl StableSwapPoolState {
    /// Same pool quoted in the opposite direction
    pub fn reversed(&self) -> Self {
        Self {
            amplification: self.amplification.clone(),
            reserve_in: self.reserve_out.clone(),
            reserve_out: self.reserve_in.clone(),
            fee_bps: self.fee_bps,
        }
    }
}

/// StableSwap quote functions
pub struct StableSwapMath;

impl StableSwapMath {
    /// Calculate output amount for a swap against the StableSwap curve
    ///
    /// # Arguments
    /// * `amount_in` - Input token amount (smallest units)
    /// * `reserve_in` - Input token reserve
    /// * `reserve_out` - Output token reserve
    /// * `amplification` - Amplification coefficient `A`
    /// * `fee_bps` - Fee in basis points, charged on the input
    ///
    /// # Returns
    /// `reserve_out − y − 1`, floored at zero
    pub fn calculate_output_amount(
        amount_in: &BigInt,
        reserve_in: &BigInt,
        reserve_out: &BigInt,
        amplification: &BigInt,
        fee_bps: u32,
    ) -> Result<BigInt> {
        if !amount_in.is_positive() {
            bail!("Input amount must be positive");
        }
        Self::validate_pool(reserve_in, reserve_out, fee_bps)?;

        let amount_in_after_fee = Self::apply_fee(amount_in, fee_bps);
        if amount_in_after_fee.is_zero() {
            return Ok(BigInt::zero());
        }

        let d = compute_d(amplification, &[reserve_in.clone(), reserve_out.clone()])?;
        let y = compute_y(amplification, &(reserve_in + &amount_in_after_fee), &d)?;

        let amount_out = reserve_out - y - 1u32;
        if amount_out.is_negative() {
            return Ok(BigInt::zero());
        }
        Ok(amount_out)
    }

    /// Calculate required input amount for desired output (reverse calculation)
    pub fn calculate_input_amount(
        amount_out: &BigInt,
        reserve_in: &BigInt,
        reserve_out: &BigInt,
        amplification: &BigInt,
        fee_bps: u32,
    ) -> Result<BigInt> {
        if !amount_out.is_positive() {
            bail!("Output amount must be positive");
        }
        Self::validate_pool(reserve_in, reserve_out, fee_bps)?;
        // The output quote withholds one unit, so one more must stay in the pool
        let remaining_out = reserve_out - amount_out - 1u32;
        if !remaining_out.is_positive() {
            bail!("Insufficient liquidity: output exceeds reserves");
        }

        let d = compute_d(amplification, &[reserve_in.clone(), reserve_out.clone()])?;
        let new_reserve_in = compute_y(amplification, &remaining_out, &d)?;

        // Solved balance truncates, so pay one unit over it
        let mut amount_in_after_fee = new_reserve_in - reserve_in + 1u32;
        if amount_in_after_fee.is_negative() {
            amount_in_after_fee = BigInt::zero();
        }

        let gross = amount_in_after_fee * BigInt::from(FEE_DENOMINATOR)
            / BigInt::from(FEE_DENOMINATOR - fee_bps);

        // Add 1 to round up (ensures sufficient input)
        Ok(gross + 1u32)
    }

    /// Slippage against the 1:1 peg, as a percentage
    ///
    /// Compares the quote to the constant-sum output (`amount_in` after fees).
    /// Negative when the pool is short of the input asset and pays a premium.
    pub fn calculate_slippage(
        amount_in: &BigInt,
        reserve_in: &BigInt,
        reserve_out: &BigInt,
        amplification: &BigInt,
        fee_bps: u32,
    ) -> Result<Decimal> {
        let actual_output = Self::calculate_output_amount(
            amount_in,
            reserve_in,
            reserve_out,
            amplification,
            fee_bps,
        )?;

        let ideal_output = Self::apply_fee(amount_in, fee_bps);
        if !ideal_output.is_positive() {
            bail!("Input amount vanishes after fees");
        }

        let scaled = (&ideal_output - &actual_output)
            * BigInt::from(100u32)
            * BigInt::from(10u64.pow(PERCENT_SCALE))
            / &ideal_output;

        let scaled = scaled
            .to_i128()
            .ok_or_else(|| anyhow!("Slippage out of range: {}", scaled))?;

        Decimal::try_from_i128_with_scale(scaled, PERCENT_SCALE)
            .map_err(|e| anyhow!("Slippage not representable as Decimal: {}", e))
    }

    fn apply_fee(amount: &BigInt, fee_bps: u32) -> BigInt {
        amount * BigInt::from(FEE_DENOMINATOR - fee_bps) / BigInt::from(FEE_DENOMINATOR)
    }

    fn validate_pool(reserve_in: &BigInt, reserve_out: &BigInt, fee_bps: u32) -> Result<()> {
        if !reserve_in.is_positive() || !reserve_out.is_positive() {
            bail!("Reserves must be positive");
        }
        if fee_bps >= FEE_DENOMINATOR {
            bail!("Fee of {} bps leaves nothing to swap", fee_bps);
        }
        Ok(())
    }
}
