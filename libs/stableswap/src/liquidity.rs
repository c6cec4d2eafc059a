//! Liquidity provider math: LP mint estimates, withdrawals and virtual price
//!
//! Balanced-deposit estimates only. Imbalance fees are charged on-chain and
//! are not modelled here.

use crate::invariant::{compute_d, compute_y};
use anyhow::{bail, Result};
use num_bigint::BigInt;
use num_traits::{Signed, Zero};

/// Fixed-point scale of the virtual price (18 decimals)
pub const VIRTUAL_PRICE_PRECISION: u64 = 1_000_000_000_000_000_000;

/// LP share calculations on top of the invariant
pub struct LiquidityMath;

impl LiquidityMath {
    /// Estimate LP tokens minted when pool balances move from `old_balances` to `new_balances`
    ///
    /// An empty pool (`lp_supply == 0`) mints `D(new_balances)`; otherwise the
    /// mint is proportional to the invariant growth, `lp_supply · (D1 − D0) / D0`.
    pub fn calculate_lp_mint(
        amplification: &BigInt,
        old_balances: &[BigInt],
        new_balances: &[BigInt],
        lp_supply: &BigInt,
    ) -> Result<BigInt> {
        if old_balances.len() != new_balances.len() {
            bail!(
                "Balance vectors differ in length: {} vs {}",
                old_balances.len(),
                new_balances.len()
            );
        }

        let d1 = compute_d(amplification, new_balances)?;
        if lp_supply.is_zero() {
            return Ok(d1);
        }

        let d0 = compute_d(amplification, old_balances)?;
        if d1 <= d0 {
            bail!("Deposit does not increase the invariant ({} -> {})", d0, d1);
        }

        Ok(lp_supply * (d1 - &d0) / d0)
    }

    /// Proportional withdrawal of every asset for `lp_amount` LP tokens
    pub fn calculate_withdraw_amounts(
        balances: &[BigInt],
        lp_amount: &BigInt,
        lp_supply: &BigInt,
    ) -> Result<Vec<BigInt>> {
        Self::validate_burn(lp_amount, lp_supply)?;

        Ok(balances
            .iter()
            .map(|balance| balance * lp_amount / lp_supply)
            .collect())
    }

    /// Amount of asset `index` received for burning `lp_amount` into a single coin
    ///
    /// Two-asset pools only: the other balance is held and the withdrawn
    /// balance is re-solved at the reduced invariant. One unit is withheld for
    /// the truncated `y`, as with swap quotes. Burning the whole supply into
    /// one coin has no curve solution and is rejected.
    pub fn calculate_withdraw_one_coin(
        amplification: &BigInt,
        balances: &[BigInt],
        lp_amount: &BigInt,
        lp_supply: &BigInt,
        index: usize,
    ) -> Result<BigInt> {
        if balances.len() != 2 {
            bail!(
                "Single-coin withdrawal supports two-asset pools, got {} assets",
                balances.len()
            );
        }
        if index > 1 {
            bail!("Coin index {} out of range", index);
        }
        Self::validate_burn(lp_amount, lp_supply)?;
        if lp_amount.is_zero() {
            return Ok(BigInt::zero());
        }
        if lp_amount == lp_supply {
            bail!("Cannot burn the entire LP supply into a single coin");
        }

        let d0 = compute_d(amplification, balances)?;
        let d1 = &d0 - lp_amount * &d0 / lp_supply;
        if !d1.is_positive() {
            bail!("Burn of {} LP leaves no invariant to solve against", lp_amount);
        }

        let y = compute_y(amplification, &balances[1 - index], &d1)?;
        let amount = &balances[index] - y - 1u32;
        if amount.is_negative() {
            return Ok(BigInt::zero());
        }
        Ok(amount)
    }

    /// Invariant per LP token, scaled by [`VIRTUAL_PRICE_PRECISION`]
    pub fn calculate_virtual_price(
        amplification: &BigInt,
        balances: &[BigInt],
        lp_supply: &BigInt,
    ) -> Result<BigInt> {
        if !lp_supply.is_positive() {
            bail!("LP supply must be positive");
        }

        let d = compute_d(amplification, balances)?;
        Ok(d * BigInt::from(VIRTUAL_PRICE_PRECISION) / lp_supply)
    }

    fn validate_burn(lp_amount: &BigInt, lp_supply: &BigInt) -> Result<()> {
        if !lp_supply.is_positive() {
            bail!("LP supply must be positive");
        }
        if lp_amount.is_negative() || lp_amount > lp_supply {
            bail!("LP amount {} outside [0, {}]", lp_amount, lp_supply);
        }
        Ok(())
    }
}
