use soroban_sdk::{Env, I256};

use crate::ContractError;

/// Fixed-point scaling factor.
///
/// Every reward-per-token value is stored multiplied by this constant so that
/// sub-unit accrual survives integer arithmetic. 10^18 leaves room for a
/// single base unit of reward to be spread across 10^18 staked units.
pub const SCALE: i128 = 1_000_000_000_000_000_000;

/// `SCALE` as a host 256-bit integer.
pub fn scale(env: &Env) -> I256 {
    I256::from_i128(env, SCALE)
}

/// Compute `a * b / denom` entirely in 256 bits, rounding toward zero.
///
/// A zero `denom` yields 0 rather than failing. Callers rely on this when the
/// denominator is a pool total that has drained to nothing.
///
/// Negative operands never occur in a consistent ledger and are rejected with
/// `InvalidAmount`.
pub fn mul_div(env: &Env, a: &I256, b: &I256, denom: &I256) -> Result<I256, ContractError> {
    let zero = I256::from_i32(env, 0);
    if *a < zero || *b < zero || *denom < zero {
        return Err(ContractError::InvalidAmount);
    }
    if *denom == zero || *a == zero || *b == zero {
        return Ok(zero);
    }

    Ok(a.mul(b).div(denom))
}

/// Compute `a * b / scale` for `i128` operands, rounding toward zero.
///
/// The product is formed in 256 bits, so any pair of non-negative operands is
/// accepted; only a quotient that no longer fits an `i128` is rejected with
/// `Overflow`.
pub fn scaled_mul_div(env: &Env, a: i128, b: i128, scale: i128) -> Result<i128, ContractError> {
    mul_div(
        env,
        &I256::from_i128(env, a),
        &I256::from_i128(env, b),
        &I256::from_i128(env, scale),
    )?
    .to_i128()
    .ok_or(ContractError::Overflow)
}

/// `a + b`, failing with `Overflow` instead of wrapping or saturating.
pub fn checked_add(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_add(b).ok_or(ContractError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_toward_zero() {
        let env = Env::default();
        // 10 * 1 / 3 = 3.33…
        assert_eq!(scaled_mul_div(&env, 10, 1, 3), Ok(3));
        // 2 * 1 / 3 = 0.66…
        assert_eq!(scaled_mul_div(&env, 2, 1, 3), Ok(0));
    }

    #[test]
    fn zero_denominator_yields_zero() {
        let env = Env::default();
        assert_eq!(scaled_mul_div(&env, 1_000, SCALE, 0), Ok(0));
    }

    #[test]
    fn zero_operand_yields_zero() {
        let env = Env::default();
        assert_eq!(scaled_mul_div(&env, 0, SCALE, 7), Ok(0));
        assert_eq!(scaled_mul_div(&env, 7, 0, 7), Ok(0));
    }

    #[test]
    fn intermediate_product_wider_than_i128() {
        let env = Env::default();
        // 10^30 * 10^18 = 10^48 overflows i128 (~1.7 * 10^38) but the
        // quotient 10^30 does not.
        let big: i128 = 1_000_000_000_000_000_000_000_000_000_000;
        assert_eq!(scaled_mul_div(&env, big, SCALE, SCALE), Ok(big));
    }

    #[test]
    fn wide_result_is_kept_past_i128() {
        let env = Env::default();
        let wide = mul_div(
            &env,
            &I256::from_i128(&env, i128::MAX),
            &scale(&env),
            &I256::from_i128(&env, 1),
        )
        .unwrap();
        assert_eq!(wide, I256::from_i128(&env, i128::MAX).mul(&scale(&env)));
        assert_eq!(wide.to_i128(), None);
    }

    #[test]
    fn narrow_quotient_out_of_range_is_overflow() {
        let env = Env::default();
        assert_eq!(
            scaled_mul_div(&env, i128::MAX, SCALE, 1),
            Err(ContractError::Overflow)
        );
    }

    #[test]
    fn negative_operands_are_rejected() {
        let env = Env::default();
        assert_eq!(
            scaled_mul_div(&env, -1, SCALE, SCALE),
            Err(ContractError::InvalidAmount)
        );
        assert_eq!(
            scaled_mul_div(&env, 1, SCALE, -SCALE),
            Err(ContractError::InvalidAmount)
        );
    }

    #[test]
    fn checked_add_reports_overflow() {
        assert_eq!(checked_add(1, 2), Ok(3));
        assert_eq!(checked_add(i128::MAX, 1), Err(ContractError::Overflow));
    }
}
