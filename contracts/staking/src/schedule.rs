//! Emission schedule: the reward rate and the window it applies to.
//!
//! The schedule only ever changes after the pool has been checkpointed at the
//! old rate (see `rewards::update_pool`), so a rate change is effective going
//! forward and never re-prices time that has already elapsed.
//!
//! Funding is not checked here. Whoever sets a rate must already have moved
//! `rate × duration` reward tokens into the contract's custody; otherwise
//! later claims fail with `CustodyTransferFailed`.

use crate::state::Pool;
use crate::ContractError;

/// The latest timestamp rewards accrue up to: `now`, capped at the end of the
/// current period when one has been set.
pub fn last_time_reward_applicable(pool: &Pool, now: u64) -> u64 {
    if pool.period_finish == 0 {
        now
    } else {
        now.min(pool.period_finish)
    }
}

/// Start a new emission window of `duration` seconds at `new_rate`.
///
/// The caller must have checkpointed `pool` at `now` first. Nothing is written
/// unless every check passes.
pub fn apply_rate(
    pool: &mut Pool,
    new_rate: i128,
    duration: u64,
    now: u64,
) -> Result<(), ContractError> {
    if new_rate < 0 {
        return Err(ContractError::InvalidAmount);
    }
    if duration == 0 {
        return Err(ContractError::InvalidDuration);
    }
    let period_finish = now.checked_add(duration).ok_or(ContractError::Overflow)?;
    // A window whose total emission cannot be expressed as an amount could
    // never be paid out, and would let a single share outgrow `i128`.
    new_rate
        .checked_mul(i128::from(duration))
        .ok_or(ContractError::Overflow)?;

    pool.reward_rate = new_rate;
    pool.last_update_time = now;
    pool.period_finish = period_finish;
    Ok(())
}

/// Rewards still to be emitted between `now` and the end of the period.
pub fn remaining_rewards(pool: &Pool, now: u64) -> Result<i128, ContractError> {
    let remaining = pool.period_finish.saturating_sub(now);
    pool.reward_rate
        .checked_mul(i128::from(remaining))
        .ok_or(ContractError::Overflow)
}
