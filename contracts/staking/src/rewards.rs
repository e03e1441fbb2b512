use soroban_sdk::{Env, I256};

use crate::math::{self, SCALE};
use crate::schedule;
use crate::state::{Account, Pool};
use crate::ContractError;

// ── Core reward engine ──────────────────────────────────────────────────────

/// Project `reward_per_token_stored` forward to `now` without writing.
///
/// This is the O(1) accumulation step:
///
/// ```text
/// elapsed = last_time_reward_applicable(now) − last_update_time
/// Δrpt    = reward_rate × elapsed × SCALE / total_staked
/// ```
///
/// With nothing staked the accumulator stays put. Rewards emitted during
/// that interval are credited to nobody.
///
/// The whole step runs in 256 bits. A single base unit left staked under an
/// 18-decimal rate grows the accumulator by `rate × SCALE` per second, which
/// leaves `i128` behind within minutes; principal must stay withdrawable
/// regardless.
pub fn project_reward_per_token(env: &Env, pool: &Pool, now: u64) -> Result<I256, ContractError> {
    if pool.total_staked == 0 {
        return Ok(pool.reward_per_token_stored.clone());
    }

    let applicable = schedule::last_time_reward_applicable(pool, now);
    let elapsed = applicable.saturating_sub(pool.last_update_time);
    let emitted =
        I256::from_i128(env, pool.reward_rate).mul(&I256::from_i128(env, i128::from(elapsed)));
    let delta = math::mul_div(
        env,
        &emitted,
        &math::scale(env),
        &I256::from_i128(env, pool.total_staked),
    )?;

    Ok(pool.reward_per_token_stored.add(&delta))
}

/// Advance the global accumulator to `now`.
///
/// Must run before anything that changes `total_staked` or the rate.
pub fn update_pool(env: &Env, pool: &mut Pool, now: u64) -> Result<(), ContractError> {
    let reward_per_token = project_reward_per_token(env, pool, now)?;
    let applicable = schedule::last_time_reward_applicable(pool, now);

    pool.reward_per_token_stored = reward_per_token;
    pool.last_update_time = pool.last_update_time.max(applicable);
    Ok(())
}

/// Total reward owed to `account` if the accumulator stood at
/// `reward_per_token`.
///
/// ```text
/// earned = rewards_owed + balance × (reward_per_token − reward_per_token_paid) / SCALE
/// ```
///
/// Only growth since the account's last snapshot is counted, and its balance
/// was constant over that whole span, because every balance change settles
/// first. That also bounds the product: the balance never exceeded the pool
/// total it was divided by, so the share fits whenever the emission did.
pub fn earned(env: &Env, account: &Account, reward_per_token: &I256) -> Result<i128, ContractError> {
    let growth = reward_per_token.sub(&account.reward_per_token_paid);
    let pending = math::mul_div(
        env,
        &I256::from_i128(env, account.balance),
        &growth,
        &I256::from_i128(env, SCALE),
    )?
    .to_i128()
    .ok_or(ContractError::Overflow)?;

    math::checked_add(account.rewards_owed, pending)
}

/// Credit everything `account` has earned up to the pool's current
/// accumulator and move its snapshot forward.
pub fn settle(env: &Env, pool: &Pool, account: &mut Account) -> Result<(), ContractError> {
    let owed = earned(env, account, &pool.reward_per_token_stored)?;

    account.rewards_owed = owed;
    account.reward_per_token_paid = pool.reward_per_token_stored.clone();
    Ok(())
}

/// Global checkpoint followed by settlement of one account: the prologue of
/// every state-changing call.
pub fn checkpoint(
    env: &Env,
    pool: &mut Pool,
    account: &mut Account,
    now: u64,
) -> Result<(), ContractError> {
    update_pool(env, pool, now)?;
    settle(env, pool, account)
}

/// Read-only `checkpoint`: what `account` would be owed if it were settled
/// at `now`.
pub fn gained(env: &Env, pool: &Pool, account: &Account, now: u64) -> Result<i128, ContractError> {
    let reward_per_token = project_reward_per_token(env, pool, now)?;
    earned(env, account, &reward_per_token)
}

/// Zero the account's settled rewards and return what was there.
pub fn take_owed(account: &mut Account) -> i128 {
    core::mem::take(&mut account.rewards_owed)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Synthetic timestamps; the Env only hosts the 256-bit values.
