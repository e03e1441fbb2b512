#![cfg_attr(not(test), no_std)]

//! Single-asset staking with continuous, proportional reward accrual.
//!
//! A global reward-per-token accumulator is advanced lazily on every
//! state-changing call, then the calling account is settled against it,
//! and only then is the requested change applied. Accrual is a pure function
//! of elapsed ledger time, so no call ever iterates over stakers.

pub mod custody;
pub mod events;
pub mod ledger;
pub mod math;
pub mod rewards;
pub mod schedule;
pub mod state;

use common::roles;
use soroban_sdk::{contract, contracterror, contractimpl, log, Address, Env, I256};

use state::{Account, Pool, StakingConfig};

// ── Contract errors ──────────────────────────────────────────────────────────

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidAmount = 4,
    InsufficientBalance = 5,
    Overflow = 6,
    CustodyTransferFailed = 7,
    InvalidDuration = 8,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `stake_token`     – token users stake.
    /// * `reward_token`    – token paid out as rewards (may equal `stake_token`).
    /// * `rate_controller` – the only account allowed to call `set_reward_rate`.
    ///
    /// No rewards accrue until the controller sets a rate.
    pub fn initialize(
        env: Env,
        admin: Address,
        stake_token: Address,
        reward_token: Address,
        rate_controller: Address,
    ) -> Result<(), ContractError> {
        if state::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }

        let config = StakingConfig {
            admin: admin.clone(),
            stake_token: stake_token.clone(),
            reward_token: reward_token.clone(),
        };
        state::store_config(&env, &config);
        state::store_pool(&env, &Pool::new(&env, env.ledger().timestamp()));
        roles::set_rate_controller(&env, &rate_controller);

        events::publish_initialized(&env, admin, stake_token, reward_token, rate_controller);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` stake tokens.
    ///
    /// The accumulator is advanced and the staker settled before the balance
    /// grows, so the new tokens earn nothing retroactively.
    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        let config = Self::require_initialized(&env)?;
        staker.require_auth();

        let (mut pool, mut account) = Self::checkpoint(&env, &staker)?;
        ledger::record_deposit(&mut pool, &mut account, amount)?;
        Self::commit(&env, &staker, &pool, &account);

        custody::pull(&env, &config.stake_token, &staker, amount)?;

        events::publish_staked(
            &env,
            staker,
            amount,
            account.balance,
            pool.total_staked,
        );

        Ok(())
    }

    /// Return `amount` staked tokens to the staker.
    ///
    /// Rewards earned so far stay owed to the account, even when its balance
    /// drops to zero.
    pub fn withdraw(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        let config = Self::require_initialized(&env)?;
        staker.require_auth();

        let (mut pool, mut account) = Self::checkpoint(&env, &staker)?;
        ledger::record_withdrawal(&mut pool, &mut account, amount)?;
        Self::commit(&env, &staker, &pool, &account);

        custody::push(&env, &config.stake_token, &staker, amount)?;

        events::publish_withdrawn(
            &env,
            staker,
            amount,
            account.balance,
            pool.total_staked,
        );

        Ok(())
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Pay out everything `staker` has earned and return the amount.
    ///
    /// Nothing owed is not an error: the call settles the account and
    /// returns 0 without a transfer. The reward reserve must hold enough
    /// reward tokens, otherwise the whole call fails with
    /// `CustodyTransferFailed` and the rewards stay owed.
    pub fn claim_rewards(env: Env, staker: Address) -> Result<i128, ContractError> {
        let config = Self::require_initialized(&env)?;
        staker.require_auth();

        let (pool, mut account) = Self::checkpoint(&env, &staker)?;
        let owed = rewards::take_owed(&mut account);
        Self::commit(&env, &staker, &pool, &account);

        if owed == 0 {
            return Ok(0);
        }

        custody::push(&env, &config.reward_token, &staker, owed)?;

        events::publish_reward_claimed(&env, staker, owed);

        Ok(owed)
    }

    /// Withdraw the whole balance and claim all rewards in one call.
    ///
    /// Returns the reward paid out.
    pub fn exit(env: Env, staker: Address) -> Result<i128, ContractError> {
        let config = Self::require_initialized(&env)?;
        staker.require_auth();

        let (mut pool, mut account) = Self::checkpoint(&env, &staker)?;
        let principal = account.balance;
        if principal > 0 {
            ledger::record_withdrawal(&mut pool, &mut account, principal)?;
        }
        let owed = rewards::take_owed(&mut account);
        Self::commit(&env, &staker, &pool, &account);

        if principal > 0 {
            custody::push(&env, &config.stake_token, &staker, principal)?;
            events::publish_withdrawn(&env, staker.clone(), principal, 0, pool.total_staked);
        }
        if owed > 0 {
            custody::push(&env, &config.reward_token, &staker, owed)?;
            events::publish_reward_claimed(&env, staker, owed);
        }

        Ok(owed)
    }

    // ── Rate controller ─────────────────────────────────────────────────────

    /// Emit `rate` reward units per second for the next `duration` seconds.
    ///
    /// Accrual up to now is settled at the old rate first. The caller must
    /// already have funded the contract with `rate × duration` reward tokens;
    /// this is not verified.
    pub fn set_reward_rate(
        env: Env,
        caller: Address,
        rate: i128,
        duration: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !roles::is_rate_controller(&env, &caller) {
            log!(&env, "set_reward_rate rejected", caller);
            return Err(ContractError::Unauthorized);
        }

        let now = env.ledger().timestamp();
        let mut pool = state::load_pool(&env);
        rewards::update_pool(&env, &mut pool, now)?;
        schedule::apply_rate(&mut pool, rate, duration, now)?;
        state::store_pool(&env, &pool);

        events::publish_reward_rate_set(&env, rate, duration, pool.period_finish);

        Ok(())
    }

    /// Hand the rate-controller role to another account. Admin only.
    pub fn set_rate_controller(
        env: Env,
        admin: Address,
        controller: Address,
    ) -> Result<(), ContractError> {
        let config = Self::require_initialized(&env)?;
        admin.require_auth();
        if admin != config.admin {
            return Err(ContractError::Unauthorized);
        }

        roles::set_rate_controller(&env, &controller);

        events::publish_rate_controller_set(&env, admin, controller);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Everything `staker` could claim right now: settled rewards plus what
    /// has accrued since the last settlement. Writes nothing.
    pub fn gained(env: Env, staker: Address) -> Result<i128, ContractError> {
        let pool = state::load_pool(&env);
        let account = state::load_account(&env, &staker);
        rewards::gained(&env, &pool, &account, env.ledger().timestamp())
    }

    /// Return the staker's current staked balance.
    pub fn balance_of(env: Env, staker: Address) -> i128 {
        state::load_account(&env, &staker).balance
    }

    /// Return the stored record for `staker`, as of its last settlement.
    pub fn get_account(env: Env, staker: Address) -> Account {
        state::load_account(&env, &staker)
    }

    /// Return the sum of all staked balances.
    pub fn total_staked(env: Env) -> i128 {
        state::load_pool(&env).total_staked
    }

    /// Return the current emission rate (reward units per second).
    pub fn reward_rate(env: Env) -> i128 {
        state::load_pool(&env).reward_rate
    }

    pub fn period_finish(env: Env) -> u64 {
        state::load_pool(&env).period_finish
    }

    pub fn last_update_time(env: Env) -> u64 {
        state::load_pool(&env).last_update_time
    }

    pub fn last_time_reward_applicable(env: Env) -> u64 {
        schedule::last_time_reward_applicable(&state::load_pool(&env), env.ledger().timestamp())
    }

    /// The accumulator projected to now, scaled by `math::SCALE`.
    ///
    /// Kept in 256 bits: a dust balance left alone under a large rate pushes
    /// it past `i128` long before any payout does.
    pub fn reward_per_token(env: Env) -> Result<I256, ContractError> {
        let pool = state::load_pool(&env);
        rewards::project_reward_per_token(&env, &pool, env.ledger().timestamp())
    }

    /// Rewards still to be emitted before the current period ends.
    pub fn remaining_rewards(env: Env) -> Result<i128, ContractError> {
        schedule::remaining_rewards(&state::load_pool(&env), env.ledger().timestamp())
    }

    pub fn get_pool(env: Env) -> Pool {
        state::load_pool(&env)
    }

    pub fn get_config(env: Env) -> Result<StakingConfig, ContractError> {
        state::load_config(&env).ok_or(ContractError::NotInitialized)
    }

    pub fn rate_controller(env: Env) -> Option<Address> {
        roles::get_rate_controller(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        state::is_initialized(&env)
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<StakingConfig, ContractError> {
        state::load_config(env).ok_or(ContractError::NotInitialized)
    }

    /// Load the pool and the staker's account, advance the accumulator to
    /// now and settle the account against it. Nothing is written yet.
    fn checkpoint(env: &Env, staker: &Address) -> Result<(Pool, Account), ContractError> {
        let mut pool = state::load_pool(env);
        let mut account = state::load_account(env, staker);
        rewards::checkpoint(env, &mut pool, &mut account, env.ledger().timestamp())?;
        Ok((pool, account))
    }

    fn commit(env: &Env, staker: &Address, pool: &Pool, account: &Account) {
        state::store_pool(env, pool);
        state::store_account(env, staker, account);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod proptests;
