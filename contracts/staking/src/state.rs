use common::ttl;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, I256};

// ── Storage key constants ───────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");
const POOL: Symbol = symbol_short!("POOL");

// Per-account persistent storage uses tuple keys: (prefix, staker_address)
const ACCOUNT: Symbol = symbol_short!("ACCT");

// ── Types ───────────────────────────────────────────────────────────────────

/// Deployment-time wiring of the contract.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingConfig {
    /// May rotate the rate controller.
    pub admin: Address,
    /// Token users stake.
    pub stake_token: Address,
    /// Token paid out as rewards. May be the same asset as `stake_token`.
    pub reward_token: Address,
}

/// Global accrual state, one per contract instance.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    /// Sum of every `Account::balance`.
    pub total_staked: i128,
    /// Reward base units emitted per second across all stakers.
    pub reward_rate: i128,
    /// Running integral of reward per staked unit, scaled by `math::SCALE`.
    /// Never decreases. 256 bits wide because a tiny `total_staked` divides
    /// the emission by almost nothing.
    pub reward_per_token_stored: I256,
    /// Timestamp the accumulator was last advanced to.
    pub last_update_time: u64,
    /// Accrual stops at this timestamp. 0 means no end has been set.
    pub period_finish: u64,
}

impl Pool {
    pub fn new(env: &Env, now: u64) -> Self {
        Pool {
            total_staked: 0,
            reward_rate: 0,
            reward_per_token_stored: I256::from_i32(env, 0),
            last_update_time: now,
            period_finish: 0,
        }
    }
}

/// A single staker's position.
///
/// Records are never removed: a zero balance is the idle state and may still
/// carry unclaimed rewards.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Account {
    pub balance: i128,
    /// `Pool::reward_per_token_stored` as of this account's last settlement.
    pub reward_per_token_paid: I256,
    /// Settled but unclaimed reward.
    pub rewards_owed: i128,
}

impl Account {
    pub fn new(env: &Env) -> Self {
        Account {
            balance: 0,
            reward_per_token_paid: I256::from_i32(env, 0),
            rewards_owed: 0,
        }
    }
}

// ── Storage helpers ─────────────────────────────────────────────────────────

fn account_key(staker: &Address) -> (Symbol, Address) {
    (ACCOUNT, staker.clone())
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&CONFIG)
}

pub fn store_config(env: &Env, config: &StakingConfig) {
    env.storage().instance().set(&CONFIG, config);
}

/// Returns `None` until the contract has been initialized.
pub fn load_config(env: &Env) -> Option<StakingConfig> {
    env.storage().instance().get(&CONFIG)
}

/// Read the pool; an uninitialized contract reads as an empty pool.
pub fn load_pool(env: &Env) -> Pool {
    env.storage()
        .instance()
        .get(&POOL)
        .unwrap_or_else(|| Pool::new(env, 0))
}

pub fn store_pool(env: &Env, pool: &Pool) {
    env.storage().instance().set(&POOL, pool);
    ttl::extend_instance(env);
}

/// Read an account without touching its TTL, so views stay side-effect free.
/// Unknown stakers read as an idle, empty account.
pub fn load_account(env: &Env, staker: &Address) -> Account {
    env.storage()
        .persistent()
        .get(&account_key(staker))
        .unwrap_or_else(|| Account::new(env))
}

pub fn store_account(env: &Env, staker: &Address, account: &Account) {
    let key = account_key(staker);
    env.storage().persistent().set(&key, account);
    ttl::extend_persistent(env, &key);
}
