//! Stake bookkeeping. Custody of the staked asset lives in `custody`.
//!
//! Both operations validate everything before writing, so on error the pool
//! and the account are exactly as they were passed in.

use crate::state::{Account, Pool};
use crate::ContractError;

/// Credit `amount` to `account` and to the pool total.
pub fn record_deposit(
    pool: &mut Pool,
    account: &mut Account,
    amount: i128,
) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    let balance = account
        .balance
        .checked_add(amount)
        .ok_or(ContractError::Overflow)?;
    let total = pool
        .total_staked
        .checked_add(amount)
        .ok_or(ContractError::Overflow)?;

    account.balance = balance;
    pool.total_staked = total;
    Ok(())
}

/// Debit `amount` from `account` and from the pool total.
pub fn record_withdrawal(
    pool: &mut Pool,
    account: &mut Account,
    amount: i128,
) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    if amount > account.balance {
        return Err(ContractError::InsufficientBalance);
    }
    // The total always covers any single balance; a shortfall means the
    // ledger is already inconsistent.
    let total = pool
        .total_staked
        .checked_sub(amount)
        .filter(|total| *total >= 0)
        .ok_or(ContractError::Overflow)?;

    account.balance -= amount;
    pool.total_staked = total;
    Ok(())
}
