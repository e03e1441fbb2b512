//! Token movements in and out of the contract's custody.
//!
//! Always the last step of an entry point. A failed movement is surfaced as
//! `CustodyTransferFailed`, and returning that error makes the host discard
//! every ledger write made earlier in the same call.

use soroban_sdk::{log, token, Address, Env};

use crate::ContractError;

/// Move `amount` of `token` from `from` into the contract.
pub fn pull(env: &Env, token: &Address, from: &Address, amount: i128) -> Result<(), ContractError> {
    let client = token::Client::new(env, token);
    match client.try_transfer(from, &env.current_contract_address(), &amount) {
        Ok(Ok(())) => Ok(()),
        _ => {
            log!(env, "custody pull failed", from.clone(), amount);
            Err(ContractError::CustodyTransferFailed)
        }
    }
}

/// Move `amount` of `token` from the contract to `to`.
pub fn push(env: &Env, token: &Address, to: &Address, amount: i128) -> Result<(), ContractError> {
    let client = token::Client::new(env, token);
    match client.try_transfer(&env.current_contract_address(), to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => {
            log!(env, "custody push failed", to.clone(), amount);
            Err(ContractError::CustodyTransferFailed)
        }
    }
}
