use soroban_sdk::{symbol_short, Address, Env, Symbol};

const RATE_CTRL: Symbol = symbol_short!("RATE_CTRL");

/// Designates the single account allowed to change the emission schedule.
///
/// Replaces any previous controller; there is never more than one.
pub fn set_rate_controller(env: &Env, controller: &Address) {
    env.storage().instance().set(&RATE_CTRL, controller);
}

/// Returns the current rate controller, if one has been designated.
pub fn get_rate_controller(env: &Env) -> Option<Address> {
    env.storage().instance().get(&RATE_CTRL)
}

/// Returns whether `address` is the designated rate controller.
///
/// When no controller has been designated nobody is allowed.
pub fn is_rate_controller(env: &Env, address: &Address) -> bool {
    get_rate_controller(env).is_some_and(|controller| controller == *address)
}
