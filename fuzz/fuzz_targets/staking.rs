#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{Address, Env};
use staking::{StakingContract, StakingContractClient};

const STAKERS: usize = 3;
const RATE: i128 = 1_000;
const DURATION: u64 = 10_000;

#[derive(Arbitrary, Debug)]
enum Action {
    Stake { who: u8, amount: u32 },
    Withdraw { who: u8, amount: u32 },
    Claim { who: u8 },
    Exit { who: u8 },
    Advance { secs: u16 },
}

fuzz_target!(|actions: Vec<Action>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(0);

    let admin = Address::generate(&env);
    let controller = Address::generate(&env);
    let stake_sac = env.register_stellar_asset_contract_v2(admin.clone());
    let reward_sac = env.register_stellar_asset_contract_v2(admin.clone());
    let stake_asset = StellarAssetClient::new(&env, &stake_sac.address());
    let reward_asset = StellarAssetClient::new(&env, &reward_sac.address());
    let reward_token = TokenClient::new(&env, &reward_sac.address());

    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);
    client.initialize(
        &admin,
        &stake_sac.address(),
        &reward_sac.address(),
        &controller,
    );

    let budget = RATE * i128::from(DURATION);
    reward_asset.mint(&contract_id, &budget);
    client.set_reward_rate(&controller, &RATE, &DURATION);

    let stakers: Vec<Address> = (0..STAKERS)
        .map(|_| {
            let staker = Address::generate(&env);
            stake_asset.mint(&staker, &i128::from(u32::MAX));
            staker
        })
        .collect();

    let mut now = 0u64;
    let mut last_rpt = client.get_pool().reward_per_token_stored;

    for action in actions.iter().take(64) {
        match *action {
            Action::Stake { who, amount } => {
                let staker = &stakers[usize::from(who) % STAKERS];
                let _ = client.try_stake(staker, &i128::from(amount));
            }
            Action::Withdraw { who, amount } => {
                let staker = &stakers[usize::from(who) % STAKERS];
                let _ = client.try_withdraw(staker, &i128::from(amount));
            }
            Action::Claim { who } => {
                let staker = &stakers[usize::from(who) % STAKERS];
                let _ = client.try_claim_rewards(staker);
            }
            Action::Exit { who } => {
                let staker = &stakers[usize::from(who) % STAKERS];
                let _ = client.try_exit(staker);
            }
            Action::Advance { secs } => {
                now += u64::from(secs);
                env.ledger().set_timestamp(now);
            }
        }

        let pool = client.get_pool();
        let balances: i128 = stakers.iter().map(|s| client.balance_of(s)).sum();
        assert_eq!(pool.total_staked, balances);
        assert!(pool.reward_per_token_stored >= last_rpt);
        last_rpt = pool.reward_per_token_stored;

        let paid: i128 = stakers.iter().map(|s| reward_token.balance(s)).sum();
        let owed: i128 = stakers.iter().map(|s| client.gained(s)).sum();
        assert!(paid + owed <= budget);
    }
});
