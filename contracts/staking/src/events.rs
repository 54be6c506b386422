#![allow(deprecated)] // events().publish remains the stable publish path

use soroban_sdk::{symbol_short, Address, Env, Vec};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub token: Address,
    pub partner_wallet: Address,
    pub platform_wallet_count: u32,
    pub timestamp: u64,
}

/// Fired on every accepted deposit.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub account: Address,
    pub amount: i128,
    pub referrer: Option<Address>,
    pub timestamp: u64,
}

/// Fired when a staker withdraws part of their position.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub account: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when accrued rewards are paid out.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardWithdrawnEvent {
    pub account: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when an elapsed bonus cycle pays the leaderboard.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BonusRewardPoolDistributedEvent {
    pub amount: i128,
    pub recipients: u32,
    pub timestamp: u64,
}

/// Fired when an elapsed monthly cycle pays all stakers pro-rata.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MonthlyRewardPoolDistributedEvent {
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when the owner replaces the partner wallet.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PartnerWalletSetEvent {
    pub wallet: Address,
    pub timestamp: u64,
}

/// Fired when the owner replaces the platform wallet set.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlatformWalletsSetEvent {
    pub wallets: Vec<Address>,
    pub timestamp: u64,
}

/// Fired when ownership moves to a new address.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferredEvent {
    pub previous_owner: Address,
    pub new_owner: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    owner: Address,
    token: Address,
    partner_wallet: Address,
    platform_wallet_count: u32,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            token,
            partner_wallet,
            platform_wallet_count,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(env: &Env, account: Address, amount: i128, referrer: Option<Address>) {
    env.events().publish(
        (symbol_short!("STAKED"), account.clone()),
        StakedEvent {
            account,
            amount,
            referrer,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaked(env: &Env, account: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), account.clone()),
        UnstakedEvent {
            account,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_withdrawn(env: &Env, account: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("RWD_WDRN"), account.clone()),
        RewardWithdrawnEvent {
            account,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_bonus_pool_distributed(env: &Env, amount: i128, recipients: u32) {
    env.events().publish(
        (symbol_short!("BONUS_DST"),),
        BonusRewardPoolDistributedEvent {
            amount,
            recipients,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_monthly_pool_distributed(env: &Env, amount: i128) {
    env.events().publish(
        (symbol_short!("MNTH_DST"),),
        MonthlyRewardPoolDistributedEvent {
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_partner_wallet_set(env: &Env, wallet: Address) {
    env.events().publish(
        (symbol_short!("PARTNER"),),
        PartnerWalletSetEvent {
            wallet,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_platform_wallets_set(env: &Env, wallets: Vec<Address>) {
    env.events().publish(
        (symbol_short!("PLATFORM"),),
        PlatformWalletsSetEvent {
            wallets,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_ownership_transferred(env: &Env, previous_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWNER"), new_owner.clone()),
        OwnershipTransferredEvent {
            previous_owner,
            new_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}
