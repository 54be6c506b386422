#![no_std]

//! Fee-splitting staking ledger.
//!
//! Deposits of a single token are split into fee legs (referral, partner,
//! platform, bonus pool, staker reward) plus a net stake. The staker-reward
//! leg compounds to all current stakers through a magnified per-share
//! accumulator ([`rewards`]); the bonus and monthly pools accumulate and pay
//! out lazily on countdown gates ([`pools`]); a bounded leaderboard of the
//! largest qualifying positions ([`leaderboard`]) gates bonus eligibility.

pub mod events;
pub mod fees;
pub mod leaderboard;
pub mod pools;
pub mod rewards;

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol, Vec,
};

use fees::DepositSplit;
use leaderboard::LeaderboardEntry;

// ── Storage keys ────────────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");
const REWARD_PER_SHARE: Symbol = symbol_short!("RPS");
const BONUS_POOL: Symbol = symbol_short!("BONUS_PL");
const MONTHLY_POOL: Symbol = symbol_short!("MNTH_PL");
const BONUS_DEADLINE: Symbol = symbol_short!("BONUS_DL");
const MONTHLY_DEADLINE: Symbol = symbol_short!("MNTH_DL");
const EVER_STAKED_COUNT: Symbol = symbol_short!("EVER_CNT");
const LEADERBOARD: Symbol = symbol_short!("LDRBOARD");

// Per-account persistent storage uses tuple keys:  (prefix, account)
const USER_STAKE: Symbol = symbol_short!("STK");
const USER_CORRECTION: Symbol = symbol_short!("CORR");
const USER_WITHDRAWN: Symbol = symbol_short!("WDRN");
const USER_HAS_STAKED: Symbol = symbol_short!("EVER");
const REFERRAL_REWARD: Symbol = symbol_short!("REF_RWD");

// ── Contract errors ─────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    ZeroAmount = 4,
    InsufficientStake = 5,
    NothingToWithdraw = 6,
    TransferFailed = 7,
    InvalidWallets = 8,
}

// ── Configuration ───────────────────────────────────────────────────────────

/// Contract-wide wiring, stored under a single key. Its presence doubles as
/// the initialization guard.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingConfig {
    /// Address allowed to change the fee wallets and pass ownership on.
    pub owner: Address,
    /// Token being staked; also the currency of every fee and reward.
    pub token: Address,
    /// Recipient of the partner fee leg.
    pub partner_wallet: Address,
    /// Ordered recipients of the platform fee leg.
    pub platform_wallets: Vec<Address>,
}

// ── Contract ────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract and arm both pool countdowns.
    ///
    /// * `token`            – address of the staked token contract.
    /// * `partner_wallet`   – receives the partner fee leg.
    /// * `platform_wallets` – ordered, non-empty set sharing the platform leg.
    pub fn initialize(
        env: Env,
        owner: Address,
        token: Address,
        partner_wallet: Address,
        platform_wallets: Vec<Address>,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&CONFIG) {
            return Err(Error::AlreadyInitialized);
        }
        if platform_wallets.is_empty() {
            return Err(Error::InvalidWallets);
        }

        let config = StakingConfig {
            owner: owner.clone(),
            token: token.clone(),
            partner_wallet: partner_wallet.clone(),
            platform_wallets: platform_wallets.clone(),
        };
        env.storage().instance().set(&CONFIG, &config);

        let now = env.ledger().timestamp();
        env.storage()
            .instance()
            .set(&BONUS_DEADLINE, &pools::next_deadline(now, pools::BONUS_POOL_PERIOD));
        env.storage().instance().set(
            &MONTHLY_DEADLINE,
            &pools::next_deadline(now, pools::MONTHLY_POOL_PERIOD),
        );
        // Totals, pools and counters start at zero; unwrap_or(0) covers the
        // absent keys, so no explicit init is needed.

        events::publish_initialized(&env, owner, token, partner_wallet, platform_wallets.len());

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` of the staked token.
    ///
    /// The gross deposit is pulled from the staker, split into its fee legs,
    /// and the 7% skim distributed to the stakers already present — before
    /// the depositor's own net stake lands, so nobody earns from their own
    /// deposit. The one exception is the empty ledger: with no prior stake
    /// the net position is recorded first and the lone staker absorbs the
    /// skim, minus fixed-point truncation.
    pub fn stake(
        env: Env,
        staker: Address,
        amount: i128,
        referrer: Option<Address>,
    ) -> Result<(), Error> {
        let config = Self::config(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(Error::ZeroAmount);
        }

        let split = fees::split_deposit(amount, referrer.is_some());

        // Pull the gross deposit before any fee leg leaves the contract.
        Self::transfer_token(
            &env,
            &config.token,
            &staker,
            &env.current_contract_address(),
            amount,
        )?;
        Self::route_fees(&env, &config, &split, referrer.as_ref())?;

        if Self::total_staked(&env) == 0 {
            Self::apply_balance_change(&env, &staker, split.net_stake);
            Self::distribute(&env, split.staker_reward);
        } else {
            Self::distribute(&env, split.staker_reward);
            Self::apply_balance_change(&env, &staker, split.net_stake);
        }

        Self::note_first_stake(&env, &staker);

        let qualified = leaderboard::qualifies(split.net_stake);
        if qualified {
            let board = leaderboard::record_stake(Self::board(&env), &staker, split.net_stake);
            env.storage().instance().set(&LEADERBOARD, &board);
        }

        Self::settle_pools(&env);
        if qualified {
            // A qualifying stake pushes the bonus gate out a little further.
            let deadline: u64 = env.storage().instance().get(&BONUS_DEADLINE).unwrap_or(0);
            env.storage().instance().set(
                &BONUS_DEADLINE,
                &deadline.saturating_add(pools::BONUS_STAKE_EXTENSION),
            );
        }

        events::publish_staked(&env, staker, amount, referrer);
        Ok(())
    }

    // ── Unstaking ───────────────────────────────────────────────────────────

    /// Return `amount` staked units to the caller.
    ///
    /// The full amount goes back — fees are charged on the way in only. The
    /// reward correction keeps previously accrued rewards readable after the
    /// balance shrinks.
    pub fn unstake(env: Env, staker: Address, amount: i128) -> Result<(), Error> {
        let config = Self::config(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(Error::ZeroAmount);
        }
        if Self::staked_of(&env, &staker) < amount {
            return Err(Error::InsufficientStake);
        }

        Self::apply_balance_change(&env, &staker, -amount);

        Self::transfer_token(
            &env,
            &config.token,
            &env.current_contract_address(),
            &staker,
            amount,
        )?;

        let board = leaderboard::record_unstake(&env, Self::board(&env), &staker, amount);
        env.storage().instance().set(&LEADERBOARD, &board);

        Self::settle_pools(&env);

        events::publish_unstaked(&env, staker, amount);
        Ok(())
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Pay out the caller's entire withdrawable reward.
    ///
    /// Pools settle first, so a matured cycle is part of this withdrawal.
    pub fn withdraw_reward(env: Env, staker: Address) -> Result<i128, Error> {
        let config = Self::config(&env)?;
        staker.require_auth();

        Self::settle_pools(&env);

        let amount = Self::withdrawable_of(&env, &staker);
        if amount <= 0 {
            return Err(Error::NothingToWithdraw);
        }

        // Record the payout before the transfer (checks-effects-interactions).
        let key = (USER_WITHDRAWN, staker.clone());
        let withdrawn: i128 = env.storage().persistent().get(&key).unwrap_or(0);
        env.storage()
            .persistent()
            .set(&key, &withdrawn.saturating_add(amount));

        Self::transfer_token(
            &env,
            &config.token,
            &env.current_contract_address(),
            &staker,
            amount,
        )?;

        events::publish_reward_withdrawn(&env, staker, amount);
        Ok(amount)
    }

    // ── Owner functions ─────────────────────────────────────────────────────

    /// Replace the partner fee wallet. Owner only.
    pub fn set_partner_wallet(env: Env, caller: Address, wallet: Address) -> Result<(), Error> {
        let mut config = Self::config(&env)?;
        caller.require_auth();
        Self::require_owner(&config, &caller)?;

        config.partner_wallet = wallet.clone();
        env.storage().instance().set(&CONFIG, &config);

        events::publish_partner_wallet_set(&env, wallet);
        Ok(())
    }

    /// Replace the platform fee wallet set. Owner only; the set must not be
    /// empty.
    pub fn set_platform_wallets(
        env: Env,
        caller: Address,
        wallets: Vec<Address>,
    ) -> Result<(), Error> {
        let mut config = Self::config(&env)?;
        caller.require_auth();
        Self::require_owner(&config, &caller)?;

        if wallets.is_empty() {
            return Err(Error::InvalidWallets);
        }

        config.platform_wallets = wallets.clone();
        env.storage().instance().set(&CONFIG, &config);

        events::publish_platform_wallets_set(&env, wallets);
        Ok(())
    }

    /// Hand ownership to `new_owner`. Owner only, single step.
    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<(), Error> {
        let mut config = Self::config(&env)?;
        caller.require_auth();
        Self::require_owner(&config, &caller)?;

        let previous_owner = config.owner.clone();
        config.owner = new_owner.clone();
        env.storage().instance().set(&CONFIG, &config);

        events::publish_ownership_transferred(&env, previous_owner, new_owner);
        Ok(())
    }

    // ── View functions ──────────────────────────────────────────────────────

    /// Current net stake of an account.
    pub fn stake_of(env: Env, account: Address) -> i128 {
        Self::staked_of(&env, &account)
    }

    /// Reward the account could withdraw right now.
    pub fn withdrawable_reward_of(env: Env, account: Address) -> i128 {
        Self::withdrawable_of(&env, &account)
    }

    /// Reward already paid out to the account.
    pub fn withdrawn_reward_of(env: Env, account: Address) -> i128 {
        Self::withdrawn_of(&env, &account)
    }

    /// Total reward ever accrued: withdrawable plus withdrawn.
    pub fn accumulative_reward_of(env: Env, account: Address) -> i128 {
        Self::accumulated_of(&env, &account)
    }

    /// Sum of every account's current net stake.
    pub fn all_stakes(env: Env) -> i128 {
        Self::total_staked(&env)
    }

    /// Accounts currently on the bonus leaderboard, rank order. An address
    /// appears once per qualifying stake event it still holds.
    pub fn bonus_pool_leaderboard(env: Env) -> Vec<Address> {
        leaderboard::members(&env, &Self::board(&env))
    }

    /// Undistributed bonus pool balance.
    pub fn bonus_reward_pool(env: Env) -> i128 {
        env.storage().instance().get(&BONUS_POOL).unwrap_or(0)
    }

    /// Undistributed monthly pool balance.
    pub fn monthly_reward_pool(env: Env) -> i128 {
        env.storage().instance().get(&MONTHLY_POOL).unwrap_or(0)
    }

    /// Seconds until the bonus pool may pay out; zero once elapsed.
    pub fn bonus_reward_pool_countdown(env: Env) -> u64 {
        let deadline: u64 = env.storage().instance().get(&BONUS_DEADLINE).unwrap_or(0);
        pools::countdown(deadline, env.ledger().timestamp())
    }

    /// Seconds until the monthly pool may pay out; zero once elapsed.
    pub fn monthly_reward_pool_countdown(env: Env) -> u64 {
        let deadline: u64 = env.storage().instance().get(&MONTHLY_DEADLINE).unwrap_or(0);
        pools::countdown(deadline, env.ledger().timestamp())
    }

    /// Cumulative referral fees ever routed to an address.
    pub fn referral_rewards(env: Env, account: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&(REFERRAL_REWARD, account))
            .unwrap_or(0)
    }

    /// Number of distinct addresses that have ever staked.
    pub fn ever_staked_users_count(env: Env) -> u64 {
        env.storage().instance().get(&EVER_STAKED_COUNT).unwrap_or(0)
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        Ok(Self::config(&env)?.owner)
    }

    pub fn partner_wallet(env: Env) -> Result<Address, Error> {
        Ok(Self::config(&env)?.partner_wallet)
    }

    pub fn platform_wallets(env: Env) -> Result<Vec<Address>, Error> {
        Ok(Self::config(&env)?.platform_wallets)
    }

    // ── Internal: fee routing ───────────────────────────────────────────────

    /// Move every fee leg of one deposit to its destination. Zero-valued
    /// legs skip their transfer.
    fn route_fees(
        env: &Env,
        config: &StakingConfig,
        split: &DepositSplit,
        referrer: Option<&Address>,
    ) -> Result<(), Error> {
        if let Some(referrer) = referrer {
            if split.referral > 0 {
                Self::transfer_token(
                    env,
                    &config.token,
                    &env.current_contract_address(),
                    referrer,
                    split.referral,
                )?;
                let key = (REFERRAL_REWARD, referrer.clone());
                let earned: i128 = env.storage().persistent().get(&key).unwrap_or(0);
                env.storage()
                    .persistent()
                    .set(&key, &earned.saturating_add(split.referral));
            }
        }

        if split.monthly_pool > 0 {
            let pool: i128 = env.storage().instance().get(&MONTHLY_POOL).unwrap_or(0);
            env.storage()
                .instance()
                .set(&MONTHLY_POOL, &pool.saturating_add(split.monthly_pool));
        }

        if split.partner > 0 {
            Self::transfer_token(
                env,
                &config.token,
                &env.current_contract_address(),
                &config.partner_wallet,
                split.partner,
            )?;
        }

        if split.platform > 0 {
            // Even split; the integer remainder lands on the first wallet.
            let count = config.platform_wallets.len() as i128;
            let base = split.platform / count;
            let mut extra = split.platform - base * count;
            for wallet in config.platform_wallets.iter() {
                let leg = base + extra;
                extra = 0;
                if leg > 0 {
                    Self::transfer_token(
                        env,
                        &config.token,
                        &env.current_contract_address(),
                        &wallet,
                        leg,
                    )?;
                }
            }
        }

        if split.bonus_pool > 0 {
            let pool: i128 = env.storage().instance().get(&BONUS_POOL).unwrap_or(0);
            env.storage()
                .instance()
                .set(&BONUS_POOL, &pool.saturating_add(split.bonus_pool));
        }

        Ok(())
    }

    // ── Internal: reward ledger ─────────────────────────────────────────────

    /// Credit `amount` pro-rata to every current staker by advancing the
    /// magnified per-share accumulator.
    fn distribute(env: &Env, amount: i128) {
        if amount <= 0 {
            return;
        }
        let total = Self::total_staked(env);
        if total <= 0 {
            return;
        }
        let per_share = Self::reward_per_share(env)
            .saturating_add(rewards::per_share_delta(amount, total));
        env.storage().instance().set(&REWARD_PER_SHARE, &per_share);
    }

    /// Change an account's balance by `delta` (positive on stake, negative
    /// on unstake), adjusting the correction first so the account's accrued
    /// reward reads the same before and after.
    fn apply_balance_change(env: &Env, account: &Address, delta: i128) {
        let per_share = Self::reward_per_share(env);

        let correction_key = (USER_CORRECTION, account.clone());
        let correction: i128 = env.storage().persistent().get(&correction_key).unwrap_or(0);
        env.storage().persistent().set(
            &correction_key,
            &correction.saturating_add(rewards::balance_change_correction(delta, per_share)),
        );

        let stake_key = (USER_STAKE, account.clone());
        let staked: i128 = env.storage().persistent().get(&stake_key).unwrap_or(0);
        env.storage()
            .persistent()
            .set(&stake_key, &staked.saturating_add(delta));

        let total = Self::total_staked(env).saturating_add(delta);
        env.storage().instance().set(&TOTAL_STAKED, &total);
    }

    /// Credit whole units straight onto one account's ledger position.
    fn credit_account(env: &Env, account: &Address, amount: i128) {
        let key = (USER_CORRECTION, account.clone());
        let correction: i128 = env.storage().persistent().get(&key).unwrap_or(0);
        env.storage()
            .persistent()
            .set(&key, &correction.saturating_add(rewards::credit_correction(amount)));
    }

    /// Count an address the first time it ever stakes.
    fn note_first_stake(env: &Env, account: &Address) {
        let key = (USER_HAS_STAKED, account.clone());
        if env.storage().persistent().has(&key) {
            return;
        }
        env.storage().persistent().set(&key, &true);

        let count: u64 = env.storage().instance().get(&EVER_STAKED_COUNT).unwrap_or(0);
        env.storage()
            .instance()
            .set(&EVER_STAKED_COUNT, &count.saturating_add(1));
    }

    // ── Internal: pool settlement ───────────────────────────────────────────

    /// Run any pool whose deadline has passed. Called from every mutating
    /// entrypoint; there is no background execution.
    fn settle_pools(env: &Env) {
        let now = env.ledger().timestamp();
        Self::settle_bonus_pool(env, now);
        Self::settle_monthly_pool(env, now);
    }

    /// Pay 40% of the bonus pool to the leaderboard, pro-rata to entry
    /// amounts, through the reward ledger. With an empty leaderboard the
    /// cycle stays pending — the countdown reads zero until an eligible
    /// entry exists, and no funds move.
    fn settle_bonus_pool(env: &Env, now: u64) {
        let deadline: u64 = env.storage().instance().get(&BONUS_DEADLINE).unwrap_or(0);
        if !pools::is_elapsed(deadline, now) {
            return;
        }
        let board = Self::board(env);
        if board.is_empty() {
            return;
        }

        let pool: i128 = env.storage().instance().get(&BONUS_POOL).unwrap_or(0);
        let payout = pools::payout_amount(pool, pools::BONUS_PAYOUT_PPM);

        let mut weight: i128 = 0;
        for entry in board.iter() {
            weight = weight.saturating_add(entry.amount);
        }

        // Flooring dust from the per-entry shares stays in the pool.
        let mut paid: i128 = 0;
        if payout > 0 && weight > 0 {
            for entry in board.iter() {
                let share = payout.saturating_mul(entry.amount) / weight;
                if share > 0 {
                    Self::credit_account(env, &entry.account, share);
                    paid = paid.saturating_add(share);
                }
            }
        }

        env.storage()
            .instance()
            .set(&BONUS_POOL, &pool.saturating_sub(paid));
        env.storage().instance().set(
            &BONUS_DEADLINE,
            &pools::next_deadline(now, pools::BONUS_POOL_PERIOD),
        );
        events::publish_bonus_pool_distributed(env, paid, board.len());
    }

    /// Distribute 50% of the monthly pool to all current stakers pro-rata.
    /// With nothing staked the cycle stays pending, like the bonus path.
    fn settle_monthly_pool(env: &Env, now: u64) {
        let deadline: u64 = env.storage().instance().get(&MONTHLY_DEADLINE).unwrap_or(0);
        if !pools::is_elapsed(deadline, now) {
            return;
        }
        if Self::total_staked(env) <= 0 {
            return;
        }

        let pool: i128 = env.storage().instance().get(&MONTHLY_POOL).unwrap_or(0);
        let payout = pools::payout_amount(pool, pools::MONTHLY_PAYOUT_PPM);
        Self::distribute(env, payout);

        env.storage()
            .instance()
            .set(&MONTHLY_POOL, &pool.saturating_sub(payout));
        env.storage().instance().set(
            &MONTHLY_DEADLINE,
            &pools::next_deadline(now, pools::MONTHLY_POOL_PERIOD),
        );
        events::publish_monthly_pool_distributed(env, payout);
    }

    // ── Internal: reads & guards ────────────────────────────────────────────

    fn config(env: &Env) -> Result<StakingConfig, Error> {
        env.storage()
            .instance()
            .get(&CONFIG)
            .ok_or(Error::NotInitialized)
    }

    fn require_owner(config: &StakingConfig, caller: &Address) -> Result<(), Error> {
        if *caller != config.owner {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }

    fn total_staked(env: &Env) -> i128 {
        env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
    }

    fn reward_per_share(env: &Env) -> i128 {
        env.storage().instance().get(&REWARD_PER_SHARE).unwrap_or(0)
    }

    fn board(env: &Env) -> Vec<LeaderboardEntry> {
        env.storage()
            .instance()
            .get(&LEADERBOARD)
            .unwrap_or_else(|| Vec::new(env))
    }

    fn staked_of(env: &Env, account: &Address) -> i128 {
        env.storage()
            .persistent()
            .get(&(USER_STAKE, account.clone()))
            .unwrap_or(0)
    }

    fn withdrawn_of(env: &Env, account: &Address) -> i128 {
        env.storage()
            .persistent()
            .get(&(USER_WITHDRAWN, account.clone()))
            .unwrap_or(0)
    }

    fn accumulated_of(env: &Env, account: &Address) -> i128 {
        let correction: i128 = env
            .storage()
            .persistent()
            .get(&(USER_CORRECTION, account.clone()))
            .unwrap_or(0);
        rewards::accumulated(
            Self::staked_of(env, account),
            Self::reward_per_share(env),
            correction,
        )
    }

    fn withdrawable_of(env: &Env, account: &Address) -> i128 {
        Self::accumulated_of(env, account).saturating_sub(Self::withdrawn_of(env, account))
    }

    /// Move tokens, surfacing any token-side failure as [`Error::TransferFailed`]
    /// instead of a host panic.
    fn transfer_token(
        env: &Env,
        token_id: &Address,
        from: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), Error> {
        token::Client::new(env, token_id)
            .try_transfer(from, to, &amount)
            .map_err(|_| Error::TransferFailed)?
            .map_err(|_| Error::TransferFailed)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────



#[cfg(test)]
mod test_pools;
