//! Deposit fee splitting.
//!
//! Every gross deposit is carved into fixed parts-per-million legs plus the
//! net stake. This is a pure module: no storage, no transfers — the contract
//! routes the legs, this module only does the arithmetic.
//!
//! All legs floor under integer division; the net stake absorbs whatever the
//! flooring leaves over, so the split always conserves the deposit exactly:
//!
//! ```text
//! amount == net_stake + referral + monthly_pool + partner
//!           + platform + bonus_pool + staker_reward
//! ```
//!
//! When no referrer accompanies the deposit, the referral leg is redirected
//! into the monthly pool instead of being dropped.

/// Denominator for all parts-per-million fee constants.
pub const FEE_DENOMINATOR: i128 = 1_000_000;

/// Referral leg: 0.5% of the gross deposit.
pub const REFERRAL_FEE_PPM: i128 = 5_000;

/// Partner leg: 0.5% of the gross deposit.
pub const PARTNER_FEE_PPM: i128 = 5_000;

/// Platform leg: 1% of the gross deposit, shared by the platform wallets.
pub const PLATFORM_FEE_PPM: i128 = 10_000;

/// Bonus-pool leg: 1% of the gross deposit.
pub const BONUS_POOL_PPM: i128 = 10_000;

/// Staker-reward leg: 7% of the gross deposit, distributed immediately to
/// all current stakers.
pub const STAKER_REWARD_PPM: i128 = 70_000;

/// Breakdown of one gross deposit.
///
/// Exactly one of `referral` and `monthly_pool` is non-zero for deposits
/// large enough to produce a referral cut at all.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositSplit {
    pub net_stake: i128,
    pub referral: i128,
    pub monthly_pool: i128,
    pub partner: i128,
    pub platform: i128,
    pub bonus_pool: i128,
    pub staker_reward: i128,
}

/// Split `amount` into its fee legs and the net stake.
///
/// `amount` must be positive; the caller validates before splitting.
pub fn split_deposit(amount: i128, has_referrer: bool) -> DepositSplit {
    let referral_cut = cut(amount, REFERRAL_FEE_PPM);
    let partner = cut(amount, PARTNER_FEE_PPM);
    let platform = cut(amount, PLATFORM_FEE_PPM);
    let bonus_pool = cut(amount, BONUS_POOL_PPM);
    let staker_reward = cut(amount, STAKER_REWARD_PPM);

    let (referral, monthly_pool) = if has_referrer {
        (referral_cut, 0)
    } else {
        (0, referral_cut)
    };

    let net_stake = amount
        - referral
        - monthly_pool
        - partner
        - platform
        - bonus_pool
        - staker_reward;

    DepositSplit {
        net_stake,
        referral,
        monthly_pool,
        partner,
        platform,
        bonus_pool,
        staker_reward,
    }
}

fn cut(amount: i128, ppm: i128) -> i128 {
    amount.saturating_mul(ppm) / FEE_DENOMINATOR
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure-math tests, no Soroban environment needed.
