//! Magnified dividend-per-share arithmetic.
//!
//! The ledger pays every staker pro-rata without ever looping over accounts.
//! A single global accumulator tracks the reward distributed per staked unit,
//! magnified by [`MAGNITUDE`] so sub-unit amounts survive integer division:
//!
//! ```text
//! per_share += distributed × MAGNITUDE / total_staked
//! ```
//!
//! A per-account signed `correction` keeps reads exact across balance
//! changes. Whenever a balance changes by `delta`, the correction absorbs
//! `-delta × per_share`, so the account's accrued total
//!
//! ```text
//! accumulated = (stake × per_share + correction) / MAGNITUDE
//! ```
//!
//! is unaffected by accumulator entries recorded while the account did not
//! hold that balance. Reads and updates are O(1) regardless of how many
//! stake/unstake/distribution events ever happened.
//!
//! `MAGNITUDE = 10^18` bounds the flooring loss of one distribution to under
//! a single token unit for any total stake up to 10^18 units — ample headroom
//! over the 7-decimal amounts Stellar assets carry. The magnified products
//! stay far inside i128 range at those scales.

/// Fixed-point scaling factor for the per-share accumulator and corrections.
pub const MAGNITUDE: i128 = 1_000_000_000_000_000_000;

/// Accumulator advance for distributing `amount` across `total_staked`.
///
/// The caller guarantees `total_staked > 0`; distribution with nobody staked
/// is a routing decision made above this module.
pub fn per_share_delta(amount: i128, total_staked: i128) -> i128 {
    amount.saturating_mul(MAGNITUDE) / total_staked
}

/// Total reward ever accrued by an account: the floored, de-magnified sum of
/// its share of the accumulator and its correction. Monotonically
/// non-decreasing as long as `per_share` only grows.
pub fn accumulated(staked: i128, per_share: i128, correction: i128) -> i128 {
    (staked.saturating_mul(per_share)).saturating_add(correction) / MAGNITUDE
}

/// Correction term to add when an account's balance changes by `delta`
/// (positive on stake, negative on unstake). Cancels the accumulator history
/// the new balance portion did not live through.
pub fn balance_change_correction(delta: i128, per_share: i128) -> i128 {
    delta.saturating_mul(per_share).saturating_neg()
}

/// Correction term that credits `amount` whole units directly to one
/// account, bypassing the pro-rata accumulator. Used for bonus-pool payouts.
pub fn credit_correction(amount: i128) -> i128 {
    amount.saturating_mul(MAGNITUDE)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
