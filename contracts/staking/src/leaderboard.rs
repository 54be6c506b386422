//! Bounded registry of the largest qualifying stake positions.
//!
//! The board holds at most [`LEADERBOARD_CAPACITY`] entries, sorted by
//! amount descending. Each qualifying stake event creates its own entry, so
//! one account may occupy several slots at once. Unstaked amounts are
//! deducted from the account's entries largest-first; an entry that falls
//! under [`MIN_QUALIFYING_STAKE`] is dropped.

use soroban_sdk::{contracttype, Address, Env, Vec};

/// Maximum number of simultaneous entries.
pub const LEADERBOARD_CAPACITY: u32 = 10;

/// Minimum net stake for an entry to be admitted or retained.
pub const MIN_QUALIFYING_STAKE: i128 = 900;

/// One qualifying stake position.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LeaderboardEntry {
    pub account: Address,
    pub amount: i128,
}

/// Whether a net stake of this size is large enough for the board.
pub fn qualifies(net_stake: i128) -> bool {
    net_stake >= MIN_QUALIFYING_STAKE
}

/// Admit a qualifying stake event.
///
/// A full board only accepts an entry that strictly exceeds its smallest;
/// the smallest is evicted to make room. Equal amounts rank behind the
/// entries already present.
pub fn record_stake(
    board: Vec<LeaderboardEntry>,
    account: &Address,
    net_stake: i128,
) -> Vec<LeaderboardEntry> {
    if !qualifies(net_stake) {
        return board;
    }

    let mut board = board;
    if board.len() >= LEADERBOARD_CAPACITY {
        match board.last() {
            Some(smallest) if net_stake > smallest.amount => {
                let _ = board.pop_back();
            }
            _ => return board,
        }
    }

    insert_sorted(
        &mut board,
        LeaderboardEntry {
            account: account.clone(),
            amount: net_stake,
        },
    );
    board
}

/// Deduct an unstaked amount from `account`'s entries, largest-first.
///
/// Entries reduced below the qualification threshold are removed; the rest
/// are re-ranked at their new size.
pub fn record_unstake(
    env: &Env,
    board: Vec<LeaderboardEntry>,
    account: &Address,
    amount: i128,
) -> Vec<LeaderboardEntry> {
    let mut remaining = amount;
    let mut rebuilt = Vec::new(env);

    for entry in board.iter() {
        if entry.account == *account && remaining > 0 {
            let taken = entry.amount.min(remaining);
            remaining -= taken;
            let reduced = entry.amount - taken;
            if reduced >= MIN_QUALIFYING_STAKE {
                insert_sorted(
                    &mut rebuilt,
                    LeaderboardEntry {
                        account: entry.account.clone(),
                        amount: reduced,
                    },
                );
            }
        } else {
            insert_sorted(&mut rebuilt, entry);
        }
    }

    rebuilt
}

/// The board's accounts in rank order. One address may appear repeatedly.
pub fn members(env: &Env, board: &Vec<LeaderboardEntry>) -> Vec<Address> {
    let mut accounts = Vec::new(env);
    for entry in board.iter() {
        accounts.push_back(entry.account);
    }
    accounts
}

/// Insert keeping the vector sorted by amount descending; ties go behind
/// the entries already there.
fn insert_sorted(board: &mut Vec<LeaderboardEntry>, entry: LeaderboardEntry) {
    let mut index = board.len();
    for i in 0..board.len() {
        if board.get_unchecked(i).amount < entry.amount {
            index = i;
            break;
        }
    }
    board.insert(index, entry);
}

// ── Unit tests ──────────────────────────────────────────────────────────────
