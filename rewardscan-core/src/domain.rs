//! Domain types: the normalized reward record and the missing-epoch marker.

use serde::Serialize;

/// One validator's normalized rewards for one epoch. Immutable once written:
/// the store is append-only and a (epoch, identity) pair is resolved at most
/// once.
///
/// Monetary fields are lamport-denominated and rounded to 9 fractional
/// digits. `commission_bps` is the upstream percent value times 100 — kept
/// verbatim for compatibility with existing stores even though the unit is
/// not true basis points (see DESIGN.md).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardRecord {
    pub epoch: u64,
    pub name: String,
    pub identity: String,
    pub activated_stake: i64,
    pub block_rewards: f64,
    pub mev_to_validator: f64,
    pub inflation_rewards: f64,
    pub base_revenue: f64,
    pub total_revenue: f64,
    pub vote_cost: f64,
    pub net_earnings: f64,
    pub leader_slots: i64,
    pub skip_rate: f64,
    pub votes_cast: i64,
    pub stake_percentage: f64,
    pub commission_bps: i64,
    pub mev_commission_bps: i64,
}

/// Permanent record that the rewards API had no entry for this identity in
/// this epoch. Once written, the epoch is never re-fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingMarker {
    pub epoch: u64,
    pub identity: String,
}
