//! Metric deriver — pure transform from a raw API payload entry to a
//! normalized [`RewardRecord`].
//!
//! The formulas mirror the upstream accounting exactly: the rounded
//! `inflation_rewards` value is reused in the revenue sums, while `rewards`,
//! `mev_to_validator` and `vote_cost` enter those sums unrounded.

use crate::data::RawValidator;
use crate::domain::RewardRecord;

/// Round to 9 fractional digits, half away from zero.
pub fn round9(value: f64) -> f64 {
    (value * 1e9).round() / 1e9
}

/// Derive the normalized reward record for one epoch.
pub fn derive_record(epoch: u64, raw: &RawValidator) -> RewardRecord {
    let commission = raw.commission.unwrap_or(0.0);
    // Upstream commission arrives in percent; the historical transform is
    // percent * 100, not a true basis-point conversion. Kept verbatim.
    let commission_bps = commission * 100.0;

    let rewards = raw.rewards.unwrap_or(0.0);
    let mev_to_validator = raw.mev_to_validator.unwrap_or(0.0);
    let total_inflation_reward = raw.total_inflation_reward.unwrap_or(0.0);
    let vote_cost = raw.vote_cost.unwrap_or(0.0);

    let inflation_rewards = round9(total_inflation_reward * commission_bps / 10_000.0);

    RewardRecord {
        epoch,
        name: raw.name.clone().unwrap_or_default(),
        identity: raw.identity_pubkey.clone(),
        activated_stake: raw.activated_stake.unwrap_or(0),
        block_rewards: round9(rewards),
        mev_to_validator: round9(mev_to_validator),
        inflation_rewards,
        base_revenue: round9(rewards + inflation_rewards),
        total_revenue: round9(rewards + mev_to_validator + inflation_rewards),
        vote_cost: round9(vote_cost),
        net_earnings: round9(rewards + mev_to_validator + inflation_rewards - vote_cost),
        leader_slots: raw.leader_slots.unwrap_or(0),
        skip_rate: raw.skip_rate.unwrap_or(0.0),
        votes_cast: raw.votes_cast.unwrap_or(0),
        stake_percentage: raw.stake_percentage.unwrap_or(0.0),
        commission_bps: commission_bps.round() as i64,
        mev_commission_bps: raw.mev_commission.unwrap_or(0.0).round() as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_raw() -> RawValidator {
        RawValidator {
            identity_pubkey: "ABC123".into(),
            name: Some("Test Validator".into()),
            commission: Some(5.0),
            mev_commission: Some(800.0),
            rewards: Some(1_000_000_000.0),
            mev_to_validator: Some(50_000_000.0),
            total_inflation_reward: Some(2_000_000_000.0),
            vote_cost: Some(10_000_000.0),
            activated_stake: Some(123_456_789),
            leader_slots: Some(40),
            skip_rate: Some(0.025),
            votes_cast: Some(431_998),
            stake_percentage: Some(0.0012),
        }
    }

    #[test]
    fn worked_example_matches_upstream_accounting() {
        let record = derive_record(600, &sample_raw());

        assert_eq!(record.epoch, 600);
        assert_eq!(record.identity, "ABC123");
        assert_eq!(record.commission_bps, 500);
        assert_eq!(record.mev_commission_bps, 800);
        assert_eq!(record.inflation_rewards, 100_000_000.0);
        assert_eq!(record.block_rewards, 1_000_000_000.0);
        assert_eq!(record.base_revenue, 1_100_000_000.0);
        assert_eq!(record.total_revenue, 1_150_000_000.0);
        assert_eq!(record.vote_cost, 10_000_000.0);
        assert_eq!(record.net_earnings, 1_140_000_000.0);
    }

    #[test]
    fn absent_numeric_fields_derive_as_zero() {
        let raw = RawValidator {
            identity_pubkey: "ABC123".into(),
            ..Default::default()
        };
        let record = derive_record(700, &raw);

        assert_eq!(record.name, "");
        assert_eq!(record.activated_stake, 0);
        assert_eq!(record.block_rewards, 0.0);
        assert_eq!(record.inflation_rewards, 0.0);
        assert_eq!(record.base_revenue, 0.0);
        assert_eq!(record.total_revenue, 0.0);
        assert_eq!(record.net_earnings, 0.0);
        assert_eq!(record.commission_bps, 0);
        assert_eq!(record.mev_commission_bps, 0);
    }

    #[test]
    fn round9_truncates_below_nanolamport_resolution() {
        assert_eq!(round9(1.123_456_789_4), 1.123_456_789);
        assert_eq!(round9(0.000_000_000_4), 0.0);
        assert_eq!(round9(-1.123_456_789_4), -1.123_456_789);
    }

    #[test]
    fn round9_is_half_away_from_zero() {
        assert_eq!(round9(0.000_000_000_5), 0.000_000_001);
        assert_eq!(round9(-0.000_000_000_5), -0.000_000_001);
    }

    #[test]
    fn revenue_identities_hold() {
        let record = derive_record(650, &sample_raw());

        assert_eq!(
            record.base_revenue,
            round9(record.block_rewards + record.inflation_rewards)
        );
        assert_eq!(
            record.total_revenue,
            round9(record.base_revenue + record.mev_to_validator)
        );
        assert_eq!(
            record.net_earnings,
            round9(record.total_revenue - record.vote_cost)
        );
    }
}
