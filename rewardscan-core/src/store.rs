//! Embedded SQLite store for confirmed rewards and missing-epoch markers.
//!
//! Two append-only tables, no uniqueness constraints: deduplication is the
//! driver's membership check, not the schema. The connection is released on
//! drop, on every exit path.

use crate::data::DataError;
use crate::domain::{MissingMarker, RewardRecord};
use rusqlite::{params, Connection};
use std::path::Path;

/// `rewards` column order; the CSV export header mirrors this exactly.
const COLUMNS: [&str; 17] = [
    "epoch",
    "name",
    "identity",
    "activated_stake",
    "block_rewards",
    "mev_to_validator",
    "inflation_rewards",
    "base_revenue",
    "total_revenue",
    "vote_cost",
    "net_earnings",
    "leader_slots",
    "skip_rate",
    "votes_cast",
    "stake_percentage",
    "commission_bps",
    "mev_commission_bps",
];

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS rewards (
    epoch INTEGER,
    name TEXT,
    identity TEXT,
    activated_stake INTEGER,
    block_rewards REAL,
    mev_to_validator REAL,
    inflation_rewards REAL,
    base_revenue REAL,
    total_revenue REAL,
    vote_cost REAL,
    net_earnings REAL,
    leader_slots INTEGER,
    skip_rate REAL,
    votes_cast INTEGER,
    stake_percentage REAL,
    commission_bps INTEGER,
    mev_commission_bps INTEGER
);

CREATE TABLE IF NOT EXISTS missing_rewards (
    epoch INTEGER,
    identity TEXT
);
";

/// File-backed reward store shared across runs and identities.
pub struct RewardStore {
    conn: Connection,
}

impl RewardStore {
    /// Open (or create) the store file and ensure both tables exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DataError> {
        Self::from_connection(Connection::open(path)?)
    }

    /// In-memory store for tests.
    pub fn open_in_memory() -> Result<Self, DataError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, DataError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Whether (identity, epoch) is already resolved — present in either the
    /// rewards table or the missing-markers table.
    ///
    /// Query failures conservatively report false: a redundant re-fetch is
    /// idempotent, silently dropping an epoch is not.
    pub fn exists(&self, identity: &str, epoch: u64) -> bool {
        self.try_exists(identity, epoch).unwrap_or(false)
    }

    fn try_exists(&self, identity: &str, epoch: u64) -> Result<bool, rusqlite::Error> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT 1 FROM (
                SELECT epoch, identity FROM rewards
                UNION
                SELECT epoch, identity FROM missing_rewards
            ) WHERE identity = ?1 AND epoch = ?2 LIMIT 1",
        )?;
        stmt.exists(params![identity, epoch as i64])
    }

    /// Append one missing-epoch tombstone. Written immediately so a crash
    /// mid-run leaves markers durable even though reward rows are not.
    pub fn insert_missing(&self, epoch: u64, identity: &str) -> Result<(), DataError> {
        self.conn.execute(
            "INSERT INTO missing_rewards (epoch, identity) VALUES (?1, ?2)",
            params![epoch as i64, identity],
        )?;
        Ok(())
    }

    /// Append a batch of confirmed reward rows in one transaction.
    pub fn bulk_insert(&mut self, records: &[RewardRecord]) -> Result<(), DataError> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO rewards VALUES
                 (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
            )?;
            for r in records {
                stmt.execute(params![
                    r.epoch as i64,
                    r.name,
                    r.identity,
                    r.activated_stake,
                    r.block_rewards,
                    r.mev_to_validator,
                    r.inflation_rewards,
                    r.base_revenue,
                    r.total_revenue,
                    r.vote_cost,
                    r.net_earnings,
                    r.leader_slots,
                    r.skip_rate,
                    r.votes_cast,
                    r.stake_percentage,
                    r.commission_bps,
                    r.mev_commission_bps,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// All reward rows for an identity, epoch ascending.
    pub fn rewards_for(&self, identity: &str) -> Result<Vec<RewardRecord>, DataError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT epoch, name, identity, activated_stake, block_rewards, mev_to_validator,
                    inflation_rewards, base_revenue, total_revenue, vote_cost, net_earnings,
                    leader_slots, skip_rate, votes_cast, stake_percentage, commission_bps,
                    mev_commission_bps
             FROM rewards WHERE identity = ?1 ORDER BY epoch ASC",
        )?;
        let rows = stmt.query_map(params![identity], |row| {
            Ok(RewardRecord {
                epoch: row.get::<_, i64>(0)? as u64,
                name: row.get(1)?,
                identity: row.get(2)?,
                activated_stake: row.get(3)?,
                block_rewards: row.get(4)?,
                mev_to_validator: row.get(5)?,
                inflation_rewards: row.get(6)?,
                base_revenue: row.get(7)?,
                total_revenue: row.get(8)?,
                vote_cost: row.get(9)?,
                net_earnings: row.get(10)?,
                leader_slots: row.get(11)?,
                skip_rate: row.get(12)?,
                votes_cast: row.get(13)?,
                stake_percentage: row.get(14)?,
                commission_bps: row.get(15)?,
                mev_commission_bps: row.get(16)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DataError::from)
    }

    /// All missing-epoch markers for an identity, epoch ascending.
    pub fn missing_for(&self, identity: &str) -> Result<Vec<MissingMarker>, DataError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT epoch, identity FROM missing_rewards WHERE identity = ?1 ORDER BY epoch ASC",
        )?;
        let rows = stmt.query_map(params![identity], |row| {
            Ok(MissingMarker {
                epoch: row.get::<_, i64>(0)? as u64,
                identity: row.get(1)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DataError::from)
    }

    /// Export all reward rows for an identity as CSV, epoch ascending,
    /// header row first, overwriting any existing file at `path`.
    ///
    /// Returns the number of data rows written.
    pub fn export_csv(&self, identity: &str, path: &Path) -> Result<usize, DataError> {
        let records = self.rewards_for(identity)?;

        let mut wtr = csv::Writer::from_path(path)
            .map_err(|e| DataError::Export(format!("{}: {e}", path.display())))?;
        wtr.write_record(COLUMNS)
            .map_err(|e| DataError::Export(e.to_string()))?;

        for r in &records {
            wtr.write_record([
                r.epoch.to_string(),
                r.name.clone(),
                r.identity.clone(),
                r.activated_stake.to_string(),
                r.block_rewards.to_string(),
                r.mev_to_validator.to_string(),
                r.inflation_rewards.to_string(),
                r.base_revenue.to_string(),
                r.total_revenue.to_string(),
                r.vote_cost.to_string(),
                r.net_earnings.to_string(),
                r.leader_slots.to_string(),
                r.skip_rate.to_string(),
                r.votes_cast.to_string(),
                r.stake_percentage.to_string(),
                r.commission_bps.to_string(),
                r.mev_commission_bps.to_string(),
            ])
            .map_err(|e| DataError::Export(e.to_string()))?;
        }

        wtr.flush()
            .map_err(|e| DataError::Export(e.to_string()))?;
        Ok(records.len())
    }
}
