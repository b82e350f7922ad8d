//! Provider traits, the raw API payload type, and structured error types.
//!
//! `EpochSource` and `RewardsProvider` abstract over the two remote
//! collaborators (chain RPC, rewards API) so the reconciliation driver can be
//! exercised against mocks in tests.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// One validator's entry in a rewards-API epoch payload, as delivered.
///
/// Every numeric field is optional: the upstream API omits or nulls fields
/// for validators without that reward component, and absent means zero.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawValidator {
    #[serde(default)]
    pub identity_pubkey: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub commission: Option<f64>,
    #[serde(default)]
    pub mev_commission: Option<f64>,
    #[serde(default)]
    pub rewards: Option<f64>,
    #[serde(default)]
    pub mev_to_validator: Option<f64>,
    #[serde(default)]
    pub total_inflation_reward: Option<f64>,
    #[serde(default)]
    pub vote_cost: Option<f64>,
    #[serde(default)]
    pub activated_stake: Option<i64>,
    #[serde(default)]
    pub leader_slots: Option<i64>,
    #[serde(default)]
    pub skip_rate: Option<f64>,
    #[serde(default)]
    pub votes_cast: Option<i64>,
    #[serde(default)]
    pub stake_percentage: Option<f64>,
}

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rewards API returned HTTP {status} for epoch {epoch}")]
    HttpStatus { status: u16, epoch: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("csv export error: {0}")]
    Export(String),
}

/// Source of the current chain epoch.
pub trait EpochSource {
    /// The current epoch number, or `None` if it cannot be resolved.
    ///
    /// `None` covers every failure mode (network, non-200 status, missing
    /// field) — the caller cannot distinguish them and must treat a missing
    /// result as fatal, since no processing range is knowable without it.
    fn current_epoch(&self) -> Option<u64>;
}

/// Source of per-epoch validator reward payloads.
pub trait RewardsProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch one identity's record for one epoch.
    ///
    /// `Ok(None)` means the epoch's payload was retrieved but the identity
    /// was not in it. Errors are per-epoch and recoverable: the driver
    /// degrades them to a missing marker and continues.
    fn fetch(&self, identity: &str, epoch: u64) -> Result<Option<RawValidator>, DataError>;
}

/// Progress callback for a reconciliation run.
pub trait SyncProgress {
    /// Called before each fetch attempt (cached epochs are skipped silently).
    fn on_epoch_start(&self, epoch: u64);

    /// Called when an epoch's payload had no entry for the identity.
    fn on_epoch_missing(&self, epoch: u64, identity: &str);

    /// Called when a fetch failed; the epoch is recorded as missing.
    fn on_epoch_error(&self, epoch: u64, error: &DataError);

    /// Called when the run ends with an empty pending batch.
    fn on_no_new_records(&self);

    /// Called after the CSV export is written.
    fn on_export(&self, path: &Path, rows: usize);
}

/// Progress reporter that streams status lines to stderr.
pub struct StderrProgress;

impl SyncProgress for StderrProgress {
    fn on_epoch_start(&self, epoch: u64) {
        eprintln!(">>> Fetching epoch {epoch}");
    }

    fn on_epoch_missing(&self, epoch: u64, identity: &str) {
        eprintln!(">>> Epoch {epoch} does not have data for {identity}");
    }

    fn on_epoch_error(&self, epoch: u64, error: &DataError) {
        eprintln!(">>> Error fetching epoch {epoch}: {error}");
    }

    fn on_no_new_records(&self) {
        eprintln!(">>> No new records to insert");
    }

    fn on_export(&self, path: &Path, rows: usize) {
        eprintln!(">>> Generated CSV '{}' ({rows} rows)", path.display());
    }
}
