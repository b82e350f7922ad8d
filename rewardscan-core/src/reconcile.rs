//! Reconciliation driver — walks the epoch range, fills cache gaps, exports.
//!
//! The driver is deliberately sequential: one fetch per throttle interval,
//! ascending epoch order, deterministic write ordering. Missing markers are
//! written immediately (durable even if the run dies mid-loop); confirmed
//! rewards accumulate in a pending batch committed once at the end.

use crate::data::{DataError, EpochSource, RewardsProvider, SyncProgress};
use crate::derive::derive_record;
use crate::domain::RewardRecord;
use crate::store::RewardStore;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Earliest epoch the rewards API can serve (checked 2025-08-01).
pub const START_EPOCH: u64 = 600;

/// Tuning knobs for a reconciliation run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// First epoch of the processing range.
    pub start_epoch: u64,
    /// Pause after every fetch attempt, successful or not.
    pub throttle: Duration,
    /// Directory the `<identity>.csv` export is written to.
    pub out_dir: PathBuf,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            start_epoch: START_EPOCH,
            throttle: Duration::from_secs(1),
            out_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Error)]
pub enum SyncError {
    /// The only fatal case: without a current epoch no processing range is
    /// knowable, so the whole run aborts.
    #[error("unable to determine the current epoch from the chain RPC")]
    CurrentEpochUnavailable,

    #[error(transparent)]
    Data(#[from] DataError),
}

/// Outcome of a reconciliation run.
#[derive(Debug, Clone)]
pub struct SyncSummary {
    pub identity: String,
    pub start_epoch: u64,
    pub end_epoch: u64,
    /// Epochs already resolved by a prior run.
    pub skipped: usize,
    /// Epochs fetched and added to the rewards table this run.
    pub fetched: usize,
    /// Epochs recorded as missing this run.
    pub missing: usize,
    pub csv_path: PathBuf,
    pub exported_rows: usize,
}

/// Reconcile the store with the upstream rewards history for one identity.
///
/// Resolves the current epoch, walks `[start_epoch, current - 1]` ascending
/// (the in-progress epoch is never queried), fetches unresolved epochs,
/// bulk-inserts the new rows, and exports the full history to CSV.
///
/// Per-epoch fetch failures degrade to missing markers and never abort the
/// loop; only epoch resolution is fatal.
pub fn sync_rewards(
    oracle: &dyn EpochSource,
    provider: &dyn RewardsProvider,
    store: &mut RewardStore,
    identity: &str,
    options: &SyncOptions,
    progress: &dyn SyncProgress,
) -> Result<SyncSummary, SyncError> {
    let current = oracle
        .current_epoch()
        .ok_or(SyncError::CurrentEpochUnavailable)?;
    // The most recent epoch is still in progress upstream
    let end_epoch = current.saturating_sub(1);

    let mut skipped = 0usize;
    let mut missing = 0usize;
    let mut pending: Vec<RewardRecord> = Vec::new();

    for epoch in options.start_epoch..=end_epoch {
        if store.exists(identity, epoch) {
            skipped += 1;
            continue;
        }

        progress.on_epoch_start(epoch);
        match provider.fetch(identity, epoch) {
            Ok(Some(raw)) => {
                pending.push(derive_record(epoch, &raw));
            }
            Ok(None) => {
                progress.on_epoch_missing(epoch, identity);
                store.insert_missing(epoch, identity)?;
                missing += 1;
            }
            Err(e) => {
                progress.on_epoch_error(epoch, &e);
                store.insert_missing(epoch, identity)?;
                missing += 1;
            }
        }

        if !options.throttle.is_zero() {
            std::thread::sleep(options.throttle);
        }
    }

    let fetched = pending.len();
    if pending.is_empty() {
        progress.on_no_new_records();
    } else {
        store.bulk_insert(&pending)?;
    }

    let csv_path = options.out_dir.join(format!("{identity}.csv"));
    let exported_rows = store.export_csv(identity, &csv_path)?;
    progress.on_export(&csv_path, exported_rows);

    Ok(SyncSummary {
        identity: identity.to_string(),
        start_epoch: options.start_epoch,
        end_epoch,
        skipped,
        fetched,
        missing,
        csv_path,
        exported_rows,
    })
}
