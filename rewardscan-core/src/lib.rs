//! RewardScan Core — validator reward history collection and caching.
//!
//! The pipeline, leaves first:
//! - Epoch oracle: asks the chain RPC for the current epoch number
//! - Reward fetcher: pulls one epoch's validator set from the rewards API
//! - Metric deriver: pure transform from raw payload to a normalized record
//! - Reward store: embedded SQLite cache with rewards + missing-marker tables
//! - Reconciliation driver: walks the epoch range, skipping what the store
//!   already knows, and exports the accumulated history to CSV
//!
//! Everything is single-threaded and sequential by design — the rewards API
//! is throttled to one request per interval, and the store assumes a single
//! writer.

pub mod data;
pub mod derive;
pub mod domain;
pub mod reconcile;
pub mod store;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: the types handed across the driver boundary are
    /// Send + Sync, so a future supervisor thread can own the collaborators.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::RewardRecord>();
        require_sync::<domain::RewardRecord>();
        require_send::<domain::MissingMarker>();
        require_sync::<domain::MissingMarker>();
        require_send::<data::RawValidator>();
        require_sync::<data::RawValidator>();
        require_send::<reconcile::SyncSummary>();
        require_sync::<reconcile::SyncSummary>();
    }
}
