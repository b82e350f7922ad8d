//! Remote data sources: chain RPC epoch oracle and the rewards API client.

pub mod provider;
pub mod solana_rpc;
pub mod trillium;

pub use provider::{
    DataError, EpochSource, RawValidator, RewardsProvider, StderrProgress, SyncProgress,
};
pub use solana_rpc::SolanaRpc;
pub use trillium::TrilliumProvider;
