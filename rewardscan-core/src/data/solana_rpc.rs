//! Solana JSON-RPC epoch oracle.
//!
//! Issues a single `getEpochInfo` call against a fixed RPC endpoint. Failure
//! of any kind collapses to `None` — the run cannot proceed without a current
//! epoch, and retrying here would only delay the inevitable abort.

use super::provider::EpochSource;
use serde::Deserialize;
use std::time::Duration;

/// Public mainnet RPC endpoint.
pub const MAINNET_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

#[derive(Debug, Deserialize)]
struct EpochInfoResponse {
    #[serde(default)]
    result: Option<EpochInfo>,
}

#[derive(Debug, Deserialize)]
struct EpochInfo {
    epoch: u64,
}

/// Epoch oracle backed by a Solana JSON-RPC endpoint.
pub struct SolanaRpc {
    client: reqwest::blocking::Client,
    url: String,
}

impl SolanaRpc {
    pub fn new() -> Self {
        Self::with_url(MAINNET_RPC_URL)
    }

    /// Point the oracle at a non-default RPC endpoint.
    pub fn with_url(url: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            url: url.into(),
        }
    }
}

impl Default for SolanaRpc {
    fn default() -> Self {
        Self::new()
    }
}

impl EpochSource for SolanaRpc {
    fn current_epoch(&self) -> Option<u64> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getEpochInfo",
        });

        let resp = match self.client.post(&self.url).json(&body).send() {
            Ok(resp) => resp,
            Err(e) => {
                eprintln!("Error getting current epoch from Solana RPC: {e}");
                return None;
            }
        };

        if resp.status() != reqwest::StatusCode::OK {
            eprintln!(
                "Error getting current epoch from Solana RPC: HTTP {}",
                resp.status()
            );
            return None;
        }

        match resp.json::<EpochInfoResponse>() {
            Ok(info) => {
                let epoch = info.result.map(|r| r.epoch);
                if let Some(epoch) = epoch {
                    eprintln!("Current Solana epoch: {epoch}");
                }
                epoch
            }
            Err(e) => {
                eprintln!("Error getting current epoch from Solana RPC: {e}");
                None
            }
        }
    }
}
