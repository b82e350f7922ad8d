//! Trillium rewards-API client.
//!
//! One GET per epoch returns the full validator set for that epoch; the
//! client scans linearly for the requested identity and returns only that
//! entry. Identities are unique per epoch upstream, so first match wins.

use super::provider::{DataError, RawValidator, RewardsProvider};
use std::time::Duration;

/// Production rewards-API base URL.
pub const TRILLIUM_BASE_URL: &str = "https://api.trillium.so";

/// Rewards provider backed by the Trillium validator-rewards API.
pub struct TrilliumProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl TrilliumProvider {
    pub fn new() -> Self {
        Self::with_base_url(TRILLIUM_BASE_URL)
    }

    /// Point the provider at a non-default base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn rewards_url(&self, epoch: u64) -> String {
        format!("{}/validator_rewards/{epoch}", self.base_url)
    }
}

impl Default for TrilliumProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RewardsProvider for TrilliumProvider {
    fn name(&self) -> &str {
        "trillium"
    }

    fn fetch(&self, identity: &str, epoch: u64) -> Result<Option<RawValidator>, DataError> {
        let resp = self
            .client
            .get(self.rewards_url(epoch))
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DataError::HttpStatus {
                status: status.as_u16(),
                epoch,
            });
        }

        let validators: Vec<RawValidator> = resp.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!("epoch {epoch} payload: {e}"))
        })?;

        Ok(validators
            .into_iter()
            .find(|v| v.identity_pubkey == identity))
    }
}
