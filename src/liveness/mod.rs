//! Product link liveness checks
//!
//! A HEAD request per URL, following redirects. Only a final `200 OK`
//! counts as live; every other status and every transport error is `false`.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use reqwest::redirect::Policy;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::product::{ProductRecord, is_sentinel};
use crate::utils::{CHROME_USER_AGENT, LIVENESS_MAX_REDIRECTS, LIVENESS_TIMEOUT_SECS};

#[derive(Debug, Clone)]
pub struct LivenessChecker {
    client: reqwest::Client,
}

impl LivenessChecker {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(LIVENESS_TIMEOUT_SECS))
            .redirect(Policy::limited(LIVENESS_MAX_REDIRECTS))
            .user_agent(CHROME_USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// True when `url` answers a HEAD request with 200 after redirects.
    pub async fn verify(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(resp) => {
                debug!(url = %url, status = %resp.status(), "liveness check");
                resp.status() == StatusCode::OK
            }
            Err(e) => {
                debug!(url = %url, error = %e, "liveness check failed");
                false
            }
        }
    }

    /// Product URLs that fail [`verify`](Self::verify), in record order.
    ///
    /// Records without a link are skipped. Checks run one at a time.
    pub async fn unreachable_urls(&self, records: &[ProductRecord]) -> Vec<String> {
        let mut unreachable = Vec::new();
        let mut checked = 0usize;

        for record in records {
            if is_sentinel(&record.product_url) {
                continue;
            }
            checked += 1;
            if !self.verify(&record.product_url).await {
                warn!("Product link not reachable: {}", record.product_url);
                unreachable.push(record.product_url.clone());
            }
        }

        info!(
            "Verified {checked} product link(s), {} unreachable",
            unreachable.len()
        );
        unreachable
    }
}
