//! Page-level browser steps: navigation, selector probing, screenshots

use anyhow::{Context, Result};
use chromiumoxide::Page;
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, CaptureScreenshotParams,
};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::timeout::with_page_timeout;
use super::types::PRODUCT_SELECTORS;
use crate::error::{HarvestError, HarvestResult};
use crate::utils::{NAVIGATION_TIMEOUT_SECS, SELECTOR_POLL_INTERVAL, SELECTOR_TIMEOUT_SECS};

const READY_STATE_SCRIPT: &str = r"
    (function() {
        return {
            readyState: document.readyState,
            bodyExists: document.body !== null
        };
    })()
";

/// Navigate `page` to `url` and wait for the document to finish loading.
///
/// The whole step, including the settle poll, is bounded by the navigation
/// timeout.
pub async fn navigate(page: &Page, url: &str) -> Result<()> {
    with_page_timeout(
        async {
            page.goto(url)
                .await
                .with_context(|| format!("Failed to navigate to {url}"))?;
            page.wait_for_navigation()
                .await
                .context("Navigation did not complete")?;
            wait_for_document_ready(page).await
        },
        Duration::from_secs(NAVIGATION_TIMEOUT_SECS),
        "Navigation",
    )
    .await
}

/// Poll until `readyState` is `complete` and the body exists.
///
/// Lazy images below the fold never report `complete`, so images are not awaited.
async fn wait_for_document_ready(page: &Page) -> Result<()> {
    let start = Instant::now();
    loop {
        let state: serde_json::Value = page
            .evaluate(READY_STATE_SCRIPT)
            .await
            .context("Failed to read document state")?
            .into_value()
            .context("Unexpected document state value")?;

        let complete = state.get("readyState").and_then(|v| v.as_str()) == Some("complete");
        let body_exists = state
            .get("bodyExists")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);

        if complete && body_exists {
            debug!("Document ready after {:.2}s", start.elapsed().as_secs_f64());
            return Ok(());
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}

/// Poll for `selector` until it matches something or `timeout` elapses.
pub async fn wait_for_selector(page: &Page, selector: &str, timeout: Duration) -> Result<bool> {
    let start = Instant::now();
    loop {
        let found = page
            .find_elements(selector)
            .await
            .map(|elements| !elements.is_empty())
            .unwrap_or(false);
        if found {
            return Ok(true);
        }
        if start.elapsed() >= timeout {
            return Ok(false);
        }
        tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
    }
}

/// First product selector candidate that matches on the page.
pub async fn probe_product_selector(page: &Page) -> HarvestResult<&'static str> {
    let timeout = Duration::from_secs(SELECTOR_TIMEOUT_SECS);
    for candidate in PRODUCT_SELECTORS {
        info!("Trying selector: {candidate}");
        if wait_for_selector(page, candidate, timeout).await? {
            info!("Found products with selector: {candidate}");
            return Ok(candidate);
        }
        warn!("Selector {candidate} not found within {SELECTOR_TIMEOUT_SECS}s");
    }

    Err(HarvestError::NoProductElements {
        tried: PRODUCT_SELECTORS.iter().map(|s| (*s).to_string()).collect(),
    })
}

/// Write a PNG of the current viewport to `path`.
pub async fn capture_error_screenshot(page: &Page, path: &Path) -> Result<()> {
    let params = CaptureScreenshotParams {
        format: Some(CaptureScreenshotFormat::Png),
        ..Default::default()
    };

    let bytes = page
        .screenshot(params)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to capture screenshot: {e}"))?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("Failed to write screenshot to {}", path.display()))?;

    info!("Error screenshot saved to {}", path.display());
    Ok(())
}
