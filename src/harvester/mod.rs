//! Page harvester
//!
//! Drives one headless Chromium session over a collection page: navigate
//! with retry, find the product cards, let lazy content load by scrolling,
//! then run the field chains over every card.

pub mod extract;
pub mod node;
pub mod page;
pub mod retry;
pub mod scroll;
pub mod snapshot;
pub mod timeout;
pub mod types;

pub use extract::{AttributeProbe, FieldChain, FieldExtractor, ProductExtractor, TextProbe};
pub use node::ProductNode;
pub use retry::RetryPolicy;
pub use scroll::{ScrollStop, ScrollSummary, ScrollSurface, scroll_to_exhaustion};
pub use snapshot::{SnapshotNode, extract_from_html};
pub use types::{ElementOutcome, PRODUCT_SELECTORS};

use chromiumoxide::Page;
use page::{capture_error_screenshot, navigate, probe_product_selector};
use tracing::{error, info, warn};

use crate::browser_setup::{BrowserSession, launch_browser};
use crate::config::ScrapeConfig;
use crate::error::{HarvestError, HarvestResult};
use crate::product::ProductRecord;
use crate::utils::{RENDER_SETTLE_DELAY, SCROLL_DELAY, site_origin};

/// Harvests product records from a live collection page
pub struct Harvester<'a> {
    config: &'a ScrapeConfig,
    extractor: ProductExtractor,
    retry: RetryPolicy,
}

impl<'a> Harvester<'a> {
    #[must_use]
    pub fn new(config: &'a ScrapeConfig) -> Self {
        Self {
            config,
            extractor: ProductExtractor::default(),
            retry: RetryPolicy::navigation(),
        }
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn with_extractor(mut self, extractor: ProductExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Launch a browser, harvest the configured page, and close the browser.
    ///
    /// The browser is shut down on success and on failure alike.
    pub async fn harvest(&self) -> HarvestResult<Vec<ProductRecord>> {
        let origin = site_origin(self.config.target_url())
            .map_err(|e| HarvestError::Config(format!("{e:#}")))?;

        let session = launch_browser(
            self.config.headless(),
            self.config.chrome_data_dir().cloned(),
        )
        .await?;

        let result = self.harvest_with(&session, &origin).await;
        session.shutdown().await;
        result
    }

    async fn harvest_with(
        &self,
        session: &BrowserSession,
        origin: &str,
    ) -> HarvestResult<Vec<ProductRecord>> {
        let page = session.new_page("about:blank").await?;

        let result = self.harvest_page(&page, origin).await;
        if let Err(e) = &result {
            error!("Error during scraping: {e}");
            let path = self.config.screenshot_path();
            if let Err(shot_err) = capture_error_screenshot(&page, path).await {
                warn!("Could not save error screenshot: {shot_err:#}");
            }
        }
        result
    }

    async fn harvest_page(&self, page: &Page, origin: &str) -> HarvestResult<Vec<ProductRecord>> {
        let url = self.config.target_url();
        info!("Navigating to {url}");

        self.retry
            .run("Navigation", || navigate(page, url))
            .await
            .map_err(|e| HarvestError::Navigation {
                url: url.to_string(),
                attempts: self.retry.max_attempts.max(1),
                message: format!("{e:#}"),
            })?;

        let selector = probe_product_selector(page).await?;

        info!("Waiting for dynamic content to load...");
        tokio::time::sleep(RENDER_SETTLE_DELAY).await;

        info!("Scrolling to load all products...");
        let summary =
            scroll_to_exhaustion(page, SCROLL_DELAY, self.config.max_scroll_rounds()).await;
        info!(
            "Scrolling finished after {} round(s) ({:?})",
            summary.rounds, summary.stop
        );

        let elements = page
            .find_elements(selector)
            .await
            .map_err(|e| HarvestError::Browser(format!("Failed to query '{selector}': {e}")))?;
        info!("Found {} product elements", elements.len());

        let records = self.extractor.extract_products(&elements, origin).await;
        info!("Extracted {} products", records.len());
        Ok(records)
    }
}
