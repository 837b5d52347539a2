//! Type-safe builder for `ScrapeConfig` using the typestate pattern
//!
//! `build()` only exists once a target URL has been supplied.

use anyhow::{Result, anyhow};
use std::marker::PhantomData;
use std::path::PathBuf;

use super::types::ScrapeConfig;
use crate::utils::{
    DEFAULT_MAX_SCROLL_ROUNDS, DEFAULT_OUTPUT_FILE, ERROR_SCREENSHOT_FILE, is_valid_url,
};

// Type states for the builder
pub struct WithTargetUrl;

pub struct ScrapeConfigBuilder<State = ()> {
    pub(crate) target_url: Option<String>,
    pub(crate) output_path: PathBuf,
    pub(crate) screenshot_path: PathBuf,
    pub(crate) headless: bool,
    pub(crate) chrome_data_dir: Option<PathBuf>,
    pub(crate) max_scroll_rounds: usize,
    pub(crate) verify_links: bool,
    pub(crate) snapshot_path: Option<PathBuf>,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for ScrapeConfigBuilder<()> {
    fn default() -> Self {
        Self {
            target_url: None,
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            screenshot_path: PathBuf::from(ERROR_SCREENSHOT_FILE),
            headless: true,
            chrome_data_dir: None,
            max_scroll_rounds: DEFAULT_MAX_SCROLL_ROUNDS,
            verify_links: false,
            snapshot_path: None,
            _phantom: PhantomData,
        }
    }
}

impl ScrapeConfig {
    /// Create a builder for configuring a `ScrapeConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> ScrapeConfigBuilder<()> {
        ScrapeConfigBuilder::default()
    }
}

impl ScrapeConfigBuilder<()> {
    /// Set the collection page to harvest. A missing scheme becomes `https://`.
    pub fn target_url(self, url: impl Into<String>) -> ScrapeConfigBuilder<WithTargetUrl> {
        let url_string = url.into().trim().to_string();
        let normalized_url =
            if url_string.starts_with("http://") || url_string.starts_with("https://") {
                url_string
            } else {
                format!("https://{url_string}")
            };

        ScrapeConfigBuilder {
            target_url: Some(normalized_url),
            output_path: self.output_path,
            screenshot_path: self.screenshot_path,
            headless: self.headless,
            chrome_data_dir: self.chrome_data_dir,
            max_scroll_rounds: self.max_scroll_rounds,
            verify_links: self.verify_links,
            snapshot_path: self.snapshot_path,
            _phantom: PhantomData,
        }
    }
}

// Optional settings are available in every state
impl<State> ScrapeConfigBuilder<State> {
    #[must_use]
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    #[must_use]
    pub fn screenshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.screenshot_path = path.into();
        self
    }

    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    #[must_use]
    pub fn chrome_data_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.chrome_data_dir = dir;
        self
    }

    #[must_use]
    pub fn max_scroll_rounds(mut self, rounds: usize) -> Self {
        self.max_scroll_rounds = rounds;
        self
    }

    #[must_use]
    pub fn verify_links(mut self, verify: bool) -> Self {
        self.verify_links = verify;
        self
    }

    #[must_use]
    pub fn snapshot_path(mut self, path: Option<PathBuf>) -> Self {
        self.snapshot_path = path;
        self
    }
}

// Build method only available when the target URL is set
impl ScrapeConfigBuilder<WithTargetUrl> {
    pub fn build(self) -> Result<ScrapeConfig> {
        let target_url = self
            .target_url
            .ok_or_else(|| anyhow!("target_url is required"))?;

        if !is_valid_url(&target_url) {
            return Err(anyhow!("Invalid target URL '{target_url}'"));
        }

        if self.max_scroll_rounds == 0 {
            return Err(anyhow!("max_scroll_rounds must be at least 1"));
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(anyhow!("output_path must not be empty"));
        }

        Ok(ScrapeConfig {
            target_url,
            output_path: self.output_path,
            screenshot_path: self.screenshot_path,
            headless: self.headless,
            chrome_data_dir: self.chrome_data_dir,
            max_scroll_rounds: self.max_scroll_rounds,
            verify_links: self.verify_links,
            snapshot_path: self.snapshot_path,
        })
    }
}
