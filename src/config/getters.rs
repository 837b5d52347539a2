//! Getter methods for `ScrapeConfig`

use std::path::{Path, PathBuf};

use super::types::ScrapeConfig;

impl ScrapeConfig {
    #[must_use]
    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    #[must_use]
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    #[must_use]
    pub fn screenshot_path(&self) -> &Path {
        &self.screenshot_path
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn chrome_data_dir(&self) -> Option<&PathBuf> {
        self.chrome_data_dir.as_ref()
    }

    #[must_use]
    pub fn max_scroll_rounds(&self) -> usize {
        self.max_scroll_rounds
    }

    #[must_use]
    pub fn verify_links(&self) -> bool {
        self.verify_links
    }

    #[must_use]
    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }
}
