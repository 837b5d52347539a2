//! Core configuration type for a harvest run

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for one collection harvest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Collection page to harvest. Always an absolute http(s) URL.
    pub(crate) target_url: String,

    /// CSV destination, overwritten on each successful run
    pub(crate) output_path: PathBuf,

    /// Where the diagnostic screenshot goes when a harvest fails
    pub(crate) screenshot_path: PathBuf,

    pub(crate) headless: bool,

    /// Chrome profile directory. `None` means a fresh temporary one per run.
    pub(crate) chrome_data_dir: Option<PathBuf>,

    /// Upper bound on scroll rounds before giving up on height stabilization
    ///
    /// Pages that keep injecting content would otherwise scroll forever.
    pub(crate) max_scroll_rounds: usize,

    /// Probe every product URL with a HEAD request after harvesting
    pub(crate) verify_links: bool,

    /// Extract from this saved HTML file instead of launching a browser
    pub(crate) snapshot_path: Option<PathBuf>,
}
