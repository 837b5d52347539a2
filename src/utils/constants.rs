//! Shared constants for shopscrape
//!
//! Timeouts and delays here are fixed by design of the harvest protocol and
//! are not exposed through `ScrapeConfig`.

use std::time::Duration;

/// Placeholder stored in any product field that could not be extracted.
pub const NOT_AVAILABLE: &str = "N/A";

/// Collection harvested when no `--url` is given.
pub const DEFAULT_COLLECTION_URL: &str = "https://shopmy.us/collections/727615";

/// Default CSV destination.
pub const DEFAULT_OUTPUT_FILE: &str = "shopmy_products.csv";

/// Diagnostic screenshot written when a harvest fails.
pub const ERROR_SCREENSHOT_FILE: &str = "error_screenshot.png";

/// Upper bound on page navigation, per attempt.
pub const NAVIGATION_TIMEOUT_SECS: u64 = 90;

/// Upper bound on waiting for one product selector candidate.
pub const SELECTOR_TIMEOUT_SECS: u64 = 30;

/// Poll interval while waiting for a selector to appear.
pub const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Pause after a selector matches, letting client-side rendering finish.
pub const RENDER_SETTLE_DELAY: Duration = Duration::from_secs(2);

/// Pause after each scroll before measuring the page height again.
pub const SCROLL_DELAY: Duration = Duration::from_secs(2);

/// Default cap on scroll rounds. Height stabilization normally ends the loop first.
pub const DEFAULT_MAX_SCROLL_ROUNDS: usize = 200;

/// Timeout for a liveness HEAD request.
pub const LIVENESS_TIMEOUT_SECS: u64 = 5;

/// Redirect hops followed by the liveness checker.
pub const LIVENESS_MAX_REDIRECTS: usize = 10;

/// Navigation attempts before the harvest gives up.
pub const NAVIGATION_MAX_ATTEMPTS: u32 = 3;

/// First backoff delay between navigation attempts; doubles each time.
pub const NAVIGATION_BASE_DELAY: Duration = Duration::from_secs(1);

/// Records shown in the post-save log preview.
pub const PREVIEW_ROWS: usize = 5;

/// Chrome user agent string presented by the headless browser
///
/// Updated: 2025-01-29 to Chrome 132
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
