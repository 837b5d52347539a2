//! Selector tables and per-element outcomes for product harvesting

use crate::product::ProductRecord;

/// Product card selector candidates, tried in order until one matches
pub const PRODUCT_SELECTORS: [&str; 3] = ["[class*=\"product\"]", ".product-card", ".product-item"];

/// Title text probes inside a product card
pub const TITLE_SELECTORS: [&str; 3] = ["[class*=\"title\"]", "h3", "h2"];

/// Brand text probes inside a product card
pub const BRAND_SELECTORS: [&str; 2] = ["[class*=\"brand\"]", "[class*=\"vendor\"]"];

/// Image element and the attributes holding its source, eager before lazy
pub const IMAGE_SELECTOR: &str = "img";
pub const IMAGE_ATTRIBUTES: [&str; 2] = ["src", "data-src"];

/// Anchor element carrying the product link
pub const LINK_SELECTOR: &str = "a";
pub const LINK_ATTRIBUTES: [&str; 1] = ["href"];

/// What happened to a single product element during extraction
#[derive(Debug)]
pub enum ElementOutcome {
    /// At least one field was found
    Kept(ProductRecord),
    /// Nothing but sentinels; the element is dropped silently
    Empty,
    /// Probing the element failed; it is skipped and the run continues
    Failed(anyhow::Error),
}
