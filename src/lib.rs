pub mod brand;
pub mod browser_setup;
pub mod canonical;
pub mod config;
pub mod content_saver;
pub mod error;
pub mod harvester;
pub mod liveness;
pub mod pipeline;
pub mod product;
pub mod utils;

pub use brand::{BrandInferencer, BrandTable};
pub use browser_setup::{
    BrowserSession, download_managed_browser, find_browser_executable, launch_browser,
};
pub use canonical::{AffiliateWrapper, canonicalize_url, strip_tracking};
pub use config::ScrapeConfig;
pub use content_saver::{SaveReport, dedup_records, save_products_csv};
pub use error::{HarvestError, HarvestResult, SaveError};
pub use harvester::{
    ElementOutcome, FieldChain, FieldExtractor, Harvester, ProductExtractor, ProductNode,
    RetryPolicy, ScrollSurface, SnapshotNode, extract_from_html, scroll_to_exhaustion,
};
pub use liveness::LivenessChecker;
pub use pipeline::{RunReport, enrich_records, run};
pub use product::ProductRecord;
