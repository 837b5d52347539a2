//! End-to-end run: harvest, enrich, optionally verify, save.

use anyhow::{Context, Result};
use tracing::info;

use crate::brand::BrandInferencer;
use crate::canonical::canonicalize_url;
use crate::config::ScrapeConfig;
use crate::content_saver::{SaveReport, save_products_csv};
use crate::harvester::{Harvester, ProductExtractor, extract_from_html};
use crate::liveness::LivenessChecker;
use crate::product::{ProductRecord, is_sentinel};
use crate::utils::site_origin;

/// Canonicalize product links and fill in missing brands.
///
/// A brand scraped from the card always wins over an inferred one.
pub fn enrich_records(records: &mut [ProductRecord], inferencer: &BrandInferencer) {
    for record in records.iter_mut() {
        if !is_sentinel(&record.product_url) {
            record.product_url = canonicalize_url(&record.product_url);
        }
        if is_sentinel(&record.brand) {
            record.brand = inferencer.infer(&record.product_url, &record.title);
        }
    }
}

/// Obtain raw records, from a saved snapshot when one is configured,
/// otherwise from a live browser session.
pub async fn collect_records(config: &ScrapeConfig) -> Result<Vec<ProductRecord>> {
    if let Some(snapshot) = config.snapshot_path() {
        info!("Extracting from snapshot {}", snapshot.display());
        let html = tokio::fs::read_to_string(snapshot)
            .await
            .with_context(|| format!("Failed to read snapshot {}", snapshot.display()))?;
        let origin = site_origin(config.target_url())?;
        let records = extract_from_html(&html, &origin, &ProductExtractor::default()).await?;
        return Ok(records);
    }

    let records = Harvester::new(config).harvest().await?;
    Ok(records)
}

/// What a run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// `None` when nothing was harvested and no file was written
    pub saved: Option<SaveReport>,
    /// Product links that failed the liveness check; empty unless link
    /// verification was enabled
    pub unreachable_links: Vec<String>,
}

/// Run a complete scrape as configured.
pub async fn run(config: &ScrapeConfig) -> Result<RunReport> {
    let mut records = collect_records(config).await?;

    enrich_records(&mut records, &BrandInferencer::default());

    let unreachable_links = if config.verify_links() && !records.is_empty() {
        LivenessChecker::new()?.unreachable_urls(&records).await
    } else {
        Vec::new()
    };

    let saved = save_products_csv(&records, config.output_path())
        .await
        .with_context(|| format!("Failed to save {}", config.output_path().display()))?;

    Ok(RunReport {
        saved,
        unreachable_links,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::NOT_AVAILABLE;

    #[test]
    fn enrich_canonicalizes_and_infers() {
        let mut records = vec![ProductRecord {
            title: "Lotus Tote".into(),
            product_url: "https://api.shopmy.us/api/redirect_click?url=https%3A%2F%2Fwww.khaite.com%2Fp%2F1%3Futm_source%3Dig".into(),
            ..ProductRecord::empty()
        }];
        enrich_records(&mut records, &BrandInferencer::default());
        assert_eq!(records[0].product_url, "https://www.khaite.com/p/1");
        assert_eq!(records[0].brand, "Khaite");
    }

    #[test]
    fn scraped_brand_is_kept() {
        let mut records = vec![ProductRecord {
            title: "Tote".into(),
            brand: "House Label".into(),
            product_url: "https://www.khaite.com/p/1".into(),
            ..ProductRecord::empty()
        }];
        enrich_records(&mut records, &BrandInferencer::default());
        assert_eq!(records[0].brand, "House Label");
    }

    #[test]
    fn missing_link_stays_sentinel() {
        let mut records = vec![ProductRecord {
            title: "Plain shirt".into(),
            ..ProductRecord::empty()
        }];
        enrich_records(&mut records, &BrandInferencer::default());
        assert_eq!(records[0].product_url, NOT_AVAILABLE);
        assert_eq!(records[0].brand, NOT_AVAILABLE);
    }
}
