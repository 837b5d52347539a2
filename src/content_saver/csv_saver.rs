use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::SaveError;
use crate::product::ProductRecord;
use crate::utils::PREVIEW_ROWS;

/// Outcome of a successful save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub path: PathBuf,
    pub written: usize,
    pub duplicates_removed: usize,
}

/// Drop records whose `(title, product_url)` was already seen.
///
/// First occurrences keep their relative order. Returns the survivors and
/// the number removed.
#[must_use]
pub fn dedup_records(records: &[ProductRecord]) -> (Vec<ProductRecord>, usize) {
    let mut seen: HashSet<(&str, &str)> = HashSet::with_capacity(records.len());
    let mut unique = Vec::with_capacity(records.len());
    for record in records {
        if seen.insert(record.dedup_key()) {
            unique.push(record.clone());
        }
    }
    let removed = records.len() - unique.len();
    (unique, removed)
}

/// Serialize records as CSV with the `title,brand,image_url,product_url` header.
pub fn to_csv_bytes(records: &[ProductRecord]) -> Result<Vec<u8>, SaveError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| SaveError::Buffer(e.to_string()))
}

/// Deduplicate `records` and write them to `path`, replacing any existing file.
///
/// Returns `Ok(None)` without touching the filesystem when there is nothing
/// to save.
pub async fn save_products_csv(
    records: &[ProductRecord],
    path: &Path,
) -> Result<Option<SaveReport>, SaveError> {
    if records.is_empty() {
        warn!("No products to save");
        return Ok(None);
    }

    let (unique, duplicates_removed) = dedup_records(records);
    info!("Removed {duplicates_removed} duplicate products");

    let bytes = to_csv_bytes(&unique)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await?;

    info!(
        "Saved {} unique products to {}",
        unique.len(),
        path.display()
    );
    log_preview(&unique);

    Ok(Some(SaveReport {
        path: path.to_path_buf(),
        written: unique.len(),
        duplicates_removed,
    }))
}

fn log_preview(records: &[ProductRecord]) {
    info!("First {} products:", records.len().min(PREVIEW_ROWS));
    for record in records.iter().take(PREVIEW_ROWS) {
        info!(
            title = %record.title,
            brand = %record.brand,
            image_url = %record.image_url,
            product_url = %record.product_url,
            "preview"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, url: &str) -> ProductRecord {
        ProductRecord {
            title: title.into(),
            product_url: url.into(),
            ..ProductRecord::empty()
        }
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let records = vec![record("A", "u1"), record("A", "u1"), record("B", "u2")];
        let (unique, removed) = dedup_records(&records);
        assert_eq!(removed, 1);
        assert_eq!(unique, vec![record("A", "u1"), record("B", "u2")]);
    }

    #[test]
    fn same_title_different_url_is_distinct() {
        let records = vec![record("A", "u1"), record("A", "u2")];
        assert_eq!(dedup_records(&records).1, 0);
    }

    #[test]
    fn csv_header_and_quoting() {
        let bytes = to_csv_bytes(&[ProductRecord {
            title: "Tote, large".into(),
            brand: "Khaite".into(),
            image_url: "https://cdn.example.com/a.jpg".into(),
            product_url: "https://www.khaite.com/p/1".into(),
        }])
        .unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "title,brand,image_url,product_url\n\"Tote, large\",Khaite,https://cdn.example.com/a.jpg,https://www.khaite.com/p/1\n"
        );
    }
}
