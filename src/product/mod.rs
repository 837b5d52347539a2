//! The product record harvested from a collection page.

use serde::{Deserialize, Serialize};

use crate::utils::NOT_AVAILABLE;

/// One product card as scraped from the page.
///
/// Every field is either real text or [`NOT_AVAILABLE`]. Field order matches
/// the CSV header written by the content saver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub title: String,
    pub brand: String,
    pub image_url: String,
    pub product_url: String,
}

impl ProductRecord {
    /// A record with every field set to the sentinel.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            title: NOT_AVAILABLE.to_string(),
            brand: NOT_AVAILABLE.to_string(),
            image_url: NOT_AVAILABLE.to_string(),
            product_url: NOT_AVAILABLE.to_string(),
        }
    }

    /// True when no field carries extracted data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [&self.title, &self.brand, &self.image_url, &self.product_url]
            .iter()
            .all(|field| is_sentinel(field))
    }

    /// Identity used for deduplication.
    #[must_use]
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.title, &self.product_url)
    }
}

impl Default for ProductRecord {
    fn default() -> Self {
        Self::empty()
    }
}

/// Whether a field value is the "not available" placeholder.
#[must_use]
pub fn is_sentinel(value: &str) -> bool {
    value == NOT_AVAILABLE
}

/// Wrap an optional extracted value, substituting the sentinel when absent.
#[must_use]
pub fn or_sentinel(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_is_all_sentinel() {
        let record = ProductRecord::empty();
        assert!(record.is_empty());
        assert_eq!(record.dedup_key(), (NOT_AVAILABLE, NOT_AVAILABLE));
    }

    #[test]
    fn one_field_is_enough_to_keep() {
        let record = ProductRecord {
            image_url: "https://cdn.example.com/a.jpg".into(),
            ..ProductRecord::empty()
        };
        assert!(!record.is_empty());
    }

    #[test]
    fn or_sentinel_fills_missing() {
        assert_eq!(or_sentinel(None), NOT_AVAILABLE);
        assert_eq!(or_sentinel(Some("Tote".into())), "Tote");
    }
}
