//! Brand inference from product links and titles
//!
//! Many product cards carry no brand element of their own. The retailer
//! domain or URL slug usually names the brand, and curated titles often
//! follow a `Brand | Product` convention. [`BrandInferencer`] combines both.

use url::Url;

use crate::product::is_sentinel;
use crate::utils::NOT_AVAILABLE;

/// Slug → display name pairs known to appear in retailer URLs.
const KNOWN_BRANDS: &[(&str, &str)] = &[
    ("stella-mccartney", "Stella McCartney"),
    ("lcuppini", "L.Cuppini"),
    ("nanushka", "Nanushka"),
    ("havaianas", "Havaianas"),
    ("gap", "Gap"),
    ("jennikayne", "Jenni Kayne"),
    ("aritzia", "Aritzia"),
    ("jimmy-choo", "Jimmy Choo"),
    ("hunting-season", "Hunting Season"),
    ("cesta", "Cesta Collective"),
    ("eliou", "Éliou"),
    ("reformation", "Reformation"),
    ("nour-hammour", "Nour Hammour"),
    ("khaite", "Khaite"),
    ("staud", "Staud"),
    ("sezane", "Sezane"),
    ("veronica-beard", "Veronica Beard"),
    ("tory-burch", "Tory Burch"),
    ("shonajoy", "Shona Joy"),
    ("anine-bing", "Anine Bing"),
    ("saint-laurent", "Saint Laurent"),
    ("loro-piana", "Loro Piana"),
    ("ralph-lauren", "Ralph Lauren"),
    ("leset", "Le Set"),
    ("co-collections", "CO"),
];

/// Ordered slug → display name lookup
///
/// Order matters: the first slug contained in a haystack wins, so more
/// specific slugs should precede shorter ones they contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandTable {
    entries: Vec<(String, String)>,
}

impl BrandTable {
    /// Build a table from `(slug, display name)` pairs. Slugs are lowercased.
    pub fn new<I, S, D>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, D)>,
        S: Into<String>,
        D: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(slug, name)| (slug.into().to_lowercase(), name.into()))
            .collect();
        Self { entries }
    }

    /// Display name of the first slug found inside `haystack` (already lowercased).
    #[must_use]
    pub fn lookup_in(&self, haystack: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(slug, _)| haystack.contains(slug.as_str()))
            .map(|(_, name)| name.as_str())
    }

    /// Display name that appears, case-insensitively, inside `text`.
    #[must_use]
    pub fn name_in_text(&self, text: &str) -> Option<&str> {
        let lowered = text.to_lowercase();
        self.entries
            .iter()
            .find(|(_, name)| lowered.contains(&name.to_lowercase()))
            .map(|(_, name)| name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for BrandTable {
    fn default() -> Self {
        Self::new(KNOWN_BRANDS.iter().copied())
    }
}

/// Resolves a brand name for a product from its link and title.
#[derive(Debug, Clone, Default)]
pub struct BrandInferencer {
    table: BrandTable,
}

impl BrandInferencer {
    #[must_use]
    pub fn new(table: BrandTable) -> Self {
        Self { table }
    }

    #[must_use]
    pub fn table(&self) -> &BrandTable {
        &self.table
    }

    /// Infer a brand, or [`NOT_AVAILABLE`] when nothing matches.
    ///
    /// Resolution order: slug in the URL host, slug in the URL path, text
    /// before the first `|` of the title, then any known display name
    /// mentioned in the title.
    #[must_use]
    pub fn infer(&self, url: &str, title: &str) -> String {
        if let Ok(parsed) = Url::parse(url) {
            let host = parsed.host_str().unwrap_or_default().to_lowercase();
            if let Some(name) = self.table.lookup_in(&host) {
                return name.to_string();
            }

            let path = parsed.path().to_lowercase();
            if let Some(name) = self.table.lookup_in(&path) {
                return name.to_string();
            }
        }

        let title = title.trim();
        if title.is_empty() || is_sentinel(title) {
            return NOT_AVAILABLE.to_string();
        }

        if let Some((prefix, _)) = title.split_once('|') {
            let prefix = prefix.trim();
            if !prefix.is_empty() {
                return prefix.to_string();
            }
        }

        self.table
            .name_in_text(title)
            .map_or_else(|| NOT_AVAILABLE.to_string(), str::to_string)
    }
}
