//! Extraction from saved HTML
//!
//! A static page (saved from a browser, or a test fixture) goes through the
//! same selector probe and field chains as a live page, backed by `scraper`.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use tracing::info;

use super::extract::ProductExtractor;
use super::node::ProductNode;
use super::types::PRODUCT_SELECTORS;
use crate::error::{HarvestError, HarvestResult};
use crate::product::ProductRecord;

/// One element of a parsed snapshot, held as its outer HTML
///
/// `scraper::Html` is not `Send`, so nodes keep markup and re-parse on access.
#[derive(Debug, Clone)]
pub struct SnapshotNode {
    html: String,
}

impl SnapshotNode {
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    fn from_element(element: ElementRef<'_>) -> Self {
        Self::new(element.html())
    }

    fn with_element<T>(&self, f: impl FnOnce(ElementRef<'_>) -> Result<T>) -> Result<T> {
        let fragment = Html::parse_fragment(&self.html);
        let element = fragment
            .root_element()
            .children()
            .find_map(ElementRef::wrap)
            .ok_or_else(|| anyhow!("Snapshot node holds no element"))?;
        f(element)
    }

    fn find_sync(&self, selector: &str) -> Result<Option<SnapshotNode>> {
        let selector = parse_selector(selector)?;
        self.with_element(|element| Ok(element.select(&selector).next().map(Self::from_element)))
    }

    fn text_sync(&self) -> Result<Option<String>> {
        self.with_element(|element| {
            let text = element
                .text()
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ");
            Ok(Some(text))
        })
    }

    fn attribute_sync(&self, name: &str) -> Result<Option<String>> {
        self.with_element(|element| Ok(element.value().attr(name).map(str::to_string)))
    }
}

#[async_trait]
impl ProductNode for SnapshotNode {
    async fn find(&self, selector: &str) -> Result<Option<Box<dyn ProductNode>>> {
        Ok(self
            .find_sync(selector)?
            .map(|node| Box::new(node) as Box<dyn ProductNode>))
    }

    async fn text(&self) -> Result<Option<String>> {
        self.text_sync()
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.attribute_sync(name)
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| anyhow!("Invalid selector '{selector}': {e:?}"))
}

/// First product selector with matches, and the matching elements.
pub fn product_nodes(html: &str) -> HarvestResult<(&'static str, Vec<SnapshotNode>)> {
    let document = Html::parse_document(html);

    for candidate in PRODUCT_SELECTORS {
        let selector = parse_selector(candidate)?;
        let nodes: Vec<SnapshotNode> = document
            .select(&selector)
            .map(SnapshotNode::from_element)
            .collect();
        if !nodes.is_empty() {
            info!("Found {} products with selector: {candidate}", nodes.len());
            return Ok((candidate, nodes));
        }
    }

    Err(HarvestError::NoProductElements {
        tried: PRODUCT_SELECTORS.iter().map(|s| (*s).to_string()).collect(),
    })
}

/// Extract product records from a saved collection page.
///
/// `origin` resolves root-relative product links.
pub async fn extract_from_html(
    html: &str,
    origin: &str,
    extractor: &ProductExtractor,
) -> HarvestResult<Vec<ProductRecord>> {
    let (_, nodes) = product_nodes(html)?;
    Ok(extractor.extract_products(&nodes, origin).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn node_reads_descendants_not_itself() {
        let node = SnapshotNode::new(r#"<div class="title"><span class="title">Inner</span></div>"#);
        let found = node.find(".title").await.unwrap().unwrap();
        assert_eq!(found.text().await.unwrap().as_deref(), Some("Inner"));
    }

    #[tokio::test]
    async fn text_collapses_whitespace() {
        let node = SnapshotNode::new("<h3>\n  Linen   <b>Shirt</b>\n</h3>");
        assert_eq!(node.text().await.unwrap().as_deref(), Some("Linen Shirt"));
    }

    #[tokio::test]
    async fn missing_attribute_is_none() {
        let node = SnapshotNode::new(r#"<img data-src="/a.jpg">"#);
        assert_eq!(node.attribute("src").await.unwrap(), None);
        assert_eq!(
            node.attribute("data-src").await.unwrap().as_deref(),
            Some("/a.jpg")
        );
    }

    #[test]
    fn no_selector_matches() {
        let err = product_nodes("<html><body><p>empty</p></body></html>").unwrap_err();
        assert!(matches!(err, HarvestError::NoProductElements { ref tried } if tried.len() == 3));
    }
}
