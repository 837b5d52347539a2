//! Field extractor chains
//!
//! Each product field is described as an ordered list of probes. A probe
//! either yields a value or `None`; the chain stops at the first value.

use anyhow::Result;
use async_trait::async_trait;
use tracing::{error, info};

use super::node::ProductNode;
use super::types::{
    BRAND_SELECTORS, ElementOutcome, IMAGE_ATTRIBUTES, IMAGE_SELECTOR, LINK_ATTRIBUTES,
    LINK_SELECTOR, TITLE_SELECTORS,
};
use crate::product::{ProductRecord, or_sentinel};
use crate::utils::{absolutize_href, absolutize_protocol_relative};

/// One strategy for pulling a field value out of a product element
#[async_trait]
pub trait FieldExtractor: Send + Sync {
    async fn extract(&self, node: &dyn ProductNode) -> Result<Option<String>>;
}

/// Trimmed text of the first descendant matching `selector`
#[derive(Debug, Clone)]
pub struct TextProbe {
    selector: String,
}

impl TextProbe {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
        }
    }
}

#[async_trait]
impl FieldExtractor for TextProbe {
    async fn extract(&self, node: &dyn ProductNode) -> Result<Option<String>> {
        let Some(element) = node.find(&self.selector).await? else {
            return Ok(None);
        };
        Ok(non_empty(element.text().await?))
    }
}

/// First non-empty attribute, in order, of the first descendant matching `selector`
#[derive(Debug, Clone)]
pub struct AttributeProbe {
    selector: String,
    attributes: Vec<String>,
}

impl AttributeProbe {
    pub fn new<I, S>(selector: impl Into<String>, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selector: selector.into(),
            attributes: attributes.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl FieldExtractor for AttributeProbe {
    async fn extract(&self, node: &dyn ProductNode) -> Result<Option<String>> {
        let Some(element) = node.find(&self.selector).await? else {
            return Ok(None);
        };
        for name in &self.attributes {
            if let Some(value) = non_empty(element.attribute(name).await?) {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }
}

/// Ordered fallback list of probes for one field
#[derive(Default)]
pub struct FieldChain {
    probes: Vec<Box<dyn FieldExtractor>>,
}

impl FieldChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn then(mut self, probe: impl FieldExtractor + 'static) -> Self {
        self.probes.push(Box::new(probe));
        self
    }

    /// Text chain over several selectors
    pub fn texts<I, S>(selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        selectors
            .into_iter()
            .fold(Self::new(), |chain, selector| chain.then(TextProbe::new(selector)))
    }

    /// Value of the first probe that finds one.
    pub async fn first_value(&self, node: &dyn ProductNode) -> Result<Option<String>> {
        for probe in &self.probes {
            if let Some(value) = probe.extract(node).await? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.probes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Builds product records from product card elements
pub struct ProductExtractor {
    title: FieldChain,
    brand: FieldChain,
    image: FieldChain,
    link: FieldChain,
}

impl Default for ProductExtractor {
    fn default() -> Self {
        Self {
            title: FieldChain::texts(TITLE_SELECTORS),
            brand: FieldChain::texts(BRAND_SELECTORS),
            image: FieldChain::new().then(AttributeProbe::new(IMAGE_SELECTOR, IMAGE_ATTRIBUTES)),
            link: FieldChain::new().then(AttributeProbe::new(LINK_SELECTOR, LINK_ATTRIBUTES)),
        }
    }
}

impl ProductExtractor {
    /// Extractor with custom chains, e.g. for a site with different markup.
    #[must_use]
    pub fn new(title: FieldChain, brand: FieldChain, image: FieldChain, link: FieldChain) -> Self {
        Self {
            title,
            brand,
            image,
            link,
        }
    }

    /// Probe every field of one element.
    ///
    /// `origin` is the collection page origin used for root-relative links.
    pub async fn extract_record(
        &self,
        node: &dyn ProductNode,
        origin: &str,
    ) -> Result<ProductRecord> {
        let title = self.title.first_value(node).await?;
        let brand = self.brand.first_value(node).await?;
        let image_url = self
            .image
            .first_value(node)
            .await?
            .map(|src| absolutize_protocol_relative(&src));
        let product_url = self
            .link
            .first_value(node)
            .await?
            .map(|href| absolutize_href(&href, origin));

        Ok(ProductRecord {
            title: or_sentinel(title),
            brand: or_sentinel(brand),
            image_url: or_sentinel(image_url),
            product_url: or_sentinel(product_url),
        })
    }

    pub async fn classify(&self, node: &dyn ProductNode, origin: &str) -> ElementOutcome {
        match self.extract_record(node, origin).await {
            Ok(record) if record.is_empty() => ElementOutcome::Empty,
            Ok(record) => ElementOutcome::Kept(record),
            Err(e) => ElementOutcome::Failed(e),
        }
    }

    /// Extract records from every element, skipping empty and failing ones.
    pub async fn extract_products<N: ProductNode>(
        &self,
        nodes: &[N],
        origin: &str,
    ) -> Vec<ProductRecord> {
        let mut records = Vec::with_capacity(nodes.len());

        for (idx, node) in nodes.iter().enumerate() {
            let position = idx + 1;
            info!("Processing product {position}");

            match self.classify(node, origin).await {
                ElementOutcome::Kept(record) => {
                    info!("Added product: {}", record.title);
                    records.push(record);
                }
                ElementOutcome::Empty => {}
                ElementOutcome::Failed(e) => {
                    error!("Error processing product {position}: {e:#}");
                }
            }
        }

        records
    }
}
