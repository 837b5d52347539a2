//! DOM access seam for product extraction
//!
//! Extraction only needs three capabilities from an element: find a
//! descendant, read its rendered text, read an attribute. [`ProductNode`]
//! captures exactly that so the same field chains run against a live
//! chromiumoxide element or a static HTML snapshot.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chromiumoxide::element::Element;

/// An element that product fields can be probed from
#[async_trait]
pub trait ProductNode: Send + Sync {
    /// First descendant matching a CSS selector, if any.
    async fn find(&self, selector: &str) -> Result<Option<Box<dyn ProductNode>>>;

    /// Rendered text content.
    async fn text(&self) -> Result<Option<String>>;

    /// Attribute value, `None` when the attribute is absent.
    async fn attribute(&self, name: &str) -> Result<Option<String>>;
}

#[async_trait]
impl ProductNode for Element {
    async fn find(&self, selector: &str) -> Result<Option<Box<dyn ProductNode>>> {
        // find_element errors on no match; querySelectorAll returns an empty list instead
        let mut matches = self
            .find_elements(selector)
            .await
            .with_context(|| format!("Failed to query '{selector}'"))?;

        if matches.is_empty() {
            Ok(None)
        } else {
            Ok(Some(Box::new(matches.swap_remove(0))))
        }
    }

    async fn text(&self) -> Result<Option<String>> {
        self.inner_text()
            .await
            .context("Failed to read element text")
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        Element::attribute(self, name)
            .await
            .with_context(|| format!("Failed to read attribute '{name}'"))
    }
}

#[async_trait]
impl<T: ProductNode + ?Sized> ProductNode for Box<T> {
    async fn find(&self, selector: &str) -> Result<Option<Box<dyn ProductNode>>> {
        (**self).find(selector).await
    }

    async fn text(&self) -> Result<Option<String>> {
        (**self).text().await
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        (**self).attribute(name).await
    }
}
