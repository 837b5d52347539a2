//! Scroll-to-exhaustion for lazily loaded collections

use anyhow::{Context, Result};
use async_trait::async_trait;
use chromiumoxide::Page;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Something that can report and extend its scrollable height
#[async_trait]
pub trait ScrollSurface: Send + Sync {
    /// Current document scroll height in pixels.
    async fn scroll_height(&self) -> Result<u64>;

    /// Scroll the viewport to the bottom of the document.
    async fn scroll_to_bottom(&self) -> Result<()>;
}

#[async_trait]
impl ScrollSurface for Page {
    async fn scroll_height(&self) -> Result<u64> {
        let height: f64 = self
            .evaluate("document.body.scrollHeight")
            .await
            .context("Failed to read scroll height")?
            .into_value()
            .context("Scroll height was not a number")?;
        // scrollHeight is an integer in practice; negative never happens
        Ok(height.max(0.0) as u64)
    }

    async fn scroll_to_bottom(&self) -> Result<()> {
        self.evaluate("window.scrollTo(0, document.body.scrollHeight)")
            .await
            .context("Failed to scroll")?;
        Ok(())
    }
}

/// Why scrolling stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollStop {
    /// Height did not change after a scroll
    Stabilized,
    /// The configured round limit was reached while content kept growing
    RoundLimit,
    /// A scroll or measurement failed; extraction proceeds with what loaded
    Interrupted(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollSummary {
    pub rounds: usize,
    pub final_height: u64,
    pub stop: ScrollStop,
}

/// Scroll until the document height stops growing.
///
/// Each round scrolls to the bottom, waits `delay` and re-measures. Never
/// fails: errors end the loop and are reported in the summary.
pub async fn scroll_to_exhaustion<S: ScrollSurface + ?Sized>(
    surface: &S,
    delay: Duration,
    max_rounds: usize,
) -> ScrollSummary {
    let mut last_height = match surface.scroll_height().await {
        Ok(height) => height,
        Err(e) => {
            warn!("Could not measure page height, skipping scroll: {e:#}");
            return ScrollSummary {
                rounds: 0,
                final_height: 0,
                stop: ScrollStop::Interrupted(format!("{e:#}")),
            };
        }
    };

    let mut rounds = 0;
    while rounds < max_rounds {
        if let Err(e) = surface.scroll_to_bottom().await {
            warn!("Scrolling interrupted: {e:#}");
            return ScrollSummary {
                rounds,
                final_height: last_height,
                stop: ScrollStop::Interrupted(format!("{e:#}")),
            };
        }
        rounds += 1;
        tokio::time::sleep(delay).await;

        let new_height = match surface.scroll_height().await {
            Ok(height) => height,
            Err(e) => {
                warn!("Scrolling interrupted: {e:#}");
                return ScrollSummary {
                    rounds,
                    final_height: last_height,
                    stop: ScrollStop::Interrupted(format!("{e:#}")),
                };
            }
        };
        debug!("Scroll round {rounds}: height {last_height} -> {new_height}");

        if new_height == last_height {
            info!("Finished scrolling after {rounds} round(s)");
            return ScrollSummary {
                rounds,
                final_height: new_height,
                stop: ScrollStop::Stabilized,
            };
        }
        last_height = new_height;
    }

    warn!("Stopped scrolling after {max_rounds} rounds; page was still growing");
    ScrollSummary {
        rounds,
        final_height: last_height,
        stop: ScrollStop::RoundLimit,
    }
}
