//! Error types for harvesting and saving
//!
//! Fatal harvest failures are [`HarvestError`]; persistence failures are
//! [`SaveError`]. Recoverable conditions (one bad product card, an
//! unparseable link, an unreachable URL) never surface as errors.

use thiserror::Error;

/// Result alias for harvest operations
pub type HarvestResult<T> = Result<T, HarvestError>;

/// Fatal failures while harvesting a collection page
#[derive(Debug, Error)]
pub enum HarvestError {
    /// The page never loaded within the retry policy
    #[error("Navigation to {url} failed after {attempts} attempt(s): {message}")]
    Navigation {
        url: String,
        attempts: u32,
        message: String,
    },

    /// None of the product card selectors matched anything
    #[error("Could not find any product elements on the page (tried: {})", tried.join(", "))]
    NoProductElements { tried: Vec<String> },

    /// Browser launch or DevTools protocol failure
    #[error("Browser error: {0}")]
    Browser(String),

    /// Invalid harvest input such as a malformed target URL
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<anyhow::Error> for HarvestError {
    fn from(err: anyhow::Error) -> Self {
        // {:#} keeps the context chain
        Self::Browser(format!("{err:#}"))
    }
}

/// Failures while writing the CSV output
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The serialized buffer could not be recovered from the CSV writer
    #[error("CSV buffer error: {0}")]
    Buffer(String),
}
