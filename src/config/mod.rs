//! Configuration module for a harvest run
//!
//! This module provides the `ScrapeConfig` struct and its type-safe builder.
//! Only the run-level choices live here; protocol timeouts are constants in
//! [`crate::utils::constants`].

// Sub-modules
pub mod builder;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::{ScrapeConfigBuilder, WithTargetUrl};
pub use types::ScrapeConfig;
