//! Persistence of harvested products
//!
//! Records are deduplicated by `(title, product_url)` and written as a flat
//! CSV file with a fixed header.

mod csv_saver;

pub use csv_saver::{SaveReport, dedup_records, save_products_csv, to_csv_bytes};
