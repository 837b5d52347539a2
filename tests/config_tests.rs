//! Tests for the type-safe configuration builder pattern

use kodegen_tools_shopscrape::config::ScrapeConfig;
use kodegen_tools_shopscrape::utils::{DEFAULT_MAX_SCROLL_ROUNDS, DEFAULT_OUTPUT_FILE};
use std::path::{Path, PathBuf};

#[test]
fn test_builder_requires_target_url() {
    // Does not compile, build() needs a target URL first:
    // let config = ScrapeConfig::builder().build();

    let config = ScrapeConfig::builder()
        .target_url("https://shopmy.us/collections/1")
        .build()
        .unwrap();
    assert_eq!(config.target_url(), "https://shopmy.us/collections/1");
}

#[test]
fn test_builder_defaults() {
    let config = ScrapeConfig::builder()
        .target_url("https://shopmy.us/collections/1")
        .build()
        .unwrap();

    assert_eq!(config.output_path(), Path::new(DEFAULT_OUTPUT_FILE));
    assert_eq!(config.screenshot_path(), Path::new("error_screenshot.png"));
    assert!(config.headless());
    assert_eq!(config.chrome_data_dir(), None);
    assert_eq!(config.max_scroll_rounds(), DEFAULT_MAX_SCROLL_ROUNDS);
    assert!(!config.verify_links());
    assert_eq!(config.snapshot_path(), None);
}

#[test]
fn test_builder_with_all_optional_fields() {
    let config = ScrapeConfig::builder()
        .output_path("out/products.csv")
        .target_url("https://shopmy.us/collections/2")
        .screenshot_path("out/fail.png")
        .headless(false)
        .chrome_data_dir(Some(PathBuf::from("/tmp/profile")))
        .max_scroll_rounds(5)
        .verify_links(true)
        .snapshot_path(Some(PathBuf::from("page.html")))
        .build()
        .unwrap();

    assert_eq!(config.output_path(), Path::new("out/products.csv"));
    assert_eq!(config.screenshot_path(), Path::new("out/fail.png"));
    assert!(!config.headless());
    assert_eq!(
        config.chrome_data_dir(),
        Some(&PathBuf::from("/tmp/profile"))
    );
    assert_eq!(config.max_scroll_rounds(), 5);
    assert!(config.verify_links());
    assert_eq!(config.snapshot_path(), Some(Path::new("page.html")));
}

#[test]
fn test_missing_scheme_defaults_to_https() {
    let config = ScrapeConfig::builder()
        .target_url("  shopmy.us/collections/3 ")
        .build()
        .unwrap();
    assert_eq!(config.target_url(), "https://shopmy.us/collections/3");
}

#[test]
fn test_invalid_values_are_rejected() {
    assert!(
        ScrapeConfig::builder()
            .target_url("https://")
            .build()
            .is_err()
    );
    assert!(
        ScrapeConfig::builder()
            .target_url("https://shopmy.us/collections/1")
            .max_scroll_rounds(0)
            .build()
            .is_err()
    );
    assert!(
        ScrapeConfig::builder()
            .target_url("https://shopmy.us/collections/1")
            .output_path("")
            .build()
            .is_err()
    );
}

#[test]
fn test_config_serializes() {
    let config = ScrapeConfig::builder()
        .target_url("https://shopmy.us/collections/1")
        .build()
        .unwrap();
    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["target_url"], "https://shopmy.us/collections/1");
    assert_eq!(json["headless"], true);
}
