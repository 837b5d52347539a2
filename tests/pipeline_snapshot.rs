//! Full run over a saved collection page, no browser involved

use kodegen_tools_shopscrape::config::ScrapeConfig;
use kodegen_tools_shopscrape::pipeline;
use kodegen_tools_shopscrape::product::ProductRecord;
use tempfile::TempDir;

const PAGE: &str = r#"
<html><body>
  <div class="product-card">
    <a href="https://api.shopmy.us/api/redirect_click?url=https%3A%2F%2Fwww.khaite.com%2Fp%2Flotus%3Fcolor%3Dblack%26utm_source%3Dshopmy">
      <img src="//cdn.shopmy.us/1.jpg">
    </a>
    <h3>Lotus Tote</h3>
  </div>
  <div class="product-card">
    <a href="https://api.shopmy.us/api/redirect_click?url=https%3A%2F%2Fwww.khaite.com%2Fp%2Flotus%3Fcolor%3Dblack%26utm_source%3Dother">
      <img src="//cdn.shopmy.us/1.jpg">
    </a>
    <h3>Lotus Tote</h3>
  </div>
  <div class="product-card">
    <a href="/p/2"><img src="https://cdn.shopmy.us/2.jpg"></a>
    <h3>Acme Co | Classic Tote</h3>
  </div>
</body></html>
"#;

#[tokio::test]
async fn snapshot_run_writes_enriched_deduplicated_csv() {
    let dir = TempDir::new().unwrap();
    let snapshot = dir.path().join("collection.html");
    let output = dir.path().join("products.csv");
    std::fs::write(&snapshot, PAGE).unwrap();

    let config = ScrapeConfig::builder()
        .target_url("https://shopmy.us/collections/727615")
        .snapshot_path(Some(snapshot))
        .output_path(&output)
        .build()
        .unwrap();

    let run = pipeline::run(&config).await.unwrap();
    assert!(run.unreachable_links.is_empty());
    let report = run.saved.unwrap();
    assert_eq!(report.written, 2);
    assert_eq!(report.duplicates_removed, 1);

    let rows: Vec<ProductRecord> = csv::Reader::from_path(&output)
        .unwrap()
        .deserialize()
        .map(Result::unwrap)
        .collect();

    assert_eq!(
        rows,
        vec![
            ProductRecord {
                title: "Lotus Tote".into(),
                brand: "Khaite".into(),
                image_url: "https://cdn.shopmy.us/1.jpg".into(),
                product_url: "https://www.khaite.com/p/lotus?color=black".into(),
            },
            ProductRecord {
                title: "Acme Co | Classic Tote".into(),
                brand: "Acme Co".into(),
                image_url: "https://cdn.shopmy.us/2.jpg".into(),
                product_url: "https://shopmy.us/p/2".into(),
            },
        ]
    );
}

#[tokio::test]
async fn snapshot_without_products_fails_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let snapshot = dir.path().join("empty.html");
    let output = dir.path().join("products.csv");
    std::fs::write(&snapshot, "<html><body><p>Nothing here</p></body></html>").unwrap();

    let config = ScrapeConfig::builder()
        .target_url("https://shopmy.us/collections/1")
        .snapshot_path(Some(snapshot))
        .output_path(&output)
        .build()
        .unwrap();

    let err = pipeline::run(&config).await.unwrap_err();
    assert!(format!("{err:#}").contains("Could not find any product elements"));
    assert!(!output.exists());
}

#[tokio::test]
async fn verified_run_reports_dead_links_and_keeps_records() {
    let mut server = mockito::Server::new_async().await;
    server.mock("HEAD", "/p/live").with_status(200).create_async().await;
    server.mock("HEAD", "/p/dead").with_status(404).create_async().await;

    let page = format!(
        r#"<html><body>
          <div class="product-card"><a href="{base}/p/live"><h3>Live</h3></a></div>
          <div class="product-card"><a href="{base}/p/dead"><h3>Dead</h3></a></div>
        </body></html>"#,
        base = server.url()
    );

    let dir = TempDir::new().unwrap();
    let snapshot = dir.path().join("collection.html");
    let output = dir.path().join("products.csv");
    std::fs::write(&snapshot, page).unwrap();

    let config = ScrapeConfig::builder()
        .target_url("https://shopmy.us/collections/1")
        .snapshot_path(Some(snapshot))
        .output_path(&output)
        .verify_links(true)
        .build()
        .unwrap();

    let run = pipeline::run(&config).await.unwrap();
    assert_eq!(run.unreachable_links, vec![format!("{}/p/dead", server.url())]);
    assert_eq!(run.saved.unwrap().written, 2);
}
