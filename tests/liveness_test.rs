//! Liveness checker against a local mock server

use kodegen_tools_shopscrape::liveness::LivenessChecker;
use kodegen_tools_shopscrape::product::ProductRecord;

#[tokio::test]
async fn ok_is_live() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("HEAD", "/p/1")
        .with_status(200)
        .create_async()
        .await;

    let checker = LivenessChecker::new().unwrap();
    assert!(checker.verify(&format!("{}/p/1", server.url())).await);
    mock.assert_async().await;
}

#[tokio::test]
async fn not_found_and_other_success_codes_are_not_live() {
    let mut server = mockito::Server::new_async().await;
    server.mock("HEAD", "/gone").with_status(404).create_async().await;
    server.mock("HEAD", "/empty").with_status(204).create_async().await;

    let checker = LivenessChecker::new().unwrap();
    assert!(!checker.verify(&format!("{}/gone", server.url())).await);
    assert!(!checker.verify(&format!("{}/empty", server.url())).await);
}

#[tokio::test]
async fn redirects_are_followed() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("HEAD", "/old")
        .with_status(301)
        .with_header("location", &format!("{}/new", server.url()))
        .create_async()
        .await;
    server.mock("HEAD", "/new").with_status(200).create_async().await;

    let checker = LivenessChecker::new().unwrap();
    assert!(checker.verify(&format!("{}/old", server.url())).await);
}

#[tokio::test]
async fn connection_failure_is_not_live() {
    let checker = LivenessChecker::new().unwrap();
    assert!(!checker.verify("http://127.0.0.1:1/p/1").await);
    assert!(!checker.verify("not a url").await);
}

#[tokio::test]
async fn unreachable_urls_skips_missing_links() {
    let mut server = mockito::Server::new_async().await;
    server.mock("HEAD", "/live").with_status(200).create_async().await;
    server.mock("HEAD", "/dead").with_status(410).create_async().await;

    let records = vec![
        ProductRecord {
            product_url: format!("{}/live", server.url()),
            ..ProductRecord::empty()
        },
        ProductRecord {
            title: "No link".into(),
            ..ProductRecord::empty()
        },
        ProductRecord {
            product_url: format!("{}/dead", server.url()),
            ..ProductRecord::empty()
        },
    ];

    let checker = LivenessChecker::new().unwrap();
    let unreachable = checker.unreachable_urls(&records).await;
    assert_eq!(unreachable, vec![format!("{}/dead", server.url())]);
}
