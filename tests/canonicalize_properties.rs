//! Property tests for affiliate link canonicalization

use kodegen_tools_shopscrape::canonical::{canonicalize_url, is_allowed_key};
use proptest::prelude::*;
use url::Url;

fn query_keys(url: &str) -> Vec<String> {
    Url::parse(url)
        .unwrap()
        .query_pairs()
        .map(|(k, _)| k.into_owned())
        .collect()
}

fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("variant".to_string()),
        Just("Color".to_string()),
        Just("size".to_string()),
        Just("utm_source".to_string()),
        Just("utm_campaign".to_string()),
        Just("ref".to_string()),
        Just("fbclid".to_string()),
        "[a-z]{1,8}",
    ]
}

fn product_url_strategy() -> impl Strategy<Value = String> {
    (
        "[a-z]{3,10}",
        "[a-z0-9-]{1,12}",
        prop::collection::vec((key_strategy(), "[a-zA-Z0-9]{1,6}"), 0..6),
    )
        .prop_map(|(host, slug, pairs)| {
            let mut url = Url::parse(&format!("https://www.{host}.com/products/{slug}")).unwrap();
            if !pairs.is_empty() {
                url.query_pairs_mut().extend_pairs(pairs);
            }
            url.to_string()
        })
}

proptest! {
    #[test]
    fn canonicalization_is_idempotent(url in product_url_strategy()) {
        let once = canonicalize_url(&url);
        prop_assert_eq!(canonicalize_url(&once), once);
    }

    #[test]
    fn only_allowed_keys_survive_in_order(url in product_url_strategy()) {
        let clean = canonicalize_url(&url);
        let kept = query_keys(&clean);
        prop_assert!(kept.iter().all(|k| is_allowed_key(k)));

        let mut expected: Vec<String> = Vec::new();
        for key in query_keys(&url) {
            if is_allowed_key(&key) && !expected.contains(&key) {
                expected.push(key);
            }
        }
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn shopmy_wrapper_yields_inner_target(url in product_url_strategy()) {
        let mut wrapper = Url::parse("https://api.shopmy.us/api/redirect_click").unwrap();
        wrapper.query_pairs_mut().append_pair("url", &url);
        prop_assert_eq!(canonicalize_url(wrapper.as_str()), canonicalize_url(&url));
    }
}

#[test]
fn shopmy_redirect_example() {
    assert_eq!(
        canonicalize_url(
            "https://api.shopmy.us/api/redirect_click?url=https%3A%2F%2Fstore.example.com%2Fitem%3Fvariant%3Dred%26utm_source%3Dig"
        ),
        "https://store.example.com/item?variant=red"
    );
}

#[test]
fn unparseable_input_is_returned_unchanged() {
    assert_eq!(canonicalize_url("not a url"), "not a url");
    assert_eq!(canonicalize_url("/relative/path"), "/relative/path");
}
