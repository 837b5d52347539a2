//! URL helpers shared by the harvester and the CLI.

use anyhow::Result;
use url::Url;

/// Check if a URL is an absolute http(s) URL
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    // Skip data URLs, javascript URLs, and other non-http schemes
    if url.starts_with("data:") || url.starts_with("javascript:") || url.starts_with("mailto:") {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Origin (`scheme://host[:port]`) of a page URL, used to absolutize root-relative links.
pub fn site_origin(page_url: &str) -> Result<String> {
    let parsed = Url::parse(page_url).map_err(|e| anyhow::anyhow!("Failed to parse URL: {e}"))?;
    if parsed.host_str().is_none() {
        return Err(anyhow::anyhow!("Invalid URL: no host"));
    }
    Ok(parsed.origin().ascii_serialization())
}

/// Promote a protocol-relative reference (`//cdn.example.com/a.jpg`) to `https:`.
///
/// Anything else is returned unchanged.
#[must_use]
pub fn absolutize_protocol_relative(reference: &str) -> String {
    if reference.starts_with("//") {
        format!("https:{reference}")
    } else {
        reference.to_string()
    }
}

/// Resolve a link target scraped from an anchor.
///
/// Protocol-relative references gain `https:`, root-relative ones are joined
/// to `origin`. Other relative forms are left as scraped.
#[must_use]
pub fn absolutize_href(href: &str, origin: &str) -> String {
    if href.starts_with("//") {
        absolutize_protocol_relative(href)
    } else if href.starts_with('/') {
        format!("{}{href}", origin.trim_end_matches('/'))
    } else {
        href.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_drops_path_and_query() {
        assert_eq!(
            site_origin("https://shopmy.us/collections/727615?tab=all").unwrap(),
            "https://shopmy.us"
        );
        assert_eq!(
            site_origin("http://localhost:8080/x").unwrap(),
            "http://localhost:8080"
        );
        assert!(site_origin("not a url").is_err());
    }

    #[test]
    fn href_forms() {
        let origin = "https://shopmy.us";
        assert_eq!(
            absolutize_href("//cdn.shop.com/p/1", origin),
            "https://cdn.shop.com/p/1"
        );
        assert_eq!(absolutize_href("/p/1", origin), "https://shopmy.us/p/1");
        assert_eq!(
            absolutize_href("https://store.com/a", origin),
            "https://store.com/a"
        );
        assert_eq!(absolutize_href("item/2", origin), "item/2");
    }

    #[test]
    fn rejects_non_http_schemes() {
        assert!(is_valid_url("https://example.com"));
        assert!(!is_valid_url("mailto:a@b.c"));
        assert!(!is_valid_url("ftp://example.com/file"));
        assert!(!is_valid_url(""));
    }
}
