//! Affiliate link canonicalization
//!
//! Product links on curated collections usually go through an affiliate
//! network's redirect endpoint. [`canonicalize_url`] unwraps the known
//! redirect forms and strips everything but product-identifying query
//! parameters, so the stored link points straight at the retailer.

use std::borrow::Cow;

use tracing::debug;
use url::Url;

/// Query keys that identify a product variant. Compared case-insensitively.
pub const ALLOWED_QUERY_KEYS: [&str; 3] = ["variant", "color", "size"];

/// Nested redirects deeper than this are left as they are.
const MAX_UNWRAP_DEPTH: usize = 4;

/// Affiliate redirect endpoints whose destination can be recovered offline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffiliateWrapper {
    /// `api.shopmy.us/api/redirect_click?url=<target>`
    ShopMy,
    /// `anrdoezrs.net/click-…` with the target appended after a `url=` delimiter
    Anrdoezrs,
    /// `click.linksynergy.com/deeplink?murl=<target>`
    LinkSynergy,
}

impl AffiliateWrapper {
    /// Identify the redirect endpoint a parsed URL belongs to, if any.
    #[must_use]
    pub fn detect(url: &Url) -> Option<Self> {
        let host = url.host_str()?.to_ascii_lowercase();
        let path = url.path();

        if host == "api.shopmy.us" && path.starts_with("/api/redirect_click") {
            Some(Self::ShopMy)
        } else if (host == "anrdoezrs.net" || host.ends_with(".anrdoezrs.net"))
            && path.starts_with("/click")
        {
            Some(Self::Anrdoezrs)
        } else if host == "click.linksynergy.com" && path.starts_with("/deeplink") {
            Some(Self::LinkSynergy)
        } else {
            None
        }
    }

    /// Recover the percent-decoded destination carried by the wrapper.
    ///
    /// `raw` is the URL text as given, `parsed` its parsed form. Returns
    /// `None` when the wrapper does not carry a usable destination.
    #[must_use]
    pub fn unwrap_target(&self, raw: &str, parsed: &Url) -> Option<String> {
        let target = match self {
            Self::ShopMy => first_query_value(parsed, "url"),
            Self::LinkSynergy => first_query_value(parsed, "murl"),
            Self::Anrdoezrs => {
                let (_, tail) = raw.rsplit_once("url=")?;
                urlencoding::decode(tail).ok().map(Cow::into_owned)
            }
        }?;

        let target = target.trim();
        if target.is_empty() {
            None
        } else {
            Some(target.to_string())
        }
    }
}

fn first_query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, v)| k == key && !v.is_empty())
        .map(|(_, v)| v.into_owned())
}

/// Reduce a URL to scheme, host and path plus allow-listed variant parameters.
///
/// Keys keep their original spelling and order. A repeated key keeps its
/// first value and empty values are dropped. The fragment is always removed.
#[must_use]
pub fn strip_tracking(url: &Url) -> Url {
    let mut kept: Vec<(String, String)> = Vec::new();
    for (key, value) in url.query_pairs() {
        if value.is_empty() || !is_allowed_key(&key) {
            continue;
        }
        if kept.iter().any(|(existing, _)| existing.as_str() == key.as_ref()) {
            continue;
        }
        kept.push((key.into_owned(), value.into_owned()));
    }

    let mut clean = url.clone();
    clean.set_fragment(None);
    clean.set_query(None);
    if !kept.is_empty() {
        clean
            .query_pairs_mut()
            .extend_pairs(kept.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }
    clean
}

/// Whether a query key survives [`strip_tracking`].
#[must_use]
pub fn is_allowed_key(key: &str) -> bool {
    ALLOWED_QUERY_KEYS
        .iter()
        .any(|allowed| key.eq_ignore_ascii_case(allowed))
}

/// Turn a possibly affiliate-wrapped product link into a direct, shareable URL.
///
/// Input that cannot be parsed as an absolute URL is returned unchanged.
#[must_use]
pub fn canonicalize_url(url: &str) -> String {
    match try_canonicalize(url) {
        Some(clean) => clean,
        None => url.to_string(),
    }
}

/// Parse an unwrapped destination, decoding it once more when it was
/// percent-encoded twice.
fn parse_target(inner: String) -> Option<(String, Url)> {
    if let Ok(parsed) = Url::parse(&inner) {
        return Some((inner, parsed));
    }
    let decoded = urlencoding::decode(&inner).ok()?.into_owned();
    let parsed = Url::parse(&decoded).ok()?;
    Some((decoded, parsed))
}

fn try_canonicalize(raw: &str) -> Option<String> {
    let mut current = raw.trim().to_string();
    let mut parsed = Url::parse(&current).ok()?;

    for _ in 0..MAX_UNWRAP_DEPTH {
        let Some(wrapper) = AffiliateWrapper::detect(&parsed) else {
            break;
        };
        let Some(inner) = wrapper.unwrap_target(&current, &parsed) else {
            break;
        };
        let (inner, inner_parsed) = parse_target(inner)?;
        debug!("Unwrapped {:?} redirect to {}", wrapper, inner);
        parsed = inner_parsed;
        current = inner;
    }

    Some(strip_tracking(&parsed).to_string())
}
