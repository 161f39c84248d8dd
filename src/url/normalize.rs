use crate::url::ParsedUrl;
use std::borrow::Cow;

/// Normalizes a URL according to Pagewalk's normalization rules
///
/// # Normalization Steps
///
/// 1. Empty input is returned unchanged
/// 2. Remove a trailing `.md` extension
/// 3. Prepend `https://` if the input has no `http://` or `https://` scheme
/// 4. Split into scheme, host, path and query (the fragment is dropped)
/// 5. Reassemble as `scheme://host` + path + (`?query` if non-empty)
/// 6. Remove one trailing slash (except for the bare root `scheme://host/`)
/// 7. Remove a `.md` extension still at the end of the path (`page.md?x=1`)
/// 8. Remove one trailing `?`
///
/// Host casing is preserved. Steps 2-8 are repeated until the output stops
/// changing, so `normalize_url(normalize_url(u)) == normalize_url(u)` for
/// every input. Normalization never fails; malformed input comes back in a
/// best-effort form.
///
/// # Examples
///
/// ```
/// use pagewalk::url::normalize_url;
///
/// assert_eq!(normalize_url("example.com/page.md"), "https://example.com/page");
/// assert_eq!(normalize_url("http://example.com/docs/"), "http://example.com/docs");
/// assert_eq!(normalize_url("https://example.com/"), "https://example.com/");
/// ```
pub fn normalize_url(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut current = normalize_pass(raw);
    loop {
        let next = normalize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// One application of the normalization rules
fn normalize_pass(raw: &str) -> String {
    let trimmed = raw.strip_suffix(".md").unwrap_or(raw);

    let with_scheme: Cow<'_, str> = if has_http_scheme(trimmed) {
        Cow::Borrowed(trimmed)
    } else {
        Cow::Owned(format!("https://{}", trimmed))
    };

    let mut parsed = ParsedUrl::parse(&with_scheme);
    parsed.strip_trailing_slash();
    parsed.strip_md_extension();
    parsed.strip_trailing_query_marker();
    parsed.to_url_string()
}

/// Checks for a literal `http://` or `https://` prefix
fn has_http_scheme(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Applies the trailing-slash policy to an already assembled URL
///
/// This is the same rule the normalizer uses (step 6 above). The crawler
/// re-applies it to composed link URLs.
pub fn strip_trailing_slash(url: &str) -> Cow<'_, str> {
    let mut parsed = ParsedUrl::parse(url);
    if parsed.is_root() || !url.ends_with('/') {
        return Cow::Borrowed(url);
    }
    parsed.strip_trailing_slash();
    Cow::Owned(parsed.to_url_string())
}

/// Bookkeeping key for visited/discovered sets
///
/// Hosts are case-insensitive, and a bare `scheme://host` names the same
/// page as `scheme://host/`; both differences are folded away here so the
/// seed is not crawled twice when pages link back to `/`.
pub fn page_key(normalized: &str) -> String {
    let mut parsed = ParsedUrl::parse(normalized);
    parsed.host.make_ascii_lowercase();
    if parsed.path.is_empty() {
        parsed.path.push('/');
    }
    parsed.to_url_string()
}
