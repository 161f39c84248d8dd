use crate::url::ParsedUrl;

/// Path suffixes that never name an HTML document
const EXCLUDED_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".pdf", ".zip", ".js", ".css"];

/// Checks whether a normalized URL's path ends in a non-document extension
///
/// The match is case-sensitive and looks at the path only, so a query such
/// as `?file=a.pdf` does not exclude the page.
///
/// # Examples
///
/// ```
/// use pagewalk::url::has_excluded_extension;
///
/// assert!(has_excluded_extension("https://example.com/report.pdf"));
/// assert!(!has_excluded_extension("https://example.com/report"));
/// assert!(!has_excluded_extension("https://example.com/report.PDF"));
/// ```
pub fn has_excluded_extension(normalized: &str) -> bool {
    let parsed = ParsedUrl::parse(normalized);
    EXCLUDED_EXTENSIONS
        .iter()
        .any(|ext| parsed.path.ends_with(ext))
}
