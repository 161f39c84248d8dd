use crate::UrlError;
use url::Url;

/// The scheme+host pair that bounds which links a crawl follows
///
/// Built from the normalized seed with the `url` crate, so hosts compare in
/// their canonical lower-case form and `https://example.com` and
/// `https://example.com:443` are the same scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeDomain {
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl ScopeDomain {
    /// Builds the scope domain from a (normalized) seed URL
    ///
    /// # Examples
    ///
    /// ```
    /// use pagewalk::url::ScopeDomain;
    /// use url::Url;
    ///
    /// let scope = ScopeDomain::from_seed("https://Example.com").unwrap();
    /// assert!(scope.contains(&Url::parse("https://example.com/about").unwrap()));
    /// assert!(!scope.contains(&Url::parse("https://other.com/").unwrap()));
    /// ```
    pub fn from_seed(seed: &str) -> Result<Self, UrlError> {
        let url = Url::parse(seed).map_err(|e| UrlError::Parse(format!("{}: {}", seed, e)))?;
        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| UrlError::MissingHost(seed.to_string()))?;

        Ok(Self {
            scheme: url.scheme().to_string(),
            host: host.to_ascii_lowercase(),
            port: url.port_or_known_default(),
        })
    }

    /// Returns true if `url` has the same scheme, host and effective port
    pub fn contains(&self, url: &Url) -> bool {
        url.scheme() == self.scheme
            && url
                .host_str()
                .is_some_and(|h| h.eq_ignore_ascii_case(&self.host))
            && url.port_or_known_default() == self.port
    }

    /// The scope's host (lower-case)
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The scope's scheme
    pub fn scheme(&self) -> &str {
        &self.scheme
    }
}

/// Returns true for the schemes the crawler is willing to fetch
pub fn is_web_scheme(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_same_host_in_scope() {
        let scope = ScopeDomain::from_seed("https://example.com").unwrap();
        assert!(scope.contains(&url("https://example.com/")));
        assert!(scope.contains(&url("https://example.com/deep/page?x=1")));
    }

    #[test]
    fn test_other_host_out_of_scope() {
        let scope = ScopeDomain::from_seed("https://example.com").unwrap();
        assert!(!scope.contains(&url("https://other.com/x")));
        assert!(!scope.contains(&url("https://blog.example.com/")));
        assert!(!scope.contains(&url("https://example.com.evil.net/")));
    }

    #[test]
    fn test_scheme_must_match() {
        let scope = ScopeDomain::from_seed("https://example.com").unwrap();
        assert!(!scope.contains(&url("http://example.com/page")));
    }

    #[test]
    fn test_port_must_match() {
        let scope = ScopeDomain::from_seed("http://127.0.0.1:8080/").unwrap();
        assert!(scope.contains(&url("http://127.0.0.1:8080/page")));
        assert!(!scope.contains(&url("http://127.0.0.1:9090/page")));
    }

    #[test]
    fn test_default_port_equivalent() {
        let scope = ScopeDomain::from_seed("https://example.com:443").unwrap();
        assert!(scope.contains(&url("https://example.com/page")));
    }

    #[test]
    fn test_host_case_insensitive() {
        let scope = ScopeDomain::from_seed("https://Example.COM/Page").unwrap();
        assert_eq!(scope.host(), "example.com");
        assert!(scope.contains(&url("https://EXAMPLE.com/other")));
    }

    #[test]
    fn test_unparseable_seed() {
        let result = ScopeDomain::from_seed("https://not a url");
        assert!(matches!(result, Err(UrlError::Parse(_))));
    }

    #[test]
    fn test_web_scheme() {
        assert!(is_web_scheme(&url("http://example.com")));
        assert!(is_web_scheme(&url("https://example.com")));
        assert!(!is_web_scheme(&url("mailto:someone@example.com")));
        assert!(!is_web_scheme(&url("ftp://example.com/file")));
    }
}
