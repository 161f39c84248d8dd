use std::fmt;

/// A URL decomposed into the fields the normalizer works on
///
/// Parsing is purely lexical and never fails. Host casing and percent
/// encoding are kept exactly as written, which is what separates this type
/// from [`url::Url`]: the crawler needs a stable string form that does not
/// rewrite what the site published. The fragment is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedUrl {
    /// Scheme without the `://` separator (empty if the input had none)
    pub scheme: String,

    /// Authority, including any port (e.g. `example.com:8080`)
    pub host: String,

    /// Path, starting with `/` when present
    pub path: String,

    /// Query without the leading `?`
    pub query: String,
}

impl ParsedUrl {
    /// Splits a URL string into scheme, host, path and query
    ///
    /// # Examples
    ///
    /// ```
    /// use pagewalk::url::ParsedUrl;
    ///
    /// let parsed = ParsedUrl::parse("https://Example.com:8080/docs/?page=2#top");
    /// assert_eq!(parsed.scheme, "https");
    /// assert_eq!(parsed.host, "Example.com:8080");
    /// assert_eq!(parsed.path, "/docs/");
    /// assert_eq!(parsed.query, "page=2");
    /// ```
    pub fn parse(input: &str) -> Self {
        let (scheme, rest) = match input.split_once("://") {
            Some((scheme, rest)) => (scheme, rest),
            None => ("", input),
        };

        let rest = match rest.find('#') {
            Some(idx) => &rest[..idx],
            None => rest,
        };

        let authority_end = rest.find(['/', '?']).unwrap_or(rest.len());
        let (host, remainder) = rest.split_at(authority_end);

        let (path, query) = match remainder.split_once('?') {
            Some((path, query)) => (path, query),
            None => (remainder, ""),
        };

        Self {
            scheme: scheme.to_string(),
            host: host.to_string(),
            path: path.to_string(),
            query: query.to_string(),
        }
    }

    /// Returns `scheme://host`
    pub fn origin(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }

    /// True when the URL points at the site root (`scheme://host/`)
    pub fn is_root(&self) -> bool {
        self.path == "/" && self.query.is_empty()
    }

    /// Removes one trailing `/` from path+query unless the URL is the bare root
    ///
    /// When a query is present the slash can only sit at the end of the query.
    pub fn strip_trailing_slash(&mut self) {
        if !self.query.is_empty() {
            if self.query.ends_with('/') {
                self.query.pop();
            }
        } else if !self.is_root() && self.path.ends_with('/') {
            self.path.pop();
        }
    }

    /// Removes a `.md` extension from the end of the path, leaving the query alone
    pub fn strip_md_extension(&mut self) {
        if self.path.ends_with(".md") {
            let len = self.path.len() - ".md".len();
            self.path.truncate(len);
        }
    }

    /// Removes one trailing `?` left over at the end of the query
    pub fn strip_trailing_query_marker(&mut self) {
        if self.query.ends_with('?') {
            self.query.pop();
        }
    }

    /// Reassembles `scheme://host` + path + (`?query` if the query is non-empty)
    pub fn to_url_string(&self) -> String {
        let mut out = self.origin();
        out.push_str(&self.path);
        if !self.query.is_empty() {
            out.push('?');
            out.push_str(&self.query);
        }
        out
    }
}

impl fmt::Display for ParsedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url_string())
    }
}
