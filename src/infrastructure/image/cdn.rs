//! Recognized third-party CDN hosts and proxy URL rewriting.

use reqwest::Url;

/// Google image CDN hosts served through the proxy by default.
pub const DEFAULT_ALLOWED_HOSTS: &[&str] = &[
    "play-lh.googleusercontent.com",
    "lh3.googleusercontent.com",
    "lh4.googleusercontent.com",
    "lh5.googleusercontent.com",
    "lh6.googleusercontent.com",
];

/// Set of hosts whose images go through the local proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdnAllowList {
    hosts: Vec<String>,
}

impl CdnAllowList {
    /// Creates an allow-list from host names. Matching is exact and
    /// case-insensitive.
    #[must_use]
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            hosts: hosts
                .into_iter()
                .map(|h| h.as_ref().trim().to_ascii_lowercase())
                .filter(|h| !h.is_empty())
                .collect(),
        }
    }

    /// Returns the configured hosts.
    #[must_use]
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// Checks if `url` is an http(s) URL on an allowed host.
    #[must_use]
    pub fn is_allowed(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        if !matches!(parsed.scheme(), "http" | "https") {
            return false;
        }
        parsed
            .host_str()
            .is_some_and(|host| self.hosts.iter().any(|h| h == host))
    }
}

impl Default for CdnAllowList {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_HOSTS)
    }
}

/// Builds the proxy request URL for `url`, passing it as the `url` query
/// parameter of `endpoint`.
#[must_use]
pub fn proxy_url(endpoint: &Url, url: &str) -> Url {
    let mut proxied = endpoint.clone();
    proxied.query_pairs_mut().append_pair("url", url);
    proxied
}
