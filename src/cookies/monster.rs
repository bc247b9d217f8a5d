use crate::base::neterror::NetError;
use crate::cookies::canonical_cookie::CanonicalCookie;
use crate::cookies::psl::resolve_cookie_domain;
use dashmap::DashMap;
use std::sync::Arc;
use time::OffsetDateTime;
use url::Url;

/// Maximum cookies per domain (Chromium default).
const MAX_COOKIES_PER_DOMAIN: usize = 50;

/// In-memory cookie jar with browser semantics.
/// Modeled after Chromium's `net::CookieMonster`.
///
/// This is what sits behind `document.cookie` in a browser: it accepts one
/// assignment line at a time and hands back the `name=value` pairs a page at
/// a given URL is allowed to see.
#[derive(Clone)]
pub struct CookieMonster {
    // Store: Map<Domain, List<Cookie>>
    store: Arc<DashMap<String, Vec<CanonicalCookie>>>,
}

impl Default for CookieMonster {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieMonster {
    pub fn new() -> Self {
        Self {
            store: Arc::new(DashMap::new()),
        }
    }

    /// Insert or overwrite a cookie. Expired cookies delete their match.
    ///
    /// A cookie is identified by name, domain, path and host-only flag, so a
    /// host-only `a` and a `domain=` `a` for the same host are two cookies.
    /// An overwrite keeps the creation time of the cookie it replaces, so the
    /// cookie keeps its position in the document's cookie string.
    pub fn set_canonical_cookie(&self, mut cookie: CanonicalCookie) {
        let now = OffsetDateTime::now_utc();
        let mut entry = self.store.entry(cookie.domain.clone()).or_default();

        let existing = entry
            .iter()
            .position(|c| {
                c.name == cookie.name && c.path == cookie.path && c.host_only == cookie.host_only
            });

        if cookie.is_expired(now) {
            if let Some(idx) = existing {
                entry.remove(idx);
                tracing::debug!(cookie = %cookie.name, domain = %cookie.domain, "cookie deleted");
            }
            return;
        }

        if let Some(idx) = existing {
            cookie.creation_time = entry[idx].creation_time;
            entry[idx] = cookie;
            return;
        }

        // Enforce per-domain limit with LRU eviction
        while entry.len() >= MAX_COOKIES_PER_DOMAIN {
            if let Some(oldest_idx) = entry
                .iter()
                .enumerate()
                .min_by_key(|(_, c)| c.creation_time)
                .map(|(i, _)| i)
            {
                let evicted = entry.remove(oldest_idx);
                tracing::debug!(cookie = %evicted.name, domain = %evicted.domain, "cookie evicted");
            } else {
                break;
            }
        }

        entry.push(cookie);
    }

    /// Parse one `document.cookie` assignment made by a page at `url` and
    /// store it.
    ///
    /// The value is stored verbatim; decoding is the page's business.
    pub fn set_cookie_line(&self, url: &Url, cookie_line: &str) -> Result<(), NetError> {
        use cookie::Cookie;

        let parsed = Cookie::parse(cookie_line).map_err(|e| {
            tracing::debug!(error = %e, "failed to parse cookie line");
            NetError::InvalidCookieLine
        })?;

        if parsed.name().trim().is_empty() {
            return Err(NetError::InvalidCookieName);
        }

        let host = url.host_str().unwrap_or("");
        let (domain, host_only) = resolve_cookie_domain(parsed.domain(), host)?;

        let secure_origin = url.scheme() == "https";
        let secure = parsed.secure().unwrap_or(false);
        if secure && !secure_origin {
            return Err(NetError::CookieSecureFromInsecureOrigin);
        }

        let path = match parsed.path() {
            Some(p) if p.starts_with('/') => p.to_string(),
            _ => Self::default_path(url),
        };

        let now = OffsetDateTime::now_utc();
        let expiration_time = match parsed.max_age() {
            Some(age) => Some(now + age),
            None => parsed.expires().and_then(|e| e.datetime()),
        };

        let mut c = CanonicalCookie::new(
            parsed.name().to_string(),
            parsed.value().to_string(),
            domain,
            path,
            now,
            expiration_time,
        );
        c.secure = secure;
        c.host_only = host_only;
        c.validate_prefix(secure_origin)?;

        self.set_canonical_cookie(c);
        Ok(())
    }

    /// Get cookies matching the URL with proper domain suffix matching.
    pub fn get_cookies_for_url(&self, url: &Url) -> Vec<CanonicalCookie> {
        let mut result = Vec::new();
        let host = url.host_str().unwrap_or("");
        let now = OffsetDateTime::now_utc();

        for domain in Self::get_matching_domains(host) {
            if let Some(entry) = self.store.get(&domain) {
                for cookie in entry.iter() {
                    if !Self::domain_matches(&cookie.domain, host, cookie.host_only) {
                        continue;
                    }
                    if !Self::path_matches(&cookie.path, url.path()) {
                        continue;
                    }
                    if cookie.secure && url.scheme() != "https" {
                        continue;
                    }
                    if cookie.is_expired(now) {
                        continue;
                    }
                    result.push(cookie.clone());
                }
            }
        }

        // Sort by path length (longest first) then creation time
        result.sort_by(|a, b| {
            b.path
                .len()
                .cmp(&a.path.len())
                .then_with(|| a.creation_time.cmp(&b.creation_time))
        });

        result
    }

    /// The `document.cookie` string a page at `url` reads.
    pub fn cookie_string_for_url(&self, url: &Url) -> String {
        self.get_cookies_for_url(url)
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Check if cookie domain matches request host.
    /// Implements RFC 6265 domain matching.
    fn domain_matches(cookie_domain: &str, request_host: &str, host_only: bool) -> bool {
        if host_only {
            return cookie_domain.eq_ignore_ascii_case(request_host);
        }

        let cookie_domain = cookie_domain.trim_start_matches('.');
        if request_host.eq_ignore_ascii_case(cookie_domain) {
            return true;
        }

        let host = request_host.to_ascii_lowercase();
        host.ends_with(&format!(".{}", cookie_domain.to_ascii_lowercase()))
    }

    /// Check if request path matches cookie path.
    /// Implements RFC 6265 path matching.
    fn path_matches(cookie_path: &str, request_path: &str) -> bool {
        if request_path == cookie_path {
            return true;
        }

        if let Some(rest) = request_path.strip_prefix(cookie_path) {
            return cookie_path.ends_with('/') || rest.starts_with('/');
        }

        false
    }

    /// RFC 6265 default-path: the directory of the request path.
    fn default_path(url: &Url) -> String {
        let path = url.path();
        match path.rfind('/') {
            Some(0) | None => "/".to_string(),
            Some(idx) => path[..idx].to_string(),
        }
    }

    /// Get all domains to check for a given host.
    /// Returns the host itself and all parent domains.
    fn get_matching_domains(host: &str) -> Vec<String> {
        let host = host.to_ascii_lowercase();
        let mut domains = vec![host.clone()];

        // "foo.bar.example.com" also checks "bar.example.com" and "example.com"
        let parts: Vec<&str> = host.split('.').collect();
        for i in 1..parts.len().saturating_sub(1) {
            domains.push(parts[i..].join("."));
        }

        domains
    }

    /// Get total cookie count.
    pub fn total_cookie_count(&self) -> usize {
        self.store.iter().map(|e| e.value().len()).sum()
    }

    /// Iterate over all cookies.
    pub fn iter_all_cookies(&self) -> impl Iterator<Item = CanonicalCookie> + '_ {
        self.store.iter().flat_map(|entry| entry.value().clone())
    }
}
