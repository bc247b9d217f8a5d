//! Public Suffix List (PSL) validation for the `domain` cookie attribute.
//!
//! A page may only widen a cookie to its own host or a parent domain, never
//! to a public suffix such as `.com` or `.co.uk`. Uses Mozilla's Public
//! Suffix List via the `psl` crate.

use crate::base::neterror::NetError;
use psl::{List, Psl};
use std::net::IpAddr;

/// Check if a domain is a public suffix (e.g., "com", "co.uk").
pub fn is_public_suffix(domain: &str) -> bool {
    let domain_lower = domain.to_lowercase();
    let domain_bytes = domain_lower.as_bytes();

    match List.suffix(domain_bytes) {
        Some(suffix) => suffix.as_bytes() == domain_bytes,
        None => false,
    }
}

/// Resolve the `domain` attribute of a cookie written from `host`.
///
/// Returns the domain to store and whether the cookie is host-only,
/// following RFC 6265 section 5.3:
/// - no attribute (or an empty one) gives a host-only cookie for `host`
/// - an attribute equal to the host is accepted even on a public suffix
///   (`localhost`, bare TLD intranets) and stays host-only
/// - otherwise the attribute must not be a public suffix and `host` must
///   domain-match it
/// - IP hosts only accept their own address
pub fn resolve_cookie_domain(
    domain_attr: Option<&str>,
    host: &str,
) -> Result<(String, bool), NetError> {
    let host = host.to_lowercase();
    let attr = domain_attr
        .map(|d| d.trim().trim_start_matches('.').to_lowercase())
        .filter(|d| !d.is_empty());

    let Some(domain) = attr else {
        return Ok((host, true));
    };

    if domain == host {
        if is_public_suffix(&domain) || host.parse::<IpAddr>().is_ok() {
            return Ok((host, true));
        }
        return Ok((domain, false));
    }

    if host.parse::<IpAddr>().is_ok() {
        return Err(NetError::CookieDomainMismatch);
    }

    if is_public_suffix(&domain) {
        return Err(NetError::CookiePublicSuffix);
    }

    if host.ends_with(&format!(".{}", domain)) {
        Ok((domain, false))
    } else {
        Err(NetError::CookieDomainMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_public_suffix() {
        assert!(is_public_suffix("com"));
        assert!(is_public_suffix("CO.UK"));
        assert!(is_public_suffix("github.io"));
        assert!(!is_public_suffix("example.com"));
        assert!(!is_public_suffix("sub.example.com"));
    }

    #[test]
    fn test_no_attribute_is_host_only() {
        assert_eq!(
            resolve_cookie_domain(None, "www.Example.com"),
            Ok(("www.example.com".to_string(), true))
        );
        assert_eq!(
            resolve_cookie_domain(Some("  "), "example.com"),
            Ok(("example.com".to_string(), true))
        );
    }

    #[test]
    fn test_parent_domain_accepted() {
        assert_eq!(
            resolve_cookie_domain(Some(".example.com"), "a.example.com"),
            Ok(("example.com".to_string(), false))
        );
        assert_eq!(
            resolve_cookie_domain(Some("example.com"), "example.com"),
            Ok(("example.com".to_string(), false))
        );
    }

    #[test]
    fn test_public_suffix_rejected() {
        assert_eq!(
            resolve_cookie_domain(Some("com"), "example.com"),
            Err(NetError::CookiePublicSuffix)
        );
        assert_eq!(
            resolve_cookie_domain(Some(".co.uk"), "example.co.uk"),
            Err(NetError::CookiePublicSuffix)
        );
    }

    #[test]
    fn test_unrelated_domain_rejected() {
        assert_eq!(
            resolve_cookie_domain(Some("other.com"), "example.com"),
            Err(NetError::CookieDomainMismatch)
        );
        // Suffix without a dot boundary is not a parent domain.
        assert_eq!(
            resolve_cookie_domain(Some("ample.com"), "example.com"),
            Err(NetError::CookieDomainMismatch)
        );
    }

    #[test]
    fn test_localhost_and_ip_hosts() {
        assert_eq!(
            resolve_cookie_domain(Some("localhost"), "localhost").map(|(d, _)| d),
            Ok("localhost".to_string())
        );
        assert_eq!(
            resolve_cookie_domain(Some("127.0.0.1"), "127.0.0.1"),
            Ok(("127.0.0.1".to_string(), true))
        );
        assert_eq!(
            resolve_cookie_domain(Some("0.0.1"), "127.0.0.1"),
            Err(NetError::CookieDomainMismatch)
        );
    }
}
