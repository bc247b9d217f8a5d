//! The `document.cookie` boundary.
//!
//! A browser exposes its cookie jar to a page as one mutable string: reading
//! it yields every visible `name=value` pair joined by `; `, and assigning to
//! it sets (or, with a past expiry, deletes) exactly one cookie.
//! [`CookieDocument`] captures that contract so the store can run against a
//! real browser binding or against [`MemoryDocument`] in tests and tools.

use crate::base::neterror::NetError;
use crate::cookies::monster::CookieMonster;
use std::sync::Arc;
use url::Url;

/// A document-scoped cookie string.
///
/// Methods take `&self`: like `document.cookie`, the backing jar is shared
/// mutable state.
pub trait CookieDocument {
    /// Every cookie visible to the document, as `name=value` pairs joined by `; `.
    fn cookie_string(&self) -> String;

    /// Apply one cookie assignment, e.g.
    /// `id=42; expires=Thu, 01 Jan 1970 00:00:00 GMT; path=/; domain=example.com`.
    fn set_cookie(&self, cookie_line: &str) -> Result<(), NetError>;

    /// Host name of the document (`location.hostname`).
    fn hostname(&self) -> String;
}

impl<D: CookieDocument + ?Sized> CookieDocument for &D {
    fn cookie_string(&self) -> String {
        (**self).cookie_string()
    }

    fn set_cookie(&self, cookie_line: &str) -> Result<(), NetError> {
        (**self).set_cookie(cookie_line)
    }

    fn hostname(&self) -> String {
        (**self).hostname()
    }
}

impl<D: CookieDocument + ?Sized> CookieDocument for Arc<D> {
    fn cookie_string(&self) -> String {
        (**self).cookie_string()
    }

    fn set_cookie(&self, cookie_line: &str) -> Result<(), NetError> {
        (**self).set_cookie(cookie_line)
    }

    fn hostname(&self) -> String {
        (**self).hostname()
    }
}

/// A document at a fixed URL backed by an in-memory [`CookieMonster`].
///
/// Several documents can share one jar with [`MemoryDocument::with_jar`],
/// e.g. two pages of the same site at different paths.
#[derive(Clone)]
pub struct MemoryDocument {
    url: Url,
    jar: CookieMonster,
}

impl MemoryDocument {
    /// Create a document for `url` with an empty jar.
    pub fn new(url: Url) -> Self {
        Self::with_jar(url, CookieMonster::new())
    }

    /// Create a document for `url` over an existing jar.
    pub fn with_jar(url: Url, jar: CookieMonster) -> Self {
        Self { url, jar }
    }

    /// Parse `url` and create a document for it.
    pub fn parse(url: &str) -> Result<Self, url::ParseError> {
        Ok(Self::new(Url::parse(url)?))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The jar behind this document.
    pub fn jar(&self) -> &CookieMonster {
        &self.jar
    }
}

impl CookieDocument for MemoryDocument {
    fn cookie_string(&self) -> String {
        self.jar.cookie_string_for_url(&self.url)
    }

    fn set_cookie(&self, cookie_line: &str) -> Result<(), NetError> {
        self.jar.set_cookie_line(&self.url, cookie_line)
    }

    fn hostname(&self) -> String {
        self.url.host_str().unwrap_or("").to_string()
    }
}
