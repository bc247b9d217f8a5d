//! The document cookie store facade.
//!
//! [`CookieStore`] offers `get`, `set`, `remove` and `clear` over any
//! [`CookieDocument`]. Cookies can be written directly, or packed as
//! sub-keys of one physical cookie by passing a base key.
//!
//! Nothing here returns an error: like a page script, callers see `""` for
//! anything absent, and writes the document refuses are logged and dropped.
//! A stored empty value reads the same as an absent one.
//!
//! Pack updates are read-modify-write with no locking across documents; two
//! writers updating the same packed cookie can lose each other's changes.

use crate::base::context::CookieResultExt;
use crate::cookies::attributes::{CookieAttributes, CookieOptions, DEFAULT_PATH};
use crate::cookies::document::CookieDocument;
use crate::cookies::packed::PackedCookie;
use crate::cookies::raw::{self, MAX_COOKIE_SIZE};
use serde::Deserialize;
use time::OffsetDateTime;

/// Store-wide defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CookieStoreConfig {
    /// Path used when options leave it empty.
    pub default_path: String,

    /// Domain used when options leave it empty (None = document host).
    pub default_domain: Option<String>,

    /// Lines longer than this are logged; browsers drop them.
    pub max_cookie_size: usize,
}

impl Default for CookieStoreConfig {
    fn default() -> Self {
        Self {
            default_path: DEFAULT_PATH.to_string(),
            default_domain: None,
            max_cookie_size: MAX_COOKIE_SIZE,
        }
    }
}

/// Cookie store over a document.
///
/// # Example
/// ```
/// use cookiepack::cookies::attributes::CookieOptions;
/// use cookiepack::cookies::document::MemoryDocument;
/// use cookiepack::cookies::store::CookieStore;
///
/// let store = CookieStore::new(MemoryDocument::parse("https://example.com/").unwrap());
/// store.set("a", "1", CookieOptions::new().with_base_key("bag"));
/// store.set("b", "2", CookieOptions::new().with_base_key("bag"));
/// assert_eq!(store.get("a", Some("bag")), "1");
///
/// store.remove("a", Some("bag"), None);
/// assert_eq!(store.get("a", Some("bag")), "");
/// assert_eq!(store.get("b", Some("bag")), "2");
/// ```
pub struct CookieStore<D> {
    document: D,
    config: CookieStoreConfig,
}

impl<D: CookieDocument> CookieStore<D> {
    pub fn new(document: D) -> Self {
        Self::with_config(document, CookieStoreConfig::default())
    }

    pub fn with_config(document: D, config: CookieStoreConfig) -> Self {
        Self { document, config }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn config(&self) -> &CookieStoreConfig {
        &self.config
    }

    /// Read `key`.
    ///
    /// A non-empty direct cookie named `key` wins; otherwise, with a
    /// `base_key`, the sub-key is looked up in that packed cookie.
    /// Returns `""` when nothing is found.
    pub fn get(&self, key: &str, base_key: Option<&str>) -> String {
        let key = key.trim();
        let direct = self.read(key);

        match base_key.filter(|b| !b.trim().is_empty()) {
            Some(base_key) if direct.trim().is_empty() => self
                .get_packed(base_key)
                .get(key)
                .map(str::to_string)
                .unwrap_or_default(),
            _ => direct.trim().to_string(),
        }
    }

    /// Decode every sub-key of the packed cookie `base_key`.
    pub fn get_packed(&self, base_key: &str) -> PackedCookie {
        PackedCookie::decode(&self.read(base_key.trim()))
    }

    /// Write `name=value`.
    ///
    /// Accepts anything convertible to [`CookieOptions`], including a bare
    /// hour count. With a base key the value is packed into that cookie.
    ///
    /// Names containing `=`, `;`, whitespace or control characters cannot be
    /// written as cookies; such writes are logged and dropped. As sub-keys of
    /// a packed cookie they are escaped and stored normally.
    pub fn set(&self, name: &str, value: &str, options: impl Into<CookieOptions>) {
        let name = name.trim();
        let attrs = self.normalize(&options.into());

        match attrs.pack_target.clone() {
            Some(target) => self.zip(name, value, &target, &attrs),
            None => self.write(name, value, &attrs),
        }
    }

    /// Delete `name`.
    ///
    /// With a base key only that sub-key leaves the packed cookie; the other
    /// sub-keys stay readable. A direct cookie named `name` is expired in
    /// both cases, since `get` would otherwise keep returning it.
    ///
    /// The packed cookie is rewritten without an expiry, so a persistent
    /// pack becomes a session cookie. Use [`remove_with`](Self::remove_with)
    /// with a positive `expires` to keep it persistent.
    pub fn remove(&self, name: &str, base_key: Option<&str>, domain: Option<&str>) {
        let mut options = CookieOptions::new();
        options.base_key = base_key.map(str::to_string);
        options.domain = domain.map(str::to_string);
        self.remove_with(name, options);
    }

    /// Delete `name` with full options.
    ///
    /// A packed cookie left behind is rewritten with these options, so a
    /// positive `expires` keeps it persistent; plain [`remove`](Self::remove)
    /// rewrites it as a session cookie.
    pub fn remove_with(&self, name: &str, options: impl Into<CookieOptions>) {
        let name = name.trim();
        let attrs = self.normalize(&options.into());

        if let Some(target) = attrs.pack_target.clone() {
            self.unzip(name, &target, &attrs);
            if !raw::is_valid_cookie_name(name) {
                return;
            }
        }

        self.write(name, "", &Self::expired_like(&attrs));
    }

    /// Expire every cookie visible to the document, at path `/` on `domain`
    /// (default: the document host).
    ///
    /// Cookies scoped to other paths are not visible here and survive.
    pub fn clear(&self, domain: Option<&str>) {
        let attrs = CookieAttributes::expired(self.domain_or_default(domain));
        for name in self.keys() {
            self.write(&name, "", &attrs);
        }
    }

    /// Names of every physical cookie visible to the document.
    pub fn keys(&self) -> Vec<String> {
        raw::cookie_names(&self.document.cookie_string())
    }

    fn normalize(&self, options: &CookieOptions) -> CookieAttributes {
        let domain = self.domain_or_default(None);
        options.normalize_with(&self.config.default_path, &domain)
    }

    fn domain_or_default(&self, domain: Option<&str>) -> String {
        domain
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .or_else(|| self.config.default_domain.clone())
            .unwrap_or_else(|| self.document.hostname())
    }

    /// Deleting write at the same path and domain as `attrs`.
    fn expired_like(attrs: &CookieAttributes) -> CookieAttributes {
        CookieAttributes {
            path: attrs.path.clone(),
            ..CookieAttributes::expired(attrs.domain.clone())
        }
    }

    fn read(&self, name: &str) -> String {
        raw::read_cookie(&self.document.cookie_string(), name)
    }

    fn write(&self, name: &str, value: &str, attrs: &CookieAttributes) {
        let Some(line) = raw::format_cookie_line(name, value, attrs, OffsetDateTime::now_utc())
            .cookie_context(name)
        else {
            return;
        };

        if line.len() > self.config.max_cookie_size {
            tracing::warn!(
                cookie = %name,
                size = line.len(),
                limit = self.config.max_cookie_size,
                "cookie exceeds browser size limit"
            );
        }

        tracing::debug!(cookie = %name, deletion = attrs.is_deletion(), "writing cookie");
        self.document.set_cookie(&line).cookie_context(name);
    }

    /// Pack `name=value` into the cookie `target`.
    fn zip(&self, name: &str, value: &str, target: &str, attrs: &CookieAttributes) {
        let current = self.read(target);

        if value.trim().is_empty() && !current.is_empty() {
            self.unzip(name, target, attrs);
            return;
        }

        // A direct cookie under the same name would shadow the packed entry.
        if raw::is_valid_cookie_name(name) {
            self.write(name, "", &Self::expired_like(attrs));
        }

        let mut packed = PackedCookie::decode(&current);
        packed.insert(name, value);
        self.write(target, &packed.encode(), &attrs.without_pack_target());
    }

    /// Drop `name` from the cookie `target`, expiring it once empty.
    fn unzip(&self, name: &str, target: &str, attrs: &CookieAttributes) {
        let current = self.read(target);
        if current.trim().is_empty() {
            return;
        }

        let mut packed = PackedCookie::decode(&current);
        if packed.remove(name).is_none() {
            return;
        }

        if packed.is_empty() {
            self.write(target, "", &Self::expired_like(attrs));
        } else {
            self.write(target, &packed.encode(), &attrs.without_pack_target());
        }
    }
}
