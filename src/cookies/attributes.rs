//! Cookie attribute normalization.
//!
//! [`CookieOptions`] is what callers hand to `set`: every field optional,
//! loosely typed input coerced rather than rejected. [`CookieOptions::normalize`]
//! turns it into a [`CookieAttributes`] with every default filled in, which is
//! what the raw writer and the pack codec work with.

use crate::base::neterror::NetError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use time::{Duration, OffsetDateTime};

/// Longest expiry a browser will honor (Chromium caps cookies at 400 days).
pub const MAX_EXPIRY_HOURS: i64 = 400 * 24;

/// Default cookie path.
pub const DEFAULT_PATH: &str = "/";

/// When a cookie stops being sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expiry {
    /// No `expires` attribute; the cookie ends with the browsing session.
    #[default]
    Session,
    /// Expires this many hours after it is written.
    Hours(i64),
    /// Already in the past; writing it deletes the cookie.
    Expired,
}

impl Expiry {
    /// Coerce an hour count: zero or negative means session, large values
    /// are capped at [`MAX_EXPIRY_HOURS`].
    pub fn from_hours(hours: i64) -> Self {
        if hours > 0 {
            Expiry::Hours(hours.min(MAX_EXPIRY_HOURS))
        } else {
            Expiry::Session
        }
    }

    /// The `expires` timestamp to emit, if any.
    pub fn at(&self, now: OffsetDateTime) -> Option<OffsetDateTime> {
        match self {
            Expiry::Session => None,
            Expiry::Hours(hours) => Some(now + Duration::hours(*hours)),
            Expiry::Expired => Some(OffsetDateTime::UNIX_EPOCH),
        }
    }
}

/// Options accepted by `set`, either built in code or parsed from the
/// object form `{expires, path, domain, secure, baseKey}`.
///
/// Missing, empty, or non-positive fields fall back to defaults during
/// [`normalize`](Self::normalize). Nothing here is validated; a bad path or
/// domain goes to the document, which drops the cookie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CookieOptions {
    /// Lifetime in hours; `<= 0` is a session cookie.
    #[serde(deserialize_with = "loose_hours")]
    pub expires: i64,
    #[serde(deserialize_with = "loose_string")]
    pub path: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub domain: Option<String>,
    #[serde(deserialize_with = "truthy")]
    pub secure: bool,
    /// Pack the value under this physical cookie instead of writing it directly.
    #[serde(deserialize_with = "loose_string")]
    pub base_key: Option<String>,
}

impl CookieOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Positional form: `(expires, path, domain, secure, base_key)`.
    pub fn positional(
        expires: i64,
        path: Option<&str>,
        domain: Option<&str>,
        secure: bool,
        base_key: Option<&str>,
    ) -> Self {
        Self {
            expires,
            path: path.map(str::to_string),
            domain: domain.map(str::to_string),
            secure,
            base_key: base_key.map(str::to_string),
        }
    }

    /// Parse the JSON object form.
    ///
    /// # Example
    /// ```
    /// use cookiepack::cookies::attributes::CookieOptions;
    ///
    /// let opts = CookieOptions::from_json(r#"{"expires": "12", "baseKey": "bag"}"#)?;
    /// assert_eq!(opts.expires, 12);
    /// assert_eq!(opts.base_key.as_deref(), Some("bag"));
    /// # Ok::<(), cookiepack::base::neterror::NetError>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self, NetError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_expires(mut self, hours: i64) -> Self {
        self.expires = hours;
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_base_key(mut self, base_key: impl Into<String>) -> Self {
        self.base_key = Some(base_key.into());
        self
    }

    /// Fill defaults: path `/`, domain `host`, session expiry, no pack target.
    pub fn normalize(&self, host: &str) -> CookieAttributes {
        self.normalize_with(DEFAULT_PATH, host)
    }

    /// Like [`normalize`](Self::normalize) with explicit fallbacks.
    pub fn normalize_with(&self, default_path: &str, default_domain: &str) -> CookieAttributes {
        CookieAttributes {
            expiry: Expiry::from_hours(self.expires),
            path: non_empty(self.path.as_deref()).unwrap_or(default_path).to_string(),
            domain: non_empty(self.domain.as_deref())
                .unwrap_or(default_domain)
                .to_string(),
            secure: self.secure,
            pack_target: non_empty(self.base_key.as_deref().map(str::trim)).map(str::to_string),
        }
    }
}

impl From<i64> for CookieOptions {
    fn from(expires: i64) -> Self {
        Self::new().with_expires(expires)
    }
}

/// The canonical attribute set, every default resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieAttributes {
    pub expiry: Expiry,
    pub path: String,
    pub domain: String,
    pub secure: bool,
    /// Physical cookie to pack into; `None` writes directly.
    pub pack_target: Option<String>,
}

impl CookieAttributes {
    /// Session cookie at `/` for `domain`.
    pub fn session(domain: impl Into<String>) -> Self {
        Self {
            expiry: Expiry::Session,
            path: DEFAULT_PATH.to_string(),
            domain: domain.into(),
            secure: false,
            pack_target: None,
        }
    }

    /// Deleting write at `/` for `domain`.
    pub fn expired(domain: impl Into<String>) -> Self {
        Self {
            expiry: Expiry::Expired,
            ..Self::session(domain)
        }
    }

    /// Same attributes, written directly.
    pub fn without_pack_target(&self) -> Self {
        Self {
            pack_target: None,
            ..self.clone()
        }
    }

    pub fn is_deletion(&self) -> bool {
        self.expiry == Expiry::Expired
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

fn loose_hours<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let hours = match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => leading_int(&s),
        Value::Bool(true) => 1,
        _ => 0,
    };
    Ok(hours)
}

fn loose_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let s = match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    };
    Ok(s.filter(|s| !s.is_empty()))
}

fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    };
    Ok(value)
}

/// Integer prefix of a string, `parseInt` style: `" 12h"` is 12, `"x"` is 0.
fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
}
