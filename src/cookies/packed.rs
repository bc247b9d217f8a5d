//! Packed cookies: many sub-keys stored in one physical cookie.
//!
//! Wire format is `k1=v1&k2=v2`, each key and value percent-encoded so `&`
//! and `=` only ever appear as delimiters. Keys written unescaped by older
//! writers are kept as written unless they are exactly what this encoder
//! would produce, so such cookies stay readable.
//!
//! [`PackedCookie`] is an insertion-ordered map: updating a key keeps its
//! position, removing one closes the gap.

use crate::cookies::raw::{decode_component, encode_component};
use std::fmt;

/// Delimiter between packed entries.
pub const ENTRY_SEPARATOR: char = '&';

/// Delimiter between a sub-key and its value.
pub const KEY_VALUE_SEPARATOR: char = '=';

/// Ordered sub-key/value map held in one physical cookie.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedCookie {
    entries: Vec<(String, String)>,
}

impl PackedCookie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a packed cookie value.
    ///
    /// Segments without `=` are dropped. When a key repeats, the first
    /// occurrence wins.
    pub fn decode(packed: &str) -> Self {
        let mut cookie = Self::new();
        if packed.trim().is_empty() {
            return cookie;
        }

        for segment in packed.split(ENTRY_SEPARATOR) {
            let Some((key, value)) = segment.split_once(KEY_VALUE_SEPARATOR) else {
                tracing::trace!(segment = %segment, "dropping packed segment without a value");
                continue;
            };
            let key = decode_key(key);
            if cookie.contains_key(&key) {
                continue;
            }
            cookie
                .entries
                .push((key, decode_component(value).into_owned()));
        }

        cookie
    }

    /// Encode back to the wire format.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            if !out.is_empty() {
                out.push(ENTRY_SEPARATOR);
            }
            out.push_str(&encode_component(key));
            out.push(KEY_VALUE_SEPARATOR);
            out.push_str(&encode_component(value));
        }
        out
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Insert or replace in place. Returns the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Remove one entry. Returns its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Decode a sub-key name only when it is in canonical encoded form.
///
/// Older writers stored names raw, so `k%41` may be a literal name; it is not
/// what [`encode_component`] emits for `kA`, so it stays `k%41`.
fn decode_key(raw: &str) -> String {
    let decoded = decode_component(raw);
    if encode_component(&decoded) == raw {
        decoded.into_owned()
    } else {
        raw.to_string()
    }
}

impl fmt::Display for PackedCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PackedCookie {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut cookie = Self::new();
        for (k, v) in iter {
            cookie.insert(k, v);
        }
        cookie
    }
}
