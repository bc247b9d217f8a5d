//! Raw reads and writes against a document cookie string.
//!
//! Values cross this boundary percent-encoded in both directions: writes
//! encode with [`encode_component`], reads decode with [`decode_component`].

use crate::base::neterror::NetError;
use crate::cookies::attributes::CookieAttributes;
use std::borrow::Cow;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// Largest cookie a browser stores (name, value and attributes).
pub const MAX_COOKIE_SIZE: usize = 4096;

/// Percent-encode a cookie value component.
pub fn encode_component(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// Percent-decode a cookie value component.
///
/// Sequences that do not decode to UTF-8 are returned as written.
pub fn decode_component(value: &str) -> Cow<'_, str> {
    urlencoding::decode(value).unwrap_or(Cow::Borrowed(value))
}

/// Whether `name` can stand on the left of a cookie assignment.
///
/// Empty names and names with `=`, `;`, whitespace or control characters
/// would be cut short by the document and land on another cookie.
pub fn is_valid_cookie_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c == '=' || c == ';' || c.is_whitespace() || c.is_control())
}

/// Read the decoded value of cookie `name`, or `""` when it is absent.
///
/// Entries are split on `;` and compared on the exact name, so `foo` never
/// matches `foobar=` or a ` foo=` buried inside another cookie's value.
pub fn read_cookie(cookie_string: &str, name: &str) -> String {
    cookie_string
        .split(';')
        .find_map(|entry| {
            let (entry_name, value) = entry.split_once('=')?;
            (entry_name.trim() == name).then(|| decode_component(value.trim()).into_owned())
        })
        .unwrap_or_default()
}

/// Names of every cookie in the string, in document order.
pub fn cookie_names(cookie_string: &str) -> Vec<String> {
    if cookie_string.trim().is_empty() {
        return Vec::new();
    }

    cookie_string
        .split(';')
        .map(|entry| entry.split('=').next().unwrap_or("").trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Format a timestamp as an HTTP date: `Thu, 01 Jan 1970 00:00:00 GMT`.
pub fn http_date(at: OffsetDateTime) -> Result<String, NetError> {
    let format = format_description!(
        "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
    );
    Ok(at.to_offset(UtcOffset::UTC).format(format)?)
}

/// Build the assignment line for one cookie:
/// `name=value; [expires=<date>; ]path=<path>; domain=<domain>[; secure]`.
///
/// Fails with [`NetError::InvalidCookieName`] for names that
/// [`is_valid_cookie_name`] refuses.
pub fn format_cookie_line(
    name: &str,
    value: &str,
    attrs: &CookieAttributes,
    now: OffsetDateTime,
) -> Result<String, NetError> {
    if !is_valid_cookie_name(name) {
        return Err(NetError::InvalidCookieName);
    }

    let mut line = format!("{}={}", name, encode_component(value));

    if let Some(expires) = attrs.expiry.at(now) {
        line.push_str("; expires=");
        line.push_str(&http_date(expires)?);
    }

    line.push_str("; path=");
    line.push_str(&attrs.path);
    line.push_str("; domain=");
    line.push_str(&attrs.domain);

    if attrs.secure {
        line.push_str("; secure");
    }

    Ok(line)
}
