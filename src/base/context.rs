//! Ergonomic error context helpers.
//!
//! A page never sees a failed `document.cookie` assignment; the browser just
//! drops it. These extension traits give the facade the same behavior while
//! still leaving a trace of what was dropped.

use crate::base::neterror::NetError;

/// Extension trait for swallowing cookie errors with a log line.
pub trait CookieResultExt<T> {
    /// Log the error against the cookie `name` and discard it.
    ///
    /// Rejections (public suffix, domain mismatch, ...) are logged at
    /// `debug`, everything else at `warn`.
    ///
    /// # Example
    /// ```ignore
    /// use cookiepack::base::context::CookieResultExt;
    ///
    /// document.set_cookie(&line).cookie_context("session");
    /// ```
    fn cookie_context(self, name: &str) -> Option<T>;
}

impl<T> CookieResultExt<T> for Result<T, NetError> {
    fn cookie_context(self, name: &str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(e) if e.is_rejection() => {
                tracing::debug!(cookie = %name, error = %e, code = e.as_i32(), "cookie rejected by document");
                None
            }
            Err(e) => {
                tracing::warn!(cookie = %name, error = %e, code = e.as_i32(), "cookie write failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_passes_through() {
        let result: Result<u8, NetError> = Ok(7);
        assert_eq!(result.cookie_context("a"), Some(7));
    }

    #[test]
    fn test_errors_become_none() {
        let rejected: Result<(), NetError> = Err(NetError::CookiePublicSuffix);
        assert_eq!(rejected.cookie_context("a"), None);

        let failed: Result<(), NetError> = Err(NetError::InvalidCookieLine);
        assert_eq!(failed.cookie_context("a"), None);
    }
}
