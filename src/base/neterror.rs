use thiserror::Error;

/// Errors raised below the public cookie facade.
///
/// Codes live in the Chromium `net_error_list.h` cookie block style: stable,
/// negative, and never reused. The facade itself never surfaces these; they
/// are returned by [`CookieDocument`](crate::cookies::document::CookieDocument)
/// backends and the options parser, and logged when swallowed.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum NetError {
    #[error("Cookie line could not be parsed")]
    InvalidCookieLine,
    #[error("Cookie name is empty or contains reserved characters")]
    InvalidCookieName,
    #[error("Cookie prefix validation failed")]
    CookieInvalidPrefix,
    #[error("Cookie domain is a public suffix")]
    CookiePublicSuffix,
    #[error("Cookie domain does not match the document host")]
    CookieDomainMismatch,
    #[error("Secure cookie set from an insecure document")]
    CookieSecureFromInsecureOrigin,
    #[error("Cookie options could not be parsed")]
    InvalidCookieOptions,
    #[error("Cookie expiry date could not be formatted")]
    CookieDateFormat,

    #[error("Unknown error: {0}")]
    Unknown(i32),
}

impl NetError {
    pub fn as_i32(&self) -> i32 {
        match self {
            NetError::InvalidCookieLine => -901,
            NetError::InvalidCookieName => -902,
            NetError::CookieInvalidPrefix => -903,
            NetError::CookiePublicSuffix => -904,
            NetError::CookieDomainMismatch => -905,
            NetError::CookieSecureFromInsecureOrigin => -906,
            NetError::InvalidCookieOptions => -907,
            NetError::CookieDateFormat => -908,
            NetError::Unknown(code) => *code,
        }
    }

    /// Whether the jar refused the cookie rather than failing to read it.
    ///
    /// Browsers drop rejected cookies without telling the page, so callers
    /// usually log these at `debug` instead of `warn`.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            NetError::CookieInvalidPrefix
                | NetError::CookiePublicSuffix
                | NetError::CookieDomainMismatch
                | NetError::CookieSecureFromInsecureOrigin
        )
    }
}

impl From<i32> for NetError {
    fn from(code: i32) -> Self {
        match code {
            -901 => NetError::InvalidCookieLine,
            -902 => NetError::InvalidCookieName,
            -903 => NetError::CookieInvalidPrefix,
            -904 => NetError::CookiePublicSuffix,
            -905 => NetError::CookieDomainMismatch,
            -906 => NetError::CookieSecureFromInsecureOrigin,
            -907 => NetError::InvalidCookieOptions,
            -908 => NetError::CookieDateFormat,
            _ => NetError::Unknown(code),
        }
    }
}

impl From<serde_json::Error> for NetError {
    fn from(_: serde_json::Error) -> Self {
        NetError::InvalidCookieOptions
    }
}

impl From<time::error::Format> for NetError {
    fn from(_: time::error::Format) -> Self {
        NetError::CookieDateFormat
    }
}
