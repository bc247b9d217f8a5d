use time::OffsetDateTime;

/// Represents a cookie held by the in-memory jar.
/// Modeled after Chromium's `net::CanonicalCookie`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalCookie {
    pub name: String,
    /// Value exactly as written in the assignment (still percent-encoded).
    pub value: String,
    pub domain: String,
    pub path: String,
    pub creation_time: OffsetDateTime,
    pub expiration_time: Option<OffsetDateTime>,
    pub secure: bool,
    pub host_only: bool,
}

impl CanonicalCookie {
    pub fn new(
        name: String,
        value: String,
        domain: String,
        path: String,
        creation_time: OffsetDateTime,
        expiration_time: Option<OffsetDateTime>,
    ) -> Self {
        Self {
            name,
            value,
            domain,
            path,
            creation_time,
            expiration_time,
            secure: false,
            host_only: true,
        }
    }

    pub fn is_expired(&self, current_time: OffsetDateTime) -> bool {
        if let Some(expiry) = self.expiration_time {
            expiry <= current_time
        } else {
            false
        }
    }

    /// Session cookies have no expiry and live until the jar is dropped.
    pub fn is_session(&self) -> bool {
        self.expiration_time.is_none()
    }

    /// Validate __Secure- and __Host- cookie prefixes per RFC 6265bis.
    /// - __Secure- cookies MUST have the Secure attribute
    /// - __Host- cookies MUST have Secure, Path="/", and no Domain attribute
    pub fn validate_prefix(
        &self,
        secure_origin: bool,
    ) -> Result<(), crate::base::neterror::NetError> {
        use crate::base::neterror::NetError;

        if self.name.starts_with("__Secure-") && (!self.secure || !secure_origin) {
            return Err(NetError::CookieInvalidPrefix);
        }

        if self.name.starts_with("__Host-")
            && (!self.secure || self.path != "/" || !self.host_only || !secure_origin)
        {
            return Err(NetError::CookieInvalidPrefix);
        }

        Ok(())
    }
}
