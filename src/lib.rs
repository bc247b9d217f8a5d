//! # cookiepack
//!
//! A document cookie store with packed sub-key storage.
//!
//! `cookiepack` wraps a page's cookie string (`document.cookie` in a browser)
//! behind four operations, `get`, `set`, `remove` and `clear`, and can pack
//! many logical key/value pairs into a single physical cookie to stay under
//! per-domain cookie limits.
//!
//! ## Features
//!
//! - **Packed cookies**: `k1=v1&k2=v2` sub-keys under one cookie name, percent-encoded
//! - **Loose options**: positional, builder, or JSON object input with browser-style defaults
//! - **Pluggable document**: any [`CookieDocument`](cookies::document::CookieDocument) backend
//! - **In-memory jar**: domain/path scoping, expiry, secure and PSL checks for tests and tools
//!
//! ## Quick Start
//!
//! ```rust
//! use cookiepack::cookies::attributes::CookieOptions;
//! use cookiepack::cookies::document::MemoryDocument;
//! use cookiepack::cookies::store::CookieStore;
//!
//! let store = CookieStore::new(MemoryDocument::parse("https://example.com/").unwrap());
//! store.set("session", "abc123", CookieOptions::new().with_expires(2));
//! assert_eq!(store.get("session", None), "abc123");
//!
//! store.clear(None);
//! assert!(store.keys().is_empty());
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error codes and logging helpers
//! - [`cookies`] - Store facade, pack codec, attributes, document boundary and jar

pub mod base;
pub mod cookies;

pub use base::neterror::NetError;
pub use cookies::attributes::{CookieAttributes, CookieOptions, Expiry};
pub use cookies::document::{CookieDocument, MemoryDocument};
pub use cookies::packed::PackedCookie;
pub use cookies::store::{CookieStore, CookieStoreConfig};
