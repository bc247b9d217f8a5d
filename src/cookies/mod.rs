//! Document cookie storage with packed sub-keys.
//!
//! This module provides:
//!
//! - **Facade**: [`CookieStore`](store::CookieStore) with `get`, `set`, `remove`, `clear`
//! - **Packing**: many logical key/value pairs in one physical cookie ([`packed`])
//! - **Options**: loose caller input normalized to a full attribute set ([`attributes`])
//! - **Boundary**: the `document.cookie` contract ([`document`]) and raw string access ([`raw`])
//! - **Jar**: an in-memory browser cookie jar ([`CookieMonster`](monster::CookieMonster))
//!
//! # Architecture
//!
//! | Browser concept | cookiepack (Rust) | Responsibility |
//! |-----------------|-------------------|----------------|
//! | `document.cookie` | [`CookieDocument`](document::CookieDocument) | Read all, write one |
//! | `net::CookieMonster` | [`CookieMonster`](monster::CookieMonster) | Jar with domain/path scoping |
//! | `net::CanonicalCookie` | [`CanonicalCookie`](canonical_cookie::CanonicalCookie) | Single stored cookie |
//!
//! # Packed cookies
//!
//! ```rust
//! use cookiepack::cookies::attributes::CookieOptions;
//! use cookiepack::cookies::document::MemoryDocument;
//! use cookiepack::cookies::store::CookieStore;
//!
//! let store = CookieStore::new(MemoryDocument::parse("https://example.com/")?);
//! let prefs = CookieOptions::new().with_base_key("prefs").with_expires(24 * 30);
//!
//! store.set("theme", "dark", prefs.clone());
//! store.set("lang", "en", prefs);
//!
//! assert_eq!(store.keys(), vec!["prefs"]);
//! assert_eq!(store.get("theme", Some("prefs")), "dark");
//! # Ok::<(), url::ParseError>(())
//! ```

pub mod attributes;
pub mod canonical_cookie;
pub mod document;
pub mod monster;
pub mod packed;
pub mod psl;
pub mod raw;
pub mod store;
