//! Base types and error handling.
//!
//! Provides foundational types mirroring Chromium's `net/base/`:
//! - [`NetError`](neterror::NetError): cookie error codes in the `net_error_list.h` style
//! - [`context`]: helpers that turn errors into the silent no-ops a page sees

pub mod context;
pub mod neterror;
