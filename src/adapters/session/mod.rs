//! Session adapters.
//!
//! - `InMemorySessionStore` - Process-local session storage with idle expiry
//! - `SessionCookieSigner` - HMAC-SHA256 signed session cookie values

mod cookie;
mod in_memory;

pub use cookie::SessionCookieSigner;
pub use in_memory::InMemorySessionStore;
