// Blocking client for the Wialon Remote API.
// The dispatcher accepts any method name at call time; see `Client::call`
// and the `remote_call!` macro.

pub mod client;
pub mod macros;
pub mod session;

pub use client::{Client, DEFAULT_GEOCODING_FLAGS};
pub use session::{Session, SessionConfig, DEFAULT_HOST};

// Re-export the protocol-level types callers match on.
pub use wialon_core::{describe, Error, Result, UNHANDLED_ERROR_CODE};

// Payload plumbing for callers and for `remote_call!` expansions.
pub use serde_json::{json, Value};
