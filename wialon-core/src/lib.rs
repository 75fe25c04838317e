// Protocol building blocks for the Wialon Remote API.
// Everything here is transport-free: the error taxonomy, the method-name
// to service-path resolution and the request framing used by the client.

pub mod error;
pub mod svc;
pub mod wire;

pub use error::{describe, Error, Result, UNHANDLED_ERROR_CODE};
pub use svc::resolve_service;
pub use wire::{assemble_params, CallRequest};
